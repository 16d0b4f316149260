//! In-memory catalog snapshot over the backend
//!
//! The catalog holds the weaver, loom, and design lists in one snapshot and
//! refreshes it wholesale after every successful submission. Reads never
//! block on the backend; a view is a filtered clone of the snapshot.

use std::sync::Arc;

use log::debug;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::cascade::slot_options;
use crate::enums::{resolve_choice, EnumKind, EnumRegistry};
use crate::error::CatalogError;
use crate::models::{validate_design, validate_loom, validate_weaver};
use loomledger_backend::{
    BackendRef, Design, DesignFields, Loom, LoomFields, Weaver, WeaverFields,
};

// ==================== Snapshot types ====================

/// Raw catalog snapshot loaded from the backend
#[derive(Debug, Clone, Default)]
pub struct CatalogData {
    pub weavers: Vec<Weaver>,
    pub looms: Vec<Loom>,
    pub designs: Vec<Design>,
}

/// Filter criteria over the catalog snapshot
#[derive(Debug, Clone, Default)]
pub struct CatalogCriteria {
    /// Exact match on loom_name across all three lists
    pub loom_name: Option<String>,
    /// Exact match on loom_slot, designs only
    pub loom_slot: Option<u32>,
}

/// Filtered view of the catalog, serialized as-is by the API layer
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogView {
    pub weavers: Vec<Weaver>,
    pub looms: Vec<Loom>,
    pub designs: Vec<Design>,
}

/// Loom submission with optional companions for the "other" sentinel
#[derive(Debug, Clone)]
pub struct LoomSubmission {
    pub fields: LoomFields,
    pub new_loom_type: Option<String>,
    pub new_jacquard_type: Option<String>,
}

/// Design submission with an optional companion for the "other" sentinel
#[derive(Debug, Clone)]
pub struct DesignSubmission {
    pub fields: DesignFields,
    pub new_design_name: Option<String>,
}

// ==================== Catalog ====================

/// Hierarchical catalog of weavers, looms, and designs
pub struct Catalog {
    backend: BackendRef,
    data: RwLock<CatalogData>,
    enums: EnumRegistry,
}

impl Catalog {
    pub fn new(backend: BackendRef) -> Arc<Self> {
        Arc::new(Self {
            backend,
            data: RwLock::new(CatalogData::default()),
            enums: EnumRegistry::new(),
        })
    }

    /// Reload the whole snapshot from the backend and rebuild the open
    /// enumeration sets from the stored records
    pub async fn load(&self) -> Result<(), CatalogError> {
        let weavers = self.backend.list_weavers().await?;
        let looms = self.backend.list_looms().await?;
        let designs = self.backend.list_designs().await?;
        debug!(
            "Catalog loaded: {} weavers, {} looms, {} designs",
            weavers.len(),
            looms.len(),
            designs.len()
        );

        self.enums.replace_all(
            EnumKind::LoomTypes,
            looms.iter().map(|l| l.loom_type.clone()).collect(),
        );
        self.enums.replace_all(
            EnumKind::JacquardTypes,
            looms.iter().map(|l| l.jacquard_type.clone()).collect(),
        );
        self.enums.replace_all(
            EnumKind::DesignNames,
            designs.iter().map(|d| d.design_name.clone()).collect(),
        );

        let mut data = self.data.write().await;
        *data = CatalogData {
            weavers,
            looms,
            designs,
        };
        Ok(())
    }

    pub fn enums(&self) -> &EnumRegistry {
        &self.enums
    }

    /// Filtered view of the snapshot
    pub async fn view(&self, criteria: &CatalogCriteria) -> CatalogView {
        let data = self.data.read().await;
        let mut view = CatalogView {
            weavers: data.weavers.clone(),
            looms: data.looms.clone(),
            designs: data.designs.clone(),
        };
        if let Some(name) = criteria.loom_name.as_deref() {
            view.weavers.retain(|w| w.loom_name == name);
            view.looms.retain(|l| l.loom_name == name);
            view.designs.retain(|d| d.loom_name == name);
        }
        if let Some(slot) = criteria.loom_slot {
            view.designs.retain(|d| d.loom_slot == slot);
        }
        view
    }

    /// Distinct loom names in insertion order, the parent option set for
    /// weaver and design forms
    pub async fn loom_names(&self) -> Vec<String> {
        let data = self.data.read().await;
        let mut names: Vec<String> = Vec::new();
        for loom in &data.looms {
            if !names.contains(&loom.loom_name) {
                names.push(loom.loom_name.clone());
            }
        }
        names
    }

    /// Slot numbers available under a loom name
    pub async fn slot_options(&self, loom_name: &str) -> Vec<u32> {
        let data = self.data.read().await;
        slot_options(&data.looms, loom_name)
    }

    // ==================== Weavers ====================

    pub async fn submit_weaver(&self, fields: WeaverFields) -> Result<Weaver, CatalogError> {
        validate_weaver(&fields)?;
        let weaver = self.backend.create_weaver(fields).await?;
        self.load().await?;
        Ok(weaver)
    }

    pub async fn amend_weaver(
        &self,
        id: &str,
        fields: WeaverFields,
    ) -> Result<Weaver, CatalogError> {
        validate_weaver(&fields)?;
        let weaver = self.backend.update_weaver(id, fields).await?;
        self.load().await?;
        Ok(weaver)
    }

    // ==================== Looms ====================

    pub async fn submit_loom(&self, submission: LoomSubmission) -> Result<Loom, CatalogError> {
        let fields = self.resolve_loom(submission)?;
        validate_loom(&fields)?;
        let loom = self.backend.create_loom(fields).await?;
        self.load().await?;
        self.enums
            .register_if_absent(EnumKind::LoomTypes, &loom.loom_type);
        self.enums
            .register_if_absent(EnumKind::JacquardTypes, &loom.jacquard_type);
        Ok(loom)
    }

    pub async fn amend_loom(
        &self,
        id: &str,
        submission: LoomSubmission,
    ) -> Result<Loom, CatalogError> {
        let fields = self.resolve_loom(submission)?;
        validate_loom(&fields)?;
        let loom = self.backend.update_loom(id, fields).await?;
        self.load().await?;
        self.enums
            .register_if_absent(EnumKind::LoomTypes, &loom.loom_type);
        self.enums
            .register_if_absent(EnumKind::JacquardTypes, &loom.jacquard_type);
        Ok(loom)
    }

    fn resolve_loom(&self, submission: LoomSubmission) -> Result<LoomFields, CatalogError> {
        let mut fields = submission.fields;
        fields.loom_type = resolve_choice(
            "loom_type",
            &fields.loom_type,
            submission.new_loom_type.as_deref(),
        )?;
        fields.jacquard_type = resolve_choice(
            "jacquard_type",
            &fields.jacquard_type,
            submission.new_jacquard_type.as_deref(),
        )?;
        Ok(fields)
    }

    // ==================== Designs ====================

    pub async fn submit_design(&self, submission: DesignSubmission) -> Result<Design, CatalogError> {
        let fields = self.resolve_design(submission)?;
        {
            let data = self.data.read().await;
            validate_design(&fields, &data.looms)?;
        }
        let design = self.backend.create_design(fields).await?;
        self.load().await?;
        self.enums
            .register_if_absent(EnumKind::DesignNames, &design.design_name);
        Ok(design)
    }

    pub async fn amend_design(
        &self,
        id: &str,
        submission: DesignSubmission,
    ) -> Result<Design, CatalogError> {
        let fields = self.resolve_design(submission)?;
        {
            let data = self.data.read().await;
            validate_design(&fields, &data.looms)?;
        }
        let design = self.backend.update_design(id, fields).await?;
        self.load().await?;
        self.enums
            .register_if_absent(EnumKind::DesignNames, &design.design_name);
        Ok(design)
    }

    fn resolve_design(&self, submission: DesignSubmission) -> Result<DesignFields, CatalogError> {
        let mut fields = submission.fields;
        fields.design_name = resolve_choice(
            "design_name",
            &fields.design_name,
            submission.new_design_name.as_deref(),
        )?;
        Ok(fields)
    }
}
