//! Backend client trait and the default in-memory implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::BackendError;
use crate::fields::{DesignFields, LoomFields, TransactionFields, WeaverFields};
use crate::records::{CategorySet, Design, Loom, Transaction, Weaver};

/// Data-access collaborator for all record areas
///
/// Every listing call returns a complete snapshot for the requested scope;
/// callers replace their in-memory copy wholesale, never merge.
#[async_trait]
pub trait BackendClient: Send + Sync {
    async fn list_transactions(&self, location: &str) -> Result<Vec<Transaction>, BackendError>;
    async fn create_transaction(
        &self,
        location: &str,
        fields: TransactionFields,
    ) -> Result<Transaction, BackendError>;
    async fn update_transaction(
        &self,
        location: &str,
        id: &str,
        fields: TransactionFields,
    ) -> Result<Transaction, BackendError>;
    async fn list_categories(&self, location: &str) -> Result<CategorySet, BackendError>;

    async fn list_weavers(&self) -> Result<Vec<Weaver>, BackendError>;
    async fn create_weaver(&self, fields: WeaverFields) -> Result<Weaver, BackendError>;
    async fn update_weaver(&self, id: &str, fields: WeaverFields) -> Result<Weaver, BackendError>;

    async fn list_looms(&self) -> Result<Vec<Loom>, BackendError>;
    async fn create_loom(&self, fields: LoomFields) -> Result<Loom, BackendError>;
    async fn update_loom(&self, id: &str, fields: LoomFields) -> Result<Loom, BackendError>;

    async fn list_designs(&self) -> Result<Vec<Design>, BackendError>;
    async fn create_design(&self, fields: DesignFields) -> Result<Design, BackendError>;
    async fn update_design(&self, id: &str, fields: DesignFields) -> Result<Design, BackendError>;

    async fn list_locations(&self) -> Result<Vec<String>, BackendError>;
    async fn create_location(&self, name: &str) -> Result<(), BackendError>;

    /// Boolean gate in front of destructive update actions
    async fn verify_admin_password(&self, username: &str, password: &str) -> Result<bool, BackendError>;
}

#[derive(Debug, Default)]
struct MemoryState {
    transactions: HashMap<String, Vec<Transaction>>,
    weavers: Vec<Weaver>,
    looms: Vec<Loom>,
    designs: Vec<Design>,
    locations: Vec<String>,
}

/// In-process backend used by tests and standalone runs
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: RwLock<MemoryState>,
    admin: Option<(String, String)>,
}

impl MemoryBackend {
    /// Create a backend with the given locations already provisioned
    pub fn with_locations(names: &[String]) -> Self {
        let backend = MemoryBackend::default();
        {
            let mut state = backend.state.write().unwrap();
            for name in names {
                if !state.locations.contains(name) {
                    state.locations.push(name.clone());
                    state.transactions.insert(name.clone(), Vec::new());
                }
            }
        }
        backend
    }

    /// Set the admin credential pair checked by `verify_admin_password`
    pub fn with_admin(mut self, username: &str, password: &str) -> Self {
        self.admin = Some((username.to_string(), password.to_string()));
        self
    }

    fn ensure_location(state: &MemoryState, location: &str) -> Result<(), BackendError> {
        if state.locations.iter().any(|l| l == location) {
            Ok(())
        } else {
            Err(BackendError::NotFound {
                resource: format!("location {}", location),
            })
        }
    }
}

#[async_trait]
impl BackendClient for MemoryBackend {
    async fn list_transactions(&self, location: &str) -> Result<Vec<Transaction>, BackendError> {
        let state = self.state.read().unwrap();
        Self::ensure_location(&state, location)?;
        Ok(state.transactions.get(location).cloned().unwrap_or_default())
    }

    async fn create_transaction(
        &self,
        location: &str,
        fields: TransactionFields,
    ) -> Result<Transaction, BackendError> {
        let mut state = self.state.write().unwrap();
        Self::ensure_location(&state, location)?;
        let txn = Transaction {
            id: loomledger_utils::generate_id(),
            date: fields.date,
            txn_type: fields.txn_type,
            amount: fields.amount,
            category: fields.category,
            sub_category: fields.sub_category,
            description: fields.description,
            attachments: fields.attachments,
            location: location.to_string(),
        };
        state
            .transactions
            .entry(location.to_string())
            .or_default()
            .push(txn.clone());
        Ok(txn)
    }

    async fn update_transaction(
        &self,
        location: &str,
        id: &str,
        fields: TransactionFields,
    ) -> Result<Transaction, BackendError> {
        let mut state = self.state.write().unwrap();
        Self::ensure_location(&state, location)?;
        let txns = state
            .transactions
            .get_mut(location)
            .ok_or_else(|| BackendError::NotFound {
                resource: format!("location {}", location),
            })?;
        let txn = txns
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| BackendError::NotFound {
                resource: format!("transaction {}", id),
            })?;
        txn.date = fields.date;
        txn.txn_type = fields.txn_type;
        txn.amount = fields.amount;
        txn.category = fields.category;
        txn.sub_category = fields.sub_category;
        txn.description = fields.description;
        txn.attachments = fields.attachments;
        Ok(txn.clone())
    }

    async fn list_categories(&self, location: &str) -> Result<CategorySet, BackendError> {
        let state = self.state.read().unwrap();
        Self::ensure_location(&state, location)?;
        let mut set = CategorySet::default();
        if let Some(txns) = state.transactions.get(location) {
            for txn in txns {
                if !set.categories.contains(&txn.category) {
                    set.categories.push(txn.category.clone());
                }
                if let Some(sub) = &txn.sub_category {
                    if !sub.is_empty() && !set.sub_categories.contains(sub) {
                        set.sub_categories.push(sub.clone());
                    }
                }
            }
        }
        Ok(set)
    }

    async fn list_weavers(&self) -> Result<Vec<Weaver>, BackendError> {
        Ok(self.state.read().unwrap().weavers.clone())
    }

    async fn create_weaver(&self, fields: WeaverFields) -> Result<Weaver, BackendError> {
        let mut state = self.state.write().unwrap();
        let weaver = Weaver {
            id: loomledger_utils::generate_id(),
            weaver_name: fields.weaver_name,
            loom_name: fields.loom_name,
            address: fields.address,
            area: fields.area,
            mobile_number1: fields.mobile_number1,
            mobile_number2: fields.mobile_number2,
            reference: fields.reference,
            description: fields.description,
            id_proof: fields.id_proof,
        };
        state.weavers.push(weaver.clone());
        Ok(weaver)
    }

    async fn update_weaver(&self, id: &str, fields: WeaverFields) -> Result<Weaver, BackendError> {
        let mut state = self.state.write().unwrap();
        let weaver = state
            .weavers
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| BackendError::NotFound {
                resource: format!("weaver {}", id),
            })?;
        weaver.weaver_name = fields.weaver_name;
        weaver.loom_name = fields.loom_name;
        weaver.address = fields.address;
        weaver.area = fields.area;
        weaver.mobile_number1 = fields.mobile_number1;
        weaver.mobile_number2 = fields.mobile_number2;
        weaver.reference = fields.reference;
        weaver.description = fields.description;
        weaver.id_proof = fields.id_proof;
        Ok(weaver.clone())
    }

    async fn list_looms(&self) -> Result<Vec<Loom>, BackendError> {
        Ok(self.state.read().unwrap().looms.clone())
    }

    async fn create_loom(&self, fields: LoomFields) -> Result<Loom, BackendError> {
        let mut state = self.state.write().unwrap();
        let loom = Loom {
            id: loomledger_utils::generate_id(),
            loom_name: fields.loom_name,
            loom_count: fields.loom_count,
            loom_type: fields.loom_type,
            jacquard_type: fields.jacquard_type,
            hooks: fields.hooks,
            description: fields.description,
        };
        state.looms.push(loom.clone());
        Ok(loom)
    }

    async fn update_loom(&self, id: &str, fields: LoomFields) -> Result<Loom, BackendError> {
        let mut state = self.state.write().unwrap();
        let loom = state
            .looms
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| BackendError::NotFound {
                resource: format!("loom {}", id),
            })?;
        loom.loom_name = fields.loom_name;
        loom.loom_count = fields.loom_count;
        loom.loom_type = fields.loom_type;
        loom.jacquard_type = fields.jacquard_type;
        loom.hooks = fields.hooks;
        loom.description = fields.description;
        Ok(loom.clone())
    }

    async fn list_designs(&self) -> Result<Vec<Design>, BackendError> {
        Ok(self.state.read().unwrap().designs.clone())
    }

    async fn create_design(&self, fields: DesignFields) -> Result<Design, BackendError> {
        let mut state = self.state.write().unwrap();
        let design = Design {
            id: loomledger_utils::generate_id(),
            loom_name: fields.loom_name,
            loom_slot: fields.loom_slot,
            design_name: fields.design_name,
            design_by: fields.design_by,
            plan_sheet: fields.plan_sheet,
            design_upload: fields.design_upload,
        };
        state.designs.push(design.clone());
        Ok(design)
    }

    async fn update_design(&self, id: &str, fields: DesignFields) -> Result<Design, BackendError> {
        let mut state = self.state.write().unwrap();
        let design = state
            .designs
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| BackendError::NotFound {
                resource: format!("design {}", id),
            })?;
        design.loom_name = fields.loom_name;
        design.loom_slot = fields.loom_slot;
        design.design_name = fields.design_name;
        design.design_by = fields.design_by;
        design.plan_sheet = fields.plan_sheet;
        design.design_upload = fields.design_upload;
        Ok(design.clone())
    }

    async fn list_locations(&self) -> Result<Vec<String>, BackendError> {
        Ok(self.state.read().unwrap().locations.clone())
    }

    async fn create_location(&self, name: &str) -> Result<(), BackendError> {
        let mut state = self.state.write().unwrap();
        if state.locations.iter().any(|l| l == name) {
            return Err(BackendError::DuplicateLocation {
                name: name.to_string(),
            });
        }
        state.locations.push(name.to_string());
        state.transactions.insert(name.to_string(), Vec::new());
        Ok(())
    }

    async fn verify_admin_password(&self, username: &str, password: &str) -> Result<bool, BackendError> {
        match &self.admin {
            Some((user, pass)) => Ok(user == username && pass == password),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::TxnType;

    fn txn_fields(date: &str, amount: &str) -> TransactionFields {
        TransactionFields {
            date: date.to_string(),
            txn_type: TxnType::Income,
            amount: amount.to_string(),
            category: "sales".to_string(),
            sub_category: Some("silk".to_string()),
            description: None,
            attachments: vec![],
        }
    }

    #[tokio::test]
    async fn test_transactions_scoped_per_location() {
        let backend =
            MemoryBackend::with_locations(&["office".to_string(), "factory".to_string()]);
        backend
            .create_transaction("office", txn_fields("2024-01-05", "1000"))
            .await
            .unwrap();

        assert_eq!(backend.list_transactions("office").await.unwrap().len(), 1);
        assert!(backend.list_transactions("factory").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_location_is_an_error() {
        let backend = MemoryBackend::with_locations(&["office".to_string()]);
        assert!(matches!(
            backend.list_transactions("store").await,
            Err(BackendError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_duplicate_location_rejected() {
        let backend = MemoryBackend::with_locations(&["office".to_string()]);
        assert!(matches!(
            backend.create_location("office").await,
            Err(BackendError::DuplicateLocation { .. })
        ));
        backend.create_location("store").await.unwrap();
        assert!(backend.list_transactions("store").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_mutable_fields() {
        let backend = MemoryBackend::with_locations(&["office".to_string()]);
        let txn = backend
            .create_transaction("office", txn_fields("2024-01-05", "1000"))
            .await
            .unwrap();

        let updated = backend
            .update_transaction("office", &txn.id, txn_fields("2024-02-01", "250"))
            .await
            .unwrap();
        assert_eq!(updated.id, txn.id);
        assert_eq!(updated.date, "2024-02-01");
        assert_eq!(updated.amount, "250");
    }

    #[tokio::test]
    async fn test_categories_derived_distinct() {
        let backend = MemoryBackend::with_locations(&["office".to_string()]);
        backend
            .create_transaction("office", txn_fields("2024-01-05", "1000"))
            .await
            .unwrap();
        backend
            .create_transaction("office", txn_fields("2024-01-06", "400"))
            .await
            .unwrap();

        let set = backend.list_categories("office").await.unwrap();
        assert_eq!(set.categories, vec!["sales".to_string()]);
        assert_eq!(set.sub_categories, vec!["silk".to_string()]);
    }

    #[tokio::test]
    async fn test_admin_gate() {
        let backend =
            MemoryBackend::with_locations(&["office".to_string()]).with_admin("admin", "secret");
        assert!(backend.verify_admin_password("admin", "secret").await.unwrap());
        assert!(!backend.verify_admin_password("admin", "wrong").await.unwrap());

        let no_admin = MemoryBackend::default();
        assert!(!no_admin.verify_admin_password("admin", "secret").await.unwrap());
    }
}
