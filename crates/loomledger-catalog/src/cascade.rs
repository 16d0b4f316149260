//! Cascading parent/child option resolution
//!
//! A selected loom name constrains which individual loom slots a design may
//! target. The child selection is cleared in the same call that changes the
//! parent; option recomputation runs synchronously over the catalog
//! snapshot, so a stale child can never survive into a submission.

use crate::error::CatalogError;
use loomledger_backend::Loom;
use loomledger_core::ValidationError;

/// Valid slot numbers under a loom name: `1..=loom_count`, empty when the
/// name is unknown
pub fn slot_options(looms: &[Loom], loom_name: &str) -> Vec<u32> {
    looms
        .iter()
        .find(|l| l.loom_name == loom_name)
        .map(|l| (1..=l.loom_count).collect())
        .unwrap_or_default()
}

/// Submission-time guard: the (loom_name, slot) pair must fall within the
/// range published by the matching loom record
pub fn validate_slot(looms: &[Loom], loom_name: &str, slot: u32) -> Result<(), ValidationError> {
    let options = slot_options(looms, loom_name);
    if options.contains(&slot) {
        Ok(())
    } else {
        Err(ValidationError::new(
            "loom_slot",
            format!("slot {} is not available under loom {}", slot, loom_name),
        ))
    }
}

/// Observable states of a cascading selection pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeState {
    /// No parent chosen; the child option set is empty
    ParentUnset,
    /// Parent chosen and child options computed from the snapshot
    OptionsReady,
}

/// Loom-name -> loom-slot dependent selection
///
/// Models the in-progress form state a client holds while picking a slot:
/// the parent name drives the option list, and changing it clears the child
/// pick. Server routes answer option queries through [`slot_options`] and
/// guard submissions with [`validate_slot`]; the cascade itself lives for
/// the duration of one editing session.
#[derive(Debug, Default)]
pub struct SlotCascade {
    parent: Option<String>,
    options: Vec<u32>,
    selected: Option<u32>,
}

impl SlotCascade {
    pub fn state(&self) -> CascadeState {
        if self.parent.is_some() {
            CascadeState::OptionsReady
        } else {
            CascadeState::ParentUnset
        }
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn options(&self) -> &[u32] {
        &self.options
    }

    pub fn selected(&self) -> Option<u32> {
        self.selected
    }

    /// Change the parent selection
    ///
    /// The child selection is cleared here, in the same call, never
    /// deferred until after another fetch resolves.
    pub fn set_parent(&mut self, name: Option<&str>, looms: &[Loom]) {
        self.selected = None;
        match name {
            Some(name) if !name.is_empty() => {
                self.options = slot_options(looms, name);
                self.parent = Some(name.to_string());
            }
            _ => {
                self.options.clear();
                self.parent = None;
            }
        }
    }

    /// Pick a child slot out of the current option set
    pub fn select_slot(&mut self, slot: u32) -> Result<(), CatalogError> {
        if !self.options.contains(&slot) {
            return Err(CatalogError::StaleSelection {
                parent: self.parent.clone().unwrap_or_default(),
                selected: slot.to_string(),
            });
        }
        self.selected = Some(slot);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.parent = None;
        self.options.clear();
        self.selected = None;
    }
}
