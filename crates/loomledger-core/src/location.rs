//! Location partition registry
//!
//! A location is an isolated named scope with its own ledger and category
//! enumerations. The registry owns the list of known names and the active
//! selection; stores reload when the active name changes.

use std::sync::RwLock;

use crate::error::CoreError;
use loomledger_backend::BackendRef;

/// Named partition registry
pub struct LocationRegistry {
    backend: BackendRef,
    names: RwLock<Vec<String>>,
    active: RwLock<String>,
}

impl LocationRegistry {
    pub fn new(backend: BackendRef, active: &str) -> Self {
        Self {
            backend,
            names: RwLock::new(Vec::new()),
            active: RwLock::new(active.to_string()),
        }
    }

    /// Refresh the known names from the collaborator
    pub async fn load(&self) -> Result<(), CoreError> {
        let listed = self.backend.list_locations().await?;
        let mut names = self.names.write().unwrap();
        *names = listed;
        Ok(())
    }

    pub fn names(&self) -> Vec<String> {
        self.names.read().unwrap().clone()
    }

    pub fn active(&self) -> String {
        self.active.read().unwrap().clone()
    }

    pub fn contains(&self, name: &str) -> bool {
        // Names are case-sensitive.
        self.names.read().unwrap().iter().any(|n| n == name)
    }

    /// Register a new partition name
    ///
    /// Empty and duplicate names are rejected before the collaborator is
    /// asked to provision anything. A freshly added partition is usable
    /// immediately with an empty ledger and empty category set.
    pub async fn add(&self, name: &str) -> Result<(), CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation(crate::validate::ValidationError::new(
                "location",
                "must not be empty",
            )));
        }
        if self.contains(name) {
            return Err(CoreError::DuplicateLocation {
                name: name.to_string(),
            });
        }

        self.backend.create_location(name).await?;
        let mut names = self.names.write().unwrap();
        names.push(name.to_string());
        Ok(())
    }

    /// Mark a known partition as active; the caller switches the stores
    pub fn activate(&self, name: &str) -> Result<(), CoreError> {
        if !self.contains(name) {
            return Err(CoreError::UnknownLocation {
                name: name.to_string(),
            });
        }
        let mut active = self.active.write().unwrap();
        *active = name.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loomledger_backend::MemoryBackend;
    use std::sync::Arc;

    fn registry() -> LocationRegistry {
        let backend = Arc::new(MemoryBackend::with_locations(&[
            "office".to_string(),
            "factory".to_string(),
        ]));
        LocationRegistry::new(backend, "office")
    }

    #[tokio::test]
    async fn test_load_and_activate() {
        let reg = registry();
        reg.load().await.unwrap();
        assert_eq!(reg.names(), vec!["office".to_string(), "factory".to_string()]);

        reg.activate("factory").unwrap();
        assert_eq!(reg.active(), "factory");

        assert!(matches!(
            reg.activate("store"),
            Err(CoreError::UnknownLocation { .. })
        ));
    }

    #[tokio::test]
    async fn test_add_validates_before_provisioning() {
        let reg = registry();
        reg.load().await.unwrap();

        assert!(matches!(
            reg.add("  ").await,
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            reg.add("office").await,
            Err(CoreError::DuplicateLocation { .. })
        ));

        reg.add("store").await.unwrap();
        assert!(reg.contains("store"));
        reg.activate("store").unwrap();
    }

    #[tokio::test]
    async fn test_names_are_case_sensitive() {
        let reg = registry();
        reg.load().await.unwrap();
        // "Office" is a different partition from "office".
        reg.add("Office").await.unwrap();
        assert!(reg.contains("Office"));
        assert!(reg.contains("office"));
    }
}
