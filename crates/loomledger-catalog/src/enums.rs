//! Extendable enumeration sets
//!
//! Loom types, jacquard types, and design names are open enumerations: the
//! dropdown carries an "other" sentinel, and a chosen companion value
//! becomes a permanent member once the submission succeeds. The registry is
//! the single owner of these lists; callers read, only the catalog's own
//! operations mutate.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

use loomledger_core::ValidationError;

/// Reserved dropdown value meaning "accept a fresh user-supplied value"
pub const OTHER: &str = "other";

/// The open enumeration sets in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumKind {
    LoomTypes,
    JacquardTypes,
    DesignNames,
}

impl std::str::FromStr for EnumKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "loom_types" | "loom-types" => Ok(EnumKind::LoomTypes),
            "jacquard_types" | "jacquard-types" => Ok(EnumKind::JacquardTypes),
            "design_names" | "design-names" => Ok(EnumKind::DesignNames),
            _ => Err(format!("Invalid enumeration kind: {}", s)),
        }
    }
}

impl std::fmt::Display for EnumKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnumKind::LoomTypes => write!(f, "loom_types"),
            EnumKind::JacquardTypes => write!(f, "jacquard_types"),
            EnumKind::DesignNames => write!(f, "design_names"),
        }
    }
}

/// Owned registry of the open enumerations
#[derive(Debug, Default)]
pub struct EnumRegistry {
    sets: RwLock<HashMap<EnumKind, Vec<String>>>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current values in first-seen order
    pub fn values(&self, kind: EnumKind) -> Vec<String> {
        self.sets
            .read()
            .unwrap()
            .get(&kind)
            .cloned()
            .unwrap_or_default()
    }

    /// Append a value unless it is already present; true when appended
    pub fn register_if_absent(&self, kind: EnumKind, value: &str) -> bool {
        let mut sets = self.sets.write().unwrap();
        let list = sets.entry(kind).or_default();
        if list.iter().any(|v| v == value) {
            return false;
        }
        list.push(value.to_string());
        true
    }

    /// Replace a whole set, deduplicating while keeping first-seen order
    pub fn replace_all(&self, kind: EnumKind, values: Vec<String>) {
        let mut deduped: Vec<String> = Vec::new();
        for value in values {
            if !value.is_empty() && !deduped.contains(&value) {
                deduped.push(value);
            }
        }
        let mut sets = self.sets.write().unwrap();
        sets.insert(kind, deduped);
    }
}

/// Resolve a dropdown choice, honoring the "other" sentinel
///
/// When the sentinel is chosen the companion free text becomes the submitted
/// value; it must be non-empty. Any other choice passes through unchanged.
pub fn resolve_choice(
    field: &str,
    selected: &str,
    companion: Option<&str>,
) -> Result<String, ValidationError> {
    if selected != OTHER {
        if selected.is_empty() {
            return Err(ValidationError::new(field, "a value must be selected"));
        }
        return Ok(selected.to_string());
    }
    match companion.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(ValidationError::new(
            field,
            "a new value is required when \"other\" is selected",
        )),
    }
}
