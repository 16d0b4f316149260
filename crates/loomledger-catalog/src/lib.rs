//! Hierarchical catalog consistency engine
//!
//! Manages the Weaver -> Loom -> Design hierarchy where each level
//! constrains the valid choices of the level below, plus the extendable
//! enumeration sets behind the "other" dropdown sentinel.

pub mod cascade;
pub mod enums;
pub mod error;
pub mod models;
pub mod store;

pub use cascade::{slot_options, validate_slot, CascadeState, SlotCascade};
pub use enums::{resolve_choice, EnumKind, EnumRegistry, OTHER};
pub use error::CatalogError;
pub use models::{validate_design, validate_loom, validate_weaver};
pub use store::{
    Catalog, CatalogCriteria, CatalogData, CatalogView, DesignSubmission, LoomSubmission,
};

pub use loomledger_backend::{Design, DesignFields, Loom, LoomFields, Weaver, WeaverFields};
