//! Mutable-field payloads accepted by create/update operations
//!
//! Updates are a full replace of the mutable fields; identifiers and the
//! owning location never change through these payloads.

use serde::{Deserialize, Serialize};

use crate::records::TxnType;

/// Fields for creating or replacing a transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionFields {
    pub date: String,
    #[serde(rename = "type")]
    pub txn_type: TxnType,
    /// Decimal text as entered in the form
    pub amount: String,
    pub category: String,
    #[serde(default)]
    pub sub_category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// References to already-uploaded files
    #[serde(default)]
    pub attachments: Vec<String>,
}

/// Fields for creating or replacing a weaver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaverFields {
    pub weaver_name: String,
    pub loom_name: String,
    pub address: String,
    pub area: String,
    pub mobile_number1: String,
    #[serde(default)]
    pub mobile_number2: Option<String>,
    pub reference: String,
    pub description: String,
    #[serde(default)]
    pub id_proof: Option<String>,
}

/// Fields for creating or replacing a loom
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoomFields {
    pub loom_name: String,
    pub loom_count: u32,
    pub loom_type: String,
    pub jacquard_type: String,
    pub hooks: u32,
    pub description: String,
}

/// Fields for creating or replacing a design
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignFields {
    pub loom_name: String,
    pub loom_slot: u32,
    pub design_name: String,
    pub design_by: String,
    #[serde(default)]
    pub plan_sheet: Option<String>,
    #[serde(default)]
    pub design_upload: Option<String>,
}
