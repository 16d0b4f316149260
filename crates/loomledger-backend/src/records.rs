//! Record types delivered by the persistence collaborator

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnType {
    /// Money coming in
    Income,
    /// Money going out
    Expense,
}

impl std::str::FromStr for TxnType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(TxnType::Income),
            "expense" => Ok(TxnType::Expense),
            _ => Err(format!("Invalid transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TxnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TxnType::Income => write!(f, "income"),
            TxnType::Expense => write!(f, "expense"),
        }
    }
}

/// A single ledger entry, scoped to one location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier
    pub id: String,
    /// Transaction date (YYYY-MM-DD format, no time component)
    pub date: String,
    /// Income or expense
    #[serde(rename = "type")]
    pub txn_type: TxnType,
    /// Amount as decimal text, exactly as the collaborator delivered it
    pub amount: String,
    /// Category label (3-50 chars)
    pub category: String,
    /// Optional sub-category (<= 50 chars)
    pub sub_category: Option<String>,
    /// Optional description (<= 200 chars)
    pub description: Option<String>,
    /// Attached file references (blob id/URL only, never bytes)
    #[serde(default)]
    pub attachments: Vec<String>,
    /// Owning location partition
    pub location: String,
}

impl Transaction {
    /// Get the transaction date as NaiveDate
    pub fn date_naive(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Parse the amount text as a decimal
    ///
    /// Thousands separators are tolerated. Returns None when the text does
    /// not parse; aggregation treats that as a zero contribution.
    pub fn amount_value(&self) -> Option<Decimal> {
        parse_amount(&self.amount)
    }
}

/// Parse decimal text, stripping thousands separators
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let cleaned: String = text.trim().chars().filter(|&c| c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<Decimal>().ok()
}

/// Weaver master record
///
/// `loom_name` links to [`Loom`] by name equality, not by foreign key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weaver {
    pub id: String,
    pub weaver_name: String,
    pub loom_name: String,
    pub address: String,
    pub area: String,
    /// Required, exactly 10 digits
    pub mobile_number1: String,
    /// Optional, exactly 10 digits when present
    pub mobile_number2: Option<String>,
    pub reference: String,
    pub description: String,
    /// Identity-proof file reference
    pub id_proof: Option<String>,
}

/// Loom master record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loom {
    pub id: String,
    /// Join key to Weaver.loom_name and Design.loom_name
    pub loom_name: String,
    /// Count of physical looms under this name, >= 1. Not an index.
    pub loom_count: u32,
    pub loom_type: String,
    pub jacquard_type: String,
    pub hooks: u32,
    pub description: String,
}

/// Design record, tied to one individual loom slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Design {
    pub id: String,
    pub loom_name: String,
    /// Individual loom index, 1..=loom_count of the matching Loom
    pub loom_slot: u32,
    pub design_name: String,
    pub design_by: String,
    /// Plan sheet image reference
    pub plan_sheet: Option<String>,
    /// Design image reference
    pub design_upload: Option<String>,
}

/// Category enumerations for one location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategorySet {
    pub categories: Vec<String>,
    pub sub_categories: Vec<String>,
}
