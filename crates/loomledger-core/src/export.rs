//! Tabular export boundary
//!
//! The core produces flat rows with the six ledger columns; the actual
//! tabular-file writer is an external collaborator behind [`ExportSink`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use loomledger_backend::Transaction;

/// One flat export row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Type")]
    pub txn_type: String,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Sub-Category")]
    pub sub_category: String,
    #[serde(rename = "Description")]
    pub description: String,
}

/// Flatten an already-filtered row sequence for export
pub fn tabular_rows(rows: &[Transaction]) -> Vec<TabularRow> {
    rows.iter()
        .map(|txn| TabularRow {
            date: txn.date.clone(),
            txn_type: txn.txn_type.to_string(),
            amount: txn.amount.clone(),
            category: txn.category.clone(),
            sub_category: txn.sub_category.clone().unwrap_or_default(),
            description: txn.description.clone().unwrap_or_default(),
        })
        .collect()
}

/// File-writing collaborator; serialization mechanics live outside the core
pub trait ExportSink: Send + Sync {
    fn export_rows(&self, rows: &[TabularRow]) -> anyhow::Result<PathBuf>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use loomledger_backend::TxnType;

    #[test]
    fn test_rows_carry_the_six_columns() {
        let txns = vec![Transaction {
            id: "t1".to_string(),
            date: "2024-01-05".to_string(),
            txn_type: TxnType::Expense,
            amount: "400".to_string(),
            category: "wages".to_string(),
            sub_category: None,
            description: Some("weekly wages".to_string()),
            attachments: vec!["receipt-1".to_string()],
            location: "office".to_string(),
        }];
        let rows = tabular_rows(&txns);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].txn_type, "expense");
        assert_eq!(rows[0].sub_category, "");
        assert_eq!(rows[0].description, "weekly wages");

        // Attachments and location are deliberately absent from the export.
        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 6);
        assert!(json.get("Date").is_some());
        assert!(json.get("Sub-Category").is_some());
    }
}
