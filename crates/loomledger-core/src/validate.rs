//! Field-level validation for submission forms
//!
//! A failed check blocks the submission and names the offending field; the
//! caller keeps the form state so the user can correct it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use loomledger_backend::{parse_amount, TransactionFields};

/// Field-level validation failure
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Largest accepted transaction amount
pub fn max_amount() -> Decimal {
    Decimal::from(1_000_000_u32)
}

/// Validate transaction fields before they reach the backend
pub fn validate_transaction(fields: &TransactionFields) -> Result<(), ValidationError> {
    if NaiveDate::parse_from_str(&fields.date, "%Y-%m-%d").is_err() {
        return Err(ValidationError::new(
            "date",
            format!("not a calendar date: {}", fields.date),
        ));
    }

    let amount = parse_amount(&fields.amount)
        .ok_or_else(|| ValidationError::new("amount", "not a decimal number"))?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::new("amount", "must be greater than zero"));
    }
    if amount > max_amount() {
        return Err(ValidationError::new("amount", "must not exceed 1,000,000"));
    }

    let category_len = fields.category.chars().count();
    if !(3..=50).contains(&category_len) {
        return Err(ValidationError::new("category", "must be 3-50 characters"));
    }
    if let Some(sub) = &fields.sub_category {
        if sub.chars().count() > 50 {
            return Err(ValidationError::new(
                "sub_category",
                "must be at most 50 characters",
            ));
        }
    }
    if let Some(description) = &fields.description {
        if description.chars().count() > 200 {
            return Err(ValidationError::new(
                "description",
                "must be at most 200 characters",
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use loomledger_backend::TxnType;

    fn fields() -> TransactionFields {
        TransactionFields {
            date: "2024-01-05".to_string(),
            txn_type: TxnType::Income,
            amount: "1000".to_string(),
            category: "sales".to_string(),
            sub_category: None,
            description: None,
            attachments: vec![],
        }
    }

    #[test]
    fn test_valid_fields_pass() {
        assert!(validate_transaction(&fields()).is_ok());
    }

    #[test]
    fn test_bad_date_rejected() {
        let mut f = fields();
        f.date = "05/01/2024".to_string();
        assert_eq!(validate_transaction(&f).unwrap_err().field, "date");
    }

    #[test]
    fn test_amount_bounds() {
        let mut f = fields();
        f.amount = "0".to_string();
        assert_eq!(validate_transaction(&f).unwrap_err().field, "amount");

        f.amount = "-5".to_string();
        assert_eq!(validate_transaction(&f).unwrap_err().field, "amount");

        f.amount = "1000000.01".to_string();
        assert_eq!(validate_transaction(&f).unwrap_err().field, "amount");

        f.amount = "1000000".to_string();
        assert!(validate_transaction(&f).is_ok());
    }

    #[test]
    fn test_malformed_amount_rejected_at_submission() {
        // Malformed amounts coming back from the backend sum as zero, but a
        // form submission with one is refused outright.
        let mut f = fields();
        f.amount = "ten".to_string();
        assert_eq!(validate_transaction(&f).unwrap_err().field, "amount");
    }

    #[test]
    fn test_category_length() {
        let mut f = fields();
        f.category = "ab".to_string();
        assert_eq!(validate_transaction(&f).unwrap_err().field, "category");

        f.category = "a".repeat(51);
        assert_eq!(validate_transaction(&f).unwrap_err().field, "category");
    }

    #[test]
    fn test_optional_field_lengths() {
        let mut f = fields();
        f.sub_category = Some("s".repeat(51));
        assert_eq!(validate_transaction(&f).unwrap_err().field, "sub_category");

        let mut f = fields();
        f.description = Some("d".repeat(201));
        assert_eq!(validate_transaction(&f).unwrap_err().field, "description");
    }
}
