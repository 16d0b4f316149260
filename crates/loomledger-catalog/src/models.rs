//! Field-level validation for catalog submissions

use once_cell::sync::Lazy;
use regex::Regex;

use crate::cascade::validate_slot;
use loomledger_backend::{DesignFields, Loom, LoomFields, WeaverFields};
use loomledger_core::ValidationError;

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10}$").unwrap());

fn require(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new(field, "must not be empty"))
    } else {
        Ok(())
    }
}

fn check_phone(field: &str, value: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new(field, "must be exactly 10 digits"))
    }
}

/// Validate weaver fields before they reach the backend
pub fn validate_weaver(fields: &WeaverFields) -> Result<(), ValidationError> {
    require("weaver_name", &fields.weaver_name)?;
    require("loom_name", &fields.loom_name)?;
    check_phone("mobile_number1", &fields.mobile_number1)?;
    if let Some(second) = fields.mobile_number2.as_deref() {
        if !second.is_empty() {
            check_phone("mobile_number2", second)?;
        }
    }
    Ok(())
}

/// Validate loom fields before they reach the backend
pub fn validate_loom(fields: &LoomFields) -> Result<(), ValidationError> {
    require("loom_name", &fields.loom_name)?;
    require("loom_type", &fields.loom_type)?;
    require("jacquard_type", &fields.jacquard_type)?;
    if fields.loom_count < 1 {
        return Err(ValidationError::new("loom_count", "must be at least 1"));
    }
    Ok(())
}

/// Validate design fields against the current loom records
pub fn validate_design(fields: &DesignFields, looms: &[Loom]) -> Result<(), ValidationError> {
    require("loom_name", &fields.loom_name)?;
    require("design_name", &fields.design_name)?;
    validate_slot(looms, &fields.loom_name, fields.loom_slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weaver_fields() -> WeaverFields {
        WeaverFields {
            weaver_name: "Murugan".to_string(),
            loom_name: "LoomA".to_string(),
            address: "12 Weaver Street".to_string(),
            area: "Kanchipuram".to_string(),
            mobile_number1: "9876543210".to_string(),
            mobile_number2: None,
            reference: String::new(),
            description: String::new(),
            id_proof: None,
        }
    }

    #[test]
    fn test_weaver_phone_rules() {
        assert!(validate_weaver(&weaver_fields()).is_ok());

        let mut short = weaver_fields();
        short.mobile_number1 = "98765".to_string();
        assert!(validate_weaver(&short).is_err());

        let mut letters = weaver_fields();
        letters.mobile_number1 = "987654321a".to_string();
        assert!(validate_weaver(&letters).is_err());

        let mut second = weaver_fields();
        second.mobile_number2 = Some("123".to_string());
        assert!(validate_weaver(&second).is_err());

        // An empty optional second number is not an error.
        let mut blank = weaver_fields();
        blank.mobile_number2 = Some(String::new());
        assert!(validate_weaver(&blank).is_ok());
    }

    #[test]
    fn test_weaver_required_names() {
        let mut fields = weaver_fields();
        fields.weaver_name = "  ".to_string();
        assert!(validate_weaver(&fields).is_err());
    }

    #[test]
    fn test_loom_count_floor() {
        let mut fields = LoomFields {
            loom_name: "LoomA".to_string(),
            loom_count: 1,
            loom_type: "pit loom".to_string(),
            jacquard_type: "manual".to_string(),
            hooks: 120,
            description: String::new(),
        };
        assert!(validate_loom(&fields).is_ok());
        fields.loom_count = 0;
        assert!(validate_loom(&fields).is_err());
    }

    #[test]
    fn test_design_slot_must_exist() {
        let looms = vec![Loom {
            id: "l1".to_string(),
            loom_name: "LoomA".to_string(),
            loom_count: 2,
            loom_type: "pit loom".to_string(),
            jacquard_type: "manual".to_string(),
            hooks: 120,
            description: String::new(),
        }];
        let mut fields = DesignFields {
            loom_name: "LoomA".to_string(),
            loom_slot: 2,
            design_name: "Peacock Border".to_string(),
            design_by: "Selvi".to_string(),
            plan_sheet: None,
            design_upload: None,
        };
        assert!(validate_design(&fields, &looms).is_ok());
        fields.loom_slot = 3;
        assert!(validate_design(&fields, &looms).is_err());
    }
}
