//! Form validation
//!
//! Checks the text a user typed into a part or product form. Every rule is
//! checked independently so a single pass reports every problem at once.

use std::fmt;
use thiserror::Error;

/// A single violated form rule. `Display` is the message shown to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    #[error("Name field must contain data.")]
    NameMissing,

    #[error("Inventory must be a valid integer.")]
    InvalidInventory,

    #[error("Price must be a valid double.")]
    InvalidPrice,

    #[error("Max must be a valid integer.")]
    InvalidMax,

    #[error("Min must be a valid integer.")]
    InvalidMin,

    #[error("Max cannot be less than Min.")]
    MaxBelowMin,

    #[error("Inventory cannot be less than Min or greater than Max.")]
    InventoryOutOfRange,

    #[error("Machine ID must be a valid integer.")]
    InvalidMachineId,

    #[error("Company Name must contain data.")]
    CompanyNameMissing,
}

/// Ordered list of violated rules; empty means the form is valid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    issues: Vec<ValidationIssue>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn contains(&self, issue: ValidationIssue) -> bool {
        self.issues.contains(&issue)
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// User-facing messages in the order the rules were checked
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(|i| i.to_string()).collect()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for issue in &self.issues {
            writeln!(f, "{}", issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

/// Numeric fields of a form that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct FormFields {
    pub name: String,
    pub stock: i32,
    pub price: f64,
    pub max: i32,
    pub min: i32,
}

/// Parses an integer field: optional sign, decimal digits, no padding
pub fn parse_integer(text: &str) -> Option<i32> {
    text.parse::<i32>().ok()
}

/// Parses a floating point field
///
/// Surrounding whitespace and a trailing `d`/`f` type suffix are tolerated.
/// Only finite values are accepted; NaN, infinities and overflowing
/// literals are rejected.
pub fn parse_double(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_suffix(['d', 'D', 'f', 'F'])
        .unwrap_or(trimmed);
    body.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Validates the fields common to parts and products and returns the parsed
/// values, or every rule the input violates.
pub fn parse_form(
    name: &str,
    stock: &str,
    price: &str,
    max: &str,
    min: &str,
) -> Result<FormFields, FormErrors> {
    let mut errors = FormErrors::new();

    if name.trim().is_empty() {
        errors.push(ValidationIssue::NameMissing);
    }

    let stock_num = parse_integer(stock);
    if stock_num.is_none() {
        errors.push(ValidationIssue::InvalidInventory);
    }

    let price_num = parse_double(price);
    if price_num.is_none() {
        errors.push(ValidationIssue::InvalidPrice);
    }

    let max_num = parse_integer(max);
    if max_num.is_none() {
        errors.push(ValidationIssue::InvalidMax);
    }

    let min_num = parse_integer(min);
    if min_num.is_none() {
        errors.push(ValidationIssue::InvalidMin);
    }

    if let (Some(max_num), Some(min_num)) = (max_num, min_num) {
        if max_num < min_num {
            errors.push(ValidationIssue::MaxBelowMin);
        }

        if let Some(stock_num) = stock_num {
            if stock_num < min_num || stock_num > max_num {
                errors.push(ValidationIssue::InventoryOutOfRange);
            }
        }
    }

    match (stock_num, price_num, max_num, min_num) {
        (Some(stock), Some(price), Some(max), Some(min)) if errors.is_empty() => Ok(FormFields {
            name: name.to_string(),
            stock,
            price,
            max,
            min,
        }),
        _ => Err(errors),
    }
}

/// Validates the fields common to parts and products
///
/// Never fails; an empty result means the input is valid.
pub fn form_validation(name: &str, stock: &str, price: &str, max: &str, min: &str) -> FormErrors {
    parse_form(name, stock, price, max, min)
        .err()
        .unwrap_or_default()
}

/// Checks the machine ID field of an in-house part
pub fn validate_machine_id(text: &str) -> Result<i32, ValidationIssue> {
    parse_integer(text).ok_or(ValidationIssue::InvalidMachineId)
}

/// Checks the company name field of an outsourced part
pub fn validate_company_name(text: &str) -> Result<&str, ValidationIssue> {
    if text.trim().is_empty() {
        Err(ValidationIssue::CompanyNameMissing)
    } else {
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_form_is_empty() {
        let errors = form_validation("Bolt", "5", "1.25", "10", "0");
        assert!(errors.is_empty());
        assert_eq!(errors.to_string(), "");
    }

    #[test]
    fn test_blank_name_only() {
        let errors = form_validation("", "5", "1.0", "10", "0");
        assert_eq!(errors.messages(), vec!["Name field must contain data."]);

        let errors = form_validation("   ", "5", "1.0", "10", "0");
        assert_eq!(errors.issues(), &[ValidationIssue::NameMissing]);
    }

    #[test]
    fn test_bad_inventory_suppresses_range_check() {
        let errors = form_validation("x", "abc", "1.0", "10", "0");
        assert_eq!(errors.messages(), vec!["Inventory must be a valid integer."]);
    }

    #[test]
    fn test_max_below_min_reports_range_too() {
        let errors = form_validation("x", "5", "1.0", "2", "5");
        assert_eq!(
            errors.messages(),
            vec![
                "Max cannot be less than Min.",
                "Inventory cannot be less than Min or greater than Max.",
            ]
        );
    }

    #[test]
    fn test_bad_min_skips_comparisons() {
        let errors = form_validation("x", "500", "1.0", "2", "low");
        assert_eq!(errors.issues(), &[ValidationIssue::InvalidMin]);
    }

    #[test]
    fn test_everything_wrong_reported_in_order() {
        let errors = form_validation(" ", "", "cheap", "many", "few");
        assert_eq!(
            errors.issues(),
            &[
                ValidationIssue::NameMissing,
                ValidationIssue::InvalidInventory,
                ValidationIssue::InvalidPrice,
                ValidationIssue::InvalidMax,
                ValidationIssue::InvalidMin,
            ]
        );
        assert_eq!(errors.to_string().lines().count(), 5);
    }

    #[test]
    fn test_stock_out_of_range() {
        let errors = form_validation("x", "11", "1.0", "10", "0");
        assert_eq!(errors.issues(), &[ValidationIssue::InventoryOutOfRange]);

        let errors = form_validation("x", "-1", "1.0", "10", "0");
        assert_eq!(errors.issues(), &[ValidationIssue::InventoryOutOfRange]);
    }

    #[test]
    fn test_integer_parsing_rules() {
        assert_eq!(parse_integer("+7"), Some(7));
        assert_eq!(parse_integer("-7"), Some(-7));
        assert_eq!(parse_integer(" 7"), None);
        assert_eq!(parse_integer("7.0"), None);
        assert_eq!(parse_integer("99999999999"), None);
    }

    #[test]
    fn test_double_parsing_rules() {
        assert_eq!(parse_double(" 2.50 "), Some(2.5));
        assert_eq!(parse_double("3"), Some(3.0));
        assert_eq!(parse_double("1e3"), Some(1000.0));
        assert_eq!(parse_double("4.2d"), Some(4.2));
        assert_eq!(parse_double(""), None);
        assert_eq!(parse_double("$4"), None);
    }

    #[test]
    fn test_non_finite_prices_rejected() {
        for price in ["nan", "NaN", "infinity", "Infinity", "-Infinity", "inf", "1e400"] {
            assert_eq!(parse_double(price), None, "{price}");
            assert_eq!(
                form_validation("x", "5", price, "10", "0").messages(),
                vec!["Price must be a valid double."],
                "{price}"
            );
        }
    }

    #[test]
    fn test_parse_form_returns_values() {
        let fields = parse_form("Screw", "100", "0.5", "500", "10").unwrap();
        assert_eq!(
            fields,
            FormFields {
                name: "Screw".to_string(),
                stock: 100,
                price: 0.5,
                max: 500,
                min: 10,
            }
        );
    }

    #[test]
    fn test_source_field_checks() {
        assert_eq!(validate_machine_id("1234"), Ok(1234));
        assert_eq!(
            validate_machine_id("M-12"),
            Err(ValidationIssue::InvalidMachineId)
        );
        assert_eq!(validate_company_name("Door Co."), Ok("Door Co."));
        assert_eq!(
            validate_company_name("  "),
            Err(ValidationIssue::CompanyNameMissing)
        );
    }
}
