//! # Validation Module
//!
//! Opt-in input validation for document lines.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form (browser)                                               │
//! │  └── Basic format checks, immediate feedback                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Normalization (normalize.rs)                                 │
//! │  └── Alias resolution, non-numeric → 0 (never fails)                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE (strict mode only)                               │
//! │  └── Rejects negative money, impossible rates, malformed HSN           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Tax engine: accepts anything, passes negatives through                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use gstdesk_core::validation::{validate_hsn_code, validate_tax_rate};
//! use gstdesk_core::types::TaxRate;
//!
//! assert!(validate_hsn_code("8544").is_ok());
//! assert!(validate_tax_rate(TaxRate::from_percent(18)).is_ok());
//! assert!(validate_tax_rate(TaxRate::from_percent(120)).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{LineItem, NonPricedCharge, TaxRate};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest description printed without breaking the row template.
pub const MAX_DESCRIPTION_LEN: usize = 500;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a line description.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 500 characters
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

/// Validates an HSN/SAC code.
///
/// ## Rules
/// - Empty is allowed (unclassified lines)
/// - Otherwise 4 to 8 ASCII digits
///
/// ## Example
/// ```rust
/// use gstdesk_core::validation::validate_hsn_code;
///
/// assert!(validate_hsn_code("").is_ok());
/// assert!(validate_hsn_code("998713").is_ok());
/// assert!(validate_hsn_code("85A4").is_err());
/// assert!(validate_hsn_code("12").is_err());
/// ```
pub fn validate_hsn_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Ok(());
    }

    if !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "hsn_code".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    if !(4..=8).contains(&code.len()) {
        return Err(ValidationError::InvalidFormat {
            field: "hsn_code".to_string(),
            reason: "must be 4 to 8 digits long".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity (zero allowed, negative rejected).
pub fn validate_quantity(qty: Decimal) -> ValidationResult<()> {
    if qty < Decimal::ZERO {
        return Err(ValidationError::MustBeNonNegative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a price (zero allowed for free items).
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a GST rate.
///
/// ## Rules
/// - Between 0% and 100% inclusive
pub fn validate_tax_rate(rate: TaxRate) -> ValidationResult<()> {
    if rate.percent() < Decimal::ZERO || rate.percent() > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: "tax rate".to_string(),
            min: "0".to_string(),
            max: "100".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Line Validators
// =============================================================================

/// Validates every field of a line item.
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    validate_description(&item.description)?;
    validate_hsn_code(&item.hsn_code)?;
    validate_quantity(item.quantity)?;
    validate_price("unit price", item.unit_price)?;
    validate_tax_rate(item.tax_rate)?;
    Ok(())
}

/// Validates every field of a flat charge.
pub fn validate_charge(charge: &NonPricedCharge) -> ValidationResult<()> {
    validate_description(&charge.description)?;
    validate_price("price", charge.price)?;
    validate_tax_rate(charge.tax_rate)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
