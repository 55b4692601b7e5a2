//! # Record Normalization
//!
//! The single place where loosely shaped records (form state, persisted
//! documents) become canonical [`LineItem`] and [`NonPricedCharge`] values.
//!
//! ## Field Aliases
//! Records written by different screens spell the same field differently.
//! The aliases are resolved here and nowhere else:
//!
//! | Canonical      | Accepted keys                                             |
//! |----------------|-----------------------------------------------------------|
//! | description    | `description`, `Description`, `name`, `itemName`          |
//! | hsn_code       | `hsnCode`, `hsn_code`, `HSN`, `hsnSac`                    |
//! | quantity       | `quantity`, `qty`, `Quantity`                             |
//! | unit_price     | `unitPrice`, `UnitPrice`, `unit_price`, `price`           |
//! | price (charge) | `price`, `Price`, `amount`                                |
//! | tax rate       | `taxRate`, `tax_rate`, `taxRatePercent`, `gst`, `GST`, `rate` |
//!
//! ## Coercion
//! Numbers may be JSON numbers or numeric strings ("1,250.50" included).
//! Anything missing, empty, or non-numeric becomes zero. Bad numbers never
//! fail a document.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{LineItem, NonPricedCharge, TaxRate};

const DESCRIPTION_KEYS: &[&str] = &["description", "Description", "name", "itemName"];
const HSN_KEYS: &[&str] = &["hsnCode", "hsn_code", "HSN", "hsnSac"];
const QUANTITY_KEYS: &[&str] = &["quantity", "qty", "Quantity"];
const UNIT_PRICE_KEYS: &[&str] = &["unitPrice", "UnitPrice", "unit_price", "price"];
const CHARGE_PRICE_KEYS: &[&str] = &["price", "Price", "amount"];
const RATE_KEYS: &[&str] = &["taxRate", "tax_rate", "taxRatePercent", "gst", "GST", "rate"];
const ITEMS_KEYS: &[&str] = &["items", "Items", "lineItems"];
const CHARGES_KEYS: &[&str] = &["nonItems", "non_items", "charges"];

/// Canonical items and charges read from one document record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedDocument {
    pub items: Vec<LineItem>,
    pub charges: Vec<NonPricedCharge>,
}

/// Returns the first present, non-null value among `keys`.
pub fn field<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|value| !value.is_null())
}

/// Reads a text field; numbers are accepted and printed as-is.
pub fn text_field(record: &Value, keys: &[&str]) -> String {
    match field(record, keys) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Coerces a JSON value to a decimal, falling back to zero.
///
/// ## Example
/// ```rust
/// use gstdesk_core::normalize::coerce_decimal;
/// use rust_decimal::Decimal;
/// use serde_json::json;
///
/// assert_eq!(coerce_decimal(Some(&json!("1,250.50"))), Decimal::new(125050, 2));
/// assert_eq!(coerce_decimal(Some(&json!(99.99))), Decimal::new(9999, 2));
/// assert_eq!(coerce_decimal(Some(&json!("abc"))), Decimal::ZERO);
/// assert_eq!(coerce_decimal(None), Decimal::ZERO);
/// ```
pub fn coerce_decimal(value: Option<&Value>) -> Decimal {
    let parsed = match value {
        Some(Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(Value::String(s)) => parse_decimal(&s.replace(',', "")),
        _ => None,
    };
    parsed.unwrap_or(Decimal::ZERO)
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim().trim_end_matches('%').trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Converts one loosely shaped item record into a [`LineItem`].
pub fn normalize_line_item(record: &Value) -> LineItem {
    LineItem {
        description: text_field(record, DESCRIPTION_KEYS),
        hsn_code: text_field(record, HSN_KEYS),
        quantity: coerce_decimal(field(record, QUANTITY_KEYS)),
        unit_price: Money::from_decimal(coerce_decimal(field(record, UNIT_PRICE_KEYS))),
        tax_rate: TaxRate::from_percent(coerce_decimal(field(record, RATE_KEYS))),
    }
}

/// Converts one loosely shaped charge record into a [`NonPricedCharge`].
pub fn normalize_charge(record: &Value) -> NonPricedCharge {
    NonPricedCharge {
        description: text_field(record, DESCRIPTION_KEYS),
        price: Money::from_decimal(coerce_decimal(field(record, CHARGE_PRICE_KEYS))),
        tax_rate: TaxRate::from_percent(coerce_decimal(field(record, RATE_KEYS))),
    }
}

/// Reads the item and charge arrays of a whole document record.
///
/// Missing arrays are treated as empty. A record that is not a JSON object,
/// or whose item list is not an array, is malformed.
pub fn normalize_document(record: &Value) -> CoreResult<NormalizedDocument> {
    if !record.is_object() {
        return Err(CoreError::MalformedRecord {
            reason: "expected a JSON object".to_string(),
        });
    }

    let items = read_array(record, ITEMS_KEYS, "items")?
        .iter()
        .map(normalize_line_item)
        .collect::<Vec<_>>();

    let charges = read_array(record, CHARGES_KEYS, "charges")?
        .iter()
        .map(normalize_charge)
        .collect::<Vec<_>>();

    debug!(items = items.len(), charges = charges.len(), "Record normalized");

    Ok(NormalizedDocument { items, charges })
}

fn read_array<'a>(record: &'a Value, keys: &[&str], name: &str) -> CoreResult<&'a [Value]> {
    match field(record, keys) {
        None => Ok(&[]),
        Some(Value::Array(values)) => Ok(values.as_slice()),
        Some(_) => Err(CoreError::MalformedRecord {
            reason: format!("{} must be an array", name),
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
