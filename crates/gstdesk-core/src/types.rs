//! # Domain Types
//!
//! Core domain types used throughout gstdesk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  INPUT (immutable)                      OUTPUT (derived, per call)      │
//! │  ┌─────────────────┐                    ┌─────────────────────┐         │
//! │  │    LineItem     │───────┐            │     RowResult       │         │
//! │  │  description    │       │            │  taxable_value      │         │
//! │  │  hsn_code       │       │            │  cgst / sgst        │         │
//! │  │  quantity       │       ├──► tax ──► │  row_total          │         │
//! │  │  unit_price     │       │            └─────────────────────┘         │
//! │  │  tax_rate       │       │            ┌─────────────────────┐         │
//! │  └─────────────────┘       │            │   DocumentTotals    │         │
//! │  ┌─────────────────┐       │            │  raw_grand_total    │         │
//! │  │ NonPricedCharge │───────┘            │  round_off          │         │
//! │  │  description    │                    │  final_total        │         │
//! │  │  price          │                    └─────────────────────┘         │
//! │  │  tax_rate       │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! Every type here is a plain value, created fresh for each document and
//! dropped after rendering. Nothing is shared across documents.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// GST rate as a percentage: `18` means 18%.
///
/// Intra-state GST is split into equal central and state halves, so a
/// rate also knows its [`TaxRate::half`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(#[ts(type = "string")] Decimal);

impl TaxRate {
    /// Creates a tax rate from a percentage.
    pub fn from_percent(percent: impl Into<Decimal>) -> Self {
        TaxRate(percent.into())
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub const fn percent(&self) -> Decimal {
        self.0
    }

    /// The CGST (or SGST) share: half the full rate.
    #[inline]
    pub fn half(&self) -> TaxRate {
        TaxRate(self.0 / Decimal::TWO)
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(Decimal::ZERO)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if this rate makes a document taxable (strictly positive).
    #[inline]
    pub fn is_taxable(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A priced line on a document: quantity × unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Display text for the item.
    pub description: String,

    /// HSN/SAC classification code (may be empty).
    pub hsn_code: String,

    /// Quantity, fractional units allowed (metres, kg).
    #[ts(type = "string")]
    pub quantity: Decimal,

    /// Price per unit, before tax.
    pub unit_price: Money,

    /// GST rate applied to this line.
    pub tax_rate: TaxRate,
}

impl LineItem {
    /// Taxable value of the line (quantity × unit price); `None` when the
    /// product is beyond the decimal range.
    #[inline]
    pub fn taxable_value(&self) -> Option<Money> {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Whether any numeric field is negative.
    pub fn has_negative_values(&self) -> bool {
        (self.quantity.is_sign_negative() && !self.quantity.is_zero())
            || self.unit_price.is_negative()
            || self.tax_rate.percent() < Decimal::ZERO
    }
}

// =============================================================================
// Non-Priced Charge
// =============================================================================

/// A flat charge (installation, freight) with no quantity or unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NonPricedCharge {
    pub description: String,
    pub price: Money,
    pub tax_rate: TaxRate,
}

impl NonPricedCharge {
    /// Taxable value of the charge (its flat price).
    #[inline]
    pub fn taxable_value(&self) -> Money {
        self.price
    }

    /// Whether any numeric field is negative.
    pub fn has_negative_values(&self) -> bool {
        self.price.is_negative() || self.tax_rate.percent() < Decimal::ZERO
    }
}

// =============================================================================
// Row Result
// =============================================================================

/// Derived amounts for one item or charge row.
///
/// Values are unrounded; two-decimal display is done at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RowResult {
    pub taxable_value: Money,
    pub cgst: Money,
    pub sgst: Money,
    /// `taxable_value + cgst + sgst` on taxed documents, else `taxable_value`.
    pub row_total: Money,
}

impl RowResult {
    /// Combined GST for the row. [`crate::tax::compute_row`] has already
    /// checked this sum for every row it produced.
    #[inline]
    pub fn tax(&self) -> Money {
        self.cgst + self.sgst
    }
}

// =============================================================================
// Document Totals
// =============================================================================

/// Document-level aggregates.
///
/// ## Invariants
/// - `total_tax == total_cgst + total_sgst`
/// - `raw_grand_total == total_taxable_value + total_tax`
/// - `final_total == raw_grand_total + round_off` is a whole rupee
/// - `|round_off| <= 0.5`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTotals {
    pub total_taxable_value: Money,
    pub total_cgst: Money,
    pub total_sgst: Money,
    pub total_tax: Money,
    pub raw_grand_total: Money,
    /// May be negative when the raw total rounds down.
    pub round_off: Money,
    pub final_total: Money,
}

// =============================================================================
// Document Computation
// =============================================================================

/// Output of the tax engine for a whole document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DocumentComputation {
    /// One row per item, then one per charge, in input order.
    pub rows: Vec<RowResult>,
    pub totals: DocumentTotals,
    /// True iff any item or charge carries a positive rate.
    pub has_tax: bool,
}

// =============================================================================
// Document Kind
// =============================================================================

/// The printable document types that share the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Invoice,
    Quotation,
    PurchaseOrder,
    EwayBill,
}

impl DocumentKind {
    /// All kinds, in menu order.
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::Invoice,
        DocumentKind::Quotation,
        DocumentKind::PurchaseOrder,
        DocumentKind::EwayBill,
    ];

    /// Heading printed at the top of every page.
    ///
    /// Invoices carrying GST must be titled "Tax Invoice".
    pub fn title(&self, has_tax: bool) -> &'static str {
        match self {
            DocumentKind::Invoice if has_tax => "Tax Invoice",
            DocumentKind::Invoice => "Invoice",
            DocumentKind::Quotation => "Quotation",
            DocumentKind::PurchaseOrder => "Purchase Order",
            DocumentKind::EwayBill => "E-Way Bill",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DocumentKind::Invoice => "invoice",
            DocumentKind::Quotation => "quotation",
            DocumentKind::PurchaseOrder => "purchase_order",
            DocumentKind::EwayBill => "eway_bill",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "invoice" => Ok(DocumentKind::Invoice),
            "quotation" | "quote" => Ok(DocumentKind::Quotation),
            "purchase_order" | "po" => Ok(DocumentKind::PurchaseOrder),
            "eway_bill" | "e_way_bill" | "ewaybill" => Ok(DocumentKind::EwayBill),
            other => Err(format!("unknown document kind: {}", other)),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_half() {
        let rate = TaxRate::from_percent(18);
        assert_eq!(rate.half(), TaxRate::from_percent(9));

        let rate = TaxRate::from_percent(5);
        assert_eq!(rate.half().percent(), Decimal::new(25, 1));
    }

    #[test]
    fn test_tax_rate_default() {
        let rate = TaxRate::default();
        assert!(rate.is_zero());
        assert!(!rate.is_taxable());
        assert!(!TaxRate::from_percent(-5).is_taxable());
    }

    #[test]
    fn test_line_item_taxable_value() {
        let item = LineItem {
            description: "Copper wire".to_string(),
            hsn_code: "7408".to_string(),
            quantity: Decimal::new(25, 1),
            unit_price: Money::from_rupees(40),
            tax_rate: TaxRate::from_percent(18),
        };
        assert_eq!(item.taxable_value(), Some(Money::from_rupees(100)));
        assert!(!item.has_negative_values());

        let huge = LineItem {
            quantity: Decimal::from(1_000_000_000_000_000_i64),
            unit_price: Money::from_decimal(Decimal::from(1_000_000_000_000_000_i64)),
            ..item
        };
        assert_eq!(huge.taxable_value(), None);
    }

    #[test]
    fn test_negative_detection() {
        let charge = NonPricedCharge {
            description: "Discount".to_string(),
            price: Money::from_rupees(-50),
            tax_rate: TaxRate::zero(),
        };
        assert!(charge.has_negative_values());
    }

    #[test]
    fn test_document_kind_parse_and_title() {
        assert_eq!("purchase-order".parse::<DocumentKind>(), Ok(DocumentKind::PurchaseOrder));
        assert_eq!("E-Way-Bill".parse::<DocumentKind>(), Ok(DocumentKind::EwayBill));
        assert!("receipt".parse::<DocumentKind>().is_err());

        assert_eq!(DocumentKind::Invoice.title(true), "Tax Invoice");
        assert_eq!(DocumentKind::Invoice.title(false), "Invoice");
        assert_eq!(DocumentKind::EwayBill.to_string(), "eway_bill");
    }
}
