//! # Tax Calculation Engine
//!
//! Turns line items and flat charges into per-row GST amounts and
//! document totals.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  items[] ++ charges[]                                                   │
//! │       │                                                                 │
//! │       ├──► has_tax = any(rate > 0)        (document-wide flag)          │
//! │       │                                                                 │
//! │       ▼  per row, in order                                              │
//! │  taxable = qty × unit_price  |  price                                   │
//! │  cgst = sgst = taxable × (rate / 2) / 100                               │
//! │  row_total = taxable + cgst + sgst   (has_tax)                          │
//! │            = taxable                 (otherwise)                        │
//! │       │                                                                 │
//! │       ▼  left-to-right sums, NO intermediate rounding                   │
//! │  raw_grand_total = Σ taxable + Σ cgst + Σ sgst                          │
//! │  round_off       = round(raw_grand_total) − raw_grand_total             │
//! │  final_total     = raw_grand_total + round_off                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use gstdesk_core::money::Money;
//! use gstdesk_core::tax::compute_document;
//! use gstdesk_core::types::{LineItem, TaxRate};
//! use rust_decimal::Decimal;
//!
//! let items = vec![LineItem {
//!     description: "Switch board".to_string(),
//!     hsn_code: "8537".to_string(),
//!     quantity: Decimal::from(2),
//!     unit_price: Money::from_rupees(100),
//!     tax_rate: TaxRate::from_percent(18),
//! }];
//!
//! let doc = compute_document(&items, &[]).unwrap();
//! assert!(doc.has_tax);
//! assert_eq!(doc.rows[0].cgst, Money::from_rupees(18));
//! assert_eq!(doc.totals.final_total, Money::from_rupees(236));
//! ```

use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{
    DocumentComputation, DocumentTotals, LineItem, NonPricedCharge, RowResult, TaxRate,
};

fn overflow(what: impl Into<String>) -> CoreError {
    CoreError::AmountOverflow { what: what.into() }
}

/// Computes one row from its taxable value and rate.
///
/// `has_tax` is the document-wide flag: rows on an untaxed document never
/// add tax into `row_total`.
pub fn compute_row(taxable_value: Money, rate: TaxRate, has_tax: bool) -> CoreResult<RowResult> {
    let half = taxable_value
        .percent_of(rate.half())
        .ok_or_else(|| overflow("CGST/SGST"))?;
    let tax = half.checked_add(half).ok_or_else(|| overflow("row tax"))?;

    let row_total = if has_tax {
        taxable_value
            .checked_add(tax)
            .ok_or_else(|| overflow("row total"))?
    } else {
        taxable_value
    };

    Ok(RowResult {
        taxable_value,
        cgst: half,
        sgst: half,
        row_total,
    })
}

/// True iff any item or charge carries a positive rate.
pub fn document_has_tax(items: &[LineItem], charges: &[NonPricedCharge]) -> bool {
    items.iter().any(|i| i.tax_rate.is_taxable()) || charges.iter().any(|c| c.tax_rate.is_taxable())
}

/// Aggregates rows into document totals, rounding only the grand total.
pub fn compute_totals(rows: &[RowResult]) -> CoreResult<DocumentTotals> {
    let sum = |what: &str, pick: fn(&RowResult) -> Money| {
        Money::checked_sum(rows.iter().map(pick)).ok_or_else(|| overflow(what))
    };

    let total_taxable_value = sum("total taxable value", |r| r.taxable_value)?;
    let total_cgst = sum("total CGST", |r| r.cgst)?;
    let total_sgst = sum("total SGST", |r| r.sgst)?;
    let total_tax = total_cgst
        .checked_add(total_sgst)
        .ok_or_else(|| overflow("total tax"))?;
    let raw_grand_total = total_taxable_value
        .checked_add(total_tax)
        .ok_or_else(|| overflow("grand total"))?;

    // |round_off| < 1, so neither step below can leave the range
    let final_total = raw_grand_total.round_to_unit();
    let round_off = final_total
        .checked_sub(raw_grand_total)
        .ok_or_else(|| overflow("round off"))?;

    Ok(DocumentTotals {
        total_taxable_value,
        total_cgst,
        total_sgst,
        total_tax,
        raw_grand_total,
        round_off,
        final_total,
    })
}

/// Computes every row and the totals of a document.
///
/// Rows come out as all `items` followed by all `charges`, in input order.
/// Negative values are not rejected; they are logged and carried through
/// the arithmetic unchanged. Amounts too large for exact decimal arithmetic
/// fail with [`CoreError::AmountOverflow`].
pub fn compute_document(
    items: &[LineItem],
    charges: &[NonPricedCharge],
) -> CoreResult<DocumentComputation> {
    let has_tax = document_has_tax(items, charges);

    let mut rows = Vec::with_capacity(items.len() + charges.len());

    for (index, item) in items.iter().enumerate() {
        if item.has_negative_values() {
            warn!(index, description = %item.description, "Line item carries a negative value");
        }
        let taxable = item
            .taxable_value()
            .ok_or_else(|| overflow(format!("taxable value of row {}", index + 1)))?;
        rows.push(compute_row(taxable, item.tax_rate, has_tax)?);
    }

    for (index, charge) in charges.iter().enumerate() {
        if charge.has_negative_values() {
            warn!(index, description = %charge.description, "Charge carries a negative value");
        }
        rows.push(compute_row(charge.taxable_value(), charge.tax_rate, has_tax)?);
    }

    let totals = compute_totals(&rows)?;

    debug!(
        rows = rows.len(),
        has_tax,
        raw_grand_total = %totals.raw_grand_total,
        final_total = %totals.final_total,
        "Document computed"
    );

    Ok(DocumentComputation {
        rows,
        totals,
        has_tax,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn item(qty: Decimal, unit_price: Money, rate: i64) -> LineItem {
        LineItem {
            description: "Item".to_string(),
            hsn_code: String::new(),
            quantity: qty,
            unit_price,
            tax_rate: TaxRate::from_percent(rate),
        }
    }

    fn charge(price: Money, rate: i64) -> NonPricedCharge {
        NonPricedCharge {
            description: "Installation".to_string(),
            price,
            tax_rate: TaxRate::from_percent(rate),
        }
    }

    #[test]
    fn test_single_taxed_item() {
        let doc = compute_document(
            &[item(Decimal::from(2), Money::from_rupees(100), 18)],
            &[],
        ).unwrap();

        assert!(doc.has_tax);
        let row = doc.rows[0];
        assert_eq!(row.taxable_value, Money::from_rupees(200));
        assert_eq!(row.cgst, Money::from_rupees(18));
        assert_eq!(row.sgst, Money::from_rupees(18));
        assert_eq!(row.row_total, Money::from_rupees(236));

        let totals = doc.totals;
        assert_eq!(totals.total_taxable_value, Money::from_rupees(200));
        assert_eq!(totals.total_tax, Money::from_rupees(36));
        assert_eq!(totals.raw_grand_total, Money::from_rupees(236));
        assert!(totals.round_off.is_zero());
        assert_eq!(totals.final_total, Money::from_rupees(236));
    }

    #[test]
    fn test_untaxed_document_rounds_up() {
        let unit_price = Money::from_decimal(Decimal::new(9999, 2));
        let doc = compute_document(
            &[item(Decimal::from(3), unit_price, 0)],
            &[charge(Money::from_rupees(50), 0)],
        ).unwrap();

        assert!(!doc.has_tax);
        assert_eq!(doc.rows.len(), 2);
        assert_eq!(doc.totals.raw_grand_total.amount(), Decimal::new(34997, 2));
        assert_eq!(doc.totals.round_off.amount(), Decimal::new(3, 2));
        assert_eq!(doc.totals.final_total, Money::from_rupees(350));
    }

    #[test]
    fn test_round_off_can_be_negative() {
        // 101.20 → 101, round_off = -0.20
        let doc = compute_document(&[], &[charge(Money::from_decimal(Decimal::new(10120, 2)), 0)]).unwrap();
        assert_eq!(doc.totals.round_off.amount(), Decimal::new(-20, 2));
        assert_eq!(doc.totals.final_total, Money::from_rupees(101));
    }

    #[test]
    fn test_has_tax_is_document_wide() {
        let doc = compute_document(
            &[item(Decimal::from(1), Money::from_rupees(500), 0)],
            &[charge(Money::from_rupees(100), 18)],
        ).unwrap();

        assert!(doc.has_tax);
        // zero-rate row still sits in the taxed layout with zero GST
        assert!(doc.rows[0].cgst.is_zero());
        assert_eq!(doc.rows[0].row_total, Money::from_rupees(500));
        assert_eq!(doc.rows[1].row_total, Money::from_rupees(118));
        assert_eq!(doc.totals.final_total, Money::from_rupees(618));
    }

    #[test]
    fn test_rows_keep_items_then_charges_order() {
        let doc = compute_document(
            &[
                item(Decimal::from(1), Money::from_rupees(10), 0),
                item(Decimal::from(1), Money::from_rupees(20), 0),
            ],
            &[charge(Money::from_rupees(30), 0)],
        ).unwrap();

        let values: Vec<Money> = doc.rows.iter().map(|r| r.taxable_value).collect();
        assert_eq!(
            values,
            vec![Money::from_rupees(10), Money::from_rupees(20), Money::from_rupees(30)]
        );
    }

    #[test]
    fn test_rows_are_not_rounded_before_aggregation() {
        // Each row carries 0.1782 of tax; rounding per row would total 0.54
        let unit = Money::from_decimal(Decimal::new(99, 2));
        let items: Vec<LineItem> = (0..3).map(|_| item(Decimal::ONE, unit, 18)).collect();
        let doc = compute_document(&items, &[]).unwrap();
        assert_eq!(doc.totals.total_tax.amount(), Decimal::new(5346, 4));
    }

    #[test]
    fn test_negative_quantity_passes_through() {
        let doc = compute_document(&[item(Decimal::from(-2), Money::from_rupees(100), 18)], &[]).unwrap();
        assert_eq!(doc.rows[0].taxable_value, Money::from_rupees(-200));
        assert_eq!(doc.rows[0].cgst, Money::from_rupees(-18));
        assert_eq!(doc.totals.final_total, Money::from_rupees(-236));
    }

    #[test]
    fn test_oversized_amounts_fail_instead_of_panicking() {
        let quadrillion = Decimal::from(1_000_000_000_000_000_i64);
        let result = compute_document(&[item(quadrillion, Money::from_decimal(quadrillion), 18)], &[]);
        assert!(matches!(
            result,
            Err(CoreError::AmountOverflow { ref what }) if what == "taxable value of row 1"
        ));

        // each row fits, their sum does not
        let max = Money::from_decimal(Decimal::MAX);
        let result = compute_document(&[], &[charge(max, 0), charge(max, 0)]);
        assert!(matches!(result, Err(CoreError::AmountOverflow { .. })));

        // the row fits, the row total with tax does not
        let result = compute_row(max, TaxRate::from_percent(18), true);
        assert!(matches!(result, Err(CoreError::AmountOverflow { .. })));
    }

    #[test]
    fn test_empty_document() {
        let doc = compute_document(&[], &[]).unwrap();
        assert!(!doc.has_tax);
        assert!(doc.rows.is_empty());
        assert_eq!(doc.totals, DocumentTotals::default());
    }

    fn money_strategy() -> impl Strategy<Value = Money> {
        (0i64..10_000_000).prop_map(|paise| Money::from_decimal(Decimal::new(paise, 2)))
    }

    fn rate_strategy() -> impl Strategy<Value = TaxRate> {
        prop_oneof![
            Just(TaxRate::from_percent(0)),
            Just(TaxRate::from_percent(5)),
            Just(TaxRate::from_percent(12)),
            Just(TaxRate::from_percent(18)),
            Just(TaxRate::from_percent(28)),
            (0u32..=10_000).prop_map(|bps| TaxRate::from_percent(Decimal::new(bps as i64, 2))),
        ]
    }

    fn item_strategy() -> impl Strategy<Value = LineItem> {
        ((0i64..100_000), money_strategy(), rate_strategy()).prop_map(|(qty, unit_price, tax_rate)| {
            LineItem {
                description: "Generated".to_string(),
                hsn_code: String::new(),
                quantity: Decimal::new(qty, 2),
                unit_price,
                tax_rate,
            }
        })
    }

    fn charge_strategy() -> impl Strategy<Value = NonPricedCharge> {
        (money_strategy(), rate_strategy()).prop_map(|(price, tax_rate)| NonPricedCharge {
            description: "Generated".to_string(),
            price,
            tax_rate,
        })
    }

    proptest! {
        /// CGST equals SGST and together they are the full rate of the taxable value.
        #[test]
        fn tax_split_is_symmetric(taxable in money_strategy(), rate in rate_strategy()) {
            let row = compute_row(taxable, rate, true).unwrap();
            prop_assert_eq!(row.cgst, row.sgst);
            prop_assert_eq!(Some(row.tax()), taxable.percent_of(rate));
        }

        /// Rounding never moves the grand total by more than half a rupee.
        #[test]
        fn round_off_is_bounded(
            items in prop::collection::vec(item_strategy(), 0..20),
            charges in prop::collection::vec(charge_strategy(), 0..5),
        ) {
            let doc = compute_document(&items, &charges).unwrap();
            let t = doc.totals;
            prop_assert!(t.round_off.abs().amount() <= Decimal::new(5, 1));
            prop_assert_eq!(t.final_total, t.raw_grand_total + t.round_off);
            prop_assert!(t.final_total.amount().fract().is_zero());
            prop_assert_eq!(t.total_tax, t.total_cgst + t.total_sgst);
        }

        /// Any positive rate anywhere makes the whole document taxed.
        #[test]
        fn has_tax_matches_any_positive_rate(
            items in prop::collection::vec(item_strategy(), 0..10),
            charges in prop::collection::vec(charge_strategy(), 0..5),
        ) {
            let doc = compute_document(&items, &charges).unwrap();
            let expected = items.iter().any(|i| i.tax_rate.is_taxable())
                || charges.iter().any(|c| c.tax_rate.is_taxable());
            prop_assert_eq!(doc.has_tax, expected);
            prop_assert_eq!(doc.rows.len(), items.len() + charges.len());
        }
    }
}
