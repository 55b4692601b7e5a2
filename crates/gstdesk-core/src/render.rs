//! # Fragment Rendering
//!
//! Compiled HTML templates for item rows, the totals summary, and page
//! containers. The tax engine never sees HTML; this module takes its
//! [`RowResult`]s and [`DocumentTotals`] and produces fragments.
//!
//! ## Fragment Assembly
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  LineItem + RowResult ──► <tr>…</tr> ──► PageBlock { html, row_cost }   │
//! │                                                 │                       │
//! │                                       paginate()│                       │
//! │                                                 ▼                       │
//! │  <div class="preview-container">                                        │
//! │     header (title, issuer, number, date, Page i of n)                   │
//! │     <table> rows of this page </table>                                  │
//! │     summary  ◄── last page only                                         │
//! │  </div>                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All interpolated text is HTML-escaped by the template engine.

use askama::Template;

use crate::document::DocumentHeader;
use crate::error::{CoreError, CoreResult};
use crate::layout::RowCostRule;
use crate::pagination::{Page, PageBlock};
use crate::types::{DocumentComputation, DocumentTotals, LineItem, NonPricedCharge, RowResult, TaxRate};
use crate::words::amount_in_words;

/// Printed under the totals on every document.
pub const DECLARATION: &str =
    "We declare that this document shows the actual price of the goods described and that all particulars are true and correct.";

// =============================================================================
// Templates
// =============================================================================

#[derive(Template)]
#[template(
    source = r#"<tr class="item-row"><td class="sno">{{ serial }}</td><td class="desc">{{ description }}</td><td class="hsn">{{ hsn_code }}</td><td class="qty">{{ quantity }}</td><td class="rate">{{ unit_price }}</td><td class="taxable">{{ row.taxable_value }}</td>{% if has_tax %}<td class="cgst-rate">{{ half_rate }}%</td><td class="cgst">{{ row.cgst }}</td><td class="sgst-rate">{{ half_rate }}%</td><td class="sgst">{{ row.sgst }}</td>{% endif %}<td class="total">{{ row.row_total }}</td></tr>"#,
    ext = "html"
)]
struct RowTemplate<'a> {
    serial: usize,
    description: &'a str,
    hsn_code: &'a str,
    quantity: String,
    unit_price: String,
    half_rate: String,
    row: &'a RowResult,
    has_tax: bool,
}

#[derive(Template)]
#[template(
    source = r#"<div class="summary">
<table class="totals">
<tr><td>Taxable Value</td><td>{{ totals.total_taxable_value }}</td></tr>
{%- if has_tax %}
<tr><td>CGST</td><td>{{ totals.total_cgst }}</td></tr>
<tr><td>SGST</td><td>{{ totals.total_sgst }}</td></tr>
<tr><td>Total Tax</td><td>{{ totals.total_tax }}</td></tr>
{%- endif %}
<tr><td>Round Off</td><td>{{ totals.round_off }}</td></tr>
<tr class="grand-total"><td>Grand Total</td><td>{{ totals.final_total }}</td></tr>
</table>
<p class="amount-words">{{ amount_words }}</p>
<p class="declaration">{{ declaration }}</p>
<div class="signature">For {{ issuer_name }}<br>Authorised Signatory</div>
</div>"#,
    ext = "html"
)]
struct SummaryTemplate<'a> {
    totals: &'a DocumentTotals,
    has_tax: bool,
    amount_words: String,
    declaration: &'a str,
    issuer_name: &'a str,
}

#[derive(Template)]
#[template(
    source = r#"<div class="preview-container">
<header class="doc-header">
<h1>{{ title }}</h1>
<div class="issuer">{{ header.issuer_name }}{% if !header.issuer_gstin.is_empty() %} | GSTIN: {{ header.issuer_gstin }}{% endif %}</div>
<div class="meta">No. {{ header.number }} | Date: {{ date }} | To: {{ header.party_name }}</div>
<div class="page-no">Page {{ page_number }} of {{ page_count }}</div>
</header>
<table class="items">
<thead><tr><th>#</th><th>Description</th><th>HSN/SAC</th><th>Qty</th><th>Rate</th><th>Taxable Value</th>{% if has_tax %}<th>CGST %</th><th>CGST</th><th>SGST %</th><th>SGST</th>{% endif %}<th>Total</th></tr></thead>
<tbody>{{ rows|safe }}</tbody>
</table>
{%- if has_summary %}
{{ summary|safe }}
{%- endif %}
</div>"#,
    ext = "html"
)]
struct PageTemplate<'a> {
    title: &'a str,
    header: &'a DocumentHeader,
    date: String,
    page_number: usize,
    page_count: usize,
    has_tax: bool,
    rows: String,
    has_summary: bool,
    summary: &'a str,
}

fn render<T: Template>(fragment: &'static str, template: &T) -> CoreResult<String> {
    template
        .render()
        .map_err(|source| CoreError::Render { fragment, source })
}

fn half_rate(rate: TaxRate) -> String {
    rate.half().percent().normalize().to_string()
}

// =============================================================================
// Rows
// =============================================================================

/// Renders the `<tr>` for a priced line item.
pub fn render_item_row(
    serial: usize,
    item: &LineItem,
    row: &RowResult,
    has_tax: bool,
) -> CoreResult<String> {
    render(
        "item row",
        &RowTemplate {
            serial,
            description: &item.description,
            hsn_code: &item.hsn_code,
            quantity: item.quantity.normalize().to_string(),
            unit_price: item.unit_price.to_string(),
            half_rate: half_rate(item.tax_rate),
            row,
            has_tax,
        },
    )
}

/// Renders the `<tr>` for a flat charge (quantity and rate cells left blank).
pub fn render_charge_row(
    serial: usize,
    charge: &NonPricedCharge,
    row: &RowResult,
    has_tax: bool,
) -> CoreResult<String> {
    render(
        "charge row",
        &RowTemplate {
            serial,
            description: &charge.description,
            hsn_code: "",
            quantity: String::new(),
            unit_price: String::new(),
            half_rate: half_rate(charge.tax_rate),
            row,
            has_tax,
        },
    )
}

/// Renders every row of a computed document as page blocks, items first.
///
/// `computation` must come from `compute_document(items, charges)`.
pub fn render_row_blocks(
    items: &[LineItem],
    charges: &[NonPricedCharge],
    computation: &DocumentComputation,
    row_cost: RowCostRule,
) -> CoreResult<Vec<PageBlock>> {
    let (item_rows, charge_rows) = computation.rows.split_at(items.len().min(computation.rows.len()));
    let has_tax = computation.has_tax;

    let mut blocks = Vec::with_capacity(computation.rows.len());

    for (index, (item, row)) in items.iter().zip(item_rows).enumerate() {
        let html = render_item_row(index + 1, item, row, has_tax)?;
        blocks.push(PageBlock::new(html, row_cost.estimate(&item.description))?);
    }

    for (index, (charge, row)) in charges.iter().zip(charge_rows).enumerate() {
        let html = render_charge_row(items.len() + index + 1, charge, row, has_tax)?;
        blocks.push(PageBlock::new(html, row_cost.estimate(&charge.description))?);
    }

    Ok(blocks)
}

// =============================================================================
// Summary & Pages
// =============================================================================

/// Renders the totals, amount in words, declaration and signature block.
pub fn render_summary(
    totals: &DocumentTotals,
    has_tax: bool,
    issuer_name: &str,
) -> CoreResult<String> {
    render(
        "summary",
        &SummaryTemplate {
            totals,
            has_tax,
            amount_words: amount_in_words(totals.final_total),
            declaration: DECLARATION,
            issuer_name,
        },
    )
}

/// Position of a page within its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePosition {
    /// 1-based.
    pub number: usize,
    pub count: usize,
}

impl PagePosition {
    pub fn is_last(&self) -> bool {
        self.number == self.count
    }
}

/// Renders one `preview-container` page; `summary` is printed only when given.
pub fn render_page(
    title: &str,
    header: &DocumentHeader,
    page: &Page,
    position: PagePosition,
    has_tax: bool,
    summary: Option<&str>,
) -> CoreResult<String> {
    render(
        "page",
        &PageTemplate {
            title,
            header,
            date: header.date.format("%d-%m-%Y").to_string(),
            page_number: position.number,
            page_count: position.count,
            has_tax,
            rows: page.html(),
            has_summary: summary.is_some(),
            summary: summary.unwrap_or_default(),
        },
    )
}

// =============================================================================
// Unit Tests
// =============================================================================
