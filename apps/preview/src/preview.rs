//! # Document Preview
//!
//! Turns one persisted document record into the printable preview.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  record (JSON text)                                                     │
//! │       │  serde_json                                                     │
//! │       ▼                                                                 │
//! │  parse_header ──► DocumentHeader (issuer from config, number, date)     │
//! │  normalize_document ──► LineItem[] + NonPricedCharge[]                  │
//! │       │                                                                 │
//! │       ▼  strict mode only                                               │
//! │  check_strict ──► validate_line_item / validate_charge                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  prepare_document(kind, layout_for(kind)) ──► PreparedDocument          │
//! │       │                                                                 │
//! │       ├──► OutputFormat::Html  full HTML page set for the print service │
//! │       └──► OutputFormat::Json  has_tax, rows, totals, page count        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use gstdesk_core::normalize::{field, normalize_document, text_field, NormalizedDocument};
use gstdesk_core::validation::{validate_charge, validate_line_item};
use gstdesk_core::{
    prepare_document, DocumentHeader, DocumentKind, DocumentTotals, PreparedDocument, RowResult,
};

use crate::config::{BusinessConfig, PreviewConfig};
use crate::error::{PreviewError, PreviewResult};

const NUMBER_KEYS: &[&str] = &[
    "invoiceNumber",
    "invoiceNo",
    "quotationNumber",
    "poNumber",
    "ewayBillNumber",
    "documentNumber",
    "number",
];
const DATE_KEYS: &[&str] = &["date", "invoiceDate", "quotationDate", "poDate", "documentDate", "createdAt"];
const PARTY_KEYS: &[&str] = &[
    "customerName",
    "partyName",
    "buyerName",
    "supplierName",
    "vendorName",
    "customer",
    "supplier",
];
const NAME_KEYS: &[&str] = &["name", "Name", "companyName"];

/// Accepted date spellings, tried in order after RFC 3339.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%d.%m.%Y"];

const PRINT_STYLE: &str = "\
.preview-container { width: 210mm; min-height: 297mm; padding: 10mm; box-sizing: border-box; page-break-after: always; }
.preview-container:last-child { page-break-after: auto; }
table.items { width: 100%; border-collapse: collapse; }
table.items th, table.items td { border: 1px solid #444; padding: 2px 4px; }
td.qty, td.rate, td.taxable, td.cgst, td.sgst, td.total { text-align: right; }
.summary { margin-top: 6mm; }
.signature { margin-top: 12mm; text-align: right; }";

/// What the preview emits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Complete HTML document, one `preview-container` per printed page.
    #[default]
    Html,
    /// Computed rows and totals only.
    Json,
}

// =============================================================================
// Header
// =============================================================================

/// Parses a document date.
///
/// ```rust
/// use gstdesk_preview::preview::parse_date;
///
/// let expected = chrono::NaiveDate::from_ymd_opt(2024, 3, 15);
/// assert_eq!(parse_date("2024-03-15"), expected);
/// assert_eq!(parse_date("15/03/2024"), expected);
/// assert_eq!(parse_date("2024-03-15T10:30:00+05:30"), expected);
/// assert_eq!(parse_date("yesterday"), None);
/// ```
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

fn party_name(record: &Value) -> String {
    match field(record, PARTY_KEYS) {
        Some(party @ Value::Object(_)) => text_field(party, NAME_KEYS),
        _ => text_field(record, PARTY_KEYS),
    }
}

/// Reads the header lines of a record; the issuer comes from configuration.
///
/// A missing date prints as `today`. An unreadable date falls back to
/// `today` too, unless `strict` is set.
pub fn parse_header(
    record: &Value,
    business: &BusinessConfig,
    today: NaiveDate,
    strict: bool,
) -> PreviewResult<DocumentHeader> {
    let number = match field(record, NUMBER_KEYS) {
        None | Some(Value::String(_)) | Some(Value::Number(_)) => text_field(record, NUMBER_KEYS),
        Some(other) => {
            return Err(PreviewError::InvalidRecord(format!(
                "document number must be text, got {}",
                other
            )))
        }
    };

    let date = match field(record, DATE_KEYS).and_then(Value::as_str) {
        None => today,
        Some(raw) => match parse_date(raw) {
            Some(date) => date,
            None if strict => {
                return Err(PreviewError::InvalidRecord(format!(
                    "unrecognised document date: {}",
                    raw
                )))
            }
            None => {
                warn!(date = %raw, "Unrecognised document date, printing today's date");
                today
            }
        },
    };

    Ok(DocumentHeader {
        issuer_name: business.name.clone(),
        issuer_gstin: business.gstin.clone(),
        number,
        date,
        party_name: party_name(record),
    })
}

// =============================================================================
// Strict Mode
// =============================================================================

/// Rejects the first line that fails validation.
pub fn check_strict(document: &NormalizedDocument) -> PreviewResult<()> {
    for (index, item) in document.items.iter().enumerate() {
        if let Err(err) = validate_line_item(item) {
            warn!(row = index + 1, error = %err, "Line item rejected");
            return Err(err.into());
        }
    }

    for (index, charge) in document.charges.iter().enumerate() {
        if let Err(err) = validate_charge(charge) {
            warn!(row = document.items.len() + index + 1, error = %err, "Charge rejected");
            return Err(err.into());
        }
    }

    Ok(())
}

// =============================================================================
// Preview
// =============================================================================

/// Builds the paginated document for one record.
pub fn build_preview(
    record: &Value,
    kind: DocumentKind,
    config: &PreviewConfig,
    today: NaiveDate,
) -> PreviewResult<PreparedDocument> {
    let strict = config.is_strict();
    let header = parse_header(record, &config.business, today, strict)?;
    let document = normalize_document(record)?;

    if strict {
        check_strict(&document)?;
    }

    let layout = config.layout_for(kind);
    debug!(%kind, ?layout, "Layout resolved");

    Ok(prepare_document(
        kind,
        &header,
        &document.items,
        &document.charges,
        &layout,
    )?)
}

/// Wraps the rendered pages in a standalone HTML document.
pub fn render_html(document: &PreparedDocument) -> String {
    let title = document.kind.title(document.computation.has_tax);
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>\n{}\n</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        title,
        PRINT_STYLE,
        document.body_html()
    )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PreviewSummary<'a> {
    kind: DocumentKind,
    title: &'static str,
    has_tax: bool,
    rows: &'a [RowResult],
    totals: &'a DocumentTotals,
    page_count: usize,
}

/// Serializes the computed figures without the markup.
pub fn render_json(document: &PreparedDocument) -> PreviewResult<String> {
    let summary = PreviewSummary {
        kind: document.kind,
        title: document.kind.title(document.computation.has_tax),
        has_tax: document.computation.has_tax,
        rows: &document.computation.rows,
        totals: &document.computation.totals,
        page_count: document.page_count(),
    };
    Ok(serde_json::to_string_pretty(&summary)?)
}

/// Full preview of a JSON record in the requested format.
pub fn render_preview(
    input: &str,
    kind: DocumentKind,
    format: OutputFormat,
    config: &PreviewConfig,
    today: NaiveDate,
) -> PreviewResult<String> {
    let record: Value = serde_json::from_str(input)?;
    let document = build_preview(&record, kind, config, today)?;

    info!(
        %kind,
        pages = document.page_count(),
        has_tax = document.computation.has_tax,
        "Preview rendered"
    );

    match format {
        OutputFormat::Html => Ok(render_html(&document)),
        OutputFormat::Json => render_json(&document),
    }
}
