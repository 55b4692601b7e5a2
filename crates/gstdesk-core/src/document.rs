//! # Document Pipeline
//!
//! One call from canonical line items to printable pages.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  items, charges                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  tax::compute_document ──► rows + totals + has_tax                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  render::render_row_blocks ──► PageBlock { html, row_cost } per row     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pagination::paginate ──► Page[]  (≥ 1: empty document → blank page)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  render::render_page ──► <div class="preview-container"> per page       │
//! │                            summary on the last page only                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::CoreResult;
use crate::layout::LayoutProfile;
use crate::pagination::{paginate, Page};
use crate::render::{render_page, render_row_blocks, render_summary, PagePosition};
use crate::tax::compute_document;
use crate::types::{DocumentComputation, DocumentKind, LineItem, NonPricedCharge};

/// Identity lines printed at the top of every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentHeader {
    pub issuer_name: String,
    /// Empty when the issuer is unregistered.
    pub issuer_gstin: String,
    pub number: String,
    pub date: NaiveDate,
    pub party_name: String,
}

/// A computed, paginated, rendered document ready for the print subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedDocument {
    pub kind: DocumentKind,
    pub computation: DocumentComputation,
    /// One `preview-container` fragment per page, in print order.
    pub pages: Vec<String>,
}

impl PreparedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All pages joined into one printable body.
    pub fn body_html(&self) -> String {
        self.pages.join("\n")
    }
}

/// Computes, paginates and renders a document.
///
/// Always produces at least one page so an empty document still prints its
/// header and summary.
pub fn prepare_document(
    kind: DocumentKind,
    header: &DocumentHeader,
    items: &[LineItem],
    charges: &[NonPricedCharge],
    layout: &LayoutProfile,
) -> CoreResult<PreparedDocument> {
    let budget = layout.budget()?;

    let computation = compute_document(items, charges)?;
    let blocks = render_row_blocks(items, charges, &computation, layout.row_cost)?;

    let mut pages = paginate(blocks, budget);
    if pages.is_empty() {
        pages.push(Page::empty());
    }

    let title = kind.title(computation.has_tax);
    let summary = render_summary(&computation.totals, computation.has_tax, &header.issuer_name)?;

    let count = pages.len();
    let rendered = pages
        .iter()
        .enumerate()
        .map(|(index, page)| {
            let position = PagePosition {
                number: index + 1,
                count,
            };
            let page_summary = position.is_last().then_some(summary.as_str());
            render_page(title, header, page, position, computation.has_tax, page_summary)
        })
        .collect::<CoreResult<Vec<_>>>()?;

    info!(
        %kind,
        number = %header.number,
        rows = computation.rows.len(),
        pages = count,
        final_total = %computation.totals.final_total,
        "Document prepared"
    );

    Ok(PreparedDocument {
        kind,
        computation,
        pages: rendered,
    })
}
