//! # gstdesk-core: GST Totals and Print Pagination
//!
//! Pure document logic for the back-office app: per-row CGST/SGST, document
//! totals with whole-rupee round-off, and greedy pagination of rendered rows
//! into fixed-capacity print pages.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        gstdesk Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │        Stored record (JSON, legacy or current field names)      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ gstdesk-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ normalize │  │    tax    │  │  render   │  │pagination │  │   │
//! │  │   │  aliases  │─►│ CGST/SGST │─►│ askama    │─►│  greedy   │  │   │
//! │  │   │  coercion │  │  totals   │  │ fragments │  │  fitting  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO FILE I/O • NO DATABASE • NO NETWORK                       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              apps/preview (config, logging, CLI)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Line items, charges, row results, totals, document kinds
//! - [`money`] - Exact decimal rupee amounts
//! - [`tax`] - Row and document GST computation
//! - [`pagination`] - Page blocks, budgets, greedy page fitting
//! - [`layout`] - Per-document page geometry and row cost rules
//! - [`normalize`] - Stored record → canonical line items
//! - [`render`] - HTML fragments for rows, summary and pages
//! - [`document`] - The whole pipeline in one call
//! - [`validation`] - Opt-in strict input checks
//! - [`words`] - Amount in words (Indian numbering)
//! - [`error`] - Error types
//!
//! ## Design Principles
//!
//! 1. **Exact Money**: amounts are decimals; nothing is rounded until the final total
//! 2. **Document-Wide Tax Mode**: one taxed line switches every row to CGST/SGST columns
//! 3. **Order Preserving**: pages hold rows in input order, never reshuffled
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use gstdesk_core::money::Money;
//! use gstdesk_core::tax::compute_document;
//! use gstdesk_core::types::{LineItem, TaxRate};
//! use rust_decimal::Decimal;
//!
//! let items = [LineItem {
//!     description: "Copper cable".to_string(),
//!     hsn_code: "8544".to_string(),
//!     quantity: Decimal::from(2),
//!     unit_price: Money::from_rupees(100),
//!     tax_rate: TaxRate::from_percent(18),
//! }];
//!
//! let doc = compute_document(&items, &[]).unwrap();
//! assert!(doc.has_tax);
//! assert_eq!(doc.totals.total_cgst, Money::from_rupees(18));
//! assert_eq!(doc.totals.final_total, Money::from_rupees(236));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod document;
pub mod error;
pub mod layout;
pub mod money;
pub mod normalize;
pub mod pagination;
pub mod render;
pub mod tax;
pub mod types;
pub mod validation;
pub mod words;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use document::{prepare_document, DocumentHeader, PreparedDocument};
pub use error::{CoreError, CoreResult, ValidationError};
pub use layout::{LayoutProfile, RowCostRule};
pub use money::Money;
pub use pagination::{paginate, Page, PageBlock, PageBudget};
pub use tax::compute_document;
pub use types::*;
