//! # Layout Profiles
//!
//! Per-document-type page geometry: how many row slots a page holds, how
//! many the summary needs, and how a row's height is estimated.
//!
//! ## Default Profiles
//! ```text
//! ┌────────────────┬──────────┬─────────┬──────────────────────┐
//! │ Document       │ Capacity │ Reserve │ Row cost             │
//! ├────────────────┼──────────┼─────────┼──────────────────────┤
//! │ Invoice        │    15    │    8    │ 60 chars per line    │
//! │ Quotation      │    20    │    8    │ 60 chars per line    │
//! │ Purchase Order │    20    │    8    │ 1 slot per row       │
//! │ E-Way Bill     │    15    │    8    │ 1 slot per row       │
//! └────────────────┴──────────┴─────────┴──────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::pagination::PageBudget;
use crate::types::DocumentKind;

/// How the vertical footprint of a rendered row is estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowCostRule {
    /// Every row takes exactly one slot.
    FixedSlot,
    /// A row takes one slot per `n` characters of description, at least one.
    CharsPerLine(u32),
}

impl RowCostRule {
    /// Estimates the slots a row with this description occupies.
    ///
    /// ## Example
    /// ```rust
    /// use gstdesk_core::layout::RowCostRule;
    ///
    /// assert_eq!(RowCostRule::CharsPerLine(60).estimate(&"x".repeat(61)), 2);
    /// assert_eq!(RowCostRule::CharsPerLine(60).estimate(""), 1);
    /// assert_eq!(RowCostRule::FixedSlot.estimate(&"x".repeat(500)), 1);
    /// ```
    pub fn estimate(&self, description: &str) -> u32 {
        match *self {
            RowCostRule::FixedSlot => 1,
            RowCostRule::CharsPerLine(0) => 1,
            RowCostRule::CharsPerLine(per_line) => {
                let chars = description.chars().count() as u32;
                chars.div_ceil(per_line).max(1)
            }
        }
    }
}

/// Page geometry for one document template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutProfile {
    /// Row slots per page.
    pub capacity: u32,
    /// Slots kept free on the last page for totals and signature.
    pub summary_reserve: u32,
    pub row_cost: RowCostRule,
}

impl LayoutProfile {
    /// The pagination budget; fails when `capacity` is zero.
    pub fn budget(&self) -> CoreResult<PageBudget> {
        PageBudget::new(self.capacity, self.summary_reserve)
    }
}

impl DocumentKind {
    /// Built-in profile for this document type.
    pub fn default_layout(&self) -> LayoutProfile {
        match self {
            DocumentKind::Invoice => LayoutProfile {
                capacity: 15,
                summary_reserve: 8,
                row_cost: RowCostRule::CharsPerLine(60),
            },
            DocumentKind::Quotation => LayoutProfile {
                capacity: 20,
                summary_reserve: 8,
                row_cost: RowCostRule::CharsPerLine(60),
            },
            DocumentKind::PurchaseOrder => LayoutProfile {
                capacity: 20,
                summary_reserve: 8,
                row_cost: RowCostRule::FixedSlot,
            },
            DocumentKind::EwayBill => LayoutProfile {
                capacity: 15,
                summary_reserve: 8,
                row_cost: RowCostRule::FixedSlot,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn test_chars_per_line_rounds_up() {
        let rule = RowCostRule::CharsPerLine(60);
        assert_eq!(rule.estimate(&"a".repeat(60)), 1);
        assert_eq!(rule.estimate(&"a".repeat(121)), 3);
        // counts characters, not bytes
        assert_eq!(rule.estimate(&"₹".repeat(60)), 1);
    }

    #[test]
    fn test_zero_chars_per_line_falls_back_to_one_slot() {
        assert_eq!(RowCostRule::CharsPerLine(0).estimate("anything"), 1);
    }

    #[test]
    fn test_default_layouts_have_room_for_summary() {
        for kind in DocumentKind::ALL {
            let layout = kind.default_layout();
            assert!(layout.summary_reserve < layout.capacity, "{kind}");
            assert!(layout.budget().is_ok());
        }
    }

    #[test]
    fn test_zero_capacity_budget_fails() {
        let layout = LayoutProfile {
            capacity: 0,
            summary_reserve: 8,
            row_cost: RowCostRule::FixedSlot,
        };
        assert!(matches!(layout.budget(), Err(CoreError::InvalidCapacity { .. })));
    }

    #[test]
    fn test_row_cost_rule_toml_shape() {
        let fixed: RowCostRule = serde_json::from_str("\"fixed_slot\"").unwrap();
        assert_eq!(fixed, RowCostRule::FixedSlot);
        let wrapped: RowCostRule = serde_json::from_str("{\"chars_per_line\": 48}").unwrap();
        assert_eq!(wrapped, RowCostRule::CharsPerLine(48));
    }
}
