//! # Pagination Engine
//!
//! Packs rendered row blocks into printable pages.
//!
//! ## Packing Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Greedy, single pass, order preserving                                  │
//! │                                                                         │
//! │  for each block:                                                        │
//! │    need = current + block.row_cost                                      │
//! │    if block is the LAST one: need += summary_reserve                    │
//! │                                                                         │
//! │    need <= capacity ──────────────► append to current page             │
//! │    need >  capacity, page empty ──► append anyway (never split)        │
//! │    need >  capacity, page used ───► close page, block opens next page  │
//! │                                                                         │
//! │  The reserve keeps the totals/signature block on the same page as      │
//! │  the last item row.                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use gstdesk_core::pagination::{paginate, PageBlock, PageBudget};
//!
//! let blocks: Vec<PageBlock> = (0..5)
//!     .map(|i| PageBlock::new(format!("<tr><td>{}</td></tr>", i), 1).unwrap())
//!     .collect();
//!
//! let pages = paginate(blocks, PageBudget::new(20, 8).unwrap());
//! assert_eq!(pages.len(), 1);
//! assert_eq!(pages[0].len(), 5);
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Page Block
// =============================================================================

/// A pre-rendered fragment and the vertical space it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBlock {
    html: String,
    row_cost: u32,
}

impl PageBlock {
    /// Creates a block; `row_cost` must be at least one slot.
    pub fn new(html: impl Into<String>, row_cost: u32) -> CoreResult<Self> {
        if row_cost == 0 {
            return Err(CoreError::ZeroRowCost);
        }
        Ok(PageBlock {
            html: html.into(),
            row_cost,
        })
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn row_cost(&self) -> u32 {
        self.row_cost
    }
}

// =============================================================================
// Page
// =============================================================================

/// An ordered run of blocks printed on one sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    blocks: Vec<PageBlock>,
}

impl Page {
    /// A page with no rows, used for the document shell of an empty document.
    pub fn empty() -> Self {
        Page::default()
    }

    pub fn blocks(&self) -> &[PageBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Total row slots used by the page's blocks.
    pub fn cost(&self) -> u32 {
        self.blocks
            .iter()
            .fold(0u32, |acc, b| acc.saturating_add(b.row_cost))
    }

    /// Concatenated HTML of every block on the page.
    pub fn html(&self) -> String {
        self.blocks.iter().map(|b| b.html.as_str()).collect()
    }

    fn push(&mut self, block: PageBlock) {
        self.blocks.push(block);
    }
}

// =============================================================================
// Page Budget
// =============================================================================

/// Page capacity and the slots kept free for the summary on the last page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBudget {
    capacity: u32,
    summary_reserve: u32,
}

impl PageBudget {
    /// Creates a budget; a zero capacity can never hold a block and is rejected.
    pub fn new(capacity: u32, summary_reserve: u32) -> CoreResult<Self> {
        if capacity == 0 {
            return Err(CoreError::InvalidCapacity { capacity });
        }
        Ok(PageBudget {
            capacity,
            summary_reserve,
        })
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn summary_reserve(&self) -> u32 {
        self.summary_reserve
    }
}

// =============================================================================
// Paginate
// =============================================================================

/// Partitions `blocks` into pages under `budget`.
///
/// Returns no pages for empty input; see
/// [`crate::document::prepare_document`] for the one-empty-page shell.
pub fn paginate<I>(blocks: I, budget: PageBudget) -> Vec<Page>
where
    I: IntoIterator<Item = PageBlock>,
{
    let mut pages = Vec::new();
    let mut current = Page::empty();
    let mut current_cost: u32 = 0;

    let mut blocks = blocks.into_iter().peekable();

    while let Some(block) = blocks.next() {
        let is_last = blocks.peek().is_none();

        let mut needed = current_cost.saturating_add(block.row_cost);
        if is_last {
            needed = needed.saturating_add(budget.summary_reserve);
        }

        if needed > budget.capacity && current_cost > 0 {
            trace!(
                page = pages.len() + 1,
                cost = current_cost,
                is_last,
                "Closing page"
            );
            pages.push(std::mem::take(&mut current));
            current_cost = 0;
        }

        current_cost = current_cost.saturating_add(block.row_cost);
        current.push(block);
    }

    if !current.is_empty() {
        pages.push(current);
    }

    pages
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn blocks(costs: &[u32]) -> Vec<PageBlock> {
        costs
            .iter()
            .enumerate()
            .map(|(i, &cost)| PageBlock::new(format!("<tr>{}</tr>", i), cost).unwrap())
            .collect()
    }

    fn sizes(pages: &[Page]) -> Vec<usize> {
        pages.iter().map(Page::len).collect()
    }

    #[test]
    fn test_short_document_fits_one_page() {
        let pages = paginate(blocks(&[1; 5]), PageBudget::new(20, 8).unwrap());
        assert_eq!(sizes(&pages), vec![5]);
        assert_eq!(pages[0].cost(), 5);
    }

    #[test]
    fn test_page_cost_saturates() {
        let mut page = Page::empty();
        page.push(PageBlock::new("<tr>a</tr>", u32::MAX).unwrap());
        page.push(PageBlock::new("<tr>b</tr>", u32::MAX).unwrap());
        assert_eq!(page.cost(), u32::MAX);
    }

    #[test]
    fn test_last_block_moves_to_keep_summary() {
        // 17 rows fit plainly; the 18th needs 17 + 1 + 8 = 26 > 20
        let pages = paginate(blocks(&[1; 18]), PageBudget::new(20, 8).unwrap());
        assert_eq!(sizes(&pages), vec![17, 1]);
        assert!(pages[1].cost() + 8 <= 20);
    }

    #[test]
    fn test_last_block_that_fits_with_reserve_stays() {
        // 11 + 1 + 8 = 20 <= 20
        let pages = paginate(blocks(&[1; 12]), PageBudget::new(20, 8).unwrap());
        assert_eq!(sizes(&pages), vec![12]);
    }

    #[test]
    fn test_plain_overflow_starts_new_page() {
        let pages = paginate(blocks(&[6, 6, 6, 6, 1]), PageBudget::new(15, 0).unwrap());
        assert_eq!(sizes(&pages), vec![2, 3]);
        assert_eq!(pages[0].cost(), 12);
        assert_eq!(pages[1].cost(), 13);
    }

    #[test]
    fn test_oversized_block_sits_alone() {
        let pages = paginate(blocks(&[2, 30, 2]), PageBudget::new(15, 8).unwrap());
        assert_eq!(sizes(&pages), vec![1, 1, 1]);
        assert_eq!(pages[1].cost(), 30);
    }

    #[test]
    fn test_single_oversized_last_block_on_empty_page() {
        let pages = paginate(blocks(&[25]), PageBudget::new(20, 8).unwrap());
        assert_eq!(sizes(&pages), vec![1]);
    }

    #[test]
    fn test_empty_input_has_no_pages() {
        let pages = paginate(Vec::new(), PageBudget::new(20, 8).unwrap());
        assert!(pages.is_empty());
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        assert!(matches!(
            PageBudget::new(0, 8),
            Err(CoreError::InvalidCapacity { capacity: 0 })
        ));
    }

    #[test]
    fn test_zero_row_cost_is_rejected() {
        assert!(matches!(PageBlock::new("<tr></tr>", 0), Err(CoreError::ZeroRowCost)));
    }

    #[test]
    fn test_page_html_concatenates_in_order() {
        let pages = paginate(blocks(&[1, 1, 1]), PageBudget::new(20, 0).unwrap());
        assert_eq!(pages[0].html(), "<tr>0</tr><tr>1</tr><tr>2</tr>");
    }

    proptest! {
        #[test]
        fn pages_respect_budget_and_order(
            costs in prop::collection::vec(1u32..12, 0..60),
            capacity in 1u32..30,
            reserve in 0u32..12,
        ) {
            let budget = PageBudget::new(capacity, reserve).unwrap();
            let input = blocks(&costs);
            let pages = paginate(input.clone(), budget);

            // No block split, dropped or reordered
            let flattened: Vec<PageBlock> =
                pages.iter().flat_map(|p| p.blocks().iter().cloned()).collect();
            prop_assert_eq!(&flattened, &input);
            prop_assert_eq!(flattened.len(), costs.len());

            for (i, page) in pages.iter().enumerate() {
                prop_assert!(!page.is_empty());
                let is_last = i + 1 == pages.len();
                if is_last {
                    prop_assert!(page.cost() + reserve <= capacity || page.len() == 1);
                } else {
                    prop_assert!(page.cost() <= capacity || page.len() == 1);
                }
            }
        }

        /// The trailing block always shares a page that leaves the reserve
        /// free, unless that block alone is too tall.
        #[test]
        fn last_page_keeps_summary_reserve(
            costs in prop::collection::vec(1u32..6, 1..60),
            capacity in 10u32..30,
            reserve in 0u32..5,
        ) {
            let budget = PageBudget::new(capacity, reserve).unwrap();
            let pages = paginate(blocks(&costs), budget);
            let last = pages.last().unwrap();
            let last_cost = last.blocks()[last.len() - 1].row_cost();
            prop_assert!(
                last.cost() + reserve <= capacity || (last.len() == 1 && last_cost + reserve > capacity)
            );
        }
    }
}
