//! Page link computation
//!
//! Maps (total count, page size, current page) to a compact, stable list of
//! page numbers: a local window around the current page plus an evenly
//! spaced ladder of landmark pages and the last page. Bounded in size
//! regardless of the total; gaps between consecutive numbers are expected
//! and render as an ellipsis. A rendering aid, not a correctness-critical
//! index.

use serde::Serialize;
use std::collections::BTreeSet;

/// Rows per page
pub const PAGE_SIZE: u64 = 100;

/// Neighbors shown around the current page
const NEIGHBOR_RADIUS: u64 = 3;

/// Landmark pages spread across the whole range
const LADDER_STEPS: u64 = 10;

/// One rendered page link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub number: u64,
    pub link: String,
    pub current: bool,
}

/// Compute the page links for a listing.
///
/// `current_page` is 1-based and accepted outside `[1, last_page]` without
/// error; the local window clamps to valid bounds. An empty listing still
/// renders page 1, marked current.
pub fn build_pages(
    total_count: u64,
    page_size: u64,
    current_page: u64,
    link: impl Fn(u64) -> String,
) -> Vec<PageLink> {
    if total_count == 0 {
        return vec![PageLink {
            number: 1,
            link: link(1),
            current: true,
        }];
    }

    let page_size = page_size.max(1);
    let last_page = total_count.div_ceil(page_size);

    let mut steps: BTreeSet<u64> = BTreeSet::new();

    // Local window, clamped; empty when current_page is far out of range
    let low = current_page.saturating_sub(NEIGHBOR_RADIUS).max(1);
    let high = current_page.saturating_add(NEIGHBOR_RADIUS).min(last_page);
    for page in low..=high {
        steps.insert(page);
    }

    // Overview ladder, skipped when there is nothing to navigate
    if steps.len() > 1 {
        let quotient = (last_page - 1) as f64 / LADDER_STEPS as f64;
        for index in 0..LADDER_STEPS {
            steps.insert((quotient * index as f64).round() as u64 + 1);
        }
    }

    steps.insert(last_page);

    steps
        .into_iter()
        .map(|number| PageLink {
            number,
            link: link(number),
            current: number == current_page,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(pages: &[PageLink]) -> Vec<u64> {
        pages.iter().map(|p| p.number).collect()
    }

    fn link(number: u64) -> String {
        format!("?page={number}")
    }

    #[test]
    fn local_window_plus_ladder_and_last_page() {
        let pages = build_pages(950, 100, 5, link);
        let numbers = numbers(&pages);

        // last_page = 10; window is 2..=8, last page always present
        for expected in [2, 3, 4, 5, 6, 7, 8, 10] {
            assert!(numbers.contains(&expected), "missing page {expected}");
        }
        assert!(numbers.iter().all(|&n| (1..=10).contains(&n)));

        // Sorted, de-duplicated
        let mut sorted = numbers.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(numbers, sorted);

        // Exactly one page is current
        let current: Vec<_> = pages.iter().filter(|p| p.current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].number, 5);
        assert_eq!(current[0].link, "?page=5");
    }

    #[test]
    fn empty_listing_still_renders_page_one() {
        let pages = build_pages(0, 100, 1, link);
        assert_eq!(numbers(&pages), vec![1]);
        assert!(pages[0].current);
    }

    #[test]
    fn single_page_skips_the_ladder() {
        let pages = build_pages(42, 100, 1, link);
        assert_eq!(numbers(&pages), vec![1]);
        assert!(pages[0].current);
    }

    #[test]
    fn current_page_out_of_range_clamps() {
        // last_page = 3; window around page 50 is empty, ladder is skipped,
        // only the last page remains
        let pages = build_pages(250, 100, 50, link);
        let numbers = numbers(&pages);
        assert!(numbers.iter().all(|&n| (1..=3).contains(&n)));
        assert!(numbers.contains(&3));
        assert!(pages.iter().all(|p| !p.current));
    }

    #[test]
    fn bounded_size_for_huge_listings() {
        let pages = build_pages(1_000_000, 100, 5_000, link);
        // window (7) + ladder (10) + last page, minus overlaps
        assert!(pages.len() <= 18);
        assert!(numbers(&pages).contains(&10_000));
    }

    #[test]
    fn exact_page_boundary() {
        // 300 rows at 100 per page is exactly 3 pages
        let pages = build_pages(300, 100, 2, link);
        let numbers = numbers(&pages);
        assert_eq!(*numbers.last().unwrap(), 3);
        assert!(numbers.contains(&1));
        assert!(numbers.contains(&2));
    }
}
