//! Shared test utilities for the scrapbook test suite.
//!
//! Builders for pages and books, plus an engine wired to a [`ManualClock`] so
//! tests control when transitions settle.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let (mut engine, clock) = test_engine(6, ViewMode::Spread);
//! engine.next();
//! clock.advance(DEFAULT_SETTLE);
//! assert_visible_orders(&engine, &[1.0, 2.0]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::pagination::{DEFAULT_SETTLE, ManualClock, PaginationEngine, ViewMode};
use crate::types::{Layout, MediaItem, Page, parse_media_url};

// =========================================================================
// Page builders
// =========================================================================

/// A quote page with the given order.
pub fn quote_page(order: f64) -> Page {
    let mut page = Page::new(order, Layout::Quote);
    page.content = format!("Quote {order}");
    page
}

/// A photo page. `urls` is a comma-separated list.
pub fn photo_page(order: f64, urls: &str) -> Page {
    let mut page = Page::new(order, Layout::Photo);
    page.media = parse_media_url(urls);
    page
}

/// A collage page with one photo per URL.
pub fn collage_page(order: f64, urls: &[&str]) -> Page {
    let mut page = Page::new(order, Layout::Collage);
    page.media = urls.iter().map(|url| MediaItem::new(*url)).collect();
    page
}

/// A page with the given layout and content.
pub fn text_page(order: f64, layout: Layout, content: &str) -> Page {
    let mut page = Page::new(order, layout);
    page.content = content.to_string();
    page
}

/// `n` quote pages ordered `0..n`.
pub fn book(n: usize) -> Vec<Page> {
    (0..n).map(|i| quote_page(i as f64)).collect()
}

// =========================================================================
// Engine fixtures
// =========================================================================

/// An engine over [`book`]`(n)` driven by a manual clock.
pub fn test_engine(n: usize, mode: ViewMode) -> (PaginationEngine<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let engine = PaginationEngine::with_clock(book(n), mode, DEFAULT_SETTLE, clock.clone());
    (engine, clock)
}

/// Assert the orders of the page(s) currently on screen.
pub fn assert_visible_orders(engine: &PaginationEngine<ManualClock>, expected: &[f64]) {
    let visible = engine
        .visible_pages()
        .unwrap_or_else(|| panic!("no visible pages, expected {expected:?}"));
    let mut actual = vec![visible.first.order];
    actual.extend(visible.second.map(|p| p.order));
    assert_eq!(actual, expected, "visible pages at index {}", engine.current_index());
}

// =========================================================================
// Files
// =========================================================================

/// Write `pages` as `pages.json` into a fresh temp directory.
pub fn write_book(pages: &[Page]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_pages(tmp.path(), pages);
    tmp
}

pub fn write_pages(dir: &Path, pages: &[Page]) {
    let json = serde_json::to_string_pretty(pages).unwrap();
    std::fs::write(dir.join("pages.json"), json).unwrap();
}
