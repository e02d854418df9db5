//! Page storage.
//!
//! The book reads its pages through [`PageSource`], which hands out a full
//! snapshot each time. [`JsonStore`] is the file-backed implementation: a JSON
//! array of page records, the same shape the seed data uses.
//!
//! ## Media Normalization
//!
//! Older records only carry `mediaUrl`, a comma-separated list of photo URLs.
//! On load those become a `media` list with default adjustments; on save the
//! `mediaUrl` field is rewritten from `media` so older readers keep working.
//!
//! ## Ordering
//!
//! Orders must be finite and unique. The admin operations keep that true:
//! moves swap orders with the neighbour and [`JsonStore::reorder`] renumbers
//! the whole book `1..=n`.

use crate::pagination::sort_pages;
use crate::types::{Layout, Page, parse_media_url};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("two pages share order {0}")]
    DuplicateOrder(f64),
    #[error("page {0} has a non-finite order")]
    InvalidOrder(String),
    #[error("no page with id {0}")]
    NotFound(String),
}

/// Anything that can hand the viewer its pages.
pub trait PageSource {
    /// Every page, in any order. Callers sort.
    fn snapshot(&self) -> Result<Vec<Page>, StoreError>;
}

impl PageSource for Vec<Page> {
    fn snapshot(&self) -> Result<Vec<Page>, StoreError> {
        Ok(self.clone())
    }
}

/// Fill `media` from the legacy `mediaUrl` when it is empty.
pub fn normalize_media(page: &mut Page) {
    if page.media.is_empty() && !page.media_url.trim().is_empty() {
        page.media = parse_media_url(&page.media_url);
    }
}

/// Rewrite `mediaUrl` from `media`. Pages without media keep their value.
pub fn denormalize_media(page: &mut Page) {
    if !page.media.is_empty() {
        page.media_url = page
            .media
            .iter()
            .map(|m| m.url.as_str())
            .collect::<Vec<_>>()
            .join(", ");
    }
}

/// Check orders are finite and unique. Expects `pages` sorted.
fn check_orders(pages: &[Page]) -> Result<(), StoreError> {
    if let Some(bad) = pages.iter().find(|p| !p.order.is_finite()) {
        return Err(StoreError::InvalidOrder(describe(bad)));
    }
    match pages.windows(2).find(|w| w[0].order == w[1].order) {
        Some(pair) => Err(StoreError::DuplicateOrder(pair[0].order)),
        None => Ok(()),
    }
}

fn describe(page: &Page) -> String {
    page.id.clone().unwrap_or_else(|| page.key())
}

/// A book stored as one JSON file.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    /// Always sorted by order.
    pages: Vec<Page>,
}

impl JsonStore {
    /// Load the store at `path`. A missing file is an empty book.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let pages: Vec<Page> = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            Vec::new()
        };
        let store = Self::from_pages(path, pages)?;
        info!(path = %store.path.display(), pages = store.pages.len(), "store loaded");
        Ok(store)
    }

    /// Build a store from records already in memory.
    pub fn from_pages(path: impl Into<PathBuf>, mut pages: Vec<Page>) -> Result<Self, StoreError> {
        for page in &mut pages {
            normalize_media(page);
            if let Layout::Unknown(tag) = &page.layout {
                warn!(page = %describe(page), layout = %tag, "unknown layout, rendering as quote");
            }
        }
        sort_pages(&mut pages);
        check_orders(&pages)?;
        Ok(Self {
            path: path.into(),
            pages,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pages in reading order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn get(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id.as_deref() == Some(id))
    }

    /// Order for a page appended at the end: one past the highest, or 1.
    pub fn next_order(&self) -> f64 {
        self.pages
            .iter()
            .map(|p| p.order)
            .reduce(f64::max)
            .map_or(1.0, |max| max + 1.0)
    }

    /// Insert a page and return its id.
    ///
    /// Without an explicit `order` the page goes at the end. A page without
    /// an id gets a fresh one.
    pub fn add(&mut self, mut page: Page, order: Option<f64>) -> Result<String, StoreError> {
        page.order = order.unwrap_or_else(|| self.next_order());
        let id = page
            .id
            .get_or_insert_with(|| Uuid::new_v4().to_string())
            .clone();
        normalize_media(&mut page);

        let mut pages = self.pages.clone();
        pages.push(page);
        self.commit(pages)?;
        info!(%id, "page added");
        Ok(id)
    }

    /// Replace the page with `id`. The stored id is kept.
    pub fn update(&mut self, id: &str, mut page: Page) -> Result<(), StoreError> {
        let index = self.position(id)?;
        page.id = Some(id.to_string());
        normalize_media(&mut page);

        let mut pages = self.pages.clone();
        pages[index] = page;
        self.commit(pages)?;
        info!(%id, "page updated");
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<Page, StoreError> {
        let index = self.position(id)?;
        let mut pages = self.pages.clone();
        let removed = pages.remove(index);
        self.commit(pages)?;
        info!(%id, "page deleted");
        Ok(removed)
    }

    /// Swap the page with its predecessor. Returns false at the front.
    pub fn move_up(&mut self, id: &str) -> Result<bool, StoreError> {
        let index = self.position(id)?;
        if index == 0 {
            return Ok(false);
        }
        self.swap_orders(index - 1, index);
        Ok(true)
    }

    /// Swap the page with its successor. Returns false at the back.
    pub fn move_down(&mut self, id: &str) -> Result<bool, StoreError> {
        let index = self.position(id)?;
        if index + 1 >= self.pages.len() {
            return Ok(false);
        }
        self.swap_orders(index, index + 1);
        Ok(true)
    }

    /// Renumber every page `1..=n` keeping the current sequence.
    pub fn reorder(&mut self) {
        for (i, page) in self.pages.iter_mut().enumerate() {
            page.order = (i + 1) as f64;
        }
        info!(pages = self.pages.len(), "pages renumbered");
    }

    /// Write the store back to its file as pretty-printed JSON.
    pub fn save(&self) -> Result<(), StoreError> {
        let records: Vec<Page> = self
            .pages
            .iter()
            .cloned()
            .map(|mut page| {
                denormalize_media(&mut page);
                page
            })
            .collect();
        let json = serde_json::to_string_pretty(&records)?;
        fs::write(&self.path, json)?;
        info!(path = %self.path.display(), pages = records.len(), "store saved");
        Ok(())
    }

    fn position(&self, id: &str) -> Result<usize, StoreError> {
        self.pages
            .iter()
            .position(|p| p.id.as_deref() == Some(id))
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Swap two neighbours' orders. Sorted order is preserved by swapping the
    /// records too.
    fn swap_orders(&mut self, a: usize, b: usize) {
        let order_a = self.pages[a].order;
        self.pages[a].order = self.pages[b].order;
        self.pages[b].order = order_a;
        self.pages.swap(a, b);
    }

    /// Validate a candidate page list and adopt it.
    fn commit(&mut self, mut pages: Vec<Page>) -> Result<(), StoreError> {
        sort_pages(&mut pages);
        check_orders(&pages)?;
        self.pages = pages;
        Ok(())
    }
}

impl PageSource for JsonStore {
    fn snapshot(&self) -> Result<Vec<Page>, StoreError> {
        Ok(self.pages.clone())
    }
}
