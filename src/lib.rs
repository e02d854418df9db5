//! # Scrapbook
//!
//! A flipbook-style digital scrapbook: themed pages (cover, photo, quote,
//! checklist, collage, index) read in order, one page at a time on narrow
//! screens and as two-page spreads on wide ones.
//!
//! # Architecture: One-Way Data Flow
//!
//! ```text
//! store (pages.json)  →  PaginationEngine  →  visible page(s)  →  frame_transform per photo
//!     PageSource            view state            layouts           render descriptor
//! ```
//!
//! The store hands out snapshots; the engine never writes back. Everything
//! the engine and the framing math compute is a pure function of their
//! inputs plus, for the transition lock, an injectable clock.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`pagination`] | Single/spread navigation, spread alignment, transition lock |
//! | [`framing`] | Per-photo crop/pan/zoom composed with the legacy page style |
//! | [`input`] | Keys, swipes, indicator and index clicks to navigation commands |
//! | [`types`] | Page records, layouts, media items |
//! | [`content`] | Checklist and index parsing |
//! | [`store`] | `PageSource` and the JSON file store with admin operations |
//! | [`drive`] | Google Drive sharing link rewriting |
//! | [`config`] | `config.toml` loading, merging, and validation |
//! | [`generate`] | Static HTML rendering, one file per navigable unit, using Maud |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Cover Stands Alone
//!
//! In spread mode page 0 is shown by itself and the remaining pages pair up
//! `(1, 2)`, `(3, 4)`, ... so spreads are anchored on odd indices. This is
//! how a printed book opens: the cover on the right, then facing pages.
//!
//! ## Deadline Lock, Not Animation Callback
//!
//! A page turn holds a lock for the settle duration (700 ms by default). The
//! lock is a deadline tagged with a transition id, checked lazily against a
//! [`pagination::Clock`]. An animation may release it early with its id; a
//! lost callback costs nothing more than waiting for the deadline.
//!
//! ## Clamping Over Failing
//!
//! The core never errors. Out-of-range navigation is an ignored request with
//! a reason; out-of-range framing numbers are clamped. Errors exist only at
//! the edges: reading files, parsing config, and parsing index content.

pub mod config;
pub mod content;
pub mod drive;
pub mod framing;
pub mod generate;
pub mod input;
pub mod output;
pub mod pagination;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
