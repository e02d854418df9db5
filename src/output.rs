//! CLI output formatting.
//!
//! Every entity display leads with a positional index and a short identity,
//! with details as indented context lines:
//!
//! ## Check
//!
//! ```text
//! Pages (3)
//! 001 cover Nuestra Historia
//!     Order: 0
//! 002 photo_single Reserva Moreno
//!     Order: 1
//!     Photos: 1
//! 003 timeline (unknown layout, shown as quote)
//!     Order: 2
//! ```
//!
//! ## Spreads
//!
//! ```text
//! Spread mode: 3 units
//! 001 index.html  1 / 4
//!     0 cover Nuestra Historia
//! 002 1.html  2 - 3 / 4
//!     1 photo_single Reserva Moreno
//!     2 quote_center Contigo todo
//! ```
//!
//! ## Frame
//!
//! ```text
//! Page 1 (photo_single), 1 photo
//! 001 https://lh3.googleusercontent.com/d/abc123
//!     object-fit: cover
//!     object-position: 50% 0%
//!     transform: scale(1.2)
//! ```
//!
//! ## Build
//!
//! ```text
//! index.html → 0
//! 1.html → 1, 2
//! Generated 2 files (spread mode) in dist
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::framing::frame_transform;
use crate::generate::{GenerateSummary, unit_file};
use crate::pagination::{ViewMode, anchors, page_label, sort_pages, visible_indices};
use crate::types::{Layout, Page};
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

fn mode_name(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Single => "single",
        ViewMode::Spread => "spread",
    }
}

/// One-line identity of a page: layout tag plus the first line of its text.
fn page_identity(page: &Page) -> String {
    let text = page
        .content
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or(page.caption.trim());
    let tag = match &page.layout {
        Layout::Unknown(tag) if tag.is_empty() => "(no layout)".to_string(),
        other => other.tag().to_string(),
    };
    if text.is_empty() {
        tag
    } else {
        format!("{} {}", tag, truncate_desc(text, 40))
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format the page inventory in reading order.
pub fn format_page_list(pages: &[Page]) -> Vec<String> {
    let mut sorted = pages.to_vec();
    sort_pages(&mut sorted);

    let mut lines = vec![format!("Pages ({})", sorted.len())];
    for (i, page) in sorted.iter().enumerate() {
        let mut header = format!("{} {}", format_index(i + 1), page_identity(page));
        if matches!(page.layout, Layout::Unknown(_)) {
            header.push_str(" (unknown layout, shown as quote)");
        }
        lines.push(header);
        lines.push(format!("{}Order: {}", indent(1), page.order));
        if !page.section.is_empty() {
            lines.push(format!("{}Section: {}", indent(1), page.section));
        }
        let photos = page.photos().len();
        if photos > 0 {
            lines.push(format!("{}Photos: {}", indent(1), photos));
        }
    }
    lines
}

pub fn print_page_list(pages: &[Page]) {
    for line in format_page_list(pages) {
        println!("{}", line);
    }
}

// ============================================================================
// Spreads
// ============================================================================

/// Format every navigable unit for `mode` with the pages it shows.
pub fn format_spreads(pages: &[Page], mode: ViewMode) -> Vec<String> {
    let mut sorted = pages.to_vec();
    sort_pages(&mut sorted);
    let total = sorted.len();
    let unit_anchors = anchors(total, mode);

    let heading = match mode {
        ViewMode::Single => "Single",
        ViewMode::Spread => "Spread",
    };
    let mut lines = vec![format!("{} mode: {} units", heading, unit_anchors.len())];
    for (unit, &anchor) in unit_anchors.iter().enumerate() {
        lines.push(format!(
            "{} {}  {}",
            format_index(unit + 1),
            unit_file(unit),
            page_label(anchor, total, mode)
        ));
        if let Some((first, second)) = visible_indices(anchor, total, mode) {
            for index in std::iter::once(first).chain(second) {
                lines.push(format!(
                    "{}{} {}",
                    indent(1),
                    index,
                    page_identity(&sorted[index])
                ));
            }
        }
    }
    lines
}

pub fn print_spreads(pages: &[Page], mode: ViewMode) {
    for line in format_spreads(pages, mode) {
        println!("{}", line);
    }
}

// ============================================================================
// Frame
// ============================================================================

/// Format the render descriptor of each photo on `page`.
pub fn format_frame(page: &Page) -> Vec<String> {
    let photos = page.photos();
    let noun = if photos.len() == 1 { "photo" } else { "photos" };
    let mut lines = vec![format!(
        "Page {} ({}), {} {}",
        page.order,
        page.layout.tag(),
        photos.len(),
        noun
    )];
    for (i, item) in photos.iter().enumerate() {
        let descriptor = frame_transform(&item.adjustment(), page.image_style.as_ref());
        lines.push(format!("{} {}", format_index(i + 1), item.url));
        lines.push(format!(
            "{}object-fit: {}",
            indent(1),
            descriptor.object_fit.as_css()
        ));
        lines.push(format!(
            "{}object-position: {}",
            indent(1),
            descriptor.object_position_css()
        ));
        if let Some(transform) = descriptor.transform_css() {
            lines.push(format!("{}transform: {}", indent(1), transform));
        }
        if let Some(filter) = descriptor.filter_css() {
            lines.push(format!("{}filter: {}", indent(1), filter));
        }
    }
    lines
}

pub fn print_frame(page: &Page) {
    for line in format_frame(page) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

/// Format the files written by a build.
pub fn format_generate_summary(summary: &GenerateSummary, output_dir: &Path) -> Vec<String> {
    let mut lines: Vec<String> = summary
        .units
        .iter()
        .map(|unit| {
            let orders: Vec<String> = unit.orders.iter().map(|o| o.to_string()).collect();
            format!("{} → {}", unit.file, orders.join(", "))
        })
        .collect();
    let noun = if summary.units.len() == 1 { "file" } else { "files" };
    lines.push(format!(
        "Generated {} {} ({} mode) in {}",
        summary.units.len(),
        noun,
        mode_name(summary.mode),
        output_dir.display()
    ));
    lines
}

pub fn print_generate_summary(summary: &GenerateSummary, output_dir: &Path) {
    for line in format_generate_summary(summary, output_dir) {
        println!("{}", line);
    }
}
