//! Static book generation.
//!
//! Renders the book as one HTML file per navigable unit: a single page in
//! single mode, the cover or a two-page spread in spread mode. Units link to
//! each other with prev/next links and a row of indicator dots, so the
//! generated book navigates exactly like the live viewer.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html    # Unit 0 (the cover)
//! ├── 1.html        # Unit 1 (pages 2-3 in spread mode)
//! ├── 2.html
//! └── ...
//! ```
//!
//! ## Layouts
//!
//! | Layout | Rendering |
//! |--------|-----------|
//! | `cover` | Title and caption |
//! | `photo_single` | One framed photo with caption |
//! | `quote_center` | Blockquote; also used for unknown layouts |
//! | `checklist` | Items parsed from `content` |
//! | `collage` | Up to `collage_max_photos` framed photos |
//! | `index` | Entries linked to the unit showing the target page |
//!
//! Every photo's inline style comes from [`frame_transform`]. Static assets
//! are embedded at compile time from `static/`.

use crate::config::{BookConfig, aspect_ratio_css};
use crate::content::{ContentError, parse_checklist, parse_index};
use crate::drive::transform_drive_link;
use crate::framing::frame_transform;
use crate::pagination::{
    ViewMode, anchors, landing_index, page_label, sort_pages, spread_index, visible_indices,
};
use crate::types::{Layout, MediaItem, Page};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("page {page}: {source}")]
    Content {
        page: String,
        #[source]
        source: ContentError,
    },
}

/// One written file.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedUnit {
    pub file: String,
    /// Orders of the pages shown, left to right.
    pub orders: Vec<f64>,
}

/// What [`generate`] wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateSummary {
    pub mode: ViewMode,
    pub units: Vec<GeneratedUnit>,
}

const CSS: &str = include_str!("../static/book.css");
const JS: &str = include_str!("../static/book.js");

/// File name of the unit at position `unit`.
pub fn unit_file(unit: usize) -> String {
    if unit == 0 {
        "index.html".to_string()
    } else {
        format!("{unit}.html")
    }
}

/// File of the unit that shows the page with `order`, if any.
pub fn unit_file_for_order(pages: &[Page], order: f64, mode: ViewMode) -> Option<String> {
    let index = pages.iter().position(|p| p.order == order)?;
    Some(unit_file(spread_index(landing_index(index, mode), mode)))
}

/// Render the book into `output_dir`.
pub fn generate(
    pages: &[Page],
    config: &BookConfig,
    mode: ViewMode,
    output_dir: &Path,
) -> Result<GenerateSummary, GenerateError> {
    let mut pages = pages.to_vec();
    sort_pages(&mut pages);
    let book = Book {
        pages: &pages,
        config,
        mode,
    };

    fs::create_dir_all(output_dir)?;

    let unit_anchors = anchors(pages.len(), mode);
    let mut units = Vec::with_capacity(unit_anchors.len());

    if unit_anchors.is_empty() {
        let content = html! { main.empty { p { "This book has no pages yet." } } };
        let doc = base_document("Scrapbook", config, content);
        fs::write(output_dir.join("index.html"), doc.into_string())?;
        warn!("book has no pages; wrote an empty index.html");
    }

    for (unit, &anchor) in unit_anchors.iter().enumerate() {
        let file = unit_file(unit);
        let doc = book.render_unit(unit, anchor, unit_anchors.len())?;
        fs::write(output_dir.join(&file), doc.into_string())?;

        let orders = match visible_indices(anchor, pages.len(), mode) {
            Some((first, second)) => std::iter::once(first)
                .chain(second)
                .map(|i| pages[i].order)
                .collect(),
            None => Vec::new(),
        };
        units.push(GeneratedUnit { file, orders });
    }

    info!(
        units = units.len(),
        ?mode,
        output = %output_dir.display(),
        "book generated"
    );
    Ok(GenerateSummary { mode, units })
}

/// Shared rendering context.
struct Book<'a> {
    pages: &'a [Page],
    config: &'a BookConfig,
    mode: ViewMode,
}

impl Book<'_> {
    fn render_unit(&self, unit: usize, anchor: usize, unit_count: usize) -> Result<Markup, GenerateError> {
        let total = self.pages.len();
        let (first, second) = visible_indices(anchor, total, self.mode).unwrap_or((anchor, None));

        let mut rendered = vec![self.render_page(&self.pages[first])?];
        if let Some(second) = second {
            rendered.push(self.render_page(&self.pages[second])?);
        }

        let prev = (unit > 0).then(|| unit_file(unit - 1));
        let next = (unit + 1 < unit_count).then(|| unit_file(unit + 1));
        let book_class = match self.mode {
            ViewMode::Single => "book single",
            ViewMode::Spread => "book spread",
        };
        let label = page_label(anchor, total, self.mode);

        let content = html! {
            main class=(book_class) {
                @for page in &rendered {
                    (page)
                }
            }
            nav.pager {
                a rel="prev" href=[prev.as_deref()] aria-disabled=[prev.is_none().then_some("true")] { "‹" }
                span.label { (label) }
                a rel="next" href=[next.as_deref()] aria-disabled=[next.is_none().then_some("true")] { "›" }
            }
            (self.render_dots(first, second))
            script { (PreEscaped(JS)) }
        };

        let title = match self.pages[first].content.lines().next() {
            Some(line) if self.pages[first].layout == Layout::Cover => line.to_string(),
            _ => format!("Scrapbook {label}"),
        };
        Ok(base_document(&title, self.config, content))
    }

    /// One dot per page, linked to the unit that shows it.
    fn render_dots(&self, first: usize, second: Option<usize>) -> Markup {
        html! {
            nav.dots {
                @for index in 0..self.pages.len() {
                    @let active = index == first || second == Some(index);
                    @let href = unit_file(spread_index(landing_index(index, self.mode), self.mode));
                    a class=[active.then_some("active")] href=(href) aria-label=(format!("Page {}", index + 1)) {}
                }
            }
        }
    }

    fn render_page(&self, page: &Page) -> Result<Markup, GenerateError> {
        let body = match &page.layout {
            Layout::Cover => render_cover(page),
            Layout::Photo => self.render_photo(page),
            Layout::Quote | Layout::Unknown(_) => render_quote(page),
            Layout::Checklist => render_checklist(page),
            Layout::Collage => self.render_collage(page),
            Layout::Index => self.render_index(page)?,
        };
        let layout_class = match &page.layout {
            Layout::Unknown(_) => "quote_center",
            other => other.tag(),
        };
        Ok(html! {
            section class=(format!("page {layout_class}")) id=(page.key()) {
                (body)
            }
        })
    }

    fn render_photo(&self, page: &Page) -> Markup {
        let ratio = aspect_ratio_css(self.config.frame.aspect_ratio);
        html! {
            figure {
                @match page.primary_photo() {
                    Some(item) => { (self.render_frame(page, &item, &ratio)) }
                    None => { div.frame.empty style=(format!("aspect-ratio: {ratio}")) {} }
                }
                @if !page.caption.is_empty() {
                    figcaption { (page.caption) }
                }
            }
        }
    }

    fn render_collage(&self, page: &Page) -> Markup {
        let ratio = aspect_ratio_css(self.config.frame.collage_aspect_ratio);
        let photos: Vec<MediaItem> = page
            .photos()
            .into_iter()
            .filter(|m| !m.url.is_empty())
            .take(self.config.frame.collage_max_photos)
            .collect();
        html! {
            div.collage {
                @for item in &photos {
                    (self.render_frame(page, item, &ratio))
                }
            }
            @if !page.caption.is_empty() {
                p.caption { (page.caption) }
            }
        }
    }

    fn render_frame(&self, page: &Page, item: &MediaItem, ratio: &str) -> Markup {
        let src = if self.config.images.rewrite_drive_links {
            transform_drive_link(&item.url)
        } else {
            item.url.clone()
        };
        let descriptor = frame_transform(&item.adjustment(), page.image_style.as_ref());
        html! {
            div.frame style=(format!("aspect-ratio: {ratio}")) {
                img src=(src) alt=(page.caption) loading="lazy" style=(descriptor.to_css());
            }
        }
    }

    fn render_index(&self, page: &Page) -> Result<Markup, GenerateError> {
        let entries = parse_index(&page.content).map_err(|source| GenerateError::Content {
            page: page.key(),
            source,
        })?;
        Ok(html! {
            h2 { (if page.caption.is_empty() { "Index" } else { page.caption.as_str() }) }
            ol.entries {
                @for entry in &entries {
                    li {
                        @match unit_file_for_order(self.pages, entry.page, self.mode) {
                            Some(href) => { a href=(href) { (entry.name) } }
                            None => { span.missing { (entry.name) } }
                        }
                    }
                }
            }
        })
    }
}

fn render_cover(page: &Page) -> Markup {
    html! {
        h1 { (page.content) }
        @if !page.caption.is_empty() {
            p.caption { (page.caption) }
        }
    }
}

fn render_quote(page: &Page) -> Markup {
    html! {
        blockquote { (page.content) }
        @if !page.caption.is_empty() {
            cite { (page.caption) }
        }
    }
}

fn render_checklist(page: &Page) -> Markup {
    let items = parse_checklist(&page.content);
    html! {
        @if !page.caption.is_empty() {
            h2 { (page.caption) }
        }
        ul {
            @for item in &items {
                li {
                    label {
                        input type="checkbox" checked[item.checked];
                        " "
                        (item.text)
                    }
                }
            }
        }
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, config: &BookConfig, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="es" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body data-swipe-threshold=(config.viewer.swipe_threshold) {
                (content)
            }
        }
    }
}
