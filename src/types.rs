//! Page records shared by the store, the pagination engine, and the renderer.
//!
//! Records are serialized with camelCase keys (`mediaUrl`, `imageStyle`,
//! `offsetX`) so the JSON page files written by older versions of the book
//! load unchanged.

use crate::framing::{Adjustment, ImageStyle};
use serde::{Deserialize, Serialize};

/// One unit of content in the book.
///
/// `order` defines the reading sequence. It need not be an integer or
/// contiguous: a page with order `2.5` slots between `2` and `3`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Store-assigned identifier. Absent in hand-written seed files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub order: f64,
    #[serde(default)]
    pub layout: Layout,
    /// Main text: cover title, quote, checklist items, or index entries.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub caption: String,
    /// Thematic section name, used by the admin list only.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub section: String,
    /// Legacy comma-separated photo URLs. Superseded by `media`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub media_url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<MediaItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stickers: Vec<String>,
    /// Legacy page-level style applied on top of every photo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_style: Option<ImageStyle>,
}

impl Page {
    /// A blank page with the given order and layout.
    pub fn new(order: f64, layout: Layout) -> Self {
        Self {
            id: None,
            order,
            layout,
            content: String::new(),
            caption: String::new(),
            section: String::new(),
            media_url: String::new(),
            media: Vec::new(),
            stickers: Vec::new(),
            image_style: None,
        }
    }

    /// Stable key derived from the page order, e.g. `page-3`.
    pub fn key(&self) -> String {
        format!("page-{}", self.order)
    }

    /// Photos for this page: the `media` list, or the legacy `media_url`
    /// split into default-adjusted items when `media` is empty.
    pub fn photos(&self) -> Vec<MediaItem> {
        if self.media.is_empty() {
            parse_media_url(&self.media_url)
        } else {
            self.media.clone()
        }
    }

    /// The photo a single-photo layout shows, if it has a URL.
    pub fn primary_photo(&self) -> Option<MediaItem> {
        self.photos().into_iter().next().filter(|m| !m.url.is_empty())
    }
}

/// Split a legacy comma-separated URL list into default-adjusted items.
pub fn parse_media_url(media_url: &str) -> Vec<MediaItem> {
    media_url
        .split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(MediaItem::new)
        .collect()
}

/// Page layout, one variant per template.
///
/// Stored as a plain tag string. Unrecognized tags are kept verbatim in
/// [`Layout::Unknown`] rather than coerced to a known layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Layout {
    Cover,
    /// `photo_single` (alias `photo`).
    Photo,
    /// `quote_center` (alias `quote`).
    Quote,
    Checklist,
    Collage,
    Index,
    Unknown(String),
}

impl Layout {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "cover" => Self::Cover,
            "photo_single" | "photo" => Self::Photo,
            "quote_center" | "quote" => Self::Quote,
            "checklist" => Self::Checklist,
            "collage" => Self::Collage,
            "index" => Self::Index,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Canonical tag. Unknown layouts return their original tag.
    pub fn tag(&self) -> &str {
        match self {
            Self::Cover => "cover",
            Self::Photo => "photo_single",
            Self::Quote => "quote_center",
            Self::Checklist => "checklist",
            Self::Collage => "collage",
            Self::Index => "index",
            Self::Unknown(tag) => tag,
        }
    }

    /// Whether this layout displays photos.
    pub fn shows_photos(&self) -> bool {
        matches!(self, Self::Photo | Self::Collage)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl From<String> for Layout {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<Layout> for String {
    fn from(layout: Layout) -> Self {
        layout.tag().to_string()
    }
}

/// One photo plus its crop adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub url: String,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub offset_x: f64,
    #[serde(default)]
    pub offset_y: f64,
}

fn default_scale() -> f64 {
    1.0
}

impl MediaItem {
    /// A photo with the identity adjustment.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    pub fn adjustment(&self) -> Adjustment {
        Adjustment {
            scale: self.scale,
            offset_x: self.offset_x,
            offset_y: self.offset_y,
        }
    }

    /// Replace the adjustment with its saved (clamped, rounded) form.
    pub fn with_adjustment(mut self, adjustment: Adjustment) -> Self {
        let saved = adjustment.normalized();
        self.scale = saved.scale;
        self.offset_x = saved.offset_x;
        self.offset_y = saved.offset_y;
        self
    }
}
