//! Parameter types for photo framing.
//!
//! These structs describe *what* a photo's framing should be, not how it is
//! drawn. They are the interface between stored page data and the pure
//! [`calculations`](super::calculations) that produce a
//! [`RenderDescriptor`](super::RenderDescriptor).
//!
//! ## Types
//!
//! - [`Adjustment`]: Per-photo zoom and pan, as saved by the cropper.
//! - [`ImageStyle`]: Legacy page-level style (zoom, named position, fit, filters).
//! - [`Position`]: Named crop anchors (`center`, `top`, `bottom-left`, ...).
//! - [`ObjectFit`]: How the image fills its frame.
//! - [`Filter`]: One entry of the CSS filter chain.

use serde::{Deserialize, Serialize};

/// Allowed per-photo zoom factor.
pub const SCALE_RANGE: (f64, f64) = (0.5, 2.0);
/// Allowed legacy page-level zoom.
pub const ZOOM_RANGE: (f64, f64) = (0.1, 5.0);
/// Allowed pan offset, in percentage points, on either axis.
pub const OFFSET_RANGE: (f64, f64) = (-50.0, 50.0);
/// Allowed blur radius in pixels.
pub const BLUR_RANGE: (f64, f64) = (0.0, 20.0);
/// Allowed brightness multiplier.
pub const BRIGHTNESS_RANGE: (f64, f64) = (0.0, 2.0);

/// Per-photo zoom and pan.
///
/// Positive `offset_x` pans the visible window rightward across the source
/// image; positive `offset_y` pans it downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustment {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Adjustment {
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    /// Discard all changes.
    pub fn reset(&mut self) {
        *self = Self::identity();
    }

    /// True when saving this adjustment would change nothing.
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Clamp every field to its domain and round the way the cropper saves:
    /// scale to two decimals, offsets to one.
    pub fn normalized(&self) -> Self {
        Self {
            scale: round_to(clamp_or(self.scale, SCALE_RANGE, 1.0), 2),
            offset_x: round_to(clamp_or(self.offset_x, OFFSET_RANGE, 0.0), 1),
            offset_y: round_to(clamp_or(self.offset_y, OFFSET_RANGE, 0.0), 1),
        }
    }

    /// Pan so that the pointer stays where the drag started.
    ///
    /// `drag_start` is the pointer position minus the offsets at the moment
    /// the drag began; the result is clamped to [`OFFSET_RANGE`].
    pub fn dragged(&self, drag_start: (f64, f64), pointer: (f64, f64)) -> Self {
        Self {
            scale: self.scale,
            offset_x: clamp_or(pointer.0 - drag_start.0, OFFSET_RANGE, 0.0),
            offset_y: clamp_or(pointer.1 - drag_start.1, OFFSET_RANGE, 0.0),
        }
    }
}

impl Default for Adjustment {
    fn default() -> Self {
        Self::identity()
    }
}

/// Clamp `value` into `range`, substituting `fallback` for NaN or infinities.
pub(crate) fn clamp_or(value: f64, range: (f64, f64), fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(range.0, range.1)
    } else {
        fallback
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Legacy page-level image style.
///
/// Older pages carry one style for all of their photos. Every field is
/// optional in storage; [`ImageStyle::default`] is the neutral style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageStyle {
    /// Zoom multiplier (1 = 100%). Multiplies with the per-photo scale.
    pub zoom: f64,
    /// Named crop anchor, see [`Position`].
    pub position: String,
    /// CSS object-fit keyword, see [`ObjectFit`].
    pub fit: String,
    /// Blur radius in pixels (0–20).
    pub blur: f64,
    /// Brightness multiplier (0–2, 1 = unchanged).
    pub brightness: f64,
    pub grayscale: bool,
}

impl Default for ImageStyle {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            position: "center".to_string(),
            fit: "cover".to_string(),
            blur: 0.0,
            brightness: 1.0,
            grayscale: false,
        }
    }
}

/// Named crop anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Center,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Position {
    /// Parse a position name. Unknown names fall back to [`Position::Center`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "top" => Self::Top,
            "bottom" => Self::Bottom,
            "left" => Self::Left,
            "right" => Self::Right,
            "top-left" => Self::TopLeft,
            "top-right" => Self::TopRight,
            "bottom-left" => Self::BottomLeft,
            "bottom-right" => Self::BottomRight,
            _ => Self::Center,
        }
    }

    /// Base crop origin as `(x%, y%)`.
    pub fn origin(self) -> (f64, f64) {
        match self {
            Self::Center => (50.0, 50.0),
            Self::Top => (50.0, 0.0),
            Self::Bottom => (50.0, 100.0),
            Self::Left => (0.0, 50.0),
            Self::Right => (100.0, 50.0),
            Self::TopLeft => (0.0, 0.0),
            Self::TopRight => (100.0, 0.0),
            Self::BottomLeft => (0.0, 100.0),
            Self::BottomRight => (100.0, 100.0),
        }
    }
}

/// CSS `object-fit` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectFit {
    #[default]
    Cover,
    Contain,
    Fill,
    ScaleDown,
    None,
}

impl ObjectFit {
    /// Parse a fit keyword. Unknown keywords fall back to [`ObjectFit::Cover`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "contain" => Self::Contain,
            "fill" => Self::Fill,
            "scale-down" => Self::ScaleDown,
            "none" => Self::None,
            _ => Self::Cover,
        }
    }

    pub fn as_css(self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Contain => "contain",
            Self::Fill => "fill",
            Self::ScaleDown => "scale-down",
            Self::None => "none",
        }
    }
}

/// One CSS filter function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Filter {
    /// Blur radius in pixels.
    Blur(f64),
    Brightness(f64),
    Grayscale,
}

impl Filter {
    pub fn to_css(self) -> String {
        match self {
            Self::Blur(px) => format!("blur({px}px)"),
            Self::Brightness(b) => format!("brightness({b})"),
            Self::Grayscale => "grayscale(100%)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_default() {
        assert_eq!(Adjustment::default(), Adjustment::identity());
        assert!(Adjustment::default().is_identity());
    }

    #[test]
    fn reset_returns_to_identity() {
        let mut adj = Adjustment {
            scale: 1.7,
            offset_x: 4.0,
            offset_y: -9.5,
        };
        assert!(!adj.is_identity());
        adj.reset();
        assert!(adj.is_identity());
    }

    #[test]
    fn normalized_rounds_like_the_cropper() {
        let adj = Adjustment {
            scale: 1.23456,
            offset_x: 12.345,
            offset_y: -7.06,
        };
        let n = adj.normalized();
        assert_eq!(n.scale, 1.23);
        assert_eq!(n.offset_x, 12.3);
        assert_eq!(n.offset_y, -7.1);
    }

    #[test]
    fn normalized_clamps_out_of_range() {
        let adj = Adjustment {
            scale: 5.0,
            offset_x: -80.0,
            offset_y: f64::NAN,
        };
        let n = adj.normalized();
        assert_eq!(n.scale, 2.0);
        assert_eq!(n.offset_x, -50.0);
        assert_eq!(n.offset_y, 0.0);
    }

    #[test]
    fn drag_clamps_offsets() {
        let adj = Adjustment::identity();
        let dragged = adj.dragged((100.0, 100.0), (300.0, 90.0));
        assert_eq!(dragged.offset_x, 50.0);
        assert_eq!(dragged.offset_y, -10.0);
        assert_eq!(dragged.scale, 1.0);
    }

    #[test]
    fn position_table() {
        assert_eq!(Position::from_name("center").origin(), (50.0, 50.0));
        assert_eq!(Position::from_name("top").origin(), (50.0, 0.0));
        assert_eq!(Position::from_name("bottom").origin(), (50.0, 100.0));
        assert_eq!(Position::from_name("left").origin(), (0.0, 50.0));
        assert_eq!(Position::from_name("right").origin(), (100.0, 50.0));
        assert_eq!(Position::from_name("top-left").origin(), (0.0, 0.0));
        assert_eq!(Position::from_name("top-right").origin(), (100.0, 0.0));
        assert_eq!(Position::from_name("bottom-left").origin(), (0.0, 100.0));
        assert_eq!(Position::from_name("bottom-right").origin(), (100.0, 100.0));
    }

    #[test]
    fn unknown_position_is_center() {
        assert_eq!(Position::from_name("diagonal"), Position::Center);
        assert_eq!(Position::from_name(""), Position::Center);
    }

    #[test]
    fn unknown_fit_is_cover() {
        assert_eq!(ObjectFit::from_name("contain"), ObjectFit::Contain);
        assert_eq!(ObjectFit::from_name("stretch"), ObjectFit::Cover);
    }

    #[test]
    fn filter_css() {
        assert_eq!(Filter::Blur(4.0).to_css(), "blur(4px)");
        assert_eq!(Filter::Brightness(1.2).to_css(), "brightness(1.2)");
        assert_eq!(Filter::Grayscale.to_css(), "grayscale(100%)");
    }

    #[test]
    fn image_style_defaults_fill_missing_fields() {
        let style: ImageStyle = serde_json::from_str(r#"{"zoom": 1.5}"#).unwrap();
        assert_eq!(style.zoom, 1.5);
        assert_eq!(style.position, "center");
        assert_eq!(style.fit, "cover");
        assert_eq!(style.brightness, 1.0);
        assert!(!style.grayscale);
    }
}
