//! Pure framing math.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::{
    Adjustment, BLUR_RANGE, BRIGHTNESS_RANGE, Filter, ImageStyle, OFFSET_RANGE, ObjectFit,
    Position, SCALE_RANGE, ZOOM_RANGE, clamp_or,
};

/// Final placement of one photo inside its frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderDescriptor {
    /// Legacy zoom times per-photo scale.
    pub combined_scale: f64,
    /// Horizontal crop origin, 0–100%.
    pub crop_origin_x: f64,
    /// Vertical crop origin, 0–100%.
    pub crop_origin_y: f64,
    pub object_fit: ObjectFit,
    /// Ordered filter chain; empty means no filter.
    pub filters: Vec<Filter>,
}

impl RenderDescriptor {
    /// `object-position` value, e.g. `50% 0%`.
    pub fn object_position_css(&self) -> String {
        format!("{}% {}%", self.crop_origin_x, self.crop_origin_y)
    }

    /// `transform` value, or `None` when the photo is not scaled.
    pub fn transform_css(&self) -> Option<String> {
        (self.combined_scale != 1.0).then(|| format!("scale({})", self.combined_scale))
    }

    /// `filter` value, or `None` when the chain is empty.
    pub fn filter_css(&self) -> Option<String> {
        if self.filters.is_empty() {
            return None;
        }
        let parts: Vec<String> = self.filters.iter().map(|f| f.to_css()).collect();
        Some(parts.join(" "))
    }

    /// Inline style declarations for an `<img>` inside a fixed-aspect frame.
    pub fn to_css(&self) -> String {
        let mut decls = vec![
            format!("object-fit: {}", self.object_fit.as_css()),
            format!("object-position: {}", self.object_position_css()),
        ];
        if let Some(transform) = self.transform_css() {
            decls.push(format!("transform: {transform}"));
            decls.push("transform-origin: center center".to_string());
        }
        if let Some(filter) = self.filter_css() {
            decls.push(format!("filter: {filter}"));
        }
        decls.join("; ")
    }
}

/// Compose a per-photo adjustment with an optional legacy page style.
///
/// Offsets subtract from the base origin: panning the visible window
/// rightward moves the anchored crop origin leftward. Every output is kept
/// in domain whatever the input.
///
/// # Examples
/// ```
/// # use scrapbook::framing::{Adjustment, ImageStyle, frame_transform};
/// let style = ImageStyle { position: "top".into(), ..ImageStyle::default() };
/// let d = frame_transform(&Adjustment::identity(), Some(&style));
/// assert_eq!((d.crop_origin_x, d.crop_origin_y), (50.0, 0.0));
/// assert_eq!(d.combined_scale, 1.0);
/// assert!(d.filters.is_empty());
/// ```
pub fn frame_transform(adjustment: &Adjustment, style: Option<&ImageStyle>) -> RenderDescriptor {
    let default_style = ImageStyle::default();
    let style = style.unwrap_or(&default_style);

    // Zero or negative zoom is treated as unset rather than clamped up.
    let zoom = if style.zoom > 0.0 {
        clamp_or(style.zoom, ZOOM_RANGE, 1.0)
    } else {
        1.0
    };
    let scale = clamp_or(adjustment.scale, SCALE_RANGE, 1.0);
    let offset_x = clamp_or(adjustment.offset_x, OFFSET_RANGE, 0.0);
    let offset_y = clamp_or(adjustment.offset_y, OFFSET_RANGE, 0.0);

    let (base_x, base_y) = Position::from_name(&style.position).origin();

    RenderDescriptor {
        combined_scale: zoom * scale,
        crop_origin_x: crop_origin(base_x, offset_x),
        crop_origin_y: crop_origin(base_y, offset_y),
        object_fit: ObjectFit::from_name(&style.fit),
        filters: filter_chain(style),
    }
}

/// Shift a base origin by a pan offset, clamped to 0–100%.
pub fn crop_origin(base: f64, offset: f64) -> f64 {
    (base - offset).clamp(0.0, 100.0)
}

/// Build the filter chain in fixed order: blur, brightness, grayscale.
fn filter_chain(style: &ImageStyle) -> Vec<Filter> {
    let mut filters = Vec::new();
    let blur = clamp_or(style.blur, BLUR_RANGE, 0.0);
    if blur > 0.0 {
        filters.push(Filter::Blur(blur));
    }
    let brightness = clamp_or(style.brightness, BRIGHTNESS_RANGE, 1.0);
    if brightness != 1.0 {
        filters.push(Filter::Brightness(brightness));
    }
    if style.grayscale {
        filters.push(Filter::Grayscale);
    }
    filters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adj(scale: f64, offset_x: f64, offset_y: f64) -> Adjustment {
        Adjustment {
            scale,
            offset_x,
            offset_y,
        }
    }

    fn style_at(position: &str) -> ImageStyle {
        ImageStyle {
            position: position.to_string(),
            ..ImageStyle::default()
        }
    }

    // =========================================================================
    // frame_transform tests
    // =========================================================================

    #[test]
    fn top_position_without_adjustment() {
        let d = frame_transform(&adj(1.0, 0.0, 0.0), Some(&style_at("top")));
        assert_eq!(d.crop_origin_x, 50.0);
        assert_eq!(d.crop_origin_y, 0.0);
        assert_eq!(d.combined_scale, 1.0);
        assert!(d.filters.is_empty());
        assert_eq!(d.object_fit, ObjectFit::Cover);
    }

    #[test]
    fn no_style_means_centered_cover() {
        let d = frame_transform(&Adjustment::identity(), None);
        assert_eq!((d.crop_origin_x, d.crop_origin_y), (50.0, 50.0));
        assert_eq!(d.object_fit, ObjectFit::Cover);
    }

    #[test]
    fn large_offset_clamps_origin_to_zero() {
        // 80 is out of domain: clamped to 50 first, 50 - 50 = 0
        let d = frame_transform(&adj(1.0, 80.0, 0.0), Some(&style_at("center")));
        assert_eq!(d.crop_origin_x, 0.0);
        assert_eq!(d.crop_origin_y, 50.0);
    }

    #[test]
    fn offset_from_corner_clamps_to_hundred() {
        // bottom-right (100, 100) panned left/up pushes origin past 100
        let d = frame_transform(&adj(1.0, -30.0, -30.0), Some(&style_at("bottom-right")));
        assert_eq!((d.crop_origin_x, d.crop_origin_y), (100.0, 100.0));
    }

    #[test]
    fn positive_offset_moves_origin_left() {
        let d = frame_transform(&adj(1.0, 20.0, -10.0), None);
        assert_eq!(d.crop_origin_x, 30.0);
        assert_eq!(d.crop_origin_y, 60.0);
    }

    #[test]
    fn zoom_and_scale_multiply() {
        let style = ImageStyle {
            zoom: 1.5,
            ..ImageStyle::default()
        };
        let d = frame_transform(&adj(1.2, 0.0, 0.0), Some(&style));
        assert!((d.combined_scale - 1.8).abs() < 1e-9);
    }

    #[test]
    fn scale_is_clamped_before_combining() {
        let d = frame_transform(&adj(10.0, 0.0, 0.0), None);
        assert_eq!(d.combined_scale, 2.0);
        let d = frame_transform(&adj(0.1, 0.0, 0.0), None);
        assert_eq!(d.combined_scale, 0.5);
    }

    #[test]
    fn huge_zoom_stays_finite() {
        let style = ImageStyle {
            zoom: f64::MAX,
            ..ImageStyle::default()
        };
        let d = frame_transform(&adj(2.0, 0.0, 0.0), Some(&style));
        assert!(d.combined_scale.is_finite());
        assert_eq!(d.combined_scale, ZOOM_RANGE.1 * SCALE_RANGE.1);
        assert!(!d.to_css().contains("inf"));

        let style = ImageStyle {
            zoom: 0.001,
            ..ImageStyle::default()
        };
        let d = frame_transform(&Adjustment::identity(), Some(&style));
        assert_eq!(d.combined_scale, ZOOM_RANGE.0);
    }

    #[test]
    fn non_finite_inputs_fall_back_to_defaults() {
        let style = ImageStyle {
            zoom: f64::NAN,
            ..ImageStyle::default()
        };
        let d = frame_transform(&adj(f64::INFINITY, f64::NAN, 0.0), Some(&style));
        assert_eq!(d.combined_scale, 1.0);
        assert_eq!(d.crop_origin_x, 50.0);
    }

    #[test]
    fn filter_chain_order() {
        let style = ImageStyle {
            blur: 2.0,
            brightness: 1.3,
            grayscale: true,
            ..ImageStyle::default()
        };
        let d = frame_transform(&Adjustment::identity(), Some(&style));
        assert_eq!(
            d.filters,
            vec![Filter::Blur(2.0), Filter::Brightness(1.3), Filter::Grayscale]
        );
        assert_eq!(
            d.filter_css().as_deref(),
            Some("blur(2px) brightness(1.3) grayscale(100%)")
        );
    }

    #[test]
    fn filter_values_are_clamped() {
        let style = ImageStyle {
            blur: 99.0,
            brightness: 7.0,
            ..ImageStyle::default()
        };
        let d = frame_transform(&Adjustment::identity(), Some(&style));
        assert_eq!(d.filters, vec![Filter::Blur(20.0), Filter::Brightness(2.0)]);
    }

    #[test]
    fn fit_passes_through() {
        let style = ImageStyle {
            fit: "contain".to_string(),
            ..ImageStyle::default()
        };
        let d = frame_transform(&Adjustment::identity(), Some(&style));
        assert_eq!(d.object_fit, ObjectFit::Contain);
    }

    #[test]
    fn deterministic() {
        let style = style_at("top-left");
        let a = adj(1.4, 12.0, -3.0);
        assert_eq!(
            frame_transform(&a, Some(&style)),
            frame_transform(&a, Some(&style))
        );
    }

    // =========================================================================
    // CSS rendering tests
    // =========================================================================

    #[test]
    fn css_omits_identity_transform_and_empty_filter() {
        let d = frame_transform(&Adjustment::identity(), None);
        assert_eq!(d.to_css(), "object-fit: cover; object-position: 50% 50%");
        assert_eq!(d.transform_css(), None);
        assert_eq!(d.filter_css(), None);
    }

    #[test]
    fn css_includes_scale_and_filter() {
        let style = ImageStyle {
            grayscale: true,
            ..ImageStyle::default()
        };
        let d = frame_transform(&adj(1.5, 10.0, 0.0), Some(&style));
        let css = d.to_css();
        assert!(css.contains("object-position: 40% 50%"));
        assert!(css.contains("transform: scale(1.5)"));
        assert!(css.contains("filter: grayscale(100%)"));
    }
}
