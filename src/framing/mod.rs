//! Photo framing: crop, pan, and zoom inside a fixed-aspect frame.
//!
//! | Concern | Where |
//! |---|---|
//! | **Per-photo adjustment** | [`Adjustment`] (scale + pan offsets) |
//! | **Legacy page style** | [`ImageStyle`] (zoom, named position, fit, filters) |
//! | **Composition** | [`frame_transform`] → [`RenderDescriptor`] |
//!
//! The module is split into:
//! - **Parameters**: Data structures describing a photo's framing
//! - **Calculations**: Pure functions composing them (unit testable)

mod calculations;
mod params;

pub use calculations::{RenderDescriptor, crop_origin, frame_transform};
pub use params::{
    Adjustment, BLUR_RANGE, BRIGHTNESS_RANGE, Filter, ImageStyle, OFFSET_RANGE, ObjectFit,
    Position, SCALE_RANGE, ZOOM_RANGE,
};
