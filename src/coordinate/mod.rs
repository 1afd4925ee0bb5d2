//! Normalized ↔ absolute screen coordinate conversion.
//!
//! Normalized coordinates live in the integer range `[0, 1000]` on both axes
//! so that element addresses survive a change of screen resolution. All
//! scaling truncates toward zero; nothing here rounds to nearest.

pub mod bounds;
pub mod convert;
pub mod screen;

pub use bounds::{bounds_to_normalized, ElementBounds};
pub use convert::{
    absolute_to_normalized, normalized_area_to_center, normalized_to_absolute,
    validate_normalized_area, validate_normalized_coords,
};
pub use screen::{DeviceContext, ScreenBounds, ScreenSize};

/// Upper bound of the normalized coordinate space (inclusive).
pub const NORMALIZED_RANGE: i64 = 1000;

pub const DEFAULT_SCREEN_WIDTH: i64 = 1080;
pub const DEFAULT_SCREEN_HEIGHT: i64 = 2400;
