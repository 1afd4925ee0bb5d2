use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::coordinate::{DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH};
use crate::errors::{CoordinateError, CoordinateResult};

/// Pixel dimensions of the target screen. Both sides are strictly positive;
/// the fields are private so every instance has passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawScreenSize")]
pub struct ScreenSize {
    width: i64,
    height: i64,
}

#[derive(Deserialize)]
struct RawScreenSize {
    width: i64,
    height: i64,
}

impl TryFrom<RawScreenSize> for ScreenSize {
    type Error = CoordinateError;

    fn try_from(raw: RawScreenSize) -> CoordinateResult<Self> {
        Self::new(raw.width, raw.height)
    }
}

/// `screen_bounds` entry of a device context. Missing keys fall back to defaults.
/// Backends sometimes report dimensions as floats; whole values like `1080.0`
/// are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenBounds {
    #[serde(
        default,
        deserialize_with = "whole_dimension",
        skip_serializing_if = "Option::is_none"
    )]
    pub width: Option<i64>,
    #[serde(
        default,
        deserialize_with = "whole_dimension",
        skip_serializing_if = "Option::is_none"
    )]
    pub height: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDimension {
    Int(i64),
    Float(f64),
}

// Integers beyond this lose precision as f64.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

fn whole_dimension<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawDimension>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawDimension::Int(v)) => Ok(Some(v)),
        Some(RawDimension::Float(v)) if v.fract() == 0.0 && v.abs() <= MAX_EXACT_FLOAT => {
            Ok(Some(v as i64))
        }
        Some(RawDimension::Float(v)) => Err(D::Error::custom(format!(
            "screen dimension {v} is not a whole number"
        ))),
    }
}

/// Device description reported by the automation backend. Only the screen
/// bounds are read here; other keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_bounds: Option<ScreenBounds>,
}

impl ScreenSize {
    pub fn new(width: i64, height: i64) -> CoordinateResult<Self> {
        if width <= 0 {
            return Err(CoordinateError::NonPositiveDimension { dimension: "width", value: width });
        }
        if height <= 0 {
            return Err(CoordinateError::NonPositiveDimension { dimension: "height", value: height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> i64 {
        self.width
    }

    pub fn height(&self) -> i64 {
        self.height
    }

    /// Resolve the screen size from a device context, defaulting to 1080×2400.
    pub fn from_device_context(ctx: &DeviceContext) -> CoordinateResult<Self> {
        Self::from_device_context_or(ctx, DEFAULT_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT)
    }

    /// Like [`ScreenSize::from_device_context`] with caller-chosen defaults
    /// for each missing key.
    pub fn from_device_context_or(
        ctx: &DeviceContext,
        default_width: i64,
        default_height: i64,
    ) -> CoordinateResult<Self> {
        let bounds = ctx.screen_bounds.clone().unwrap_or_default();
        let width = bounds.width.unwrap_or(default_width);
        let height = bounds.height.unwrap_or(default_height);

        if width <= 0 || height <= 0 {
            return Err(CoordinateError::InvalidScreenDimensions { width, height });
        }
        tracing::trace!(width, height, "screen size resolved from device context");
        Ok(Self { width, height })
    }

    /// Resolve from an untyped JSON device context such as `{"screen_bounds": {"width": 720}}`.
    pub fn from_device_context_json(value: &serde_json::Value) -> CoordinateResult<Self> {
        let ctx = DeviceContext::deserialize(value)?;
        Self::from_device_context(&ctx)
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCREEN_WIDTH,
            height: DEFAULT_SCREEN_HEIGHT,
        }
    }
}

impl fmt::Display for ScreenSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
