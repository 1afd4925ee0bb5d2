use std::fmt;

use thiserror::Error;

/// Coordinate axis named in error messages. The alternate form (`{:#}`) is lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, f.alternate()) {
            (Axis::X, false) => f.write_str("X"),
            (Axis::Y, false) => f.write_str("Y"),
            (Axis::X, true) => f.write_str("x"),
            (Axis::Y, true) => f.write_str("y"),
        }
    }
}

/// Caller-supplied diagnostic label. Renders as `"<label>: "`, or nothing when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextLabel(String);

impl ContextLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// `"outer"` + `"top-left"` → `"outer: top-left"`.
    pub fn nested(&self, inner: &str) -> Self {
        if self.0.is_empty() {
            Self(inner.to_string())
        } else {
            Self(format!("{}: {inner}", self.0))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContextLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            Ok(())
        } else {
            write!(f, "{}: ", self.0)
        }
    }
}

#[derive(Debug, Error)]
pub enum CoordinateError {
    #[error("{context}{axis} coordinate ({value}) out of valid range [0, 1000]")]
    OutOfRange {
        context: ContextLabel,
        axis: Axis,
        value: i64,
    },

    #[error("Screen {dimension} must be positive, got {value}")]
    NonPositiveDimension { dimension: &'static str, value: i64 },

    #[error("Invalid screen dimensions: {width}x{height}. Both width and height must be positive.")]
    InvalidScreenDimensions { width: i64, height: i64 },

    #[error(
        "{context}Invalid area: {axis:#}1 ({start}) > {axis:#}2 ({end}). \
         Top-left {axis} must be <= bottom-right {axis}"
    )]
    InvalidArea {
        context: ContextLabel,
        axis: Axis,
        start: i64,
        end: i64,
    },

    #[error("Malformed bounds string {input:?}: {reason}")]
    MalformedBounds { input: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialize error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl serde::Serialize for CoordinateError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

pub type CoordinateResult<T> = Result<T, CoordinateError>;
