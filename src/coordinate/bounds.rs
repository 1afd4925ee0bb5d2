use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::coordinate::convert::absolute_to_normalized;
use crate::coordinate::screen::ScreenSize;
use crate::errors::{CoordinateError, CoordinateResult};

/// On-screen extent of a UI element in pixels, as reported by the
/// accessibility tree in `"left,top,right,bottom"` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ElementBounds {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl ElementBounds {
    /// Both corners mapped independently into normalized space (clamped).
    pub fn to_normalized(&self, screen: &ScreenSize) -> (i64, i64, i64, i64) {
        let (x1, y1) = absolute_to_normalized(self.left, self.top, screen);
        let (x2, y2) = absolute_to_normalized(self.right, self.bottom, screen);
        (x1, y1, x2, y2)
    }
}

impl FromStr for ElementBounds {
    type Err = CoordinateError;

    /// Exactly four base-10 integers separated by commas. Whitespace around
    /// each token is ignored; single underscores may group digits (`1_080`).
    fn from_str(s: &str) -> CoordinateResult<Self> {
        let malformed = |reason: String| CoordinateError::MalformedBounds {
            input: s.to_string(),
            reason,
        };

        let tokens: Vec<&str> = s.split(',').collect();
        if tokens.len() != 4 {
            return Err(malformed(format!(
                "expected 4 comma-separated integers, found {}",
                tokens.len()
            )));
        }

        let mut values = [0i64; 4];
        for (slot, (i, token)) in values.iter_mut().zip(tokens.iter().enumerate()) {
            *slot = parse_bound(token).map_err(|e| {
                malformed(format!("token {} ({token:?}) is not an integer: {e}", i + 1))
            })?;
        }

        let [left, top, right, bottom] = values;
        Ok(Self { left, top, right, bottom })
    }
}

// Optional sign, then digits with single underscores only between digits.
fn parse_bound(token: &str) -> Result<i64, String> {
    let token = token.trim();
    let digits = token.strip_prefix(|c| c == '+' || c == '-').unwrap_or(token);
    if digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
        return Err("misplaced digit separator".to_string());
    }
    token.replace('_', "").parse::<i64>().map_err(|e| e.to_string())
}

impl fmt::Display for ElementBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.left, self.top, self.right, self.bottom)
    }
}

/// Parse a `"left,top,right,bottom"` pixel rectangle and normalize both corners.
pub fn bounds_to_normalized(
    bounds: &str,
    screen: &ScreenSize,
) -> CoordinateResult<(i64, i64, i64, i64)> {
    let parsed: ElementBounds = bounds.parse()?;
    let normalized = parsed.to_normalized(screen);
    tracing::trace!(bounds = %parsed, ?normalized, "bounds normalized");
    Ok(normalized)
}
