use crate::coordinate::screen::ScreenSize;
use crate::coordinate::NORMALIZED_RANGE;
use crate::errors::{Axis, ContextLabel, CoordinateError, CoordinateResult};

fn check_axis(value: i64, axis: Axis, context: &ContextLabel) -> CoordinateResult<()> {
    if (0..=NORMALIZED_RANGE).contains(&value) {
        Ok(())
    } else {
        Err(CoordinateError::OutOfRange {
            context: context.clone(),
            axis,
            value,
        })
    }
}

fn check_point(x: i64, y: i64, context: &ContextLabel) -> CoordinateResult<()> {
    check_axis(x, Axis::X, context)?;
    check_axis(y, Axis::Y, context)
}

/// Fail unless both coordinates lie in `[0, 1000]`. X is reported first.
pub fn validate_normalized_coords(x: i64, y: i64, context: &str) -> CoordinateResult<()> {
    check_point(x, y, &ContextLabel::new(context))
}

/// Normalized `[0, 1000]` → pixels, truncating toward zero.
pub fn normalized_to_absolute(
    norm_x: i64,
    norm_y: i64,
    screen: &ScreenSize,
) -> CoordinateResult<(i64, i64)> {
    validate_normalized_coords(norm_x, norm_y, "normalized_to_absolute")?;
    Ok((
        scale(norm_x, screen.width(), NORMALIZED_RANGE),
        scale(norm_y, screen.height(), NORMALIZED_RANGE),
    ))
}

/// Pixels → normalized, truncating toward zero and clamping into `[0, 1000]`.
/// Off-screen pixels saturate instead of failing.
pub fn absolute_to_normalized(abs_x: i64, abs_y: i64, screen: &ScreenSize) -> (i64, i64) {
    (
        scale(abs_x, NORMALIZED_RANGE, screen.width()).clamp(0, NORMALIZED_RANGE),
        scale(abs_y, NORMALIZED_RANGE, screen.height()).clamp(0, NORMALIZED_RANGE),
    )
}

// value * num / den in i128, then saturated back into i64. `den` is always positive.
fn scale(value: i64, num: i64, den: i64) -> i64 {
    let scaled = i128::from(value) * i128::from(num) / i128::from(den);
    scaled.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

/// Check that both corners are in range and the area is not inverted.
pub fn validate_normalized_area(
    x1: i64,
    y1: i64,
    x2: i64,
    y2: i64,
    context: &str,
) -> CoordinateResult<()> {
    let context = ContextLabel::new(context);
    check_point(x1, y1, &context.nested("top-left"))?;
    check_point(x2, y2, &context.nested("bottom-right"))?;

    if x1 > x2 {
        return Err(CoordinateError::InvalidArea {
            context,
            axis: Axis::X,
            start: x1,
            end: x2,
        });
    }
    if y1 > y2 {
        return Err(CoordinateError::InvalidArea {
            context,
            axis: Axis::Y,
            start: y1,
            end: y2,
        });
    }
    Ok(())
}

/// Absolute pixel position of the center of a normalized area. The midpoint
/// is floored, so odd sums lean toward the top-left corner.
pub fn normalized_area_to_center(
    x1: i64,
    y1: i64,
    x2: i64,
    y2: i64,
    screen: &ScreenSize,
) -> CoordinateResult<(i64, i64)> {
    validate_normalized_area(x1, y1, x2, y2, "normalized_area_to_center")?;

    let center_x = (x1 + x2).div_euclid(2);
    let center_y = (y1 + y2).div_euclid(2);
    tracing::trace!(center_x, center_y, screen = %screen, "normalized area center");

    normalized_to_absolute(center_x, center_y, screen)
}
