/// `round(x * y / 255)` for 8-bit channel products, rounding half up.
pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y).min(255) as u8
}

/// Map a `[0, 1]` factor onto `0..=255`, rounding to nearest.
pub(crate) fn unit_to_u8(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Truncate toward zero into pixel space, saturating at the `i32` range.
pub(crate) fn trunc_px(v: f64) -> i32 {
    if v.is_nan() {
        return 0;
    }
    v.trunc().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
