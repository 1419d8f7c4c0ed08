use super::*;

#[test]
fn mul_div255_rounds_half_up() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(0, 255), 0);
    assert_eq!(mul_div255_u8(255, 128), 128);
    assert_eq!(mul_div255_u8(255, 127), 127);
}

#[test]
fn unit_to_u8_clamps_and_rounds() {
    assert_eq!(unit_to_u8(-1.0), 0);
    assert_eq!(unit_to_u8(0.5), 128);
    assert_eq!(unit_to_u8(2.0), 255);
    assert_eq!(unit_to_u8(f64::NAN), 0);
}

#[test]
fn trunc_px_truncates_toward_zero() {
    assert_eq!(trunc_px(3.9), 3);
    assert_eq!(trunc_px(-3.9), -3);
    assert_eq!(trunc_px(1e12), i32::MAX);
}
