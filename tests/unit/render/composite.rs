use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 255, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn half_red_over_opaque_blue_rounds_half_up() {
    let out = over([0, 0, 255, 255], [255, 0, 0, 128], 1.0);
    assert_eq!(out, [128, 0, 127, 255]);
}

#[test]
fn opacity_scales_source_alpha() {
    // opacity 0.5 -> 128, 255 * 128 / 255 -> 128: same as the half-alpha source above.
    let out = over([0, 0, 255, 255], [255, 0, 0, 255], 0.5);
    assert_eq!(out, [128, 0, 127, 255]);
}

#[test]
fn over_transparent_dst_keeps_scaled_alpha() {
    let out = over([0, 0, 0, 0], [255, 0, 0, 128], 1.0);
    assert_eq!(out[3], 128);
}

#[test]
fn over_row_blends_every_pixel() {
    let mut dst = vec![0, 0, 255, 255, 0, 0, 255, 255];
    let src = vec![255, 0, 0, 255, 0, 0, 0, 0];
    over_row(&mut dst, &src, 1.0);
    assert_eq!(dst, vec![255, 0, 0, 255, 0, 0, 255, 255]);
}
