use super::*;

fn buf(w: u32, h: u32) -> PixelBuffer {
    PixelBuffer::new(w, h).unwrap()
}

#[test]
fn new_buffer_is_opaque_black() {
    let b = buf(3, 2);
    assert_eq!(b.get_pixel(0, 0), [0, 0, 0, 255]);
    assert_eq!(b.get_pixel(2, 1), [0, 0, 0, 255]);
    assert_eq!(b.data().len(), 3 * 2 * 4);
}

#[test]
fn zero_dimensions_are_rejected() {
    assert!(PixelBuffer::new(0, 4).is_err());
    assert!(PixelBuffer::new(4, 0).is_err());
    assert!(PixelBuffer::from_rgba(2, 2, vec![0; 15]).is_err());
}

#[test]
fn out_of_bounds_reads_are_transparent_and_writes_ignored() {
    let mut b = buf(2, 2);
    assert_eq!(b.get_pixel(-1, 0), [0, 0, 0, 0]);
    assert_eq!(b.get_pixel(2, 0), [0, 0, 0, 0]);
    let before = b.clone();
    b.set_pixel(5, 5, [255u8, 0, 0]);
    b.set_pixel(-1, 1, [255u8, 0, 0, 255]);
    assert_eq!(b, before);
}

#[test]
fn rgb_write_preserves_alpha() {
    let mut b = buf(1, 1);
    b.set_pixel(0, 0, [9u8, 9, 9, 40]);
    b.set_pixel(0, 0, [1u8, 2, 3]);
    assert_eq!(b.get_pixel(0, 0), [1, 2, 3, 40]);
}

#[test]
fn clear_with_rgb_is_opaque() {
    let mut b = buf(2, 1);
    b.clear(Color::TRANSPARENT);
    assert_eq!(b.get_pixel(1, 0), [0, 0, 0, 0]);
    b.clear([10u8, 20, 30]);
    assert_eq!(b.get_pixel(1, 0), [10, 20, 30, 255]);
}

#[test]
fn blit_alpha_math_is_deterministic() {
    let mut dst = PixelBuffer::filled(1, 1, [0u8, 0, 255, 255]).unwrap();
    let src = PixelBuffer::filled(1, 1, [255u8, 0, 0, 128]).unwrap();
    dst.blit(&src, 0, 0, 1.0);
    assert_eq!(dst.get_pixel(0, 0), [128, 0, 127, 255]);
}

#[test]
fn blit_clips_negative_and_overflowing_positions() {
    let mut dst = PixelBuffer::filled(4, 4, Color::TRANSPARENT).unwrap();
    let src = PixelBuffer::filled(3, 3, [255u8, 255, 255, 255]).unwrap();

    dst.blit(&src, -2, -2, 1.0);
    assert_eq!(dst.get_pixel(0, 0), [255, 255, 255, 255]);
    assert_eq!(dst.get_pixel(1, 0), [0, 0, 0, 0]);
    assert_eq!(dst.get_pixel(0, 1), [0, 0, 0, 0]);

    dst.blit(&src, 3, 3, 1.0);
    assert_eq!(dst.get_pixel(3, 3), [255, 255, 255, 255]);
    assert_eq!(dst.get_pixel(2, 3), [0, 0, 0, 0]);

    let snapshot = dst.clone();
    dst.blit(&src, 10, -10, 1.0);
    assert_eq!(dst, snapshot);
}

#[test]
fn blit_uses_source_offsets_when_clipped() {
    let mut src = PixelBuffer::filled(2, 2, Color::TRANSPARENT).unwrap();
    src.set_pixel(1, 1, [7u8, 8, 9, 255]);
    let mut dst = PixelBuffer::filled(2, 2, Color::TRANSPARENT).unwrap();
    dst.blit(&src, -1, -1, 1.0);
    assert_eq!(dst.get_pixel(0, 0), [7, 8, 9, 255]);
}

#[test]
fn copy_is_independent() {
    let a = buf(2, 2);
    let mut b = a.copy();
    b.set_pixel(0, 0, [1u8, 1, 1, 1]);
    assert_eq!(a.get_pixel(0, 0), [0, 0, 0, 255]);
}

#[test]
fn outline_touches_edges_only() {
    let mut b = PixelBuffer::filled(3, 3, Color::TRANSPARENT).unwrap();
    b.draw_outline([128u8, 0, 255]);
    assert_eq!(b.get_pixel(0, 0), [128, 0, 255, 0]);
    assert_eq!(b.get_pixel(1, 1), [0, 0, 0, 0]);
    b.fill_rect(-1, -1, 2, 2, Color::WHITE);
    assert_eq!(b.get_pixel(0, 0), [255, 255, 255, 255]);
}

#[test]
fn crop_copies_without_blending_and_pads_transparent() {
    let mut b = PixelBuffer::filled(3, 2, Color::TRANSPARENT).unwrap();
    b.set_pixel(2, 1, [9u8, 9, 9, 40]);
    let c = b.crop(1, 1, 3, 2);
    assert_eq!((c.width(), c.height()), (3, 2));
    assert_eq!(c.get_pixel(1, 0), [9, 9, 9, 40]);
    assert_eq!(c.get_pixel(2, 0), [0, 0, 0, 0]);
    assert_eq!(c.get_pixel(0, 1), [0, 0, 0, 0]);
}
