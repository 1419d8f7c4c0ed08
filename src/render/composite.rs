use crate::foundation::math::{mul_div255_u8, unit_to_u8};

/// One RGBA pixel with straight (non-premultiplied) alpha.
pub type Rgba8 = [u8; 4];

/// Composite `src` over `dst` with the straight-alpha "over" operator.
///
/// `a = src.a * opacity`, `out.rgb = dst.rgb * (1 - a) + src.rgb * a`, `out.a = a + dst.a * (1 - a)`.
/// Every product is `round(x * y / 255)` with halves rounded up, so a 50% red over opaque blue
/// gives `(128, 0, 127, 255)`.
pub fn over(dst: Rgba8, src: Rgba8, opacity: f64) -> Rgba8 {
    let op = unit_to_u8(opacity);
    if op == 0 || src[3] == 0 {
        return dst;
    }

    let sa = u16::from(mul_div255_u8(u16::from(src[3]), u16::from(op)));
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return [src[0], src[1], src[2], 255];
    }

    let inv = 255 - sa;
    let mut out = [0u8; 4];
    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), sa);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out[3] = (sa as u8).saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    out
}

/// Composite an RGBA row onto another of equal length.
pub(crate) fn over_row(dst: &mut [u8], src: &[u8], opacity: f64) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
