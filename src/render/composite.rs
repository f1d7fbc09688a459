use image::RgbaImage;

use crate::assets::decode::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place};

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over on premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(sa);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = add_sat_u8(src[i], mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Composite premultiplied `src` over straight-alpha `dst` with its top-left corner at
/// `(x, y)`. Parts of `src` outside `dst` are clipped.
///
/// Only destination pixels under a non-transparent source pixel are converted to
/// premultiplied form and back; every other pixel keeps its exact value.
pub fn blit_over(dst: &mut RgbaImage, src: &RgbaImage, x: u32, y: u32) {
    let (dw, dh) = dst.dimensions();
    let (sw, sh) = src.dimensions();
    let w = sw.min(dw.saturating_sub(x));
    let h = sh.min(dh.saturating_sub(y));

    for sy in 0..h {
        for sx in 0..w {
            let s = src.get_pixel(sx, sy).0;
            if s[3] == 0 {
                continue;
            }
            let d = dst.get_pixel_mut(x + sx, y + sy);
            premultiply_rgba8_in_place(&mut d.0);
            d.0 = over(d.0, s);
            unpremultiply_rgba8_in_place(&mut d.0);
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
