use std::path::Path;

use anyhow::Context;
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::foundation::error::{PatchError, PatchResult};

/// Decode the image at `path` into straight-alpha RGBA8.
///
/// Zero-sized images are rejected so callers never divide by a zero natural width.
pub fn load_rgba(path: &Path) -> PatchResult<RgbaImage> {
    let dyn_img =
        image::open(path).with_context(|| format!("decode image '{}'", path.display()))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(PatchError::decode(format!(
            "image '{}' has zero size ({width}x{height})",
            path.display()
        )));
    }
    Ok(rgba)
}

/// Encode `img` to `path`, picking the format from the path's extension.
///
/// JPEG has no alpha channel, so JPEG targets are flattened to RGB8 first.
pub fn save_rgba(img: &RgbaImage, path: &Path) -> PatchResult<()> {
    let format = ImageFormat::from_path(path)
        .with_context(|| format!("detect output format for '{}'", path.display()))?;
    let out = match format {
        ImageFormat::Jpeg => {
            DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(img.clone()).to_rgb8())
        }
        _ => DynamicImage::ImageRgba8(img.clone()),
    };
    out.save_with_format(path, format)
        .with_context(|| format!("write image '{}'", path.display()))?;
    Ok(())
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
