use image::RgbaImage;

use crate::{assets::decode, overlay::select::OverlayRef};

/// A selected overlay decoded once for the whole batch.
///
/// `image` is `None` when the file could not be read; such overlays keep their slot in the
/// stack order but are never drawn.
#[derive(Clone, Debug)]
pub struct PreparedOverlay {
    /// Where the overlay came from.
    pub source: OverlayRef,
    /// Decoded straight-alpha pixels, if readable.
    pub image: Option<RgbaImage>,
}

impl PreparedOverlay {
    /// Natural `(width, height)` of a readable overlay.
    pub fn natural_size(&self) -> Option<(u32, u32)> {
        self.image.as_ref().map(|img| img.dimensions())
    }
}

/// Decode every selected overlay, logging and keeping a placeholder for failures.
pub fn prepare_overlays(refs: &[OverlayRef]) -> Vec<PreparedOverlay> {
    refs.iter()
        .map(|r| {
            let image = match decode::load_rgba(&r.path) {
                Ok(img) => Some(img),
                Err(e) => {
                    tracing::warn!(
                        path = %r.path.display(),
                        error = %e,
                        "cannot read overlay, skipped"
                    );
                    None
                }
            };
            PreparedOverlay {
                source: r.clone(),
                image,
            }
        })
        .collect()
}

/// Natural sizes in stack order, `None` for unreadable overlays.
pub fn natural_sizes(overlays: &[PreparedOverlay]) -> Vec<Option<(u32, u32)>> {
    overlays.iter().map(PreparedOverlay::natural_size).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/prepared.rs"]
mod tests;
