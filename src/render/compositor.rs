use image::{RgbaImage, imageops};

use crate::{
    assets::decode::premultiply_rgba8_in_place,
    foundation::{core::Canvas, error::PatchResult},
    layout::{
        config::LayoutConfig,
        solver::{LayoutPlan, solve_layout},
    },
    overlay::prepared::{PreparedOverlay, natural_sizes},
    render::composite::blit_over,
};

/// A rendered background together with the plan that placed its overlays.
#[derive(Clone, Debug)]
pub struct Composite {
    /// Output pixels, straight-alpha RGBA8.
    pub image: RgbaImage,
    /// Layout used to draw `image`.
    pub plan: LayoutPlan,
}

impl Composite {
    /// Whether any overlay was actually drawn.
    pub fn has_overlays(&self) -> bool {
        !self.plan.is_empty()
    }
}

/// Lay out `overlays` on `background` and draw them.
///
/// When nothing is drawable the background is returned as-is.
pub fn composite_overlays(
    background: &RgbaImage,
    overlays: &[PreparedOverlay],
    cfg: &LayoutConfig,
) -> PatchResult<Composite> {
    let (width, height) = background.dimensions();
    let canvas = Canvas::new(width, height)?;
    let plan = solve_layout(canvas, &natural_sizes(overlays), cfg);

    if plan.is_empty() {
        return Ok(Composite {
            image: background.clone(),
            plan,
        });
    }
    if plan.corrected {
        tracing::debug!(
            initial_width = plan.initial_width,
            width = plan.target_width(),
            "overlay stack scaled down to fit"
        );
    }

    let mut out = background.clone();
    for item in &plan.items {
        let Some(src) = overlays.get(item.index).and_then(|o| o.image.as_ref()) else {
            continue;
        };
        let mut premul = src.clone();
        premultiply_rgba8_in_place(&mut premul);
        let scaled = imageops::resize(
            &premul,
            item.width,
            item.height,
            imageops::FilterType::Lanczos3,
        );
        blit_over(&mut out, &scaled, item.x, item.y);
    }

    Ok(Composite { image: out, plan })
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
