use crate::{
    foundation::core::Canvas,
    layout::config::{Anchor, LayoutConfig},
};

/// Heights of the overlay stack at one candidate width.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct StackMetrics {
    /// Shared overlay width in pixels.
    pub target_width: u32,
    /// Scaled height per overlay in input order; `0` marks an overlay that is not drawn.
    pub heights: Vec<u32>,
    /// Sum of drawn heights plus `padding * (entries - 1)`, or `0` when nothing is drawn.
    pub total_height: u64,
}

impl StackMetrics {
    /// Number of overlays with a non-zero height.
    pub fn drawn_count(&self) -> usize {
        self.heights.iter().filter(|&&h| h > 0).count()
    }
}

/// Final position and size of one drawn overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PlacedOverlay {
    /// Index into the overlay list the plan was solved for.
    pub index: usize,
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Scaled width (shared by all overlays).
    pub width: u32,
    /// Scaled height.
    pub height: u32,
}

/// Result of [`solve_layout`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LayoutPlan {
    /// Canvas the plan was solved for.
    pub canvas: Canvas,
    /// Width before any overflow correction.
    pub initial_width: u32,
    /// Vertical room left after margins.
    pub available_height: f64,
    /// Whether the stack had to be scaled down to fit.
    pub corrected: bool,
    /// Stack metrics at the final width.
    pub stack: StackMetrics,
    /// Top of the first drawn overlay.
    pub start_y: u32,
    /// Drawn overlays in stack order.
    pub items: Vec<PlacedOverlay>,
}

impl LayoutPlan {
    /// Final shared overlay width.
    pub fn target_width(&self) -> u32 {
        self.stack.target_width
    }

    /// Final stack height including padding.
    pub fn total_height(&self) -> u64 {
        self.stack.total_height
    }

    /// True when nothing will be drawn.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Scale every overlay to `target_width`, keeping its aspect ratio.
///
/// `None` sizes and sizes with a zero dimension are unreadable and get height `0`. Padding
/// is counted between every pair of neighbouring entries, unreadable ones included, so a
/// failed overlay still reserves its gap. A stack with nothing drawn has a total of `0`.
pub fn measure_stack(
    sizes: &[Option<(u32, u32)>],
    target_width: u32,
    padding_px: u32,
) -> StackMetrics {
    let heights = sizes
        .iter()
        .map(|size| match *size {
            Some((w, h)) if w > 0 && h > 0 => {
                let scaled = u64::from(h) * u64::from(target_width) / u64::from(w);
                u32::try_from(scaled).unwrap_or(u32::MAX)
            }
            _ => 0,
        })
        .collect::<Vec<_>>();

    let content = heights.iter().map(|&h| u64::from(h)).sum::<u64>();
    let total_height = if content == 0 {
        0
    } else {
        let gaps = heights.len() as u64 - 1;
        content + u64::from(padding_px) * gaps
    };

    StackMetrics {
        target_width,
        heights,
        total_height,
    }
}

/// Lay out an overlay stack on `canvas`.
///
/// The stack starts at `width_ratio` of the canvas width. While it is taller than the
/// canvas minus both vertical margins, the width is multiplied by
/// `available / total` and the heights are measured again. Each round strictly shrinks the
/// width, so the loop ends with a stack that fits or with width `0` (nothing drawn).
#[tracing::instrument(level = "debug", skip(sizes, cfg), fields(overlays = sizes.len()))]
pub fn solve_layout(
    canvas: Canvas,
    sizes: &[Option<(u32, u32)>],
    cfg: &LayoutConfig,
) -> LayoutPlan {
    let initial_width = (f64::from(canvas.width) * cfg.width_ratio)
        .floor()
        .clamp(0.0, f64::from(canvas.width)) as u32;
    let available_height = f64::from(canvas.height) * (1.0 - 2.0 * cfg.vertical_margin_ratio);

    let mut stack = measure_stack(sizes, initial_width, cfg.padding_px);
    let mut corrected = false;
    while stack.total_height as f64 > available_height && stack.target_width > 0 {
        let correction = available_height.max(0.0) / stack.total_height as f64;
        let width = stack.target_width;
        let next = ((f64::from(width) * correction).floor() as u32).min(width - 1);
        tracing::debug!(width, next, correction, "stack overflows, scaling down");
        stack = measure_stack(sizes, next, cfg.padding_px);
        corrected = true;
    }

    let total = u32::try_from(stack.total_height).unwrap_or(u32::MAX);
    let start_y = match cfg.anchor {
        Anchor::Center => canvas.height.saturating_sub(total) / 2,
        Anchor::Top => (f64::from(canvas.height) * cfg.vertical_margin_ratio).floor() as u32,
    };
    let x = canvas.width.saturating_sub(stack.target_width) / 2;

    let mut items = Vec::with_capacity(stack.drawn_count());
    let mut y = start_y;
    for (index, &height) in stack.heights.iter().enumerate() {
        if height == 0 {
            continue;
        }
        items.push(PlacedOverlay {
            index,
            x,
            y,
            width: stack.target_width,
            height,
        });
        y = y.saturating_add(height).saturating_add(cfg.padding_px);
    }

    LayoutPlan {
        canvas,
        initial_width,
        available_height,
        corrected,
        stack,
        start_y,
        items,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/solver.rs"]
mod tests;
