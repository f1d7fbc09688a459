use std::path::{Path, PathBuf};

use anyhow::Context;
use image::imageops;
use rand::Rng;

use crate::{
    assets::{decode, scan},
    foundation::{
        core::Canvas,
        error::{PatchError, PatchResult},
    },
    layout::config::LayoutConfig,
    overlay::{
        prepared::{PreparedOverlay, prepare_overlays},
        select::{OverlayRef, select_overlays},
    },
    render::compositor::composite_overlays,
};

/// Inputs for one batch run.
#[derive(Clone, Debug)]
pub struct BatchOpts {
    /// Directory holding the background images.
    pub background_dir: PathBuf,
    /// Overlay root; each subfolder is one category.
    pub overlay_dir: PathBuf,
    /// Where `<stem>_merged<ext>` files are written. Created if absent.
    pub output_dir: PathBuf,
    /// Resize every background to exactly this size before compositing.
    pub resize: Option<Canvas>,
    /// Layout tunables shared by every background.
    pub layout: LayoutConfig,
}

/// Summary of a batch run.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct BatchReport {
    /// Overlays selected for this run, in stack order.
    pub overlays: Vec<OverlayRef>,
    /// Backgrounds written with at least one overlay drawn.
    pub composited: usize,
    /// Backgrounds written without any overlay drawn.
    pub copied: usize,
    /// Backgrounds that could not be processed.
    pub failed: usize,
}

/// What happened to a single background.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackgroundOutcome {
    /// Overlays were drawn and the result encoded.
    Composited,
    /// Nothing was drawn; the background was written through unchanged.
    Copied,
}

/// Select one overlay per category, then composite that same stack onto every background.
///
/// Per-background failures are logged and counted; the batch only aborts when no overlay is
/// usable at all or the output directory cannot be created. The output directory is only
/// created once a usable overlay stack exists.
#[tracing::instrument(
    skip_all,
    fields(
        backgrounds = %opts.background_dir.display(),
        overlays = %opts.overlay_dir.display()
    )
)]
pub fn run_batch<R>(opts: &BatchOpts, rng: &mut R) -> PatchResult<BatchReport>
where
    R: Rng + ?Sized,
{
    opts.layout.validate()?;

    let selected = select_overlays(&opts.overlay_dir, rng);
    let prepared = prepare_overlays(&selected);
    if !prepared.iter().any(|o| o.image.is_some()) {
        return Err(PatchError::NoOverlays {
            dir: opts.overlay_dir.clone(),
        });
    }
    tracing::info!(count = selected.len(), "overlay stack selected");

    std::fs::create_dir_all(&opts.output_dir)
        .with_context(|| format!("create output dir '{}'", opts.output_dir.display()))?;

    let backgrounds = scan::list_images(&opts.background_dir).unwrap_or_else(|e| {
        tracing::warn!(dir = %opts.background_dir.display(), error = %e, "cannot list backgrounds");
        Vec::new()
    });
    if backgrounds.is_empty() {
        tracing::warn!(dir = %opts.background_dir.display(), "no background images found");
    }

    let mut report = BatchReport {
        overlays: selected,
        ..BatchReport::default()
    };
    for bg in &backgrounds {
        match process_background(bg, &prepared, opts) {
            Ok(BackgroundOutcome::Composited) => report.composited += 1,
            Ok(BackgroundOutcome::Copied) => report.copied += 1,
            Err(e) => {
                tracing::error!(path = %bg.display(), error = %e, "background failed, skipped");
                report.failed += 1;
            }
        }
    }

    tracing::info!(
        composited = report.composited,
        copied = report.copied,
        failed = report.failed,
        "batch finished"
    );
    Ok(report)
}

/// Composite `overlays` onto one background and write the result to the output directory.
#[tracing::instrument(skip_all, fields(path = %background.display()))]
pub fn process_background(
    background: &Path,
    overlays: &[PreparedOverlay],
    opts: &BatchOpts,
) -> PatchResult<BackgroundOutcome> {
    let out_path = scan::merged_output_path(&opts.output_dir, background);

    let mut bg = decode::load_rgba(background)?;
    if let Some(target) = opts.resize {
        bg = imageops::resize(
            &bg,
            target.width,
            target.height,
            imageops::FilterType::Lanczos3,
        );
    }

    let composite = composite_overlays(&bg, overlays, &opts.layout)?;
    if !composite.has_overlays() {
        tracing::warn!("no overlay could be drawn, writing background unchanged");
        if opts.resize.is_none() {
            std::fs::copy(background, &out_path).with_context(|| {
                format!(
                    "copy '{}' to '{}'",
                    background.display(),
                    out_path.display()
                )
            })?;
        } else {
            decode::save_rgba(&composite.image, &out_path)?;
        }
        return Ok(BackgroundOutcome::Copied);
    }

    decode::save_rgba(&composite.image, &out_path)?;
    tracing::info!(out = %out_path.display(), "composite written");
    Ok(BackgroundOutcome::Composited)
}
