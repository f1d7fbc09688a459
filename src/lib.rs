//! patchmerge composites a randomly chosen stack of overlay images onto a batch of
//! background images.
//!
//! # Pipeline overview
//!
//! 1. **Select**: one random image per category subfolder of the overlay root
//!    ([`select_overlays`]), using an injected RNG so runs can be seeded.
//! 2. **Prepare**: decode the selected overlays once for the whole batch
//!    ([`prepare_overlays`]).
//! 3. **Solve**: for each background size, compute a shared overlay width, scaled heights,
//!    an overflow correction and the stack position ([`solve_layout`]). This step is pure.
//! 4. **Render**: resize and alpha-composite the overlays ([`composite_overlays`]) and write
//!    `<stem>_merged<ext>` ([`run_batch`]).
//!
//! Everything runs sequentially. Unreadable overlays and backgrounds are logged through
//! `tracing` and skipped; only a run with no usable overlay at all is an error.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod batch;
mod foundation;
mod layout;
mod overlay;
mod render;

pub use assets::decode::{load_rgba, save_rgba};
pub use assets::scan::{
    IMAGE_EXTENSIONS, filter_images, is_supported_image, list_images, list_subdirs,
    merged_output_path,
};
pub use batch::pipeline::{BackgroundOutcome, BatchOpts, BatchReport, process_background, run_batch};
pub use foundation::core::Canvas;
pub use foundation::error::{PatchError, PatchResult};
pub use layout::config::{Anchor, LayoutConfig};
pub use layout::solver::{LayoutPlan, PlacedOverlay, StackMetrics, measure_stack, solve_layout};
pub use overlay::prepared::{PreparedOverlay, natural_sizes, prepare_overlays};
pub use overlay::select::{
    Category, OverlayRef, pick_one_per_category, scan_categories, select_overlays,
};
pub use render::composite::{PremulRgba8, blit_over, over};
pub use render::compositor::{Composite, composite_overlays};
