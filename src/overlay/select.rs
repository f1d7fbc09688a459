use std::path::{Path, PathBuf};

use rand::{Rng, seq::IndexedRandom};

use crate::assets::scan;

/// One overlay picked for a run: the category subfolder it came from and its file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct OverlayRef {
    /// Category subfolder name.
    pub category: String,
    /// Path to the chosen image file.
    pub path: PathBuf,
}

/// Candidate files of one category subfolder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    /// Subfolder name.
    pub name: String,
    /// Accepted image files, sorted by name.
    pub candidates: Vec<PathBuf>,
}

/// Scan `root` for category subfolders and list their image candidates.
///
/// Subfolders come back sorted by name. A missing or unreadable root yields an empty list;
/// an unreadable subfolder yields a category with no candidates.
pub fn scan_categories(root: &Path) -> Vec<Category> {
    let subdirs = match scan::list_subdirs(root) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(
                root = %root.display(),
                error = %e,
                "overlay root directory is not readable"
            );
            return Vec::new();
        }
    };

    subdirs
        .into_iter()
        .map(|dir| {
            let name = dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let candidates = scan::list_images(&dir).unwrap_or_else(|e| {
                tracing::warn!(dir = %dir.display(), error = %e, "cannot list overlay subfolder");
                Vec::new()
            });
            Category { name, candidates }
        })
        .collect()
}

/// Pick one candidate per category, in category order. Empty categories are skipped.
pub fn pick_one_per_category<R>(categories: &[Category], rng: &mut R) -> Vec<OverlayRef>
where
    R: Rng + ?Sized,
{
    let mut out = Vec::with_capacity(categories.len());
    for cat in categories {
        let Some(path) = cat.candidates.choose(rng) else {
            tracing::warn!(category = %cat.name, "overlay subfolder has no images, skipped");
            continue;
        };
        tracing::debug!(category = %cat.name, path = %path.display(), "overlay selected");
        out.push(OverlayRef {
            category: cat.name.clone(),
            path: path.clone(),
        });
    }
    out
}

/// Select the overlay stack for a run: one random image per category subfolder of `root`.
pub fn select_overlays<R>(root: &Path, rng: &mut R) -> Vec<OverlayRef>
where
    R: Rng + ?Sized,
{
    pick_one_per_category(&scan_categories(root), rng)
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/select.rs"]
mod tests;
