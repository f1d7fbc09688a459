use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::PatchResult;

/// File extensions (lowercase, without dot) accepted as images.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Whether `path` has an accepted image extension (case-insensitive).
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| e.eq_ignore_ascii_case(known))
        })
}

/// Keep only accepted image paths and return them sorted by file name.
///
/// Directory iteration order is platform dependent, so callers always go through this
/// to get a stable list.
pub fn filter_images(paths: impl IntoIterator<Item = PathBuf>) -> Vec<PathBuf> {
    let mut out = paths
        .into_iter()
        .filter(|p| is_supported_image(p))
        .collect::<Vec<_>>();
    sort_by_file_name(&mut out);
    out
}

/// List accepted image files directly inside `dir`, sorted by file name.
pub fn list_images(dir: &Path) -> PatchResult<Vec<PathBuf>> {
    let files = read_entries(dir)?
        .into_iter()
        .filter(|p| p.is_file())
        .collect::<Vec<_>>();
    Ok(filter_images(files))
}

/// List immediate subdirectories of `dir`, sorted by name.
pub fn list_subdirs(dir: &Path) -> PatchResult<Vec<PathBuf>> {
    let mut out = read_entries(dir)?
        .into_iter()
        .filter(|p| p.is_dir())
        .collect::<Vec<_>>();
    sort_by_file_name(&mut out);
    Ok(out)
}

/// Output path for a background: `<out_dir>/<stem>_merged<.ext>`, keeping the original
/// extension spelling.
pub fn merged_output_path(out_dir: &Path, background: &Path) -> PathBuf {
    let stem = background
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match background.extension() {
        Some(ext) => format!("{stem}_merged.{}", ext.to_string_lossy()),
        None => format!("{stem}_merged"),
    };
    out_dir.join(name)
}

fn read_entries(dir: &Path) -> PatchResult<Vec<PathBuf>> {
    let rd = std::fs::read_dir(dir).with_context(|| format!("read dir '{}'", dir.display()))?;
    let mut out = Vec::new();
    for entry in rd {
        let entry = entry.with_context(|| format!("read entry in '{}'", dir.display()))?;
        out.push(entry.path());
    }
    Ok(out)
}

fn sort_by_file_name(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
}

#[cfg(test)]
#[path = "../../tests/unit/assets/scan.rs"]
mod tests;
