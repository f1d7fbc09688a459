use std::{fs::File, io::BufReader, path::Path, str::FromStr};

use anyhow::Context;

use crate::foundation::error::{PatchError, PatchResult};

/// Vertical placement of the overlay stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    /// Center the stack vertically on the canvas.
    #[default]
    Center,
    /// Start the stack at the top margin.
    Top,
}

impl FromStr for Anchor {
    type Err = PatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "center" | "centre" | "middle" => Ok(Self::Center),
            "top" => Ok(Self::Top),
            other => Err(PatchError::validation(format!(
                "unknown anchor '{other}', expected 'center' or 'top'"
            ))),
        }
    }
}

/// Tunables for the overlay stack layout.
///
/// Every field has a default, so a JSON config only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Desired overlay width as a fraction of the background width, in `(0, 1]`.
    pub width_ratio: f64,
    /// Vertical gap in pixels between consecutive overlays.
    pub padding_px: u32,
    /// Blank space kept above and below the stack, as a fraction of background height.
    pub vertical_margin_ratio: f64,
    /// Vertical anchoring mode.
    pub anchor: Anchor,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width_ratio: 0.6,
            padding_px: 20,
            vertical_margin_ratio: 0.05,
            anchor: Anchor::Center,
        }
    }
}

impl LayoutConfig {
    /// Load a JSON config from `path` and validate it.
    pub fn from_path(path: &Path) -> PatchResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse config JSON '{}'", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject ratios that would produce a degenerate layout.
    pub fn validate(&self) -> PatchResult<()> {
        if !(self.width_ratio > 0.0 && self.width_ratio <= 1.0) {
            return Err(PatchError::validation(format!(
                "width_ratio must be in (0, 1], got {}",
                self.width_ratio
            )));
        }
        if !(self.vertical_margin_ratio >= 0.0 && self.vertical_margin_ratio < 0.5) {
            return Err(PatchError::validation(format!(
                "vertical_margin_ratio must be in [0, 0.5), got {}",
                self.vertical_margin_ratio
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/config.rs"]
mod tests;
