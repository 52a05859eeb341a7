// Sprite clip descriptors
//
// Each clip of a character ships a small TOML record next to its atlas image:
//
// ```toml
// cols = 4
// rows = 2
// blanks = 1
// delay = 10
// successor = "stand"
// ```

use super::AssetError;
use serde::Deserialize;

/// Grid layout and timing of one animation clip
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClipDescriptor {
    /// Columns in the frame atlas
    pub cols: u32,
    /// Rows in the frame atlas
    pub rows: u32,
    /// Unused cells at the end of the grid
    #[serde(default)]
    pub blanks: u32,
    /// Ticks each frame is held at normal speed
    pub delay: f32,
    /// Clip to switch to once this one finishes
    #[serde(default)]
    pub successor: Option<String>,
}

impl ClipDescriptor {
    /// Parse and validate a descriptor; `path` is only used for error messages
    pub fn from_toml_str(text: &str, path: &str) -> Result<Self, AssetError> {
        let mut descriptor: Self = toml::from_str(text).map_err(|e| AssetError::Parse {
            path: path.to_string(),
            message: e.message().to_string(),
        })?;

        if descriptor.successor.as_deref().is_some_and(str::is_empty) {
            descriptor.successor = None;
        }

        descriptor
            .validate()
            .map_err(|reason| AssetError::InvalidDescriptor {
                path: path.to_string(),
                reason,
            })?;

        Ok(descriptor)
    }

    /// Check the grid has at least one playable frame and the delay is usable
    pub fn validate(&self) -> Result<(), String> {
        if self.cols == 0 || self.rows == 0 {
            return Err(format!("empty grid ({}x{})", self.cols, self.rows));
        }
        let Some(cells) = self.cols.checked_mul(self.rows) else {
            return Err(format!("grid {}x{} has too many cells", self.cols, self.rows));
        };
        if cells <= self.blanks {
            return Err(format!(
                "{} blank frames leave nothing to play in a {}x{} grid",
                self.blanks, self.cols, self.rows
            ));
        }
        if !self.delay.is_finite() || self.delay < 0.0 {
            return Err(format!("invalid frame delay {}", self.delay));
        }
        Ok(())
    }

    /// Number of frames that are actually played
    pub fn playable_frames(&self) -> u32 {
        self.cols.saturating_mul(self.rows).saturating_sub(self.blanks)
    }
}
