// Asset management system
//
// Resolves data files, reads sprite clip descriptors and decodes frame atlases.

mod atlas;
mod descriptor;
mod loader;

pub use atlas::{FrameGrid, FrameRegion};
pub use descriptor::ClipDescriptor;
pub use loader::{AssetLoader, SpriteSource};

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid descriptor {path}: {reason}")]
    InvalidDescriptor { path: String, reason: String },

    #[error("Failed to load image {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Relative path of a clip's descriptor
pub fn descriptor_path(character: &str, clip: &str) -> String {
    format!("sprites/{character}/{clip}.toml")
}

/// Relative path of a clip's frame atlas image
pub fn image_path(character: &str, clip: &str) -> String {
    format!("sprites/{character}/{clip}.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound("sprites/ego/stand.png".to_string());
        assert_eq!(err.to_string(), "Asset not found: sprites/ego/stand.png");
    }

    #[test]
    fn test_resource_paths() {
        assert_eq!(descriptor_path("cow", "chew"), "sprites/cow/chew.toml");
        assert_eq!(image_path("cow", "chew"), "sprites/cow/chew.png");
    }
}
