// Data file resolution and sprite loading

use super::{descriptor_path, image_path, AssetError, ClipDescriptor};
use crate::engine::renderer::Surface;
use std::path::{Path, PathBuf};

/// Where a character's clip descriptors and frame atlases come from
pub trait SpriteSource {
    /// Read the descriptor of `clip` for `character`
    fn read_descriptor(&self, character: &str, clip: &str) -> Result<ClipDescriptor, AssetError>;

    /// Decode the frame atlas of `clip` for `character`
    fn load_image(&self, character: &str, clip: &str) -> Result<Surface, AssetError>;
}

/// Finds data files on disk
///
/// A relative path is tried as given, then under the data directory, then under
/// every extra search root in the order they were added.
#[derive(Debug, Clone)]
pub struct AssetLoader {
    data_dir: PathBuf,
    search_roots: Vec<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader rooted at `data_dir`
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            search_roots: Vec::new(),
        }
    }

    /// Add a fallback directory to search
    pub fn with_search_root<P: AsRef<Path>>(mut self, root: P) -> Self {
        self.search_roots.push(root.as_ref().to_path_buf());
        self
    }

    /// Every location `relative` may live at, in lookup order
    pub fn candidates(&self, relative: &str) -> Vec<PathBuf> {
        let mut candidates = vec![PathBuf::from(relative), self.data_dir.join(relative)];
        candidates.extend(self.search_roots.iter().map(|root| root.join(relative)));
        candidates
    }

    /// Get the full path of an existing data file
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, AssetError> {
        self.candidates(relative)
            .into_iter()
            .find(|path| path.is_file())
            .ok_or_else(|| AssetError::NotFound(relative.to_string()))
    }

    /// Load data file bytes from disk
    pub fn load_bytes(&self, relative: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.resolve(relative)?;
        Ok(std::fs::read(path)?)
    }

    /// Check if a data file exists
    pub fn exists(&self, relative: &str) -> bool {
        self.resolve(relative).is_ok()
    }
}

impl SpriteSource for AssetLoader {
    fn read_descriptor(&self, character: &str, clip: &str) -> Result<ClipDescriptor, AssetError> {
        let relative = descriptor_path(character, clip);
        let bytes = self.load_bytes(&relative)?;
        let text = String::from_utf8(bytes).map_err(|e| AssetError::Parse {
            path: relative.clone(),
            message: e.to_string(),
        })?;

        ClipDescriptor::from_toml_str(&text, &relative)
    }

    fn load_image(&self, character: &str, clip: &str) -> Result<Surface, AssetError> {
        let relative = image_path(character, clip);
        let path = self.resolve(&relative)?;

        let image = image::open(&path).map_err(|source| AssetError::Image {
            path: path.to_string_lossy().to_string(),
            source,
        })?;

        Ok(Surface::from_image(image.to_rgba8()))
    }
}
