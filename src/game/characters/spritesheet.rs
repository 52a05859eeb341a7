// Spritesheet registry: the named animation clips of one character

use crate::engine::assets::{
    descriptor_path, image_path, AssetError, ClipDescriptor, FrameGrid, SpriteSource,
};
use crate::engine::renderer::Surface;

/// One animation clip of a character
#[derive(Debug, Clone)]
pub struct SpriteClip {
    /// Name of the clip (e.g., "stand", "chew", "look")
    pub name: String,
    /// Columns in the frame atlas
    pub columns: u32,
    /// Rows in the frame atlas
    pub rows: u32,
    /// Unused cells at the end of the grid
    pub blank_frames: u32,
    /// Ticks each frame is held at normal speed
    pub frame_delay: f32,
    /// Clip to switch to once the last frame was shown
    pub successor: Option<String>,
    /// Atlas width in pixels, recorded on load
    pub width: u32,
    /// Atlas height in pixels, recorded on load
    pub height: u32,
    image: Option<Surface>,
}

impl SpriteClip {
    /// Create an unloaded clip from its descriptor
    pub fn from_descriptor(name: &str, descriptor: ClipDescriptor) -> Self {
        Self {
            name: name.to_string(),
            columns: descriptor.cols,
            rows: descriptor.rows,
            blank_frames: descriptor.blanks,
            frame_delay: descriptor.delay,
            successor: descriptor.successor,
            width: 0,
            height: 0,
            image: None,
        }
    }

    /// Number of frames that are actually played, always at least one
    pub fn playable_frames(&self) -> u32 {
        self.columns
            .saturating_mul(self.rows)
            .saturating_sub(self.blank_frames)
            .max(1)
    }

    /// Check if the atlas image is in memory
    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    /// Get the atlas image, if loaded
    pub fn image(&self) -> Option<&Surface> {
        self.image.as_ref()
    }

    /// Frame layout of the loaded atlas
    pub fn frame_grid(&self) -> Option<FrameGrid> {
        self.image
            .as_ref()
            .map(|_| FrameGrid::new(self.width, self.height, self.columns, self.rows))
    }

    /// Size of one frame, if the atlas is loaded
    pub fn cell_size(&self) -> Option<(u32, u32)> {
        self.frame_grid().map(|grid| grid.cell_size())
    }

    fn set_image(&mut self, image: Surface) {
        self.width = image.width();
        self.height = image.height();
        self.image = Some(image);
    }
}

/// Ordered set of a character's clips, looked up by name
#[derive(Debug, Default)]
pub struct SpritesheetRegistry {
    /// Character the clips belong to; also the resource directory name
    owner: String,
    /// Most recently registered first
    clips: Vec<SpriteClip>,
}

impl SpritesheetRegistry {
    pub fn new(owner: &str) -> Self {
        Self {
            owner: owner.to_string(),
            clips: Vec::new(),
        }
    }

    /// Register the clip `name`, reading its descriptor from `source`
    ///
    /// Registering a name twice is a no-op. A missing or invalid descriptor is
    /// logged and leaves the registry unchanged. Returns whether the clip is
    /// registered afterwards.
    pub fn register(&mut self, source: &dyn SpriteSource, name: &str) -> bool {
        if self.contains(name) {
            log::debug!("{} spritesheet {} already registered", self.owner, name);
            return true;
        }

        log::info!("Registering {} spritesheet: {}", self.owner, name);

        let descriptor = source.read_descriptor(&self.owner, name).and_then(|descriptor| {
            descriptor
                .validate()
                .map(|()| descriptor)
                .map_err(|reason| AssetError::InvalidDescriptor {
                    path: descriptor_path(&self.owner, name),
                    reason,
                })
        });

        match descriptor {
            Ok(descriptor) => {
                self.clips
                    .insert(0, SpriteClip::from_descriptor(name, descriptor));
                true
            }
            Err(e) => {
                log::error!(
                    "Failed to register {} spritesheet {}: {}",
                    self.owner,
                    name,
                    e
                );
                false
            }
        }
    }

    /// Load the atlas of every clip that isn't loaded yet
    ///
    /// Stops at the first clip whose image can't be loaded, or whose image is
    /// too small to hold one pixel per grid cell.
    pub fn load_all(&mut self, source: &dyn SpriteSource) -> Result<(), AssetError> {
        log::info!("Loading spritesheets for character {}...", self.owner);

        for clip in self.clips.iter_mut().filter(|clip| !clip.is_loaded()) {
            let image = source.load_image(&self.owner, &clip.name)?;
            if image.width() < clip.columns || image.height() < clip.rows {
                return Err(AssetError::InvalidDescriptor {
                    path: image_path(&self.owner, &clip.name),
                    reason: format!(
                        "atlas {}x{} is smaller than its {}x{} grid",
                        image.width(),
                        image.height(),
                        clip.columns,
                        clip.rows
                    ),
                });
            }
            log::debug!(
                "Loaded {} spritesheet {} ({}x{})",
                self.owner,
                clip.name,
                image.width(),
                image.height()
            );
            clip.set_image(image);
        }

        Ok(())
    }

    /// Release every loaded atlas
    pub fn unload_all(&mut self) {
        log::info!("Unloading spritesheets for character {}...", self.owner);

        for clip in &mut self.clips {
            clip.image = None;
        }
    }

    /// Get a clip by name
    pub fn get(&self, name: &str) -> Option<&SpriteClip> {
        self.clips.iter().find(|clip| clip.name == name)
    }

    /// Check if a clip is registered
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate clips, most recently registered first
    pub fn iter(&self) -> impl Iterator<Item = &SpriteClip> {
        self.clips.iter()
    }

    /// Check if every registered clip has its atlas in memory
    pub fn is_loaded(&self) -> bool {
        self.clips.iter().all(SpriteClip::is_loaded)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::test_support::MemorySource;

    fn cow_source() -> MemorySource {
        MemorySource::new()
            .with_clip("cow", "stand", 2, 1, 0, 4.0, None, (8, 6))
            .with_clip("cow", "chew", 3, 2, 1, 2.0, None, (10, 10))
            .with_clip("cow", "look", 4, 1, 0, 3.0, Some("chew"), (5, 5))
    }

    #[test]
    fn test_register_reads_descriptor() {
        let source = cow_source();
        let mut registry = SpritesheetRegistry::new("cow");

        assert!(registry.register(&source, "chew"));

        let clip = registry.get("chew").unwrap();
        assert_eq!(clip.columns, 3);
        assert_eq!(clip.rows, 2);
        assert_eq!(clip.blank_frames, 1);
        assert_eq!(clip.frame_delay, 2.0);
        assert_eq!(clip.playable_frames(), 5);
        assert!(!clip.is_loaded());
        assert!(clip.cell_size().is_none());
    }

    #[test]
    fn test_register_is_idempotent() {
        let source = cow_source();
        let mut registry = SpritesheetRegistry::new("cow");

        assert!(registry.register(&source, "stand"));
        assert!(registry.register(&source, "stand"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_inserts_at_front() {
        let source = cow_source();
        let mut registry = SpritesheetRegistry::new("cow");
        registry.register(&source, "stand");
        registry.register(&source, "chew");
        registry.register(&source, "look");

        let names: Vec<&str> = registry.iter().map(|clip| clip.name.as_str()).collect();
        assert_eq!(names, vec!["look", "chew", "stand"]);
        assert_eq!(
            registry.get("look").unwrap().successor.as_deref(),
            Some("chew")
        );
    }

    #[test]
    fn test_register_missing_descriptor() {
        let source = cow_source();
        let mut registry = SpritesheetRegistry::new("cow");

        assert!(!registry.register(&source, "moo"));
        assert!(registry.is_empty());
        assert!(registry.get("moo").is_none());
    }

    #[test]
    fn test_register_rejects_clip_without_playable_frames() {
        let source = MemorySource::new().with_clip("cow", "empty", 2, 1, 2, 1.0, None, (4, 4));
        let mut registry = SpritesheetRegistry::new("cow");

        assert!(!registry.register(&source, "empty"));
        assert!(!registry.contains("empty"));
    }

    #[test]
    fn test_register_rejects_oversized_grid() {
        let source = MemorySource::new().with_clip("cow", "huge", 65536, 65536, 0, 1.0, None, (0, 0));
        let mut registry = SpritesheetRegistry::new("cow");

        assert!(!registry.register(&source, "huge"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_validates_any_source() {
        struct NegativeDelay;

        impl SpriteSource for NegativeDelay {
            fn read_descriptor(&self, _: &str, _: &str) -> Result<ClipDescriptor, AssetError> {
                Ok(ClipDescriptor {
                    cols: 2,
                    rows: 1,
                    blanks: 0,
                    delay: -1.0,
                    successor: None,
                })
            }

            fn load_image(&self, character: &str, clip: &str) -> Result<Surface, AssetError> {
                Err(AssetError::NotFound(image_path(character, clip)))
            }
        }

        let mut registry = SpritesheetRegistry::new("cow");
        assert!(!registry.register(&NegativeDelay, "chew"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_load_all_rejects_atlas_smaller_than_grid() {
        let source = MemorySource::new().with_clip("cow", "thin", 4, 1, 0, 1.0, None, (0, 3));
        let mut registry = SpritesheetRegistry::new("cow");
        assert!(registry.register(&source, "thin"));

        let err = registry.load_all(&source).unwrap_err();
        assert!(matches!(err, AssetError::InvalidDescriptor { ref path, .. } if path == "sprites/cow/thin.png"));
        assert!(!registry.is_loaded());
    }

    #[test]
    fn test_load_all_records_dimensions() {
        let source = cow_source();
        let mut registry = SpritesheetRegistry::new("cow");
        registry.register(&source, "chew");
        registry.register(&source, "look");

        registry.load_all(&source).unwrap();

        let chew = registry.get("chew").unwrap();
        assert!(chew.is_loaded());
        assert_eq!((chew.width, chew.height), (30, 20));
        assert_eq!(chew.cell_size(), Some((10, 10)));
        assert!(registry.is_loaded());
    }

    #[test]
    fn test_load_all_twice_loads_once() {
        let source = cow_source();
        let mut registry = SpritesheetRegistry::new("cow");
        registry.register(&source, "stand");
        registry.register(&source, "chew");

        registry.load_all(&source).unwrap();
        registry.load_all(&source).unwrap();

        assert_eq!(source.image_loads.get(), 2);
    }

    #[test]
    fn test_load_all_only_loads_new_clips() {
        let source = cow_source();
        let mut registry = SpritesheetRegistry::new("cow");
        registry.register(&source, "stand");
        registry.load_all(&source).unwrap();

        registry.register(&source, "look");
        registry.load_all(&source).unwrap();

        assert_eq!(source.image_loads.get(), 2);
        assert!(registry.is_loaded());
    }

    #[test]
    fn test_load_all_missing_image_fails() {
        let source = cow_source().with_missing_image("cow", "ghost");
        let mut registry = SpritesheetRegistry::new("cow");
        registry.register(&source, "stand");
        registry.register(&source, "ghost");

        let err = registry.load_all(&source).unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
        assert!(!registry.is_loaded());
    }

    #[test]
    fn test_unload_all() {
        let source = cow_source();
        let mut registry = SpritesheetRegistry::new("cow");
        registry.register(&source, "stand");
        registry.register(&source, "chew");

        // Safe before anything was loaded
        registry.unload_all();

        registry.load_all(&source).unwrap();
        registry.unload_all();
        assert!(registry.iter().all(|clip| !clip.is_loaded()));
        assert_eq!(registry.len(), 2);

        // Reloading after an unload loads again
        registry.load_all(&source).unwrap();
        assert_eq!(source.image_loads.get(), 4);
    }
}
