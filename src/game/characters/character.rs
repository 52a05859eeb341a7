// Character entity: an animated, placeable on-screen actor

use glam::{IVec2, Vec2, Vec4};

use crate::core::color::TRANSPARENT;
use crate::engine::assets::{AssetError, SpriteSource};
use crate::engine::renderer::{DrawFlags, Surface};

use super::animation::AnimationPlayer;
use super::spritesheet::{SpriteClip, SpritesheetRegistry};
use super::state::ClipSwitch;
use super::CharacterError;

/// A logical on-screen actor driven by named spritesheets
#[derive(Debug)]
pub struct Character {
    /// Character name, also used to find its sprite resources
    name: String,
    /// Registered animation clips
    spritesheets: SpritesheetRegistry,
    /// Frame clock over the active clip
    animation: AnimationPlayer,
    /// Top-left corner in world pixels
    position: IVec2,
    /// Rotation in radians
    rotation: f32,
    /// One frame of the active clip, redrawn on every draw
    render_surface: Surface,
}

impl Character {
    /// Create a character with no clips, placed off screen at (-1, -1)
    pub fn new(name: &str) -> Self {
        log::info!("Creating character {}...", name);

        Self {
            name: name.to_string(),
            spritesheets: SpritesheetRegistry::new(name),
            animation: AnimationPlayer::new(),
            position: IVec2::new(-1, -1),
            rotation: 0.0,
            render_surface: Surface::default(),
        }
    }

    /// Register a clip by name; see [`SpritesheetRegistry::register`]
    pub fn register_spritesheet(&mut self, source: &dyn SpriteSource, name: &str) -> bool {
        self.spritesheets.register(source, name)
    }

    /// Load every registered clip's atlas
    pub fn load_spritesheets(&mut self, source: &dyn SpriteSource) -> Result<(), AssetError> {
        self.spritesheets.load_all(source)
    }

    /// Release every clip's atlas
    pub fn unload_spritesheets(&mut self) {
        self.spritesheets.unload_all();
    }

    /// Make `name` the active clip right away, starting from its first frame
    ///
    /// The clip's own successor becomes the pending switch. On failure the
    /// error is logged and the character keeps playing what it was playing.
    /// Must not be called while a frame update or draw is in progress; use
    /// [`Character::change_spritesheet`] from callbacks.
    pub fn select_spritesheet(&mut self, name: &str) -> Result<(), CharacterError> {
        log::debug!("Selecting spritesheet for {}: {}", self.name, name);

        let result = self.activate(name);
        if let Err(e) = &result {
            log::error!("{}", e);
        }
        result
    }

    fn activate(&mut self, name: &str) -> Result<(), CharacterError> {
        if self.spritesheets.is_empty() {
            return Err(CharacterError::NoClipsRegistered(self.name.clone()));
        }

        let Some(clip) = self.spritesheets.get(name) else {
            return Err(CharacterError::ClipNotFound {
                character: self.name.clone(),
                clip: name.to_string(),
            });
        };

        let Some((width, height)) = clip.cell_size() else {
            return Err(CharacterError::ClipNotLoaded {
                character: self.name.clone(),
                clip: name.to_string(),
            });
        };

        self.animation.play_from_start(clip);
        self.render_surface = Surface::new(width, height);

        log::debug!(
            "Spritesheet for {} activated: {} ({}x{})",
            self.name,
            name,
            width,
            height
        );
        Ok(())
    }

    /// Ask for `name` to become active once the current clip finishes
    ///
    /// Frame position and timing are left alone, so this is safe to call from
    /// timeline actions. An unknown name is only reported when the switch
    /// happens.
    pub fn change_spritesheet(&mut self, name: &str) {
        log::debug!("Queueing spritesheet for {}: {}", self.name, name);
        self.animation.request(name);
    }

    /// Advance the animation by one simulation tick
    ///
    /// `speed_modifier` rescales the frame delays; 0 pauses.
    pub fn animate(&mut self, speed_modifier: f32) {
        let Some(current) = self.animation.current_clip() else {
            return;
        };
        let Some(clip) = self.spritesheets.get(current) else {
            return;
        };

        if let Some(next) = self.animation.advance(clip, speed_modifier) {
            // Failure is logged, and the current clip keeps looping
            let _ = self.select_spritesheet(&next);
        }
    }

    /// Move relative to the current placement
    pub fn move_by(&mut self, dx: i32, dy: i32, angle: f32) {
        self.position += IVec2::new(dx, dy);
        self.rotation += angle;
    }

    /// Set the absolute placement
    pub fn set_position(&mut self, x: i32, y: i32, angle: f32) {
        self.position = IVec2::new(x, y);
        self.rotation = angle;
    }

    /// Draw the current frame onto `target`
    ///
    /// The frame is rotated about the middle of its right edge and multiplied
    /// by `tint`. Without an active, loaded clip nothing is drawn and the
    /// error is logged.
    pub fn draw(
        &mut self,
        target: &mut Surface,
        tint: Vec4,
        flags: DrawFlags,
    ) -> Result<(), CharacterError> {
        let result = self.draw_frame(target, tint, flags);
        if let Err(e) = &result {
            log::error!("{}", e);
        }
        result
    }

    fn draw_frame(
        &mut self,
        target: &mut Surface,
        tint: Vec4,
        flags: DrawFlags,
    ) -> Result<(), CharacterError> {
        let Some(current) = self.animation.current_clip() else {
            return Err(CharacterError::NoActiveClip(self.name.clone()));
        };
        let Some(clip) = self.spritesheets.get(current) else {
            return Err(CharacterError::ClipNotFound {
                character: self.name.clone(),
                clip: current.to_string(),
            });
        };
        let (Some(image), Some(grid)) = (clip.image(), clip.frame_grid()) else {
            return Err(CharacterError::ClipNotLoaded {
                character: self.name.clone(),
                clip: current.to_string(),
            });
        };
        // The frame index never reaches past the playable cells
        let Some(region) = grid.region(self.animation.current_frame()) else {
            return Ok(());
        };

        self.render_surface.clear(TRANSPARENT);
        self.render_surface.blit_region(image, region);

        let (width, height) = self.render_surface.dimensions();
        let pivot = Vec2::new(width as f32, height as f32 / 2.0);
        let dest = self.position.as_vec2() + pivot;

        target.draw_tinted_rotated(&self.render_surface, tint, pivot, dest, self.rotation, flags);
        Ok(())
    }

    /// Get the character name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the registered clips
    pub fn spritesheets(&self) -> &SpritesheetRegistry {
        &self.spritesheets
    }

    /// Get the active clip
    pub fn active_spritesheet(&self) -> Option<&SpriteClip> {
        self.animation
            .current_clip()
            .and_then(|name| self.spritesheets.get(name))
    }

    /// Get the current frame index within the active clip
    pub fn frame(&self) -> u32 {
        self.animation.current_frame()
    }

    /// Get the ticks spent on the current frame
    pub fn frame_timer(&self) -> u32 {
        self.animation.frame_timer()
    }

    /// Get the pending clip switch
    pub fn clip_switch(&self) -> &ClipSwitch {
        self.animation.switch()
    }

    /// Get the placement
    pub fn position(&self) -> IVec2 {
        self.position
    }

    /// Get the rotation in radians
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Get the single-frame buffer
    pub fn render_surface(&self) -> &Surface {
        &self.render_surface
    }
}

impl Drop for Character {
    fn drop(&mut self) {
        log::info!("Destroying character {}...", self.name);
        self.spritesheets.unload_all();
        self.render_surface.release();
    }
}
