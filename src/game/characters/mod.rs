// Character system
//
// This module contains everything related to animated on-screen actors:
// - Spritesheet registry: named animation clips loaded from descriptors
// - Clip switch state: pending successor requests
// - Animation player: the tick-driven frame clock
// - Character entity: placement, clip selection and drawing

pub mod animation;
pub mod character;
pub mod spritesheet;
pub mod state;

// Re-export commonly used types
pub use character::Character;

/// Errors from selecting or drawing character clips
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CharacterError {
    #[error("No spritesheets registered for {0}")]
    NoClipsRegistered(String),

    #[error("No spritesheet registered for {character} with name {clip}")]
    ClipNotFound { character: String, clip: String },

    #[error("Spritesheet {clip} for {character} is not loaded")]
    ClipNotLoaded { character: String, clip: String },

    #[error("No active spritesheet for {0}")]
    NoActiveClip(String),
}
