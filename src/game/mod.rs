// Game modules: characters and gamestates

pub mod characters;
pub mod menu;

use crate::engine::renderer::Surface;
use anyhow::Result;

/// A screen of the game with its own resources and update logic
///
/// The lifecycle is `load`, `start`, then any number of `logic` / `draw`
/// pairs, then `stop` and `unload`.
pub trait Gamestate {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Load resources; failures here are fatal
    fn load(&mut self) -> Result<()>;

    /// Reset state and schedule initial actions; failures here are fatal
    fn start(&mut self) -> Result<()>;

    /// Advance one simulation tick
    fn logic(&mut self);

    /// Draw the current state onto `target`
    fn draw(&mut self, target: &mut Surface);

    /// Cancel pending actions
    fn stop(&mut self);

    /// Release resources
    fn unload(&mut self);
}
