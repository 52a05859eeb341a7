// Main menu gamestate: the animated backdrop behind the menu
//
// Ego fiddles with his guitar and the cow chews, occasionally looking up.
// Menu navigation and text are drawn elsewhere.

use anyhow::{Context, Result};

use super::characters::Character;
use super::Gamestate;
use crate::core::color::{BLACK, WHITE};
use crate::core::config::GameConfig;
use crate::engine::assets::SpriteSource;
use crate::engine::renderer::{DrawFlags, Surface};
use crate::engine::timeline::{ActionOutcome, Timeline};

const EGO_CLIPS: [&str; 4] = ["stand", "fix", "fix2", "fix3"];
const COW_CLIPS: [&str; 3] = ["stand", "chew", "look"];

/// Seconds before the first guitar fix, then between fixes
const FIX_GUITAR_FIRST: u64 = 15;
const FIX_GUITAR_EVERY: u64 = 30;
/// Seconds before the cow first looks up, then between looks
const COW_LOOK_FIRST: u64 = 5;
const COW_LOOK_EVERY: u64 = 54;

/// Characters shown on the menu, also the timeline's context
#[derive(Debug)]
pub struct MenuCast {
    pub ego: Character,
    pub cow: Character,
}

impl MenuCast {
    fn new() -> Self {
        Self {
            ego: Character::new("ego"),
            cow: Character::new("cow"),
        }
    }
}

/// The menu gamestate
pub struct MenuState {
    source: Box<dyn SpriteSource>,
    cast: MenuCast,
    timeline: Timeline<MenuCast>,
    speed_modifier: f32,
    fix_guitar_first: u64,
    fix_guitar_every: u64,
    cow_look_first: u64,
    cow_look_every: u64,
}

impl MenuState {
    pub fn new(source: Box<dyn SpriteSource>, config: &GameConfig) -> Self {
        Self {
            source,
            cast: MenuCast::new(),
            timeline: Timeline::new("main"),
            speed_modifier: config.speed_modifier,
            fix_guitar_first: config.seconds_to_ticks(FIX_GUITAR_FIRST),
            fix_guitar_every: config.seconds_to_ticks(FIX_GUITAR_EVERY),
            cow_look_first: config.seconds_to_ticks(COW_LOOK_FIRST),
            cow_look_every: config.seconds_to_ticks(COW_LOOK_EVERY),
        }
    }

    /// Get the characters
    pub fn cast(&self) -> &MenuCast {
        &self.cast
    }

    /// Get the action timeline
    pub fn timeline(&self) -> &Timeline<MenuCast> {
        &self.timeline
    }
}

fn load_character(
    character: &mut Character,
    source: &dyn SpriteSource,
    clips: &[&str],
) -> Result<()> {
    for clip in clips {
        character.register_spritesheet(source, clip);
    }
    character
        .load_spritesheets(source)
        .with_context(|| format!("Failed to load spritesheets for {}", character.name()))
}

impl Gamestate for MenuState {
    fn name(&self) -> &str {
        "menu"
    }

    fn load(&mut self) -> Result<()> {
        load_character(&mut self.cast.ego, self.source.as_ref(), &EGO_CLIPS)?;
        load_character(&mut self.cast.cow, self.source.as_ref(), &COW_CLIPS)?;
        Ok(())
    }

    fn start(&mut self) -> Result<()> {
        self.cast.ego.set_position(22, 107, 0.0);
        self.cast.cow.set_position(35, 88, 0.0);
        self.cast.ego.select_spritesheet("stand")?;
        self.cast.cow.select_spritesheet("chew")?;

        let every = self.fix_guitar_every;
        self.timeline
            .add_background("fix_guitar", self.fix_guitar_first, move |cast: &mut MenuCast| {
                cast.ego.change_spritesheet("fix");
                ActionOutcome::Repeat(every)
            });

        let every = self.cow_look_every;
        self.timeline
            .add_background("cow_look", self.cow_look_first, move |cast: &mut MenuCast| {
                cast.cow.change_spritesheet("look");
                ActionOutcome::Repeat(every)
            });

        Ok(())
    }

    fn logic(&mut self) {
        self.cast.ego.animate(self.speed_modifier);
        self.cast.cow.animate(self.speed_modifier);
        self.timeline.process(&mut self.cast);
    }

    fn draw(&mut self, target: &mut Surface) {
        target.clear(BLACK);
        // Failures are logged by the character and leave it undrawn
        let _ = self.cast.cow.draw(target, WHITE, DrawFlags::NONE);
        let _ = self.cast.ego.draw(target, WHITE, DrawFlags::NONE);
    }

    fn stop(&mut self) {
        self.timeline.clear();
    }

    fn unload(&mut self) {
        self.cast.ego.unload_spritesheets();
        self.cast.cow.unload_spritesheets();
    }
}
