// Tick-driven animation clock
//
// Frame delays are counted in simulation ticks, so `advance` must be called
// exactly once per fixed-rate tick.

use super::spritesheet::SpriteClip;
use super::state::ClipSwitch;

/// Playback cursor over a character's active clip
#[derive(Debug, Default)]
pub struct AnimationPlayer {
    /// Currently playing clip name
    current_clip: Option<String>,
    /// Current playable frame index
    current_frame: u32,
    /// Ticks spent on the current frame
    frame_timer: u32,
    /// Clip queued for the next frame wrap
    switch: ClipSwitch,
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `clip` from its first frame, queueing its successor
    pub fn play_from_start(&mut self, clip: &SpriteClip) {
        self.current_clip = Some(clip.name.clone());
        self.current_frame = 0;
        self.frame_timer = 0;
        self.switch = ClipSwitch::after(clip);
    }

    /// Queue `name` to become active at the next frame wrap
    pub fn request(&mut self, name: &str) {
        self.switch.request(name);
    }

    /// Advance one tick of `clip`, which must be the current clip
    ///
    /// A `speed` of 0 pauses playback. Returns the clip to switch to when the
    /// clip wrapped around with a switch pending.
    pub fn advance(&mut self, clip: &SpriteClip, speed: f32) -> Option<String> {
        if speed == 0.0 {
            return None;
        }

        self.frame_timer += 1;
        if self.frame_timer as f32 >= clip.frame_delay / speed {
            self.frame_timer = 0;
            self.current_frame += 1;
        }

        if self.current_frame >= clip.playable_frames() {
            self.current_frame = 0;
            return self.switch.take_pending();
        }

        None
    }

    /// Get the current clip name
    pub fn current_clip(&self) -> Option<&str> {
        self.current_clip.as_deref()
    }

    /// Get the current frame index
    pub fn current_frame(&self) -> u32 {
        self.current_frame
    }

    /// Get the ticks spent on the current frame
    pub fn frame_timer(&self) -> u32 {
        self.frame_timer
    }

    /// Get the clip switch state
    pub fn switch(&self) -> &ClipSwitch {
        &self.switch
    }
}
