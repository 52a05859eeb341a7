/// Game loop timing and control system
///
/// Implements a fixed timestep loop with variable rendering. Simulation ticks,
/// and with them animation frames, happen at a consistent rate while drawing
/// happens once per frame.
use std::time::{Duration, Instant};

/// Maximum number of simulation ticks per frame to prevent spiral of death
const MAX_TICKS_PER_FRAME: u32 = 5;

/// Game loop timing state
pub struct GameLoop {
    /// Length of one simulation tick
    timestep: Duration,

    /// Accumulated time for fixed timestep updates
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Whether the game is paused
    paused: bool,

    /// Current frame number
    frame_count: u64,

    /// Total ticks executed
    tick_count: u64,
}

impl GameLoop {
    /// Create a new game loop running `ticks_per_second` simulation ticks
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            timestep: Duration::from_secs(1) / ticks_per_second.max(1),
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            paused: false,
            frame_count: 0,
            tick_count: 0,
        }
    }

    /// Begin a new frame, returns the number of ticks to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        self.accumulate(frame_time)
    }

    /// Add elapsed time and return how many whole ticks are due
    fn accumulate(&mut self, elapsed: Duration) -> u32 {
        // If paused, don't accumulate time for updates
        if self.paused {
            return 0;
        }

        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= self.timestep && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= self.timestep;
            ticks += 1;
        }

        // Drop the backlog we refused to catch up on
        if ticks == MAX_TICKS_PER_FRAME && self.accumulator >= self.timestep {
            log::warn!(
                "Simulation fell behind, skipping {:?}",
                self.accumulator
            );
            self.accumulator = Duration::ZERO;
        }

        self.tick_count += ticks as u64;
        ticks
    }

    /// Time left until the next tick is due
    pub fn time_until_next_tick(&self) -> Duration {
        self.timestep.saturating_sub(self.accumulator)
    }

    /// Get the fixed timestep
    pub fn timestep(&self) -> Duration {
        self.timestep
    }

    /// Get total number of frames
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of ticks executed
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Check if game is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the game
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    /// Resume the game
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            self.last_frame_time = Instant::now();
            log::info!("Game resumed");
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new(60)
    }
}
