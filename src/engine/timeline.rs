// Queued background actions driven by the simulation tick
//
// Actions live in named slots. Adding an action under a name that is already
// queued replaces it, and an action can ask to run again after another delay.

use std::fmt;

/// What a background action wants after it ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Drop the action
    Done,
    /// Run the same action again after this many ticks
    Repeat(u64),
}

/// Callback run against the timeline's context
pub type ActionFn<C> = Box<dyn FnMut(&mut C) -> ActionOutcome>;

struct QueuedAction<C> {
    name: String,
    remaining: u64,
    action: ActionFn<C>,
}

impl<C> fmt::Debug for QueuedAction<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueuedAction")
            .field("name", &self.name)
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

/// Scheduler of delayed, cancelable actions
#[derive(Debug)]
pub struct Timeline<C> {
    name: String,
    actions: Vec<QueuedAction<C>>,
    tick: u64,
}

impl<C> Timeline<C> {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            actions: Vec::new(),
            tick: 0,
        }
    }

    /// Queue `action` to run after `delay` ticks
    ///
    /// A delay of 0 or 1 runs the action on the next call to [`Timeline::process`].
    pub fn add_background<F>(&mut self, name: &str, delay: u64, action: F)
    where
        F: FnMut(&mut C) -> ActionOutcome + 'static,
    {
        if self.cancel(name) {
            log::debug!("Timeline {}: replacing queued action {}", self.name, name);
        }

        log::debug!(
            "Timeline {}: queued {} to run in {} ticks",
            self.name,
            name,
            delay
        );
        self.actions.push(QueuedAction {
            name: name.to_string(),
            remaining: delay.max(1),
            action: Box::new(action),
        });
    }

    /// Remove a queued action, returns whether one was queued
    pub fn cancel(&mut self, name: &str) -> bool {
        let before = self.actions.len();
        self.actions.retain(|queued| queued.name != name);
        let removed = self.actions.len() != before;

        if removed {
            log::debug!("Timeline {}: canceled {}", self.name, name);
        }
        removed
    }

    /// Remove every queued action
    pub fn clear(&mut self) {
        self.actions.clear();
    }

    /// Advance one tick, running every action whose delay elapsed
    pub fn process(&mut self, context: &mut C) {
        self.tick += 1;

        let mut due = Vec::new();
        let mut index = 0;
        while index < self.actions.len() {
            if self.actions[index].remaining <= 1 {
                due.push(self.actions.remove(index));
            } else {
                self.actions[index].remaining -= 1;
                index += 1;
            }
        }

        for mut queued in due {
            log::debug!("Timeline {}: running {}", self.name, queued.name);
            match (queued.action)(context) {
                ActionOutcome::Done => {}
                ActionOutcome::Repeat(delay) => {
                    queued.remaining = delay.max(1);
                    self.actions.push(queued);
                }
            }
        }
    }

    /// Check if an action is queued under `name`
    pub fn is_queued(&self, name: &str) -> bool {
        self.actions.iter().any(|queued| queued.name == name)
    }

    /// Ticks left before the named action runs
    pub fn remaining(&self, name: &str) -> Option<u64> {
        self.actions
            .iter()
            .find(|queued| queued.name == name)
            .map(|queued| queued.remaining)
    }

    /// Number of queued actions
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Ticks processed so far
    pub fn tick(&self) -> u64 {
        self.tick
    }
}
