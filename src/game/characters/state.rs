// Clip switch state machine
//
// A character is either idle on its active clip, or has a clip queued to
// become active the next time the active one wraps around. Explicit selection
// bypasses the queue; see `Character::select_spritesheet`.

use super::spritesheet::SpriteClip;

/// Pending clip change of a character
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ClipSwitch {
    /// Keep looping the active clip
    #[default]
    Idle,
    /// Switch to the named clip at the next frame wrap
    PendingSwitch(String),
}

impl ClipSwitch {
    /// State right after `clip` became active: its declared successor, if any, is pending
    pub fn after(clip: &SpriteClip) -> Self {
        match &clip.successor {
            Some(successor) => Self::PendingSwitch(successor.clone()),
            None => Self::Idle,
        }
    }

    /// Queue `name`, replacing whatever was pending
    pub fn request(&mut self, name: &str) {
        *self = Self::PendingSwitch(name.to_string());
    }

    /// Consume the pending target, leaving the state idle
    pub fn take_pending(&mut self) -> Option<String> {
        match std::mem::take(self) {
            Self::Idle => None,
            Self::PendingSwitch(name) => Some(name),
        }
    }

    /// Get the pending target
    pub fn pending(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::PendingSwitch(name) => Some(name),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::PendingSwitch(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::ClipDescriptor;

    fn clip(successor: Option<&str>) -> SpriteClip {
        SpriteClip::from_descriptor(
            "fix",
            ClipDescriptor {
                cols: 2,
                rows: 1,
                blanks: 0,
                delay: 1.0,
                successor: successor.map(str::to_string),
            },
        )
    }

    #[test]
    fn test_default_is_idle() {
        let state = ClipSwitch::default();
        assert_eq!(state, ClipSwitch::Idle);
        assert!(!state.is_pending());
        assert_eq!(state.pending(), None);
    }

    #[test]
    fn test_after_inherits_successor() {
        assert_eq!(
            ClipSwitch::after(&clip(Some("fix2"))),
            ClipSwitch::PendingSwitch("fix2".to_string())
        );
        assert_eq!(ClipSwitch::after(&clip(None)), ClipSwitch::Idle);
    }

    #[test]
    fn test_request_replaces_pending() {
        let mut state = ClipSwitch::after(&clip(Some("fix2")));
        state.request("stand");
        assert_eq!(state.pending(), Some("stand"));
    }

    #[test]
    fn test_take_pending_consumes() {
        let mut state = ClipSwitch::Idle;
        assert_eq!(state.take_pending(), None);

        state.request("look");
        assert_eq!(state.take_pending(), Some("look".to_string()));
        assert_eq!(state, ClipSwitch::Idle);
    }
}
