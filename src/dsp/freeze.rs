//! # Freeze
//!
//! Freeze captures whatever is circulating in the combs and holds it.
//! While frozen, the engine:
//!
//! - sets every comb gain to [`FREEZE_GAIN`](super::comb::FREEZE_GAIN),
//!   a hair under unity;
//! - bypasses damping, so the spectrum doesn't dull away;
//! - stops feeding new input into the combs.
//!
//! The result is an endless pad built from the last moment of the tail.
//!
//! Entering freeze always keeps the current tail. What happens to that
//! tail when freeze is released is a [`FreezeRelease`] policy choice.

/// What the frozen tail does when freeze is switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FreezeRelease {
    /// Restore the rt60 gains and let the held tail die away naturally.
    #[default]
    Decay,
    /// Silence all comb and diffusion buffers at once.
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreezeState {
    Normal,
    Frozen,
}

/// What [`FreezeController::update()`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreezeTransition {
    Unchanged,
    Entered,
    Released(FreezeRelease),
}

pub struct FreezeController {
    state: FreezeState,
    release: FreezeRelease,
}

impl FreezeController {
    pub fn new(frozen: bool) -> Self {
        Self {
            state: if frozen {
                FreezeState::Frozen
            } else {
                FreezeState::Normal
            },
            release: FreezeRelease::default(),
        }
    }

    /// Move to the requested state and report the edge, if any.
    pub fn update(&mut self, freeze: bool) -> FreezeTransition {
        match (self.state, freeze) {
            (FreezeState::Normal, true) => {
                self.state = FreezeState::Frozen;
                FreezeTransition::Entered
            }
            (FreezeState::Frozen, false) => {
                self.state = FreezeState::Normal;
                FreezeTransition::Released(self.release)
            }
            _ => FreezeTransition::Unchanged,
        }
    }

    pub fn set_release(&mut self, release: FreezeRelease) {
        self.release = release;
    }

    pub fn release(&self) -> FreezeRelease {
        self.release
    }

    pub fn state(&self) -> FreezeState {
        self.state
    }

    pub fn is_frozen(&self) -> bool {
        self.state == FreezeState::Frozen
    }
}
