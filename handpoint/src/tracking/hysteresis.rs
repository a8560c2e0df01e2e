//! Two-state debounce latch with multi-frame confirmation.
//!
//! Shared by the pinch and thumbs-up detectors.  The latch is either
//! `Released` or `Engaged`; each state carries only the streak counter that
//! can move it to the other state, so at most one counter is ever non-zero.

/// Frames of consecutive evidence required for each transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HysteresisConfig {
    /// Consecutive engage-frames to go `Released -> Engaged`.
    pub on_frames: u32,
    /// Consecutive release-frames to go `Engaged -> Released`.
    pub off_frames: u32,
}

impl HysteresisConfig {
    pub const fn new(on_frames: u32, off_frames: u32) -> Self {
        Self {
            on_frames,
            off_frames,
        }
    }
}

/// Latch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatchState {
    /// Not engaged; counting consecutive engage-frames.
    Released { on_streak: u32 },
    /// Engaged; counting consecutive release-frames.
    Engaged { off_streak: u32 },
}

impl Default for LatchState {
    fn default() -> Self {
        Self::Released { on_streak: 0 }
    }
}

/// Result of one latch step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    Engaged,
    Released,
}

/// Debounce latch.
#[derive(Debug, Clone)]
pub struct Hysteresis {
    config: HysteresisConfig,
    state: LatchState,
}

impl Hysteresis {
    pub fn new(config: HysteresisConfig) -> Self {
        Self {
            config,
            state: LatchState::default(),
        }
    }

    /// Advance one frame.
    ///
    /// `engage` is the evidence checked while released, `release` the
    /// evidence checked while engaged.  Passing distinct thresholds gives a
    /// hysteresis gap.
    pub fn step(&mut self, engage: bool, release: bool) -> Transition {
        match self.state {
            LatchState::Released { on_streak } => {
                let on_streak = if engage { on_streak + 1 } else { 0 };
                if on_streak >= self.config.on_frames {
                    self.state = LatchState::Engaged { off_streak: 0 };
                    Transition::Engaged
                } else {
                    self.state = LatchState::Released { on_streak };
                    Transition::None
                }
            }
            LatchState::Engaged { off_streak } => {
                let off_streak = if release { off_streak + 1 } else { 0 };
                if off_streak >= self.config.off_frames {
                    self.state = LatchState::Released { on_streak: 0 };
                    Transition::Released
                } else {
                    self.state = LatchState::Engaged { off_streak };
                    Transition::None
                }
            }
        }
    }

    pub fn is_engaged(&self) -> bool {
        matches!(self.state, LatchState::Engaged { .. })
    }

    pub fn state(&self) -> LatchState {
        self.state
    }

    /// (on_streak, off_streak) view of the state.
    pub fn streaks(&self) -> (u32, u32) {
        match self.state {
            LatchState::Released { on_streak } => (on_streak, 0),
            LatchState::Engaged { off_streak } => (0, off_streak),
        }
    }

    /// Force the latch engaged with no pending release evidence.
    pub fn hold_engaged(&mut self) {
        self.state = LatchState::Engaged { off_streak: 0 };
    }

    pub fn reset(&mut self) {
        self.state = LatchState::default();
    }

    pub fn config(&self) -> &HysteresisConfig {
        &self.config
    }
}
