// retrace_sim/src/simulation/core/components.rs

use bevy::prelude::Component;
use retrace_core::prelude::{MovementController, PathRecorder, TriggerSignals};

// --- Wrapper Components for Core Types ---

/// A Bevy component that wraps the pure `PathRecorder` state machine.
/// The entity it sits on is the body that gets recorded and replayed.
#[derive(Component, Debug)]
#[require(RecorderSignals)]
pub struct TrajectoryRecorder(pub PathRecorder);

/// A "mailbox" for trigger edges. Input systems fold edges in every frame and
/// the fixed-step driver takes them, so a press shorter than a fixed step is
/// never lost.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct RecorderSignals(pub TriggerSignals);

/// Marks a body whose replayed velocity must be cleared at the start of the
/// next fixed step, after the final move of a finished replay has landed.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct HaltAfterStep;

/// The body's input-driven movement controller. Drivers only steer the body
/// while `enabled` is set; the recorder clears it for the length of a replay.
#[derive(Component, Debug, Clone, Copy)]
pub struct MovementControl {
    pub enabled: bool,
    /// Ground speed in m/s.
    pub speed: f32,
}

impl Default for MovementControl {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: 5.0,
        }
    }
}

impl MovementController for MovementControl {
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
