// retrace_sim/src/simulation/core/events.rs
use bevy::prelude::Event;
use retrace_core::prelude::{BodyHandle, RecorderEvent};

/// A core `RecorderEvent` tagged with the body that produced it.
#[derive(Event, Debug, Clone)]
pub struct RecorderNotice {
    pub body: BodyHandle,
    pub event: RecorderEvent,
}
