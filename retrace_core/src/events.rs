// retrace_core/src/events.rs

use crate::{error::RecorderError, types::Pose};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingStopReason {
    /// The session reached `max_record_duration`.
    DurationElapsed,
    /// The record trigger was released.
    Released,
    /// A new recording or a playback replaced the session.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStopReason {
    /// Every segment was replayed.
    PathExhausted,
    /// The play trigger was released.
    Released,
    /// A new recording replaced the playback.
    Superseded,
}

/// Notifications a recorder emits while it is driven.
/// Returned from each tick so the host can log or re-publish them.
#[derive(Debug, Clone, PartialEq)]
pub enum RecorderEvent {
    RecordingStarted { anchor: Pose },
    SampleRecorded { index: usize },
    RecordingStopped {
        samples: usize,
        reason: RecordingStopReason,
    },
    PlaybackStarted { anchor: Pose, samples: usize },
    /// A play trigger was ignored; the recorder stays where it was.
    PlaybackRejected(RecorderError),
    PlaybackStopped { reason: PlaybackStopReason },
}
