// retrace_core/src/prelude.rs

// --- Core Abstractions (The main contracts of the library) ---
pub use crate::abstractions::{MotionSource, MovementController, RecorderRig};

// --- Core Data Structures (The "nouns" of the library) ---
pub use crate::config::RecorderConfig;
pub use crate::trajectory::Trajectory;
pub use crate::types::{BodyHandle, Pose, Sample};

// --- The Recorder ---
pub use crate::recorder::{PathRecorder, PlaybackCursor, RecorderState, TriggerSignals};

// --- Errors & Notifications ---
pub use crate::error::{CollaboratorRole, RecorderError};
pub use crate::events::{PlaybackStopReason, RecorderEvent, RecordingStopReason};
