// retrace_core/src/error.rs

use thiserror::Error;

use crate::types::BodyHandle;

/// The external collaborators a recorder cannot work without.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollaboratorRole {
    /// The physics body whose pose is sampled and replayed.
    MotionSource,
    /// The input-driven controller suspended during playback.
    MovementController,
}

impl std::fmt::Display for CollaboratorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollaboratorRole::MotionSource => write!(f, "motion source"),
            CollaboratorRole::MovementController => write!(f, "movement controller"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecorderError {
    /// Playback was requested but the trajectory has fewer than two samples.
    #[error("cannot play back a trajectory with {samples} sample(s); at least 2 are required")]
    InsufficientData { samples: usize },

    /// A recorder was set up without one of its collaborators.
    #[error("{} is missing its {role}", body_label(.body))]
    MissingCollaborator {
        body: Option<BodyHandle>,
        role: CollaboratorRole,
    },

    #[error("invalid recorder configuration: {0}")]
    InvalidConfig(String),
}

impl RecorderError {
    pub fn missing(role: CollaboratorRole) -> Self {
        Self::MissingCollaborator { body: None, role }
    }

    /// Attributes a `MissingCollaborator` error to a specific body.
    pub fn for_body(self, handle: BodyHandle) -> Self {
        match self {
            Self::MissingCollaborator { role, .. } => Self::MissingCollaborator {
                body: Some(handle),
                role,
            },
            other => other,
        }
    }
}

fn body_label(body: &Option<BodyHandle>) -> String {
    match body {
        Some(handle) => format!("recorder on {}", handle),
        None => "recorder".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_collaborator_message_names_body_and_role() {
        let err = RecorderError::missing(CollaboratorRole::MovementController).for_body(BodyHandle(7));
        assert_eq!(
            err.to_string(),
            "recorder on body#7 is missing its movement controller"
        );
    }

    #[test]
    fn for_body_leaves_other_errors_untouched() {
        let err = RecorderError::InsufficientData { samples: 1 }.for_body(BodyHandle(3));
        assert_eq!(err, RecorderError::InsufficientData { samples: 1 });
    }
}
