use avian3d::prelude::{AngularVelocity, LinearVelocity, Position, RigidBody, Rotation};

use crate::prelude::*;
use crate::simulation::core::motion::PhysicsBodyMotion;

// =========================================================================
// == Setup Validation ==
// =========================================================================

/// The first collaborator a recorder entity is missing, if any.
pub fn collaborator_error(
    entity: Entity,
    has_body: bool,
    has_controller: bool,
) -> Option<RecorderError> {
    let role = if !has_body {
        CollaboratorRole::MotionSource
    } else if !has_controller {
        CollaboratorRole::MovementController
    } else {
        return None;
    };
    Some(RecorderError::missing(role).for_body(BodyHandle::from_entity(entity)))
}

/// SCENE BUILDING: every recorder needs a rigid body to sample and replay and a
/// movement controller to suspend. A scene without them cannot run.
pub fn check_collaborators(
    query: Query<
        (Entity, Option<&Name>, Has<RigidBody>, Has<MovementControl>),
        With<TrajectoryRecorder>,
    >,
) {
    for (entity, name, has_body, has_controller) in &query {
        if let Some(err) = collaborator_error(entity, has_body, has_controller) {
            let label = name.map(|n| n.as_str()).unwrap_or("<unnamed>");
            error!("[VALIDATION] '{}': {}", label, err);
            panic!("{err}");
        }
    }
    info!("[VALIDATION] {} recorder(s) ready.", query.iter().len());
}

// =========================================================================
// == Runtime ==
// =========================================================================

/// Reads this frame's trigger edges for the configured bindings.
pub fn edges_from_input(
    keyboard: &ButtonInput<KeyCode>,
    bindings: &KeyBindings,
) -> TriggerSignals {
    TriggerSignals {
        record_pressed: keyboard.just_pressed(bindings.record),
        record_released: keyboard.just_released(bindings.record),
        play_pressed: keyboard.just_pressed(bindings.play),
        play_released: keyboard.just_released(bindings.play),
    }
}

/// UPDATE: folds keyboard edges into every recorder's mailbox.
pub fn latch_recorder_signals(
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut query: Query<&mut RecorderSignals>,
) {
    let edges = edges_from_input(&keyboard, &bindings);
    if edges.is_empty() {
        return;
    }
    for mut signals in &mut query {
        signals.0.merge(edges);
    }
}

/// FIXED UPDATE: stops bodies whose replay ended with a move on the previous
/// step, now that the physics step has carried them onto the end of the path.
pub fn settle_finished_replays(
    mut commands: Commands,
    mut query: Query<(Entity, &mut LinearVelocity, &mut AngularVelocity), With<HaltAfterStep>>,
) {
    for (entity, mut lin_vel, mut ang_vel) in &mut query {
        lin_vel.0 = Vec3::ZERO;
        ang_vel.0 = Vec3::ZERO;
        commands.entity(entity).remove::<HaltAfterStep>();
    }
}

/// FIXED UPDATE: ticks each recorder once per physics step.
pub fn drive_trajectory_recorders(
    mut commands: Commands,
    time: Res<Time>,
    mut notices: EventWriter<RecorderNotice>,
    mut query: Query<(
        Entity,
        &mut TrajectoryRecorder,
        &mut RecorderSignals,
        &Position,
        &Rotation,
        &mut LinearVelocity,
        &mut AngularVelocity,
        &mut MovementControl,
    )>,
) {
    let dt = time.delta_secs_f64();

    for (
        entity,
        mut recorder,
        mut signals,
        position,
        rotation,
        mut lin_vel,
        mut ang_vel,
        mut control,
    ) in &mut query
    {
        let edges = std::mem::take(&mut signals.0);
        // Nothing to do for an idle recorder without input.
        if edges.is_empty() && recorder.0.state() == RecorderState::Idle {
            continue;
        }

        let mut motion =
            PhysicsBodyMotion::new(position, rotation, &mut lin_vel, &mut ang_vel, dt);
        let mut rig = RecorderRig::new(&mut motion, &mut *control);
        let events = recorder.0.tick(dt, edges, &mut rig);
        if motion.halt_requested() {
            commands.entity(entity).insert(HaltAfterStep);
        }

        let body = BodyHandle::from_entity(entity);
        for event in events {
            notices.write(RecorderNotice { body, event });
        }
    }
}

/// UPDATE: reports what the recorders did.
pub fn log_recorder_notices(mut notices: EventReader<RecorderNotice>) {
    for RecorderNotice { body, event } in notices.read() {
        match event {
            RecorderEvent::RecordingStarted { anchor } => {
                info!("[RECORDER] {body}: recording from {:?}", anchor.position.as_slice());
            }
            RecorderEvent::SampleRecorded { index } => {
                debug!("[RECORDER] {body}: sample #{index}");
            }
            RecorderEvent::RecordingStopped { samples, reason } => {
                info!("[RECORDER] {body}: stored {samples} sample(s) ({reason:?})");
            }
            RecorderEvent::PlaybackStarted { anchor, samples } => {
                info!(
                    "[RECORDER] {body}: replaying {samples} sample(s) from {:?}",
                    anchor.position.as_slice()
                );
            }
            RecorderEvent::PlaybackRejected(err) => {
                warn!("[RECORDER] {body}: playback ignored: {err}");
            }
            RecorderEvent::PlaybackStopped { reason } => {
                info!("[RECORDER] {body}: playback ended ({reason:?})");
            }
        }
    }
}
