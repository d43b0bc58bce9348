// retrace_core/src/recorder.rs

//! The record/playback state machine.
//!
//! A `PathRecorder` is advanced one tick at a time by its host. While
//! `Recording` it samples the motion source at a fixed cadence; while `Playing`
//! it walks the recorded segments and commands the motion source onto the
//! interpolated pose, re-anchored at wherever playback began.

use nalgebra::Vector3;

use crate::{
    abstractions::{MotionSource, RecorderRig},
    config::RecorderConfig,
    error::RecorderError,
    events::{PlaybackStopReason, RecorderEvent, RecordingStopReason},
    interpolation::clamp01,
    trajectory::Trajectory,
    types::{Pose, Sample},
};

/// Slack applied when a timer is compared against its threshold, so that a
/// threshold reached by summing ticks (ten ticks of 0.01 s against 0.1 s) fires
/// on the tick it is meant to.
pub const TIMER_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecorderState {
    #[default]
    Idle,
    Recording,
    Playing,
}

/// Position of the player inside the trajectory.
/// `segment_time` is wall-clock time spent in the current segment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackCursor {
    pub segment_index: usize,
    pub segment_time: f64,
}

/// Trigger edges observed since the previous tick.
///
/// Holding a trigger keeps its state alive; the host reports the press and the
/// release as separate edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriggerSignals {
    pub record_pressed: bool,
    pub record_released: bool,
    pub play_pressed: bool,
    pub play_released: bool,
}

impl TriggerSignals {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Folds edges from a later frame into this one.
    ///
    /// `tick` applies a press before a release, so a later press drops any
    /// release still pending for the same trigger. A later release keeps the
    /// pending press: press-then-release already replays in order.
    pub fn merge(&mut self, other: TriggerSignals) {
        fold_edges(
            (&mut self.record_pressed, &mut self.record_released),
            (other.record_pressed, other.record_released),
        );
        fold_edges(
            (&mut self.play_pressed, &mut self.play_released),
            (other.play_pressed, other.play_released),
        );
    }
}

fn fold_edges(pending: (&mut bool, &mut bool), later: (bool, bool)) {
    let (pressed, released) = pending;
    if later.0 {
        *pressed = true;
        *released = later.1;
    } else {
        *released |= later.1;
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct RecordingTimers {
    elapsed: f64,
    since_sample: f64,
}

/// Records a body's motion relative to where recording began and replays it
/// relative to where playback begins.
#[derive(Debug, Clone)]
pub struct PathRecorder {
    config: RecorderConfig,
    state: RecorderState,
    trajectory: Trajectory,
    recording_anchor: Option<Pose>,
    playback_anchor: Option<Pose>,
    timers: RecordingTimers,
    cursor: PlaybackCursor,
}

impl PathRecorder {
    pub fn new(config: RecorderConfig) -> Result<Self, RecorderError> {
        config.validate()?;
        Ok(Self {
            config,
            state: RecorderState::Idle,
            trajectory: Trajectory::with_capacity(config.expected_sample_count() + 1),
            recording_anchor: None,
            playback_anchor: None,
            timers: RecordingTimers::default(),
            cursor: PlaybackCursor::default(),
        })
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn recording_anchor(&self) -> Option<&Pose> {
        self.recording_anchor.as_ref()
    }

    pub fn playback_anchor(&self) -> Option<&Pose> {
        self.playback_anchor.as_ref()
    }

    /// The playback cursor, only meaningful while `Playing`.
    pub fn cursor(&self) -> Option<PlaybackCursor> {
        (self.state == RecorderState::Playing).then_some(self.cursor)
    }

    /// Seconds elapsed in the current recording session.
    pub fn recording_elapsed(&self) -> Option<f64> {
        (self.state == RecorderState::Recording).then_some(self.timers.elapsed)
    }

    /// Advances the recorder by one scheduling tick of `dt` seconds.
    ///
    /// Trigger edges are applied first (record, then play), followed by the
    /// time-driven work of whichever state is active. On the tick a state is
    /// entered its timers start from zero.
    pub fn tick(
        &mut self,
        dt: f64,
        signals: TriggerSignals,
        rig: &mut RecorderRig<'_>,
    ) -> Vec<RecorderEvent> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let mut events = Vec::new();

        let mut entered_recording = false;
        if signals.record_pressed {
            events.extend(self.start_recording(rig));
            entered_recording = true;
        }

        if self.state == RecorderState::Recording {
            if !entered_recording {
                events.extend(self.record_step(dt, &*rig.source));
            }
            if self.state == RecorderState::Recording && signals.record_released {
                events.extend(self.finish_recording(RecordingStopReason::Released));
            }
        }

        // Play is only honoured from Idle; a recording in progress keeps going.
        let mut entered_playback = false;
        if signals.play_pressed && self.state == RecorderState::Idle {
            events.extend(self.start_playback(rig));
            entered_playback = self.state == RecorderState::Playing;
        }

        if self.state == RecorderState::Playing {
            if signals.play_released {
                events.extend(self.stop_playback(rig));
            } else if !entered_playback {
                events.extend(self.advance(dt, rig));
            }
        }

        events
    }

    // ----------- Recording -----------

    /// Begins a fresh recording session, discarding the previous trajectory.
    /// Calling this while already recording restarts the session; calling it
    /// while playing ends the playback first.
    pub fn start_recording(&mut self, rig: &mut RecorderRig<'_>) -> Vec<RecorderEvent> {
        let mut events = Vec::new();
        match self.state {
            RecorderState::Recording => {
                events.extend(self.finish_recording(RecordingStopReason::Superseded))
            }
            RecorderState::Playing => {
                events.extend(self.finish_playback(rig, PlaybackStopReason::Superseded))
            }
            RecorderState::Idle => {}
        }

        let anchor = rig.source.pose();
        self.trajectory.clear();
        self.recording_anchor = Some(anchor);
        self.timers = RecordingTimers::default();
        self.state = RecorderState::Recording;
        events.push(RecorderEvent::RecordingStarted { anchor });
        events
    }

    fn record_step(&mut self, dt: f64, source: &dyn MotionSource) -> Vec<RecorderEvent> {
        let mut events = Vec::new();
        let Some(anchor) = self.recording_anchor else {
            return events;
        };
        let interval = self.config.sample_interval;

        self.timers.elapsed += dt;
        self.timers.since_sample += dt;

        if self.timers.since_sample + TIMER_EPSILON >= interval {
            self.trajectory.push(Sample::relative_to(&anchor, &source.pose()));
            events.push(RecorderEvent::SampleRecorded {
                index: self.trajectory.len() - 1,
            });
            self.timers.since_sample = 0.0;
        }

        if self.timers.elapsed + TIMER_EPSILON >= self.config.max_record_duration {
            events.extend(self.finish_recording(RecordingStopReason::DurationElapsed));
        }
        events
    }

    fn finish_recording(&mut self, reason: RecordingStopReason) -> Vec<RecorderEvent> {
        if self.state != RecorderState::Recording {
            return Vec::new();
        }
        self.state = RecorderState::Idle;
        vec![RecorderEvent::RecordingStopped {
            samples: self.trajectory.len(),
            reason,
        }]
    }

    // ----------- Playback -----------

    /// Starts replaying the stored trajectory from the body's current pose.
    ///
    /// Only starts from `Idle`: ignored while playing or recording. A trajectory
    /// with fewer than two samples is rejected with `InsufficientData`; the
    /// collaborators are left alone.
    pub fn start_playback(&mut self, rig: &mut RecorderRig<'_>) -> Vec<RecorderEvent> {
        let mut events = Vec::new();
        if self.state != RecorderState::Idle {
            return events;
        }

        if !self.trajectory.is_playable() {
            events.push(RecorderEvent::PlaybackRejected(
                RecorderError::InsufficientData {
                    samples: self.trajectory.len(),
                },
            ));
            return events;
        }

        let anchor = rig.source.pose();
        self.playback_anchor = Some(anchor);
        self.cursor = PlaybackCursor::default();
        rig.controller.set_enabled(false);
        rig.source.zero_velocity();
        self.state = RecorderState::Playing;
        events.push(RecorderEvent::PlaybackStarted {
            anchor,
            samples: self.trajectory.len(),
        });

        // Put the body on the first sample straight away.
        events.extend(self.advance(0.0, rig));
        events
    }

    /// Ends playback as if the play trigger had been released.
    pub fn stop_playback(&mut self, rig: &mut RecorderRig<'_>) -> Vec<RecorderEvent> {
        self.finish_playback(rig, PlaybackStopReason::Released)
    }

    /// Moves the cursor forward by `dt` seconds and commands the body onto the
    /// interpolated pose.
    ///
    /// Whole segments are consumed one at a time, so a long tick or a high
    /// playback speed skips segments without losing time.
    pub fn advance(&mut self, dt: f64, rig: &mut RecorderRig<'_>) -> Vec<RecorderEvent> {
        if self.state != RecorderState::Playing {
            return Vec::new();
        }
        let Some(anchor) = self.playback_anchor else {
            return Vec::new();
        };

        let segment_duration = self.config.segment_duration();
        let last_segment = self.trajectory.segment_count();

        self.cursor.segment_time += dt;
        while self.cursor.segment_time + TIMER_EPSILON >= segment_duration
            && self.cursor.segment_index < last_segment
        {
            self.cursor.segment_time -= segment_duration;
            self.cursor.segment_index += 1;
        }

        if self.cursor.segment_index >= last_segment {
            // Path exhausted: finish on the recorded end point.
            if let Some(end) = self.trajectory.last() {
                rig.source
                    .move_to(end.world_position(&anchor.position), end.orientation);
            }
            return self.finish_playback(rig, PlaybackStopReason::PathExhausted);
        }

        let t = clamp01(self.cursor.segment_time / segment_duration);
        if let Some(target) = self.trajectory.interpolate(self.cursor.segment_index, t) {
            rig.source
                .move_to(target.world_position(&anchor.position), target.orientation);
        }
        Vec::new()
    }

    /// Hands the body back to its controller with no replayed velocity left on it.
    fn finish_playback(
        &mut self,
        rig: &mut RecorderRig<'_>,
        reason: PlaybackStopReason,
    ) -> Vec<RecorderEvent> {
        if self.state != RecorderState::Playing {
            return Vec::new();
        }
        self.state = RecorderState::Idle;
        rig.source.zero_velocity();
        rig.controller.set_enabled(true);
        vec![RecorderEvent::PlaybackStopped { reason }]
    }

    // ----------- Visualization -----------

    /// World-space line segments of the stored path.
    ///
    /// Anchored at the playback start while playing, at the recording start
    /// otherwise, and at `live_position` when nothing was ever recorded.
    pub fn path_segments(
        &self,
        live_position: Vector3<f64>,
    ) -> impl Iterator<Item = (Vector3<f64>, Vector3<f64>)> + '_ {
        let anchor = match (self.state, self.playback_anchor, self.recording_anchor) {
            (RecorderState::Playing, Some(playback), _) => playback.position,
            (_, _, Some(recording)) => recording.position,
            _ => live_position,
        };
        self.trajectory.world_segments(anchor)
    }
}
