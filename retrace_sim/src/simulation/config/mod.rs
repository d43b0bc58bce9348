// retrace_sim/src/simulation/config/mod.rs

//! This module handles loading and validating the scenario configuration
//! from disk.

mod serde_helpers;

pub mod structs;

use figment::{
    providers::{Format, Toml},
    Figment,
};
use retrace_core::prelude::RecorderError;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Re-export public types
pub use structs::{BodyConfig, KeyBindings, PoseConfig, ScenarioConfig, Simulation, WorldConfig};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario file not found at '{}'", .0.display())]
    NotFound(PathBuf),

    #[error("failed to parse scenario: {0}")]
    Parse(#[from] Box<figment::Error>),

    #[error(transparent)]
    Recorder(#[from] RecorderError),

    #[error("`simulation.physics_hz` must be a positive, finite number (got {0})")]
    PhysicsRate(f64),
}

/// Loads a scenario TOML file and validates it.
pub fn load_scenario(path: &Path) -> Result<ScenarioConfig, ScenarioError> {
    if !path.is_file() {
        return Err(ScenarioError::NotFound(path.to_path_buf()));
    }
    extract(Figment::new().merge(Toml::file(path)))
}

/// Parses and validates a scenario from an in-memory TOML document.
pub fn parse_scenario(toml: &str) -> Result<ScenarioConfig, ScenarioError> {
    extract(Figment::new().merge(Toml::string(toml)))
}

fn extract(figment: Figment) -> Result<ScenarioConfig, ScenarioError> {
    let config: ScenarioConfig = figment.extract().map_err(Box::new)?;
    validate(&config)?;
    Ok(config)
}

pub fn validate(config: &ScenarioConfig) -> Result<(), ScenarioError> {
    config.recorder.validate()?;
    let hz = config.simulation.physics_hz;
    if !hz.is_finite() || hz <= 0.0 {
        return Err(ScenarioError::PhysicsRate(hz));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use bevy::prelude::KeyCode;

    #[test]
    fn empty_scenario_uses_defaults() {
        let config = parse_scenario("").unwrap();
        assert_eq!(config.recorder.max_record_duration, 5.0);
        assert_eq!(config.recorder.sample_interval, 0.05);
        assert_eq!(config.recorder.playback_speed, 1.0);
        assert_eq!(config.bindings, KeyBindings::default());
        assert_eq!(config.simulation.physics_hz, 60.0);
    }

    #[test]
    fn full_scenario_is_parsed() {
        let config = parse_scenario(
            r#"
            [simulation]
            seed = 42
            physics_hz = 120.0

            [recorder]
            max_record_duration = 3.0
            sample_interval = 0.1
            playback_speed = 2.0

            [bindings]
            record = "KeyR"
            play = "Space"

            [body]
            name = "Runner"
            starting_pose = { translation = [1.0, 2.0, 3.0], rotation = [0.0, 0.0, 90.0] }

            [world]
            obstacle_count = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.simulation.seed, Some(42));
        assert_eq!(config.recorder.playback_speed, 2.0);
        assert_eq!(config.bindings.record, KeyCode::KeyR);
        assert_eq!(config.bindings.play, KeyCode::Space);
        assert_eq!(config.bindings.toggle_path, KeyCode::KeyP);
        assert_eq!(config.body.name, "Runner");
        assert_abs_diff_eq!(config.body.starting_pose.translation.z, 3.0);
        assert_abs_diff_eq!(
            config.body.starting_pose.rotation.euler_angles().2,
            std::f64::consts::FRAC_PI_2,
            epsilon = 1e-6
        );
        assert_eq!(config.body.radius, BodyConfig::default().radius);
        assert_eq!(config.world.obstacle_count, 3);
    }

    #[test]
    fn invalid_recorder_settings_are_rejected() {
        let err = parse_scenario("[recorder]\nsample_interval = 0.0").unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::Recorder(RecorderError::InvalidConfig(_))
        ));
    }

    #[test]
    fn unknown_sections_are_rejected() {
        let err = parse_scenario("[sensors]\nrate = 1").unwrap_err();
        assert!(matches!(err, ScenarioError::Parse(_)));
    }

    #[test]
    fn zero_physics_rate_is_rejected() {
        let err = parse_scenario("[simulation]\nphysics_hz = 0.0").unwrap_err();
        assert!(matches!(err, ScenarioError::PhysicsRate(_)));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_scenario(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ScenarioError::NotFound(_)));
    }
}
