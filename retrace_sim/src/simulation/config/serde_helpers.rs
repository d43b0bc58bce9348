// retrace_sim/src/simulation/config/serde_helpers.rs

//! Deserializers that turn the compact TOML forms into nalgebra types.

/// `[x, y, z]` in TOML, `Vector3<f64>` in Rust.
pub mod vec3_f64_from_f32_array {
    use nalgebra::Vector3;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vector3<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [x, y, z] = <[f32; 3]>::deserialize(deserializer)?;
        Ok(Vector3::new(x as f64, y as f64, z as f64))
    }
}

/// `[x, y, z]` rotations in degrees in TOML, composed as nalgebra's roll (X),
/// pitch (Y) and yaw (Z). With Bevy's Y-up world, a heading change is `[0, deg, 0]`.
pub mod quat_f64_from_euler_deg_f32 {
    use nalgebra::UnitQuaternion;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<UnitQuaternion<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [roll, pitch, yaw] = <[f32; 3]>::deserialize(deserializer)?;
        Ok(UnitQuaternion::from_euler_angles(
            (roll as f64).to_radians(),
            (pitch as f64).to_radians(),
            (yaw as f64).to_radians(),
        ))
    }
}
