// retrace_sim/src/simulation/plugins/mod.rs

pub mod debugging;
pub mod recorder;
pub mod world;
