// retrace_core/src/lib.rs

//! Engine-agnostic recording and replay of a physics body's motion.

pub mod abstractions;
pub mod config;
pub mod error;
pub mod events;
pub mod interpolation;
pub mod prelude;
pub mod recorder;
pub mod trajectory;
pub mod types;
