use bevy::prelude::Resource;
use clap::Parser;
use std::path::PathBuf;

/// Retrace: record a rigid body's motion and replay it from anywhere.
///
/// This struct defines the command-line arguments that can be passed to any
/// binary application that uses the retrace simulation library.
#[derive(Parser, Debug, Resource, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the scenario TOML file to run.
    #[arg(
        short,
        long,
        default_value = "assets/scenarios/record_and_replay.toml"
    )]
    pub scenario: PathBuf,

    /// Run without a window and drive the recorder from a fixed script.
    #[arg(long, default_value_t = false)]
    pub headless: bool,
}
