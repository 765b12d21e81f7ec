//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};
use clap_complete::Shell;

use crate::domain::Finger;

/// Hand robot URDF generator: prune finger modules from a parametric xacro
/// description and flatten it
#[derive(Parser, Debug)]
#[command(name = "handgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input xacro description
    #[arg(default_value = "hand_robot.xacro", value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output URDF file
    #[arg(short, long, default_value = "hand_robot.urdf", value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Fingers to exclude from the generated model
    #[arg(short, long, value_enum, num_args = 1..)]
    pub exclude: Vec<Finger>,

    /// Enable debug logging (-d, -dd, -ddd)
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,

    /// Generate shell completions
    #[arg(long = "generate", value_enum)]
    pub generator: Option<Shell>,
}
