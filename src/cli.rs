//! Command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Gridwave")]
#[command(about = "Grid animation player synced to an audio track", long_about = None)]
pub struct Args {
    /// Frame-sequence document (JSON array of run-length pairs)
    #[arg(long, value_name = "PATH", default_value = "frames.json")]
    pub frames: PathBuf,

    /// Audio track (WAV)
    #[arg(long, value_name = "PATH", default_value = "music.wav")]
    pub audio: PathBuf,
}
