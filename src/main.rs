//! Chinchilla CLI
//!
//! Compute-optimal allocation of a training budget between model size and data.
//!
//! # Usage
//!
//! ```bash
//! # Optimal split for 10^23 FLOPs
//! chinchilla simulate --exponent 23
//!
//! # Score a slider choice on a named budget
//! chinchilla simulate --preset gpt3 --slider 35
//!
//! # Loss along the iso-FLOP curve
//! chinchilla curve --budget 1e21 --samples 50 --format json
//!
//! # Rule of thumb versus searched optimum
//! chinchilla plan --preset gopher
//!
//! # Play all training levels
//! chinchilla levels --slider 60
//!
//! # Validate config
//! chinchilla validate engine.yaml
//! ```

use chinchilla::cli::{run_command, Cli};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
