//! Logging helpers shared across the pipeline.
//!
//! The core only talks to the `log` facade; the consumer (CLI or embedding
//! application) chooses and initializes the actual logger implementation.

use log::{debug, info};
use std::process::Command;

/// Log a command being executed
pub fn log_command(cmd: &Command) {
    let program = cmd.get_program().to_string_lossy();
    let args: Vec<_> = cmd.get_args().map(|arg| arg.to_string_lossy()).collect();

    debug!("Executing command: {} {}", program, args.join(" "));
}

/// Create a section heading in the logs to separate different processing stages
pub fn log_section(title: &str) {
    info!("");
    info!("{}", "=".repeat(50));
    info!("{title}");
    info!("{}", "=".repeat(50));
}

/// Log a subsection heading
pub fn log_subsection(title: &str) {
    info!("");
    info!("{}", "-".repeat(40));
    info!("{title}");
}
