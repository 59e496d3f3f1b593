//! Command execution
//!
//! `CommandRunner` is the seam between profile logic and the operating system.
//! Execution is synchronous and blocking, with no timeout.

use std::process::{Command, Output};
use tracing::{debug, info};

use crate::error::CommandError;
use crate::netsh::NetshCommand;

pub trait CommandRunner {
    /// Run one command, returning its trimmed stdout on success
    fn run(&mut self, cmd: &NetshCommand) -> Result<String, CommandError>;
}

/// Runs commands through the platform shell
#[derive(Debug, Default)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ShellRunner {
    fn run(&mut self, cmd: &NetshCommand) -> Result<String, CommandError> {
        let line = cmd.command_line();
        debug!(command = %line, "Running command");

        let output = shell_command(&line)
            .output()
            .map_err(|source| CommandError::Spawn {
                command: line.clone(),
                source,
            })?;

        check_output(line, output)
    }
}

#[cfg(windows)]
fn shell_command(line: &str) -> Command {
    use std::os::windows::process::CommandExt;

    // raw_arg keeps the adapter quotes exactly as built
    let mut command = Command::new("cmd");
    command.arg("/C").raw_arg(line);
    command
}

#[cfg(not(windows))]
fn shell_command(line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(line);
    command
}

fn check_output(line: String, output: Output) -> Result<String, CommandError> {
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if output.status.success() {
        return Ok(stdout);
    }

    // netsh reports most failures on stdout
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    Err(CommandError::Failed {
        command: line,
        code: output.status.code(),
        stderr: if stderr.is_empty() { stdout } else { stderr },
    })
}

/// Prints commands instead of running them
#[derive(Debug, Default)]
pub struct DryRunRunner;

impl DryRunRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for DryRunRunner {
    fn run(&mut self, cmd: &NetshCommand) -> Result<String, CommandError> {
        info!(command = %cmd, "Dry run, not executing");
        println!("[dry-run] {cmd}");
        Ok(String::new())
    }
}
