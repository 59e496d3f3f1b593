//! Domain errors
//!
//! Invalid user input (names, empty fields) and OS command failures are kept
//! apart so the front end can report each the right way.

use thiserror::Error;

/// Rejected profile store mutation; the store is left unchanged
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("profile name required")]
    EmptyName,

    #[error("profile '{0}' already exists, use update")]
    AlreadyExists(String),

    #[error("no profile named '{0}'")]
    NotFound(String),

    #[error("static profile requires {}", .missing.join(" / "))]
    Incomplete { missing: Vec<&'static str> },

    #[error("{} must be a plain address without spaces or shell characters", .fields.join(" / "))]
    UnsafeCharacters { fields: Vec<&'static str> },
}

/// Profile could not be applied; no command was issued
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApplyError {
    #[error("static profile requires IP / Mask / Gateway / DNS (missing: {})", .missing.join(", "))]
    Incomplete { missing: Vec<&'static str> },

    #[error("refusing to pass {} to the shell: only plain addresses are allowed", .fields.join(" / "))]
    UnsafeCharacters { fields: Vec<&'static str> },
}

/// A single OS configuration command failed
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to launch '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command '{command}' exited with {}: {stderr}", exit_label(.code))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

impl CommandError {
    /// Command line that failed
    pub fn command(&self) -> &str {
        match self {
            CommandError::Spawn { command, .. } | CommandError::Failed { command, .. } => command,
        }
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}
