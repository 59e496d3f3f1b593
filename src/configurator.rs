//! Applying profiles to adapters
//!
//! A profile becomes a pair of `netsh` commands: address first, then DNS.
//! Each command is run even when the one before it failed, and nothing is
//! rolled back, so a failed apply can leave the adapter half configured.
//! `ApplyReport::is_partial` flags that case for the caller.

use tracing::{debug, info};

use crate::config::Profile;
use crate::error::{ApplyError, CommandError};
use crate::netsh::NetshCommand;
use crate::runner::CommandRunner;

/// Result of one issued command
#[derive(Debug)]
pub struct CommandOutcome {
    pub command: NetshCommand,
    pub result: Result<String, CommandError>,
}

impl CommandOutcome {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// Every command issued for one apply, in order
#[derive(Debug, Default)]
pub struct ApplyReport {
    pub outcomes: Vec<CommandOutcome>,
}

impl ApplyReport {
    pub fn failures(&self) -> impl Iterator<Item = &CommandError> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().err())
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(CommandOutcome::succeeded)
    }

    /// Some, but not all, commands took effect
    pub fn is_partial(&self) -> bool {
        let ok = self.outcomes.iter().filter(|o| o.succeeded()).count();
        ok > 0 && ok < self.outcomes.len()
    }
}

/// Commands that configure `adapter` for `profile`
///
/// Fails without building anything when a static profile has empty fields
/// or fields that are not plain addresses.
pub fn plan(adapter: &str, profile: &Profile) -> Result<Vec<NetshCommand>, ApplyError> {
    match profile {
        Profile::Dhcp => Ok(vec![
            NetshCommand::address_dhcp(adapter),
            NetshCommand::dns_dhcp(adapter),
        ]),
        Profile::Static(s) => {
            let missing = s.missing_fields();
            if !missing.is_empty() {
                return Err(ApplyError::Incomplete { missing });
            }
            let fields = s.unsafe_fields();
            if !fields.is_empty() {
                return Err(ApplyError::UnsafeCharacters { fields });
            }
            Ok(vec![
                NetshCommand::address_static(adapter, s),
                NetshCommand::dns_static(adapter, &s.dns),
            ])
        }
    }
}

/// Configure `adapter` with `profile`
///
/// Validation errors issue no commands. Command failures are recorded in the
/// report for the caller to show; the remaining commands still run.
pub fn apply(
    runner: &mut dyn CommandRunner,
    adapter: &str,
    profile: &Profile,
) -> Result<ApplyReport, ApplyError> {
    let commands = plan(adapter, profile).inspect_err(|e| {
        debug!(adapter = %adapter, error = %e, "Refusing to apply profile");
    })?;

    info!(adapter = %adapter, kind = profile.kind(), "Applying profile");

    let mut report = ApplyReport::default();
    for command in commands {
        let result = runner.run(&command);
        if let Err(e) = &result {
            debug!(command = %e.command(), error = %e, "Configuration command failed");
        }
        report.outcomes.push(CommandOutcome { command, result });
    }

    if report.is_partial() {
        debug!(adapter = %adapter, "Profile applied partially; adapter may be in a mixed state");
    }
    Ok(report)
}
