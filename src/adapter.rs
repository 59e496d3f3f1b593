//! Network adapter enumeration
//!
//! Adapters are identified only by the display name the OS reports.

use tracing::{info, warn};

use crate::constants::adapters::{FALLBACK, NAME_COLUMN, TYPE_TAGS};
use crate::netsh::NetshCommand;
use crate::runner::CommandRunner;

/// Extract adapter names from `netsh interface show interface` output
///
/// Rows are kept when they mention a known interface type; the name is every
/// column after Admin State / State / Type, so names with spaces survive.
pub fn parse_interface_table(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| TYPE_TAGS.iter().any(|tag| line.contains(tag)))
        .map(|line| {
            line.split_whitespace()
                .skip(NAME_COLUMN)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|name| !name.is_empty())
        .collect()
}

/// Adapters known to the OS, or `["Ethernet"]` when none can be found
pub fn list_adapters(runner: &mut dyn CommandRunner) -> Vec<String> {
    let adapters = match runner.run(&NetshCommand::show_interfaces()) {
        Ok(output) => parse_interface_table(&output),
        Err(e) => {
            warn!(error = %e, "Failed to enumerate adapters");
            Vec::new()
        }
    };

    if adapters.is_empty() {
        info!(fallback = FALLBACK, "No adapters found, using fallback");
        return vec![FALLBACK.to_string()];
    }
    info!(count = adapters.len(), "Enumerated adapters");
    adapters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommandError;

    const TABLE: &str = "
Admin State    State          Type             Interface Name
-------------------------------------------------------------------------
Enabled        Connected      Dedicated        Ethernet
Enabled        Disconnected   Dedicated        Ethernet 2
Enabled        Connected      Dedicated        Wi-Fi
Disabled       Disconnected   Loopback         Loopback Pseudo-Interface 1
";

    struct Canned(Result<String, ()>);

    impl CommandRunner for Canned {
        fn run(&mut self, cmd: &NetshCommand) -> Result<String, CommandError> {
            self.0.clone().map_err(|_| CommandError::Failed {
                command: cmd.command_line(),
                code: Some(1),
                stderr: "netsh not found".to_string(),
            })
        }
    }

    #[test]
    fn test_parse_keeps_spaces_in_names() {
        assert_eq!(
            parse_interface_table(TABLE),
            vec!["Ethernet", "Ethernet 2", "Wi-Fi"]
        );
    }

    #[test]
    fn test_parse_skips_header_and_short_rows() {
        assert!(parse_interface_table("Type Ethernet\n").is_empty());
        assert!(parse_interface_table("").is_empty());
    }

    #[test]
    fn test_list_adapters_from_runner() {
        let mut runner = Canned(Ok(TABLE.to_string()));
        assert_eq!(list_adapters(&mut runner).len(), 3);
    }

    #[test]
    fn test_list_adapters_falls_back_on_failure() {
        let mut runner = Canned(Err(()));
        assert_eq!(list_adapters(&mut runner), vec!["Ethernet"]);
    }

    #[test]
    fn test_list_adapters_falls_back_on_empty_table() {
        let mut runner = Canned(Ok("Admin State    State    Type    Interface Name\n".to_string()));
        assert_eq!(list_adapters(&mut runner), vec!["Ethernet"]);
    }
}
