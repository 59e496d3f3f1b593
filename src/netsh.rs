//! `netsh` command builders
//!
//! Commands are run through the shell, so adapter names are always wrapped in
//! double quotes to keep names with spaces in one argument.

use std::fmt;

use crate::config::StaticProfile;
use crate::constants::netsh::{DHCP, GATEWAY_METRIC, PROGRAM, STATIC};

/// A `netsh` invocation as an argument list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetshCommand {
    args: Vec<String>,
}

impl NetshCommand {
    fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: std::iter::once(PROGRAM.to_string())
                .chain(args.into_iter().map(Into::into))
                .collect(),
        }
    }

    /// Command line handed to the shell
    pub fn command_line(&self) -> String {
        self.args.join(" ")
    }

    /// `netsh interface show interface`
    pub fn show_interfaces() -> Self {
        Self::new(["interface", "show", "interface"])
    }

    /// Switch the adapter's address to DHCP
    pub fn address_dhcp(adapter: &str) -> Self {
        Self::new(["interface", "ip", "set", "address", quote(adapter).as_str(), DHCP])
    }

    /// Switch the adapter's DNS servers to DHCP
    pub fn dns_dhcp(adapter: &str) -> Self {
        Self::new(["interface", "ip", "set", "dns", quote(adapter).as_str(), DHCP])
    }

    /// Static address, mask and gateway (gateway metric 1)
    pub fn address_static(adapter: &str, profile: &StaticProfile) -> Self {
        Self::new([
            "interface",
            "ip",
            "set",
            "address",
            quote(adapter).as_str(),
            STATIC,
            profile.ip.as_str(),
            profile.mask.as_str(),
            profile.gateway.as_str(),
            GATEWAY_METRIC,
        ])
    }

    /// Static primary DNS server
    pub fn dns_static(adapter: &str, dns: &str) -> Self {
        Self::new(["interface", "ip", "set", "dns", quote(adapter).as_str(), STATIC, dns])
    }
}

impl fmt::Display for NetshCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

fn quote(name: &str) -> String {
    format!("\"{name}\"")
}
