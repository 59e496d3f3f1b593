//! Network profile records
//!
//! A profile is either DHCP or a static address tuple. On disk DHCP is the
//! bare string `"dhcp"` and a static profile is an object with four string fields.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::netsh;
use crate::constants::netsh::SHELL_METACHARACTERS;

/// Static IPv4 configuration
///
/// Fields are kept as the strings the user typed; no address syntax is checked.
/// Missing keys in a hand-edited file load as empty strings so that apply can
/// reject them instead of the whole file failing to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticProfile {
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub mask: String,
    #[serde(default)]
    pub gateway: String,
    #[serde(default)]
    pub dns: String,
}

impl StaticProfile {
    /// Build a static profile, trimming surrounding whitespace from each field
    pub fn new(ip: &str, mask: &str, gateway: &str, dns: &str) -> Self {
        Self {
            ip: ip.trim().to_string(),
            mask: mask.trim().to_string(),
            gateway: gateway.trim().to_string(),
            dns: dns.trim().to_string(),
        }
    }

    /// Names of required fields that are empty, in display order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("ip", &self.ip),
            ("mask", &self.mask),
            ("gateway", &self.gateway),
            ("dns", &self.dns),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Names of fields that would not reach `netsh` as a single plain argument
    ///
    /// Fields are interpolated into a shell command line unquoted, so
    /// whitespace, control characters and shell metacharacters are refused.
    pub fn unsafe_fields(&self) -> Vec<&'static str> {
        [
            ("ip", &self.ip),
            ("mask", &self.mask),
            ("gateway", &self.gateway),
            ("dns", &self.dns),
        ]
        .into_iter()
        .filter(|(_, value)| {
            value.chars().any(|c| {
                c.is_whitespace() || c.is_control() || SHELL_METACHARACTERS.contains(&c)
            })
        })
        .map(|(field, _)| field)
        .collect()
    }
}

/// A saved network configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProfileRepr", into = "ProfileRepr")]
pub enum Profile {
    Dhcp,
    Static(StaticProfile),
}

impl Profile {
    /// Short tag used in listings
    pub fn kind(&self) -> &'static str {
        match self {
            Profile::Dhcp => "dhcp",
            Profile::Static(_) => "static",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Dhcp => write!(f, "DHCP (address and DNS from server)"),
            Profile::Static(s) => write!(
                f,
                "ip={} mask={} gateway={} dns={}",
                s.ip, s.mask, s.gateway, s.dns
            ),
        }
    }
}

/// On-disk shape: a bare tag string or a static record
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ProfileRepr {
    Tag(String),
    Static(StaticProfile),
}

impl TryFrom<ProfileRepr> for Profile {
    type Error = String;

    fn try_from(repr: ProfileRepr) -> Result<Self, Self::Error> {
        match repr {
            ProfileRepr::Tag(tag) if tag == netsh::DHCP => Ok(Profile::Dhcp),
            ProfileRepr::Tag(tag) => Err(format!(
                "unknown profile tag '{tag}' (expected \"{}\" or an object)",
                netsh::DHCP
            )),
            ProfileRepr::Static(s) => Ok(Profile::Static(s)),
        }
    }
}

impl From<Profile> for ProfileRepr {
    fn from(profile: Profile) -> Self {
        match profile {
            Profile::Dhcp => ProfileRepr::Tag(netsh::DHCP.to_string()),
            Profile::Static(s) => ProfileRepr::Static(s),
        }
    }
}
