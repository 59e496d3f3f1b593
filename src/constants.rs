//! Application-wide constants
//!
//! String literals for file locations and the `netsh` command vocabulary,
//! kept in one place so builders and parsers agree.

/// Profile file location
pub mod paths {
    /// Directory created under the platform config dir
    pub const APP_DIR: &str = "netmotive-ip";

    /// Profile file name (also used relative to the working dir as a fallback)
    pub const FILENAME: &str = "profiles.json";
}

/// `netsh` command vocabulary
pub mod netsh {
    pub const PROGRAM: &str = "netsh";

    /// Gateway metric passed with every static address
    pub const GATEWAY_METRIC: &str = "1";

    /// JSON tag and command keyword for DHCP
    pub const DHCP: &str = "dhcp";

    pub const STATIC: &str = "static";

    /// Characters the shell would interpret if they appeared in an address field
    pub const SHELL_METACHARACTERS: &[char] = &[
        '&', '|', ';', '<', '>', '^', '"', '\'', '`', '$', '(', ')', '%', '!', '*', '?', '\\',
    ];
}

/// Adapter enumeration constants
pub mod adapters {
    /// Interface types that mark a row of `netsh interface show interface` as an adapter
    pub const TYPE_TAGS: [&str; 3] = ["Dedicated", "Ethernet", "Wi-Fi"];

    /// Columns before the interface name (Admin State, State, Type)
    pub const NAME_COLUMN: usize = 3;

    /// Used when enumeration yields nothing
    pub const FALLBACK: &str = "Ethernet";
}

/// Profile store defaults
pub mod profiles {
    /// Name given to a DHCP profile added without a name
    pub const DEFAULT_DHCP_NAME: &str = "DHCP";
}
