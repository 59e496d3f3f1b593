//! Command-line front end
//!
//! Each subcommand maps to one user action on the profile list: load the store,
//! perform the action, and flush the store after any change.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::adapter::list_adapters;
use crate::config::{Profile, ProfileStore, StaticProfile};
use crate::configurator::apply;
use crate::runner::{CommandRunner, DryRunRunner, ShellRunner};

#[derive(Debug, Parser)]
#[command(name = "netmotive-ip", version, about = "Save and apply network adapter IP profiles")]
pub struct Cli {
    /// Profile file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub profiles: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List network adapters reported by the OS
    Adapters,
    /// List saved profiles
    List,
    /// Show a saved profile
    Show { name: String },
    /// Save a new static profile
    Add {
        name: String,
        #[command(flatten)]
        fields: StaticFields,
    },
    /// Save a new DHCP profile (named "DHCP" when no name is given)
    AddDhcp { name: Option<String> },
    /// Replace an existing profile with static settings
    Update {
        name: String,
        #[command(flatten)]
        fields: StaticFields,
    },
    /// Replace an existing profile with DHCP
    UpdateDhcp { name: String },
    /// Delete a saved profile
    Delete {
        name: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Apply a saved profile to an adapter
    Apply {
        name: String,
        /// Adapter name as shown by `adapters`
        #[arg(short, long)]
        adapter: String,
        /// Print the commands instead of running them
        #[arg(long)]
        dry_run: bool,
    },
}

/// Static address fields
#[derive(Debug, Args)]
pub struct StaticFields {
    /// IP address, e.g. 192.168.1.50
    #[arg(long, default_value = "")]
    pub ip: String,
    /// Subnet mask, e.g. 255.255.255.0
    #[arg(long, default_value = "")]
    pub mask: String,
    /// Gateway, e.g. 192.168.1.1
    #[arg(long, default_value = "")]
    pub gateway: String,
    /// DNS server, e.g. 8.8.8.8
    #[arg(long, default_value = "")]
    pub dns: String,
}

impl StaticFields {
    fn to_profile(&self) -> Profile {
        Profile::Static(StaticProfile::new(&self.ip, &self.mask, &self.gateway, &self.dns))
    }
}

/// Run a parsed command line
///
/// `Ok(false)` means the action ran but something went wrong that the user
/// has already been told about (rejected input, failed OS command).
pub fn run(cli: Cli) -> Result<bool> {
    let path = cli.profiles.unwrap_or_else(ProfileStore::default_path);
    info!(path = %path.display(), "Using profile file");

    match cli.command {
        Commands::Adapters => {
            for adapter in list_adapters(&mut ShellRunner::new()) {
                println!("{adapter}");
            }
            Ok(true)
        }
        Commands::List => {
            let store = ProfileStore::load(&path);
            if store.is_empty() {
                println!("No saved profiles.");
            }
            for (name, profile) in store.iter() {
                match profile {
                    Profile::Static(s) if !s.is_complete() => {
                        println!("{name}\t{} (incomplete)", profile.kind())
                    }
                    _ => println!("{name}\t{}", profile.kind()),
                }
            }
            Ok(true)
        }
        Commands::Show { name } => {
            let name = name.trim();
            let store = ProfileStore::load(&path);
            match store.get(name) {
                Some(Profile::Dhcp) => {
                    println!("{name}: {}", Profile::Dhcp);
                }
                Some(Profile::Static(s)) => {
                    println!("{name}");
                    println!("  ip:      {}", s.ip);
                    println!("  mask:    {}", s.mask);
                    println!("  gateway: {}", s.gateway);
                    println!("  dns:     {}", s.dns);
                }
                None => return rejected(not_found(&store, name)),
            }
            Ok(true)
        }
        Commands::Add { name, fields } => mutate(&path, |store| {
            store.add(&name, fields.to_profile())?;
            Ok(format!("Added '{}'", name.trim()))
        }),
        Commands::AddDhcp { name } => mutate(&path, |store| {
            let name = store.add_dhcp(name.as_deref())?;
            Ok(format!("Added DHCP profile '{name}'"))
        }),
        Commands::Update { name, fields } => mutate(&path, |store| {
            store.update(&name, fields.to_profile())?;
            Ok(format!("Updated '{}'", name.trim()))
        }),
        Commands::UpdateDhcp { name } => mutate(&path, |store| {
            store.update(&name, Profile::Dhcp)?;
            Ok(format!("Updated '{}'", name.trim()))
        }),
        Commands::Delete { name, yes } => {
            let mut store = ProfileStore::load(&path);
            if !store.contains(name.trim()) {
                return rejected(not_found(&store, name.trim()));
            }
            if !yes && !confirm(&format!("Delete '{}'?", name.trim()))? {
                println!("Cancelled.");
                return Ok(true);
            }
            store.remove(&name)?;
            store.save(&path)?;
            println!("Deleted '{}'", name.trim());
            Ok(true)
        }
        Commands::Apply {
            name,
            adapter,
            dry_run,
        } => {
            let name = name.trim();
            let store = ProfileStore::load(&path);
            let Some(profile) = store.get(name) else {
                return rejected(not_found(&store, name));
            };

            let mut runner: Box<dyn CommandRunner> = if dry_run {
                Box::new(DryRunRunner::new())
            } else {
                Box::new(ShellRunner::new())
            };

            let report = match apply(runner.as_mut(), &adapter, profile) {
                Ok(report) => report,
                Err(e) => return rejected(e.to_string()),
            };

            for outcome in &report.outcomes {
                match &outcome.result {
                    Ok(_) => println!("ok      {}", outcome.command),
                    Err(e) => eprintln!("failed  {}\n\n{e}\n", outcome.command),
                }
            }
            let failed = report.failures().count();
            if failed > 0 {
                eprintln!("{failed} of {} command(s) failed", report.outcomes.len());
            }
            if report.is_partial() {
                eprintln!("warning: '{adapter}' was only partially configured");
            }
            println!("Applied '{name}'");
            Ok(report.all_succeeded())
        }
    }
}

/// Load, change, and flush the store; input errors leave the file untouched
fn mutate<F>(path: &std::path::Path, change: F) -> Result<bool>
where
    F: FnOnce(&mut ProfileStore) -> Result<String, crate::error::StoreError>,
{
    let mut store = ProfileStore::load(path);
    match change(&mut store) {
        Ok(message) => {
            store
                .save(path)
                .with_context(|| format!("Failed to persist profiles to {}", path.display()))?;
            println!("{message}");
            Ok(true)
        }
        Err(e) => rejected(e.to_string()),
    }
}

fn not_found(store: &ProfileStore, name: &str) -> String {
    if store.is_empty() {
        return format!("no profile named '{name}' (no profiles saved)");
    }
    let saved: Vec<&str> = store.names().collect();
    format!("no profile named '{name}' (saved: {})", saved.join(", "))
}

fn rejected(message: String) -> Result<bool> {
    debug!(reason = %message, "Request rejected");
    eprintln!("error: {message}");
    Ok(false)
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush().context("Failed to flush prompt")?;

    let mut answer = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    if read == 0 {
        bail!("no confirmation given (stdin closed); pass --yes to skip the prompt");
    }
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
