//! Persistent profile store
//!
//! Named profiles kept in insertion order and flushed to a single pretty-printed
//! JSON object. Each save rewrites the whole file.

use anyhow::{Context, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::profile::Profile;
use crate::constants::{paths, profiles};
use crate::error::StoreError;

/// Ordered mapping of profile name to profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileStore {
    entries: Vec<(String, Profile)>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default profile file: `<config dir>/netmotive-ip/profiles.json`, or
    /// `./profiles.json` when the platform has no config dir
    pub fn default_path() -> PathBuf {
        match dirs::config_dir() {
            Some(mut path) => {
                path.push(paths::APP_DIR);
                path.push(paths::FILENAME);
                path
            }
            None => PathBuf::from(paths::FILENAME),
        }
    }

    /// Load the store from `path`
    ///
    /// A missing file is an empty store. An unreadable or corrupt file is
    /// discarded with a warning; loading never fails.
    pub fn load(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No profile file, starting empty");
                return Self::new();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read profile file, starting fresh");
                return Self::new();
            }
        };

        match serde_json::from_str::<ProfileStore>(&contents) {
            Ok(store) => {
                info!(path = %path.display(), count = store.len(), "Loaded profiles");
                store
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Profile file corrupt, starting fresh");
                Self::new()
            }
        }
    }

    /// Serialize the whole store and overwrite `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create profile directory {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize profiles to JSON")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write profiles to {}", path.display()))?;
        info!(path = %path.display(), count = self.len(), "Saved profiles");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names are matched after trimming, as they are when saved
    pub fn contains(&self, name: &str) -> bool {
        self.position(name.trim()).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.position(name.trim()).map(|idx| &self.entries[idx].1)
    }

    /// Profile names in display order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Profile)> {
        self.entries.iter().map(|(name, profile)| (name.as_str(), profile))
    }

    /// Add a new profile at the end of the list
    pub fn add(&mut self, name: &str, profile: Profile) -> Result<(), StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        if self.contains(name) {
            return Err(StoreError::AlreadyExists(name.to_string()));
        }
        check_static(&profile)?;
        self.entries.push((name.to_string(), profile));
        Ok(())
    }

    /// Add a DHCP profile; a blank name becomes `DHCP`
    ///
    /// Returns the name that was used.
    pub fn add_dhcp(&mut self, name: Option<&str>) -> Result<String, StoreError> {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(profiles::DEFAULT_DHCP_NAME)
            .to_string();
        self.add(&name, Profile::Dhcp)?;
        Ok(name)
    }

    /// Replace an existing profile, keeping its position
    pub fn update(&mut self, name: &str, profile: Profile) -> Result<(), StoreError> {
        let name = name.trim();
        let idx = self
            .position(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        check_static(&profile)?;
        self.entries[idx].1 = profile;
        Ok(())
    }

    /// Remove exactly the named profile, returning it
    pub fn remove(&mut self, name: &str) -> Result<Profile, StoreError> {
        let name = name.trim();
        let idx = self
            .position(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        Ok(self.entries.remove(idx).1)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }

    /// Insert or replace without validation (used while deserializing)
    fn upsert(&mut self, name: String, profile: Profile) {
        match self.position(&name) {
            Some(idx) => self.entries[idx].1 = profile,
            None => self.entries.push((name, profile)),
        }
    }
}

fn check_static(profile: &Profile) -> Result<(), StoreError> {
    if let Profile::Static(s) = profile {
        let missing = s.missing_fields();
        if !missing.is_empty() {
            return Err(StoreError::Incomplete { missing });
        }
        let fields = s.unsafe_fields();
        if !fields.is_empty() {
            return Err(StoreError::UnsafeCharacters { fields });
        }
    }
    Ok(())
}

impl Serialize for ProfileStore {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, profile) in &self.entries {
            map.serialize_entry(name, profile)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ProfileStore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StoreVisitor;

        impl<'de> Visitor<'de> for StoreVisitor {
            type Value = ProfileStore;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of profile name to profile")
            }

            // Key order in the file is display order. An entry that is valid
            // JSON but not a profile is dropped on its own; the rest still load.
            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut store = ProfileStore::new();
                while let Some((name, value)) = access.next_entry::<String, serde_json::Value>()? {
                    match Profile::deserialize(value) {
                        Ok(profile) => store.upsert(name, profile),
                        Err(e) => {
                            warn!(profile = %name, error = %e, "Skipping unreadable profile entry")
                        }
                    }
                }
                Ok(store)
            }
        }

        deserializer.deserialize_map(StoreVisitor)
    }
}
