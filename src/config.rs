//! Profile configuration file
//!
//! Stores API keys and base URLs per named profile in a small JSON file:
//!
//! ```json
//! {
//!   "default_profile": "default",
//!   "profiles": {
//!     "default": { "api_key": "...", "base_url": "https://api.attio.com" }
//!   }
//! }
//! ```
//!
//! Lookups that depend on the environment take the variable's value as an
//! argument so callers decide where it comes from.

use crate::client::DEFAULT_BASE_URL;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Profile used when none is named anywhere
pub const DEFAULT_PROFILE: &str = "default";

/// Overrides the config file location
pub const CONFIG_PATH_ENV: &str = "ATTIO_CONFIG_PATH";

/// Takes precedence over any stored key
pub const API_KEY_ENV: &str = "ATTIO_API_KEY";

/// Takes precedence over any stored base URL
pub const BASE_URL_ENV: &str = "ATTIO_BASE_URL";

/// Credentials and endpoint for one workspace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub base_url: String,
}

/// Contents of the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_profile_name")]
    pub default_profile: String,
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

fn default_profile_name() -> String {
    DEFAULT_PROFILE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: default_profile_name(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load from the resolved config path
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(Error::config(format!("read {}: {e}", path.display()))),
        };

        let mut config: Config = serde_json::from_str(&raw)
            .map_err(|e| Error::config(format!("parse {}: {e}", path.display())))?;
        if config.default_profile.trim().is_empty() {
            config.default_profile = default_profile_name();
        }
        Ok(config)
    }

    /// Save to the resolved config path
    pub fn save(&self) -> Result<PathBuf> {
        let path = config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write pretty JSON with a trailing newline, readable only by the owner
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut contents = serde_json::to_string_pretty(self)?;
        contents.push('\n');
        write_private(path, contents.as_bytes())?;

        debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Pick the profile: an explicit name wins, then the stored default
    pub fn profile_name(&self, requested: Option<&str>) -> String {
        [requested, Some(self.default_profile.as_str())]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|name| !name.is_empty())
            .unwrap_or(DEFAULT_PROFILE)
            .to_string()
    }

    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    /// API key from the environment value, else the profile
    pub fn resolve_api_key(&self, profile: &str, env_value: Option<&str>) -> Result<String> {
        let from_profile = self.profile(profile).map(|p| p.api_key.as_str());

        first_non_blank([env_value, from_profile]).ok_or_else(|| {
            Error::auth_required(format!(
                "No API key found for profile \"{profile}\". Set {API_KEY_ENV} or run: attio config set-key <key>"
            ))
        })
    }

    /// Base URL from the environment value, else the profile, else the default
    pub fn resolve_base_url(&self, profile: &str, env_value: Option<&str>) -> String {
        let from_profile = self.profile(profile).map(|p| p.base_url.as_str());

        first_non_blank([env_value, from_profile])
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Store a key (and optionally a base URL) under `profile`
    pub fn set_api_key(&mut self, profile: &str, api_key: &str, base_url: Option<&str>) {
        let entry = self.profiles.entry(profile.to_string()).or_default();
        entry.api_key = api_key.trim().to_string();
        if let Some(url) = base_url.map(str::trim).filter(|u| !u.is_empty()) {
            entry.base_url = url.trim_end_matches('/').to_string();
        }
    }

    /// Make `profile` the default
    pub fn use_profile(&mut self, profile: &str) -> Result<()> {
        let profile = profile.trim();
        if profile.is_empty() {
            return Err(Error::invalid_value("profile", "must not be empty"));
        }
        self.default_profile = profile.to_string();
        Ok(())
    }

    /// Copy with every API key masked, for display
    pub fn masked(&self) -> Self {
        let profiles = self
            .profiles
            .iter()
            .map(|(name, p)| {
                let masked = Profile {
                    api_key: mask_key(&p.api_key),
                    base_url: p.base_url.clone(),
                };
                (name.clone(), masked)
            })
            .collect();
        Self {
            default_profile: self.default_profile.clone(),
            profiles,
        }
    }
}

fn first_non_blank<'a, const N: usize>(values: [Option<&'a str>; N]) -> Option<String> {
    values
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

/// Resolve the config file location from `ATTIO_CONFIG_PATH` or the user
/// config directory
pub fn config_path() -> Result<PathBuf> {
    let override_path = std::env::var(CONFIG_PATH_ENV).ok();
    resolve_config_path(
        override_path.as_deref(),
        dirs::home_dir(),
        dirs::config_dir(),
    )
}

/// Pure form of [`config_path`]
pub fn resolve_config_path(
    override_path: Option<&str>,
    home_dir: Option<PathBuf>,
    config_dir: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(raw) = override_path.map(str::trim).filter(|p| !p.is_empty()) {
        return expand_home(raw, home_dir);
    }

    config_dir
        .map(|dir| dir.join("attio-cli").join("config.json"))
        .ok_or_else(|| Error::config("cannot resolve user config directory"))
}

fn expand_home(raw: &str, home_dir: Option<PathBuf>) -> Result<PathBuf> {
    let rest = match raw.strip_prefix('~') {
        Some(rest) => rest,
        None => return Ok(PathBuf::from(raw)),
    };

    let home = home_dir.ok_or_else(|| Error::config("cannot resolve home directory"))?;
    let rest = rest.trim_start_matches('/');
    Ok(if rest.is_empty() { home } else { home.join(rest) })
}

/// Mask all but the last four characters; short keys are masked entirely
pub fn mask_key(value: &str) -> String {
    let value = value.trim();
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{visible}", "*".repeat(chars.len() - 4))
}

#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies on creation
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, contents)
}
