//! Cluster profiles and connection settings.
//!
//! Profiles live in a YAML file, by default `~/.config/esctl.yml`:
//!
//! ```yaml
//! current-cluster: prod
//! clusters:
//!   - name: prod
//!     protocol: https
//!     host: es.example.com
//!     port: 9243
//!     username: elastic
//!     password: secret
//! ```
//!
//! A host given on the command line or in the environment bypasses the file
//! entirely. Otherwise the current profile (or the first one when none is
//! marked current) supplies the connection.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CliError;

/// Protocol used when none is configured.
pub const DEFAULT_PROTOCOL: &str = "http";

/// Port used when none is configured.
pub const DEFAULT_PORT: u16 = 9200;

/// Config file name under the user config directory.
const CONFIG_FILENAME: &str = "esctl.yml";

/// A named cluster connection entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterProfile {
    /// Profile name.
    pub name: String,
    /// `http` or `https`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// Host name or address.
    pub host: String,
    /// HTTP port.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Basic auth user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Basic auth password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Contents of the profile file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Name of the profile to use; empty selects the first profile.
    #[serde(rename = "current-cluster")]
    pub current_cluster: String,
    /// Known profiles.
    pub clusters: Vec<ClusterProfile>,
}

impl ConfigFile {
    /// Default location, `~/.config/esctl.yml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, CliError> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("cannot determine home directory".to_string()))?;
        Ok(home.join(".config").join(CONFIG_FILENAME))
    }

    /// Load profiles from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CliError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("failed to read config file '{}': {e}", path.display()))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse profiles from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn from_yaml(content: &str) -> Result<Self, CliError> {
        serde_yaml::from_str(content).map_err(|e| CliError::Config(format!("invalid YAML: {e}")))
    }

    /// Write profiles to a YAML file, replacing its contents.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CliError> {
        let path = path.as_ref();
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| CliError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, yaml).map_err(|e| {
            CliError::Config(format!("failed to write config file '{}': {e}", path.display()))
        })
    }

    /// Look up a profile by name.
    #[must_use]
    pub fn cluster(&self, name: &str) -> Option<&ClusterProfile> {
        self.clusters.iter().find(|c| c.name == name)
    }

    /// The profile in use: the one named by `current-cluster`, or the first.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no profiles or the named one is missing.
    pub fn current(&self) -> Result<&ClusterProfile, CliError> {
        let first = self.clusters.first().ok_or_else(|| {
            CliError::Config("no clusters defined in the configuration".to_string())
        })?;

        if self.current_cluster.is_empty() {
            return Ok(first);
        }

        self.cluster(&self.current_cluster).ok_or_else(|| {
            CliError::Config(format!(
                "no cluster found with the name '{}' in the configuration",
                self.current_cluster
            ))
        })
    }

    /// Mark `name` as the current profile.
    ///
    /// # Errors
    ///
    /// Returns an error if no profile has that name.
    pub fn set_current(&mut self, name: &str) -> Result<(), CliError> {
        if self.cluster(name).is_none() {
            return Err(CliError::Config(format!(
                "no cluster found with the name '{name}' in the configuration"
            )));
        }
        self.current_cluster = name.to_string();
        Ok(())
    }
}

/// Settings given by flags or environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionOverrides {
    /// Protocol override.
    pub protocol: Option<String>,
    /// Host override; when set the profile file is not read.
    pub host: Option<String>,
    /// Port override.
    pub port: Option<u16>,
    /// User override.
    pub username: Option<String>,
    /// Password override.
    pub password: Option<String>,
}

/// Basic auth credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// User name.
    pub username: String,
    /// Password, possibly empty.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Resolved connection to one cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// `http` or `https`.
    pub protocol: String,
    /// Host name or address.
    pub host: String,
    /// HTTP port.
    pub port: u16,
    /// Basic auth credentials, when a user is configured.
    pub credentials: Option<Credentials>,
}

impl ConnectionConfig {
    /// Resolve the connection, loading profiles only when no host override
    /// is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the profiles cannot be loaded or the result is
    /// invalid.
    pub fn resolve<F>(overrides: ConnectionOverrides, load_profiles: F) -> Result<Self, CliError>
    where
        F: FnOnce() -> Result<ConfigFile, CliError>,
    {
        let config = match overrides.host.filter(|h| !h.is_empty()) {
            Some(host) => Self {
                protocol: overrides
                    .protocol
                    .unwrap_or_else(|| DEFAULT_PROTOCOL.to_string()),
                host,
                port: overrides.port.unwrap_or(DEFAULT_PORT),
                credentials: credentials(overrides.username, overrides.password),
            },
            None => {
                let profiles = load_profiles()?;
                let profile = profiles.current()?;
                debug!(cluster = %profile.name, "Using cluster profile");
                Self::from_profile(profile)?
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Build from a profile, filling in the default protocol and port.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile has no host.
    pub fn from_profile(profile: &ClusterProfile) -> Result<Self, CliError> {
        if profile.host.is_empty() {
            return Err(CliError::Config(format!(
                "'host' field is not specified for cluster '{}'",
                profile.name
            )));
        }

        Ok(Self {
            protocol: profile
                .protocol
                .clone()
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| DEFAULT_PROTOCOL.to_string()),
            host: profile.host.clone(),
            port: profile.port.filter(|p| *p != 0).unwrap_or(DEFAULT_PORT),
            credentials: credentials(profile.username.clone(), profile.password.clone()),
        })
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the protocol is not `http`/`https` or the port is 0.
    pub fn validate(&self) -> Result<(), CliError> {
        if self.protocol != "http" && self.protocol != "https" {
            return Err(CliError::Config(format!(
                "unsupported protocol '{}', expected http or https",
                self.protocol
            )));
        }

        if self.port == 0 {
            return Err(CliError::Config("port must be greater than 0".to_string()));
        }

        Ok(())
    }

    /// Base URL of the cluster, ending in `/`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}/", self.protocol, self.host, self.port)
    }
}

fn credentials(username: Option<String>, password: Option<String>) -> Option<Credentials> {
    username.filter(|u| !u.is_empty()).map(|username| Credentials {
        username,
        password: password.unwrap_or_default(),
    })
}
