//! Cluster profile commands: `list-clusters` and `set-cluster`.
//!
//! These only read and rewrite the local profile file; they never contact a
//! cluster.

use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use crate::config::ConfigFile;
use crate::error::CliError;

/// Printed instead of stored passwords.
const PASSWORD_MASK: &str = "********";

/// Cluster profile command executor.
pub struct ClusterCommand {
    config_path: PathBuf,
}

impl ClusterCommand {
    /// Create a command operating on the profile file at `config_path`.
    #[must_use]
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Print every profile, marking the current one with `(*)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile file cannot be loaded or output fails.
    pub fn list<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        let config = ConfigFile::from_file(&self.config_path)?;

        for cluster in &config.clusters {
            let marker = if cluster.name == config.current_cluster { "(*)" } else { "" };
            writeln!(writer, "- name: {}{marker}", cluster.name)?;
            writeln!(writer, "  host: {}", cluster.host)?;
            if let Some(protocol) = cluster.protocol.as_deref().filter(|p| !p.is_empty()) {
                writeln!(writer, "  protocol: {protocol}")?;
            }
            if let Some(port) = cluster.port.filter(|p| *p != 0) {
                writeln!(writer, "  port: {port}")?;
            }
            if let Some(username) = cluster.username.as_deref().filter(|u| !u.is_empty()) {
                writeln!(writer, "  username: {username}")?;
            }
            if cluster.password.as_deref().is_some_and(|p| !p.is_empty()) {
                writeln!(writer, "  password: {PASSWORD_MASK}")?;
            }
        }
        Ok(())
    }

    /// Make `name` the current profile and rewrite the profile file.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile does not exist or the file cannot be
    /// read or written.
    pub fn set_current<W: Write>(&self, writer: &mut W, name: &str) -> Result<(), CliError> {
        let mut config = ConfigFile::from_file(&self.config_path)?;
        config.set_current(name)?;
        config.save(&self.config_path)?;

        debug!(path = %self.config_path.display(), cluster = name, "Updated current cluster");
        writeln!(writer, "Current cluster set to '{name}'")?;
        Ok(())
    }
}
