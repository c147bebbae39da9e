//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{ConfigFile, ConnectionOverrides};
use crate::entity::EntityKind;
use crate::error::CliError;

/// esctl is a read-only CLI for Elasticsearch.
#[derive(Parser, Debug, Clone)]
#[command(name = "esctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Elasticsearch protocol (http or https).
    #[arg(long, global = true, env = "ELASTICSEARCH_PROTOCOL")]
    pub protocol: Option<String>,

    /// Elasticsearch host. When set, the cluster profile file is not read.
    #[arg(long, global = true, env = "ELASTICSEARCH_HOST")]
    pub host: Option<String>,

    /// Elasticsearch port.
    #[arg(long, global = true, env = "ELASTICSEARCH_PORT")]
    pub port: Option<u16>,

    /// Elasticsearch username.
    #[arg(long, global = true, env = "ELASTICSEARCH_USERNAME")]
    pub username: Option<String>,

    /// Elasticsearch password.
    #[arg(long, global = true, env = "ELASTICSEARCH_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Cluster profile file [default: ~/.config/esctl.yml].
    #[arg(long, global = true, env = "ESCTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Connection settings given by flags or environment.
    #[must_use]
    pub fn connection_overrides(&self) -> ConnectionOverrides {
        ConnectionOverrides {
            protocol: self.protocol.clone(),
            host: self.host.clone(),
            port: self.port,
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    /// Path of the cluster profile file.
    ///
    /// # Errors
    ///
    /// Returns an error if no path is given and the home directory is unknown.
    pub fn config_path(&self) -> Result<PathBuf, CliError> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => ConfigFile::default_path(),
        }
    }
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Get Elasticsearch entities.
    ///
    /// Available entities: nodes, indices, shards, aliases, tasks.
    #[command(after_help = GET_EXAMPLES)]
    Get(GetArgs),

    /// List the clusters defined in the profile file.
    ListClusters,

    /// Set the current cluster in the profile file.
    SetCluster {
        /// Name of the cluster profile to use.
        name: String,
    },
}

const GET_EXAMPLES: &str = "\
Examples:
  esctl get nodes
  esctl get indices --index 'logs-*'
  esctl get shards --index my_index --started --relocating
  esctl get shards --unassigned --sort-by unassigned-reason,index
  esctl get aliases
  esctl get tasks --actions 'index*' --actions '*search*'";

/// Arguments of `get`.
#[derive(Args, Debug, Clone)]
pub struct GetArgs {
    /// Entity to list: node(s), index/indices, shard(s), alias(es), task(s).
    #[arg(value_name = "ENTITY")]
    pub entity: EntityKind,

    /// Name or pattern of the index.
    #[arg(long)]
    pub index: Option<String>,

    /// Filter shards by node name.
    #[arg(long)]
    pub node: Option<String>,

    /// Filter shards by shard number.
    #[arg(long)]
    pub shard: Option<u32>,

    /// Filter primary shards.
    #[arg(long)]
    pub primary: bool,

    /// Filter replica shards.
    #[arg(long)]
    pub replica: bool,

    /// Filter shards in STARTED state.
    #[arg(long)]
    pub started: bool,

    /// Filter shards in RELOCATING state.
    #[arg(long)]
    pub relocating: bool,

    /// Filter shards in INITIALIZING state.
    #[arg(long)]
    pub initializing: bool,

    /// Filter shards in UNASSIGNED state.
    #[arg(long)]
    pub unassigned: bool,

    /// Filter tasks by action, wildcards allowed (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub actions: Vec<String>,

    /// Columns to sort by (comma-separated, case-insensitive).
    #[arg(long, value_delimiter = ',')]
    pub sort_by: Vec<String>,
}
