//! Inspectable entity kinds.

use std::fmt;
use std::str::FromStr;

use crate::error::CliError;

/// A category of cluster records that `get` can list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Cluster nodes.
    Node,
    /// Indices.
    Index,
    /// Shard copies.
    Shard,
    /// Index aliases.
    Alias,
    /// Running tasks.
    Task,
}

impl EntityKind {
    /// All kinds.
    pub const ALL: [Self; 5] = [Self::Node, Self::Index, Self::Shard, Self::Alias, Self::Task];

    /// Singular name.
    #[must_use]
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Index => "index",
            Self::Shard => "shard",
            Self::Alias => "alias",
            Self::Task => "task",
        }
    }

    /// Plural name.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Node => "nodes",
            Self::Index => "indices",
            Self::Shard => "shards",
            Self::Alias => "aliases",
            Self::Task => "tasks",
        }
    }

    /// Sort headers used when the caller gives none.
    #[must_use]
    pub const fn default_sort(self) -> &'static [&'static str] {
        match self {
            Self::Node => &["NAME"],
            Self::Index => &["INDEX"],
            Self::Shard => &["INDEX", "SHARD", "PRI-REP"],
            Self::Alias => &["ALIAS", "INDEX"],
            Self::Task => &["NODE", "ID"],
        }
    }
}

impl FromStr for EntityKind {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| s == kind.singular() || s == kind.plural())
            .ok_or_else(|| CliError::UnknownEntity(s.to_string()))
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}
