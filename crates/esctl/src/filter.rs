//! Shard selection.
//!
//! A [`ShardFilter`] combines four independent dimensions: state, shard
//! number, role and node. A dimension without a constraint matches every
//! shard; a shard is kept only when every dimension matches.

use tracing::trace;

use crate::error::CliError;
use crate::model::ShardRecord;

/// Allocation state of a shard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShardState {
    /// Allocated and serving.
    Started,
    /// Moving to another node.
    Relocating,
    /// Being recovered.
    Initializing,
    /// Not allocated to any node.
    Unassigned,
}

impl ShardState {
    /// All states, in display order.
    pub const ALL: [Self; 4] = [
        Self::Started,
        Self::Relocating,
        Self::Initializing,
        Self::Unassigned,
    ];

    /// State name as reported by `_cat/shards`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Started => "STARTED",
            Self::Relocating => "RELOCATING",
            Self::Initializing => "INITIALIZING",
            Self::Unassigned => "UNASSIGNED",
        }
    }
}

/// Whether a shard copy is the primary or a replica.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShardRole {
    /// Primary copy.
    Primary,
    /// Replica copy.
    Replica,
}

impl ShardRole {
    /// Abbreviation used by `_cat/shards`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Primary => "p",
            Self::Replica => "r",
        }
    }

    /// Parse the `_cat/shards` abbreviation.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        [Self::Primary, Self::Replica]
            .into_iter()
            .find(|role| role.code() == code)
    }

    /// Human readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Replica => "replica",
        }
    }
}

/// Shard selection criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShardFilter {
    /// Accepted states; empty accepts any state.
    pub states: Vec<ShardState>,
    /// Required shard number.
    pub shard: Option<u32>,
    /// Keep primaries.
    pub primary: bool,
    /// Keep replicas.
    pub replica: bool,
    /// Required node name.
    pub node: Option<String>,
}

impl ShardFilter {
    /// A filter that keeps every shard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also accept shards in `state`.
    #[must_use]
    pub fn with_state(mut self, state: ShardState) -> Self {
        if !self.states.contains(&state) {
            self.states.push(state);
        }
        self
    }

    /// Require the given shard number.
    #[must_use]
    pub fn with_shard(mut self, shard: u32) -> Self {
        self.shard = Some(shard);
        self
    }

    /// Also accept copies with the given role.
    #[must_use]
    pub fn with_role(mut self, role: ShardRole) -> Self {
        match role {
            ShardRole::Primary => self.primary = true,
            ShardRole::Replica => self.replica = true,
        }
        self
    }

    /// Require the given node name.
    #[must_use]
    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }

    /// Whether the shard state is accepted.
    #[must_use]
    pub fn state_matches(&self, shard: &ShardRecord) -> bool {
        self.states.is_empty()
            || self
                .states
                .iter()
                .any(|state| shard.state.as_deref() == Some(state.as_str()))
    }

    /// Whether the shard number is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidShardNumber`] when a shard number is
    /// required and the record's shard field is not an integer.
    pub fn number_matches(&self, shard: &ShardRecord) -> Result<bool, CliError> {
        let Some(wanted) = self.shard else {
            return Ok(true);
        };

        let raw = shard.shard.as_deref().unwrap_or_default();
        let number: u32 = raw.parse().map_err(|_| CliError::InvalidShardNumber {
            index: shard.index.clone().unwrap_or_default(),
            value: raw.to_string(),
        })?;
        Ok(number == wanted)
    }

    /// Whether the shard role is accepted.
    ///
    /// Asking for both primaries and replicas is the same as asking for
    /// neither.
    #[must_use]
    pub fn role_matches(&self, shard: &ShardRecord) -> bool {
        let role = shard.prirep.as_deref().and_then(ShardRole::from_code);
        (!self.primary && !self.replica)
            || (self.primary && role == Some(ShardRole::Primary))
            || (self.replica && role == Some(ShardRole::Replica))
    }

    /// Whether the node holding the shard is accepted.
    #[must_use]
    pub fn node_matches(&self, shard: &ShardRecord) -> bool {
        self.node
            .as_deref()
            .is_none_or(|node| shard.node.as_deref() == Some(node))
    }

    /// Whether the shard passes every dimension.
    ///
    /// # Errors
    ///
    /// See [`ShardFilter::number_matches`].
    pub fn includes(&self, shard: &ShardRecord) -> Result<bool, CliError> {
        Ok(self.state_matches(shard)
            && self.number_matches(shard)?
            && self.role_matches(shard)
            && self.node_matches(shard))
    }

    /// Keep the matching shards, in their input order.
    ///
    /// # Errors
    ///
    /// Fails on the first shard whose number cannot be parsed; no partial
    /// result is returned.
    pub fn apply(&self, shards: Vec<ShardRecord>) -> Result<Vec<ShardRecord>, CliError> {
        let total = shards.len();
        let mut kept = Vec::with_capacity(total);
        for shard in shards {
            if self.includes(&shard)? {
                kept.push(shard);
            }
        }
        trace!(total, kept = kept.len(), "Filtered shards");
        Ok(kept)
    }
}
