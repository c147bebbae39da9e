//! `get` command implementation.
//!
//! Fetches one entity kind, filters shards, projects the records onto the
//! kind's column schema and prints them sorted by the requested columns, or
//! by the kind's default columns when none are given.

use std::io::Write;

use tracing::debug;

use crate::cli::GetArgs;
use crate::client::EntitySource;
use crate::entity::EntityKind;
use crate::error::CliError;
use crate::filter::{ShardFilter, ShardRole, ShardState};
use crate::output::Table;

impl From<&GetArgs> for ShardFilter {
    fn from(args: &GetArgs) -> Self {
        let mut filter = Self::new();
        let requested = [
            (args.started, ShardState::Started),
            (args.relocating, ShardState::Relocating),
            (args.initializing, ShardState::Initializing),
            (args.unassigned, ShardState::Unassigned),
        ];
        for (_, state) in requested.into_iter().filter(|(on, _)| *on) {
            filter = filter.with_state(state);
        }
        if args.primary {
            filter = filter.with_role(ShardRole::Primary);
        }
        if args.replica {
            filter = filter.with_role(ShardRole::Replica);
        }
        filter.shard = args.shard;
        filter.node = args.node.clone();
        filter
    }
}

/// Get command executor.
pub struct GetCommand<'a, S> {
    source: &'a S,
}

impl<'a, S: EntitySource> GetCommand<'a, S> {
    /// Create a get command reading from `source`.
    #[must_use]
    pub const fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Fetch the requested entities and project them into a table.
    ///
    /// # Errors
    ///
    /// Returns an error if fetching fails or a shard number cannot be parsed.
    pub async fn fetch_table(&self, args: &GetArgs) -> Result<Table<'static>, CliError> {
        let index = args.index.as_deref();

        let table = match args.entity {
            EntityKind::Node => Table::from_records(&self.source.nodes().await?),
            EntityKind::Index => Table::from_records(&self.source.indices(index).await?),
            EntityKind::Shard => {
                let shards = self.source.shards(index).await?;
                let filter = ShardFilter::from(args);
                Table::from_records(&filter.apply(shards)?)
            }
            EntityKind::Alias => Table::from_records(&self.source.aliases(index).await?),
            EntityKind::Task => Table::from_records(&self.source.tasks(&args.actions).await?),
        };

        if table.is_empty() {
            debug!(entity = %args.entity, "No matching entities");
        } else {
            debug!(entity = %args.entity, rows = table.len(), "Fetched entities");
        }
        Ok(table)
    }

    /// Execute the get command.
    ///
    /// Nothing is written unless fetching and filtering succeed.
    ///
    /// # Errors
    ///
    /// Returns an error if fetching, filtering or writing fails.
    pub async fn execute<W: Write>(&self, writer: &mut W, args: &GetArgs) -> Result<(), CliError> {
        let table = self.fetch_table(args).await?;

        if args.sort_by.is_empty() {
            table.render(writer, args.entity.default_sort())
        } else {
            table.render(writer, &args.sort_by)
        }
    }
}

/// Fake entity source for testing.
#[cfg(test)]
#[derive(Default)]
pub struct FakeEntitySource {
    nodes: Vec<crate::model::NodeRecord>,
    indices: Vec<crate::model::IndexRecord>,
    shards: Vec<crate::model::ShardRecord>,
    aliases: Vec<crate::model::AliasRecord>,
    tasks: Vec<crate::model::TaskRecord>,
    fail_with: Option<String>,
    requests: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl FakeEntitySource {
    /// Create an empty fake source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve these shards.
    #[must_use]
    pub fn with_shards(mut self, shards: Vec<crate::model::ShardRecord>) -> Self {
        self.shards = shards;
        self
    }

    /// Serve these nodes.
    #[must_use]
    pub fn with_nodes(mut self, nodes: Vec<crate::model::NodeRecord>) -> Self {
        self.nodes = nodes;
        self
    }

    /// Serve these indices.
    #[must_use]
    pub fn with_indices(mut self, indices: Vec<crate::model::IndexRecord>) -> Self {
        self.indices = indices;
        self
    }

    /// Serve these aliases.
    #[must_use]
    pub fn with_aliases(mut self, aliases: Vec<crate::model::AliasRecord>) -> Self {
        self.aliases = aliases;
        self
    }

    /// Serve these tasks.
    #[must_use]
    pub fn with_tasks(mut self, tasks: Vec<crate::model::TaskRecord>) -> Self {
        self.tasks = tasks;
        self
    }

    /// Fail every request with a connection error.
    #[must_use]
    pub fn failing(mut self, message: &str) -> Self {
        self.fail_with = Some(message.to_string());
        self
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("lock").clone()
    }

    fn record<T: Clone>(&self, request: String, items: &[T]) -> Result<Vec<T>, CliError> {
        self.requests.lock().expect("lock").push(request);
        match &self.fail_with {
            Some(message) => Err(CliError::Connection(message.clone())),
            None => Ok(items.to_vec()),
        }
    }
}

#[cfg(test)]
impl EntitySource for FakeEntitySource {
    async fn nodes(&self) -> Result<Vec<crate::model::NodeRecord>, CliError> {
        self.record("nodes".into(), &self.nodes)
    }

    async fn indices(
        &self,
        index: Option<&str>,
    ) -> Result<Vec<crate::model::IndexRecord>, CliError> {
        self.record(format!("indices {index:?}"), &self.indices)
    }

    async fn shards(
        &self,
        index: Option<&str>,
    ) -> Result<Vec<crate::model::ShardRecord>, CliError> {
        self.record(format!("shards {index:?}"), &self.shards)
    }

    async fn aliases(
        &self,
        index: Option<&str>,
    ) -> Result<Vec<crate::model::AliasRecord>, CliError> {
        self.record(format!("aliases {index:?}"), &self.aliases)
    }

    async fn tasks(&self, actions: &[String]) -> Result<Vec<crate::model::TaskRecord>, CliError> {
        self.record(format!("tasks {actions:?}"), &self.tasks)
    }
}
