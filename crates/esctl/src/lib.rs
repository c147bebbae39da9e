//! # esctl
//!
//! Read-only command-line client for Elasticsearch clusters.
//!
//! `esctl get <entity>` fetches nodes, indices, shards, aliases or tasks,
//! flattens the response into rows and prints an aligned plain-text table.
//! Columns that are empty in every row are left out, and rows are sorted by
//! the requested columns or by the entity's default sort order.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐   flags/env    ┌──────────────┐  HTTP/JSON  ┌───────────────┐
//! │  cli.rs  │───────────────►│  commands::  │◄───────────►│ Elasticsearch │
//! └──────────┘  config.rs     │     get      │  client.rs  └───────────────┘
//!                             └──────┬───────┘
//!                    filter.rs       │      schema.rs
//!                                    ▼
//!                             ┌──────────────┐
//!                             │  output.rs   │──► stdout
//!                             └──────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod entity;
pub mod error;
pub mod filter;
pub mod model;
pub mod output;
pub mod schema;

pub use cli::{Cli, Commands, GetArgs};
pub use client::{ElasticsearchClient, EntitySource};
pub use config::{ConfigFile, ConnectionConfig};
pub use entity::EntityKind;
pub use error::CliError;
pub use filter::{ShardFilter, ShardRole, ShardState};
pub use output::{ColumnDef, ColumnType, Table, TableRow};
