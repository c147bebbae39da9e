//! CLI command implementations.
//!
//! - [`get`] - Entity listing against a cluster
//! - [`cluster`] - Cluster profile management

pub mod cluster;
pub mod get;

pub use cluster::ClusterCommand;
pub use get::GetCommand;
