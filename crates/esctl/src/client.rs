//! HTTP client for cluster management endpoints.
//!
//! [`EntitySource`] is the seam between the `get` pipeline and the cluster:
//! [`ElasticsearchClient`] implements it over HTTP, tests implement it with
//! canned records.
//!
//! # Example
//!
//! ```rust,no_run
//! use esctl::client::{ElasticsearchClient, EntitySource};
//! use esctl::config::{ConnectionConfig, ConnectionOverrides};
//!
//! # async fn example() -> Result<(), esctl::CliError> {
//! let overrides = ConnectionOverrides {
//!     host: Some("localhost".into()),
//!     ..ConnectionOverrides::default()
//! };
//! let config = ConnectionConfig::resolve(overrides, || unreachable!())?;
//! let client = ElasticsearchClient::new(&config)?;
//! let nodes = client.nodes().await?;
//! println!("Nodes: {}", nodes.len());
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::config::{ConnectionConfig, Credentials};
use crate::error::CliError;
use crate::model::{
    AliasRecord, AliasesResponse, IndexRecord, NodeRecord, ShardRecord, TaskRecord, TasksResponse,
};

/// Default request timeout.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// `_cat/nodes` columns, matching [`NodeRecord`].
const NODE_COLUMNS: &str = "name,ip,node.role,master,heap.max,heap.current,heap.percent,cpu,load_1m,disk.total,disk.used,disk.avail";

/// `_cat/indices` columns, matching [`IndexRecord`].
const INDEX_COLUMNS: &str = "index,uuid,health,status,pri,rep,docs.count,docs.deleted,creation.date.string,store.size,pri.store.size";

/// `_cat/shards` columns, matching [`ShardRecord`].
const SHARD_COLUMNS: &str = "index,shard,prirep,state,docs,store,ip,node,id,unassigned.reason,unassigned.at,segments.count";

/// Source of typed cluster records.
pub trait EntitySource: Send + Sync {
    /// List nodes.
    fn nodes(&self) -> impl Future<Output = Result<Vec<NodeRecord>, CliError>> + Send;

    /// List indices, optionally only those matching `index`.
    fn indices(
        &self,
        index: Option<&str>,
    ) -> impl Future<Output = Result<Vec<IndexRecord>, CliError>> + Send;

    /// List shards, optionally only those of indices matching `index`.
    fn shards(
        &self,
        index: Option<&str>,
    ) -> impl Future<Output = Result<Vec<ShardRecord>, CliError>> + Send;

    /// List alias and index pairs, optionally only for indices matching `index`.
    fn aliases(
        &self,
        index: Option<&str>,
    ) -> impl Future<Output = Result<Vec<AliasRecord>, CliError>> + Send;

    /// List running tasks, optionally only those whose action matches one of
    /// the wildcard `actions` patterns.
    fn tasks(
        &self,
        actions: &[String],
    ) -> impl Future<Output = Result<Vec<TaskRecord>, CliError>> + Send;
}

/// Elasticsearch HTTP client.
pub struct ElasticsearchClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Option<Credentials>,
}

impl std::fmt::Debug for ElasticsearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElasticsearchClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.credentials.is_some())
            .finish_non_exhaustive()
    }
}

impl ElasticsearchClient {
    /// Create a client for the given connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn new(config: &ConnectionConfig) -> Result<Self, CliError> {
        Self::with_timeout(config, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn with_timeout(config: &ConnectionConfig, timeout: Duration) -> Result<Self, CliError> {
        let base_url = Url::parse(&config.base_url())
            .map_err(|e| CliError::Config(format!("invalid cluster URL: {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("esctl/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CliError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            credentials: config.credentials.clone(),
        })
    }

    /// Build an endpoint URL from path segments and query pairs.
    ///
    /// Segments are percent-encoded, so index patterns such as `logs-*`
    /// stay one segment.
    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, CliError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CliError::Config(format!("invalid cluster URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// GET a URL and decode its JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CliError> {
        debug!(url = %url, "Sending request");

        let mut request = self.http.get(url.clone());
        if let Some(creds) = &self.credentials {
            request = request.basic_auth(&creds.username, Some(&creds.password));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CliError::Http {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let decoded = response.json::<T>().await?;
        trace!(url = %url, "Decoded response");
        Ok(decoded)
    }

    /// GET a `_cat` API as JSON with the given columns.
    async fn cat<T: DeserializeOwned>(
        &self,
        api: &str,
        index: Option<&str>,
        columns: &str,
    ) -> Result<Vec<T>, CliError> {
        let mut segments = vec!["_cat", api];
        segments.extend(index);
        let url = self.endpoint(&segments, &[("format", "json"), ("h", columns)])?;
        self.get_json(url).await
    }
}

impl EntitySource for ElasticsearchClient {
    async fn nodes(&self) -> Result<Vec<NodeRecord>, CliError> {
        self.cat("nodes", None, NODE_COLUMNS).await
    }

    async fn indices(&self, index: Option<&str>) -> Result<Vec<IndexRecord>, CliError> {
        self.cat("indices", index, INDEX_COLUMNS).await
    }

    async fn shards(&self, index: Option<&str>) -> Result<Vec<ShardRecord>, CliError> {
        self.cat("shards", index, SHARD_COLUMNS).await
    }

    async fn aliases(&self, index: Option<&str>) -> Result<Vec<AliasRecord>, CliError> {
        let mut segments: Vec<&str> = index.into_iter().collect();
        segments.push("_alias");
        let url = self.endpoint(&segments, &[])?;
        let response: AliasesResponse = self.get_json(url).await?;
        Ok(response.into_records())
    }

    async fn tasks(&self, actions: &[String]) -> Result<Vec<TaskRecord>, CliError> {
        let joined = actions.join(",");
        let query: Vec<(&str, &str)> = if joined.is_empty() {
            Vec::new()
        } else {
            vec![("actions", joined.as_str())]
        };
        let url = self.endpoint(&["_tasks"], &query)?;
        let response: TasksResponse = self.get_json(url).await?;
        Ok(response.into_records())
    }
}
