//! Records decoded from cluster management endpoints.
//!
//! `_cat` endpoints queried with `format=json` return every value as a
//! string, and may return `null` for values that do not apply (an unassigned
//! shard has no node). All such fields are optional here.

use std::collections::BTreeMap;

use serde::Deserialize;

/// One row of `_cat/nodes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NodeRecord {
    /// Node name.
    pub name: Option<String>,
    /// Node IP address.
    pub ip: Option<String>,
    /// Abbreviated role letters, such as `dilm`.
    #[serde(rename = "node.role")]
    pub node_role: Option<String>,
    /// `*` for the elected master, `-` otherwise.
    pub master: Option<String>,
    /// Maximum heap size.
    #[serde(rename = "heap.max")]
    pub heap_max: Option<String>,
    /// Used heap.
    #[serde(rename = "heap.current")]
    pub heap_current: Option<String>,
    /// Used heap percentage.
    #[serde(rename = "heap.percent")]
    pub heap_percent: Option<String>,
    /// Recent CPU usage percentage.
    pub cpu: Option<String>,
    /// One minute load average.
    pub load_1m: Option<String>,
    /// Total disk space.
    #[serde(rename = "disk.total")]
    pub disk_total: Option<String>,
    /// Used disk space.
    #[serde(rename = "disk.used")]
    pub disk_used: Option<String>,
    /// Available disk space.
    #[serde(rename = "disk.avail")]
    pub disk_avail: Option<String>,
}

/// One row of `_cat/indices`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IndexRecord {
    /// Index name.
    pub index: Option<String>,
    /// Index UUID.
    pub uuid: Option<String>,
    /// `green`, `yellow` or `red`.
    pub health: Option<String>,
    /// `open` or `close`.
    pub status: Option<String>,
    /// Number of primary shards.
    pub pri: Option<String>,
    /// Number of replicas per primary.
    pub rep: Option<String>,
    /// Document count.
    #[serde(rename = "docs.count")]
    pub docs_count: Option<String>,
    /// Deleted document count.
    #[serde(rename = "docs.deleted")]
    pub docs_deleted: Option<String>,
    /// Creation date as an ISO 8601 string.
    #[serde(rename = "creation.date.string")]
    pub creation_date: Option<String>,
    /// Store size including replicas.
    #[serde(rename = "store.size")]
    pub store_size: Option<String>,
    /// Store size of primaries.
    #[serde(rename = "pri.store.size")]
    pub pri_store_size: Option<String>,
}

/// One row of `_cat/shards`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShardRecord {
    /// Index name.
    pub index: Option<String>,
    /// Shard number, as text.
    pub shard: Option<String>,
    /// `p` for a primary, `r` for a replica.
    pub prirep: Option<String>,
    /// Shard state, such as `STARTED`.
    pub state: Option<String>,
    /// Document count.
    pub docs: Option<String>,
    /// Store size.
    pub store: Option<String>,
    /// IP of the node holding the shard.
    pub ip: Option<String>,
    /// Name of the node holding the shard.
    pub node: Option<String>,
    /// Id of the node holding the shard.
    pub id: Option<String>,
    /// Why the shard is unassigned.
    #[serde(rename = "unassigned.reason")]
    pub unassigned_reason: Option<String>,
    /// When the shard became unassigned.
    #[serde(rename = "unassigned.at")]
    pub unassigned_at: Option<String>,
    /// Number of segments.
    #[serde(rename = "segments.count")]
    pub segments_count: Option<String>,
}

/// An alias and one index it points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRecord {
    /// Alias name.
    pub alias: String,
    /// Index name.
    pub index: String,
}

/// Body of `GET _alias`: aliases keyed by index name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AliasesResponse(pub BTreeMap<String, IndexAliases>);

/// Aliases of one index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IndexAliases {
    /// Alias definitions keyed by alias name.
    pub aliases: BTreeMap<String, serde_json::Value>,
}

impl AliasesResponse {
    /// Flatten into one record per alias and index pair, ordered by index.
    #[must_use]
    pub fn into_records(self) -> Vec<AliasRecord> {
        self.0
            .into_iter()
            .flat_map(|(index, entry)| {
                entry.aliases.into_keys().map(move |alias| AliasRecord {
                    alias,
                    index: index.clone(),
                })
            })
            .collect()
    }
}

/// Body of `GET _tasks`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TasksResponse {
    /// Nodes keyed by node id.
    pub nodes: BTreeMap<String, TaskNode>,
}

/// A node and the tasks it runs.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TaskNode {
    /// Node name.
    pub name: String,
    /// Transport address.
    pub transport_address: String,
    /// Host name.
    pub host: String,
    /// IP address.
    pub ip: String,
    /// Node roles.
    pub roles: Vec<String>,
    /// Tasks keyed by `node:id`.
    pub tasks: BTreeMap<String, TaskRecord>,
}

/// A running task.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TaskRecord {
    /// Id of the node running the task.
    pub node: String,
    /// Task id, unique within the node.
    pub id: i64,
    /// Task type, such as `transport`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Action name, such as `indices:data/write/bulk`.
    pub action: String,
    /// Start time in epoch milliseconds.
    pub start_time_in_millis: i64,
    /// Running time in nanoseconds.
    pub running_time_in_nanos: i64,
    /// Whether the task can be cancelled.
    pub cancellable: bool,
    /// Whether the task has been cancelled.
    pub cancelled: bool,
    /// Parent task, as `node:id`.
    pub parent_task_id: Option<String>,
    /// Request headers.
    pub headers: BTreeMap<String, serde_json::Value>,
}

impl TasksResponse {
    /// Flatten the tasks of every node, ordered by node id then task key.
    #[must_use]
    pub fn into_records(self) -> Vec<TaskRecord> {
        self.nodes
            .into_values()
            .flat_map(|node| node.tasks.into_values())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_cat_nodes_row() {
        let json = r#"[{
            "name": "es-data-1",
            "ip": "10.0.0.4",
            "node.role": "dilm",
            "master": "*",
            "heap.max": "1gb",
            "heap.current": "512mb",
            "heap.percent": "50",
            "cpu": "7",
            "load_1m": "0.42",
            "disk.total": "100gb",
            "disk.used": "40gb",
            "disk.avail": "60gb"
        }]"#;

        let nodes: Vec<NodeRecord> = serde_json::from_str(json).expect("should decode");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].node_role.as_deref(), Some("dilm"));
        assert_eq!(nodes[0].heap_percent.as_deref(), Some("50"));
        assert_eq!(nodes[0].disk_avail.as_deref(), Some("60gb"));
    }

    #[test]
    fn decode_unassigned_shard_with_nulls() {
        let json = r#"[{
            "index": "logs",
            "shard": "1",
            "prirep": "r",
            "state": "UNASSIGNED",
            "docs": null,
            "store": null,
            "ip": null,
            "node": null,
            "id": null,
            "unassigned.reason": "NODE_LEFT",
            "unassigned.at": "2024-01-01T00:00:00.000Z",
            "segments.count": null
        }]"#;

        let shards: Vec<ShardRecord> = serde_json::from_str(json).expect("should decode");
        assert_eq!(shards[0].node, None);
        assert_eq!(shards[0].unassigned_reason.as_deref(), Some("NODE_LEFT"));
    }

    #[test]
    fn decode_missing_fields_as_none() {
        let shards: Vec<ShardRecord> =
            serde_json::from_str(r#"[{"index": "logs"}]"#).expect("should decode");
        assert_eq!(shards[0].index.as_deref(), Some("logs"));
        assert_eq!(shards[0].shard, None);
    }

    #[test]
    fn aliases_flatten_one_record_per_pair() {
        let json = r#"{
            "logs-2024": { "aliases": { "logs": {}, "logs-write": { "is_write_index": true } } },
            "metrics": { "aliases": {} },
            "logs-2023": { "aliases": { "logs": {} } }
        }"#;

        let response: AliasesResponse = serde_json::from_str(json).expect("should decode");
        let records = response.into_records();

        assert_eq!(
            records,
            vec![
                AliasRecord { alias: "logs".into(), index: "logs-2023".into() },
                AliasRecord { alias: "logs".into(), index: "logs-2024".into() },
                AliasRecord { alias: "logs-write".into(), index: "logs-2024".into() },
            ]
        );
    }

    #[test]
    fn tasks_flatten_across_nodes() {
        let json = r#"{
            "nodes": {
                "nodeB": {
                    "name": "es-2",
                    "tasks": {
                        "nodeB:7": { "node": "nodeB", "id": 7, "type": "transport", "action": "cluster:monitor/tasks/lists" }
                    }
                },
                "nodeA": {
                    "name": "es-1",
                    "roles": ["data", "master"],
                    "tasks": {
                        "nodeA:12": { "node": "nodeA", "id": 12, "type": "transport", "action": "indices:data/write/bulk", "cancellable": false },
                        "nodeA:3": { "node": "nodeA", "id": 3, "type": "direct", "action": "indices:data/read/search", "parent_task_id": "nodeB:7" }
                    }
                }
            }
        }"#;

        let response: TasksResponse = serde_json::from_str(json).expect("should decode");
        let tasks = response.into_records();

        let ids: Vec<(&str, i64)> = tasks.iter().map(|t| (t.node.as_str(), t.id)).collect();
        assert_eq!(ids, vec![("nodeA", 12), ("nodeA", 3), ("nodeB", 7)]);
        assert_eq!(tasks[1].parent_task_id.as_deref(), Some("nodeB:7"));
        assert_eq!(tasks[0].kind, "transport");
    }

    #[test]
    fn empty_tasks_response() {
        let response: TasksResponse = serde_json::from_str("{}").expect("should decode");
        assert!(response.into_records().is_empty());
    }
}
