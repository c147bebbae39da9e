//! Column schemas and row projection for each entity kind.

use crate::filter::ShardRole;
use crate::model::{AliasRecord, IndexRecord, NodeRecord, ShardRecord, TaskRecord};
use crate::output::{ColumnDef, ColumnType, Row, TableRow};

fn cell(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

/// Append `%` to a present value.
fn percent(value: Option<&String>) -> String {
    value.map(|v| format!("{v}%")).unwrap_or_default()
}

/// `primary`/`replica` for the `p`/`r` codes, anything else unchanged.
fn humanize_role(prirep: Option<&String>) -> String {
    match prirep {
        Some(code) => {
            ShardRole::from_code(code).map_or_else(|| code.clone(), |r| r.name().to_string())
        }
        None => String::new(),
    }
}

impl TableRow for NodeRecord {
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::text("NAME"),
        ColumnDef::text("IP"),
        ColumnDef::text("NODE-ROLE"),
        ColumnDef::text("MASTER"),
        ColumnDef::new("HEAP-MAX", ColumnType::DataSize),
        ColumnDef::new("HEAP-CURRENT", ColumnType::DataSize),
        ColumnDef::new("HEAP-PERCENT", ColumnType::Percent),
        ColumnDef::new("CPU", ColumnType::Percent),
        ColumnDef::new("LOAD-1M", ColumnType::Number),
        ColumnDef::new("DISK-TOTAL", ColumnType::DataSize),
        ColumnDef::new("DISK-USED", ColumnType::DataSize),
        ColumnDef::new("DISK-AVAILABLE", ColumnType::DataSize),
    ];

    fn to_row(&self) -> Row {
        vec![
            cell(self.name.as_ref()),
            cell(self.ip.as_ref()),
            cell(self.node_role.as_ref()),
            cell(self.master.as_ref()),
            cell(self.heap_max.as_ref()),
            cell(self.heap_current.as_ref()),
            percent(self.heap_percent.as_ref()),
            percent(self.cpu.as_ref()),
            cell(self.load_1m.as_ref()),
            cell(self.disk_total.as_ref()),
            cell(self.disk_used.as_ref()),
            cell(self.disk_avail.as_ref()),
        ]
    }
}

impl TableRow for IndexRecord {
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::text("INDEX"),
        ColumnDef::text("UUID"),
        ColumnDef::text("HEALTH"),
        ColumnDef::text("STATUS"),
        ColumnDef::new("SHARDS", ColumnType::Number),
        ColumnDef::new("REPLICAS", ColumnType::Number),
        ColumnDef::new("DOCS-COUNT", ColumnType::Number),
        ColumnDef::new("DOCS-DELETED", ColumnType::Number),
        ColumnDef::new("CREATION-DATE", ColumnType::Date),
        ColumnDef::new("STORE-SIZE", ColumnType::DataSize),
        ColumnDef::new("PRI-STORE-SIZE", ColumnType::DataSize),
    ];

    fn to_row(&self) -> Row {
        vec![
            cell(self.index.as_ref()),
            cell(self.uuid.as_ref()),
            cell(self.health.as_ref()),
            cell(self.status.as_ref()),
            cell(self.pri.as_ref()),
            cell(self.rep.as_ref()),
            cell(self.docs_count.as_ref()),
            cell(self.docs_deleted.as_ref()),
            cell(self.creation_date.as_ref()),
            cell(self.store_size.as_ref()),
            cell(self.pri_store_size.as_ref()),
        ]
    }
}

impl TableRow for ShardRecord {
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::text("INDEX"),
        ColumnDef::new("SHARD", ColumnType::Number),
        ColumnDef::text("PRI-REP"),
        ColumnDef::text("STATE"),
        ColumnDef::new("DOCS", ColumnType::Number),
        ColumnDef::new("STORE", ColumnType::DataSize),
        ColumnDef::text("IP"),
        ColumnDef::text("NODE"),
        ColumnDef::text("NODE-ID"),
        ColumnDef::text("UNASSIGNED-REASON"),
        ColumnDef::new("UNASSIGNED-AT", ColumnType::Date),
        ColumnDef::new("SEGMENTS-COUNT", ColumnType::Number),
    ];

    fn to_row(&self) -> Row {
        vec![
            cell(self.index.as_ref()),
            cell(self.shard.as_ref()),
            humanize_role(self.prirep.as_ref()),
            cell(self.state.as_ref()),
            cell(self.docs.as_ref()),
            cell(self.store.as_ref()),
            cell(self.ip.as_ref()),
            cell(self.node.as_ref()),
            cell(self.id.as_ref()),
            cell(self.unassigned_reason.as_ref()),
            cell(self.unassigned_at.as_ref()),
            cell(self.segments_count.as_ref()),
        ]
    }
}

impl TableRow for AliasRecord {
    const COLUMNS: &'static [ColumnDef] = &[ColumnDef::text("ALIAS"), ColumnDef::text("INDEX")];

    fn to_row(&self) -> Row {
        vec![self.alias.clone(), self.index.clone()]
    }
}

impl TableRow for TaskRecord {
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::text("NODE"),
        ColumnDef::new("ID", ColumnType::Number),
        ColumnDef::text("ACTION"),
    ];

    fn to_row(&self) -> Row {
        vec![self.node.clone(), self.id.to_string(), self.action.clone()]
    }
}
