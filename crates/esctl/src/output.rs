//! Table rendering for CLI commands.
//!
//! A [`Table`] pairs a fixed column schema with rows of display strings.
//! Rendering stably sorts the rows by the requested headers, drops columns
//! that are empty in every row, and writes the rest aligned on tab stops.

use std::collections::HashMap;
use std::io::Write;

use tracing::debug;

use crate::error::CliError;

/// Spaces between two aligned columns.
const COLUMN_PADDING: usize = 2;

/// Semantic type of a column.
///
/// Descriptive only: cells are compared and printed as plain text whatever
/// the column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Free text.
    Text,
    /// Integer or decimal count.
    Number,
    /// Percentage, rendered with a `%` suffix.
    Percent,
    /// Human readable byte size such as `1.2gb`.
    DataSize,
    /// Timestamp.
    Date,
}

/// One column of a table schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    /// Header text, unique within a schema ignoring case.
    pub header: &'static str,
    /// Column type.
    pub kind: ColumnType,
}

impl ColumnDef {
    /// Create a column definition.
    #[must_use]
    pub const fn new(header: &'static str, kind: ColumnType) -> Self {
        Self { header, kind }
    }

    /// Shorthand for a [`ColumnType::Text`] column.
    #[must_use]
    pub const fn text(header: &'static str) -> Self {
        Self::new(header, ColumnType::Text)
    }
}

/// Display strings of one record, one per schema column.
pub type Row = Vec<String>;

/// Records that project onto a fixed column schema.
pub trait TableRow {
    /// Column schema shared by every row of this record type.
    const COLUMNS: &'static [ColumnDef];

    /// Project the record onto [`Self::COLUMNS`].
    ///
    /// Must return exactly one cell per column. Missing values project to the
    /// empty string.
    fn to_row(&self) -> Row;
}

/// Rows sharing one column schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<'a> {
    columns: &'a [ColumnDef],
    rows: Vec<Row>,
}

impl<'a> Table<'a> {
    /// Create an empty table with the given schema.
    #[must_use]
    pub const fn new(columns: &'a [ColumnDef]) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row.
    ///
    /// # Panics
    ///
    /// Panics if the row length differs from the schema length.
    pub fn push_row(&mut self, row: Row) {
        assert_eq!(
            row.len(),
            self.columns.len(),
            "row has {} cells but the schema has {} columns",
            row.len(),
            self.columns.len()
        );
        self.rows.push(row);
    }

    /// Rows in their current order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resolve sort headers to column indices, ignoring case.
    ///
    /// Headers that match no column are skipped.
    fn resolve_sort_keys<S: AsRef<str>>(&self, headers: &[S]) -> Vec<usize> {
        let index_by_header: HashMap<String, usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| (column.header.to_lowercase(), i))
            .collect();

        headers
            .iter()
            .filter_map(|header| {
                let header = header.as_ref();
                let column = index_by_header.get(&header.to_lowercase()).copied();
                if column.is_none() {
                    debug!(header, "Ignoring unknown sort column");
                }
                column
            })
            .collect()
    }

    /// Stably sort rows by the given headers, in priority order.
    ///
    /// The first header whose cells differ decides; rows equal on every
    /// resolved header keep their relative order.
    pub fn sort_by_headers<S: AsRef<str>>(&mut self, headers: &[S]) {
        let keys = self.resolve_sort_keys(headers);
        if keys.is_empty() {
            return;
        }

        self.rows.sort_by(|a, b| {
            keys.iter()
                .map(|&col| a[col].cmp(&b[col]))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    /// Columns in which every row has an empty cell.
    ///
    /// With no rows every column is empty.
    #[must_use]
    pub fn empty_columns(&self) -> Vec<bool> {
        (0..self.columns.len())
            .map(|col| self.rows.iter().all(|row| row[col].is_empty()))
            .collect()
    }

    /// Write the table in its current row order, eliding empty columns.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        let visible: Vec<usize> = self
            .empty_columns()
            .into_iter()
            .enumerate()
            .filter_map(|(i, empty)| (!empty).then_some(i))
            .collect();

        let header: Vec<&str> = visible.iter().map(|&i| self.columns[i].header).collect();
        let body: Vec<Vec<&str>> = self
            .rows
            .iter()
            .map(|row| visible.iter().map(|&i| row[i].as_str()).collect())
            .collect();

        let widths: Vec<usize> = (0..visible.len())
            .map(|pos| {
                std::iter::once(&header)
                    .chain(body.iter())
                    .map(|line| line[pos].chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        for line in std::iter::once(&header).chain(body.iter()) {
            writeln!(writer, "{}", align(line, &widths))?;
        }
        Ok(())
    }

    /// Sort by `sort_by` then write the table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn render<W: Write, S: AsRef<str>>(
        mut self,
        writer: &mut W,
        sort_by: &[S],
    ) -> Result<(), CliError> {
        self.sort_by_headers(sort_by);
        self.write_to(writer)
    }
}

impl Table<'static> {
    /// Build a table by projecting each record, in order.
    #[must_use]
    pub fn from_records<R: TableRow>(records: &[R]) -> Self {
        let mut table = Self::new(R::COLUMNS);
        for record in records {
            table.push_row(record.to_row());
        }
        table
    }
}

/// Pad every cell but the last to its column width plus padding.
fn align(cells: &[&str], widths: &[usize]) -> String {
    let mut line = String::new();
    for (pos, cell) in cells.iter().enumerate() {
        line.push_str(cell);
        if pos + 1 < cells.len() {
            let pad = widths[pos] - cell.chars().count() + COLUMN_PADDING;
            line.extend(std::iter::repeat_n(' ', pad));
        }
    }
    line.truncate(line.trim_end_matches(' ').len());
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const NAME_COUNT: &[ColumnDef] = &[
        ColumnDef::text("NAME"),
        ColumnDef::new("COUNT", ColumnType::Number),
    ];

    const ACCOUNTS: &[ColumnDef] = &[
        ColumnDef::text("USER"),
        ColumnDef::text("PASSWORD"),
        ColumnDef::text("ROLE"),
    ];

    fn table_of(columns: &'static [ColumnDef], rows: &[&[&str]]) -> Table<'static> {
        let mut table = Table::new(columns);
        for row in rows {
            table.push_row(row.iter().map(|cell| (*cell).to_string()).collect());
        }
        table
    }

    fn render_to_string(table: Table<'_>, sort_by: &[&str]) -> String {
        let mut buf = Vec::new();
        table.render(&mut buf, sort_by).expect("should render");
        String::from_utf8(buf).expect("valid utf8")
    }

    fn cells<'a>(table: &'a Table<'a>) -> Vec<Vec<&'a str>> {
        table
            .rows()
            .iter()
            .map(|row| row.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn sort_by_lowercase_header() {
        let mut table = table_of(NAME_COUNT, &[&["b", "2"], &["a", "1"]]);
        table.sort_by_headers(&["name"]);
        assert_eq!(cells(&table), vec![vec!["a", "1"], vec!["b", "2"]]);
    }

    #[test]
    fn sort_by_unknown_header_keeps_input_order() {
        let mut table = table_of(NAME_COUNT, &[&["b", "2"], &["a", "1"], &["c", "0"]]);
        table.sort_by_headers(&["bogus-column"]);
        assert_eq!(
            cells(&table),
            vec![vec!["b", "2"], vec!["a", "1"], vec!["c", "0"]]
        );
    }

    #[test]
    fn sort_skips_unknown_header_before_valid_one() {
        let mut table = table_of(NAME_COUNT, &[&["b", "2"], &["a", "1"]]);
        table.sort_by_headers(&["bogus", "COUNT"]);
        assert_eq!(cells(&table), vec![vec!["a", "1"], vec!["b", "2"]]);
    }

    #[test]
    fn sort_uses_later_keys_to_break_ties() {
        let mut table = table_of(
            NAME_COUNT,
            &[&["b", "2"], &["a", "9"], &["b", "1"], &["a", "3"]],
        );
        table.sort_by_headers(&["NAME", "COUNT"]);
        assert_eq!(
            cells(&table),
            vec![
                vec!["a", "3"],
                vec!["a", "9"],
                vec!["b", "1"],
                vec!["b", "2"]
            ]
        );
    }

    #[test]
    fn sort_is_stable_on_ties() {
        let mut table = table_of(NAME_COUNT, &[&["a", "2"], &["a", "1"], &["a", "3"]]);
        table.sort_by_headers(&["NAME"]);
        assert_eq!(
            cells(&table),
            vec![vec!["a", "2"], vec!["a", "1"], vec!["a", "3"]]
        );
    }

    #[test]
    fn sort_compares_numbers_as_text() {
        let mut table = table_of(NAME_COUNT, &[&["a", "10"], &["b", "9"]]);
        table.sort_by_headers(&["count"]);
        assert_eq!(cells(&table), vec![vec!["a", "10"], vec!["b", "9"]]);
    }

    #[test]
    fn empty_column_header_is_omitted() {
        let table = table_of(ACCOUNTS, &[&["alice", "", "admin"], &["bob", "", "viewer"]]);
        let output = render_to_string(table, &[]);

        assert!(!output.contains("PASSWORD"));
        assert!(output.contains("USER"));
        assert!(output.contains("ROLE"));
    }

    #[test]
    fn column_with_one_value_is_kept() {
        let table = table_of(
            ACCOUNTS,
            &[&["alice", "", "admin"], &["bob", "hunter2", "viewer"]],
        );
        let output = render_to_string(table, &[]);
        assert!(output.contains("PASSWORD"));
        assert!(output.contains("hunter2"));
    }

    #[test]
    fn columns_are_aligned() {
        let table = table_of(NAME_COUNT, &[&["elasticsearch", "2"], &["es", "10"]]);
        let output = render_to_string(table, &[]);

        assert_eq!(
            output,
            "NAME           COUNT\n\
             elasticsearch  2\n\
             es             10\n"
        );
    }

    #[test]
    fn trailing_empty_cell_leaves_no_padding() {
        let table = table_of(ACCOUNTS, &[&["alice", "x", ""], &["bob", "y", "admin"]]);
        let output = render_to_string(table, &[]);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[1], "alice  x");
        assert_eq!(lines[2], "bob    y         admin");
    }

    #[test]
    fn alignment_counts_characters_not_bytes() {
        let table = table_of(NAME_COUNT, &[&["café", "1"], &["tea", "2"]]);
        let output = render_to_string(table, &[]);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[1], "café  1");
        assert_eq!(lines[2], "tea   2");
    }

    #[test]
    fn empty_table_prints_blank_header() {
        let table = Table::new(NAME_COUNT);
        let output = render_to_string(table, &["NAME"]);
        assert_eq!(output, "\n");
    }

    #[test]
    #[should_panic(expected = "schema has 2 columns")]
    fn push_row_rejects_wrong_length() {
        let mut table = Table::new(NAME_COUNT);
        table.push_row(vec!["only-one".to_string()]);
    }

    fn rows_strategy() -> impl Strategy<Value = Vec<Vec<String>>> {
        prop::collection::vec(
            prop::collection::vec(prop::sample::select(vec!["", "a", "b", "c"]), 3),
            0..12,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .map(|row| row.into_iter().map(str::to_string).collect())
                .collect()
        })
    }

    fn build(rows: &[Vec<String>]) -> Table<'static> {
        let mut table = Table::new(ACCOUNTS);
        for row in rows {
            table.push_row(row.clone());
        }
        table
    }

    proptest! {
        #[test]
        fn render_is_deterministic(rows in rows_strategy()) {
            let first = render_to_string(build(&rows), &["role", "user"]);
            let second = render_to_string(build(&rows), &["role", "user"]);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn column_present_iff_some_cell_non_empty(rows in rows_strategy()) {
            let output = render_to_string(build(&rows), &[]);
            let header = output.lines().next().unwrap_or("");
            for (i, column) in ACCOUNTS.iter().enumerate() {
                let has_value = rows.iter().any(|row| !row[i].is_empty());
                prop_assert_eq!(header.split_whitespace().any(|h| h == column.header), has_value);
            }
        }

        #[test]
        fn sort_orders_by_key_and_keeps_ties_stable(rows in rows_strategy()) {
            let indexed: Vec<Vec<String>> = rows
                .iter()
                .enumerate()
                .map(|(n, row)| vec![row[0].clone(), row[1].clone(), format!("{n:03}")])
                .collect();
            let mut table = build(&indexed);
            table.sort_by_headers(&["USER"]);

            for pair in table.rows().windows(2) {
                prop_assert!(pair[0][0] <= pair[1][0]);
                if pair[0][0] == pair[1][0] {
                    prop_assert!(pair[0][2] < pair[1][2]);
                }
            }
            prop_assert_eq!(table.len(), indexed.len());
        }
    }
}
