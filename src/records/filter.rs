use super::table::{Cell, RecordTable};
use crate::error::Result;
use std::borrow::Cow;
use std::collections::BTreeSet;

/// A read-only projection of a [`RecordTable`]: a subset of its rows, in
/// table order. Views borrow the table and never change it.
#[derive(Debug, Clone)]
pub struct View<'a> {
    table: &'a RecordTable,
    rows: Option<Cow<'a, [usize]>>,
}

/// Owned row selection, for callers that keep a filter result across frames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSelection(Vec<usize>);

impl RowSelection {
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn view<'a>(&'a self, table: &'a RecordTable) -> View<'a> {
        View {
            table,
            rows: Some(Cow::Borrowed(&self.0)),
        }
    }
}

impl<'a> View<'a> {
    /// The unfiltered projection: every row.
    pub fn all(table: &'a RecordTable) -> Self {
        Self { table, rows: None }
    }

    pub fn columns(&self) -> &'a [String] {
        self.table.columns()
    }

    pub fn len(&self) -> usize {
        self.rows.as_ref().map_or(self.table.row_count(), |rows| rows.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Position of the `n`-th visible row in the underlying table.
    pub fn row_index(&self, n: usize) -> Option<usize> {
        match &self.rows {
            Some(rows) => rows.get(n).copied(),
            None => (n < self.table.row_count()).then_some(n),
        }
    }

    /// The `n`-th visible row.
    pub fn row(&self, n: usize) -> Option<&'a [Cell]> {
        self.table.row(self.row_index(n)?)
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a [Cell]> + '_ {
        (0..self.len()).filter_map(move |n| self.row(n))
    }

    /// Detaches the row selection so it can outlive the borrow of the table.
    pub fn into_selection(self) -> RowSelection {
        match self.rows {
            Some(rows) => RowSelection(rows.into_owned()),
            None => RowSelection((0..self.table.row_count()).collect()),
        }
    }

    /// Copies the visible rows into a standalone table.
    ///
    /// # Errors
    ///
    /// Only if a source row is wider than its header, which a table built
    /// through [`RecordTable::push_row`] never holds.
    pub fn to_table(&self) -> Result<RecordTable> {
        RecordTable::from_rows(
            self.columns().to_vec(),
            self.rows().map(<[Cell]>::to_vec).collect(),
        )
    }
}

/// Rows whose `column` renders exactly as `value`; no substring matching.
///
/// Matching is on the displayed text, so dates match `dd/mm/YYYY` strings
/// and the missing-count column matches its decimal rendering. Missing cells
/// never match.
///
/// # Errors
///
/// [`SchemaError::UnknownColumn`](crate::error::SchemaError::UnknownColumn)
/// if the table has no such column.
pub fn filter<'a>(table: &'a RecordTable, column: &str, value: &str) -> Result<View<'a>> {
    let idx = table.require_column(column)?;
    let rows: Vec<usize> = table
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            row.get(idx)
                .is_some_and(|cell| !cell.is_missing() && cell.to_string() == value)
        })
        .map(|(n, _)| n)
        .collect();
    Ok(View {
        table,
        rows: Some(Cow::Owned(rows)),
    })
}

/// Sorted distinct non-missing values of `column`, rendered for display.
///
/// Sorting happens on the cells, not on their rendering: dates come out in
/// calendar order (`31/12/2022` before `15/03/2023`) and counts in numeric
/// order (`2` before `10`).
///
/// # Errors
///
/// [`SchemaError::UnknownColumn`](crate::error::SchemaError::UnknownColumn)
/// if the table has no such column.
pub fn distinct_values(table: &RecordTable, column: &str) -> Result<Vec<String>> {
    let distinct: BTreeSet<&Cell> = table
        .column_cells(column)?
        .filter(|cell| !cell.is_missing())
        .collect();
    Ok(distinct.into_iter().map(ToString::to_string).collect())
}

/// Column/value choice made in the presenter.
///
/// Picking a column clears the value; until both are chosen the full table
/// is shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    column: Option<String>,
    value: Option<String>,
}

impl FilterSelection {
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn select_column(&mut self, column: impl Into<String>) {
        self.column = Some(column.into());
        self.value = None;
    }

    pub fn select_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    pub fn clear(&mut self) {
        self.column = None;
        self.value = None;
    }

    pub fn is_active(&self) -> bool {
        self.column.is_some() && self.value.is_some()
    }

    /// Rows to show for this selection; `None` means the whole table.
    ///
    /// # Errors
    ///
    /// Fails if the selected column is not in `table`.
    pub fn apply(&self, table: &RecordTable) -> Result<Option<RowSelection>> {
        match (&self.column, &self.value) {
            (Some(column), Some(value)) => {
                filter(table, column, value).map(|view| Some(view.into_selection()))
            }
            _ => Ok(None),
        }
    }
}
