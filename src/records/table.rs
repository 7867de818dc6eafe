use crate::error::{RefugioError, Result, SchemaError};
use crate::records::schema::DISPLAY_DATE_FORMAT;
use chrono::NaiveDate;
use std::fmt;

/// A single value of the record table.
///
/// The derived ordering compares cells of the same kind naturally: text
/// lexicographically, dates chronologically, counts numerically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Cell {
    Text(String),
    Date(NaiveDate),
    Count(usize),
    Missing,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Applies `f` to text cells. Every other kind passes through untouched.
    pub fn map_text(self, f: impl FnOnce(String) -> String) -> Self {
        match self {
            Self::Text(s) => Self::Text(f(s)),
            other => other,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Date(d) => write!(f, "{}", d.format(DISPLAY_DATE_FORMAT)),
            Self::Count(n) => write!(f, "{n}"),
            Self::Missing => Ok(()),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<Option<&str>> for Cell {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::Missing, Self::from)
    }
}

/// Row-oriented table: named columns and rows of cells aligned with them.
///
/// Transformations consume the table and hand back a new one, so a chain
/// of stages reads as plain function composition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl RecordTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a table from rows, padding short rows with [`Cell::Missing`].
    ///
    /// # Errors
    ///
    /// Fails if any row has more cells than there are columns.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// # Errors
    ///
    /// Fails if the row has more cells than there are columns.
    pub fn push_row(&mut self, mut row: Vec<Cell>) -> Result<()> {
        let width = self.columns.len();
        if row.len() > width {
            return Err(RefugioError::Csv(format!(
                "record {} has {} fields, expected {width}",
                self.rows.len() + 1,
                row.len()
            )));
        }
        row.resize(width, Cell::Missing);
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// # Errors
    ///
    /// [`SchemaError::UnknownColumn`] if the table has no such column.
    pub fn require_column(&self, name: &str) -> std::result::Result<usize, SchemaError> {
        self.column_index(name)
            .ok_or_else(|| SchemaError::UnknownColumn(name.to_owned()))
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// # Errors
    ///
    /// [`SchemaError::UnknownColumn`] if the table has no such column.
    pub fn column_cells(&self, name: &str) -> Result<impl Iterator<Item = &Cell> + '_> {
        let idx = self.require_column(name)?;
        Ok(self.rows.iter().filter_map(move |row| row.get(idx)))
    }

    /// Replaces every cell of `name` with `f(cell)`.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnknownColumn`] if the table has no such column.
    pub fn map_column(mut self, name: &str, mut f: impl FnMut(Cell) -> Cell) -> Result<Self> {
        let idx = self.require_column(name)?;
        for cell in self.rows.iter_mut().filter_map(|row| row.get_mut(idx)) {
            let old = std::mem::replace(cell, Cell::Missing);
            *cell = f(old);
        }
        Ok(self)
    }

    /// Appends a column, or overwrites it in place when the name already exists.
    ///
    /// # Errors
    ///
    /// Fails if `cells` does not hold exactly one value per row.
    pub fn with_column(mut self, name: &str, cells: Vec<Cell>) -> Result<Self> {
        if cells.len() != self.rows.len() {
            return Err(RefugioError::Other(format!(
                "column '{name}' has {} values for {} rows",
                cells.len(),
                self.rows.len()
            )));
        }

        match self.column_index(name) {
            Some(idx) => {
                for (row, cell) in self.rows.iter_mut().zip(cells) {
                    if let Some(slot) = row.get_mut(idx) {
                        *slot = cell;
                    }
                }
            }
            None => {
                self.columns.push(name.to_owned());
                for (row, cell) in self.rows.iter_mut().zip(cells) {
                    row.push(cell);
                }
            }
        }
        Ok(self)
    }

    pub fn rename_columns(mut self, mut f: impl FnMut(&str) -> String) -> Self {
        for name in &mut self.columns {
            *name = f(name);
        }
        self
    }

    pub fn missing_in_row(row: &[Cell]) -> usize {
        row.iter().filter(|c| c.is_missing()).count()
    }

    pub fn total_missing(&self) -> usize {
        self.rows.iter().map(|row| Self::missing_in_row(row)).sum()
    }
}
