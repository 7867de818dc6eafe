use super::schema::{CONDICION_DE_INGRESO, FORMA_DE_EGRESO, TIPO_DE_ANIMAL};
use super::table::RecordTable;
use crate::error::Result;
use serde::Serialize;
use std::collections::HashMap;

/// The categorical charts offered for a cleaned table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    AnimalType,
    ExitMode,
    IntakeCondition,
}

impl ChartKind {
    pub const ALL: [Self; 3] = [Self::AnimalType, Self::ExitMode, Self::IntakeCondition];

    pub fn column(self) -> &'static str {
        match self {
            Self::AnimalType => TIPO_DE_ANIMAL,
            Self::ExitMode => FORMA_DE_EGRESO,
            Self::IntakeCondition => CONDICION_DE_INGRESO,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::AnimalType => "Cantidad por tipo de animal",
            Self::ExitMode => "Cantidad por forma de egreso",
            Self::IntakeCondition => "Condición de ingreso",
        }
    }
}

/// Row count per distinct value of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Distribution {
    pub title: String,
    pub column: String,
    /// `(value, rows)` in order of first appearance in the table.
    pub counts: Vec<(String, usize)>,
    /// Rows skipped because the cell was missing.
    pub missing: usize,
}

impl Distribution {
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().map(|(_, n)| *n).max().unwrap_or(0)
    }

    pub fn count_of(&self, value: &str) -> usize {
        self.counts
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

/// # Errors
///
/// [`SchemaError::UnknownColumn`](crate::error::SchemaError::UnknownColumn)
/// if the table has no such column.
pub fn distribution(table: &RecordTable, column: &str, title: &str) -> Result<Distribution> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut missing = 0;

    for cell in table.column_cells(column)? {
        if cell.is_missing() {
            missing += 1;
            continue;
        }
        let label = cell.to_string();
        match positions.get(&label) {
            Some(&pos) => {
                if let Some(entry) = counts.get_mut(pos) {
                    entry.1 += 1;
                }
            }
            None => {
                positions.insert(label.clone(), counts.len());
                counts.push((label, 1));
            }
        }
    }

    Ok(Distribution {
        title: title.to_owned(),
        column: column.to_owned(),
        counts,
        missing,
    })
}

/// # Errors
///
/// Fails if one of the charted columns is absent.
pub fn chart_distribution(table: &RecordTable, kind: ChartKind) -> Result<Distribution> {
    distribution(table, kind.column(), kind.title())
}

/// The three chart distributions, in [`ChartKind::ALL`] order.
///
/// # Errors
///
/// Fails if one of the charted columns is absent.
pub fn chart_distributions(table: &RecordTable) -> Result<Vec<Distribution>> {
    ChartKind::ALL
        .iter()
        .map(|kind| chart_distribution(table, *kind))
        .collect()
}
