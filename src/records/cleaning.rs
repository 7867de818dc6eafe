//! The cleaning pipeline: a fixed sequence of pure stages turning a raw
//! shelter export into the normalized table the rest of the app works on.
//!
//! Stage order matters. Dates and text are normalized before the sex/state
//! split, and the missing-data count runs last so it sees every column the
//! earlier stages produced.

use super::schema::{
    COLOR, DATOS_FALTANTES, DONDE_SE_ENCONTRO, ESTADO_REPRODUCTIVO_EGRESO,
    ESTADO_REPRODUCTIVO_INGRESO, FECHA_EGRESO, FECHA_INGRESO, NAME_PLACEHOLDER, NOMBRE, RAZA,
    REQUIRED_COLUMNS, SEXO_EGRESO, SEXO_INGRESO, SEXO_Y_ESTADO_EGRESO, SEXO_Y_ESTADO_INGRESO,
    SOURCE_DATE_FORMAT, TIPO_DE_ANIMAL, UNKNOWN,
};
use super::table::{Cell, RecordTable};
use crate::error::{Result, SchemaError};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashSet;

/// A named transformation in the pipeline.
#[derive(Clone, Copy)]
pub struct Stage {
    pub name: &'static str,
    pub apply: fn(RecordTable) -> Result<RecordTable>,
}

/// Every stage, in the order [`clean`] runs them.
pub const STAGES: [Stage; 7] = [
    Stage {
        name: "normalize_headers",
        apply: normalize_headers,
    },
    Stage {
        name: "reparse_dates",
        apply: reparse_dates,
    },
    Stage {
        name: "normalize_location",
        apply: normalize_location,
    },
    Stage {
        name: "normalize_name",
        apply: normalize_name,
    },
    Stage {
        name: "decompose_sex_state",
        apply: decompose_sex_state,
    },
    Stage {
        name: "titlecase_categories",
        apply: titlecase_categories,
    },
    Stage {
        name: "count_missing",
        apply: count_missing,
    },
];

const DATE_COLUMNS: [&str; 2] = [FECHA_INGRESO, FECHA_EGRESO];

const CATEGORY_COLUMNS: [&str; 3] = [COLOR, RAZA, TIPO_DE_ANIMAL];

// (combined source, sex column, reproductive state column)
const SEX_STATE_SPLITS: [(&str, &str, &str); 2] = [
    (SEXO_Y_ESTADO_INGRESO, SEXO_INGRESO, ESTADO_REPRODUCTIVO_INGRESO),
    (SEXO_Y_ESTADO_EGRESO, SEXO_EGRESO, ESTADO_REPRODUCTIVO_EGRESO),
];

/// Runs the whole pipeline over a freshly loaded table.
///
/// # Errors
///
/// Returns a schema error if a required column is absent (or two headers
/// collide) after trimming. Nothing is returned in that case; there is no
/// partially cleaned table.
pub fn clean(raw: RecordTable) -> Result<RecordTable> {
    let rows = raw.row_count();
    let mut table = raw;

    for stage in &STAGES {
        tracing::debug!(stage = stage.name, "Applying cleaning stage");
        table = (stage.apply)(table).inspect_err(|e| {
            tracing::warn!(stage = stage.name, "Cleaning aborted: {e}");
        })?;
    }

    tracing::info!(
        rows,
        columns = table.column_count(),
        missing = table.total_missing(),
        "Records cleaned"
    );
    Ok(table)
}

/// Trims every header and makes the names unique.
///
/// Blank headers (trailing commas in the export) become `Unnamed: <index>`
/// and repeated optional headers get a `.1`, `.2`, ... suffix, so stray
/// columns never block a load.
///
/// # Errors
///
/// [`SchemaError::DuplicateColumn`] when a required header appears twice,
/// [`SchemaError::MissingColumns`] when required columns are absent.
pub fn normalize_headers(table: RecordTable) -> Result<RecordTable> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut repeated_required = None;
    let mut position = 0usize;

    let table = table.rename_columns(|raw| {
        let trimmed = raw.trim();
        let base = if trimmed.is_empty() {
            format!("Unnamed: {position}")
        } else {
            trimmed.to_owned()
        };
        position += 1;

        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            if repeated_required.is_none() && REQUIRED_COLUMNS.contains(&base.as_str()) {
                repeated_required = Some(base.clone());
            }
            name = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(name.clone());
        name
    });

    if let Some(dup) = repeated_required {
        return Err(SchemaError::DuplicateColumn(dup).into());
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| table.column_index(name).is_none())
        .map(|name| (*name).to_owned())
        .collect();
    if !missing.is_empty() {
        return Err(SchemaError::MissingColumns(missing).into());
    }

    Ok(table)
}

/// Parses an export timestamp, keeping only the calendar date.
///
/// The value must have the export layout exactly: a four-digit year and
/// whitespace between the date, the time and the AM/PM marker. chrono alone
/// would also take `03/15/23 02:30:00 PM` as year 23.
pub fn parse_source_date(value: &str) -> Option<NaiveDate> {
    let (date, time, meridiem) = export_timestamp_parts(value)?;
    NaiveDateTime::parse_from_str(&format!("{date} {time} {meridiem}"), SOURCE_DATE_FORMAT)
        .ok()
        .map(|dt| dt.date())
}

// Splits `m/d/YYYY H:M:S AM` into its three fields if every field has the
// expected digit counts.
fn export_timestamp_parts(value: &str) -> Option<(&str, &str, &str)> {
    let mut fields = value.split_whitespace();
    let (date, time, meridiem) = (fields.next()?, fields.next()?, fields.next()?);
    if fields.next().is_some() {
        return None;
    }

    let date_ok = match date.split('/').collect::<Vec<_>>().as_slice() {
        [month, day, year] => {
            is_digits(month, 1..=2) && is_digits(day, 1..=2) && is_digits(year, 4..=4)
        }
        _ => false,
    };
    let time_ok =
        time.split(':').count() == 3 && time.split(':').all(|part| is_digits(part, 1..=2));
    let meridiem_ok = meridiem.eq_ignore_ascii_case("AM") || meridiem.eq_ignore_ascii_case("PM");

    (date_ok && time_ok && meridiem_ok).then_some((date, time, meridiem))
}

fn is_digits(field: &str, len: std::ops::RangeInclusive<usize>) -> bool {
    len.contains(&field.len()) && field.bytes().all(|b| b.is_ascii_digit())
}

/// Cells that do not match the export format become missing.
///
/// # Errors
///
/// Only if a date column is absent.
pub fn reparse_dates(table: RecordTable) -> Result<RecordTable> {
    let mut table = table;
    for column in DATE_COLUMNS {
        let mut unparsed = 0usize;
        table = table.map_column(column, |cell| match cell {
            Cell::Text(raw) => parse_source_date(&raw).map_or_else(
                || {
                    unparsed += 1;
                    Cell::Missing
                },
                Cell::Date,
            ),
            Cell::Date(date) => Cell::Date(date),
            Cell::Count(_) | Cell::Missing => Cell::Missing,
        })?;
        if unparsed > 0 {
            tracing::debug!(column, unparsed, "Unparseable dates set to missing");
        }
    }
    Ok(table)
}

/// # Errors
///
/// Only if the location column is absent.
pub fn normalize_location(table: RecordTable) -> Result<RecordTable> {
    table.map_column(DONDE_SE_ENCONTRO, trim_title)
}

/// Strips `*` noise markers; blank or missing names get a placeholder.
///
/// # Errors
///
/// Only if the name column is absent.
pub fn normalize_name(table: RecordTable) -> Result<RecordTable> {
    table.map_column(NOMBRE, |cell| match cell {
        Cell::Text(raw) => {
            let stripped = raw.replace('*', "");
            let name = stripped.trim();
            if name.is_empty() {
                Cell::text(NAME_PLACEHOLDER)
            } else {
                Cell::text(name)
            }
        }
        Cell::Missing => Cell::text(NAME_PLACEHOLDER),
        other => other,
    })
}

/// Splits a combined `"<state> <sex>"` value into `(sex, state)`.
///
/// Only values with exactly two whitespace-separated tokens are split.
/// Anything else keeps the whole original value as the sex and marks the
/// state unknown.
pub fn split_sex_state(value: &Cell) -> (Cell, Cell) {
    match value {
        Cell::Missing => (Cell::text(UNKNOWN), Cell::text(UNKNOWN)),
        Cell::Text(raw) => {
            let tokens: Vec<&str> = raw.split_whitespace().collect();
            match tokens.as_slice() {
                [state, sex] => (Cell::text(*sex), Cell::text(*state)),
                _ => (Cell::text(raw.as_str()), Cell::text(UNKNOWN)),
            }
        }
        other => (Cell::text(other.to_string()), Cell::text(UNKNOWN)),
    }
}

/// # Errors
///
/// Only if a combined sex/state column is absent.
pub fn decompose_sex_state(table: RecordTable) -> Result<RecordTable> {
    let mut table = table;
    for (source, sex_column, state_column) in SEX_STATE_SPLITS {
        let (sexes, states): (Vec<Cell>, Vec<Cell>) =
            table.column_cells(source)?.map(split_sex_state).unzip();
        table = table
            .with_column(sex_column, sexes)?
            .with_column(state_column, states)?;
    }
    Ok(table)
}

/// # Errors
///
/// Only if a categorical column is absent.
pub fn titlecase_categories(table: RecordTable) -> Result<RecordTable> {
    let mut table = table;
    for column in CATEGORY_COLUMNS {
        table = table.map_column(column, trim_title)?;
    }
    Ok(table)
}

/// Stores the per-row count of missing cells in `Datos Faltantes`.
///
/// # Errors
///
/// Never in practice; the count column always matches the row count.
pub fn count_missing(table: RecordTable) -> Result<RecordTable> {
    let counts = table
        .rows()
        .iter()
        .map(|row| Cell::Count(RecordTable::missing_in_row(row)))
        .collect();
    table.with_column(DATOS_FALTANTES, counts)
}

fn trim_title(cell: Cell) -> Cell {
    cell.map_text(|s| title_case(s.trim()))
}

/// Uppercases the first letter of every word and lowercases the rest.
///
/// A word starts at any letter not preceded by another cased letter, so
/// `"mixed-breed"` becomes `"Mixed-Breed"` and `"o'higgins"` becomes
/// `"O'Higgins"`.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_cased = false;

    for ch in input.chars() {
        let cased = ch.is_lowercase() || ch.is_uppercase();
        if !cased {
            out.push(ch);
        } else if prev_cased {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        prev_cased = cased;
    }

    out
}
