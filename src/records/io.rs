use super::schema::NA_TOKENS;
use super::table::{Cell, RecordTable};
use crate::error::{RefugioError, Result, ResultExt as _};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

const UTF8_BOM: &str = "\u{feff}";

/// Reads a comma-separated file with a header row.
///
/// # Errors
///
/// I/O error if the file cannot be opened or read, CSV error if it is
/// malformed (bad quoting, invalid UTF-8, a record with more fields than the
/// header).
pub fn load(path: &Path) -> Result<RecordTable> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let table = read_table(BufReader::new(file))?;
    tracing::info!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "Loaded records"
    );
    Ok(table)
}

/// Parses delimited text from any reader.
///
/// Fields matching one of the usual "not available" spellings (including the
/// empty field) load as [`Cell::Missing`]. Records shorter than the header
/// are padded with missing cells.
///
/// # Errors
///
/// See [`load`].
pub fn read_table<R: Read>(reader: R) -> Result<RecordTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns: Vec<String> = rdr
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches(UTF8_BOM).to_owned()
            } else {
                h.to_owned()
            }
        })
        .collect();
    let width = columns.len();
    let mut table = RecordTable::new(columns);

    for record in rdr.records() {
        let record = record?;
        if record.len() > width {
            let line = record.position().map_or(0, csv::Position::line);
            return Err(RefugioError::Csv(format!(
                "line {line}: expected {width} fields, found {}",
                record.len()
            )));
        }
        table.push_row(record.iter().map(parse_field).collect())?;
    }

    Ok(table)
}

fn parse_field(field: &str) -> Cell {
    if NA_TOKENS.contains(&field) {
        Cell::Missing
    } else {
        Cell::text(field)
    }
}

/// Writes the table as UTF-8 CSV with a byte-order mark and a header row.
///
/// # Errors
///
/// I/O error if the destination cannot be created or written.
pub fn save(table: &RecordTable, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_table(table, BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = table.row_count(), "Saved records");
    Ok(())
}

/// Serializes the table to any writer; missing cells become empty fields.
///
/// # Errors
///
/// I/O error if writing fails.
pub fn write_table<W: Write>(table: &RecordTable, mut writer: W) -> Result<()> {
    writer.write_all(UTF8_BOM.as_bytes())?;

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(table.columns())?;
    for row in table.rows() {
        wtr.write_record(row.iter().map(ToString::to_string))?;
    }
    wtr.flush()?;
    Ok(())
}
