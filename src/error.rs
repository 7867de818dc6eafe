//! Error types shared by the record pipeline, the loader/exporter and the
//! front ends.
//!
//! Three kinds of failure exist:
//!
//! - [`SchemaError`]: the table does not have the expected columns. Fatal to
//!   the current operation; no partial table is ever returned.
//! - I/O and CSV failures: the file could not be read or written. The caller
//!   keeps whatever state it had before the attempt.
//! - Malformed individual cells (for example a date that does not match the
//!   export format) are *not* errors. The pipeline turns them into
//!   [`Cell::Missing`](crate::records::Cell::Missing) and carries on.
//!
//! ```
//! use refugio::error::{RefugioError, SchemaError};
//!
//! let err = RefugioError::from(SchemaError::UnknownColumn("Peso".to_owned()));
//! assert_eq!(err.to_string(), "Schema error: column 'Peso' does not exist");
//! ```

use std::fmt;

/// The table's columns do not match what an operation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Required columns absent after header trimming, in schema order.
    MissingColumns(Vec<String>),

    /// Two headers collapse to the same name once trimmed.
    DuplicateColumn(String),

    /// An operation referenced a column the table does not have.
    UnknownColumn(String),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumns(cols) => {
                write!(f, "missing required columns: {}", cols.join(", "))
            }
            Self::DuplicateColumn(name) => write!(f, "duplicate column '{name}'"),
            Self::UnknownColumn(name) => write!(f, "column '{name}' does not exist"),
        }
    }
}

impl std::error::Error for SchemaError {}

/// Main error type for refugio operations.
#[derive(Debug)]
pub enum RefugioError {
    /// Required columns absent, duplicated or unknown
    Schema(SchemaError),

    /// File could not be opened, read or written
    Io(std::io::Error),

    /// Malformed delimited text
    Csv(String),

    /// Generic error with context
    Other(String),
}

impl RefugioError {
    /// Text suitable for a blocking notification shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Schema(SchemaError::MissingColumns(cols)) => format!(
                "El archivo no tiene las columnas esperadas.\nFaltan: {}",
                cols.join(", ")
            ),
            other => other.to_string(),
        }
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema(_))
    }
}

impl fmt::Display for RefugioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema(e) => write!(f, "Schema error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Csv(msg) => write!(f, "CSV error: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for RefugioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Schema(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SchemaError> for RefugioError {
    fn from(err: SchemaError) -> Self {
        Self::Schema(err)
    }
}

impl From<std::io::Error> for RefugioError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RefugioError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(io) => Self::Io(io),
                other => Self::Csv(format!("{other:?}")),
            }
        } else {
            Self::Csv(err.to_string())
        }
    }
}

impl From<RefugioError> for String {
    fn from(err: RefugioError) -> Self {
        err.to_string()
    }
}

/// Result type alias for refugio operations.
pub type Result<T> = std::result::Result<T, RefugioError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<RefugioError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| wrap(e.into(), &msg.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| wrap(e.into(), &f()))
    }
}

// Schema and I/O errors keep their kind so callers can still match on them.
fn wrap(err: RefugioError, msg: &str) -> RefugioError {
    match err {
        RefugioError::Io(e) => {
            RefugioError::Io(std::io::Error::new(e.kind(), format!("{msg}: {e}")))
        }
        RefugioError::Schema(e) => RefugioError::Schema(e),
        other => RefugioError::Other(format!("{msg}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_display() {
        let err = RefugioError::from(SchemaError::MissingColumns(vec![
            "Nombre".to_owned(),
            "Raza".to_owned(),
        ]));
        assert_eq!(
            err.to_string(),
            "Schema error: missing required columns: Nombre, Raza"
        );
        assert!(err.is_schema());
        assert!(err.user_message().contains("Faltan: Nombre, Raza"));
    }

    #[test]
    fn test_error_conversion_to_string() {
        let err = RefugioError::Csv("bad quote".to_owned());
        let s: String = err.into();
        assert_eq!(s, "CSV error: bad quote");
    }

    #[test]
    fn test_context_keeps_io_kind() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "registros.csv",
        ));

        let err = result.context("Failed to open input").unwrap_err();
        match err {
            RefugioError::Io(e) => {
                assert_eq!(e.kind(), std::io::ErrorKind::NotFound);
                assert!(e.to_string().contains("Failed to open input"), "got: {e}");
            }
            other => panic!("expected an I/O error, got {other:?}"),
        }
    }

    #[test]
    fn test_context_keeps_schema_error() {
        let result: std::result::Result<(), SchemaError> =
            Err(SchemaError::UnknownColumn("Peso".to_owned()));
        let err = result.with_context(|| "filtering".to_owned()).unwrap_err();
        assert!(err.is_schema());
    }
}
