//! Shelter record handling: the table model, the cleaning pipeline and the
//! read-only operations the front ends build on.
//!
//! ```no_run
//! use refugio::records::{self, schema};
//! use std::path::Path;
//!
//! # fn example() -> refugio::error::Result<()> {
//! let table = records::clean(records::load(Path::new("registros.csv"))?)?;
//! let perros = records::filter(&table, schema::TIPO_DE_ANIMAL, "Perro")?;
//! println!("{} perros", perros.len());
//! # Ok(())
//! # }
//! ```

pub mod cleaning;
pub mod filter;
pub mod io;
pub mod schema;
pub mod summary;
pub mod table;


pub use cleaning::{STAGES, Stage, clean, split_sex_state, title_case};
pub use filter::{FilterSelection, RowSelection, View, distinct_values, filter};
pub use io::{load, read_table, save, write_table};
pub use summary::{ChartKind, Distribution, chart_distribution, chart_distributions, distribution};
pub use table::{Cell, RecordTable};
