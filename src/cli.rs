use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use refugio::records::{self, RecordTable};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "refugio",
    about = "Cleaning and visualization of animal shelter records"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log filter directive (e.g. "info" or "refugio=debug")
    #[arg(long, env = "REFUGIO_LOG", global = true)]
    pub log_level: Option<String>,

    /// Directory for rotating log files. Defaults to the platform data directory.
    #[arg(long, env = "REFUGIO_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Only log to the console
    #[arg(long, global = true)]
    pub no_log_file: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean an export and save the result
    Clean {
        /// Raw CSV export
        #[arg(short, long)]
        file: PathBuf,

        /// Output path. Defaults to "<name>_limpio.csv" next to the input.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the distinct values of a column after cleaning
    Values {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long)]
        column: String,
    },
    /// Count (and optionally save) the cleaned rows whose column equals a value
    Filter {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long)]
        column: String,

        /// Exact value to match
        #[arg(short, long)]
        value: String,

        /// Save the matching rows here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the animal type, exit mode and intake condition distributions
    Summary {
        #[arg(short, long)]
        file: PathBuf,

        /// Print JSON instead of a text table
        #[arg(long)]
        json: bool,
    },
}

pub fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Clean { file, output } => handle_clean(&file, output),
        Commands::Values { file, column } => handle_values(&file, &column),
        Commands::Filter {
            file,
            column,
            value,
            output,
        } => handle_filter(&file, &column, &value, output.as_deref()),
        Commands::Summary { file, json } => handle_summary(&file, json),
    }
}

fn load_clean(file: &Path) -> Result<RecordTable> {
    let raw = records::load(file).context("Failed to load CSV")?;
    records::clean(raw).context("Failed to clean records")
}

fn handle_clean(file: &Path, output: Option<PathBuf>) -> Result<()> {
    let output = match output {
        Some(o) => o,
        None => default_output(file)?,
    };

    let table = load_clean(file)?;
    records::save(&table, &output).context("Failed to save cleaned CSV")?;

    println!(
        "Cleaned {} records ({} missing cells) -> {}",
        table.row_count(),
        table.total_missing(),
        output.display()
    );
    Ok(())
}

fn handle_values(file: &Path, column: &str) -> Result<()> {
    let table = load_clean(file)?;
    for value in records::distinct_values(&table, column)? {
        println!("{value}");
    }
    Ok(())
}

fn handle_filter(file: &Path, column: &str, value: &str, output: Option<&Path>) -> Result<()> {
    let table = load_clean(file)?;
    let view = records::filter(&table, column, value)?;
    println!("{} of {} records match", view.len(), table.row_count());

    if let Some(output) = output {
        records::save(&view.to_table()?, output).context("Failed to save filtered CSV")?;
        println!("Saved to {}", output.display());
    }
    Ok(())
}

fn handle_summary(file: &Path, json: bool) -> Result<()> {
    let table = load_clean(file)?;
    let dists = records::chart_distributions(&table)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&dists)?);
        return Ok(());
    }

    for dist in &dists {
        println!("{}", dist.title);
        for (value, count) in &dist.counts {
            println!("  {value:<32} {count:>6}");
        }
        if dist.missing > 0 {
            println!("  {:<32} {:>6}", "(sin dato)", dist.missing);
        }
        println!();
    }
    Ok(())
}

fn default_output(input: &Path) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .ok_or_else(|| anyhow::anyhow!("Invalid file name: {}", input.display()))?
        .to_string_lossy();
    Ok(input.with_file_name(format!("{stem}_limpio.csv")))
}
