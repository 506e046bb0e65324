use std::{fs, path::PathBuf};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::{
    book::{Books, forecast},
    prelude::*,
    quantity::{energy::Gigajoules, volume::VolumeUnit},
    tables::build_forecast_table,
};

#[derive(Parser)]
pub struct ForecastArgs {
    #[command(subcommand)]
    pub command: ForecastCommand,
}

#[derive(Subcommand)]
pub enum ForecastCommand {
    /// Add or replace the forecast for a single gas day.
    Add(AddArgs),

    /// Merge a forecast CSV file into the book.
    Import(ImportArgs),

    /// Show the forecast as a table.
    Show(ShowArgs),

    /// Write the forecast book to a file.
    Export(ExportArgs),
}

#[derive(Parser)]
pub struct AddArgs {
    /// Gas day, for example `2025-11-01`.
    #[clap(long)]
    pub date: NaiveDate,

    /// Expected consumption in GJ.
    #[clap(long = "consumption-gj")]
    pub consumption: Gigajoules,
}

#[derive(Parser)]
pub struct ImportArgs {
    /// CSV file with `date` and `forecast_consumption` columns.
    pub path: PathBuf,
}

#[derive(Parser)]
pub struct ShowArgs {
    #[clap(long)]
    pub from: Option<NaiveDate>,

    #[clap(long)]
    pub to: Option<NaiveDate>,

    #[clap(long, value_enum, default_value = "gj")]
    pub unit: VolumeUnit,
}

#[derive(Parser)]
pub struct ExportArgs {
    pub path: PathBuf,
}

#[instrument(skip_all)]
pub fn run(args: ForecastArgs, books: &Books) -> Result {
    match args.command {
        ForecastCommand::Add(args) => {
            let mut book = books.load_forecast()?;
            if let Some(previous) = book.upsert(args.date, args.consumption) {
                info!(%args.date, %previous, "replacing the existing entry");
            }
            books.save_forecast(&book)?;
            info!(%args.date, consumption = %args.consumption, "forecast recorded");
        }

        ForecastCommand::Import(args) => {
            let file = fs::File::open(&args.path)
                .with_context(|| format!("failed to open {}", args.path.display()))?;
            let (entries, n_skipped) = forecast::read_entries(file)
                .with_context(|| format!("failed to read {}", args.path.display()))?;
            if n_skipped != 0 {
                warn!(n_skipped, "skipped rows with unparseable dates");
            }
            let mut book = books.load_forecast()?;
            let n_merged = book.merge(entries);
            books.save_forecast(&book)?;
            info!(n_merged, n_total = book.len(), "forecast file merged");
        }

        ForecastCommand::Show(args) => {
            let book = books.load_forecast()?;
            if book.is_empty() {
                info!("no forecast data available");
                return Ok(());
            }
            let from = args.from.unwrap_or(NaiveDate::MIN);
            let to = args.to.unwrap_or(NaiveDate::MAX);
            let entries = book.entries().range(from..=to).map(|(&date, &volume)| (date, volume));
            println!("{}", build_forecast_table(entries, args.unit));
        }

        ForecastCommand::Export(args) => {
            let book = books.load_forecast()?;
            let file = fs::File::create(&args.path)
                .with_context(|| format!("failed to create {}", args.path.display()))?;
            book.write_to(file)?;
            info!(n_days = book.len(), path = %args.path.display(), "forecast exported");
        }
    }
    Ok(())
}
