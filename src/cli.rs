pub mod deal;
pub mod demo;
pub mod forecast;
pub mod plan;
pub mod position;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use self::{
    deal::DealArgs,
    demo::DemoArgs,
    forecast::ForecastArgs,
    plan::PlanArgs,
    position::PositionArgs,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    pub book: BookArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Parser)]
pub struct BookArgs {
    /// Directory holding `forecast.csv` and `deals.csv`.
    #[clap(long = "data-dir", env = "GASBOOK_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Optional configuration file with known counterparties and tolerances.
    #[clap(long = "config", env = "GASBOOK_CONFIG", default_value = "gasbook.toml")]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum Command {
    /// Maintain the daily consumption forecast.
    Forecast(Box<ForecastArgs>),

    /// Record, list, and amend executed deals.
    Deal(Box<DealArgs>),

    /// Review the forecast vs. executed position.
    Position(Box<PositionArgs>),

    /// Build the action plan for one gas week.
    Plan(Box<PlanArgs>),

    /// Seed the books with synthetic demonstration data.
    Demo(Box<DemoArgs>),
}
