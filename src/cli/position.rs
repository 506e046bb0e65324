use chrono::NaiveDate;
use clap::Parser;
use enumset::EnumSet;

use crate::{
    book::Books,
    config::Config,
    core::{deal::DealType, position::PositionReport},
    prelude::*,
    tables::{build_position_summary_table, build_position_table},
};

#[derive(Parser)]
pub struct PositionArgs {
    /// Defaults to the first forecast day.
    #[clap(long)]
    pub from: Option<NaiveDate>,

    /// Defaults to the last forecast day.
    #[clap(long)]
    pub to: Option<NaiveDate>,

    /// Deal types counted as executed volume.
    #[clap(
        long = "deal-types",
        value_delimiter = ',',
        num_args = 1..,
        default_value = "fixed,index",
    )]
    pub deal_types: Vec<DealType>,
}

impl PositionArgs {
    #[must_use]
    pub fn deal_types(&self) -> EnumSet<DealType> {
        self.deal_types.iter().copied().collect()
    }
}

#[instrument(skip_all)]
pub fn run(args: &PositionArgs, books: &Books, config: &Config) -> Result {
    let forecast = books.load_forecast()?;
    let deals = books.load_deals()?;

    let Some(span) = forecast.span().or_else(|| deals.span()) else {
        info!("nothing recorded yet");
        return Ok(());
    };
    let period = args.from.unwrap_or(*span.start())..=args.to.unwrap_or(*span.end());
    ensure!(period.start() <= period.end(), "the period ends before it starts");

    let report = PositionReport::build(
        forecast.entries(),
        deals.days(),
        &period,
        args.deal_types(),
        config.balance_tolerance,
    );
    if report.is_empty() {
        info!("nothing to report within the period");
        return Ok(());
    }

    println!("{}", build_position_summary_table(&report));
    println!("{}", build_position_table(&report));
    Ok(())
}
