use chrono::NaiveDate;
use clap::Parser;

use crate::{book::Books, demo, prelude::*};

#[derive(Parser)]
pub struct DemoArgs {
    /// First day of the synthetic horizon.
    #[clap(long, default_value = "2021-08-02")]
    pub from: NaiveDate,

    /// Last day of the synthetic horizon.
    #[clap(long, default_value = "2025-12-31")]
    pub to: NaiveDate,

    /// RNG seed; the same seed always produces the same books.
    #[clap(long, default_value_t = 42)]
    pub seed: u64,
}

#[instrument(skip_all)]
pub fn run(args: &DemoArgs, books: &Books) -> Result {
    let (forecast, deals) = demo::generate(&(args.from..=args.to), args.seed)?;
    info!(
        n_forecast_days = forecast.len(),
        n_deal_rows = deals.len(),
        "generated the synthetic books",
    );
    books.save_forecast(&forecast)?;
    books.save_deals(&deals)?;
    info!("books replaced");
    Ok(())
}
