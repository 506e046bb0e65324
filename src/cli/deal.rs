use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::{
    book::Books,
    config::Config,
    core::{
        coverage::CoverageReport,
        deal::{Deal, DealKey, DealType},
    },
    prelude::*,
    quantity::{energy::Gigajoules, price::GigajoulePrice},
    tables::{build_coverage_table, build_deal_groups_table},
};

#[derive(Parser)]
pub struct DealArgs {
    #[command(subcommand)]
    pub command: DealCommand,
}

#[derive(Subcommand)]
pub enum DealCommand {
    /// Record an executed deal and check the forecast coverage.
    Add(AddArgs),

    /// List the booked deals, one line per deal.
    List,

    /// Re-price or re-size one deal across all its days.
    Amend(AmendArgs),
}

#[derive(Parser)]
pub struct AddArgs {
    /// First delivery day.
    #[clap(long = "start")]
    pub start_date: NaiveDate,

    /// Last delivery day, inclusive.
    #[clap(long = "end")]
    pub end_date: NaiveDate,

    #[clap(long = "type", value_enum)]
    pub deal_type: DealType,

    /// Contracted volume per gas day.
    #[clap(long = "volume-gj-per-day")]
    pub volume: Gigajoules,

    #[clap(long = "price-per-gj")]
    pub price: GigajoulePrice,

    #[clap(long)]
    pub supplier: String,

    #[clap(long = "delivery-point")]
    pub delivery_point: String,
}

#[derive(Parser)]
pub struct AmendArgs {
    #[clap(long = "start")]
    pub start_date: NaiveDate,

    #[clap(long = "end")]
    pub end_date: NaiveDate,

    #[clap(long)]
    pub supplier: String,

    /// New volume per gas day.
    #[clap(long = "volume-gj-per-day")]
    pub volume: Option<Gigajoules>,

    /// New price.
    #[clap(long = "price-per-gj")]
    pub price: Option<GigajoulePrice>,
}

#[instrument(skip_all)]
pub fn run(args: DealArgs, books: &Books, config: &Config) -> Result {
    match args.command {
        DealCommand::Add(args) => add(args, books, config),
        DealCommand::List => list(books),
        DealCommand::Amend(args) => amend(args, books),
    }
}

fn add(args: AddArgs, books: &Books, config: &Config) -> Result {
    if !config.knows_supplier(&args.supplier) {
        warn!(supplier = %args.supplier, "supplier is not on the configured list");
    }
    if !config.knows_delivery_point(&args.delivery_point) {
        warn!(
            delivery_point = %args.delivery_point,
            "delivery point is not on the configured list",
        );
    }

    let deal = Deal::builder()
        .start_date(args.start_date)
        .end_date(args.end_date)
        .deal_type(args.deal_type)
        .volume(args.volume)
        .price(args.price)
        .supplier(args.supplier)
        .delivery_point(args.delivery_point)
        .build();

    let mut deals = books.load_deals()?;
    let n_days = deals.record(&deal)?;
    books.save_deals(&deals)?;
    info!(n_days, "deal recorded");

    let forecast = books.load_forecast()?;
    let report = CoverageReport::check(forecast.entries(), &deals.daily_totals());
    if !report.over_contracted.is_empty() {
        warn!(
            n_days = report.over_contracted.len(),
            "total contracted volume exceeds the forecast",
        );
        println!("{}", build_coverage_table(&report.over_contracted));
    }
    if !report.missing_forecast.is_empty() {
        info!(
            n_days = report.missing_forecast.len(),
            "forecast data missing, those days are treated as 0 GJ",
        );
        println!("{}", build_coverage_table(&report.missing_forecast));
    }
    if report.is_clean() {
        info!("deal saved with no warnings");
    }
    Ok(())
}

fn list(books: &Books) -> Result {
    let deals = books.load_deals()?;
    if deals.is_empty() {
        info!("no deals found");
        return Ok(());
    }
    println!("{}", build_deal_groups_table(&deals.groups()));
    Ok(())
}

fn amend(args: AmendArgs, books: &Books) -> Result {
    ensure!(
        args.volume.is_some() || args.price.is_some(),
        "nothing to amend: pass a new volume and/or price",
    );
    let key = DealKey {
        start_date: args.start_date,
        end_date: args.end_date,
        supplier: args.supplier,
    };

    let mut deals = books.load_deals()?;
    let n_days = deals.amend(&key, args.volume, args.price);
    ensure!(n_days != 0, "no deal matches {key}");
    books.save_deals(&deals)?;
    info!(n_days, %key, "deal amended");

    let groups: Vec<_> =
        deals.groups().into_iter().filter(|group| group.key == key).collect();
    println!("{}", build_deal_groups_table(&groups));
    Ok(())
}
