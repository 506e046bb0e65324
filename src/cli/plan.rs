use chrono::{Local, NaiveDate};
use clap::Parser;

use crate::{
    book::Books,
    core::{gas_week::GasWeek, plan::WeeklyPlan},
    prelude::*,
    tables::build_plan_table,
};

#[derive(Parser)]
pub struct PlanArgs {
    /// Any date within the wanted gas week; defaults to today.
    #[clap(long)]
    pub date: Option<NaiveDate>,
}

#[instrument(skip_all)]
pub fn run(args: &PlanArgs, books: &Books) -> Result {
    let forecast = books.load_forecast()?;
    if forecast.is_empty() {
        info!("load forecast data first to generate an action plan");
        return Ok(());
    }
    let deals = books.load_deals()?;

    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let week = GasWeek::containing(date);
    let plan = WeeklyPlan::build(week, forecast.entries(), &deals.daily_totals());
    if plan.days.is_empty() {
        info!(%week, "no forecast days within the gas week");
        return Ok(());
    }

    info!(%week, "action plan");
    println!("{}", build_plan_table(&plan));
    Ok(())
}
