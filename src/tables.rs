use chrono::NaiveDate;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    book::deals::DealGroup,
    core::{
        coverage::CoverageDay,
        plan::WeeklyPlan,
        position::{DailyPosition, PositionReport},
    },
    fmt::FormattedPercentage,
    quantity::{energy::Gigajoules, volume::VolumeUnit},
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn volume_cell(volume: Gigajoules) -> Cell {
    Cell::new(volume).set_alignment(CellAlignment::Right)
}

pub fn build_position_summary_table(report: &PositionReport) -> Table {
    let mut table = new_table();
    table
        .set_header(vec!["Total forecasted", "Total executed", "Difference"])
        .add_row(vec![
            volume_cell(report.total_forecast()),
            volume_cell(report.total_executed()),
            Cell::new(
                report
                    .relative_difference()
                    .map_or_else(|| "n/a".to_owned(), |diff| FormattedPercentage(diff).to_string()),
            )
            .set_alignment(CellAlignment::Right),
        ]);
    table
}

pub fn build_position_table(report: &PositionReport) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Date", "Forecast", "Fixed", "Index", "Executed", "Delta", "Position"]);
    for day in &report.days {
        let position = day.position(report.tolerance);
        table.add_row(vec![
            Cell::new(day.date).add_attribute(Attribute::Dim),
            volume_cell(day.forecast),
            volume_cell(day.fixed),
            volume_cell(day.index),
            volume_cell(day.executed()),
            volume_cell(day.delta()).fg(position.color()),
            Cell::new(position).fg(position.color()),
        ]);
    }
    table
}

pub fn build_plan_table(plan: &WeeklyPlan) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Date", "Forecast", "Contracted", "Action", "Suggestion"]);
    for day in &plan.days {
        let suggestion = day.suggestion();
        table.add_row(vec![
            Cell::new(day.date).add_attribute(Attribute::Dim),
            volume_cell(day.forecast),
            volume_cell(day.contracted),
            volume_cell(day.action()),
            Cell::new(suggestion).fg(suggestion.color()),
        ]);
    }
    table
}

pub fn build_forecast_table(
    entries: impl Iterator<Item = (NaiveDate, Gigajoules)>,
    unit: VolumeUnit,
) -> Table {
    let mut table = new_table();
    table.set_header(vec![Cell::new("Date"), Cell::new(format!("Forecast ({unit})"))]);
    for (date, consumption) in entries {
        let consumption = match unit {
            VolumeUnit::Gj => Cell::new(consumption),
            VolumeUnit::M3 => Cell::new(consumption.to_cubic_metres()),
        };
        table.add_row(vec![
            Cell::new(date).add_attribute(Attribute::Dim),
            consumption.set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_deal_groups_table(groups: &[DealGroup]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Supplier", "Start", "End", "Days", "Type", "Volume", "Price", "Value",
    ]);
    for group in groups {
        table.add_row(vec![
            Cell::new(&group.key.supplier),
            Cell::new(group.key.start_date),
            Cell::new(group.key.end_date).add_attribute(Attribute::Dim),
            Cell::new(group.n_days).set_alignment(CellAlignment::Right),
            Cell::new(group.deal_type).fg(group.deal_type.color()),
            volume_cell(group.volume),
            Cell::new(group.price).set_alignment(CellAlignment::Right),
            Cell::new(group.total_value()).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_coverage_table(days: &[CoverageDay]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Date", "Forecast", "Contracted", "Remaining"]);
    for day in days {
        let remaining = day.remaining();
        table.add_row(vec![
            Cell::new(day.date).add_attribute(Attribute::Dim),
            volume_cell(day.forecast),
            volume_cell(day.contracted),
            volume_cell(remaining).fg(if remaining < Gigajoules::zero() {
                Color::Red
            } else {
                Color::Green
            }),
        ]);
    }
    table
}
