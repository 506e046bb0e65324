use std::{f64::consts::TAU, ops::RangeInclusive};

use chrono::{Datelike, NaiveDate};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    book::{deals::DealBook, forecast::ForecastBook},
    core::{
        DailySeries,
        deal::{Deal, DealType},
    },
    prelude::*,
    quantity::{energy::Gigajoules, price::GigajoulePrice},
};

const BASELINE_GJ: f64 = 1400.0;
const SEASONAL_AMPLITUDE_GJ: f64 = 900.0;
const WEEKLY_RIPPLE_GJ: f64 = 80.0;
const DAILY_NOISE_GJ: f64 = 60.0;
const DEMAND_FLOOR_GJ: f64 = 200.0;

const ANNUAL_BASELOAD_GJ: f64 = 1000.0;
const WINTER_BASELOAD_GJ: f64 = 600.0;
const ANNUAL_PRICE: f64 = 3.25;
const WINTER_PRICE: f64 = 4.10;
const INDEX_BASE_PRICE: f64 = 3.50;

const DELIVERY_POINT: &str = "DAWN";
const ANNUAL_SUPPLIER: &str = "Shell";
const WINTER_SUPPLIER: &str = "TD";
const INDEX_SUPPLIER: &str = "Emera";

/// Build seeded synthetic books: a seasonal demand forecast, an annual and
/// per-winter Fixed baseload, and a daily Index deal for the residual demand.
pub fn generate(period: &RangeInclusive<NaiveDate>, seed: u64) -> Result<(ForecastBook, DealBook)> {
    let (start, end) = (*period.start(), *period.end());
    ensure!(start <= end, "the horizon ends before it starts");

    let mut rng = StdRng::seed_from_u64(seed);
    let demand: DailySeries = start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| (date, demand_on(date, &mut rng)))
        .collect();

    let mut forecast = ForecastBook::default();
    forecast.merge(demand.iter().map(|(&date, &volume)| (date, volume)));

    let mut deals = DealBook::default();
    deals.record(
        &Deal::builder()
            .start_date(start)
            .end_date(end)
            .deal_type(DealType::Fixed)
            .volume(Gigajoules(ANNUAL_BASELOAD_GJ))
            .price(GigajoulePrice(ANNUAL_PRICE))
            .supplier(ANNUAL_SUPPLIER)
            .delivery_point(DELIVERY_POINT)
            .build(),
    )?;
    for year in start.year()..=end.year() {
        let Some(window) = winter_window(year, start, end) else {
            continue;
        };
        deals.record(
            &Deal::builder()
                .start_date(*window.start())
                .end_date(*window.end())
                .deal_type(DealType::Fixed)
                .volume(Gigajoules(WINTER_BASELOAD_GJ))
                .price(GigajoulePrice(WINTER_PRICE))
                .supplier(WINTER_SUPPLIER)
                .delivery_point(DELIVERY_POINT)
                .build(),
        )?;
    }

    // Whatever the baseloads leave uncovered is bought daily on the index.
    let fixed = deals.daily_totals();
    for (&date, &demand_volume) in &demand {
        let fixed_volume = fixed.get(&date).copied().unwrap_or_else(Gigajoules::zero);
        let residual = (demand_volume - fixed_volume).0.round();
        if residual <= 0.0 {
            continue;
        }
        deals.record(
            &Deal::builder()
                .start_date(date)
                .end_date(date)
                .deal_type(DealType::Index)
                .volume(Gigajoules(residual))
                .price(index_price_on(date))
                .supplier(INDEX_SUPPLIER)
                .delivery_point(DELIVERY_POINT)
                .build(),
        )?;
    }

    Ok((forecast, deals))
}

fn demand_on(date: NaiveDate, rng: &mut StdRng) -> Gigajoules {
    let day_of_year = f64::from(date.ordinal());
    // Peaks mid-January.
    let seasonal = (TAU * (day_of_year - 15.0) / 365.25).cos();
    let ripple = if date.weekday().num_days_from_monday() < 5 {
        WEEKLY_RIPPLE_GJ
    } else {
        -WEEKLY_RIPPLE_GJ
    };
    let noise = rng.gen_range(-DAILY_NOISE_GJ..DAILY_NOISE_GJ);
    let demand = SEASONAL_AMPLITUDE_GJ.mul_add(0.5 + 0.5 * seasonal, BASELINE_GJ) + ripple + noise;
    Gigajoules(demand.max(DEMAND_FLOOR_GJ).round())
}

fn index_price_on(date: NaiveDate) -> GigajoulePrice {
    let day_of_year = f64::from(date.ordinal());
    let wiggle = 0.25 * (TAU * day_of_year / 365.25).sin();
    GigajoulePrice(((INDEX_BASE_PRICE + wiggle) * 100.0).round() / 100.0)
}

/// Nov 1 through Mar 31 of the next year, clipped to the horizon.
fn winter_window(
    year: i32,
    start: NaiveDate,
    end: NaiveDate,
) -> Option<RangeInclusive<NaiveDate>> {
    let window_start = NaiveDate::from_ymd_opt(year, 11, 1)?.max(start);
    let window_end = NaiveDate::from_ymd_opt(year + 1, 3, 31)?.min(end);
    (window_start <= window_end).then(|| window_start..=window_end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizon() -> RangeInclusive<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 10, 1).unwrap()..=NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()
    }

    #[test]
    fn generate_is_reproducible() {
        let (first_forecast, first_deals) = generate(&horizon(), 42).unwrap();
        let (second_forecast, second_deals) = generate(&horizon(), 42).unwrap();
        assert_eq!(first_forecast.entries(), second_forecast.entries());
        assert_eq!(first_deals.len(), second_deals.len());
    }

    #[test]
    fn demand_never_drops_below_the_floor() {
        let (forecast, _) = generate(&horizon(), 1).unwrap();
        assert!(forecast.entries().values().all(|volume| *volume >= Gigajoules(DEMAND_FLOOR_GJ)));
    }

    #[test]
    fn index_residuals_are_positive() {
        let (_, deals) = generate(&horizon(), 42).unwrap();
        assert!(
            deals
                .days()
                .iter()
                .filter(|day| day.deal_type == DealType::Index)
                .all(|day| day.volume > Gigajoules::zero())
        );
    }

    #[test]
    fn winter_window_crosses_the_year_boundary() {
        let start = NaiveDate::from_ymd_opt(2021, 8, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2022, 12, 31).unwrap();
        let window = winter_window(2021, start, end).unwrap();
        assert_eq!(*window.start(), NaiveDate::from_ymd_opt(2021, 11, 1).unwrap());
        assert_eq!(*window.end(), NaiveDate::from_ymd_opt(2022, 3, 31).unwrap());
    }

    #[test]
    fn winter_window_clips_to_the_horizon() {
        let start = NaiveDate::from_ymd_opt(2021, 8, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2022, 1, 15).unwrap();
        let window = winter_window(2021, start, end).unwrap();
        assert_eq!(*window.end(), end);
        assert_eq!(winter_window(2022, start, end), None);
    }
}
