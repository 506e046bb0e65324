use chrono::NaiveDate;

use crate::{core::DailySeries, quantity::energy::Gigajoules};

/// Contracted day judged against the forecast.
#[derive(Copy, Clone, Debug)]
pub struct CoverageDay {
    pub date: NaiveDate,
    pub forecast: Gigajoules,
    pub contracted: Gigajoules,
}

impl CoverageDay {
    #[must_use]
    pub fn remaining(&self) -> Gigajoules {
        self.forecast - self.contracted
    }
}

/// Non-fatal findings raised after a deal lands in the book: days where the
/// contracted total exceeds the forecast, and days contracted without any
/// forecast at all (those are judged against 0 GJ).
#[must_use]
pub struct CoverageReport {
    pub over_contracted: Vec<CoverageDay>,
    pub missing_forecast: Vec<CoverageDay>,
}

impl CoverageReport {
    pub fn check(forecast: &DailySeries, contracted: &DailySeries) -> Self {
        let mut over_contracted = Vec::new();
        let mut missing_forecast = Vec::new();
        for (&date, &volume) in contracted {
            let day = CoverageDay {
                date,
                forecast: forecast.get(&date).copied().unwrap_or_else(Gigajoules::zero),
                contracted: volume,
            };
            if day.remaining() < Gigajoules::zero() {
                over_contracted.push(day);
            }
            if day.forecast == Gigajoules::zero() {
                missing_forecast.push(day);
            }
        }
        Self { over_contracted, missing_forecast }
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.over_contracted.is_empty() && self.missing_forecast.is_empty()
    }
}
