use std::{collections::BTreeMap, fmt::Display, ops::RangeInclusive};

use chrono::NaiveDate;
use comfy_table::Color;
use enumset::EnumSet;

use crate::{
    core::{
        DailySeries,
        deal::{DealDay, DealType},
    },
    quantity::energy::Gigajoules,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Position {
    /// Contracted more than the forecast.
    Long,

    /// Contracted less than the forecast.
    Short,

    Balanced,
}

impl Position {
    /// Classify the executed-minus-forecast delta, treating anything within
    /// the tolerance band as balanced.
    pub fn classify(delta: Gigajoules, tolerance: Gigajoules) -> Self {
        if delta > tolerance {
            Self::Long
        } else if delta < -tolerance {
            Self::Short
        } else {
            Self::Balanced
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Long => Color::Red,
            Self::Short => Color::Green,
            Self::Balanced => Color::DarkYellow,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Long => write!(f, "Long"),
            Self::Short => write!(f, "Short"),
            Self::Balanced => write!(f, "Balanced"),
        }
    }
}

/// Forecast and executed volumes for a single gas day.
#[derive(Copy, Clone, Debug)]
pub struct DailyPosition {
    pub date: NaiveDate,
    pub forecast: Gigajoules,
    pub fixed: Gigajoules,
    pub index: Gigajoules,
}

impl DailyPosition {
    fn flat(date: NaiveDate) -> Self {
        Self {
            date,
            forecast: Gigajoules::zero(),
            fixed: Gigajoules::zero(),
            index: Gigajoules::zero(),
        }
    }

    #[must_use]
    pub fn executed(&self) -> Gigajoules {
        self.fixed + self.index
    }

    #[must_use]
    pub fn delta(&self) -> Gigajoules {
        self.executed() - self.forecast
    }

    pub fn position(&self, tolerance: Gigajoules) -> Position {
        Position::classify(self.delta(), tolerance)
    }
}

/// Forecast vs. executed view over a period, one row per day with either
/// a forecast or contracted volume.
#[must_use]
pub struct PositionReport {
    pub tolerance: Gigajoules,
    pub days: Vec<DailyPosition>,
}

impl PositionReport {
    pub fn build(
        forecast: &DailySeries,
        deal_days: &[DealDay],
        period: &RangeInclusive<NaiveDate>,
        deal_types: EnumSet<DealType>,
        tolerance: Gigajoules,
    ) -> Self {
        let mut days: BTreeMap<NaiveDate, DailyPosition> = forecast
            .range(period.clone())
            .map(|(&date, &consumption)| {
                (date, DailyPosition { forecast: consumption, ..DailyPosition::flat(date) })
            })
            .collect();
        for day in deal_days {
            if !period.contains(&day.date) || !deal_types.contains(day.deal_type) {
                continue;
            }
            let entry = days.entry(day.date).or_insert_with(|| DailyPosition::flat(day.date));
            match day.deal_type {
                DealType::Fixed => entry.fixed += day.volume,
                DealType::Index => entry.index += day.volume,
            }
        }
        Self { tolerance, days: days.into_values().collect() }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    #[must_use]
    pub fn total_forecast(&self) -> Gigajoules {
        self.days.iter().map(|day| day.forecast).sum()
    }

    #[must_use]
    pub fn total_executed(&self) -> Gigajoules {
        self.days.iter().map(DailyPosition::executed).sum()
    }

    /// Executed-over-forecast relative difference, undefined for a zero forecast.
    #[must_use]
    pub fn relative_difference(&self) -> Option<f64> {
        let total_forecast = self.total_forecast();
        (total_forecast != Gigajoules::zero())
            .then(|| (self.total_executed() - total_forecast).0 / total_forecast.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{core::deal::Deal, quantity::price::GigajoulePrice};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, day).unwrap()
    }

    fn deal_days(deal_type: DealType, from: u32, to: u32, volume: f64) -> Vec<DealDay> {
        Deal::builder()
            .start_date(date(from))
            .end_date(date(to))
            .deal_type(deal_type)
            .volume(Gigajoules(volume))
            .price(GigajoulePrice(3.25))
            .supplier("Shell")
            .delivery_point("DAWN")
            .build()
            .expand()
            .collect()
    }

    #[test]
    fn classify_respects_tolerance_band() {
        let tolerance = Gigajoules(0.01);
        assert_eq!(Position::classify(Gigajoules(0.005), tolerance), Position::Balanced);
        assert_eq!(Position::classify(Gigajoules(-0.005), tolerance), Position::Balanced);
        assert_eq!(Position::classify(Gigajoules(0.02), tolerance), Position::Long);
        assert_eq!(Position::classify(Gigajoules(-0.02), tolerance), Position::Short);
    }

    #[test]
    fn build_unions_forecast_and_deal_dates() {
        let forecast: DailySeries = [(date(1), Gigajoules(1000.0))].into_iter().collect();
        let days = deal_days(DealType::Fixed, 2, 2, 800.0);
        let report = PositionReport::build(
            &forecast,
            &days,
            &(date(1)..=date(3)),
            EnumSet::all(),
            Gigajoules(0.01),
        );

        assert_eq!(report.days.len(), 2);
        assert_eq!(report.days[0].forecast, Gigajoules(1000.0));
        assert_eq!(report.days[0].executed(), Gigajoules::zero());
        assert_eq!(report.days[0].position(report.tolerance), Position::Short);
        assert_eq!(report.days[1].forecast, Gigajoules::zero());
        assert_eq!(report.days[1].fixed, Gigajoules(800.0));
        assert_eq!(report.days[1].position(report.tolerance), Position::Long);
    }

    #[test]
    fn build_filters_deal_types() {
        let forecast = DailySeries::new();
        let mut days = deal_days(DealType::Fixed, 1, 1, 800.0);
        days.extend(deal_days(DealType::Index, 1, 1, 200.0));
        let report = PositionReport::build(
            &forecast,
            &days,
            &(date(1)..=date(1)),
            EnumSet::only(DealType::Index),
            Gigajoules(0.01),
        );
        assert_eq!(report.total_executed(), Gigajoules(200.0));
    }

    #[test]
    fn relative_difference_ok() {
        let forecast: DailySeries = [(date(1), Gigajoules(1000.0))].into_iter().collect();
        let days = deal_days(DealType::Fixed, 1, 1, 900.0);
        let report = PositionReport::build(
            &forecast,
            &days,
            &(date(1)..=date(1)),
            EnumSet::all(),
            Gigajoules(0.01),
        );
        assert_abs_diff_eq!(report.relative_difference().unwrap(), -0.1);
    }

    #[test]
    fn relative_difference_is_undefined_without_forecast() {
        let report = PositionReport::build(
            &DailySeries::new(),
            &deal_days(DealType::Fixed, 1, 1, 900.0),
            &(date(1)..=date(1)),
            EnumSet::all(),
            Gigajoules(0.01),
        );
        assert_eq!(report.relative_difference(), None);
    }
}
