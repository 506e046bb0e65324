use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use comfy_table::Color;

use crate::{
    core::{DailySeries, gas_week::GasWeek},
    quantity::energy::Gigajoules,
};

/// Daily nomination actions for one gas week: every forecast day inside the
/// week, with the volume still to buy (or to sell back) against the forecast.
#[must_use]
pub struct WeeklyPlan {
    pub week: GasWeek,
    pub days: Vec<PlanDay>,
}

impl WeeklyPlan {
    pub fn build(week: GasWeek, forecast: &DailySeries, contracted: &DailySeries) -> Self {
        let days = forecast
            .range(week.start()..=week.end())
            .map(|(&date, &forecast)| PlanDay {
                date,
                forecast,
                contracted: contracted.get(&date).copied().unwrap_or_else(Gigajoules::zero),
            })
            .collect();
        Self { week, days }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct PlanDay {
    pub date: NaiveDate,
    pub forecast: Gigajoules,
    pub contracted: Gigajoules,
}

impl PlanDay {
    /// Outstanding volume: positive means the day is under-contracted.
    #[must_use]
    pub fn action(&self) -> Gigajoules {
        self.forecast - self.contracted
    }

    pub fn suggestion(&self) -> Suggestion {
        let action = self.action();
        if action > Gigajoules::zero() {
            Suggestion::Buy(action)
        } else if action < Gigajoules::zero() {
            Suggestion::Sell(action.abs())
        } else {
            Suggestion::Balanced
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[must_use]
pub enum Suggestion {
    Buy(Gigajoules),
    Sell(Gigajoules),
    Balanced,
}

impl Display for Suggestion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy(volume) => write!(f, "Buy {:.1} GJ", volume.0),
            Self::Sell(volume) => write!(f, "Sell {:.1} GJ", volume.0),
            Self::Balanced => write!(f, "Balanced"),
        }
    }
}

impl Suggestion {
    pub const fn color(self) -> Color {
        match self {
            Self::Buy(_) => Color::Green,
            Self::Sell(_) => Color::Blue,
            Self::Balanced => Color::Reset,
        }
    }
}
