pub mod coverage;
pub mod deal;
pub mod gas_week;
pub mod plan;
pub mod position;

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::quantity::energy::Gigajoules;

/// Daily GJ totals keyed by gas day.
pub type DailySeries = BTreeMap<NaiveDate, Gigajoules>;
