use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use comfy_table::Color;
use serde::{Deserialize, Serialize};

use crate::{
    prelude::*,
    quantity::{energy::Gigajoules, price::GigajoulePrice},
};

#[derive(Debug, clap::ValueEnum, enumset::EnumSetType, Deserialize, Serialize)]
pub enum DealType {
    /// Fixed price for the whole delivery period.
    Fixed,

    /// Priced daily against the index at the delivery point.
    Index,
}

impl Display for DealType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed => write!(f, "Fixed"),
            Self::Index => write!(f, "Index"),
        }
    }
}

impl DealType {
    pub const fn color(self) -> Color {
        match self {
            Self::Fixed => Color::Blue,
            Self::Index => Color::DarkYellow,
        }
    }
}

/// Executed supply deal as entered: one volume applies to every day of the period.
#[derive(Debug, Clone, bon::Builder)]
pub struct Deal {
    pub start_date: NaiveDate,

    /// Inclusive.
    pub end_date: NaiveDate,

    pub deal_type: DealType,

    /// Contracted volume per gas day.
    pub volume: Gigajoules,

    pub price: GigajoulePrice,

    #[builder(into)]
    pub supplier: String,

    #[builder(into)]
    pub delivery_point: String,
}

impl Deal {
    pub fn validate(&self) -> Result {
        ensure!(
            self.end_date >= self.start_date,
            "end date {} is before start date {}",
            self.end_date,
            self.start_date,
        );
        Ok(())
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end_date = self.end_date;
        self.start_date.iter_days().take_while(move |date| *date <= end_date)
    }

    /// Expand into one bookable row per gas day of the delivery period.
    pub fn expand(&self) -> impl Iterator<Item = DealDay> + '_ {
        self.days().map(|date| DealDay {
            date,
            deal_type: self.deal_type,
            volume: self.volume,
            price: self.price,
            supplier: self.supplier.clone(),
            delivery_point: self.delivery_point.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

/// Daily-expanded deal row, the unit of storage in the deal book.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DealDay {
    pub date: NaiveDate,
    pub deal_type: DealType,

    #[serde(rename = "volume_gj_per_day")]
    pub volume: Gigajoules,

    pub price: GigajoulePrice,
    pub supplier: String,
    pub delivery_point: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DealDay {
    #[must_use]
    pub fn key(&self) -> DealKey {
        DealKey {
            start_date: self.start_date,
            end_date: self.end_date,
            supplier: self.supplier.clone(),
        }
    }

    #[must_use]
    pub fn matches(&self, key: &DealKey) -> bool {
        (self.start_date == key.start_date)
            && (self.end_date == key.end_date)
            && (self.supplier == key.supplier)
    }
}

/// Deals are managed as a whole: all daily rows sharing the key are edited together.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DealKey {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub supplier: String,
}

impl Display for DealKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} to {})", self.supplier, self.start_date, self.end_date)
    }
}
