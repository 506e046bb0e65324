use std::{io, ops::RangeInclusive};

use chrono::NaiveDate;
use itertools::Itertools;

use crate::{
    core::{
        DailySeries,
        deal::{Deal, DealDay, DealKey, DealType},
    },
    prelude::*,
    quantity::{cost::Dollars, energy::Gigajoules, price::GigajoulePrice},
};

/// Daily-expanded executed deals, in entry order.
#[derive(Default)]
#[must_use]
pub struct DealBook {
    days: Vec<DealDay>,
}

impl DealBook {
    pub fn read_from(reader: impl io::Read) -> Result<Self> {
        let mut days = Vec::new();
        for record in csv::Reader::from_reader(reader).deserialize() {
            days.push(record.context("malformed deal row")?);
        }
        Ok(Self { days })
    }

    pub fn write_to(&self, writer: impl io::Write) -> Result {
        let mut writer = csv::Writer::from_writer(writer);
        for day in &self.days {
            writer.serialize(day)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Validate and book a deal, returning the number of daily rows added.
    pub fn record(&mut self, deal: &Deal) -> Result<usize> {
        deal.validate()?;
        let n_before = self.days.len();
        self.days.extend(deal.expand());
        Ok(self.days.len() - n_before)
    }

    #[must_use]
    pub fn days(&self) -> &[DealDay] {
        &self.days
    }

    /// Total contracted volume per gas day, across all deal types.
    #[must_use]
    pub fn daily_totals(&self) -> DailySeries {
        let mut totals = DailySeries::new();
        for day in &self.days {
            *totals.entry(day.date).or_insert(Gigajoules::zero()) += day.volume;
        }
        totals
    }

    /// One group per managed deal, ordered by key.
    #[must_use]
    pub fn groups(&self) -> Vec<DealGroup> {
        self.days
            .iter()
            .map(|day| (day.key(), day))
            .into_group_map()
            .into_iter()
            .sorted_by(|(left, _), (right, _)| left.cmp(right))
            .map(|(key, days)| DealGroup::new(key, &days))
            .collect()
    }

    /// Set a new volume and/or price on every daily row of the keyed deal,
    /// returning how many rows changed.
    pub fn amend(
        &mut self,
        key: &DealKey,
        volume: Option<Gigajoules>,
        price: Option<GigajoulePrice>,
    ) -> usize {
        let mut n_amended = 0;
        for day in &mut self.days {
            if !day.matches(key) {
                continue;
            }
            if let Some(volume) = volume {
                day.volume = volume;
            }
            if let Some(price) = price {
                day.price = price;
            }
            n_amended += 1;
        }
        n_amended
    }

    #[must_use]
    pub fn span(&self) -> Option<RangeInclusive<NaiveDate>> {
        let dates = self.days.iter().map(|day| day.date);
        Some(dates.clone().min()?..=dates.max()?)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Daily rows folded back into the deal they were entered as.
pub struct DealGroup {
    pub key: DealKey,
    pub deal_type: DealType,
    pub volume: Gigajoules,
    pub price: GigajoulePrice,
    pub delivery_point: String,
    pub n_days: usize,
}

impl DealGroup {
    fn new(key: DealKey, days: &[&DealDay]) -> Self {
        let first = days[0];
        Self {
            key,
            deal_type: first.deal_type,
            volume: first.volume,
            price: first.price,
            delivery_point: first.delivery_point.clone(),
            n_days: days.len(),
        }
    }

    /// Contract value over the whole delivery period.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn total_value(&self) -> Dollars {
        self.volume * self.price * (self.n_days as f64)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, day).unwrap()
    }

    fn deal(supplier: &str, from: u32, to: u32, volume: f64) -> Deal {
        Deal::builder()
            .start_date(date(from))
            .end_date(date(to))
            .deal_type(DealType::Fixed)
            .volume(Gigajoules(volume))
            .price(GigajoulePrice(4.10))
            .supplier(supplier)
            .delivery_point("DAWN")
            .build()
    }

    #[test]
    fn record_expands_to_daily_rows() {
        let mut book = DealBook::default();
        assert_eq!(book.record(&deal("TD", 1, 5, 600.0)).unwrap(), 5);
        assert_eq!(book.len(), 5);
    }

    #[test]
    fn record_rejects_reversed_period() {
        let mut book = DealBook::default();
        assert!(book.record(&deal("TD", 5, 1, 600.0)).is_err());
        assert!(book.is_empty());
    }

    #[test]
    fn daily_totals_sum_overlapping_deals() {
        let mut book = DealBook::default();
        book.record(&deal("TD", 1, 3, 600.0)).unwrap();
        book.record(&deal("Shell", 2, 4, 1000.0)).unwrap();

        let totals = book.daily_totals();

        assert_eq!(totals[&date(1)], Gigajoules(600.0));
        assert_eq!(totals[&date(2)], Gigajoules(1600.0));
        assert_eq!(totals[&date(4)], Gigajoules(1000.0));
    }

    #[test]
    fn groups_fold_daily_rows_back() {
        let mut book = DealBook::default();
        book.record(&deal("TD", 1, 3, 600.0)).unwrap();
        book.record(&deal("Shell", 1, 2, 1000.0)).unwrap();

        let groups = book.groups();

        assert_eq!(groups.len(), 2);
        // Ordered by key: both start on the 1st, Shell's earlier end date sorts first.
        assert_eq!(groups[0].key.supplier, "Shell");
        assert_eq!(groups[0].n_days, 2);
        assert_eq!(groups[1].key.supplier, "TD");
        assert_eq!(groups[1].n_days, 3);
        assert_abs_diff_eq!(groups[1].total_value().0, 600.0 * 4.10 * 3.0);
    }

    #[test]
    fn amend_touches_the_whole_group_only() {
        let mut book = DealBook::default();
        book.record(&deal("TD", 1, 3, 600.0)).unwrap();
        book.record(&deal("Shell", 1, 2, 1000.0)).unwrap();
        let key = DealKey {
            start_date: date(1),
            end_date: date(3),
            supplier: "TD".to_owned(),
        };

        let n_amended = book.amend(&key, Some(Gigajoules(700.0)), None);

        assert_eq!(n_amended, 3);
        assert!(
            book.days()
                .iter()
                .filter(|day| day.matches(&key))
                .all(|day| day.volume == Gigajoules(700.0))
        );
        assert!(
            book.days()
                .iter()
                .filter(|day| !day.matches(&key))
                .all(|day| day.volume == Gigajoules(1000.0))
        );
    }

    #[test]
    fn amend_misses_unknown_keys() {
        let mut book = DealBook::default();
        book.record(&deal("TD", 1, 3, 600.0)).unwrap();
        let key = DealKey {
            start_date: date(1),
            end_date: date(2),
            supplier: "TD".to_owned(),
        };
        assert_eq!(book.amend(&key, Some(Gigajoules(700.0)), None), 0);
    }

    #[test]
    fn book_round_trips() {
        let mut book = DealBook::default();
        book.record(&deal("TD", 1, 2, 600.0)).unwrap();

        let mut buffer = Vec::new();
        book.write_to(&mut buffer).unwrap();
        let header = String::from_utf8_lossy(&buffer).lines().next().unwrap().to_owned();
        assert_eq!(
            header,
            "date,deal_type,volume_gj_per_day,price,supplier,delivery_point,start_date,end_date",
        );

        let reloaded = DealBook::read_from(buffer.as_slice()).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.days()[0].deal_type, DealType::Fixed);
        assert_eq!(reloaded.span(), Some(date(1)..=date(2)));
    }
}
