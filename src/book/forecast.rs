use std::{io, ops::RangeInclusive};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{core::DailySeries, prelude::*, quantity::energy::Gigajoules};

/// Daily consumption forecast, at most one entry per gas day.
#[derive(Default)]
#[must_use]
pub struct ForecastBook {
    entries: DailySeries,
}

impl ForecastBook {
    pub fn read_from(reader: impl io::Read) -> Result<Self> {
        let mut book = Self::default();
        let (entries, n_skipped) = read_entries(reader)?;
        book.merge(entries);
        if n_skipped != 0 {
            warn!(n_skipped, "skipped forecast rows with unparseable dates");
        }
        Ok(book)
    }

    pub fn write_to(&self, writer: impl io::Write) -> Result {
        let mut writer = csv::Writer::from_writer(writer);
        for (&date, &consumption) in &self.entries {
            writer.serialize(ForecastRecord::new(date, consumption))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Store the forecast for a day, returning the value it replaced.
    pub fn upsert(&mut self, date: NaiveDate, consumption: Gigajoules) -> Option<Gigajoules> {
        self.entries.insert(date, consumption)
    }

    /// Merge entries in order, later entries winning over earlier and existing ones.
    pub fn merge(&mut self, entries: impl IntoIterator<Item = (NaiveDate, Gigajoules)>) -> usize {
        let mut n_merged = 0;
        for (date, consumption) in entries {
            self.upsert(date, consumption);
            n_merged += 1;
        }
        n_merged
    }

    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<Gigajoules> {
        self.entries.get(&date).copied()
    }

    #[must_use]
    pub const fn entries(&self) -> &DailySeries {
        &self.entries
    }

    #[must_use]
    pub fn span(&self) -> Option<RangeInclusive<NaiveDate>> {
        Some(*self.entries.first_key_value()?.0..=*self.entries.last_key_value()?.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// On-disk row. The split year/month/day columns are derived from `date` on
/// write and ignored on read.
#[derive(Serialize)]
struct ForecastRecord {
    date: NaiveDate,
    year: i32,
    month: u32,
    day: u32,
    forecast_consumption: Gigajoules,
}

impl ForecastRecord {
    fn new(date: NaiveDate, consumption: Gigajoules) -> Self {
        Self {
            date,
            year: date.year(),
            month: date.month(),
            day: date.day(),
            forecast_consumption: consumption,
        }
    }
}

#[derive(Deserialize)]
struct RawForecastRecord {
    date: String,
    forecast_consumption: f64,
}

/// Read `(date, consumption)` pairs from a forecast CSV, requiring the `date`
/// and `forecast_consumption` columns and counting rows whose date does not
/// parse instead of failing on them.
pub fn read_entries(reader: impl io::Read) -> Result<(Vec<(NaiveDate, Gigajoules)>, usize)> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut entries = Vec::new();
    let mut n_skipped = 0_usize;
    for record in reader.deserialize() {
        let record: RawForecastRecord = record.context("malformed forecast row")?;
        if let Ok(date) = record.date.parse::<NaiveDate>() {
            entries.push((date, Gigajoules(record.forecast_consumption)));
        } else {
            trace!(date = %record.date, "skipping the row");
            n_skipped += 1;
        }
    }
    Ok((entries, n_skipped))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, day).unwrap()
    }

    #[test]
    fn upsert_overwrites_the_same_day() {
        let mut book = ForecastBook::default();
        assert_eq!(book.upsert(date(1), Gigajoules(1000.0)), None);
        assert_eq!(book.upsert(date(1), Gigajoules(1200.0)), Some(Gigajoules(1000.0)));
        assert_eq!(book.len(), 1);
        assert_eq!(book.get(date(1)), Some(Gigajoules(1200.0)));
    }

    #[test]
    fn merge_keeps_the_last_duplicate() {
        let mut book = ForecastBook::default();
        book.upsert(date(1), Gigajoules(1000.0));
        let n_merged = book.merge([
            (date(1), Gigajoules(1100.0)),
            (date(2), Gigajoules(900.0)),
            (date(2), Gigajoules(950.0)),
        ]);
        assert_eq!(n_merged, 3);
        assert_eq!(book.get(date(1)), Some(Gigajoules(1100.0)));
        assert_eq!(book.get(date(2)), Some(Gigajoules(950.0)));
    }

    #[test]
    fn read_skips_unparseable_dates() {
        let csv = "date,forecast_consumption\n2025-08-01,1000\nnot-a-date,500\n2025-08-02,1200\n";
        let (entries, n_skipped) = read_entries(csv.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(n_skipped, 1);
    }

    #[test]
    fn read_requires_the_consumption_column() {
        let csv = "date,volume\n2025-08-01,1000\n";
        assert!(read_entries(csv.as_bytes()).is_err());
    }

    #[test]
    fn book_round_trips() {
        let mut book = ForecastBook::default();
        book.upsert(date(1), Gigajoules(1000.5));
        book.upsert(date(2), Gigajoules(1200.0));

        let mut buffer = Vec::new();
        book.write_to(&mut buffer).unwrap();
        let reloaded = ForecastBook::read_from(buffer.as_slice()).unwrap();

        assert_eq!(reloaded.get(date(1)), Some(Gigajoules(1000.5)));
        assert_eq!(reloaded.get(date(2)), Some(Gigajoules(1200.0)));
        assert_eq!(reloaded.span(), Some(date(1)..=date(2)));
    }
}
