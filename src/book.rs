pub mod deals;
pub mod forecast;

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    book::{deals::DealBook, forecast::ForecastBook},
    prelude::*,
};

pub const FORECAST_FILE: &str = "forecast.csv";
pub const DEALS_FILE: &str = "deals.csv";

/// The two CSV files under the data directory, the system of record.
#[must_use]
pub struct Books {
    forecast_path: PathBuf,
    deals_path: PathBuf,
}

impl Books {
    pub fn open(data_dir: &Path) -> Self {
        if let Err(error) = fs::create_dir_all(data_dir) {
            // Read-only deployments surface again at save time, as a warning.
            warn!(%error, data_dir = %data_dir.display(), "could not create the data directory");
        }
        Self {
            forecast_path: data_dir.join(FORECAST_FILE),
            deals_path: data_dir.join(DEALS_FILE),
        }
    }

    /// An absent file reads as an empty book.
    #[instrument(skip_all)]
    pub fn load_forecast(&self) -> Result<ForecastBook> {
        if self.forecast_path.is_file() {
            let file = fs::File::open(&self.forecast_path)
                .with_context(|| format!("failed to open {}", self.forecast_path.display()))?;
            ForecastBook::read_from(file)
                .with_context(|| format!("failed to read {}", self.forecast_path.display()))
        } else {
            Ok(ForecastBook::default())
        }
    }

    #[instrument(skip_all)]
    pub fn save_forecast(&self, book: &ForecastBook) -> Result {
        write_defensively(&self.forecast_path, |buffer| book.write_to(buffer))
    }

    #[instrument(skip_all)]
    pub fn load_deals(&self) -> Result<DealBook> {
        if self.deals_path.is_file() {
            let file = fs::File::open(&self.deals_path)
                .with_context(|| format!("failed to open {}", self.deals_path.display()))?;
            DealBook::read_from(file)
                .with_context(|| format!("failed to read {}", self.deals_path.display()))
        } else {
            Ok(DealBook::default())
        }
    }

    #[instrument(skip_all)]
    pub fn save_deals(&self, book: &DealBook) -> Result {
        write_defensively(&self.deals_path, |buffer| book.write_to(buffer))
    }
}

/// Serialize into memory first, then write, downgrading a read-only file
/// system to a warning so that browsing keeps working on frozen deployments.
fn write_defensively(path: &Path, write: impl FnOnce(&mut Vec<u8>) -> Result) -> Result {
    let mut buffer = Vec::new();
    write(&mut buffer)?;
    match fs::write(path, &buffer) {
        Ok(()) => Ok(()),
        Err(error)
            if matches!(error.kind(), ErrorKind::PermissionDenied | ErrorKind::ReadOnlyFilesystem) =>
        {
            warn!(path = %path.display(), "the data directory is read-only, changes are not persisted");
            Ok(())
        }
        Err(error) => {
            Err(error).with_context(|| format!("failed to write {}", path.display()))
        }
    }
}
