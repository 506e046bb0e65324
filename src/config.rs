use std::{fmt::Debug, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{prelude::*, quantity::energy::Gigajoules};

/// Optional `gasbook.toml`: every field falls back to a sensible default, and
/// an absent file reads as the default configuration.
#[derive(Serialize, Deserialize)]
pub struct Config {
    /// Deltas within this band count as balanced.
    #[serde(default = "default_balance_tolerance")]
    pub balance_tolerance: Gigajoules,

    /// Known counterparties; deals with other suppliers raise a warning.
    #[serde(default = "default_suppliers")]
    pub suppliers: Vec<String>,

    #[serde(default = "default_delivery_points")]
    pub delivery_points: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            balance_tolerance: default_balance_tolerance(),
            suppliers: default_suppliers(),
            delivery_points: default_delivery_points(),
        }
    }
}

impl Config {
    pub fn read_from<P: AsRef<Path> + Debug>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.is_file() {
            toml::from_str(&fs::read_to_string(path)?)
                .with_context(|| format!("failed to parse {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    #[must_use]
    pub fn knows_supplier(&self, supplier: &str) -> bool {
        self.suppliers.iter().any(|known| known == supplier)
    }

    #[must_use]
    pub fn knows_delivery_point(&self, delivery_point: &str) -> bool {
        self.delivery_points.iter().any(|known| known == delivery_point)
    }
}

fn default_balance_tolerance() -> Gigajoules {
    Gigajoules(0.01)
}

fn default_suppliers() -> Vec<String> {
    ["Shell", "TD", "Emera", "DirectEnergy"].map(str::to_owned).into()
}

fn default_delivery_points() -> Vec<String> {
    ["AECO", "DAWN", "Parkway"].map(str::to_owned).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_file_reads_as_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::read_from(temp_dir.path().join("gasbook.toml")).unwrap();
        assert_eq!(config.balance_tolerance, Gigajoules(0.01));
        assert!(config.knows_supplier("Shell"));
        assert!(!config.knows_supplier("Acme"));
    }

    #[test]
    fn partial_file_keeps_the_other_defaults() {
        let config: Config = toml::from_str("balance_tolerance = 0.5").unwrap();
        assert_eq!(config.balance_tolerance, Gigajoules(0.5));
        assert!(config.knows_delivery_point("DAWN"));
    }
}
