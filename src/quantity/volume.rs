use std::fmt::{Display, Formatter};

quantity!(CubicMetres, "m³");

/// Display unit for forecast volumes.
#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum VolumeUnit {
    Gj,
    M3,
}

impl Display for VolumeUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gj => write!(f, "GJ"),
            Self::M3 => write!(f, "m³"),
        }
    }
}
