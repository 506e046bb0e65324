use std::ops::Mul;

use crate::quantity::{cost::Dollars, price::GigajoulePrice, volume::CubicMetres};

quantity!(Gigajoules, "GJ");

impl Gigajoules {
    /// Heating value used for the GJ ↔ m³ display conversion.
    pub const CUBIC_METRES_PER_GIGAJOULE: f64 = 26.853;

    #[must_use]
    pub fn to_cubic_metres(self) -> CubicMetres {
        CubicMetres(self.0 * Self::CUBIC_METRES_PER_GIGAJOULE)
    }

    #[must_use]
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }
}

impl Mul<GigajoulePrice> for Gigajoules {
    type Output = Dollars;

    fn mul(self, rhs: GigajoulePrice) -> Self::Output {
        Dollars(self.0 * rhs.0)
    }
}

impl Mul<f64> for Gigajoules {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn to_cubic_metres_ok() {
        assert_abs_diff_eq!(Gigajoules(2.0).to_cubic_metres().0, 53.706);
    }

    #[test]
    fn value_ok() {
        assert_abs_diff_eq!((Gigajoules(1000.0) * GigajoulePrice(3.25)).0, 3250.0);
    }

    #[test]
    fn sum_ok() {
        let total: Gigajoules = [Gigajoules(1.5), Gigajoules(2.5)].into_iter().sum();
        assert_eq!(total, Gigajoules(4.0));
    }
}
