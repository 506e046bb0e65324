use std::ops::Mul;

quantity!(Dollars, "$");

impl Mul<f64> for Dollars {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}
