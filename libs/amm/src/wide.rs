//! Checked 512-bit arithmetic for solver intermediates.

use dualcurve_types::{FixedPointError, U512};

pub(crate) trait WideMath: Sized {
    fn wadd(self, rhs: Self) -> Result<Self, FixedPointError>;
    fn wsub(self, rhs: Self) -> Result<Self, FixedPointError>;
    fn wmul(self, rhs: Self) -> Result<Self, FixedPointError>;
    fn wdiv(self, rhs: Self) -> Result<Self, FixedPointError>;
    fn wdiff(self, rhs: Self) -> Self;
}

impl WideMath for U512 {
    fn wadd(self, rhs: Self) -> Result<Self, FixedPointError> {
        self.checked_add(rhs)
            .ok_or(FixedPointError::Overflow { operation: "add" })
    }

    fn wsub(self, rhs: Self) -> Result<Self, FixedPointError> {
        self.checked_sub(rhs)
            .ok_or(FixedPointError::Underflow { operation: "sub" })
    }

    fn wmul(self, rhs: Self) -> Result<Self, FixedPointError> {
        self.checked_mul(rhs)
            .ok_or(FixedPointError::Overflow { operation: "mul" })
    }

    fn wdiv(self, rhs: Self) -> Result<Self, FixedPointError> {
        self.checked_div(rhs).ok_or(FixedPointError::DivisionByZero)
    }

    fn wdiff(self, rhs: Self) -> Self {
        if self >= rhs {
            self - rhs
        } else {
            rhs - self
        }
    }
}
