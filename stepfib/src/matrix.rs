use serde::Serialize;

use crate::error::EngineError;

/// Integer type of every matrix entry.
///
/// Signed because the inverse of the base transformation holds a `-1`.
/// `base^k` holds F(k+1), so a Fibonacci state fits up to `k = 183`; see
/// [`StepFib::MAX_FIB_INDEX`](crate::StepFib::MAX_FIB_INDEX).
pub type Entry = i128;

// |a b|
// |c d|
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Matrix2x2 {
    pub a: Entry,
    pub b: Entry,
    pub c: Entry,
    pub d: Entry,
}

impl Matrix2x2 {
    pub const IDENTITY: Self = Self::new(1, 0, 0, 1);

    /// `[[1, 1], [1, 0]]`. Its k-th power is `[[F(k+1), F(k)], [F(k), F(k-1)]]`.
    pub const FIB_BASE: Self = Self::new(1, 1, 1, 0);

    pub const fn new(a: Entry, b: Entry, c: Entry, d: Entry) -> Self {
        Self { a, b, c, d }
    }

    /// Exact product `self * rhs`, or `None` if any entry leaves `Entry`.
    pub fn checked_mul(&self, rhs: &Self) -> Option<Self> {
        let dot = |x0: Entry, y0: Entry, x1: Entry, y1: Entry| {
            x0.checked_mul(y0)?.checked_add(x1.checked_mul(y1)?)
        };
        Some(Self {
            a: dot(self.a, rhs.a, self.b, rhs.c)?,
            b: dot(self.a, rhs.b, self.b, rhs.d)?,
            c: dot(self.c, rhs.a, self.d, rhs.c)?,
            d: dot(self.c, rhs.b, self.d, rhs.d)?,
        })
    }

    pub fn determinant(&self) -> Option<Entry> {
        self.a
            .checked_mul(self.d)?
            .checked_sub(self.b.checked_mul(self.c)?)
    }

    /// Inverse of a matrix whose determinant is exactly `1` or `-1`.
    ///
    /// `(1/det) * [[d, -b], [-c, a]]`. With `det = ±1`, dividing by `det` is the
    /// same as multiplying by it, so the result stays in exact integers.
    /// Any other determinant is refused rather than rounded.
    pub fn unimodular_inverse(&self) -> Result<Self, EngineError> {
        let det = self.determinant().ok_or(EngineError::DeterminantOverflow)?;
        if det != 1 && det != -1 {
            return Err(EngineError::NotUnimodular { det });
        }
        let scale = |x: Entry, by: Entry| {
            x.checked_mul(by)
                .ok_or(EngineError::DeterminantOverflow)
        };
        Ok(Self {
            a: scale(self.d, det)?,
            b: scale(self.b, -det)?,
            c: scale(self.c, -det)?,
            d: scale(self.a, det)?,
        })
    }

    /// `self^e` by square-and-multiply.
    pub fn checked_pow(&self, mut e: u64) -> Option<Self> {
        let mut acc = Self::IDENTITY;
        let mut b = *self;

        while e > 0 {
            if e % 2 == 1 {
                acc = b.checked_mul(&acc)?;
            }
            e /= 2;
            if e > 0 {
                b = b.checked_mul(&b)?;
            }
        }
        Some(acc)
    }

    pub fn is_symmetric(&self) -> bool {
        self.b == self.c
    }
}

impl Default for Matrix2x2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}
