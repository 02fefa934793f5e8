use serde::Serialize;
use tracing::trace;

use crate::error::EngineError;
use crate::matrix::{Entry, Matrix2x2};

/// Fibonacci engine holding `state = base^index`.
///
/// Every query walks `index` to the requested value by multiplying the state
/// with the base (forward) or with its inverse (backward), one step at a
/// time. Not synchronized: share it behind a lock if more than one caller
/// needs it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StepFib {
    base: Matrix2x2,
    #[serde(skip)]
    base_inv: Matrix2x2,
    state: Matrix2x2,
    index: i64,
    last_steps: u64,
    total_steps: u64,
}

impl StepFib {
    /// Largest index the Fibonacci base can reach: `base^183` holds F(184),
    /// `base^184` would need F(185), which overflows an i128.
    pub const MAX_FIB_INDEX: i64 = 183;

    pub fn new() -> Self {
        Self {
            base: Matrix2x2::FIB_BASE,
            // FIB_BASE has determinant -1
            base_inv: Matrix2x2::new(0, 1, 1, -1),
            state: Matrix2x2::FIB_BASE,
            index: 1,
            last_steps: 0,
            total_steps: 0,
        }
    }

    /// Engine over an arbitrary base, starting at `base^1`.
    ///
    /// Walking backward needs an exact integer inverse, so the base must have
    /// determinant `1` or `-1`.
    pub fn with_base(base: Matrix2x2) -> Result<Self, EngineError> {
        let base_inv = base.unimodular_inverse()?;
        Ok(Self {
            base,
            base_inv,
            state: base,
            index: 1,
            last_steps: 0,
            total_steps: 0,
        })
    }

    /// Moves the state to index `n` and returns its `(0, 1)` entry, which is
    /// F(n) for the Fibonacci base.
    ///
    /// Fails with [`EngineError::NegativeIndex`] for `n < 0` without touching
    /// the state. With the Fibonacci base any `n` above [`Self::MAX_FIB_INDEX`]
    /// ends in [`EngineError::Overflow`]; the engine then stays at the last
    /// index it could represent.
    #[tracing::instrument(level = "trace", skip(self), fields(from = self.index))]
    pub fn query(&mut self, n: i64) -> Result<Entry, EngineError> {
        if n < 0 {
            return Err(EngineError::NegativeIndex(n));
        }
        self.last_steps = 0;

        // retract: right-multiply by the inverse
        while n < self.index {
            let next = self.state.checked_mul(&self.base_inv);
            self.commit(next, self.index - 1)?;
        }
        // advance: left-multiply by the base
        while n > self.index {
            let next = self.base.checked_mul(&self.state);
            self.commit(next, self.index + 1)?;
        }

        trace!(steps = self.last_steps, "query");
        debug_assert!(
            self.holds_invariant(),
            "state drifted from base^{}",
            self.index
        );
        Ok(self.state.b)
    }

    fn commit(&mut self, next: Option<Matrix2x2>, index: i64) -> Result<(), EngineError> {
        self.state = next.ok_or(EngineError::Overflow { index })?;
        self.index = index;
        self.last_steps += 1;
        self.total_steps += 1;
        Ok(())
    }

    /// Recomputes `base^index` from scratch and compares it with the state.
    pub fn holds_invariant(&self) -> bool {
        let Ok(e) = u64::try_from(self.index) else {
            return false;
        };
        let symmetric = !self.base.is_symmetric() || self.state.is_symmetric();
        symmetric && self.base.checked_pow(e) == Some(self.state)
    }

    pub fn index(&self) -> i64 {
        self.index
    }

    pub fn state(&self) -> &Matrix2x2 {
        &self.state
    }

    pub fn base(&self) -> &Matrix2x2 {
        &self.base
    }

    /// Matrix multiplications performed by the most recent query.
    pub fn last_steps(&self) -> u64 {
        self.last_steps
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }
}

impl Default for StepFib {
    fn default() -> Self {
        Self::new()
    }
}
