//! Memoized recursive Fibonacci, used to cross-check `stepfib`.

use std::collections::HashMap;

/// Largest `n` whose F(n) fits in an i128.
pub const MAX_INDEX: u64 = 184;

pub struct Memo {
    cache: HashMap<u64, i128>,
}

impl Memo {
    pub fn new() -> Self {
        Self {
            cache: HashMap::from([(0, 0), (1, 1)]),
        }
    }

    /// F(n), or `None` for `n` past [`MAX_INDEX`]. The early refusal keeps the
    /// recursion at most `MAX_INDEX` frames deep.
    pub fn fib(&mut self, n: u64) -> Option<i128> {
        if n > MAX_INDEX {
            return None;
        }
        if let Some(&v) = self.cache.get(&n) {
            return Some(v);
        }
        let v = self.fib(n - 1)?.checked_add(self.fib(n - 2)?)?;
        self.cache.insert(n, v);
        Some(v)
    }

    /// Number of memoized values.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

impl Default for Memo {
    fn default() -> Self {
        Self::new()
    }
}

pub fn fib(n: u64) -> Option<i128> {
    Memo::new().fib(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        assert_eq!(fib(0), Some(0));
        assert_eq!(fib(1), Some(1));
        assert_eq!(fib(2), Some(1));
        assert_eq!(fib(3), Some(2));
        assert_eq!(fib(4), Some(3));
        assert_eq!(fib(10), Some(55));
        assert_eq!(fib(20), Some(6765));
        assert_eq!(fib(50), Some(12586269025));
        assert_eq!(fib(92), Some(7540113804746346429));
    }

    #[test]
    fn memo_caches_every_value() {
        let mut memo = Memo::new();
        assert_eq!(memo.cached(), 2);
        memo.fib(30);
        assert_eq!(memo.cached(), 31);
        assert_eq!(memo.fib(29), Some(514229));
        assert_eq!(memo.cached(), 31);
    }

    #[test]
    fn overflow_is_none() {
        let mut memo = Memo::new();
        assert_eq!(
            memo.fib(MAX_INDEX),
            Some(127127879743834334146972278486287885163)
        );
        assert_eq!(memo.fib(MAX_INDEX + 1), None);
        assert_eq!(memo.cached(), MAX_INDEX as usize + 1);
    }

    #[test]
    fn huge_index_returns_none_without_recursing() {
        let mut memo = Memo::new();
        assert_eq!(memo.fib(1_000_000), None);
        assert_eq!(memo.fib(u64::MAX), None);
        assert_eq!(memo.cached(), 2);
    }
}
