use proptest::prelude::*;
use stepfib::{EngineError, Matrix2x2, StepFib};

// Property 1: any query order agrees with the oracle, and indices past the
// engine's limit are refused without moving it past MAX_FIB_INDEX
proptest! {
    #[test]
    fn prop_matches_oracle(queries in prop::collection::vec(0i64..=190, 1..40)) {
        let mut engine = StepFib::new();
        let mut memo = fib::Memo::new();
        for n in queries {
            if n <= StepFib::MAX_FIB_INDEX {
                prop_assert_eq!(engine.query(n).ok(), memo.fib(n as u64), "F({})", n);
            } else {
                prop_assert_eq!(engine.query(n), Err(EngineError::Overflow { index: 184 }));
                prop_assert_eq!(engine.index(), StepFib::MAX_FIB_INDEX);
            }
        }
    }
}

// Property 2: after every query the state is base^K and symmetric
proptest! {
    #[test]
    fn prop_state_is_power_of_base(queries in prop::collection::vec(0i64..120, 1..20)) {
        let mut engine = StepFib::new();
        for n in queries {
            engine.query(n).unwrap();
            prop_assert!(engine.holds_invariant());
            prop_assert_eq!(Some(*engine.state()), Matrix2x2::FIB_BASE.checked_pow(n as u64));
            prop_assert!(engine.state().is_symmetric());
        }
    }
}

// Property 3: cost of a query is the distance walked
proptest! {
    #[test]
    fn prop_steps_equal_distance(a in 0i64..150, b in 0i64..150) {
        let mut engine = StepFib::new();
        engine.query(a).unwrap();
        engine.query(b).unwrap();
        prop_assert_eq!(engine.last_steps(), a.abs_diff(b));
        prop_assert_eq!(engine.total_steps(), a.abs_diff(1) + a.abs_diff(b));
    }
}

// Property 4: n, then m, then n again gives the same answer
proptest! {
    #[test]
    fn prop_round_trip(n in 0i64..150, m in 0i64..150) {
        let mut engine = StepFib::new();
        let first = engine.query(n).unwrap();
        engine.query(m).unwrap();
        prop_assert_eq!(engine.query(n).unwrap(), first);
    }
}

// Property 5: the inverse undoes the base for any unimodular matrix
proptest! {
    #[test]
    fn prop_unimodular_inverse(k in 0u64..60) {
        let m = Matrix2x2::FIB_BASE.checked_pow(k).unwrap();
        let inv = m.unimodular_inverse().unwrap();
        prop_assert_eq!(m.checked_mul(&inv), Some(Matrix2x2::IDENTITY));
        prop_assert_eq!(inv.checked_mul(&m), Some(Matrix2x2::IDENTITY));
    }
}
