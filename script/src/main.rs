use serde::Serialize;
use std::fmt::Debug;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Instant;
use stepfib::{EngineError, StepFib};
use tracing::{error, info, warn};

#[derive(Serialize)]
struct Stats {
    program: &'static str,
    samples: Vec<i64>,
    sweep: i64,
    checked: usize,
    mismatches: usize,
    out_of_range: usize,
    total_steps: u64,
    query_secs: f32,
}

/// Comma separated list of indices, e.g. `10,4,20`.
#[derive(Debug)]
struct Samples(Vec<i64>);

impl FromStr for Samples {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::parse)
            .collect::<Result<_, _>>()
            .map(Samples)
    }
}

fn env_or<T: FromStr>(var: &str, def: T) -> T
where
    <T as FromStr>::Err: Debug,
{
    std::env::var(var)
        .map(|s| {
            s.parse::<T>()
                .unwrap_or_else(|_| panic!("Could not parse {}", var))
        })
        .unwrap_or(def)
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Match,
    Mismatch,
    /// Past the last index an i128 state can hold; the engine refuses it.
    OutOfRange,
}

struct Checker {
    engine: StepFib,
    oracle: fib::Memo,
    checked: usize,
    mismatches: usize,
    out_of_range: usize,
}

impl Checker {
    fn new() -> Self {
        Self {
            engine: StepFib::new(),
            oracle: fib::Memo::new(),
            checked: 0,
            mismatches: 0,
            out_of_range: 0,
        }
    }

    fn check(&mut self, n: i64) -> Outcome {
        let outcome = match self.engine.query(n) {
            Err(EngineError::Overflow { .. }) if n > StepFib::MAX_FIB_INDEX => {
                warn!(n, max = StepFib::MAX_FIB_INDEX, "index out of range");
                Outcome::OutOfRange
            }
            Ok(got) => {
                let want = u64::try_from(n).ok().and_then(|n| self.oracle.fib(n));
                if want == Some(got) {
                    info!(n, got, steps = self.engine.last_steps(), "match");
                    eprintln!("stepfib({n}) = {got}");
                    Outcome::Match
                } else {
                    error!(n, got, ?want, "engine disagrees with oracle");
                    Outcome::Mismatch
                }
            }
            Err(e) => {
                error!(n, "query failed: {e}");
                Outcome::Mismatch
            }
        };
        match outcome {
            Outcome::Match => self.checked += 1,
            Outcome::Mismatch => {
                self.checked += 1;
                self.mismatches += 1;
            }
            Outcome::OutOfRange => self.out_of_range += 1,
        }
        outcome
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    // setup
    let Samples(samples) = env_or("STEPFIB_ARGS", Samples(vec![10, 10, 4, 20]));
    let sweep = env_or("STEPFIB_SWEEP", 50i64);
    let mut checker = Checker::new();

    // queries
    let it = Instant::now();
    for &n in &samples {
        checker.check(n);
    }
    for n in (0..sweep).chain((0..sweep).rev()) {
        checker.check(n);
    }
    let query_secs = it.elapsed().as_secs_f32();

    let stats = Stats {
        program: "stepfib",
        samples,
        sweep,
        checked: checker.checked,
        mismatches: checker.mismatches,
        out_of_range: checker.out_of_range,
        total_steps: checker.engine.total_steps(),
        query_secs,
    };

    println!("{}", serde_json::to_string(&stats).unwrap());

    if stats.mismatches == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
