//! Benchmarking system for staffdb
//!
//! This module times the filtered employee query under different query
//! plans and computes the relative improvement between two timings.

use std::collections::HashSet;
use std::fmt;
use std::time::{Duration, Instant};

use crate::core::errors::Result;
use crate::core::record::AgedEmployee;
use crate::storage::{EmployeeStore, QueryPlan};

/// A value together with the wall-clock time it took to produce
#[derive(Debug, Clone)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    /// Elapsed time in fractional seconds
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Rows returned by a filtered query and the time spent fetching them
pub type QueryOutcome = Timed<Vec<AgedEmployee>>;

/// Run `query` once and measure it with the monotonic clock
pub fn time_query<T, F>(query: F) -> Result<Timed<T>>
where
    F: FnOnce() -> Result<T>,
{
    let start = Instant::now();
    let value = query()?;
    let elapsed = start.elapsed();

    Ok(Timed { value, elapsed })
}

/// Percentage by which `after` improves on `before`.
///
/// Returns `0.0` when the baseline is zero, negative or not finite, since no
/// meaningful ratio exists in that case.
pub fn compare_improvement(before_secs: f64, after_secs: f64) -> f64 {
    if !before_secs.is_finite() || !after_secs.is_finite() || before_secs <= 0.0 {
        return 0.0;
    }
    (before_secs - after_secs) / before_secs * 100.0
}

/// Before/after outcomes of the same logical query
#[derive(Debug, Clone)]
pub struct Comparison {
    pub before: QueryOutcome,
    pub after: QueryOutcome,
}

impl Comparison {
    pub fn improvement_percent(&self) -> f64 {
        compare_improvement(self.before.elapsed_secs(), self.after.elapsed_secs())
    }

    /// True when both runs returned the same set of (name, date, gender) rows
    pub fn result_sets_match(&self) -> bool {
        let before: HashSet<_> = self.before.value.iter().map(AgedEmployee::key).collect();
        let after: HashSet<_> = self.after.value.iter().map(AgedEmployee::key).collect();
        before == after
    }
}

/// A benchmark result for a single query plan
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    /// Name of the run
    pub name: String,
    /// Plan that was executed
    pub plan: QueryPlan,
    /// Number of rows returned
    pub rows: usize,
    /// Time taken by the query and row materialization
    pub duration: Duration,
}

impl fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} rows in {:.6} s ({})",
            self.name,
            self.rows,
            self.duration.as_secs_f64(),
            self.plan
        )
    }
}

/// A benchmark suite running query plans against one store
pub struct Benchmark<'a> {
    store: &'a EmployeeStore,
    results: Vec<BenchmarkResult>,
}

impl<'a> Benchmark<'a> {
    pub fn new(store: &'a EmployeeStore) -> Self {
        Benchmark {
            store,
            results: Vec::new(),
        }
    }

    /// Execute one plan and record the result under `name`
    pub fn run_plan(&mut self, name: &str, plan: QueryPlan) -> Result<QueryOutcome> {
        let outcome = self.store.query_filtered(plan)?;

        log::debug!("{} returned {} rows in {:?}", name, outcome.value.len(), outcome.elapsed);
        self.results.push(BenchmarkResult {
            name: name.to_string(),
            plan,
            rows: outcome.value.len(),
            duration: outcome.elapsed,
        });

        Ok(outcome)
    }

    /// Time every combination of match strategy and date strategy
    pub fn run_plan_matrix(&mut self) -> Result<&[BenchmarkResult]> {
        let start = self.results.len();
        for plan in QueryPlan::all() {
            let name = plan.to_string();
            self.run_plan(&name, plan)?;
        }
        Ok(&self.results[start..])
    }

    /// Run `before` and `after` back to back and compare them
    pub fn compare(&mut self, before: QueryPlan, after: QueryPlan) -> Result<Comparison> {
        let before = self.run_plan("before", before)?;
        let after = self.run_plan("after", after)?;
        Ok(Comparison { before, after })
    }

    /// Get a specific benchmark result
    pub fn get_result(&self, name: &str) -> Option<&BenchmarkResult> {
        self.results.iter().rev().find(|r| r.name == name)
    }

    /// Get all benchmark results in execution order
    pub fn results(&self) -> &[BenchmarkResult] {
        &self.results
    }
}
