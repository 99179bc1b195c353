//! Query plans for the benchmarked filter
//!
//! The filter selects male employees whose full name (surname first) starts
//! with "F". A plan picks the SQL pattern operator and the way stored birth
//! dates are parsed, so each factor can be timed on its own.

use std::fmt;

use serde::Serialize;

use crate::core::dates::DateStrategy;
use crate::core::record::Gender;

/// Gender matched by the benchmark filter
pub const FILTER_GENDER: Gender = Gender::Male;

/// Leading letter of the surname matched by the benchmark filter
pub const FILTER_PREFIX: char = 'F';

/// SQL operator used for the name prefix test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MatchStrategy {
    /// `LIKE 'F%'`: case-insensitive for ASCII under SQLite defaults
    Like,
    /// `GLOB 'F*'`: case-sensitive, can use the binary-collated index
    Glob,
}

impl MatchStrategy {
    pub const ALL: [MatchStrategy; 2] = [MatchStrategy::Like, MatchStrategy::Glob];

    /// The `full_name` predicate for this strategy
    pub fn predicate(self) -> String {
        match self {
            MatchStrategy::Like => format!("full_name LIKE '{}%'", FILTER_PREFIX),
            MatchStrategy::Glob => format!("full_name GLOB '{}*'", FILTER_PREFIX),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MatchStrategy::Like => "like",
            MatchStrategy::Glob => "glob",
        }
    }
}

/// A combination of match strategy and date strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct QueryPlan {
    pub matching: MatchStrategy,
    pub dates: DateStrategy,
}

impl QueryPlan {
    pub fn new(matching: MatchStrategy, dates: DateStrategy) -> Self {
        QueryPlan { matching, dates }
    }

    /// `LIKE` with the general date parser
    pub fn naive() -> Self {
        QueryPlan::new(MatchStrategy::Like, DateStrategy::Parser)
    }

    /// `GLOB` with the fixed-format date splitter
    pub fn optimized() -> Self {
        QueryPlan::new(MatchStrategy::Glob, DateStrategy::FastSplit)
    }

    /// Every plan, naive first and optimized last
    pub fn all() -> [QueryPlan; 4] {
        [
            QueryPlan::new(MatchStrategy::Like, DateStrategy::Parser),
            QueryPlan::new(MatchStrategy::Like, DateStrategy::FastSplit),
            QueryPlan::new(MatchStrategy::Glob, DateStrategy::Parser),
            QueryPlan::new(MatchStrategy::Glob, DateStrategy::FastSplit),
        ]
    }

    /// SELECT statement for this plan
    pub fn sql(&self) -> String {
        format!(
            "SELECT full_name, birth_date, gender FROM employees WHERE gender = '{}' AND {}",
            FILTER_GENDER.as_str(),
            self.matching.predicate()
        )
    }
}

impl fmt::Display for QueryPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.matching.name(), self.dates.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_sql() {
        assert_eq!(
            QueryPlan::naive().sql(),
            "SELECT full_name, birth_date, gender FROM employees WHERE gender = 'Male' AND full_name LIKE 'F%'"
        );
    }

    #[test]
    fn test_optimized_sql() {
        assert_eq!(
            QueryPlan::optimized().sql(),
            "SELECT full_name, birth_date, gender FROM employees WHERE gender = 'Male' AND full_name GLOB 'F*'"
        );
    }

    #[test]
    fn test_all_plans_are_distinct() {
        let plans = QueryPlan::all();
        assert_eq!(plans[0], QueryPlan::naive());
        assert_eq!(plans[3], QueryPlan::optimized());
        for (i, a) in plans.iter().enumerate() {
            for b in &plans[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_plan_display() {
        assert_eq!(QueryPlan::optimized().to_string(), "glob+fast-split");
    }
}
