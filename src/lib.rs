//! staffdb: an SQLite employee registry
//!
//! This crate stores employees (name, birth date, gender), lists them with
//! their derived age, generates large synthetic datasets and benchmarks one
//! filtered query (male employees whose surname starts with "F") before and
//! after optimization.

pub mod bench;
pub mod config;
pub mod core;
pub mod generator;
pub mod storage;

pub use bench::{compare_improvement, time_query, Benchmark, BenchmarkResult, Comparison, QueryOutcome, Timed};
pub use config::{Config, StoreOptions};
pub use crate::core::dates::DateStrategy;
pub use crate::core::errors::{Result, StoreError, ValidationError};
pub use crate::core::record::{AgedEmployee, Employee, Gender};
pub use generator::{GenerationProgress, Generator, Phase};
pub use storage::{EmployeeStore, MatchStrategy, QueryPlan, OPTIMIZATION_INDEX};
