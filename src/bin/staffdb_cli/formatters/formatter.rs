use anyhow::Result;
use staffdb::{AgedEmployee, BenchmarkResult, Comparison, QueryOutcome};

/// Trait defining an output formatter
pub trait Formatter {
    /// Format a list of employees; `total` is the full result size when
    /// `employees` is only a preview
    fn format_employees(&self, employees: &[AgedEmployee], total: usize) -> Result<String>;

    /// Format the timing of one filtered query
    fn format_timing(&self, label: &str, outcome: &QueryOutcome) -> Result<String>;

    /// Format a before/after comparison
    fn format_comparison(&self, comparison: &Comparison) -> Result<String>;

    /// Format a set of benchmark results
    fn format_benchmarks(&self, results: &[BenchmarkResult]) -> Result<String>;

    /// Format an error message
    fn format_error(&self, error: &str) -> String;

    /// Format an informational message
    fn format_info(&self, info: &str) -> String;

    /// Format a success message
    fn format_success(&self, success: &str) -> String;
}
