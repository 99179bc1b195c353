use anyhow::Result;
use colored::*;
use prettytable::{Cell, Row, Table};
use staffdb::{AgedEmployee, BenchmarkResult, Comparison, QueryOutcome};
use crate::formatters::Formatter;

/// Bordered table formatter
pub struct TableFormatter {
    /// Whether colors are enabled
    colored: bool,
}

impl TableFormatter {
    pub fn new() -> Self {
        TableFormatter {
            colored: true,
        }
    }

    /// Disable colors
    pub fn without_colors() -> Self {
        TableFormatter {
            colored: false,
        }
    }
}

impl Formatter for TableFormatter {
    fn format_employees(&self, employees: &[AgedEmployee], total: usize) -> Result<String> {
        let mut table = Table::new();

        table.add_row(Row::new(vec![
            Cell::new("Full name"),
            Cell::new("Birth date"),
            Cell::new("Gender"),
            Cell::new("Age"),
        ]));

        for employee in employees {
            table.add_row(Row::new(vec![
                Cell::new(employee.full_name()),
                Cell::new(&employee.employee.birth_date_iso()),
                Cell::new(employee.employee.gender().as_str()),
                Cell::new(&employee.age.to_string()),
            ]));
        }

        let footer = if employees.len() < total {
            format!("Showing {} of {} results", employees.len(), total)
        } else {
            format!("Total employees: {}", total)
        };

        Ok(format!("{}{}", table, footer))
    }

    fn format_timing(&self, label: &str, outcome: &QueryOutcome) -> Result<String> {
        let mut table = Table::new();

        table.add_row(Row::new(vec![
            Cell::new("Run"),
            Cell::new("Seconds"),
            Cell::new("Rows"),
        ]));
        table.add_row(Row::new(vec![
            Cell::new(label),
            Cell::new(&format!("{:.6}", outcome.elapsed_secs())),
            Cell::new(&outcome.value.len().to_string()),
        ]));

        Ok(table.to_string())
    }

    fn format_comparison(&self, comparison: &Comparison) -> Result<String> {
        let mut table = Table::new();

        table.add_row(Row::new(vec![
            Cell::new("Before (s)"),
            Cell::new("After (s)"),
            Cell::new("Improvement"),
        ]));
        table.add_row(Row::new(vec![
            Cell::new(&format!("{:.6}", comparison.before.elapsed_secs())),
            Cell::new(&format!("{:.6}", comparison.after.elapsed_secs())),
            Cell::new(&format!("{:.2}%", comparison.improvement_percent())),
        ]));

        Ok(table.to_string())
    }

    fn format_benchmarks(&self, results: &[BenchmarkResult]) -> Result<String> {
        let mut table = Table::new();

        table.add_row(Row::new(vec![
            Cell::new("Plan"),
            Cell::new("Rows"),
            Cell::new("Seconds"),
        ]));

        for result in results {
            table.add_row(Row::new(vec![
                Cell::new(&result.plan.to_string()),
                Cell::new(&result.rows.to_string()),
                Cell::new(&format!("{:.6}", result.duration.as_secs_f64())),
            ]));
        }

        Ok(table.to_string())
    }

    fn format_error(&self, error: &str) -> String {
        if self.colored {
            format!("{}", error.red().bold())
        } else {
            format!("Error: {}", error)
        }
    }

    fn format_info(&self, info: &str) -> String {
        if self.colored {
            format!("{}", info.blue())
        } else {
            format!("Info: {}", info)
        }
    }

    fn format_success(&self, success: &str) -> String {
        if self.colored {
            format!("{}", success.green().bold())
        } else {
            format!("Success: {}", success)
        }
    }
}
