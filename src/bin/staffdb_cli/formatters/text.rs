use anyhow::Result;
use colored::*;
use staffdb::{AgedEmployee, BenchmarkResult, Comparison, QueryOutcome};
use std::fmt::Write;
use crate::formatters::Formatter;

/// Plain text formatter with fixed-width columns
pub struct TextFormatter {
    /// Whether colors are enabled
    colored: bool,
}

impl TextFormatter {
    pub fn new() -> Self {
        TextFormatter {
            colored: true,
        }
    }

    /// Disable colors
    pub fn without_colors() -> Self {
        TextFormatter {
            colored: false,
        }
    }
}

impl Formatter for TextFormatter {
    fn format_employees(&self, employees: &[AgedEmployee], total: usize) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "{:<30} {:<12} {:<8} {:<5}", "Full name", "Birth date", "Gender", "Age")?;
        writeln!(out, "{}", "-".repeat(60))?;

        for employee in employees {
            writeln!(
                out,
                "{:<30} {:<12} {:<8} {:<5}",
                employee.full_name(),
                employee.employee.birth_date_iso(),
                employee.employee.gender().as_str(),
                employee.age
            )?;
        }

        if employees.len() < total {
            writeln!(out, "... (showing the first {} of {} results)", employees.len(), total)?;
        } else {
            write!(out, "\nTotal employees: {}", total)?;
        }

        Ok(out.trim_end().to_string())
    }

    fn format_timing(&self, label: &str, outcome: &QueryOutcome) -> Result<String> {
        Ok(format!(
            "{}\nQuery executed in {:.6} seconds\nFound {} male employees with a surname starting with 'F'",
            label,
            outcome.elapsed_secs(),
            outcome.value.len()
        ))
    }

    fn format_comparison(&self, comparison: &Comparison) -> Result<String> {
        let improvement = format!("{:.2}%", comparison.improvement_percent());
        let improvement = if self.colored {
            improvement.bold().to_string()
        } else {
            improvement
        };

        Ok(format!(
            "Performance improvement: {}\nTime before optimization: {:.6} seconds\nTime after optimization: {:.6} seconds",
            improvement,
            comparison.before.elapsed_secs(),
            comparison.after.elapsed_secs()
        ))
    }

    fn format_benchmarks(&self, results: &[BenchmarkResult]) -> Result<String> {
        let lines: Vec<String> = results.iter().map(|r| r.to_string()).collect();
        Ok(lines.join("\n"))
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use staffdb::Employee;

    fn sample() -> Vec<AgedEmployee> {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        vec![
            Employee::parse("Ferguson Mark Allan", "1985-01-01", "Male").unwrap().with_age_on(today),
            Employee::parse("Smith John Robert", "1990-05-15", "Male").unwrap().with_age_on(today),
        ]
    }

    #[test]
    fn test_employee_rows_are_aligned() {
        let out = TextFormatter::without_colors().format_employees(&sample(), 2).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("Full name"));
        assert_eq!(lines[2], format!("{:<30} {:<12} {:<8} {:<5}", "Ferguson Mark Allan", "1985-01-01", "Male", 41));
        assert!(out.ends_with("Total employees: 2"));
    }

    #[test]
    fn test_preview_mentions_truncation() {
        let rows = sample();
        let out = TextFormatter::without_colors().format_employees(&rows[..1], 2).unwrap();
        assert!(out.ends_with("(showing the first 1 of 2 results)"));
    }

    #[test]
    fn test_plain_messages() {
        let formatter = TextFormatter::without_colors();
        assert_eq!(formatter.format_error("boom"), "Error: boom");
        assert_eq!(formatter.format_success("done"), "Success: done");
    }
}
