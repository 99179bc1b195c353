use anyhow::Result;
use serde_json::json;
use staffdb::{AgedEmployee, BenchmarkResult, Comparison, QueryOutcome};
use crate::formatters::Formatter;

/// JSON formatter, one pretty-printed document per result
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        JsonFormatter
    }

    fn render(&self, value: &serde_json::Value) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }
}

impl Formatter for JsonFormatter {
    fn format_employees(&self, employees: &[AgedEmployee], total: usize) -> Result<String> {
        self.render(&json!({
            "total": total,
            "employees": employees,
        }))
    }

    fn format_timing(&self, label: &str, outcome: &QueryOutcome) -> Result<String> {
        self.render(&json!({
            "run": label,
            "seconds": outcome.elapsed_secs(),
            "rows": outcome.value.len(),
        }))
    }

    fn format_comparison(&self, comparison: &Comparison) -> Result<String> {
        self.render(&json!({
            "before_seconds": comparison.before.elapsed_secs(),
            "after_seconds": comparison.after.elapsed_secs(),
            "before_rows": comparison.before.value.len(),
            "after_rows": comparison.after.value.len(),
            "improvement_percent": comparison.improvement_percent(),
            "result_sets_match": comparison.result_sets_match(),
        }))
    }

    fn format_benchmarks(&self, results: &[BenchmarkResult]) -> Result<String> {
        let results: Vec<serde_json::Value> = results
            .iter()
            .map(|r| {
                json!({
                    "name": r.name,
                    "plan": r.plan,
                    "rows": r.rows,
                    "seconds": r.duration.as_secs_f64(),
                })
            })
            .collect();
        self.render(&json!(results))
    }

    fn format_error(&self, error: &str) -> String {
        json!({ "error": error }).to_string()
    }

    fn format_info(&self, info: &str) -> String {
        json!({ "info": info }).to_string()
    }

    fn format_success(&self, success: &str) -> String {
        json!({ "success": success }).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use staffdb::Employee;

    #[test]
    fn test_employees_serialize_flat() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let rows = vec![Employee::parse("Smith John Robert", "1990-05-15", "Male")
            .unwrap()
            .with_age_on(today)];

        let out = JsonFormatter::new().format_employees(&rows, 1).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(parsed["total"], 1);
        let employee = &parsed["employees"][0];
        assert_eq!(employee["full_name"], "Smith John Robert");
        assert_eq!(employee["birth_date"], "1990-05-15");
        assert_eq!(employee["gender"], "Male");
        assert_eq!(employee["age"], 36);
    }
}
