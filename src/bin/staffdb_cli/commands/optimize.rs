use anyhow::Result;
use staffdb::{Comparison, OPTIMIZATION_INDEX};
use crate::context::Context;

/// Measure the naive query, optimize, measure the optimized query and report
/// the improvement
pub fn execute(context: &Context) -> Result<()> {
    let formatter = context.formatter();
    let cache_size = context.config().store.cache_size_pages;

    let comparison = context.with_store(|store| {
        let before = store.query_filtered_naive()?;
        println!("{}", formatter.format_timing("Before optimization", &before)?);

        println!("{}", formatter.format_info("Optimizing database..."));
        store.apply_optimizations()?;

        let after = store.query_filtered_optimized()?;
        println!("{}", formatter.format_timing("After optimization", &after)?);

        Ok(Comparison { before, after })
    })?;

    println!("{}", formatter.format_comparison(&comparison)?);

    if !comparison.result_sets_match() {
        log::warn!("Naive and optimized queries returned different rows; check name casing");
    } else if context.verbosity() > 0 {
        println!("{}", formatter.format_info("Both queries returned the same rows"));
    }

    println!("{}", formatter.format_info("Optimizations applied:"));
    println!("1. Index {} on (gender, full_name)", OPTIMIZATION_INDEX);
    println!("2. SQLite page cache raised to {} pages", cache_size);
    println!("3. GLOB instead of LIKE for the case-sensitive prefix test");
    println!("4. Birth dates split by hand instead of parsed with a format string");

    Ok(())
}
