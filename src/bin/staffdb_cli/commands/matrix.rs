use anyhow::Result;
use staffdb::Benchmark;
use crate::app::IndexMode;
use crate::context::Context;

/// Time every combination of match and date strategy
pub fn execute(context: &Context, index: IndexMode) -> Result<()> {
    let results = context.with_store(|store| {
        match index {
            IndexMode::Current => {}
            IndexMode::With => store.apply_optimizations()?,
            IndexMode::Without => store.drop_optimizations()?,
        }
        log::info!("Running plan matrix, index present: {}", store.has_index()?);

        let mut bench = Benchmark::new(store);
        bench.run_plan_matrix()?;
        Ok(bench.results().to_vec())
    })?;

    println!("{}", context.formatter().format_benchmarks(&results)?);

    Ok(())
}
