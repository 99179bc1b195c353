use anyhow::Result;
use staffdb::{Generator, Phase};
use crate::context::Context;

/// Generate the configured number of random and biased employees
pub fn execute(context: &Context) -> Result<()> {
    let config = context.config();
    let formatter = context.formatter();

    println!(
        "{}",
        formatter.format_info(&format!(
            "Generating {} random employees and {} male employees with a surname starting with 'F'...",
            config.random_count, config.biased_count
        ))
    );

    let mut generator = Generator::new();
    let inserted = context.with_store(|store| {
        Ok(generator.generate_dataset(
            store,
            config.random_count,
            config.biased_count,
            config.batch_size,
            |progress| {
                let label = match progress.phase {
                    Phase::Random => "random",
                    Phase::Biased => "biased",
                };
                println!(
                    "Generated and saved {} of {} {} employees",
                    progress.phase_done, progress.phase_total, label
                );
            },
        )?)
    })?;

    println!(
        "{}",
        formatter.format_success(&format!("Data generation complete: {} employees inserted", inserted))
    );

    Ok(())
}
