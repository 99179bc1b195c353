use anyhow::Result;
use crate::context::Context;

/// Time the naive filtered query and show the first rows
pub fn execute(context: &Context) -> Result<()> {
    let outcome = context.with_store(|store| Ok(store.query_filtered_naive()?))?;

    let formatter = context.formatter();
    println!("{}", formatter.format_timing("Filtered query", &outcome)?);

    let total = outcome.value.len();
    let shown = total.min(context.config().preview_limit);
    println!("{}", formatter.format_employees(&outcome.value[..shown], total)?);

    Ok(())
}
