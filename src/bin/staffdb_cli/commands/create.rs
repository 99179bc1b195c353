use anyhow::Result;
use crate::context::Context;

/// Create the employees table
pub fn execute(context: &Context) -> Result<()> {
    context.with_store(|store| Ok(store.create_schema()?))?;

    println!("{}", context.formatter().format_success("Table created successfully"));

    Ok(())
}
