use anyhow::Result;
use crate::context::Context;

/// Print every distinct employee sorted by name
pub fn execute(context: &Context) -> Result<()> {
    let employees = context.with_store(|store| Ok(store.list_all()?))?;

    let formatted = context.formatter().format_employees(&employees, employees.len())?;
    println!("{}", formatted);

    Ok(())
}
