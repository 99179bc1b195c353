use anyhow::Result;
use crate::context::Context;

/// Validate and insert one employee, then report its age
pub fn execute(context: &Context, full_name: &str, birth_date: &str, gender: &str) -> Result<()> {
    let employee = context.with_store(|store| Ok(store.add_employee(full_name, birth_date, gender)?))?;

    println!(
        "{}",
        context.formatter().format_success(&format!(
            "Employee added: {}, age: {}",
            employee.full_name(),
            employee.age()
        ))
    );

    Ok(())
}
