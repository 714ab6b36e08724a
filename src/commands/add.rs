use crate::error::Result;
use crate::output::{self, Format};
use crate::store::repo::Repository;

pub fn run(repo: &Repository, description: &str, format: Format) -> Result<()> {
    let task = repo.add(description)?;
    output::print_success(&format!("Task added successfully (ID: {})", task.id), format);
    output::print_task(&task, format)?;
    Ok(())
}
