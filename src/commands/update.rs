use crate::error::Result;
use crate::output::{self, Format};
use crate::store::repo::Repository;

pub fn run(repo: &Repository, id: u64, description: &str, format: Format) -> Result<()> {
    let task = repo.update(id, description)?;
    output::print_success(&format!("Task {} updated successfully", task.id), format);
    output::print_task(&task, format)?;
    Ok(())
}
