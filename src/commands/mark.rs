use crate::error::Result;
use crate::model::Status;
use crate::output::{self, Format};
use crate::store::repo::Repository;

pub fn run(repo: &Repository, id: u64, status: Status, format: Format) -> Result<()> {
    let task = repo.mark(id, status)?;
    output::print_success(&format!("Task {id} marked as {status}"), format);
    output::print_task(&task, format)?;
    Ok(())
}
