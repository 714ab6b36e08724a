use crate::error::Result;
use crate::output::{self, Format};
use crate::store::repo::Repository;

pub fn run(repo: &Repository, id: u64, format: Format) -> Result<()> {
    let task = repo.delete(id)?;
    match format {
        Format::Pretty => output::print_success(&format!("Task {id} deleted successfully"), format),
        Format::Json => output::print_task(&task, format)?,
    }
    Ok(())
}
