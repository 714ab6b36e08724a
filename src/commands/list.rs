use crate::error::Result;
use crate::model::Status;
use crate::output::{self, Format};
use crate::store::repo::Repository;

pub fn run(repo: &Repository, status: Option<Status>, format: Format) -> Result<()> {
    let tasks = repo.list(status)?;
    output::print_tasks(&tasks, format)?;
    Ok(())
}
