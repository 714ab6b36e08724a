use crate::error::Result;
use crate::output::{self, Format};
use crate::store::repo::Repository;

pub fn run(repo: &Repository, id: u64, format: Format) -> Result<()> {
    let task = repo.get(id)?;
    output::print_task(&task, format)?;
    Ok(())
}
