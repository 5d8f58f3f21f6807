mod entry_repo;
mod job_repo;
mod repo_error;

pub use entry_repo::*;
pub use job_repo::*;
pub use repo_error::RepositoryError;
