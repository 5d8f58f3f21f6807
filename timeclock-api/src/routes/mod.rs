pub(crate) mod entries;
mod error;
pub(crate) mod jobs;

pub(crate) use error::ApiError;
