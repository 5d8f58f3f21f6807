mod aggregate;
mod duration;
mod error;
mod job;
pub mod services;
mod time_entry;
mod validate;

pub use aggregate::{job_view, JobTotals};
pub use duration::{duration_minutes, minutes_to_hours};
pub use error::TimeClockError;
pub use job::{Job, JobId, JobView, NewJob};
pub use time_entry::{EntryId, EntryKind, EntryView, TimeEntry};
pub use validate::{validate_comment, validate_new_entry, validate_new_job, DEFAULT_JOB_COLOR};
