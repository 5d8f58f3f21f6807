use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

use super::{duration_minutes, minutes_to_hours, JobId};

/// A validated time entry identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(i32);

impl EntryId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for EntryId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

/// How the time of an entry was recorded.
///
/// Exactly one of the two shapes holds for any entry; the enum makes
/// "never both, never neither" unrepresentable. A clocked entry is open
/// until `clock_out` is set, which happens at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Manual {
        minutes: i32,
    },
    Clocked {
        clock_in: OffsetDateTime,
        clock_out: Option<OffsetDateTime>,
    },
}

/// One unit of tracked time, either manually entered or derived from a
/// clock-in/clock-out pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEntry {
    pub id: EntryId,
    pub job_id: JobId,
    pub kind: EntryKind,
    pub comment: String,
    pub created_at: OffsetDateTime,
}

impl TimeEntry {
    /// An entry is active while it has been clocked in but not yet out.
    /// Manual entries are never active.
    pub fn is_active(&self) -> bool {
        matches!(
            self.kind,
            EntryKind::Clocked {
                clock_out: None,
                ..
            }
        )
    }

    pub fn entry_type(&self) -> &'static str {
        match self.kind {
            EntryKind::Manual { .. } => "manual",
            EntryKind::Clocked { .. } => "clocked",
        }
    }

    pub fn manual_minutes(&self) -> Option<i32> {
        match self.kind {
            EntryKind::Manual { minutes } => Some(minutes),
            EntryKind::Clocked { .. } => None,
        }
    }

    pub fn clock_in(&self) -> Option<OffsetDateTime> {
        match self.kind {
            EntryKind::Clocked { clock_in, .. } => Some(clock_in),
            EntryKind::Manual { .. } => None,
        }
    }

    pub fn clock_out(&self) -> Option<OffsetDateTime> {
        match self.kind {
            EntryKind::Clocked { clock_out, .. } => clock_out,
            EntryKind::Manual { .. } => None,
        }
    }
}

/// An entry as the API returns it: persisted fields plus the values
/// derived at read time. Derived fields are never stored.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryView {
    pub id: EntryId,
    pub job_id: JobId,
    #[serde(with = "time::serde::rfc3339::option")]
    pub clock_in: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub clock_out: Option<OffsetDateTime>,
    pub manual_hours: Option<f64>,
    pub duration_minutes: i64,
    pub duration_hours: f64,
    pub comment: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(rename = "type")]
    pub entry_type: &'static str,
    pub is_active: bool,
}

impl From<&TimeEntry> for EntryView {
    fn from(entry: &TimeEntry) -> Self {
        let minutes = duration_minutes(entry);

        Self {
            id: entry.id,
            job_id: entry.job_id,
            clock_in: entry.clock_in(),
            clock_out: entry.clock_out(),
            manual_hours: entry.manual_minutes().map(|m| minutes_to_hours(i64::from(m))),
            duration_minutes: minutes,
            duration_hours: minutes_to_hours(minutes),
            comment: entry.comment.clone(),
            created_at: entry.created_at,
            entry_type: entry.entry_type(),
            is_active: entry.is_active(),
        }
    }
}
