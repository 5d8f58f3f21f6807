use super::{duration_minutes, minutes_to_hours, EntryView, Job, JobView, TimeEntry};

/// Derived per-job totals plus the currently open entry, if any.
///
/// Pure read-time computation over a job's entries, safe to run repeatedly
/// and concurrently; nothing here is stored. Entry order does not matter.
#[derive(Debug, Clone, PartialEq)]
pub struct JobTotals {
    pub total_minutes: i64,
    pub total_hours: f64,
    pub active_entry: Option<TimeEntry>,
}

impl JobTotals {
    pub fn from_entries(entries: &[TimeEntry]) -> Self {
        let total_minutes: i64 = entries.iter().map(duration_minutes).sum();

        let active: Vec<&TimeEntry> = entries.iter().filter(|e| e.is_active()).collect();
        if active.len() > 1 {
            // More than one open session means the store-level invariant
            // was bypassed. Fall back to the most recently created entry,
            // but make the condition visible.
            tracing::error!(
                job_id = %active[0].job_id,
                count = active.len(),
                "multiple active entries found for job, using the most recently created"
            );
        }
        let active_entry = active
            .into_iter()
            .max_by_key(|e| (e.created_at, e.id))
            .cloned();

        Self {
            total_minutes,
            total_hours: minutes_to_hours(total_minutes),
            active_entry,
        }
    }
}

/// Combines a job's persisted fields with its derived totals.
pub fn job_view(job: &Job, entries: &[TimeEntry]) -> JobView {
    let totals = JobTotals::from_entries(entries);

    JobView {
        id: job.id,
        name: job.name.clone(),
        color: job.color.clone(),
        created_at: job.created_at,
        total_hours: totals.total_hours,
        total_minutes: totals.total_minutes,
        active_entry: totals.active_entry.as_ref().map(EntryView::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntryId, EntryKind, JobId};
    use time::macros::datetime;
    use time::OffsetDateTime;

    fn manual(id: i32, minutes: i32) -> TimeEntry {
        TimeEntry {
            id: EntryId::new(id),
            job_id: JobId::new(1),
            kind: EntryKind::Manual { minutes },
            comment: String::new(),
            created_at: datetime!(2025-08-01 09:00 UTC) + time::Duration::minutes(i64::from(id)),
        }
    }

    fn open_clocked(id: i32, created_at: OffsetDateTime) -> TimeEntry {
        TimeEntry {
            id: EntryId::new(id),
            job_id: JobId::new(1),
            kind: EntryKind::Clocked {
                clock_in: created_at,
                clock_out: None,
            },
            comment: String::new(),
            created_at,
        }
    }

    #[test]
    fn empty_job_has_zero_totals_and_no_active_entry() {
        let totals = JobTotals::from_entries(&[]);
        assert_eq!(totals.total_minutes, 0);
        assert_eq!(totals.total_hours, 0.0);
        assert!(totals.active_entry.is_none());
    }

    #[test]
    fn totals_are_independent_of_entry_order() {
        let closed = TimeEntry {
            id: EntryId::new(3),
            job_id: JobId::new(1),
            kind: EntryKind::Clocked {
                clock_in: datetime!(2025-08-01 09:00 UTC),
                clock_out: Some(datetime!(2025-08-01 10:30 UTC)),
            },
            comment: String::new(),
            created_at: datetime!(2025-08-01 09:00 UTC),
        };
        let forward = vec![manual(1, 30), manual(2, 45), closed.clone()];
        let backward: Vec<_> = forward.iter().rev().cloned().collect();

        let a = JobTotals::from_entries(&forward);
        let b = JobTotals::from_entries(&backward);
        assert_eq!(a.total_minutes, 165);
        assert_eq!(a.total_minutes, b.total_minutes);
        assert_eq!(a.total_hours, 2.75);
    }

    #[test]
    fn open_entries_contribute_zero_to_totals() {
        let entries = vec![
            manual(1, 60),
            open_clocked(2, datetime!(2025-08-01 12:00 UTC)),
        ];
        let totals = JobTotals::from_entries(&entries);
        assert_eq!(totals.total_minutes, 60);
        assert_eq!(
            totals.active_entry.as_ref().map(|e| e.id),
            Some(EntryId::new(2))
        );
    }

    #[test]
    fn most_recently_created_active_entry_wins_on_violation() {
        let entries = vec![
            open_clocked(1, datetime!(2025-08-01 08:00 UTC)),
            open_clocked(2, datetime!(2025-08-01 11:00 UTC)),
            open_clocked(3, datetime!(2025-08-01 10:00 UTC)),
        ];
        let totals = JobTotals::from_entries(&entries);
        assert_eq!(
            totals.active_entry.as_ref().map(|e| e.id),
            Some(EntryId::new(2))
        );
    }
}
