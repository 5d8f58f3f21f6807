use time::OffsetDateTime;

use super::{EntryKind, TimeEntry};

pub const MINUTES_PER_HOUR: i64 = 60;

/// Duration of a single entry in whole minutes.
///
/// Manual entries report their stored minutes verbatim. Closed clocked
/// entries round the wall-clock span to whole minutes, clamped at zero in
/// case of clock skew. An open entry contributes nothing until it is
/// closed; live elapsed time is a display concern and never feeds totals.
pub fn duration_minutes(entry: &TimeEntry) -> i64 {
    match entry.kind {
        EntryKind::Manual { minutes } => i64::from(minutes),
        EntryKind::Clocked {
            clock_in,
            clock_out: Some(clock_out),
        } => span_minutes(clock_in, clock_out),
        EntryKind::Clocked {
            clock_out: None, ..
        } => 0,
    }
}

fn span_minutes(clock_in: OffsetDateTime, clock_out: OffsetDateTime) -> i64 {
    let ms = (clock_out - clock_in).whole_milliseconds();
    let rounded = (ms as f64 / 60_000.0).round() as i64;
    rounded.max(0)
}

/// Minutes as hours, rounded to two decimals. Display only; minutes stay
/// authoritative for aggregation.
pub fn minutes_to_hours(minutes: i64) -> f64 {
    (minutes as f64 / MINUTES_PER_HOUR as f64 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntryId, JobId};
    use time::macros::datetime;

    fn entry(kind: EntryKind) -> TimeEntry {
        TimeEntry {
            id: EntryId::new(1),
            job_id: JobId::new(1),
            kind,
            comment: String::new(),
            created_at: datetime!(2025-08-01 09:00 UTC),
        }
    }

    #[test]
    fn manual_minutes_are_returned_verbatim() {
        for minutes in [1, 90, 1440] {
            assert_eq!(
                duration_minutes(&entry(EntryKind::Manual { minutes })),
                i64::from(minutes)
            );
        }
    }

    #[test]
    fn closed_span_rounds_to_whole_minutes() {
        let clock_in = datetime!(2025-08-01 09:00 UTC);
        let cases = [
            (datetime!(2025-08-01 10:30 UTC), 90),
            (datetime!(2025-08-01 09:00:29 UTC), 0),
            (datetime!(2025-08-01 09:00:30 UTC), 1),
            (datetime!(2025-08-01 09:01:31 UTC), 2),
        ];
        for (clock_out, expected) in cases {
            let e = entry(EntryKind::Clocked {
                clock_in,
                clock_out: Some(clock_out),
            });
            assert_eq!(duration_minutes(&e), expected);
        }
    }

    #[test]
    fn zero_length_span_is_zero() {
        let at = datetime!(2025-08-01 09:00 UTC);
        let e = entry(EntryKind::Clocked {
            clock_in: at,
            clock_out: Some(at),
        });
        assert_eq!(duration_minutes(&e), 0);
    }

    #[test]
    fn skewed_span_clamps_to_zero() {
        let e = entry(EntryKind::Clocked {
            clock_in: datetime!(2025-08-01 10:00 UTC),
            clock_out: Some(datetime!(2025-08-01 09:00 UTC)),
        });
        assert_eq!(duration_minutes(&e), 0);
    }

    #[test]
    fn open_entry_contributes_nothing() {
        let e = entry(EntryKind::Clocked {
            clock_in: datetime!(2020-01-01 00:00 UTC),
            clock_out: None,
        });
        assert_eq!(duration_minutes(&e), 0);
    }

    #[test]
    fn hours_round_to_two_decimals() {
        assert_eq!(minutes_to_hours(150), 2.5);
        assert_eq!(minutes_to_hours(90), 1.5);
        assert_eq!(minutes_to_hours(100), 1.67);
        assert_eq!(minutes_to_hours(0), 0.0);
    }
}
