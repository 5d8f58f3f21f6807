use time::OffsetDateTime;

use super::{EntryKind, NewJob, TimeClockError};

pub const DEFAULT_JOB_COLOR: &str = "#3B82F6";

const MAX_NAME_LEN: usize = 80;
const MAX_COMMENT_LEN: usize = 240;
const MAX_MANUAL_HOURS: f64 = 24.0;

pub fn validate_new_job(name: &str, color: Option<&str>) -> Result<NewJob, TimeClockError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TimeClockError::invalid_input("Job name is required"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(TimeClockError::invalid_input("Job name is too long"));
    }

    let color = match color.map(str::trim) {
        Some(color) if !color.is_empty() => {
            if !is_hex_color(color) {
                return Err(TimeClockError::invalid_input("Invalid hex color"));
            }
            color.to_owned()
        }
        _ => DEFAULT_JOB_COLOR.to_owned(),
    };

    Ok(NewJob {
        name: name.to_owned(),
        color,
    })
}

fn is_hex_color(s: &str) -> bool {
    let Some(digits) = s.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Checks a create-entry payload and produces the kind to persist.
///
/// A payload supplies either manual hours or a full clock range, never
/// both, never neither. Manual hours convert to minutes by rounding; range
/// instants are stored verbatim. The produced kind is always terminal.
pub fn validate_new_entry(
    manual_hours: Option<f64>,
    clock_in: Option<OffsetDateTime>,
    clock_out: Option<OffsetDateTime>,
) -> Result<EntryKind, TimeClockError> {
    match (manual_hours, clock_in, clock_out) {
        (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(TimeClockError::invalid_input(
            "Provide either manualHours or a clock range, not both.",
        )),
        (Some(hours), None, None) => {
            if !hours.is_finite() || hours <= 0.0 || hours > MAX_MANUAL_HOURS {
                return Err(TimeClockError::invalid_input(
                    "manualHours must be greater than 0 and at most 24.",
                ));
            }
            let minutes = (hours * 60.0).round() as i32;
            if minutes == 0 {
                return Err(TimeClockError::invalid_input(
                    "manualHours is too small to record.",
                ));
            }
            Ok(EntryKind::Manual { minutes })
        }
        (None, Some(clock_in), Some(clock_out)) => {
            if clock_out <= clock_in {
                return Err(TimeClockError::invalid_input(
                    "clockOut must be after clockIn.",
                ));
            }
            Ok(EntryKind::Clocked {
                clock_in,
                clock_out: Some(clock_out),
            })
        }
        _ => Err(TimeClockError::invalid_input(
            "Provide either manualHours or both clockIn and clockOut.",
        )),
    }
}

pub fn validate_comment(comment: Option<&str>) -> Result<String, TimeClockError> {
    let comment = comment.unwrap_or_default().trim();
    if comment.chars().count() > MAX_COMMENT_LEN {
        return Err(TimeClockError::invalid_input("Comment is too long"));
    }
    Ok(comment.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn job_name_is_trimmed_and_required() {
        let job = validate_new_job("  Website  ", None).unwrap();
        assert_eq!(job.name, "Website");
        assert_eq!(job.color, DEFAULT_JOB_COLOR);

        assert!(validate_new_job("", None).is_err());
        assert!(validate_new_job("   ", None).is_err());
        assert!(validate_new_job(&"x".repeat(81), None).is_err());
        assert!(validate_new_job(&"x".repeat(80), None).is_ok());
    }

    #[test]
    fn job_color_accepts_three_and_six_hex_digits() {
        assert_eq!(
            validate_new_job("a", Some("#3B82F6")).unwrap().color,
            "#3B82F6"
        );
        assert_eq!(validate_new_job("a", Some("#fff")).unwrap().color, "#fff");
        // empty color falls back to the preset
        assert_eq!(
            validate_new_job("a", Some("")).unwrap().color,
            DEFAULT_JOB_COLOR
        );

        for bad in ["3B82F6", "#3B82F", "#GGG", "#12345678", "blue"] {
            assert!(validate_new_job("a", Some(bad)).is_err(), "{bad}");
        }
    }

    #[test]
    fn entry_payload_requires_exactly_one_form() {
        let t1 = datetime!(2025-08-01 09:00 UTC);
        let t2 = datetime!(2025-08-01 10:00 UTC);

        assert!(matches!(
            validate_new_entry(None, None, None),
            Err(TimeClockError::InvalidInput(_))
        ));
        assert!(matches!(
            validate_new_entry(Some(1.0), Some(t1), Some(t2)),
            Err(TimeClockError::InvalidInput(_))
        ));
        assert!(matches!(
            validate_new_entry(Some(1.0), Some(t1), None),
            Err(TimeClockError::InvalidInput(_))
        ));
        // half a range is not a range
        assert!(matches!(
            validate_new_entry(None, Some(t1), None),
            Err(TimeClockError::InvalidInput(_))
        ));
    }

    #[test]
    fn manual_hours_convert_to_rounded_minutes() {
        assert_eq!(
            validate_new_entry(Some(2.5), None, None).unwrap(),
            EntryKind::Manual { minutes: 150 }
        );
        assert_eq!(
            validate_new_entry(Some(1.333), None, None).unwrap(),
            EntryKind::Manual { minutes: 80 }
        );
        assert_eq!(
            validate_new_entry(Some(24.0), None, None).unwrap(),
            EntryKind::Manual { minutes: 1440 }
        );
    }

    #[test]
    fn manual_hours_out_of_range_are_rejected() {
        for bad in [0.0, -1.0, 24.01, f64::NAN, f64::INFINITY] {
            assert!(validate_new_entry(Some(bad), None, None).is_err(), "{bad}");
        }
        // rounds to zero minutes
        assert!(validate_new_entry(Some(0.001), None, None).is_err());
    }

    #[test]
    fn range_must_be_strictly_increasing() {
        let t1 = datetime!(2025-08-01 09:00 UTC);
        let t2 = datetime!(2025-08-01 10:30 UTC);

        assert_eq!(
            validate_new_entry(None, Some(t1), Some(t2)).unwrap(),
            EntryKind::Clocked {
                clock_in: t1,
                clock_out: Some(t2),
            }
        );
        assert!(validate_new_entry(None, Some(t1), Some(t1)).is_err());
        assert!(validate_new_entry(None, Some(t2), Some(t1)).is_err());
    }

    #[test]
    fn comment_is_trimmed_and_capped() {
        assert_eq!(validate_comment(None).unwrap(), "");
        assert_eq!(validate_comment(Some("  hello  ")).unwrap(), "hello");
        assert!(validate_comment(Some(&"x".repeat(241))).is_err());
        assert!(validate_comment(Some(&"x".repeat(240))).is_ok());
    }
}
