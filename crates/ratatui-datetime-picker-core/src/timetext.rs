use chrono::NaiveTime;
use chrono::Timelike;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TimeTextError {
    #[error("expected HH:MM or HH:MM:SS, got {0} field(s)")]
    FieldCount(usize),
    #[error("non-numeric time field: {0:?}")]
    NotANumber(String),
    #[error("time out of range: {hour:02}:{minute:02}:{second:02}")]
    OutOfRange { hour: u32, minute: u32, second: u32 },
}

/// Parses `"HH:MM"` or `"HH:MM:SS"` into a [`NaiveTime`].
///
/// A missing seconds field defaults to zero: time inputs on some platforms
/// (notably mobile pickers) never emit one.
pub fn parse_time_text(text: &str) -> Result<NaiveTime, TimeTextError> {
    let fields: Vec<&str> = text.split(':').collect();
    if fields.len() < 2 || fields.len() > 3 {
        return Err(TimeTextError::FieldCount(fields.len()));
    }

    let hour = parse_field(fields[0])?;
    let minute = parse_field(fields[1])?;
    let second = match fields.get(2) {
        Some(f) => parse_field(f)?,
        None => 0,
    };

    NaiveTime::from_hms_opt(hour, minute, second).ok_or(TimeTextError::OutOfRange {
        hour,
        minute,
        second,
    })
}

/// Zero-padded `HH:MM:SS`, the canonical text for the time-field control.
pub fn format_time_text(time: NaiveTime) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )
}

fn parse_field(field: &str) -> Result<u32, TimeTextError> {
    field
        .trim()
        .parse::<u32>()
        .map_err(|_| TimeTextError::NotANumber(field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_seconds() {
        assert_eq!(
            parse_time_text("09:15:30"),
            Ok(NaiveTime::from_hms_opt(9, 15, 30).unwrap())
        );
        assert_eq!(
            parse_time_text("14:30"),
            Ok(NaiveTime::from_hms_opt(14, 30, 0).unwrap())
        );
    }

    #[test]
    fn rejects_garbled_fields() {
        assert_eq!(
            parse_time_text("aa:bb"),
            Err(TimeTextError::NotANumber("aa".to_string()))
        );
        assert_eq!(parse_time_text("12"), Err(TimeTextError::FieldCount(1)));
        assert_eq!(
            parse_time_text("1:2:3:4"),
            Err(TimeTextError::FieldCount(4))
        );
    }

    #[test]
    fn rejects_out_of_range_components() {
        assert_eq!(
            parse_time_text("25:00"),
            Err(TimeTextError::OutOfRange {
                hour: 25,
                minute: 0,
                second: 0
            })
        );
        assert_eq!(
            parse_time_text("12:60:00"),
            Err(TimeTextError::OutOfRange {
                hour: 12,
                minute: 60,
                second: 0
            })
        );
    }

    #[test]
    fn formats_zero_padded() {
        assert_eq!(
            format_time_text(NaiveTime::from_hms_opt(7, 5, 0).unwrap()),
            "07:05:00"
        );
    }
}
