use chrono::Local;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;

use crate::timetext;

/// The widget's private, possibly-mid-edit timestamp.
///
/// A draft mirrors the host-owned committed value whenever the host changes
/// it, diverges freely while the picker popover is open, and is reconciled
/// back into the host exactly once per popover close via [`Draft::commit`].
///
/// `Invalid` is the poisoned state: malformed time text produced it, and
/// nothing short of a new date selection or a host sync recovers it. It
/// collapses to "unset" at commit; the widget never surfaces it as an error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Draft {
    #[default]
    Unset,
    Set(NaiveDateTime),
    Invalid,
}

impl Draft {
    pub fn from_host(value: Option<NaiveDateTime>) -> Self {
        match value {
            Some(dt) => Self::Set(dt),
            None => Self::Unset,
        }
    }

    /// Unconditionally replaces the draft with the host-owned value.
    ///
    /// Synchronization is one-directional: the host never reads the draft
    /// except through [`Draft::commit`].
    pub fn sync_from_host(&mut self, value: Option<NaiveDateTime>) {
        *self = Self::from_host(value);
    }

    /// Merges a calendar-day selection into the draft.
    ///
    /// Clearing the selection always wins over any existing time of day.
    /// Selecting a day keeps the draft's existing time; a draft with no
    /// usable time (unset or poisoned) gets midnight.
    pub fn apply_date_selection(&mut self, day: Option<NaiveDate>) {
        let Some(day) = day else {
            *self = Self::Unset;
            return;
        };

        let time = match *self {
            Self::Set(dt) => dt.time(),
            Self::Unset | Self::Invalid => NaiveTime::MIN,
        };
        *self = Self::Set(NaiveDateTime::new(day, time));
    }

    /// Merges an edited `"HH:MM"` / `"HH:MM:SS"` string into the draft,
    /// defaulting the day component to the current local date when the
    /// draft has none.
    pub fn apply_time_text(&mut self, text: &str) {
        self.apply_time_text_from(text, Local::now().date_naive());
    }

    /// Same as [`Draft::apply_time_text`] with an explicit "today".
    pub fn apply_time_text_from(&mut self, text: &str, today: NaiveDate) {
        if text.is_empty() {
            return;
        }

        // A poisoned draft has no date to combine with; further time edits
        // keep it poisoned until a day is selected or the host resyncs.
        if *self == Self::Invalid {
            return;
        }

        let time = match timetext::parse_time_text(text) {
            Ok(time) => time,
            Err(_) => {
                *self = Self::Invalid;
                return;
            }
        };

        let day = match *self {
            Self::Set(dt) => dt.date(),
            _ => today,
        };
        *self = Self::Set(NaiveDateTime::new(day, time));
    }

    /// Resolves the draft at popover close: the instant if one is set,
    /// otherwise "unset". This is the only value that ever reaches the host.
    pub fn commit(&self) -> Option<NaiveDateTime> {
        match *self {
            Self::Set(dt) => Some(dt),
            Self::Unset | Self::Invalid => None,
        }
    }

    pub fn day(&self) -> Option<NaiveDate> {
        match *self {
            Self::Set(dt) => Some(dt.date()),
            _ => None,
        }
    }

    pub fn time(&self) -> Option<NaiveTime> {
        match *self {
            Self::Set(dt) => Some(dt.time()),
            _ => None,
        }
    }

    /// Human-readable label for the trigger control.
    pub fn trigger_label(&self) -> String {
        match *self {
            Self::Set(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            Self::Unset | Self::Invalid => "Select date".to_string(),
        }
    }

    /// Zero-padded `HH:MM:SS` for the time-field sub-control, empty when
    /// the draft holds no valid instant.
    pub fn time_field_text(&self) -> String {
        match self.time() {
            Some(time) => timetext::format_time_text(time),
            None => String::new(),
        }
    }
}
