use chrono::NaiveDateTime;

/// Host-owned state for one date-time field.
///
/// This is the whole interface the picker widget sees of its host form:
/// the committed value, a stable name for label association, and a display
/// flag for validation state. Validation rules themselves live with the
/// host; the widget only mirrors the flag visually.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormField {
    name: String,
    value: Option<NaiveDateTime>,
    invalid: bool,
    message: Option<String>,
}

impl FormField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_value(name: impl Into<String>, value: Option<NaiveDateTime>) -> Self {
        Self {
            name: name.into(),
            value,
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<NaiveDateTime> {
        self.value
    }

    /// Host-side reset/seed. Widgets observing this field must resync
    /// their draft afterwards.
    pub fn set_value(&mut self, value: Option<NaiveDateTime>) {
        self.value = value;
    }

    /// The widget's commit entry point, called once per popover close.
    pub fn commit(&mut self, value: Option<NaiveDateTime>) {
        self.value = value;
    }

    pub fn invalid(&self) -> bool {
        self.invalid
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.invalid = true;
        self.message = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.invalid = false;
        self.message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn commit_overwrites_the_value() {
        let mut field = FormField::new("start");
        assert_eq!(field.value(), None);

        let dt = NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(9, 15, 30)
            .unwrap();
        field.commit(Some(dt));
        assert_eq!(field.value(), Some(dt));
        field.commit(None);
        assert_eq!(field.value(), None);
    }

    #[test]
    fn error_flag_and_message_travel_together() {
        let mut field = FormField::new("end");
        field.set_error("End time must be after start time");
        assert!(field.invalid());
        assert_eq!(field.message(), Some("End time must be after start time"));

        field.clear_error();
        assert!(!field.invalid());
        assert_eq!(field.message(), None);
    }
}
