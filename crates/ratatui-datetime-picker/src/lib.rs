//! A date-and-time picker widget for ratatui form UIs.
//!
//! The picker is a one-line trigger control that opens a popover with a
//! month calendar and an `HH:MM:SS` time field. While the popover is open
//! the picker edits a private draft timestamp; the host form's value
//! changes only when the popover closes, so mid-edit and malformed states
//! never reach form validation.
//!
//! Entry points:
//! - [`picker::DateTimePicker`]: the widget.
//! - [`calendar::CalendarView`] / [`time_field::TimeField`]: the popover's
//!   sub-controls, usable on their own.
//! - [`theme::Theme`]: styles, including the invalid-field danger style.
//!
//! The framework-free reconciliation logic (draft engine, time-text
//! parsing, form binding, input model) lives in
//! `ratatui-datetime-picker-core`.
//!
//! See `examples/form_demo.rs` for a two-form demo: a bare picker, and a
//! start/end pair with host-side "end after start" validation.
pub mod calendar;
pub mod picker;
pub mod theme;
pub mod time_field;
