use chrono::NaiveDateTime;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Widget;

use crate::calendar::CalendarAction;
use crate::calendar::CalendarView;
use crate::theme::Theme;
use crate::time_field::TimeField;
use crate::time_field::TimeFieldAction;
use ratatui_datetime_picker_core::draft::Draft;
use ratatui_datetime_picker_core::input::InputEvent;
use ratatui_datetime_picker_core::input::KeyCode;
use ratatui_datetime_picker_core::input::MouseEventKind;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DateTimePickerAction {
    None,
    Redraw,
    /// Emitted exactly once per open→closed transition with the reconciled
    /// draft: a well-formed timestamp, or `None` for an empty or poisoned
    /// draft. The only signal that should ever reach the host form.
    Committed(Option<NaiveDateTime>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PickerFocus {
    Calendar,
    Time,
}

/// A date-and-time picker: a one-line trigger that opens a popover holding
/// a month calendar and an `HH:MM:SS` field.
///
/// The picker owns a draft timestamp for the duration of one popover
/// session. Day and time edits merge into the draft immediately and
/// immutably; the host form's value changes only when the popover closes
/// (`Esc`, `Enter` in the time field, or a click outside). Call
/// [`DateTimePicker::set_value`] whenever the host-owned value changes so
/// the draft mirrors it.
#[derive(Clone, Debug)]
pub struct DateTimePicker {
    name: String,
    invalid: bool,
    open: bool,
    draft: Draft,
    calendar: CalendarView,
    time_field: TimeField,
    focus: PickerFocus,
    trigger_area: Option<Rect>,
    popover_area: Option<Rect>,
}

const POPOVER_INNER_W: u16 = CalendarView::WIDTH;
const POPOVER_INNER_H: u16 = CalendarView::HEIGHT + 2;
const TIME_LABEL: &str = "Time  ";

impl DateTimePicker {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            invalid: false,
            open: false,
            draft: Draft::Unset,
            calendar: CalendarView::new(),
            time_field: TimeField::new(),
            focus: PickerFocus::Calendar,
            trigger_area: None,
            popover_area: None,
        }
    }

    /// Stable field identifier, for label association by the host.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-directional host→widget synchronization: unconditionally
    /// overwrites the draft. Invoke on mount and on every external change
    /// to the host-owned value.
    pub fn set_value(&mut self, value: Option<NaiveDateTime>) {
        self.draft.sync_from_host(value);
        self.sync_controls();
    }

    /// Visual error styling only; the picker never evaluates validation
    /// rules itself.
    pub fn set_invalid(&mut self, invalid: bool) {
        self.invalid = invalid;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn draft(&self) -> Draft {
        self.draft
    }

    pub fn handle_event(&mut self, event: InputEvent) -> DateTimePickerAction {
        if !self.open {
            return self.handle_closed(event);
        }

        match event {
            InputEvent::Key(key) if key.code == KeyCode::Esc => self.close(),
            InputEvent::Key(key) if key.code == KeyCode::Tab => {
                self.focus = match self.focus {
                    PickerFocus::Calendar => PickerFocus::Time,
                    PickerFocus::Time => {
                        // Leaving the field is the blur point: the pending
                        // edit lands in the draft here.
                        self.flush_time_edit();
                        PickerFocus::Calendar
                    }
                };
                DateTimePickerAction::Redraw
            }
            InputEvent::Mouse(m) if m.kind == MouseEventKind::Down => {
                let inside = self
                    .popover_area
                    .is_some_and(|r| r.contains(ratatui::layout::Position::new(m.x, m.y)));
                if inside {
                    DateTimePickerAction::None
                } else {
                    self.close()
                }
            }
            _ => match self.focus {
                PickerFocus::Calendar => match self.calendar.handle_event(event) {
                    CalendarAction::Selected(day) => {
                        self.draft.apply_date_selection(day);
                        self.time_field.set_text(self.draft.time_field_text());
                        DateTimePickerAction::Redraw
                    }
                    CalendarAction::Redraw => DateTimePickerAction::Redraw,
                    CalendarAction::None => DateTimePickerAction::None,
                },
                PickerFocus::Time => {
                    if matches!(event, InputEvent::Key(k) if k.code == KeyCode::Enter) {
                        return self.close();
                    }
                    match self.time_field.handle_event(event) {
                        TimeFieldAction::Edited => DateTimePickerAction::Redraw,
                        TimeFieldAction::None => DateTimePickerAction::None,
                    }
                }
            },
        }
    }

    /// Closes the popover and reconciles the draft into a committed value.
    /// Safe to call redundantly; only an actual open→closed transition
    /// commits.
    pub fn close(&mut self) -> DateTimePickerAction {
        if !self.open {
            return DateTimePickerAction::None;
        }
        self.open = false;
        self.popover_area = None;
        // Blur-equivalent: a time edit still sitting in the field must land
        // in the draft before the draft is read out.
        self.flush_time_edit();
        DateTimePickerAction::Committed(self.draft.commit())
    }

    /// Renders the one-line trigger control. Danger styling reflects the
    /// host's invalid flag; the focus highlight is the caller's.
    pub fn render_trigger(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme, focused: bool) {
        self.trigger_area = Some(area);
        if area.width == 0 || area.height == 0 {
            return;
        }

        let base = if self.invalid {
            theme.danger
        } else {
            theme.text_primary
        };
        let style = if focused { theme.cursor } else { base };

        buf.set_style(Rect::new(area.x, area.y, area.width, 1), style);
        let label = format!("{} ▾", self.draft.trigger_label());
        buf.set_stringn(area.x, area.y, label, area.width as usize, style);
    }

    /// Renders the popover overlay when open. Call after everything else in
    /// the frame so the overlay draws on top.
    pub fn render_popover(&mut self, frame: Rect, buf: &mut Buffer, theme: &Theme) {
        if !self.open {
            return;
        }
        let Some(area) = self.popover_rect(frame) else {
            return;
        };
        self.popover_area = Some(area);

        Clear.render(area, buf);
        let block = Block::default().borders(Borders::ALL).title(self.name.clone());
        let inner = block.inner(area);
        block.render(area, buf);

        let cal_area = Rect::new(
            inner.x,
            inner.y,
            inner.width,
            CalendarView::HEIGHT.min(inner.height),
        );
        self.calendar.render_ref(cal_area, buf, theme);

        let time_y = inner.y + CalendarView::HEIGHT + 1;
        if time_y < inner.y + inner.height {
            buf.set_stringn(
                inner.x,
                time_y,
                TIME_LABEL,
                inner.width as usize,
                theme.text_muted,
            );
            let field_x = inner.x + TIME_LABEL.len() as u16;
            let field_area = Rect::new(
                field_x,
                time_y,
                inner.width.saturating_sub(TIME_LABEL.len() as u16),
                1,
            );
            self.time_field.render_ref(
                field_area,
                buf,
                theme,
                self.focus == PickerFocus::Time,
            );
        }
    }

    fn handle_closed(&mut self, event: InputEvent) -> DateTimePickerAction {
        let opens = match event {
            InputEvent::Key(key) => {
                matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
            }
            InputEvent::Mouse(m) => {
                m.kind == MouseEventKind::Down
                    && self
                        .trigger_area
                        .is_some_and(|r| r.contains(ratatui::layout::Position::new(m.x, m.y)))
            }
        };
        if opens {
            self.open_popover();
            DateTimePickerAction::Redraw
        } else {
            DateTimePickerAction::None
        }
    }

    fn open_popover(&mut self) {
        self.open = true;
        self.focus = PickerFocus::Calendar;
        self.sync_controls();
    }

    fn sync_controls(&mut self) {
        self.calendar.set_selected(self.draft.day());
        self.time_field.set_text(self.draft.time_field_text());
    }

    fn flush_time_edit(&mut self) {
        self.draft.apply_time_text(self.time_field.text());
        self.time_field.set_text(self.draft.time_field_text());
    }

    fn popover_rect(&self, frame: Rect) -> Option<Rect> {
        let trigger = self.trigger_area?;
        let w = POPOVER_INNER_W + 2;
        let h = POPOVER_INNER_H + 2;
        if frame.width < w || frame.height < h {
            return None;
        }

        let x = trigger
            .x
            .min(frame.x + frame.width - w);
        let below = trigger.y + 1;
        let y = if below + h <= frame.y + frame.height {
            below
        } else {
            trigger.y.saturating_sub(h).max(frame.y)
        };
        Some(Rect::new(x, y, w, h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use chrono::NaiveDateTime;
    use ratatui_datetime_picker_core::input::KeyEvent;
    use ratatui_datetime_picker_core::input::MouseEvent;

    fn dt(y: i32, m: u32, day: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, day)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code))
    }

    fn type_str(picker: &mut DateTimePicker, s: &str) {
        for c in s.chars() {
            picker.handle_event(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn enter_opens_and_esc_commits_unchanged_value() {
        let value = Some(dt(2024, 3, 10, 9, 15, 30));
        let mut picker = DateTimePicker::new("date");
        picker.set_value(value);

        assert_eq!(picker.handle_event(key(KeyCode::Enter)), DateTimePickerAction::Redraw);
        assert!(picker.is_open());

        // No edits: the close must round-trip the host value.
        assert_eq!(
            picker.handle_event(key(KeyCode::Esc)),
            DateTimePickerAction::Committed(value)
        );
        assert!(!picker.is_open());
    }

    #[test]
    fn unset_round_trips_too() {
        let mut picker = DateTimePicker::new("date");
        picker.set_value(None);
        picker.handle_event(key(KeyCode::Enter));
        assert_eq!(
            picker.handle_event(key(KeyCode::Esc)),
            DateTimePickerAction::Committed(None)
        );
    }

    #[test]
    fn day_selection_keeps_time_and_commits_on_close() {
        let mut picker = DateTimePicker::new("date");
        picker.set_value(Some(dt(2024, 3, 10, 9, 15, 30)));
        picker.handle_event(key(KeyCode::Enter));

        // Cursor starts on the selected day; move one day right and pick it.
        picker.handle_event(key(KeyCode::Right));
        picker.handle_event(key(KeyCode::Enter));
        assert_eq!(picker.draft(), Draft::Set(dt(2024, 3, 11, 9, 15, 30)));

        assert_eq!(
            picker.handle_event(key(KeyCode::Esc)),
            DateTimePickerAction::Committed(Some(dt(2024, 3, 11, 9, 15, 30)))
        );
    }

    #[test]
    fn clearing_the_selection_commits_unset() {
        let mut picker = DateTimePicker::new("date");
        picker.set_value(Some(dt(2024, 3, 10, 9, 15, 30)));
        picker.handle_event(key(KeyCode::Enter));
        picker.handle_event(key(KeyCode::Backspace));
        assert_eq!(picker.draft(), Draft::Unset);
        assert_eq!(
            picker.handle_event(key(KeyCode::Esc)),
            DateTimePickerAction::Committed(None)
        );
    }

    #[test]
    fn pending_time_edit_lands_before_commit() {
        let mut picker = DateTimePicker::new("date");
        picker.set_value(Some(dt(2024, 3, 10, 9, 15, 30)));
        picker.handle_event(key(KeyCode::Enter));
        picker.handle_event(key(KeyCode::Tab));

        // Rewrite the field without ever tabbing away, then close directly:
        // the edit must still be read at close time.
        for _ in 0..8 {
            picker.handle_event(key(KeyCode::Backspace));
        }
        type_str(&mut picker, "14:30:00");
        assert_eq!(
            picker.handle_event(key(KeyCode::Enter)),
            DateTimePickerAction::Committed(Some(dt(2024, 3, 10, 14, 30, 0)))
        );
    }

    #[test]
    fn garbled_time_text_collapses_to_unset_at_commit() {
        let mut picker = DateTimePicker::new("date");
        picker.set_value(Some(dt(2024, 3, 10, 9, 15, 30)));
        picker.handle_event(key(KeyCode::Enter));
        picker.handle_event(key(KeyCode::Tab));

        for _ in 0..8 {
            picker.handle_event(key(KeyCode::Backspace));
        }
        type_str(&mut picker, "99:99:99");
        assert_eq!(
            picker.handle_event(key(KeyCode::Esc)),
            DateTimePickerAction::Committed(None)
        );
    }

    #[test]
    fn emptied_time_field_is_a_no_op_at_commit() {
        let mut picker = DateTimePicker::new("date");
        picker.set_value(Some(dt(2024, 3, 10, 9, 15, 30)));
        picker.handle_event(key(KeyCode::Enter));
        picker.handle_event(key(KeyCode::Tab));
        for _ in 0..8 {
            picker.handle_event(key(KeyCode::Backspace));
        }
        assert_eq!(
            picker.handle_event(key(KeyCode::Esc)),
            DateTimePickerAction::Committed(Some(dt(2024, 3, 10, 9, 15, 30)))
        );
    }

    #[test]
    fn close_commits_exactly_once() {
        let mut picker = DateTimePicker::new("date");
        picker.set_value(Some(dt(2024, 3, 10, 9, 15, 30)));
        picker.handle_event(key(KeyCode::Enter));
        assert!(matches!(picker.close(), DateTimePickerAction::Committed(_)));
        assert_eq!(picker.close(), DateTimePickerAction::None);
        assert_eq!(picker.handle_event(key(KeyCode::Esc)), DateTimePickerAction::None);
    }

    #[test]
    fn host_sync_overwrites_a_stale_draft() {
        let mut picker = DateTimePicker::new("date");
        picker.set_value(Some(dt(2024, 3, 10, 9, 15, 30)));
        picker.set_value(None);
        assert_eq!(picker.draft(), Draft::Unset);
    }

    #[test]
    fn click_outside_the_popover_closes_and_commits() {
        let value = Some(dt(2024, 3, 10, 9, 15, 30));
        let mut picker = DateTimePicker::new("date");
        picker.set_value(value);

        let frame = Rect::new(0, 0, 60, 20);
        let theme = Theme::default();
        let mut buf = Buffer::empty(frame);
        picker.render_trigger(Rect::new(0, 0, 30, 1), &mut buf, &theme, true);

        // Click the trigger to open, then click far away to dismiss.
        picker.handle_event(InputEvent::Mouse(MouseEvent {
            x: 2,
            y: 0,
            kind: MouseEventKind::Down,
        }));
        assert!(picker.is_open());
        picker.render_popover(frame, &mut buf, &theme);

        assert_eq!(
            picker.handle_event(InputEvent::Mouse(MouseEvent {
                x: 55,
                y: 18,
                kind: MouseEventKind::Down,
            })),
            DateTimePickerAction::Committed(value)
        );
    }

    #[test]
    fn trigger_renders_label_and_popover_fits_frame() {
        let mut picker = DateTimePicker::new("start");
        picker.set_value(Some(dt(2024, 3, 10, 9, 15, 30)));
        picker.set_invalid(true);

        let frame = Rect::new(0, 0, 40, 16);
        let theme = Theme::default();
        let mut buf = Buffer::empty(frame);
        picker.render_trigger(Rect::new(4, 2, 30, 1), &mut buf, &theme, false);
        picker.handle_event(key(KeyCode::Enter));
        picker.render_popover(frame, &mut buf, &theme);

        let area = picker.popover_area.unwrap();
        assert!(area.x + area.width <= frame.width);
        assert!(area.y + area.height <= frame.height);
    }
}
