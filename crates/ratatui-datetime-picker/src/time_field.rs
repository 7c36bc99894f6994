use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::theme::Theme;
use ratatui_datetime_picker_core::input::InputEvent;
use ratatui_datetime_picker_core::input::KeyCode;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimeFieldAction {
    None,
    /// The text changed. The new value is applied by the picker at blur or
    /// popover close, not per keystroke.
    Edited,
}

/// A single-line `HH:MM:SS` editor.
///
/// Accepts digits and `:` only, up to eight columns. The field holds plain
/// text; interpretation belongs to the draft engine.
#[derive(Clone, Debug, Default)]
pub struct TimeField {
    text: String,
    cursor: usize,
}

const MAX_LEN: usize = 8;
const PLACEHOLDER: &str = "HH:MM:SS";

impl TimeField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.text.truncate(MAX_LEN);
        self.cursor = self.text.len();
    }

    pub fn handle_event(&mut self, event: InputEvent) -> TimeFieldAction {
        let InputEvent::Key(key) = event else {
            return TimeFieldAction::None;
        };
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() || c == ':' => {
                if self.text.len() >= MAX_LEN {
                    return TimeFieldAction::None;
                }
                self.text.insert(self.cursor, c);
                self.cursor += 1;
                TimeFieldAction::Edited
            }
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return TimeFieldAction::None;
                }
                self.cursor -= 1;
                self.text.remove(self.cursor);
                TimeFieldAction::Edited
            }
            KeyCode::Delete => {
                if self.cursor >= self.text.len() {
                    return TimeFieldAction::None;
                }
                self.text.remove(self.cursor);
                TimeFieldAction::Edited
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                TimeFieldAction::None
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.text.len());
                TimeFieldAction::None
            }
            KeyCode::Home => {
                self.cursor = 0;
                TimeFieldAction::None
            }
            KeyCode::End => {
                self.cursor = self.text.len();
                TimeFieldAction::None
            }
            _ => TimeFieldAction::None,
        }
    }

    pub fn render_ref(&self, area: Rect, buf: &mut Buffer, theme: &Theme, focused: bool) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        if self.text.is_empty() {
            buf.set_stringn(area.x, area.y, PLACEHOLDER, area.width as usize, theme.text_muted);
        } else {
            buf.set_stringn(
                area.x,
                area.y,
                &self.text,
                area.width as usize,
                theme.text_primary,
            );
        }

        if focused {
            let cx = area.x + (self.cursor as u16).min(area.width.saturating_sub(1));
            if let Some(cell) = buf.cell_mut((cx, area.y)) {
                cell.set_style(theme.cursor);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui_datetime_picker_core::input::KeyEvent;

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code))
    }

    fn type_str(field: &mut TimeField, s: &str) {
        for c in s.chars() {
            field.handle_event(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn accepts_digits_and_colons_only() {
        let mut field = TimeField::new();
        type_str(&mut field, "09:15:30");
        assert_eq!(field.text(), "09:15:30");

        field.handle_event(key(KeyCode::Char('x')));
        assert_eq!(field.text(), "09:15:30");
    }

    #[test]
    fn stops_at_max_length() {
        let mut field = TimeField::new();
        type_str(&mut field, "09:15:30:99");
        assert_eq!(field.text(), "09:15:30");
    }

    #[test]
    fn edits_at_the_cursor() {
        let mut field = TimeField::new();
        field.set_text("09:15:30");
        field.handle_event(key(KeyCode::Home));
        assert_eq!(field.handle_event(key(KeyCode::Delete)), TimeFieldAction::Edited);
        assert_eq!(field.text(), "9:15:30");

        field.handle_event(key(KeyCode::End));
        field.handle_event(key(KeyCode::Backspace));
        assert_eq!(field.text(), "9:15:3");
    }

    #[test]
    fn backspace_at_start_is_a_no_op() {
        let mut field = TimeField::new();
        field.set_text("12:00:00");
        field.handle_event(key(KeyCode::Home));
        assert_eq!(
            field.handle_event(key(KeyCode::Backspace)),
            TimeFieldAction::None
        );
        assert_eq!(field.text(), "12:00:00");
    }
}
