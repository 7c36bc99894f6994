use chrono::Datelike;
use chrono::Days;
use chrono::Local;
use chrono::Months;
use chrono::NaiveDate;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::theme::Theme;
use ratatui_datetime_picker_core::input::InputEvent;
use ratatui_datetime_picker_core::input::KeyCode;
use ratatui_datetime_picker_core::input::MouseEventKind;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CalendarAction {
    None,
    Redraw,
    /// The user picked a day (`Some`) or cleared the selection (`None`).
    Selected(Option<NaiveDate>),
}

/// A single-month day grid with a movable cursor.
///
/// Arrows move the cursor by day/week, PageUp/PageDown (and mouse scroll)
/// page by month, `Enter` selects the cursored day, `Backspace`/`Delete`
/// clears the selection. Selection changes are reported as
/// [`CalendarAction::Selected`]; the view never interprets them.
#[derive(Clone, Debug)]
pub struct CalendarView {
    /// First day of the visible month.
    visible: NaiveDate,
    cursor: NaiveDate,
    selected: Option<NaiveDate>,
}

impl CalendarView {
    /// Columns needed for the weekday header and day cells.
    pub const WIDTH: u16 = 20;
    /// Header + weekday row + six week rows.
    pub const HEIGHT: u16 = 8;

    pub fn new() -> Self {
        Self::with_cursor(Local::now().date_naive())
    }

    pub fn with_cursor(cursor: NaiveDate) -> Self {
        Self {
            visible: first_of_month(cursor),
            cursor,
            selected: None,
        }
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    /// Mirrors an externally owned selection into the view and brings it
    /// into sight.
    pub fn set_selected(&mut self, day: Option<NaiveDate>) {
        self.selected = day;
        if let Some(day) = day {
            self.cursor = day;
            self.visible = first_of_month(day);
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) -> CalendarAction {
        match event {
            InputEvent::Key(key) => match key.code {
                KeyCode::Left => self.move_cursor_days(-1),
                KeyCode::Right => self.move_cursor_days(1),
                KeyCode::Up => self.move_cursor_days(-7),
                KeyCode::Down => self.move_cursor_days(7),
                KeyCode::PageUp => self.page_months(-1),
                KeyCode::PageDown => self.page_months(1),
                KeyCode::Home => {
                    self.cursor = self.visible;
                    CalendarAction::Redraw
                }
                KeyCode::End => {
                    self.cursor = last_of_month(self.visible);
                    CalendarAction::Redraw
                }
                KeyCode::Enter => {
                    self.selected = Some(self.cursor);
                    CalendarAction::Selected(self.selected)
                }
                KeyCode::Backspace | KeyCode::Delete => {
                    self.selected = None;
                    CalendarAction::Selected(None)
                }
                _ => CalendarAction::None,
            },
            InputEvent::Mouse(m) => match m.kind {
                MouseEventKind::ScrollUp => self.page_months(-1),
                MouseEventKind::ScrollDown => self.page_months(1),
                MouseEventKind::Down => CalendarAction::None,
            },
        }
    }

    pub fn render_ref(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let today = Local::now().date_naive();

        let header = self.visible.format("%B %Y").to_string();
        let pad = (area.width.min(Self::WIDTH) as usize).saturating_sub(header.len()) as u16 / 2;
        buf.set_stringn(
            area.x + pad,
            area.y,
            &header,
            (area.width - pad) as usize,
            theme.accent,
        );

        if area.height < 2 {
            return;
        }
        buf.set_stringn(
            area.x,
            area.y + 1,
            "Mo Tu We Th Fr Sa Su",
            area.width as usize,
            theme.text_muted,
        );

        let grid = month_grid(self.visible);
        for (week_idx, week) in grid.iter().enumerate() {
            let y = area.y + 2 + week_idx as u16;
            if y >= area.y + area.height {
                break;
            }
            for (day_idx, cell) in week.iter().enumerate() {
                let Some(day) = cell else { continue };
                let x = area.x + day_idx as u16 * 3;
                if x + 2 > area.x + area.width {
                    break;
                }
                let style = if Some(*day) == self.selected {
                    theme.selected
                } else if *day == self.cursor {
                    theme.cursor
                } else if *day == today {
                    theme.accent
                } else {
                    theme.text_primary
                };
                buf.set_stringn(x, y, format!("{:2}", day.day()), 2, style);
            }
        }
    }

    fn move_cursor_days(&mut self, delta: i64) -> CalendarAction {
        let moved = if delta >= 0 {
            self.cursor.checked_add_days(Days::new(delta as u64))
        } else {
            self.cursor.checked_sub_days(Days::new(delta.unsigned_abs()))
        };
        if let Some(moved) = moved {
            self.cursor = moved;
            self.visible = first_of_month(moved);
        }
        CalendarAction::Redraw
    }

    fn page_months(&mut self, delta: i32) -> CalendarAction {
        let step = Months::new(delta.unsigned_abs());
        let moved = if delta >= 0 {
            self.cursor.checked_add_months(step)
        } else {
            self.cursor.checked_sub_months(step)
        };
        if let Some(moved) = moved {
            self.cursor = moved;
            self.visible = first_of_month(moved);
        }
        CalendarAction::Redraw
    }
}

impl Default for CalendarView {
    fn default() -> Self {
        Self::new()
    }
}

/// Lays the visible month out as six Monday-first weeks.
pub fn month_grid(first: NaiveDate) -> [[Option<NaiveDate>; 7]; 6] {
    let first = first_of_month(first);
    let offset = first.weekday().num_days_from_monday() as usize;
    let days = last_of_month(first).day() as usize;

    let mut cells = [[None; 7]; 6];
    for day in 0..days {
        let pos = offset + day;
        cells[pos / 7][pos % 7] = first.checked_add_days(Days::new(day as u64));
    }
    cells
}

fn first_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

fn last_of_month(day: NaiveDate) -> NaiveDate {
    let first = first_of_month(day);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}
