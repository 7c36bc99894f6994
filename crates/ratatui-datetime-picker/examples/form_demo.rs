use chrono::Days;
use chrono::Local;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui_datetime_picker::picker::DateTimePicker;
use ratatui_datetime_picker::picker::DateTimePickerAction;
use ratatui_datetime_picker::theme::Theme;
use ratatui_datetime_picker_core::crossterm_input::input_event_from_crossterm;
use ratatui_datetime_picker_core::form::FormField;
use ratatui_datetime_picker_core::input::InputEvent;
use ratatui_datetime_picker_core::input::KeyCode;
use std::io;
use std::time::Duration;

struct FieldSlot {
    label: &'static str,
    field: FormField,
    picker: DateTimePicker,
}

impl FieldSlot {
    fn new(label: &'static str, field: FormField) -> Self {
        let mut picker = DateTimePicker::new(field.name().to_string());
        picker.set_value(field.value());
        Self {
            label,
            field,
            picker,
        }
    }

    fn commit(&mut self, value: Option<chrono::NaiveDateTime>) {
        self.field.commit(value);
        self.picker.set_value(self.field.value());
    }
}

struct App {
    // slot 0: the bare picker; slots 1-2: the validated range pair.
    slots: [FieldSlot; 3],
    focus: usize,
    status: String,
}

impl App {
    fn new() -> Self {
        let now = Local::now().naive_local();
        // End before start on purpose, so the validation message shows up
        // immediately.
        let yesterday = now.checked_sub_days(Days::new(1));

        let mut app = Self {
            slots: [
                FieldSlot::new("Date and time", FormField::new("date")),
                FieldSlot::new("Start time", FormField::with_value("start", Some(now))),
                FieldSlot::new("End time", FormField::with_value("end", yesterday)),
            ],
            focus: 0,
            status: "Tab: next field  Enter/Space: open  s: submit  q: quit".to_string(),
        };
        app.validate_range();
        app
    }

    fn handle(&mut self, ev: InputEvent) -> bool {
        if let Some(idx) = self.slots.iter().position(|s| s.picker.is_open()) {
            if let DateTimePickerAction::Committed(value) = self.slots[idx].picker.handle_event(ev)
            {
                self.slots[idx].commit(value);
                self.validate_range();
            }
            return true;
        }

        match ev {
            InputEvent::Key(key) => match key.code {
                KeyCode::Char('q') => return false,
                KeyCode::Tab => {
                    self.focus = (self.focus + 1) % self.slots.len();
                }
                KeyCode::Char('s') => self.submit(),
                _ => {
                    let slot = &mut self.slots[self.focus];
                    slot.picker.handle_event(ev);
                }
            },
            InputEvent::Mouse(_) => {
                for slot in &mut self.slots {
                    slot.picker.handle_event(ev);
                }
            }
        }
        true
    }

    /// The host-side schema rule: end must be after start. The pickers only
    /// ever see the resulting invalid flag.
    fn validate_range(&mut self) {
        let start = self.slots[1].field.value();
        let end = self.slots[2].field.value();
        match (start, end) {
            (Some(start), Some(end)) if end <= start => {
                self.slots[2]
                    .field
                    .set_error("End time must be after start time");
            }
            _ => self.slots[2].field.clear_error(),
        }
        for slot in &mut self.slots {
            let invalid = slot.field.invalid();
            slot.picker.set_invalid(invalid);
        }
    }

    fn submit(&mut self) {
        self.status = if self.focus == 0 {
            match self.slots[0].field.value() {
                Some(v) => format!("Submitted: {v}"),
                None => "Submitted: (unset)".to_string(),
            }
        } else if self.slots[2].field.invalid() {
            "Not submitted: fix the highlighted field first".to_string()
        } else {
            format!(
                "Submitted: start={:?} end={:?}",
                self.slots[1].field.value(),
                self.slots[2].field.value()
            )
        };
    }
}

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        crossterm::event::EnableMouseCapture
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::event::DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    res
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    let theme = Theme::default();
    let mut app = App::new();

    loop {
        terminal.draw(|f| {
            let frame = f.area();
            let buf = f.buffer_mut();
            if frame.width < 30 || frame.height < 12 {
                return;
            }

            let trigger_w = frame.width.saturating_sub(20).max(24);
            let mut y = frame.y + 1;

            buf.set_span(
                frame.x + 1,
                y,
                &Span::styled("Basic DateTimePicker", theme.accent),
                frame.width,
            );
            y += 1;
            render_slot(&mut app.slots[0], app.focus == 0, frame, 3, y, trigger_w, buf, &theme);
            y += 3;

            buf.set_span(
                frame.x + 1,
                y,
                &Span::styled("DateTimePicker with validation", theme.accent),
                frame.width,
            );
            y += 1;
            render_slot(&mut app.slots[1], app.focus == 1, frame, 3, y, trigger_w, buf, &theme);
            y += 2;
            render_slot(&mut app.slots[2], app.focus == 2, frame, 3, y, trigger_w, buf, &theme);
            y += 2;

            if y < frame.y + frame.height {
                if let Some(msg) = app.slots[2].field.message() {
                    buf.set_span(frame.x + 3, y, &Span::styled(msg, theme.danger), frame.width);
                }
            }

            if frame.height > 1 {
                let status_y = frame.y + frame.height - 1;
                buf.set_span(
                    frame.x + 1,
                    status_y,
                    &Span::styled(app.status.clone(), theme.text_muted),
                    frame.width,
                );
            }

            // Overlays last, so an open popover draws on top.
            for slot in &mut app.slots {
                slot.picker.render_popover(frame, buf, &theme);
            }
        })?;

        if crossterm::event::poll(Duration::from_millis(50))? {
            if let Some(ev) = input_event_from_crossterm(crossterm::event::read()?) {
                if !app.handle(ev) {
                    return Ok(());
                }
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn render_slot(
    slot: &mut FieldSlot,
    focused: bool,
    frame: Rect,
    x: u16,
    y: u16,
    trigger_w: u16,
    buf: &mut ratatui::buffer::Buffer,
    theme: &Theme,
) {
    if y + 1 >= frame.y + frame.height {
        return;
    }
    let label = format!("{} ({})", slot.label, slot.field.name());
    buf.set_span(frame.x + x, y, &Span::styled(label, theme.text_muted), frame.width);

    let trigger = Rect::new(frame.x + x, y + 1, trigger_w.min(frame.width.saturating_sub(x)), 1);
    slot.picker.render_trigger(trigger, buf, theme, focused);
}
