use std::time::{Duration, Instant};

use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::action::Action;
use crate::app::InputMode;

/// Two primary presses on the same cell within this window count as a
/// double click.
const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

/// Map a crossterm terminal event to a TUI action, respecting input mode.
pub fn map_event(event: &Event, input_mode: &InputMode) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            // Ctrl+C always quits regardless of mode
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Action::Quit;
            }

            match input_mode {
                InputMode::Normal => map_key_normal(key),
                InputMode::TextInput => map_key_text_input(key),
            }
        }
        Event::Mouse(mouse) => map_mouse(mouse),
        Event::Resize(w, h) => Action::Resize(*w, *h),
        _ => Action::None,
    }
}

fn map_mouse(mouse: &MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollDown => Action::ScrollDown,
        MouseEventKind::ScrollUp => Action::ScrollUp,
        MouseEventKind::Down(MouseButton::Left) => Action::ClickAt(mouse.column, mouse.row),
        MouseEventKind::Down(MouseButton::Right) => Action::RightClickAt(mouse.column, mouse.row),
        _ => Action::None,
    }
}

fn map_key_normal(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Esc => Action::Dismiss,
        KeyCode::Enter | KeyCode::Char('y') => Action::Confirm,
        KeyCode::Char('h') | KeyCode::Left => Action::MoveLeft,
        KeyCode::Char('l') | KeyCode::Right => Action::MoveRight,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Char('g') | KeyCode::Home => Action::GoTop,
        KeyCode::Char('G') | KeyCode::End => Action::GoBottom,
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::PageDown,
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::Char(' ') => Action::ToggleSelect,
        KeyCode::Char('A') => Action::ToggleSelectAll,
        KeyCode::Char('a') => Action::AddCard,
        KeyCode::Char('x') | KeyCode::Delete => Action::RemoveCard,
        KeyCode::Char('s') => Action::Save,
        KeyCode::Char('p') => Action::PrintSelected,
        KeyCode::Char('n') => Action::EditName,
        KeyCode::Char('e') => Action::EditYear,
        _ => Action::None,
    }
}

fn map_key_text_input(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::EditCancel,
        KeyCode::Enter => Action::EditCommit,
        KeyCode::Char(c) => Action::EditInput(c),
        KeyCode::Backspace => Action::EditInput('\x08'), // sentinel for backspace
        KeyCode::Delete => Action::DeleteForward,
        KeyCode::Left => Action::CursorLeft,
        KeyCode::Right => Action::CursorRight,
        KeyCode::Home => Action::CursorHome,
        KeyCode::End => Action::CursorEnd,
        _ => Action::None,
    }
}

/// Promotes a primary press to a double click when it repeats quickly on
/// the same cell.
pub struct ClickTracker {
    last: Option<(Instant, u16, u16)>,
}

impl ClickTracker {
    pub fn new() -> Self {
        ClickTracker { last: None }
    }

    pub fn classify(&mut self, x: u16, y: u16) -> Action {
        let now = Instant::now();
        let is_double = matches!(
            self.last,
            Some((at, lx, ly)) if lx == x && ly == y && now.duration_since(at) <= DOUBLE_CLICK_WINDOW
        );
        if is_double {
            self.last = None;
            Action::DoubleClickAt(x, y)
        } else {
            self.last = Some((now, x, y));
            Action::ClickAt(x, y)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_repeat_on_same_cell_is_a_double_click() {
        let mut tracker = ClickTracker::new();
        assert_eq!(tracker.classify(4, 7), Action::ClickAt(4, 7));
        assert_eq!(tracker.classify(4, 7), Action::DoubleClickAt(4, 7));
        // the pair is consumed; a third press starts over
        assert_eq!(tracker.classify(4, 7), Action::ClickAt(4, 7));
    }

    #[test]
    fn repeat_on_a_different_cell_stays_single() {
        let mut tracker = ClickTracker::new();
        assert_eq!(tracker.classify(4, 7), Action::ClickAt(4, 7));
        assert_eq!(tracker.classify(5, 7), Action::ClickAt(5, 7));
    }
}
