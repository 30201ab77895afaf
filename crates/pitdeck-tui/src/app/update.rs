use pitdeck_core::{DeckError, render_card_html, render_print_document, strip_print_controls};

use super::hit::Hit;
use super::{App, Modal, Screen, SelectAllState};
use crate::action::Action;
use crate::bridge::SourceCommand;
use crate::layout::{Control, Region};
use crate::model::edit::{EditField, EditState};
use crate::model::status::StatusLevel;

impl App {
    /// Process a user action and update state. Returns true if the app
    /// should quit.
    pub fn update(&mut self, action: Action) -> bool {
        match action {
            Action::Tick => {
                self.tick = self.tick.wrapping_add(1);
                return false;
            }
            // Geometry is rebuilt on every draw; nothing to store here.
            Action::Resize(_, _) | Action::None => return false,
            _ => {}
        }

        if self.modal.is_some() {
            return self.update_modal(action);
        }

        if self.edit.is_some() {
            match self.update_edit(action) {
                Some(fall_through) => return self.update_board(fall_through),
                None => return self.should_quit,
            }
        }

        match self.screen {
            Screen::Loading | Screen::Error(_) => {
                self.update_blocked(action);
                self.should_quit
            }
            Screen::Board => self.update_board(action),
        }
    }

    /// While a dialog is up it owns the keyboard; everything else is
    /// ignored until it closes.
    fn update_modal(&mut self, action: Action) -> bool {
        match (&mut self.modal, action) {
            // ── quit confirmation ──
            (Some(Modal::ConfirmQuit), Action::Confirm | Action::Quit) => {
                self.should_quit = true;
            }
            // 'n' answers no here
            (Some(Modal::ConfirmQuit), Action::Dismiss | Action::EditName) => {
                self.modal = None;
            }

            // ── remove confirmation ──
            (Some(Modal::ConfirmRemove(name)), Action::Confirm) => {
                let name = name.clone();
                self.modal = None;
                self.remove_card(&name);
            }
            (
                Some(Modal::ConfirmRemove(_)),
                Action::Dismiss | Action::Quit | Action::RemoveCard | Action::EditName,
            ) => {
                self.modal = None;
            }

            // ── add card dialog ──
            (Some(Modal::AddCard { input, error }), Action::EditInput(ch)) => {
                if ch == '\x08' {
                    input.backspace();
                } else {
                    input.insert(ch);
                }
                *error = None;
            }
            (Some(Modal::AddCard { input, .. }), Action::DeleteForward) => input.delete_forward(),
            (Some(Modal::AddCard { input, .. }), Action::CursorLeft) => input.left(),
            (Some(Modal::AddCard { input, .. }), Action::CursorRight) => input.right(),
            (Some(Modal::AddCard { input, .. }), Action::CursorHome) => input.home(),
            (Some(Modal::AddCard { input, .. }), Action::CursorEnd) => input.end(),
            (Some(Modal::AddCard { input, error }), Action::EditCommit) => {
                let name = input.text.clone();
                match self.deck.add_starter(&name) {
                    Ok(stored) => {
                        self.modal = None;
                        self.refresh_input_mode();
                        self.dirty = true;
                        self.invalidate_layout();
                        if let Some(pos) = self.index_of(&stored) {
                            self.focus = pos;
                        }
                        self.ensure_focus_visible();
                        self.status.set_info(format!("Added \"{stored}\""));
                    }
                    Err(DeckError::EmptyName) => {
                        *error = Some("Card name cannot be empty.".to_string());
                    }
                    Err(DeckError::DuplicateName(_)) => {
                        *error = Some("A card with this name already exists.".to_string());
                    }
                    Err(e) => *error = Some(e.to_string()),
                }
            }
            (Some(Modal::AddCard { .. }), Action::EditCancel | Action::Dismiss) => {
                self.modal = None;
                self.refresh_input_mode();
            }
            // Ctrl+C is the only Quit that reaches a text dialog
            (Some(Modal::AddCard { .. }), Action::Quit) => {
                self.should_quit = true;
            }

            _ => {}
        }
        self.should_quit
    }

    /// Keystrokes while an inline edit is active. Returns an action to
    /// re-route when the edit ends with a click elsewhere.
    fn update_edit(&mut self, action: Action) -> Option<Action> {
        match action {
            Action::EditInput(ch) => {
                if let Some(edit) = self.edit.as_mut() {
                    if ch == '\x08' {
                        edit.backspace();
                    } else {
                        edit.insert_char(ch);
                    }
                }
            }
            Action::DeleteForward => {
                if let Some(edit) = self.edit.as_mut() {
                    edit.delete_forward();
                }
            }
            Action::CursorLeft => {
                if let Some(edit) = self.edit.as_mut() {
                    edit.cursor_left();
                }
            }
            Action::CursorRight => {
                if let Some(edit) = self.edit.as_mut() {
                    edit.cursor_right();
                }
            }
            Action::CursorHome => {
                if let Some(edit) = self.edit.as_mut() {
                    edit.cursor_home();
                }
            }
            Action::CursorEnd => {
                if let Some(edit) = self.edit.as_mut() {
                    edit.cursor_end();
                }
            }
            Action::EditCommit => self.commit_edit(),
            Action::EditCancel => self.cancel_edit(),
            // A click outside the field commits first, then lands normally.
            Action::ClickAt(..) | Action::RightClickAt(..) | Action::DoubleClickAt(..) => {
                self.commit_edit();
                return Some(action);
            }
            Action::Quit => {
                self.should_quit = true;
            }
            _ => {}
        }
        None
    }

    /// Loading and error screens accept almost nothing.
    fn update_blocked(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::Dismiss if self.show_help => self.show_help = false,
            _ => {}
        }
    }

    fn update_board(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => {
                if self.dirty {
                    self.modal = Some(Modal::ConfirmQuit);
                } else {
                    self.should_quit = true;
                }
            }
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::Dismiss => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.status.clear();
                }
            }

            Action::MoveLeft => {
                self.focus = self.focus.saturating_sub(1);
                self.ensure_focus_visible();
            }
            Action::MoveRight => {
                if self.focus + 1 < self.deck.len() {
                    self.focus += 1;
                }
                self.ensure_focus_visible();
            }
            Action::MoveUp => {
                let (columns, _) = self.grid_shape();
                self.focus = self.focus.saturating_sub(columns);
                self.ensure_focus_visible();
            }
            Action::MoveDown => self.move_focus_down(),
            Action::GoTop => {
                self.focus = 0;
                self.ensure_focus_visible();
            }
            Action::GoBottom => {
                self.focus = self.deck.len().saturating_sub(1);
                self.ensure_focus_visible();
            }
            Action::PageUp => {
                let (columns, rows) = self.grid_shape();
                self.focus = self.focus.saturating_sub(columns * rows);
                self.ensure_focus_visible();
            }
            Action::PageDown => {
                let (columns, rows) = self.grid_shape();
                if !self.deck.is_empty() {
                    self.focus = (self.focus + columns * rows).min(self.deck.len() - 1);
                }
                self.ensure_focus_visible();
            }
            Action::ScrollUp => self.scroll_row = self.scroll_row.saturating_sub(1),
            Action::ScrollDown => {
                let max = self
                    .last_grid
                    .map(|g| g.max_scroll(self.deck.len()))
                    .unwrap_or(0);
                if self.scroll_row < max {
                    self.scroll_row += 1;
                }
            }

            Action::ToggleSelect => {
                if let Some(name) = self.focused_name() {
                    self.toggle_selected(&name);
                }
            }
            Action::ToggleSelectAll => self.toggle_select_all(),
            Action::AddCard => self.open_add_dialog(),
            Action::RemoveCard => {
                if let Some(name) = self.focused_name() {
                    self.modal = Some(Modal::ConfirmRemove(name));
                }
            }
            Action::Save => self.request_save(),
            Action::PrintSelected => self.print_selected(),
            Action::EditName => {
                if let Some(name) = self.focused_name() {
                    self.start_edit(&name, EditField::Name);
                }
            }
            Action::EditYear => {
                if let Some(name) = self.focused_name() {
                    self.start_edit(&name, EditField::Year);
                }
            }

            Action::ClickAt(x, y) => self.route_click(x, y),
            Action::RightClickAt(x, y) => self.route_right_click(x, y),
            Action::DoubleClickAt(x, y) => self.route_double_click(x, y),

            _ => {}
        }
        self.should_quit
    }

    fn move_focus_down(&mut self) {
        let len = self.deck.len();
        if len == 0 {
            return;
        }
        let (columns, _) = self.grid_shape();
        let next = self.focus + columns;
        if next < len {
            self.focus = next;
        } else if self.focus / columns < (len - 1) / columns {
            // partial last row
            self.focus = len - 1;
        }
        self.ensure_focus_visible();
    }

    fn toggle_selected(&mut self, name: &str) {
        if !self.selected.remove(name) {
            self.selected.insert(name.to_string());
        }
    }

    /// All selected clears everything; otherwise select the whole deck.
    fn toggle_select_all(&mut self) {
        match self.select_all_state() {
            SelectAllState::All => self.selected.clear(),
            SelectAllState::None | SelectAllState::Partial => {
                self.selected = self.card_names().into_iter().collect();
            }
        }
    }

    fn open_add_dialog(&mut self) {
        self.modal = Some(Modal::AddCard {
            input: crate::model::edit::TextBuffer::from_text(""),
            error: None,
        });
        self.refresh_input_mode();
    }

    fn request_save(&mut self) {
        if self.saving {
            self.status.set_info("A save is already in progress");
            return;
        }
        let Some(tx) = &self.source_tx else {
            self.status.set_error("No deck source connected");
            return;
        };
        if tx.send(SourceCommand::Save(self.deck.to_file())).is_ok() {
            self.saving = true;
            self.status.set_info("Saving...");
        } else {
            self.status.set_error("Deck source is gone; cannot save");
        }
    }

    /// Render the ticked cards through the card template, strip the edit
    /// controls, write a print sheet, and hand it to the OS opener.
    fn print_selected(&mut self) {
        if self.selected.is_empty() {
            self.status.set_error("Select at least one card to print");
            return;
        }
        let mut cards_html = String::new();
        for (name, record) in self.deck.iter() {
            if !self.selected.contains(name) {
                continue;
            }
            let card = render_card_html(&self.template, name, record);
            cards_html.push_str(&strip_print_controls(&card));
            cards_html.push('\n');
        }
        let document = render_print_document(&cards_html, &self.asset_base);
        match crate::printing::write_print_sheet(&self.print_dir, &document) {
            Ok(path) => {
                let shown = path.display().to_string();
                match open::that(&path) {
                    Ok(()) => self.status.set_info(format!("Print sheet opened: {shown}")),
                    Err(e) => self.status.set_info(format!(
                        "Print sheet written to {shown} (open failed: {e})"
                    )),
                }
            }
            Err(e) => self
                .status
                .set_error(format!("Failed to write print sheet: {e}")),
        }
    }

    fn remove_card(&mut self, name: &str) {
        if self.deck.remove(name).is_some() {
            self.selected.remove(name);
            self.clamp_focus();
            self.ensure_focus_visible();
            self.invalidate_layout();
            self.dirty = true;
            self.status.set_info(format!("Removed \"{name}\""));
        }
    }

    /// Begin an inline edit seeded with the stored value (the year field
    /// may display "N/A" while the stored value is empty).
    fn start_edit(&mut self, name: &str, field: EditField) {
        let Some(record) = self.deck.get(name) else {
            return;
        };
        let seed = match field {
            EditField::Name => name.to_string(),
            EditField::Year => record.year.clone(),
        };
        self.edit = Some(EditState::new(name, field, seed));
        self.refresh_input_mode();
    }

    /// Empty or unchanged input reverts without touching the record.
    fn commit_edit(&mut self) {
        let Some(edit) = self.edit.take() else {
            return;
        };
        self.refresh_input_mode();
        let new_text = edit.input.text.trim().to_string();
        if new_text.is_empty() || new_text == edit.original {
            return;
        }
        match edit.field {
            EditField::Year => {
                if let Some(record) = self.deck.get_mut(&edit.card) {
                    record.year = new_text;
                    self.dirty = true;
                }
            }
            EditField::Name => match self.deck.rename(&edit.card, &new_text) {
                Ok(stored) => {
                    // Selection and focus follow the card under its new name.
                    if self.selected.remove(&edit.card) {
                        self.selected.insert(stored.clone());
                    }
                    if let Some(pos) = self.index_of(&stored) {
                        self.focus = pos;
                    }
                    self.ensure_focus_visible();
                    self.invalidate_layout();
                    self.dirty = true;
                }
                Err(DeckError::DuplicateName(_)) => {
                    self.status
                        .set_error("A card with this name already exists.");
                }
                Err(e) => self.status.set_error(e.to_string()),
            },
        }
    }

    fn cancel_edit(&mut self) {
        self.edit = None;
        self.refresh_input_mode();
    }

    fn route_click(&mut self, x: u16, y: u16) {
        match self.hit_at(x, y) {
            Some(Hit::Control(control)) => self.activate_control(control),
            Some(Hit::Card { name, region }) => {
                if let Some(pos) = self.index_of(&name) {
                    self.focus = pos;
                }
                self.apply_card_click(&name, region);
            }
            Some(Hit::CardBody { name }) => {
                if let Some(pos) = self.index_of(&name) {
                    self.focus = pos;
                }
            }
            None => {}
        }
    }

    /// Right click only decrements costs; everywhere else it is inert.
    fn route_right_click(&mut self, x: u16, y: u16) {
        if let Some(Hit::Card {
            name,
            region: Region::Cost { kind },
        }) = self.hit_at(x, y)
        {
            if let Some(pos) = self.index_of(&name) {
                self.focus = pos;
            }
            if let Some(record) = self.deck.get_mut(&name) {
                if record.cost(kind) > 0 {
                    record.decrement_cost(kind);
                    self.dirty = true;
                }
            }
        }
    }

    /// Double click starts an inline edit on the name or year; on any
    /// other region it behaves as one more single click.
    fn route_double_click(&mut self, x: u16, y: u16) {
        match self.hit_at(x, y) {
            Some(Hit::Card {
                name,
                region: Region::Name,
            }) => {
                if let Some(pos) = self.index_of(&name) {
                    self.focus = pos;
                }
                self.start_edit(&name, EditField::Name);
            }
            Some(Hit::Card {
                name,
                region: Region::Year,
            }) => {
                if let Some(pos) = self.index_of(&name) {
                    self.focus = pos;
                }
                self.start_edit(&name, EditField::Year);
            }
            _ => self.route_click(x, y),
        }
    }

    fn activate_control(&mut self, control: Control) {
        match control {
            Control::Add => self.open_add_dialog(),
            Control::Save => self.request_save(),
            Control::Print => self.print_selected(),
            Control::SelectAll => self.toggle_select_all(),
        }
    }

    fn apply_card_click(&mut self, name: &str, region: Region) {
        match region {
            Region::Select => self.toggle_selected(name),
            Region::Remove => {
                self.modal = Some(Modal::ConfirmRemove(name.to_string()));
            }
            Region::Star { stat, value } => {
                if let Some(record) = self.deck.get_mut(name) {
                    record.set_rating(stat, value);
                    self.dirty = true;
                }
            }
            Region::Cost { kind } => {
                if let Some(record) = self.deck.get_mut(name) {
                    record.increment_cost(kind);
                    self.dirty = true;
                }
            }
            // Single clicks focus only; edits start on double click.
            Region::Name | Region::Year => {}
        }
    }

    /// Show the save outcome on the status line; called from the source
    /// event handler.
    pub(super) fn finish_save(&mut self, level: StatusLevel, message: String) {
        self.saving = false;
        match level {
            StatusLevel::Info => {
                self.dirty = false;
                self.status.set_info(message);
            }
            StatusLevel::Error => self.status.set_error(message),
        }
    }
}
