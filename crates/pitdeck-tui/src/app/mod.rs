mod hit;
mod source_events;
mod update;

pub use hit::Hit;

use std::collections::BTreeSet;
use std::path::PathBuf;

use ratatui::layout::Rect;
use tokio::sync::mpsc;

use pitdeck_core::Deck;

use crate::bridge::SourceCommand;
use crate::layout::{CardSlot, Control, GridGeometry, SectionHeights};
use crate::model::edit::{EditState, TextBuffer};
use crate::model::status::StatusLine;
use crate::theme::Theme;

/// Which screen is currently displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Waiting for the template and card document to arrive.
    Loading,
    Board,
    /// Startup fetch failed; nothing to edit.
    Error(String),
}

/// Input mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    TextInput,
}

/// Aggregate selection state, shown on the select-all control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAllState {
    None,
    Partial,
    All,
}

/// A blocking overlay. While one is up, board actions are suspended.
#[derive(Debug, Clone)]
pub enum Modal {
    AddCard {
        input: TextBuffer,
        /// Validation message shown inside the dialog, not on the status line.
        error: Option<String>,
    },
    ConfirmRemove(String),
    ConfirmQuit,
}

/// Main application state.
pub struct App {
    pub screen: Screen,
    pub deck: Deck,
    /// Card markup fetched alongside the deck; drives print rendering.
    pub template: String,
    /// Human-readable description of where the deck came from.
    pub source_label: String,
    /// Names of cards ticked for printing.
    pub selected: BTreeSet<String>,
    /// Focused card as an index into display (alphabetical) order.
    pub focus: usize,
    /// First visible grid row.
    pub scroll_row: usize,
    pub edit: Option<EditState>,
    pub modal: Option<Modal>,
    pub status: StatusLine,
    /// A save request is in flight; further saves are refused until it lands.
    pub saving: bool,
    /// Unsaved changes exist; quitting asks for confirmation.
    pub dirty: bool,
    pub show_help: bool,
    pub input_mode: InputMode,
    pub theme: Theme,
    pub tick: usize,
    pub should_quit: bool,
    /// Channel to the deck source task.
    pub source_tx: Option<mpsc::UnboundedSender<SourceCommand>>,
    /// Section heights shared by every card; None forces a re-measure on
    /// the next draw.
    pub section_heights: Option<SectionHeights>,
    /// Card slots from the last draw (for mouse hit resolution).
    pub slots: Vec<CardSlot>,
    /// Control bar segments from the last draw.
    pub controls: Vec<(Rect, Control)>,
    /// Grid shape from the last draw (for navigation and scroll math).
    pub last_grid: Option<GridGeometry>,
    /// Directory print sheets are written to.
    pub print_dir: PathBuf,
    /// Base URL stamped into exported print sheets so they find their
    /// stylesheets and images.
    pub asset_base: String,
}

impl App {
    pub fn new(
        theme: Theme,
        source_label: impl Into<String>,
        asset_base: impl Into<String>,
        print_dir: PathBuf,
    ) -> Self {
        Self {
            screen: Screen::Loading,
            deck: Deck::new(),
            template: String::new(),
            source_label: source_label.into(),
            selected: BTreeSet::new(),
            focus: 0,
            scroll_row: 0,
            edit: None,
            modal: None,
            status: StatusLine::default(),
            saving: false,
            dirty: false,
            show_help: false,
            input_mode: InputMode::Normal,
            theme,
            tick: 0,
            should_quit: false,
            source_tx: None,
            section_heights: None,
            slots: Vec::new(),
            controls: Vec::new(),
            last_grid: None,
            print_dir,
            asset_base: asset_base.into(),
        }
    }

    /// Card names in display order.
    pub fn card_names(&self) -> Vec<String> {
        self.deck.names().map(str::to_string).collect()
    }

    pub fn focused_name(&self) -> Option<String> {
        self.deck.iter().nth(self.focus).map(|(name, _)| name.clone())
    }

    /// Display-order index of a card, used to restore focus after renames.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.deck.iter().position(|(n, _)| n == name)
    }

    pub fn select_all_state(&self) -> SelectAllState {
        if self.deck.is_empty() || self.selected.is_empty() {
            SelectAllState::None
        } else if self.selected.len() == self.deck.len() {
            SelectAllState::All
        } else {
            SelectAllState::Partial
        }
    }

    /// Keep `input_mode` in sync with whether a text field is active.
    pub fn refresh_input_mode(&mut self) {
        let editing =
            self.edit.is_some() || matches!(self.modal, Some(Modal::AddCard { .. }));
        self.input_mode = if editing {
            InputMode::TextInput
        } else {
            InputMode::Normal
        };
    }

    /// Drop cached layout after a structural change; the next draw
    /// re-measures section heights and rebuilds slots.
    pub fn invalidate_layout(&mut self) {
        self.section_heights = None;
    }

    pub fn clamp_focus(&mut self) {
        self.focus = self.focus.min(self.deck.len().saturating_sub(1));
    }

    /// Grid shape from the last draw, with a safe fallback before the
    /// first frame.
    pub fn grid_shape(&self) -> (usize, usize) {
        match &self.last_grid {
            Some(grid) => (grid.columns, grid.visible_rows().max(1)),
            None => (1, 20),
        }
    }

    /// Scroll just enough to bring the focused card on screen.
    pub fn ensure_focus_visible(&mut self) {
        let (columns, visible_rows) = self.grid_shape();
        let focus_row = self.focus / columns;
        if focus_row < self.scroll_row {
            self.scroll_row = focus_row;
        } else if focus_row >= self.scroll_row + visible_rows {
            self.scroll_row = focus_row + 1 - visible_rows;
        }
    }

    /// Render the current screen.
    pub fn view(&mut self, f: &mut ratatui::Frame) {
        let area = f.area();

        match &self.screen {
            Screen::Loading => {
                crate::view::loading::render_loading(
                    f,
                    &self.theme,
                    self.tick,
                    &self.source_label,
                    area,
                );
                return;
            }
            Screen::Error(message) => {
                crate::view::loading::render_error(f, &self.theme, message, area);
                return;
            }
            Screen::Board => {}
        }

        crate::view::board::render_in(f, self, area);

        if self.show_help {
            crate::view::help::render(f, &self.theme);
        }

        if let Some(modal) = &self.modal {
            crate::view::modal::render(f, &self.theme, modal);
        }
    }
}
