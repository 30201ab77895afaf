use super::{App, Screen};
use crate::bridge::SourceEvent;
use crate::model::status::StatusLevel;

impl App {
    /// Apply an event from the deck source task.
    pub fn handle_source_event(&mut self, event: SourceEvent) {
        match event {
            SourceEvent::Loaded(resources) => {
                self.template = resources.template;
                self.deck = resources.deck;
                self.screen = Screen::Board;
                self.invalidate_layout();
                self.clamp_focus();
                self.status.set_info(format!(
                    "Loaded {} cards from {}",
                    self.deck.len(),
                    self.source_label
                ));
            }
            SourceEvent::LoadFailed { error } => {
                self.screen = Screen::Error(format!(
                    "Error loading card data or template.\n{error}"
                ));
            }
            SourceEvent::Saved { message } => {
                self.finish_save(StatusLevel::Info, message);
            }
            SourceEvent::SaveFailed { error } => {
                self.finish_save(StatusLevel::Error, format!("Failed to save cards: {error}"));
            }
        }
    }
}
