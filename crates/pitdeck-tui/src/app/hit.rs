use ratatui::layout::Position;

use super::App;
use crate::layout::{Control, Region};

/// What a mouse event landed on, resolved against the last drawn frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    Control(Control),
    Card { name: String, region: Region },
    /// Inside a card but not on any interactive region.
    CardBody { name: String },
}

impl App {
    pub fn hit_at(&self, x: u16, y: u16) -> Option<Hit> {
        let p = Position { x, y };

        for (rect, control) in &self.controls {
            if rect.contains(p) {
                return Some(Hit::Control(*control));
            }
        }

        for slot in &self.slots {
            if !slot.area.contains(p) {
                continue;
            }
            if let Some(region) = slot.region_at(x, y) {
                return Some(Hit::Card {
                    name: slot.name.clone(),
                    region,
                });
            }
            return Some(Hit::CardBody {
                name: slot.name.clone(),
            });
        }

        None
    }
}
