use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{CostKind, DeckError, StatKind};

/// One card's stored fields.
///
/// Every numeric field defaults to zero when the source document omits it,
/// so a bare `{}` entry is a valid (if blank) card. An empty year renders
/// as "N/A" but is stored as the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardRecord {
    pub year: String,
    pub speed: u8,
    pub acceleration: u8,
    pub handling: u8,
    pub money: u32,
    pub gas: u32,
    pub tires: u32,
    pub parts: u32,
    pub tools: u32,
}

impl Default for CardRecord {
    fn default() -> Self {
        CardRecord {
            year: String::new(),
            speed: 0,
            acceleration: 0,
            handling: 0,
            money: 0,
            gas: 0,
            tires: 0,
            parts: 0,
            tools: 0,
        }
    }
}

impl CardRecord {
    /// Baseline for a freshly added card: middling ratings, minimal costs,
    /// placeholder year the user is expected to edit.
    pub fn starter() -> Self {
        CardRecord {
            year: "YYYY".to_string(),
            speed: 3,
            acceleration: 3,
            handling: 3,
            money: 1,
            gas: 1,
            tires: 1,
            parts: 1,
            tools: 1,
        }
    }

    pub fn rating(&self, stat: StatKind) -> u8 {
        match stat {
            StatKind::Speed => self.speed,
            StatKind::Acceleration => self.acceleration,
            StatKind::Handling => self.handling,
        }
    }

    /// Stores exactly the given value. Star clicks only produce 1..=5;
    /// anything out of range that arrives some other way is clamped at
    /// render time, not here.
    pub fn set_rating(&mut self, stat: StatKind, value: u8) {
        match stat {
            StatKind::Speed => self.speed = value,
            StatKind::Acceleration => self.acceleration = value,
            StatKind::Handling => self.handling = value,
        }
    }

    pub fn cost(&self, kind: CostKind) -> u32 {
        match kind {
            CostKind::Money => self.money,
            CostKind::Gas => self.gas,
            CostKind::Tires => self.tires,
            CostKind::Parts => self.parts,
            CostKind::Tools => self.tools,
        }
    }

    fn cost_mut(&mut self, kind: CostKind) -> &mut u32 {
        match kind {
            CostKind::Money => &mut self.money,
            CostKind::Gas => &mut self.gas,
            CostKind::Tires => &mut self.tires,
            CostKind::Parts => &mut self.parts,
            CostKind::Tools => &mut self.tools,
        }
    }

    pub fn increment_cost(&mut self, kind: CostKind) {
        let cost = self.cost_mut(kind);
        *cost = cost.saturating_add(1);
    }

    /// Decrements with a floor of zero. A decrement at zero stays at zero.
    pub fn decrement_cost(&mut self, kind: CostKind) {
        let cost = self.cost_mut(kind);
        *cost = cost.saturating_sub(1);
    }
}

/// Top-level wire shape of the card document: `{"cards": {"<name>": {...}}}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeckFile {
    #[serde(default)]
    pub cards: BTreeMap<String, CardRecord>,
}

/// The in-memory card collection.
///
/// Keys are card names. Iteration order is the sorted key order, which is
/// also the display order of the card grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Deck {
    cards: BTreeMap<String, CardRecord>,
}

impl Deck {
    pub fn new() -> Self {
        Deck::default()
    }

    /// Builds a deck from raw document text.
    ///
    /// Text that is not JSON at all is an error (the caller aborts the
    /// load). Anything parseable goes through [`Deck::from_value`]'s
    /// shape tolerance.
    pub fn from_document(text: &str) -> Result<Deck, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Ok(Deck::from_value(&value))
    }

    /// Interprets a parsed JSON value as a card document.
    ///
    /// A top level without a usable `cards` object degrades to an empty
    /// deck. A card entry whose fields don't deserialize degrades to an
    /// all-zero record under its name, so one bad entry doesn't take down
    /// the rest of the document.
    pub fn from_value(value: &serde_json::Value) -> Deck {
        let mut cards = BTreeMap::new();
        match value.get("cards").and_then(|c| c.as_object()) {
            Some(entries) => {
                for (name, entry) in entries {
                    let record = serde_json::from_value(entry.clone()).unwrap_or_else(|e| {
                        tracing::warn!(card = %name, error = %e, "unusable card entry, keeping a zeroed record");
                        CardRecord::default()
                    });
                    cards.insert(name.clone(), record);
                }
            }
            None => {
                tracing::warn!("document has no usable \"cards\" object, starting with an empty deck");
            }
        }
        Deck { cards }
    }

    /// Snapshot of the full document in wire shape, for saving.
    pub fn to_file(&self) -> DeckFile {
        DeckFile {
            cards: self.cards.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cards.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&CardRecord> {
        self.cards.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut CardRecord> {
        self.cards.get_mut(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, record: CardRecord) {
        self.cards.insert(name.into(), record);
    }

    /// Removes a card. Removing a name that isn't present is a no-op.
    pub fn remove(&mut self, name: &str) -> Option<CardRecord> {
        self.cards.remove(name)
    }

    /// Card names in display (sorted) order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cards.keys().map(String::as_str)
    }

    /// (name, record) pairs in display (sorted) order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &CardRecord)> {
        self.cards.iter()
    }

    /// Adds a new card with the starter record. The name is trimmed first;
    /// empty and duplicate names are rejected without touching the deck.
    /// Returns the stored (trimmed) name.
    pub fn add_starter(&mut self, name: &str) -> Result<String, DeckError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DeckError::EmptyName);
        }
        if self.cards.contains_key(trimmed) {
            return Err(DeckError::DuplicateName(trimmed.to_string()));
        }
        self.cards.insert(trimmed.to_string(), CardRecord::starter());
        Ok(trimmed.to_string())
    }

    /// Renames a card: the record moves to the new key in one step, so the
    /// image path (derived from the key at render time) follows along.
    /// A rename to the same name is a no-op. Empty and duplicate targets
    /// are rejected without touching the deck. Returns the stored name.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<String, DeckError> {
        let trimmed = new.trim();
        if trimmed.is_empty() {
            return Err(DeckError::EmptyName);
        }
        if trimmed == old {
            return Ok(old.to_string());
        }
        if self.cards.contains_key(trimmed) {
            return Err(DeckError::DuplicateName(trimmed.to_string()));
        }
        let record = self
            .cards
            .remove(old)
            .ok_or_else(|| DeckError::UnknownCard(old.to_string()))?;
        self.cards.insert(trimmed.to_string(), record);
        Ok(trimmed.to_string())
    }
}

impl From<DeckFile> for Deck {
    fn from(file: DeckFile) -> Self {
        Deck { cards: file.cards }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_read_as_zero() {
        let deck =
            Deck::from_document(r#"{"cards": {"Zephyr": {"year": "1969", "speed": 4, "money": 2}}}"#)
                .unwrap();
        assert_eq!(deck.len(), 1);
        let card = deck.get("Zephyr").unwrap();
        assert_eq!(card.year, "1969");
        assert_eq!(card.speed, 4);
        assert_eq!(card.money, 2);
        assert_eq!(card.acceleration, 0);
        assert_eq!(card.handling, 0);
        assert_eq!(card.gas, 0);
        assert_eq!(card.tires, 0);
        assert_eq!(card.parts, 0);
        assert_eq!(card.tools, 0);
    }

    #[test]
    fn missing_cards_object_degrades_to_empty_deck() {
        let deck = Deck::from_document(r#"{"vehicles": {}}"#).unwrap();
        assert!(deck.is_empty());
        let deck = Deck::from_document("[1, 2, 3]").unwrap();
        assert!(deck.is_empty());
        let deck = Deck::from_document(r#"{"cards": 17}"#).unwrap();
        assert!(deck.is_empty());
    }

    #[test]
    fn unparseable_text_is_an_error() {
        assert!(Deck::from_document("not json at all").is_err());
    }

    #[test]
    fn bad_card_entry_degrades_to_zeroed_record() {
        let deck = Deck::from_document(
            r#"{"cards": {"Wreck": {"speed": "fast"}, "Fine": {"speed": 2}}}"#,
        )
        .unwrap();
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.get("Wreck").unwrap().speed, 0);
        assert_eq!(deck.get("Fine").unwrap().speed, 2);
    }

    #[test]
    fn iteration_is_sorted_by_name() {
        let mut deck = Deck::new();
        deck.insert("Mustang", CardRecord::default());
        deck.insert("Apollo", CardRecord::default());
        deck.insert("Zephyr", CardRecord::default());
        let names: Vec<&str> = deck.names().collect();
        assert_eq!(names, vec!["Apollo", "Mustang", "Zephyr"]);
    }

    #[test]
    fn add_starter_uses_baseline_values() {
        let mut deck = Deck::new();
        let stored = deck.add_starter("  Comet  ").unwrap();
        assert_eq!(stored, "Comet");
        let card = deck.get("Comet").unwrap();
        assert_eq!(card.year, "YYYY");
        assert_eq!(card.speed, 3);
        assert_eq!(card.acceleration, 3);
        assert_eq!(card.handling, 3);
        assert_eq!(card.money, 1);
        assert_eq!(card.gas, 1);
        assert_eq!(card.tires, 1);
        assert_eq!(card.parts, 1);
        assert_eq!(card.tools, 1);
    }

    #[test]
    fn duplicate_add_is_rejected_and_deck_unchanged() {
        let mut deck = Deck::new();
        deck.add_starter("Comet").unwrap();
        deck.get_mut("Comet").unwrap().speed = 5;
        let err = deck.add_starter("Comet").unwrap_err();
        assert!(matches!(err, DeckError::DuplicateName(ref n) if n == "Comet"));
        assert_eq!(deck.len(), 1);
        assert_eq!(deck.get("Comet").unwrap().speed, 5);
    }

    #[test]
    fn empty_and_whitespace_names_are_rejected() {
        let mut deck = Deck::new();
        assert!(matches!(deck.add_starter(""), Err(DeckError::EmptyName)));
        assert!(matches!(deck.add_starter("   "), Err(DeckError::EmptyName)));
        assert!(deck.is_empty());
    }

    #[test]
    fn remove_deletes_exactly_one_entry() {
        let mut deck = Deck::new();
        deck.add_starter("Comet").unwrap();
        deck.add_starter("Zephyr").unwrap();
        assert!(deck.remove("Comet").is_some());
        assert_eq!(deck.len(), 1);
        assert!(deck.remove("Comet").is_none());
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn rename_moves_record_atomically() {
        let mut deck = Deck::new();
        deck.add_starter("Comet").unwrap();
        deck.get_mut("Comet").unwrap().speed = 5;
        let stored = deck.rename("Comet", "  Meteor ").unwrap();
        assert_eq!(stored, "Meteor");
        assert!(!deck.contains("Comet"));
        assert_eq!(deck.get("Meteor").unwrap().speed, 5);
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn rename_to_existing_name_is_rejected() {
        let mut deck = Deck::new();
        deck.add_starter("Comet").unwrap();
        deck.add_starter("Meteor").unwrap();
        let err = deck.rename("Comet", "Meteor").unwrap_err();
        assert!(matches!(err, DeckError::DuplicateName(_)));
        assert!(deck.contains("Comet"));
        assert!(deck.contains("Meteor"));
    }

    #[test]
    fn rename_to_same_name_is_a_noop() {
        let mut deck = Deck::new();
        deck.add_starter("Comet").unwrap();
        assert_eq!(deck.rename("Comet", "Comet").unwrap(), "Comet");
        assert!(deck.contains("Comet"));
    }

    #[test]
    fn cost_decrement_floors_at_zero() {
        let mut card = CardRecord::default();
        card.decrement_cost(CostKind::Gas);
        assert_eq!(card.gas, 0);
        card.increment_cost(CostKind::Gas);
        card.increment_cost(CostKind::Gas);
        card.decrement_cost(CostKind::Gas);
        assert_eq!(card.gas, 1);
    }

    #[test]
    fn document_round_trips_through_save_payload() {
        let text = r#"{"cards": {"Apollo": {"year": "1972", "speed": 5, "acceleration": 3, "handling": 2, "money": 4, "gas": 2, "tires": 1, "parts": 3, "tools": 0}, "Zephyr": {"year": "1969", "speed": 4}}}"#;
        let deck = Deck::from_document(text).unwrap();
        let payload = serde_json::to_string_pretty(&deck.to_file()).unwrap();
        let reloaded = Deck::from_document(&payload).unwrap();
        assert_eq!(deck, reloaded);
    }
}
