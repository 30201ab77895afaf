use thiserror::Error;

pub mod config_file;
pub mod deck;
pub mod source;
pub mod template;

// Re-export for convenience
pub use deck::{CardRecord, Deck, DeckFile};
pub use source::{DeckSource, LoadedResources};
pub use template::{CardFace, render_card_html, render_print_document, strip_print_controls};

/// Number of star cells in a rating row. Ratings above this render full.
pub const STAR_MAX: u8 = 5;

/// The star-rated stats, in display order (top to bottom on the card).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    Speed,
    Acceleration,
    Handling,
}

impl StatKind {
    pub const ALL: [StatKind; 3] = [StatKind::Speed, StatKind::Acceleration, StatKind::Handling];

    pub fn label(&self) -> &'static str {
        match self {
            StatKind::Speed => "Speed",
            StatKind::Acceleration => "Acceleration",
            StatKind::Handling => "Handling",
        }
    }
}

/// The counted costs, in display order (left to right on the card).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CostKind {
    Money,
    Gas,
    Tires,
    Parts,
    Tools,
}

impl CostKind {
    pub const ALL: [CostKind; 5] = [
        CostKind::Money,
        CostKind::Gas,
        CostKind::Tires,
        CostKind::Parts,
        CostKind::Tools,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CostKind::Money => "Money",
            CostKind::Gas => "Gas",
            CostKind::Tires => "Tires",
            CostKind::Parts => "Parts",
            CostKind::Tools => "Tools",
        }
    }
}

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("card name cannot be empty")]
    EmptyName,
    #[error("a card named \"{0}\" already exists")]
    DuplicateName(String),
    #[error("no card named \"{0}\"")]
    UnknownCard(String),
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("card document is not valid JSON: {0}")]
    BadDocument(#[from] serde_json::Error),
    #[error("fetching {what} failed: {status}")]
    FetchStatus {
        what: &'static str,
        status: reqwest::StatusCode,
    },
    #[error("save rejected: {0}")]
    SaveRejected(String),
}
