use std::path::PathBuf;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub site_dir: PathBuf,
    pub cards_path: PathBuf,
}
