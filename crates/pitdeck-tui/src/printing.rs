use std::path::{Path, PathBuf};

/// Write a rendered print sheet under `dir` with a timestamped name and
/// return the path. The caller hands the path to the OS opener so the
/// browser's print dialog takes over.
pub fn write_print_sheet(dir: &Path, html: &str) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let path = dir.join(format!("pitdeck-print-{stamp}.html"));
    std::fs::write(&path, html)?;
    Ok(path)
}
