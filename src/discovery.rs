use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tips_search::Document;
use walkdir::WalkDir;

const TIPS_EXTENSION: &str = ".md";
const USER_TIPS_DIR: &str = ".tips";

/// Tip directories in search order, keeping only those that exist.
pub fn tip_directories(configured: &[PathBuf], extra: &[PathBuf]) -> Vec<PathBuf> {
    let bundled = bundled_resources_dir();
    let user = dirs::home_dir().map(|home| home.join(USER_TIPS_DIR));

    let mut candidates: Vec<PathBuf> = bundled.into_iter().chain(user).collect();
    candidates.extend(configured.iter().cloned());
    candidates.extend(extra.iter().cloned());

    existing_unique(candidates)
}

/// `resources/` next to the directory holding the executable.
fn bundled_resources_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let dir = exe.parent()?;
    Some(dir.join("..").join("resources"))
}

fn existing_unique(candidates: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    for dir in candidates {
        if !dir.is_dir() {
            log::debug!("skipping missing tips directory {}", dir.display());
            continue;
        }
        let canonical = dir.canonicalize().unwrap_or(dir);
        if !dirs.contains(&canonical) {
            dirs.push(canonical);
        }
    }
    dirs
}

/// Markdown files under `dirs`, recursively, sorted by name within each directory.
/// Symlinks are followed, so linked files and directories count too.
pub fn find_tip_files(dirs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for dir in dirs {
        for entry in WalkDir::new(dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .flatten()
        {
            if !entry.file_type().is_file() {
                continue;
            }
            if entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(TIPS_EXTENSION))
            {
                files.push(entry.into_path());
            }
        }
    }
    log::debug!("found {} tips files in {} directories", files.len(), dirs.len());
    files
}

pub fn load_document(path: &Path) -> Result<Document> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(Document::new(path.display().to_string(), text))
}

pub fn load_documents(files: &[PathBuf]) -> Result<Vec<Document>> {
    files.iter().map(|path| load_document(path)).collect()
}
