//! Diary directory scanning.
//!
//! The diary directory is flat. Every file with the configured extension is
//! one entry, named by its date:
//!
//! ```text
//! diaries/
//! ├── 2024-01-05.md
//! ├── 2024-01-20.md
//! ├── 2024-02-01.md
//! ├── .draft.md          # hidden, skipped
//! └── notes.txt          # wrong extension, skipped
//! ```
//!
//! Scanning only reads files; it does not validate names. A file called
//! `notes.md` is returned like any other and rejected later by the loader,
//! so a stray file fails the build loudly instead of vanishing.

use crate::entry::RawEntry;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("diary directory not found: {0}")]
    MissingDirectory(PathBuf),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to list diary directory: {0}")]
    Walk(#[from] walkdir::Error),
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

/// Read every `*.{ext}` file directly inside `dir`, sorted by file name.
pub fn scan(dir: &Path, ext: &str) -> Result<Vec<RawEntry>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::MissingDirectory(dir.to_path_buf()));
    }

    let mut raws = Vec::new();
    for dir_entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let dir_entry = dir_entry?;
        let path = dir_entry.path();
        if !dir_entry.file_type().is_file() || is_hidden(path) || !has_extension(path, ext) {
            continue;
        }

        let id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let text = fs::read_to_string(path).map_err(|source| ScanError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::trace!(id = %id, bytes = text.len(), "read entry source");
        raws.push(RawEntry { id, text });
    }

    Ok(raws)
}
