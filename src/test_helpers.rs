//! Shared test utilities for the daybook test suite.
//!
//! Provides entry builders, a diary fixture on disk, and lookups that panic
//! with a readable message on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let idx = ChronoIndex::new(entries(&["2024-01-05", "2024-02-01"]));
//! assert_eq!(entry_ids(idx.entries()), ["2024-02-01", "2024-01-05"]);
//!
//! let tmp = setup_diary(&[("2024-03-10", "# Hello\n\nbody")]);
//! let raws = scan(&tmp.path().join("diaries"), "md").unwrap();
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::config::SiteConfig;
use crate::entry::{Entry, RawEntry, load};
use crate::index::ChronoIndex;
use crate::render::LineRenderer;

// =========================================================================
// Entry builders
// =========================================================================

/// Load entries with default config and the line renderer.
///
/// Each entry gets a title `Entry <id>` and a one-line body.
pub fn entries(ids: &[&str]) -> Vec<Entry> {
    let raws = ids
        .iter()
        .map(|id| RawEntry::new(*id, format!("# Entry {id}\n\nWritten on {id}.")))
        .collect();
    load(raws, &LineRenderer, &SiteConfig::default()).unwrap()
}

/// Load `(id, text)` pairs with default config and the line renderer.
pub fn entries_from(pairs: &[(&str, &str)]) -> Vec<Entry> {
    let raws = pairs
        .iter()
        .map(|(id, text)| RawEntry::new(*id, *text))
        .collect();
    load(raws, &LineRenderer, &SiteConfig::default()).unwrap()
}

pub fn index_of(ids: &[&str]) -> ChronoIndex {
    ChronoIndex::new(entries(ids))
}

// =========================================================================
// Fixture setup
// =========================================================================

/// Write a site root with a `diaries/` directory holding `<id>.md` files.
pub fn setup_diary(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("diaries");
    fs::create_dir_all(&dir).unwrap();
    for (id, text) in files {
        fs::write(dir.join(format!("{id}.md")), text).unwrap();
    }
    tmp
}

/// Read a generated file relative to `root`. Panics with the path on a miss.
pub fn read_output(root: &Path, rel: &str) -> String {
    let path = root.join(rel);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("expected output file {}: {e}", path.display()))
}

// =========================================================================
// Lookups and extractors
// =========================================================================

/// Identifiers in slice order.
pub fn entry_ids(entries: &[Entry]) -> Vec<String> {
    entries.iter().map(Entry::id).collect()
}

/// Find an entry by identifier. Panics if not found.
pub fn find_entry<'a>(entries: &'a [Entry], id: &str) -> &'a Entry {
    entries.iter().find(|e| e.id() == id).unwrap_or_else(|| {
        let ids = entry_ids(entries);
        panic!("entry '{id}' not found. Available: {ids:?}")
    })
}
