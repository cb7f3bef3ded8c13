//! CLI output formatting for `check` and `build`.
//!
//! Output reads as a content inventory: months newest first, each followed
//! by its entries as `date title` lines. File paths only appear as context.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Diary: diaries (3 entries, 2 months, renderer: commonmark)
//! February 2024 (1 entry)
//!     2024-02-01 Snow again
//! January 2024 (2 entries)
//!     2024-01-20 Back to work
//!     2024-01-05 (untitled)
//! ```
//!
//! ## Build
//!
//! ```text
//! Posts: 3 pages → YYYY/MM/DD/index.html
//! Archive: 3 pages → archive/
//! Files:
//!     diaries.js
//!     sitemap.xml
//! Built 3 entries into dist
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::entry::Entry;
use crate::pipeline::{BuildReport, Inventory};

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// One entry line. Entries whose title fell back to the identifier are
/// marked untitled instead of printing the date twice.
fn entry_line(entry: &Entry) -> String {
    let id = entry.id();
    if entry.title() == id {
        format!("{}{} (untitled)", indent(1), id)
    } else {
        format!("{}{} {}", indent(1), id, entry.title())
    }
}

pub fn format_check_output(inventory: &Inventory) -> Vec<String> {
    let index = &inventory.index;
    let mut lines = vec![format!(
        "Diary: {} ({}, {}, renderer: {})",
        inventory.diary_dir.display(),
        plural(index.len(), "entry", "entries"),
        plural(index.months().len(), "month", "months"),
        inventory.renderer
    )];

    if index.is_empty() {
        lines.push(format!("{}No entries yet.", indent(1)));
        return lines;
    }

    for (month, entries) in index.by_month() {
        lines.push(format!(
            "{} ({})",
            month.label(),
            plural(entries.len(), "entry", "entries")
        ));
        lines.extend(entries.iter().map(entry_line));
    }
    lines
}

pub fn print_check_output(inventory: &Inventory) {
    for line in format_check_output(inventory) {
        println!("{}", line);
    }
}

pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let generated = &report.generated;
    let mut lines = vec![
        format!(
            "Posts: {} → YYYY/MM/DD/index.html",
            plural(generated.post_pages, "page", "pages")
        ),
        format!(
            "Archive: {} → archive/",
            plural(generated.archive_pages, "page", "pages")
        ),
    ];
    if !generated.files.is_empty() {
        lines.push("Files:".to_string());
        lines.extend(
            generated
                .files
                .iter()
                .map(|f| format!("{}{}", indent(1), f)),
        );
    }
    lines.push(format!(
        "Built {} into {}",
        plural(report.inventory.index.len(), "entry", "entries"),
        report.output.display()
    ));
    lines
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::Generated;
    use crate::index::ChronoIndex;
    use crate::test_helpers::{entries_from, index_of};
    use std::path::PathBuf;

    fn inventory(index: ChronoIndex) -> Inventory {
        Inventory {
            index,
            renderer: "commonmark",
            diary_dir: PathBuf::from("diaries"),
        }
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn check_output_groups_by_month() {
        let lines = format_check_output(&inventory(index_of(&[
            "2024-01-05",
            "2024-01-20",
            "2024-02-01",
        ])));
        assert_eq!(
            lines,
            [
                "Diary: diaries (3 entries, 2 months, renderer: commonmark)",
                "February 2024 (1 entry)",
                "    2024-02-01 Entry 2024-02-01",
                "January 2024 (2 entries)",
                "    2024-01-20 Entry 2024-01-20",
                "    2024-01-05 Entry 2024-01-05",
            ]
        );
    }

    #[test]
    fn check_output_marks_untitled_entries() {
        let idx = ChronoIndex::new(entries_from(&[("2024-01-05", "no heading")]));
        let lines = format_check_output(&inventory(idx));
        assert_eq!(lines[2], "    2024-01-05 (untitled)");
        assert!(lines[0].contains("1 entry, 1 month"));
    }

    #[test]
    fn check_output_empty_diary() {
        let lines = format_check_output(&inventory(index_of(&[])));
        assert_eq!(
            lines,
            [
                "Diary: diaries (0 entries, 0 months, renderer: commonmark)",
                "    No entries yet.",
            ]
        );
    }

    #[test]
    fn build_output_summarizes_files() {
        let report = BuildReport {
            inventory: inventory(index_of(&["2024-01-05", "2024-02-01"])),
            generated: Generated {
                post_pages: 2,
                archive_pages: 3,
                files: vec!["diaries.js".to_string(), "sitemap.xml".to_string()],
            },
            output: PathBuf::from("dist"),
        };
        assert_eq!(
            format_build_output(&report),
            [
                "Posts: 2 pages → YYYY/MM/DD/index.html",
                "Archive: 3 pages → archive/",
                "Files:",
                "    diaries.js",
                "    sitemap.xml",
                "Built 2 entries into dist",
            ]
        );
    }

    #[test]
    fn build_output_without_extra_files() {
        let report = BuildReport {
            inventory: inventory(index_of(&["2024-01-05"])),
            generated: Generated {
                post_pages: 1,
                archive_pages: 2,
                files: vec![],
            },
            output: PathBuf::from("out"),
        };
        let lines = format_build_output(&report);
        assert_eq!(lines[0], "Posts: 1 page → YYYY/MM/DD/index.html");
        assert!(!lines.iter().any(|l| l == "Files:"));
        assert_eq!(lines.last().unwrap(), "Built 1 entry into out");
    }
}
