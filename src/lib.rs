//! # Daybook
//!
//! A minimal static site generator for a diary. Your filesystem is the data
//! source: every `YYYY-MM-DD.md` file in the diary directory is one entry, its
//! first `# heading` is the title, and the date in the file name is all the
//! ordering there is.
//!
//! # Architecture: One-Pass Pipeline
//!
//! ```text
//! 1. Scan      diaries/     →  raw entries    (file stem + text)
//! 2. Load      raw entries  →  entries        (title, body, HTML, summary, URLs)
//! 3. Index     entries      →  chrono index   (newest first, month buckets, neighbours)
//! 4. Generate  index        →  dist/          (pages, feed, sitemap, assets)
//! ```
//!
//! Everything is rebuilt on every run. Entries are immutable once loaded, and
//! every later stage only borrows them.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Reads every entry file from the diary directory |
//! | [`naming`] | `YYYY-MM-DD` identifier parsing, month keys |
//! | [`entry`] | Title extraction, body derivation, the immutable [`entry::Entry`] |
//! | [`summary`] | Plain-text summaries for meta descriptions and the feed |
//! | [`render`] | Markdown renderers: full CommonMark or the line-based fallback |
//! | [`index`] | Newest-first ordering, month buckets, previous/next navigation |
//! | [`calendar`] | Sunday-first month grids for archive pages |
//! | [`feed`] | `const DIARY_DATA = [...]` data feed |
//! | [`sitemap`] | `sitemap.xml` and `robots.txt` |
//! | [`generate`] | Post pages, archive pages, redirect stub, static assets (Maud) |
//! | [`pipeline`] | Runs the stages; tagged [`pipeline::BuildError`] |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Explicit Configuration
//!
//! The resolved [`config::SiteConfig`] is a value passed into
//! [`pipeline::build`]. Nothing reads settings from globals, so tests (and
//! callers building several sites) just construct the config they need.
//!
//! ## Renderer Selection Once
//!
//! Full CommonMark rendering sits behind the default `commonmark` cargo
//! feature. [`render::select_renderer`] picks an implementation of
//! [`render::MarkdownRenderer`] at startup; the rest of the pipeline only sees
//! the trait object. Builds without the feature fall back to the line-based
//! renderer, which knows headings, `- ` lists, and paragraphs.
//!
//! ## Strict Identifiers
//!
//! A file whose name is not a real calendar date (`2024-02-30`, `notes`,
//! `2024-1-5`) stops the build. Silently skipping it would drop an entry
//! from the site without anyone noticing.

pub mod calendar;
pub mod config;
pub mod entry;
pub mod feed;
pub mod generate;
pub mod index;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod scan;
pub mod sitemap;
pub mod summary;

#[cfg(test)]
pub(crate) mod test_helpers;
