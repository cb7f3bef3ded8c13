//! Entry loading: raw diary text → immutable [`Entry`] records.
//!
//! ## Title and body
//!
//! The title is the text of the first level-1 heading anywhere in the file:
//! a line starting with a single `#`, then whitespace (any Unicode space,
//! including U+3000), then text. `## Sub` headings never count and stay in
//! the body. The exact line that supplied the title is cut out of the text
//! to form the body, so title and body can never disagree about which
//! heading was used:
//!
//! ```text
//! intro line            title:  "Hello World"
//! # Hello World    →    body:   "intro line\n\n\nSome **content** here."
//!
//! Some **content** here.
//! ```
//!
//! With no level-1 heading, the identifier (`2024-03-10`) is the title and
//! the whole text (trimmed) is the body.
//!
//! ## Derived fields
//!
//! | Field | Source |
//! |---|---|
//! | `rendered_content` | body through the configured [`MarkdownRenderer`] |
//! | `summary` | [`summarize`] of the body |
//! | `permalink` | `{site.path}/YYYY/MM/DD/` |
//! | `canonical_url` | `{site.url}` + permalink |

use crate::config::SiteConfig;
use crate::naming::{EntryDate, MonthKey, NamingError};
use crate::render::MarkdownRenderer;
use crate::summary::summarize;
use regex::Regex;
use serde::Serialize;
use std::ops::Range;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Naming(#[from] NamingError),
    #[error("two entries share the date {0}")]
    DuplicateDate(String),
}

static TITLE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^#[^\S\r\n]+(\S[^\r\n]*?)[^\S\r\n]*\r?$").expect("valid regex")
});

/// An entry as found on disk: identifier (file stem) and full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub id: String,
    pub text: String,
}

impl RawEntry {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// The heading line chosen as title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleMatch {
    /// Heading text, trimmed.
    pub title: String,
    /// Byte range of the whole heading line (without its newline).
    pub range: Range<usize>,
}

/// Find the first level-1 heading line in `text`.
pub fn extract_title(text: &str) -> Option<TitleMatch> {
    let caps = TITLE_LINE.captures(text)?;
    let line = caps.get(0)?;
    let title = caps.get(1)?.as_str().trim();
    Some(TitleMatch {
        title: title.to_string(),
        range: line.range(),
    })
}

/// Split raw text into `(title, body)`, falling back to `id` for the title.
pub fn split_title(id: &str, text: &str) -> (String, String) {
    match extract_title(text) {
        Some(m) => {
            let mut body = String::with_capacity(text.len());
            body.push_str(&text[..m.range.start]);
            body.push_str(&text[m.range.end..]);
            (m.title, body.trim().to_string())
        }
        None => (id.to_string(), text.trim().to_string()),
    }
}

/// One diary entry. Constructed once by [`load`] and never modified.
///
/// Serializes as a flat feed record:
/// `{date, title, content, raw, permalink, canonical, description}`.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    date: EntryDate,
    title: String,
    #[serde(rename = "content")]
    rendered_content: String,
    #[serde(rename = "raw")]
    body: String,
    permalink: String,
    #[serde(rename = "canonical")]
    canonical_url: String,
    #[serde(rename = "description")]
    summary: String,
}

impl Entry {
    /// Derive every field of an entry from its date and raw text.
    pub fn build(
        date: EntryDate,
        text: &str,
        renderer: &dyn MarkdownRenderer,
        config: &SiteConfig,
    ) -> Self {
        let (title, body) = split_title(&date.to_string(), text);
        let (y, m, d) = date.path_segments();
        let permalink = config.site.local_url(&format!("/{y}/{m}/{d}/"));
        Self {
            date,
            rendered_content: renderer.render(&body),
            summary: summarize(&body, config.content.summary_limit),
            canonical_url: config.site.absolute_url(&permalink),
            permalink,
            title,
            body,
        }
    }

    pub fn date(&self) -> EntryDate {
        self.date
    }

    /// The identifier, `YYYY-MM-DD`.
    pub fn id(&self) -> String {
        self.date.to_string()
    }

    pub fn month(&self) -> MonthKey {
        self.date.month_key()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn rendered_content(&self) -> &str {
        &self.rendered_content
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn permalink(&self) -> &str {
        &self.permalink
    }

    pub fn canonical_url(&self) -> &str {
        &self.canonical_url
    }
}

/// Turn raw entries into [`Entry`] records, newest first.
///
/// Fails on the first malformed identifier or on two entries with the same
/// date. Nothing is rendered until every identifier has been validated.
pub fn load(
    raws: Vec<RawEntry>,
    renderer: &dyn MarkdownRenderer,
    config: &SiteConfig,
) -> Result<Vec<Entry>, LoadError> {
    let mut dated = raws
        .into_iter()
        .map(|raw| -> Result<_, LoadError> { Ok((EntryDate::parse(&raw.id)?, raw.text)) })
        .collect::<Result<Vec<_>, _>>()?;

    dated.sort_by(|a, b| b.0.cmp(&a.0));

    if let Some(pair) = dated.windows(2).find(|w| w[0].0 == w[1].0) {
        return Err(LoadError::DuplicateDate(pair[0].0.to_string()));
    }

    let entries = dated
        .into_iter()
        .map(|(date, text)| {
            let entry = Entry::build(date, &text, renderer, config);
            tracing::debug!(
                date = %entry.date,
                title = entry.title(),
                summary_chars = entry.summary.chars().count(),
                "loaded entry"
            );
            entry
        })
        .collect();

    Ok(entries)
}
