//! HTML site generation.
//!
//! Last stage of the build pipeline. Takes the chronological index and writes
//! the final static site.
//!
//! ## Generated Pages
//!
//! - **Post pages** (`/YYYY/MM/DD/index.html`): one entry with social meta
//!   tags, JSON-LD, and a previous/next pager
//! - **Archive root** (`/archive/index.html`): the newest month
//! - **Month pages** (`/archive/YYYY-MM/index.html`): calendar grid, month
//!   picker, and the month's entries
//! - **Legacy redirect** (`/archives.html`): meta refresh to `archive/`
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── 2024/
//! │   └── 03/
//! │       └── 10/
//! │           └── index.html     # Post page
//! ├── archive/
//! │   ├── index.html             # Newest month
//! │   └── 2024-03/
//! │       └── index.html         # Month page
//! ├── archives.html              # Legacy redirect
//! ├── diaries.js                 # Data feed
//! ├── sitemap.xml
//! ├── robots.txt
//! ├── style.css
//! └── nav.js
//! ```
//!
//! Post pages link with site-absolute URLs (`{site.path}/style.css`). Archive
//! pages link with relative prefixes (`../`, `../../`) so the archive tree
//! can be browsed from any mount point.
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (colors injected from config)
//! - `static/nav.js`: Arrow-key and swipe navigation between entries
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::calendar::{self, CalendarCell};
use crate::config::{self, SiteConfig};
use crate::entry::Entry;
use crate::feed;
use crate::index::{ChronoIndex, Neighbors};
use crate::naming::MonthKey;
use crate::sitemap::{self, Sitemap};
use chrono::{DateTime, Utc};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What [`generate`] wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generated {
    pub post_pages: usize,
    /// Archive root plus one page per month.
    pub archive_pages: usize,
    /// Other files, relative to the output directory.
    pub files: Vec<String>,
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/nav.js");

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Write the whole site for `index` into `output_dir`.
pub fn generate(
    index: &ChronoIndex,
    config: &SiteConfig,
    output_dir: &Path,
    generated_at: DateTime<Utc>,
) -> Result<Generated, GenerateError> {
    let mut generated = Generated::default();

    // Post pages
    for (i, entry) in index.entries().iter().enumerate() {
        let (y, m, d) = entry.date().path_segments();
        let page = render_post_page(entry, index.neighbors(i), config);
        write_file(
            &output_dir.join(&y).join(&m).join(&d).join("index.html"),
            page.into_string(),
        )?;
        generated.post_pages += 1;
    }
    tracing::info!(count = generated.post_pages, "generated post pages");

    // Archive root and month pages
    let root = render_archive_page(index, None, config);
    write_file(&output_dir.join("archive/index.html"), root.into_string())?;
    generated.archive_pages += 1;
    for month in index.months() {
        let page = render_archive_page(index, Some(month), config);
        write_file(
            &output_dir
                .join("archive")
                .join(month.to_string())
                .join("index.html"),
            page.into_string(),
        )?;
        generated.archive_pages += 1;
    }
    tracing::info!(count = generated.archive_pages, "generated archive pages");

    let mut emit = |name: &str, contents: String| -> Result<(), GenerateError> {
        write_file(&output_dir.join(name), contents)?;
        tracing::debug!(file = name, "wrote");
        generated.files.push(name.to_string());
        Ok(())
    };

    emit(
        config.output.feed_file.as_str(),
        feed::render_feed(index.entries(), &config.output.feed_variable)?,
    )?;

    if !config.output.legacy_redirect.is_empty() {
        let target = config.site.local_url("/archive/");
        emit(
            config.output.legacy_redirect.as_str(),
            render_redirect(&target, &config.site.lang).into_string(),
        )?;
    }

    if config.output.sitemap {
        let xml = Sitemap::build(index, &config.site, generated_at).into_xml();
        emit("sitemap.xml", xml)?;
    }
    if config.output.robots {
        emit("robots.txt", sitemap::robots_txt(&config.site))?;
    }

    let color_css = config::generate_color_css(&config.colors);
    emit("style.css", format!("{}\n\n{}", color_css, CSS_STATIC))?;
    emit("nav.js", JS.to_string())?;

    tracing::info!(output = %output_dir.display(), "site generated");
    Ok(generated)
}

fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| GenerateError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, contents).map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(
    lang: &str,
    title: &str,
    stylesheet: &str,
    head_extra: Markup,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                (head_extra)
                link rel="stylesheet" href=(stylesheet);
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the site header: home link, site name, tagline, and extra nav
fn site_header(config: &SiteConfig, home_href: &str, nav: Markup) -> Markup {
    html! {
        header.site-header {
            a.back-link href=(home_href) { "← Home" }
            h1 { (config.site.title) }
            @if !config.site.tagline.is_empty() {
                p.tagline { (config.site.tagline) }
            }
            (nav)
        }
    }
}

fn site_footer(config: &SiteConfig) -> Markup {
    html! {
        footer {
            @if !config.site.footer.is_empty() {
                p { (config.site.footer) }
            }
        }
    }
}

/// schema.org `BlogPosting` for a post page.
fn json_ld(entry: &Entry, config: &SiteConfig) -> String {
    let date = entry.id();
    let value = serde_json::json!({
        "@context": "https://schema.org",
        "@type": "BlogPosting",
        "headline": entry.title(),
        "datePublished": date,
        "dateModified": date,
        "author": {
            "@type": "Person",
            "name": config.site.author,
        },
        "mainEntityOfPage": {
            "@type": "WebPage",
            "@id": entry.canonical_url(),
        },
        "description": entry.summary(),
    });
    // `<` must not appear raw inside a script element
    value.to_string().replace('<', "\\u003c")
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders one entry's page.
pub fn render_post_page(entry: &Entry, neighbors: Neighbors<'_>, config: &SiteConfig) -> Markup {
    let site = &config.site;
    let page_title = format!("{} | {}", entry.title(), site.title);
    let image = site.image_url();
    let prev = neighbors.previous.map(Entry::permalink);
    let next = neighbors.next.map(Entry::permalink);

    let head = html! {
        meta name="description" content=(entry.summary());
        link rel="canonical" href=(entry.canonical_url());

        meta property="og:type" content="article";
        meta property="og:site_name" content=(site.title);
        meta property="og:title" content=(entry.title());
        meta property="og:description" content=(entry.summary());
        meta property="og:url" content=(entry.canonical_url());
        @if let Some(image) = &image {
            meta property="og:image" content=(image);
        }

        meta name="twitter:card" content="summary_large_image";
        meta name="twitter:title" content=(entry.title());
        meta name="twitter:description" content=(entry.summary());
        @if let Some(image) = &image {
            meta name="twitter:image" content=(image);
        }

        script type="application/ld+json" { (PreEscaped(json_ld(entry, config))) }
    };

    let nav = html! {
        nav {
            a href=(site.local_url("/archive/")) { "All entries" }
        }
    };

    let content = html! {
        (site_header(config, &site.local_url("/"), nav))
        main id="diary-container" {
            article.entry {
                h2 { (entry.title()) }
                p.date {
                    time datetime=(entry.id()) { (entry.id()) }
                }
                div.content-body { (PreEscaped(entry.rendered_content())) }
            }
            nav.pager {
                div.pager-slot {
                    @if let Some(href) = prev {
                        a.pager-link rel="prev" href=(href) { "← Previous" }
                    }
                }
                div.pager-slot {
                    @if let Some(href) = next {
                        a.pager-link rel="next" href=(href) { "Next →" }
                    }
                }
            }
        }
        (site_footer(config))
        div.nav-zones data-prev=[prev] data-next=[next] {}
        script src=(site.local_url("/nav.js")) {}
    };

    base_document(
        &site.lang,
        &page_title,
        &site.local_url("/style.css"),
        head,
        content,
    )
}

fn entry_count(n: usize) -> String {
    match n {
        1 => "1 entry".to_string(),
        n => format!("{n} entries"),
    }
}

fn month_href(rel: &str, month: MonthKey) -> String {
    format!("{rel}archive/{month}/")
}

/// Renders the calendar card for one month
fn render_calendar(month: MonthKey, entries: &[Entry]) -> Markup {
    let grid = calendar::build(month, entries);
    html! {
        section.calendar-card {
            div.calendar-weekdays {
                @for day in WEEKDAYS {
                    span { (day) }
                }
            }
            div.calendar-grid {
                @for week in grid.weeks() {
                    div.calendar-week {
                        @for cell in week {
                            @match cell {
                                CalendarCell::Placeholder => {
                                    span.calendar-day.placeholder {}
                                }
                                CalendarCell::Empty { day } => {
                                    span.calendar-day { (day) }
                                }
                                CalendarCell::Occupied { day, entry } => {
                                    a.calendar-day.has-entry
                                        href=(entry.permalink())
                                        title={ (entry.id()) " · " (entry.title()) } {
                                        (day)
                                        span.dot {}
                                    }
                                }
                            }
                        }
                    }
                }
            }
            p.calendar-help { "Days with a dot have an entry." }
        }
    }
}

/// Renders an archive page.
///
/// With `selected = None` this is the archive root (`/archive/`), which shows
/// the newest month. Otherwise it is the page for `selected`.
pub fn render_archive_page(
    index: &ChronoIndex,
    selected: Option<MonthKey>,
    config: &SiteConfig,
) -> Markup {
    let site = &config.site;
    let rel = if selected.is_some() { "../../" } else { "../" };
    let shown = selected.or_else(|| index.latest_month());
    let months = index.months();

    let page_title = match shown {
        Some(month) if selected.is_some() => format!("{} | {}", month.label(), site.title),
        _ => format!("Archive | {}", site.title),
    };

    let head = html! {
        script src={ (rel) (config.output.feed_file) } {}
    };

    let content = html! {
        (site_header(config, rel, html! {}))
        main.archive-page {
            @if let Some(month) = shown {
                @let entries = index.month(&month).unwrap_or_default();
                @let neighbors = index.month_neighbors(&month);
                h2.month-title { (month.label()) " (" (entry_count(entries.len())) ")" }

                div.calendar-toolbar {
                    @if let Some(prev) = neighbors.previous {
                        a.month-link.prev rel="prev" href=(month_href(rel, prev)) { "← " (prev.label()) }
                    } @else {
                        span.month-link.prev {}
                    }
                    details.month-picker {
                        summary.month-picker-btn { (month.label()) }
                        ul.month-picker-menu role="listbox" {
                            @for m in &months {
                                li class=[(*m == month).then_some("current")] {
                                    a href=(month_href(rel, *m)) { (m.label()) }
                                }
                            }
                        }
                    }
                    @if let Some(next) = neighbors.next {
                        a.month-link.next rel="next" href=(month_href(rel, next)) { (next.label()) " →" }
                    } @else {
                        span.month-link.next {}
                    }
                }

                (render_calendar(month, entries))

                ul.archives-list {
                    @for entry in entries {
                        li {
                            a href=(entry.permalink()) {
                                span.date { (entry.id()) }
                                " "
                                span.title { (entry.title()) }
                            }
                            @if !entry.summary().is_empty() {
                                p.summary { (entry.summary()) }
                            }
                        }
                    }
                }
            } @else {
                ul.archives-list {
                    li.empty { "No entries yet." }
                }
            }
        }
        (site_footer(config))
    };

    base_document(
        &site.lang,
        &page_title,
        &format!("{rel}style.css"),
        head,
        content,
    )
}

/// Renders a stub page that redirects to `target`.
pub fn render_redirect(target: &str, lang: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang) {
            head {
                meta charset="UTF-8";
                meta http-equiv="refresh" content={ "0; url=" (target) };
                link rel="canonical" href=(target);
                title { "Redirecting..." }
            }
            body {
                p {
                    a href=(target) { "Continue to the archive" }
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
