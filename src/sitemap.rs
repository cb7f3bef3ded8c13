//! Sitemap and robots.txt generation.
//!
//! The sitemap lists, in this order, the site root, the archive root, and
//! for every entry (newest first) its canonical URL followed by its month
//! archive URL. Repeats are dropped keeping the first occurrence, so a month
//! with many entries is listed once:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url><loc>https://example.com/</loc><lastmod>2025-01-01T08:30:00Z</lastmod></url>
//! </urlset>
//! ```
//!
//! Every URL carries the same `lastmod`: the time of the build, in UTC.

use crate::config::SiteInfo;
use crate::index::ChronoIndex;
use chrono::{DateTime, Utc};
use maud::html;
use std::collections::HashSet;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const LASTMOD_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlEntry {
    pub loc: String,
    pub lastmod: String,
}

#[derive(Debug, Clone, Default)]
pub struct Sitemap {
    pub urls: Vec<UrlEntry>,
}

/// Absolute URLs to list, deduplicated in first-seen order.
///
/// Every URL, entry pages included, is built from `site`, so the list stays
/// consistent even if the entries were loaded under another site path.
pub fn sitemap_urls(index: &ChronoIndex, site: &SiteInfo) -> Vec<String> {
    let abs = |rel: &str| site.absolute_url(&site.local_url(rel));

    let mut urls = vec![abs("/"), abs("/archive/")];
    for entry in index.entries() {
        let (y, m, d) = entry.date().path_segments();
        urls.push(abs(&format!("/{y}/{m}/{d}/")));
        urls.push(abs(&format!("/archive/{}/", entry.month())));
    }

    let mut seen = HashSet::new();
    urls.retain(|u| seen.insert(u.clone()));
    urls
}

impl Sitemap {
    /// Sitemap for `index`, every URL stamped with `generated_at`.
    pub fn build(index: &ChronoIndex, site: &SiteInfo, generated_at: DateTime<Utc>) -> Self {
        let lastmod = generated_at.format(LASTMOD_FORMAT).to_string();
        let urls = sitemap_urls(index, site)
            .into_iter()
            .map(|loc| UrlEntry {
                loc,
                lastmod: lastmod.clone(),
            })
            .collect();
        Self { urls }
    }

    /// XML document, one `<url>` per line. Locations are escaped by maud.
    pub fn into_xml(self) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str(&format!("<urlset xmlns=\"{SITEMAP_NS}\">\n"));
        for entry in &self.urls {
            let url = html! {
                url {
                    loc { (entry.loc) }
                    lastmod { (entry.lastmod) }
                }
            };
            xml.push_str("  ");
            xml.push_str(&url.into_string());
            xml.push('\n');
        }
        xml.push_str("</urlset>\n");
        xml
    }
}

/// `robots.txt` allowing everything and pointing at the sitemap.
pub fn robots_txt(site: &SiteInfo) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}\n",
        site.absolute_url(&site.local_url("/sitemap.xml"))
    )
}
