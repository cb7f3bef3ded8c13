//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by a user config file in the site root (or a file passed with
//! `--config`), and the resolved [`SiteConfig`] is passed explicitly into
//! every stage. Nothing reads configuration from globals, so one process can
//! build several sites.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Diary"
//! tagline = ""
//! author = "Anonymous"
//! url = "https://example.com"   # origin, used for canonical URLs and the sitemap
//! path = ""                     # permalink prefix, e.g. "/diary"
//! lang = "en"
//! # image = "/profile.jpg"      # Open Graph / Twitter card image
//! footer = ""
//!
//! [content]
//! diary_dir = "diaries"
//! extension = "md"
//! summary_limit = 155
//!
//! [render]
//! markdown = "auto"             # auto | commonmark | fallback
//!
//! [output]
//! feed_file = "diaries.js"
//! feed_variable = "DIARY_DATA"
//! sitemap = true
//! robots = true
//! legacy_redirect = "archives.html"   # "" disables
//!
//! [colors.light]
//! background = "#fdfcf8"
//! ...
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [site]
//! title = "Field Notes"
//! url = "https://notes.example.org"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::render::RendererChoice;
use crate::summary::DEFAULT_SUMMARY_LIMIT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Identity and addressing of the published site.
    pub site: SiteInfo,
    /// Where entries live and how they are summarized.
    pub content: ContentConfig,
    /// Markdown renderer selection.
    pub render: RenderConfig,
    /// Optional outputs and their file names.
    pub output: OutputConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.site.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(
                "site.url must be an absolute http(s) URL".into(),
            ));
        }
        if !self.site.path.is_empty() && !self.site.path.starts_with('/') {
            return Err(ConfigError::Validation(
                "site.path must be empty or start with '/'".into(),
            ));
        }
        if self.content.summary_limit == 0 {
            return Err(ConfigError::Validation(
                "content.summary_limit must be greater than 0".into(),
            ));
        }
        if self.content.extension.trim().is_empty() {
            return Err(ConfigError::Validation(
                "content.extension must not be empty".into(),
            ));
        }
        if !is_js_identifier(&self.output.feed_variable) {
            return Err(ConfigError::Validation(format!(
                "output.feed_variable '{}' is not a valid JavaScript identifier",
                self.output.feed_variable
            )));
        }
        Ok(())
    }
}

fn is_js_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Identity and addressing of the published site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Site name, shown in headers and page titles.
    pub title: String,
    /// One-line subtitle under the site name.
    pub tagline: String,
    /// Author name for structured data.
    pub author: String,
    /// Absolute origin, e.g. `https://blog.example.com`.
    pub url: String,
    /// Path prefix under the origin where the site is served, e.g. `/diary`.
    pub path: String,
    /// `lang` attribute of every page.
    pub lang: String,
    /// Social preview image (site-relative or absolute URL).
    pub image: Option<String>,
    /// Footer line. Empty hides the footer text.
    pub footer: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Diary".to_string(),
            tagline: String::new(),
            author: "Anonymous".to_string(),
            url: "https://example.com".to_string(),
            path: String::new(),
            lang: "en".to_string(),
            image: None,
            footer: String::new(),
        }
    }
}

impl SiteInfo {
    /// Site-relative URL for `rel` (which starts with `/`), with the path prefix.
    pub fn local_url(&self, rel: &str) -> String {
        format!("{}{}", self.path.trim_end_matches('/'), rel)
    }

    /// Absolute URL for a site-relative `local` URL (already prefixed).
    pub fn absolute_url(&self, local: &str) -> String {
        format!("{}{}", self.url.trim().trim_end_matches('/'), local)
    }

    /// Absolute URL of the social preview image, if configured.
    pub fn image_url(&self) -> Option<String> {
        self.image.as_deref().map(|img| {
            if img.starts_with("http://") || img.starts_with("https://") {
                img.to_string()
            } else {
                let rel = format!("/{}", img.trim_start_matches('/'));
                self.absolute_url(&self.local_url(&rel))
            }
        })
    }
}

/// Where entries live and how they are summarized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    /// Diary directory, relative to the site root.
    pub diary_dir: String,
    /// File extension of entry files (without the dot).
    pub extension: String,
    /// Maximum summary length in characters (ellipsis included).
    pub summary_limit: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            diary_dir: "diaries".to_string(),
            extension: "md".to_string(),
            summary_limit: DEFAULT_SUMMARY_LIMIT,
        }
    }
}

/// Markdown renderer selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub markdown: RendererChoice,
}

/// Optional outputs and their file names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Data feed file, written to the output root.
    pub feed_file: String,
    /// Global JavaScript constant the feed assigns.
    pub feed_variable: String,
    /// Write `sitemap.xml`.
    pub sitemap: bool,
    /// Write `robots.txt` pointing at the sitemap.
    pub robots: bool,
    /// Legacy archive URL that redirects to `archive/`. Empty disables.
    pub legacy_redirect: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            feed_file: "diaries.js".to_string(),
            feed_variable: "DIARY_DATA".to_string(),
            sitemap: true,
            robots: true,
            legacy_redirect: "archives.html".to_string(),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background.
    pub background: String,
    /// Body text.
    pub text: String,
    /// Dates, captions, calendar weekdays.
    pub text_muted: String,
    /// Card and calendar borders.
    pub border: String,
    pub link: String,
    /// Calendar dot on days with an entry.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#fdfcf8".to_string(),
            text: "#222222".to_string(),
            text_muted: "#77716a".to_string(),
            border: "#e6e1d8".to_string(),
            link: "#2f5d8a".to_string(),
            accent: "#f2b705".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#141311".to_string(),
            text: "#e8e4dc".to_string(),
            text_muted: "#9a948a".to_string(),
            border: "#34312c".to_string(),
            link: "#8db8e0".to_string(),
            accent: "#f2c94c".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer that user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(config_path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given site root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    load_config_file(&root.join("config.toml"))
}

/// Like [`load_config`], for an explicit file path.
pub fn load_config_file(path: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Daybook Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file at <site root>/config.toml, or pass --config <file>.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity and addressing
# ---------------------------------------------------------------------------
[site]
title = "Diary"
tagline = ""
# Used in structured data (schema.org author).
author = "Anonymous"
# Absolute origin. Canonical URLs and the sitemap are built from url + path.
url = "https://example.com"
# Prefix the site is served under. Empty serves from the origin root;
# "/diary" gives permalinks like /diary/2024/03/10/.
path = ""
lang = "en"
# Social preview image (site-relative path or absolute URL).
# image = "/profile.jpg"
footer = ""

# ---------------------------------------------------------------------------
# Content
# ---------------------------------------------------------------------------
[content]
# Directory holding YYYY-MM-DD.<extension> files, relative to the site root.
diary_dir = "diaries"
extension = "md"
# Maximum description length in characters, ellipsis included.
summary_limit = 155

# ---------------------------------------------------------------------------
# Rendering
# ---------------------------------------------------------------------------
[render]
# "auto" uses full CommonMark when built in, otherwise the line renderer.
# "commonmark" fails the build if CommonMark support is missing.
# "fallback" always uses the line renderer (headings, lists, paragraphs).
markdown = "auto"

# ---------------------------------------------------------------------------
# Outputs
# ---------------------------------------------------------------------------
[output]
# Data feed for client-side scripts: const <feed_variable> = [...];
feed_file = "diaries.js"
feed_variable = "DIARY_DATA"
sitemap = true
robots = true
# Old archive URL that redirects to archive/. Set to "" to skip it.
legacy_redirect = "archives.html"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#fdfcf8"
text = "#222222"
text_muted = "#77716a"    # Dates, captions, weekdays
border = "#e6e1d8"
link = "#2f5d8a"
accent = "#f2b705"        # Calendar dot

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#141311"
text = "#e8e4dc"
text_muted = "#9a948a"
border = "#34312c"
link = "#8db8e0"
accent = "#f2c94c"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    let vars = |scheme: &ColorScheme, indent: &str| {
        [
            ("bg", &scheme.background),
            ("text", &scheme.text),
            ("text-muted", &scheme.text_muted),
            ("border", &scheme.border),
            ("link", &scheme.link),
            ("accent", &scheme.accent),
        ]
        .iter()
        .map(|(name, value)| format!("{indent}--color-{name}: {value};"))
        .collect::<Vec<_>>()
        .join("\n")
    };
    format!(
        ":root {{\n{}\n}}\n\n@media (prefers-color-scheme: dark) {{\n    :root {{\n{}\n    }}\n}}",
        vars(&colors.light, "    "),
        vars(&colors.dark, "        "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_site_identity() {
        let config = SiteConfig::default();
        assert_eq!(config.site.title, "Diary");
        assert_eq!(config.site.url, "https://example.com");
        assert_eq!(config.site.path, "");
    }

    #[test]
    fn default_config_has_content_settings() {
        let config = SiteConfig::default();
        assert_eq!(config.content.diary_dir, "diaries");
        assert_eq!(config.content.extension, "md");
        assert_eq!(config.content.summary_limit, 155);
        assert_eq!(config.render.markdown, RendererChoice::Auto);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[site]
title = "Field Notes"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.site.title, "Field Notes");
        // Other fields use defaults
        assert_eq!(config.site.url, "https://example.com");
        assert_eq!(config.output.feed_file, "diaries.js");
    }

    #[test]
    fn parse_renderer_choice() {
        let config: SiteConfig = toml::from_str(
            r#"
[render]
markdown = "fallback"
"#,
        )
        .unwrap();
        assert_eq!(config.render.markdown, RendererChoice::Fallback);
    }

    // =========================================================================
    // URL helpers
    // =========================================================================

    #[test]
    fn local_and_absolute_urls() {
        let mut site = SiteInfo::default();
        assert_eq!(site.local_url("/archive/"), "/archive/");
        assert_eq!(
            site.absolute_url(&site.local_url("/archive/")),
            "https://example.com/archive/"
        );

        site.path = "/diary/".to_string();
        site.url = "https://x.org/".to_string();
        assert_eq!(site.local_url("/archive/"), "/diary/archive/");
        assert_eq!(
            site.absolute_url(&site.local_url("/")),
            "https://x.org/diary/"
        );
    }

    #[test]
    fn image_url_resolution() {
        let mut site = SiteInfo::default();
        assert_eq!(site.image_url(), None);
        site.image = Some("profile.jpg".to_string());
        assert_eq!(
            site.image_url().as_deref(),
            Some("https://example.com/profile.jpg")
        );
        site.image = Some("https://cdn.example.net/me.png".to_string());
        assert_eq!(
            site.image_url().as_deref(),
            Some("https://cdn.example.net/me.png")
        );
    }

    // =========================================================================
    // Loading
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.title, "Diary");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[site]
url = "https://blog.example.org"
path = "/notes"

[content]
summary_limit = 80
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.url, "https://blog.example.org");
        assert_eq!(config.site.path, "/notes");
        assert_eq!(config.content.summary_limit, 80);
        assert_eq!(config.content.diary_dir, "diaries");
    }

    #[test]
    fn load_config_file_from_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("staging.toml");
        fs::write(&path, "[site]\ntitle = \"Staging\"\n").unwrap();
        let config = load_config_file(&path).unwrap();
        assert_eq!(config.site.title, "Staging");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[content]
summary_limit = 0
"#,
        )
        .unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str(r#"limit = 155"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"limit = 80"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("limit").unwrap().as_integer(), Some(80));
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str(
            r##"
[colors.light]
background = "#fff"
text = "#000"
"##,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r##"
[colors.light]
background = "#fafafa"
"##,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let light = merged.get("colors").unwrap().get("light").unwrap();
        assert_eq!(light.get("background").unwrap().as_str(), Some("#fafafa"));
        assert_eq!(light.get("text").unwrap().as_str(), Some("#000"));
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let toml_str = r#"
[site]
titel = "typo"
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[sitee]\ntitle = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_renderer_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[render]\nmarkdown = \"html\"\n");
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_relative_url() {
        let mut config = SiteConfig::default();
        config.site.url = "example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_path_without_leading_slash() {
        let mut config = SiteConfig::default();
        config.site.path = "diary".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_extension() {
        let mut config = SiteConfig::default();
        config.content.extension = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_feed_variable() {
        let mut config = SiteConfig::default();
        for bad in ["", "1abc", "has space", "a-b"] {
            config.output.feed_variable = bad.to_string();
            assert!(config.validate().is_err(), "{bad}");
        }
        for good in ["DATA", "_x", "$feed", "entries2"] {
            config.output.feed_variable = good.to_string();
            assert!(config.validate().is_ok(), "{good}");
        }
    }

    // =========================================================================
    // stock config
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.site.url, defaults.site.url);
        assert_eq!(config.site.image, None);
        assert_eq!(config.content.summary_limit, 155);
        assert_eq!(config.render.markdown, RendererChoice::Auto);
        assert_eq!(config.output.legacy_redirect, "archives.html");
        assert_eq!(config.colors.light.accent, defaults.colors.light.accent);
        assert_eq!(config.colors.dark.background, defaults.colors.dark.background);
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        for section in ["[site]", "[content]", "[render]", "[output]", "[colors.light]", "[colors.dark]"] {
            assert!(content.contains(section), "{section}");
        }
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        for key in ["site", "content", "render", "output", "colors"] {
            assert!(val.get(key).is_some(), "{key}");
        }
    }

    // =========================================================================
    // CSS generation
    // =========================================================================

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.light.accent = "#ff0000".to_string();
        let css = generate_color_css(&colors);
        assert!(css.contains("--color-accent: #ff0000;"));
        assert!(css.contains("--color-bg: #fdfcf8;"));
        assert!(css.contains("@media (prefers-color-scheme: dark)"));
        assert!(css.contains("--color-bg: #141311;"));
    }
}
