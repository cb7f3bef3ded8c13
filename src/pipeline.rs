//! Build orchestration.
//!
//! One synchronous pass over the site:
//!
//! ```text
//! scan      diaries/*.md  →  Vec<RawEntry>
//! load      RawEntry      →  Vec<Entry>       (title, body, html, summary, urls)
//! index     Vec<Entry>    →  ChronoIndex      (newest first, month buckets)
//! generate  ChronoIndex   →  dist/            (pages, feed, sitemap, assets)
//! ```
//!
//! [`check`] runs the first three stages and writes nothing. [`build`] runs
//! all four. Either the whole run succeeds or it stops at the first error;
//! files already written are left in place.
//!
//! Every failure surfaces as a [`BuildError`], and [`BuildError::kind`]
//! sorts it into configuration, input, output, or internal problems so the
//! CLI can pick an exit code.

use crate::config::{ConfigError, SiteConfig};
use crate::entry::{self, LoadError};
use crate::generate::{self, GenerateError, Generated};
use crate::index::{ChronoIndex, IndexError};
use crate::render::{self, RenderError};
use crate::scan::{self, ScanError};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;

/// Where to read the site from and where to write it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Site root holding `config.toml` and the diary directory.
    pub source: PathBuf,
    /// Output directory, created if missing.
    pub output: PathBuf,
}

impl Paths {
    pub fn new(source: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
        }
    }

    /// The diary directory for `config`, under the source root.
    pub fn diary_dir(&self, config: &SiteConfig) -> PathBuf {
        self.source.join(&config.content.diary_dir)
    }
}

/// Broad class of a [`BuildError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or unsatisfiable configuration.
    Configuration,
    /// Bad diary input: malformed names, duplicate dates, unreadable files.
    Input,
    /// The site could not be written.
    Output,
    /// A broken invariant. Always a bug.
    Internal,
}

impl ErrorKind {
    /// Process exit code for this kind.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Configuration => 2,
            ErrorKind::Input => 3,
            ErrorKind::Output => 4,
            ErrorKind::Internal => 70,
        }
    }
}

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

impl BuildError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BuildError::Config(_) | BuildError::Render(_) => ErrorKind::Configuration,
            BuildError::Scan(_) | BuildError::Load(_) => ErrorKind::Input,
            BuildError::Generate(GenerateError::Write { .. }) => ErrorKind::Output,
            BuildError::Generate(GenerateError::Json(_)) | BuildError::Index(_) => {
                ErrorKind::Internal
            }
        }
    }
}

/// Result of [`check`]: everything known about the site before writing.
#[derive(Debug)]
pub struct Inventory {
    pub index: ChronoIndex,
    /// Name of the markdown renderer in use.
    pub renderer: &'static str,
    pub diary_dir: PathBuf,
}

/// Result of [`build`].
#[derive(Debug)]
pub struct BuildReport {
    pub inventory: Inventory,
    pub generated: Generated,
    pub output: PathBuf,
}

/// Scan, load, and index the diary without writing anything.
pub fn check(config: &SiteConfig, paths: &Paths) -> Result<Inventory, BuildError> {
    let renderer = render::select_renderer(config.render.markdown)?;
    tracing::info!(renderer = renderer.name(), "selected markdown renderer");

    let diary_dir = paths.diary_dir(config);
    let raws = scan::scan(&diary_dir, &config.content.extension)?;
    tracing::info!(dir = %diary_dir.display(), files = raws.len(), "scanned diary");

    let entries = entry::load(raws, renderer.as_ref(), config)?;
    let index = ChronoIndex::new(entries);
    index.verify()?;
    tracing::info!(
        entries = index.len(),
        months = index.months().len(),
        "indexed entries"
    );

    Ok(Inventory {
        index,
        renderer: renderer.name(),
        diary_dir,
    })
}

/// Run the full pipeline, stamping the sitemap with the current time.
pub fn build(config: &SiteConfig, paths: &Paths) -> Result<BuildReport, BuildError> {
    build_at(config, paths, Utc::now())
}

/// Like [`build`], with an explicit generation timestamp.
pub fn build_at(
    config: &SiteConfig,
    paths: &Paths,
    generated_at: DateTime<Utc>,
) -> Result<BuildReport, BuildError> {
    let inventory = check(config, paths)?;
    let generated = generate::generate(&inventory.index, config, &paths.output, generated_at)?;
    Ok(BuildReport {
        inventory,
        generated,
        output: paths.output.clone(),
    })
}
