//! Markdown → HTML fragment rendering.
//!
//! The [`MarkdownRenderer`] trait has two implementations:
//!
//! | Renderer | Availability | Coverage |
//! |---|---|---|
//! | [`CommonMarkRenderer`] | `commonmark` feature (default) | full CommonMark + tables, strikethrough |
//! | [`LineRenderer`] | always | headings, `- ` lists, paragraphs |
//!
//! The choice is made once, at startup, by [`select_renderer`]. Call sites
//! only ever see a `&dyn MarkdownRenderer`.
//!
//! The two renderers do not produce identical output: the line renderer
//! leaves inline markup as escaped text and ignores everything but the four
//! constructs it knows. Sites built without the `commonmark` feature will
//! look plainer, not broken.

#[cfg(feature = "commonmark")]
mod commonmark;
pub mod line;

#[cfg(feature = "commonmark")]
pub use commonmark::CommonMarkRenderer;
pub use line::LineRenderer;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("markdown renderer '{0}' is not available in this build")]
    Unavailable(&'static str),
}

/// Converts an entry body to an HTML fragment.
pub trait MarkdownRenderer {
    /// Short identifier shown in build output.
    fn name(&self) -> &'static str;

    fn render(&self, body: &str) -> String;
}

/// Which renderer the site config asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererChoice {
    /// CommonMark when compiled in, otherwise the line renderer.
    #[default]
    Auto,
    CommonMark,
    Fallback,
}

/// Whether the full CommonMark renderer was compiled into this binary.
pub const fn commonmark_available() -> bool {
    cfg!(feature = "commonmark")
}

pub fn select_renderer(choice: RendererChoice) -> Result<Box<dyn MarkdownRenderer>, RenderError> {
    match choice {
        RendererChoice::Fallback => Ok(Box::new(LineRenderer)),
        RendererChoice::CommonMark => {
            commonmark_renderer().ok_or(RenderError::Unavailable("commonmark"))
        }
        RendererChoice::Auto => Ok(commonmark_renderer().unwrap_or_else(|| {
            tracing::warn!("commonmark support not compiled in, using line renderer");
            Box::new(LineRenderer)
        })),
    }
}

#[cfg(feature = "commonmark")]
fn commonmark_renderer() -> Option<Box<dyn MarkdownRenderer>> {
    Some(Box::new(CommonMarkRenderer))
}

#[cfg(not(feature = "commonmark"))]
fn commonmark_renderer() -> Option<Box<dyn MarkdownRenderer>> {
    None
}
