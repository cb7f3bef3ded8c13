//! Full CommonMark rendering via `pulldown-cmark`.

use super::MarkdownRenderer;
use pulldown_cmark::{Options, Parser, html as md_html};

#[derive(Debug, Clone, Copy, Default)]
pub struct CommonMarkRenderer;

impl MarkdownRenderer for CommonMarkRenderer {
    fn name(&self) -> &'static str {
        "commonmark"
    }

    fn render(&self, body: &str) -> String {
        let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES;
        let parser = Parser::new_ext(body, options);
        let mut out = String::with_capacity(body.len() * 3 / 2);
        md_html::push_html(&mut out, parser);
        out
    }
}
