//! Line-based fallback renderer.
//!
//! Understands exactly four constructs, one per line:
//!
//! | Line (after trimming) | Output |
//! |---|---|
//! | blank | ends the current paragraph |
//! | `# `, `## `, `### ` | `<h1>`..`<h3>` |
//! | `- ` | `<li>`, consecutive items wrapped in one `<ul>` |
//! | anything else | joined with spaces into a `<p>` |
//!
//! Inline markup (emphasis, code spans, links) is not interpreted and comes
//! out as escaped literal text.
//!
//! The scan is a small state machine. [`classify`] turns a line into a
//! [`LineKind`], [`step`] folds it into the current [`State`] and returns any
//! finished [`Block`]s, and [`finish`] flushes whatever is left at end of
//! input. All three are pure, so every transition can be tested alone.

use super::MarkdownRenderer;
use maud::{Markup, Render, html};

/// What a single trimmed line contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Heading(u8, &'a str),
    Item(&'a str),
    Text(&'a str),
}

/// Scanner state between lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    Idle,
    /// Collecting paragraph lines until a blank line or a structural line.
    Paragraph(Vec<String>),
    /// Inside a run of list items. Blank lines do not end the run.
    List(Vec<String>),
}

/// A finished block, ready to render. Text is unescaped until rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(String),
    Heading(u8, String),
    List(Vec<String>),
}

impl Render for Block {
    fn render(&self) -> Markup {
        match self {
            Block::Paragraph(text) => html! { p { (text) } },
            Block::Heading(1, text) => html! { h1 { (text) } },
            Block::Heading(2, text) => html! { h2 { (text) } },
            Block::Heading(_, text) => html! { h3 { (text) } },
            Block::List(items) => html! {
                ul {
                    @for item in items {
                        li { (item) }
                    }
                }
            },
        }
    }
}

pub fn classify(line: &str) -> LineKind<'_> {
    let s = line.trim();
    if s.is_empty() {
        LineKind::Blank
    } else if let Some(rest) = s.strip_prefix("### ") {
        LineKind::Heading(3, rest.trim())
    } else if let Some(rest) = s.strip_prefix("## ") {
        LineKind::Heading(2, rest.trim())
    } else if let Some(rest) = s.strip_prefix("# ") {
        LineKind::Heading(1, rest.trim())
    } else if let Some(rest) = s.strip_prefix("- ") {
        LineKind::Item(rest.trim())
    } else {
        LineKind::Text(s)
    }
}

/// Close `state`, returning the block it was building (if any).
fn close(state: State) -> Option<Block> {
    match state {
        State::Idle => None,
        State::Paragraph(lines) => {
            let text = lines.join(" ");
            (!text.trim().is_empty()).then_some(Block::Paragraph(text))
        }
        State::List(items) => Some(Block::List(items)),
    }
}

/// Fold one line into the scanner state.
pub fn step(state: State, line: LineKind<'_>) -> (State, Vec<Block>) {
    match (state, line) {
        (State::List(items), LineKind::Blank) => (State::List(items), Vec::new()),
        (state, LineKind::Blank) => (State::Idle, close(state).into_iter().collect()),

        (state, LineKind::Heading(level, text)) => {
            let mut out: Vec<Block> = close(state).into_iter().collect();
            out.push(Block::Heading(level, text.to_string()));
            (State::Idle, out)
        }

        (State::List(mut items), LineKind::Item(text)) => {
            items.push(text.to_string());
            (State::List(items), Vec::new())
        }
        (state, LineKind::Item(text)) => (
            State::List(vec![text.to_string()]),
            close(state).into_iter().collect(),
        ),

        (State::Paragraph(mut lines), LineKind::Text(text)) => {
            lines.push(text.to_string());
            (State::Paragraph(lines), Vec::new())
        }
        (state, LineKind::Text(text)) => (
            State::Paragraph(vec![text.to_string()]),
            close(state).into_iter().collect(),
        ),
    }
}

/// Flush at end of input.
pub fn finish(state: State) -> Vec<Block> {
    close(state).into_iter().collect()
}

/// Run the state machine over `body`.
pub fn parse_blocks(body: &str) -> Vec<Block> {
    let mut state = State::Idle;
    let mut blocks = Vec::new();
    for line in body.lines() {
        let (next, emitted) = step(state, classify(line));
        blocks.extend(emitted);
        state = next;
    }
    blocks.extend(finish(state));
    blocks
}

/// Restricted-subset renderer used when CommonMark support is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineRenderer;

impl MarkdownRenderer for LineRenderer {
    fn name(&self) -> &'static str {
        "line"
    }

    fn render(&self, body: &str) -> String {
        let blocks = parse_blocks(body);
        html! {
            @for block in &blocks {
                (block)
            }
        }
        .into_string()
    }
}
