//! Plain-text summaries for meta descriptions and the data feed.
//!
//! [`summarize`] strips markdown decoration from an entry body and cuts the
//! result to a fixed character budget:
//!
//! ```text
//! "Some **content** here."   →  "Some content here."
//! "See [docs](https://x) ok" →  "See ok"
//! ```
//!
//! Link and image references are dropped entirely, text included, so a
//! summary never carries bracket punctuation. Structural markers (`#`, `>`,
//! `*`, `_`, `-`) become spaces rather than disappearing, which keeps
//! `foo-bar` from collapsing into `foobar`.

use regex::Regex;
use std::sync::LazyLock;

/// Character budget used for `<meta name="description">` and the feed.
pub const DEFAULT_SUMMARY_LIMIT: usize = 155;

/// Appended when a summary is truncated.
pub const ELLIPSIS: char = '\u{2026}';

static FENCED_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[\s\S]*?```").expect("valid regex"));
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]*)`").expect("valid regex"));
static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").expect("valid regex"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]\([^)]*\)").expect("valid regex"));
static MARKERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[#>*_\-]").expect("valid regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Reduce markdown `text` to a single line of plain text of at most `limit`
/// characters.
///
/// When the cleaned text is longer than `limit`, the first `limit - 1`
/// characters are kept, trailing whitespace is trimmed, and [`ELLIPSIS`] is
/// appended. The cut is by character, not by word.
pub fn summarize(text: &str, limit: usize) -> String {
    let text = FENCED_CODE.replace_all(text, "");
    let text = INLINE_CODE.replace_all(&text, "$1");
    let text = IMAGE.replace_all(&text, "");
    let text = LINK.replace_all(&text, "");
    let text = MARKERS.replace_all(&text, " ");
    let text = WHITESPACE.replace_all(&text, " ");
    let text = text.trim();

    if text.chars().count() <= limit {
        return text.to_string();
    }
    if limit == 0 {
        return String::new();
    }

    let mut cut: String = text.chars().take(limit - 1).collect();
    cut.truncate(cut.trim_end().len());
    cut.push(ELLIPSIS);
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emphasis_markers_become_spaces() {
        assert_eq!(
            summarize("Some **content** here.", DEFAULT_SUMMARY_LIMIT),
            "Some content here."
        );
    }

    #[test]
    fn fenced_code_removed_entirely() {
        let text = "Before\n```rust\nfn main() {}\n```\nAfter";
        assert_eq!(summarize(text, 155), "Before After");
    }

    #[test]
    fn fenced_code_is_non_greedy() {
        let text = "a ```x``` b ```y``` c";
        assert_eq!(summarize(text, 155), "a b c");
    }

    #[test]
    fn inline_code_keeps_inner_text() {
        assert_eq!(summarize("run `cargo build` now", 155), "run cargo build now");
    }

    #[test]
    fn images_removed_with_alt_text() {
        assert_eq!(summarize("look ![a cat](cat.png) here", 155), "look here");
    }

    #[test]
    fn links_removed_with_link_text() {
        assert_eq!(
            summarize("see [the docs](https://example.com) later", 155),
            "see later"
        );
    }

    #[test]
    fn dashes_do_not_concatenate_words() {
        assert_eq!(summarize("well-known", 155), "well known");
    }

    #[test]
    fn headings_quotes_and_lists_stripped() {
        let text = "## Plan\n> quoted\n- one\n- two\n_under_";
        assert_eq!(summarize(text, 155), "Plan quoted one two under");
    }

    #[test]
    fn whitespace_collapsed_and_trimmed() {
        assert_eq!(summarize("  a\n\n\tb   c  ", 155), "a b c");
    }

    #[test]
    fn short_text_returned_unchanged() {
        let text = "x".repeat(155);
        assert_eq!(summarize(&text, 155), text);
    }

    #[test]
    fn long_text_truncated_with_ellipsis() {
        let text = "x".repeat(200);
        let s = summarize(&text, 155);
        assert_eq!(s.chars().count(), 155);
        assert!(s.ends_with(ELLIPSIS));
    }

    #[test]
    fn truncation_trims_whitespace_before_ellipsis() {
        // char 9 (index 8) is a space and becomes the tail of the cut
        let s = summarize("abcdefgh ijklmnop", 10);
        assert_eq!(s, "abcdefgh\u{2026}");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let text = "가".repeat(10);
        let s = summarize(&text, 5);
        assert_eq!(s, "가가가가\u{2026}");
    }

    #[test]
    fn truncation_may_cut_mid_word() {
        assert_eq!(summarize("hello world", 4), "hel\u{2026}");
    }

    #[test]
    fn empty_input_yields_empty_summary() {
        assert_eq!(summarize("", 155), "");
        assert_eq!(summarize("```only code```", 155), "");
    }

    #[test]
    fn zero_limit_yields_empty_summary() {
        assert_eq!(summarize("anything", 0), "");
    }
}
