//! Machine-readable entry feed.
//!
//! The feed is a JavaScript file assigning every entry to one global
//! constant, so client scripts on archive pages can load it with a plain
//! `<script src>`:
//!
//! ```text
//! const DIARY_DATA = [
//!   {
//!     "date": "2024-02-01",
//!     "title": "...",
//!     "content": "<p>...</p>",
//!     "raw": "...",
//!     "permalink": "/2024/02/01/",
//!     "canonical": "https://example.com/2024/02/01/",
//!     "description": "..."
//!   }
//! ];
//! ```
//!
//! Records appear in the order given, which is newest first when fed from a
//! [`ChronoIndex`](crate::index::ChronoIndex). Non-ASCII text is written as is.

use crate::entry::Entry;

/// Serialize `entries` as `const {variable} = [...];`.
pub fn render_feed(entries: &[Entry], variable: &str) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string_pretty(entries)?;
    Ok(format!("const {variable} = {json};\n"))
}
