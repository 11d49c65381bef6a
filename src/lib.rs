// useful asserts that's off by default
#![warn(clippy::manual_assert)]
#![warn(clippy::semicolon_if_nothing_returned)]
//
// these are often intentionally not collapsed for readability
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::collapsible_if)]
//
// just a style choice that clippy has no business complaining about
#![allow(clippy::uninlined_format_args)]

//! A [markdown_it] plugin for PmWiki-style footnotes.
//!
//! PmWiki marks footnotes up inline: `[^#1 text^]` defines footnote 1 and
//! cites it on the spot, `[^1^]` cites it again, a multi-word `[^some text^]`
//! defines an auto-numbered footnote, and `[^@^]` marks where the collected
//! listing should appear. Every citation gets its own anchor (`fn1-1`,
//! `fn1-2`, ...) so the listing can link back to each place a footnote was
//! cited, not just the first one.
//!
//! ```
//! let parser = &mut markdown_it::MarkdownIt::new();
//! markdown_it::plugins::cmark::add(parser);
//! pmwiki_footnotes::add(parser);
//!
//! let html = parser
//!     .parse("Fact.[^#1 A source^] Restated.[^1^]\n\n[^@^]\n")
//!     .render();
//! assert!(html.contains(r##"<a id="fn1-1" href="#fn1-0">1</a>"##));
//! assert!(html.contains(r##"<a id="fn1-2" href="#fn1-0">1</a>"##));
//! assert!(html.contains(r##"<a href="#fn1-2">2 </a>"##));
//! ```
//!
//! The components can also be loaded separately:
//!
//! - [`inline`]: parse footnote markers and emit citation anchors
//! - [`inject`]: populate listing placeholders with collected footnotes
//!
//! All per-document state lives in [`FootnoteRegistry`], stored in the root
//! node of the parse in progress, so one parser instance can render any
//! number of documents without footnotes bleeding between them.

use markdown_it::MarkdownIt;

pub mod inject;
pub mod inline;
pub mod registry;

pub use registry::FootnoteRegistry;

/// Add the full PmWiki footnote plugin to the parser
pub fn add(md: &mut MarkdownIt) {
    inline::add(md);
    inject::add(md);
}
