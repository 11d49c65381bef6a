//! Plugin to parse PmWiki footnote markers.
//!
//! One scanner handles every marker shape, in document order:
//!
//! - `[^#1 text^]` — define footnote 1 and cite it
//! - `[^some words^]` — define an auto-numbered footnote and cite it
//! - `[^1^]` (or `[^#1^]`) — cite footnote 1 again, wherever it is defined
//! - `[^@^]` — placeholder for the collected listing
//!
//! ```
//! use pmwiki_footnotes::inline::FootnoteCitation;
//!
//! let parser = &mut markdown_it::MarkdownIt::new();
//! markdown_it::plugins::cmark::add(parser);
//! pmwiki_footnotes::add(parser);
//!
//! let root = parser.parse("Fact.[^#2 a supporting note^] Again.[^2^]");
//! let mut citations = vec![];
//! root.walk(|node, _| {
//!     if let Some(cite) = node.cast::<FootnoteCitation>() {
//!         citations.push((cite.identity, cite.ordinal));
//!     }
//! });
//! assert_eq!(citations, vec![(2, 1), (2, 2)]);
//! ```
use markdown_it::parser::inline::{InlineRule, InlineState};
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::inject::FootnotesContainerNode;
use crate::registry::FootnoteRegistry;

/// The whole marker on one line: `[^` inner `^]`, shortest inner wins.
static FOOTNOTE_MARKER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[\^(.+?)\^\]").unwrap());

/// Add the footnote marker parsing to the markdown parser
pub fn add(md: &mut MarkdownIt) {
    // insert this rule into inline subparser
    md.inline.add_rule::<FootnoteInlineScanner>();
}

#[derive(Debug)]
/// AST node for one citation anchor.
///
/// `ordinal` is the 1-based sequence number of this citation among all
/// citations of the same identity, giving each citation site its own
/// `fn{identity}-{ordinal}` anchor for the listing to link back to.
pub struct FootnoteCitation {
    pub identity: usize,
    pub ordinal: usize,
}

impl NodeValue for FootnoteCitation {
    fn render(&self, node: &Node, fmt: &mut dyn Renderer) {
        let mut attrs = node.attrs.clone();
        attrs.push(("class", "footnote-ref".into()));

        fmt.open("sup", &attrs);
        fmt.open(
            "a",
            &[
                ("id", format!("fn{}-{}", self.identity, self.ordinal)),
                ("href", format!("#fn{}-0", self.identity)),
            ],
        );
        fmt.text(&format!("{}", self.identity));
        fmt.close("a");
        fmt.close("sup");
    }
}

// What one marker's inner text turned out to mean.
enum Marker<'a> {
    Listing,
    Definition { identity: usize, text: &'a str },
    AutoDefinition { text: &'a str },
    Citation { identity: usize },
}

// This is an extension for the inline subparser.
struct FootnoteInlineScanner;

impl InlineRule for FootnoteInlineScanner {
    const MARKER: char = '[';

    // check() must not touch the registry; the inline parser probes with it
    // while validating enclosing constructs, and a probe is not a citation.
    fn check(state: &mut InlineState) -> Option<usize> {
        let input = &state.src[state.pos..state.pos_max];
        let caps = FOOTNOTE_MARKER_REGEX.captures(input)?;
        classify(caps.get(1)?.as_str())?;
        Some(caps[0].len())
    }

    fn run(state: &mut InlineState) -> Option<(Node, usize)> {
        let input = &state.src[state.pos..state.pos_max];
        if !input.starts_with(Self::MARKER) {
            return None;
        }
        let caps = FOOTNOTE_MARKER_REGEX.captures(input)?;
        let length = caps[0].len();

        let node = match classify(caps.get(1)?.as_str())? {
            Marker::Listing => Node::new(FootnotesContainerNode),
            Marker::Definition { identity, text } => {
                let text = text.to_owned();
                let registry = state.root_ext.get_or_insert_default::<FootnoteRegistry>();
                registry.define_footnote(identity, text);
                let ordinal = registry.record_citation(identity);
                Node::new(FootnoteCitation { identity, ordinal })
            }
            Marker::AutoDefinition { text } => {
                let text = text.to_owned();
                let registry = state.root_ext.get_or_insert_default::<FootnoteRegistry>();
                let identity = registry.next_auto_identity();
                registry.define_footnote(identity, text);
                let ordinal = registry.record_citation(identity);
                Node::new(FootnoteCitation { identity, ordinal })
            }
            Marker::Citation { identity } => {
                let registry = state.root_ext.get_or_insert_default::<FootnoteRegistry>();
                let ordinal = registry.record_citation(identity);
                Node::new(FootnoteCitation { identity, ordinal })
            }
        };

        Some((node, length))
    }
}

fn classify(inner: &str) -> Option<Marker<'_>> {
    if inner == "@" {
        return Some(Marker::Listing);
    }

    let mut tokens = inner.split_whitespace();
    let first = tokens.next()?;

    if tokens.next().is_none() {
        // a lone token is a citation of an existing identity; the leading
        // `#` is optional here
        let digits = first.strip_prefix('#').unwrap_or(first);
        let identity = parse_identity(digits)?;
        return Some(Marker::Citation { identity });
    }

    if let Some(digits) = first.strip_prefix('#') {
        let identity = parse_identity(digits)?;
        let (_, rest) = inner.split_once(char::is_whitespace)?;
        return Some(Marker::Definition {
            identity,
            text: rest.trim_start(),
        });
    }

    // multi-word inner with no explicit number: the whole text is the body
    Some(Marker::AutoDefinition { text: inner })
}

// Identities are compared as numbers everywhere, so normalize right at the
// match; "10" must never sort before "2".
fn parse_identity(digits: &str) -> Option<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
