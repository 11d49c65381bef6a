//! Plugin to populate footnote listing placeholders.
//!
//! After inline parsing is done, every `[^@^]` placeholder left in the tree
//! receives the full listing: one entry per defined footnote in ascending
//! identity order, each carrying back-links to every place it was cited.
//! A document with no placeholder simply never shows its listing.
//!
//! ```
//! let parser = &mut markdown_it::MarkdownIt::new();
//! markdown_it::plugins::cmark::add(parser);
//! pmwiki_footnotes::add(parser);
//!
//! let html = parser.parse("Fact.[^#1 a note^]\n\n[^@^]\n").render();
//! assert!(html.contains(r#"<div class="footnotes">"#));
//! assert!(html.contains(r#"<p id="fn1-0">"#));
//! assert!(html.contains(r##"<a href="#fn1-1">1 </a>"##));
//! ```
use markdown_it::parser::core::{CoreRule, Root};
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};

use crate::registry::FootnoteRegistry;

/// Add the listing injection to the markdown parser
pub fn add(md: &mut MarkdownIt) {
    // insert this rule into parser
    md.add_rule::<FootnoteInjectRule>();
}

#[derive(Debug)]
/// AST node for the listing placeholder, empty until injection runs.
pub struct FootnotesContainerNode;

impl NodeValue for FootnotesContainerNode {
    fn render(&self, node: &Node, fmt: &mut dyn Renderer) {
        let mut attrs = node.attrs.clone();
        attrs.push(("class", "footnotes".into()));
        fmt.cr();
        fmt.open("div", &attrs);
        fmt.cr();
        fmt.contents(&node.children);
        fmt.cr();
        fmt.close("div");
        fmt.cr();
    }
}

#[derive(Debug, Clone)]
/// AST node for one listing entry: the `fn{identity}-0` anchor, one
/// back-link per citation, and the footnote body.
pub struct FootnoteEntry {
    pub identity: usize,
    pub citations: usize,
    pub text: String,
}

impl NodeValue for FootnoteEntry {
    fn render(&self, _: &Node, fmt: &mut dyn Renderer) {
        fmt.open("p", &[("id", format!("fn{}-0", self.identity))]);
        fmt.open("sup", &[]);
        fmt.text(&format!("{}", self.identity));
        fmt.close("sup");
        fmt.text(" (");
        fmt.open("span", &[("class", "fn-backlinks".into())]);
        for ordinal in 1..=self.citations {
            fmt.open(
                "a",
                &[("href", format!("#fn{}-{}", self.identity, ordinal))],
            );
            fmt.text(&format!("{} ", ordinal));
            fmt.close("a");
        }
        fmt.close("span");
        fmt.text(") ");
        fmt.open("span", &[]);
        fmt.text(&self.text);
        fmt.close("span");
        fmt.close("p");
        fmt.cr();
    }
}

// This is an extension for the markdown parser.
struct FootnoteInjectRule;

impl CoreRule for FootnoteInjectRule {
    // Invoked once per document, after inline parsing has filled the
    // registry. Every placeholder gets an identical copy of the listing.
    fn run(root: &mut Node, _: &MarkdownIt) {
        let registry = match root.cast::<Root>().unwrap().ext.get::<FootnoteRegistry>() {
            Some(registry) => registry,
            // no marker was ever parsed, nothing to inject
            None => return,
        };

        let entries: Vec<FootnoteEntry> = registry
            .list_footnotes()
            .map(|(identity, text)| FootnoteEntry {
                identity,
                citations: registry.citation_count(identity),
                text: text.to_owned(),
            })
            .collect();
        if entries.is_empty() {
            return;
        }

        root.walk_mut(|node, _| {
            if !node.is::<FootnotesContainerNode>() {
                return;
            }
            for entry in &entries {
                node.children.push(Node::new(entry.clone()));
            }
        });
    }
}
