//! Per-render footnote bookkeeping.

use std::collections::{BTreeMap, HashMap};

use markdown_it::parser::extset::RootExt;

#[derive(Debug, Default)]
/// Footnote bodies and citation counts for one document render,
/// stored in the root node.
///
/// Identities are plain numbers. Explicit markers supply them (`[^#4 ...^]`),
/// auto-numbered markers get [`FootnoteRegistry::next_auto_identity`], and
/// both kinds end up in the same numeric keyspace so the final listing sorts
/// numerically rather than by insertion order.
pub struct FootnoteRegistry {
    notes: BTreeMap<usize, String>,
    citations: HashMap<usize, usize>,
}

impl RootExt for FootnoteRegistry {}

impl FootnoteRegistry {
    /// Insert or overwrite the body for `identity`.
    /// A later definition with the same identity wins.
    pub fn define_footnote(&mut self, identity: usize, text: impl Into<String>) {
        self.notes.insert(identity, text.into());
    }

    /// Count one more citation of `identity` and return the new count,
    /// which is the 1-based ordinal of this citation.
    pub fn record_citation(&mut self, identity: usize) -> usize {
        let count = self.citations.entry(identity).or_insert(0);
        *count += 1;
        *count
    }

    /// One greater than the highest defined identity, or 1 if nothing is
    /// defined yet. Explicit definitions count, so auto-numbering never
    /// collides with a `#N` already seen.
    pub fn next_auto_identity(&self) -> usize {
        match self.notes.last_key_value() {
            Some((&identity, _)) => identity + 1,
            None => 1,
        }
    }

    /// How many citations of `identity` have been recorded, 0 if none.
    pub fn citation_count(&self, identity: usize) -> usize {
        self.citations.get(&identity).copied().unwrap_or(0)
    }

    /// All defined footnotes in ascending identity order.
    pub fn list_footnotes(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.notes
            .iter()
            .map(|(&identity, text)| (identity, text.as_str()))
    }

    /// Clear all entries and counters. A registry owned by the parser's root
    /// extension set starts empty on every parse; this is for hosts that hold
    /// a registry of their own across renders.
    pub fn reset(&mut self) {
        self.notes.clear();
        self.citations.clear();
    }
}
