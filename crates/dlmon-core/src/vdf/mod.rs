//! Valve KeyValues (VDF) text format, as used by `appmanifest_<id>.acf`.
//!
//! Only what the monitor needs: a tree of string values and sections with
//! case-insensitive lookup, plus a typed view over the app manifest.

mod manifest;
mod parse;

pub use manifest::{AppManifest, ManifestProgress};
pub use parse::{parse, VdfError};

/// A value in a KeyValues document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Value(String),
    Section(Section),
}

/// Ordered key/node pairs. Duplicate keys are kept; lookups return the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    entries: Vec<(String, Node)>,
}

impl Section {
    pub(crate) fn push(&mut self, key: String, node: Node) {
        self.entries.push((key, node));
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, n)| n)
    }

    /// String value of `key`, if present and not a section.
    pub fn value(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            Node::Value(v) => Some(v),
            Node::Section(_) => None,
        }
    }

    pub fn section(&self, key: &str) -> Option<&Section> {
        match self.get(key)? {
            Node::Section(s) => Some(s),
            Node::Value(_) => None,
        }
    }
}
