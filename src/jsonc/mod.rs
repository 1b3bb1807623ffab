//! Comment-preserving structural edits over JSON-with-comments text.
//!
//! The parser keeps byte spans for every node so edits splice the
//! smallest possible region of the original text instead of
//! reserializing the document.

mod edit;
mod parser;

pub use edit::{EditOutcome, remove_at_path, set_at_path};
pub use parser::{Member, Node, NodeKind, ParseError, parse};

/// One step into the JSON tree: an object key or array index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSeg {
    Key(String),
    Index(usize),
}

impl PathSeg {
    pub fn key<T: Into<String>>(key: T) -> Self {
        Self::Key(key.into())
    }
}
