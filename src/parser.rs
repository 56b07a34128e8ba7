pub mod docx;

use crate::ParseError;
use std::path::Path;

/// An ordered unit of translatable text: a document paragraph or a page line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Segment(pub String);

impl Segment {
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for Segment {
    fn from(s: &str) -> Self {
        Segment(s.to_owned())
    }
}

pub trait Parser {
    /// Every paragraph of the input in document order, blank ones included.
    async fn parse(&self, input: &Path) -> Result<Vec<Segment>, ParseError>;
}
