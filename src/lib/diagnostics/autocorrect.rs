use crate::*;
use serde::Serialize;

/// A suggested edit: replace the text under `span` with `replacement`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Autocorrect {
    pub title: String,
    pub span: Span,
    pub replacement: String,
}

impl Autocorrect {
    pub fn new<T: Into<String>, R: Into<String>>(title: T, span: Span, replacement: R) -> Autocorrect {
        Autocorrect {
            title: title.into(),
            span,
            replacement: replacement.into(),
        }
    }

    /// The first line touched by the edit, as it reads after applying it.
    pub fn preview(&self, source: &Source) -> Option<String> {
        let first = source.line(self.span.start.line)?;
        let last = source.line(self.span.end.line)?;
        let before: String = first.chars().take(self.span.start.character - 1).collect();
        let after: String = last.chars().skip(self.span.end.character - 1).collect();
        Some(format!("{}{}{}", before, self.replacement, after))
    }
}
