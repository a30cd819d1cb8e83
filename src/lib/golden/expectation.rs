use crate::syntax::*;
use crate::*;
use std::ops::Range;

const ERROR_PREFIX: &str = "error:";

#[derive(Debug, Clone, PartialEq)]
pub struct Expectation {
    pub uri: URI,
    pub line: usize,
    /// One-based character columns, end exclusive.
    pub columns: Option<Range<usize>>,
    pub message: String,
    /// Where the annotation itself is written.
    pub annotation: Span,
}

impl Expectation {
    pub fn matches(&self, diagnostic: &Diagnostic) -> bool {
        let span = diagnostic.span();
        if span.start.uri != self.uri || span.start.line != self.line {
            return false;
        }
        if diagnostic.to_string() != self.message {
            return false;
        }
        match self.columns {
            None => true,
            Some(ref columns) => {
                span.is_single_line()
                    && span.start.character == columns.start
                    && span.end.character == columns.end
            }
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.uri, self.line)?;
        if let Some(ref columns) = self.columns {
            write!(f, ":{}-{}", columns.start, columns.end)?;
        }
        write!(f, " error: {}", self.message)
    }
}

/// Reads the expectations out of the comments the parser collected.
pub fn expectations(source: &Arc<Source>, comments: &[Token]) -> Vec<Expectation> {
    comments
        .iter()
        .filter_map(|comment| expectation(source, comment))
        .collect()
}

fn expectation(source: &Arc<Source>, comment: &Token) -> Option<Expectation> {
    let text = match comment.kind {
        TokenKind::Comment(ref text) => text,
        _ => return None,
    };
    let annotation = comment.span.clone();
    let body = text.trim_start();

    if body.starts_with('^') {
        if !is_caret_line(source, annotation.start.line) {
            warn!("Caret annotation after code at {}, ignoring", annotation);
            return None;
        }
        let caret_count = body.chars().take_while(|c| *c == '^').count();
        let rest = body[caret_count..].trim_start();
        let message = rest.strip_prefix(ERROR_PREFIX)?.trim();

        // The comment text starts right after the `#`.
        let leading = text.chars().count() - body.chars().count();
        let start = annotation.start.character + 1 + leading;
        let line = (1..annotation.start.line)
            .rev()
            .find(|l| !is_caret_line(source, *l))?;

        Some(Expectation {
            uri: annotation.start.uri.clone(),
            line,
            columns: Some(start..start + caret_count),
            message: message.into(),
            annotation,
        })
    } else {
        let message = body.strip_prefix(ERROR_PREFIX)?.trim();
        Some(Expectation {
            uri: annotation.start.uri.clone(),
            line: annotation.start.line,
            columns: None,
            message: message.into(),
            annotation,
        })
    }
}

fn is_caret_line(source: &Arc<Source>, line: usize) -> bool {
    source
        .line(line)
        .map(str::trim_start)
        .and_then(|l| l.strip_prefix('#'))
        .map(|l| l.trim_start().starts_with('^'))
        .unwrap_or(false)
}
