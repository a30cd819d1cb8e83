use crate::*;
use std::fmt;
use std::io::{self, Read};
use std::path::PathBuf;

pub struct Source {
    pub uri: URI,
    pub code: String,
    line_starts: Vec<usize>,
}

impl Source {
    pub fn new(uri: URI, code: String) -> Arc<Source> {
        let line_starts = std::iter::once(0)
            .chain(code.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Arc::new(Source {
            uri,
            code,
            line_starts,
        })
    }

    pub fn file(path: PathBuf) -> io::Result<Arc<Source>> {
        let code = std::fs::read_to_string(&path)?;
        Ok(Self::new(URI::File(path), code))
    }

    pub fn stdin() -> io::Result<Arc<Source>> {
        let mut code = String::new();
        io::stdin().read_to_string(&mut code)?;
        Ok(Self::new(URI::Stdin, code))
    }

    pub fn files<S: AsRef<str>>(s: S) -> io::Result<Vec<Arc<Source>>> {
        let mut sources = vec![];
        match glob::glob(s.as_ref()) {
            Ok(paths) => {
                for path in paths {
                    if let Ok(path) = path {
                        sources.push(Self::file(path)?);
                    }
                }
            }
            Err(e) => warn!("Invalid source pattern {:?}: {}", s.as_ref(), e),
        }
        Ok(sources)
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    /// The zero-based line index containing the byte offset.
    pub fn line_index(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        }
    }

    pub fn line_start(&self, line_index: usize) -> usize {
        self.line_starts
            .get(line_index)
            .cloned()
            .unwrap_or_else(|| self.code.len())
    }

    /// The text of a one-based line, without its line terminator.
    pub fn line(&self, line: usize) -> Option<&str> {
        if line == 0 || line > self.line_starts.len() {
            return None;
        }
        let start = self.line_starts[line - 1];
        let end = self
            .line_starts
            .get(line)
            .map(|next| next - 1)
            .unwrap_or_else(|| self.code.len());
        Some(self.code[start..end].trim_end_matches('\r'))
    }

    pub fn slice(&self, span: &Span) -> &str {
        &self.code[span.start.offset..span.end.offset]
    }

    #[cfg(test)]
    pub fn test(code: &str) -> Arc<Source> {
        Self::new(URI::Test, code.into())
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.uri)
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Source({})", self.uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_of_source() {
        let source = Source::test("module A\r\n  A1 = type_member\nend");
        assert_eq!(source.line(1), Some("module A"));
        assert_eq!(source.line(2), Some("  A1 = type_member"));
        assert_eq!(source.line(3), Some("end"));
        assert_eq!(source.line(4), None);
        assert_eq!(source.line(0), None);
    }

    #[test]
    fn line_index_of_offsets() {
        let source = Source::test("ab\ncd\n");
        assert_eq!(source.line_index(0), 0);
        assert_eq!(source.line_index(2), 0);
        assert_eq!(source.line_index(3), 1);
        assert_eq!(source.line_index(6), 2);
    }
}
