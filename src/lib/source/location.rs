use crate::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Location {
    pub uri: URI,
    pub offset: usize,
    pub line: usize,
    pub character: usize,
}

impl Location {
    pub fn at_offset(source: &Arc<Source>, offset: usize) -> Location {
        let offset = offset.min(source.len());
        let line_index = source.line_index(offset);
        let line_start = source.line_start(line_index);
        Location {
            uri: source.uri.clone(),
            offset,
            line: line_index + 1,
            character: source.code[line_start..offset].chars().count() + 1,
        }
    }

    pub fn at_end_of(source: &Arc<Source>) -> Location {
        Self::at_offset(source, source.len())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}:{}", self.uri, self.line, self.character)
    }
}
