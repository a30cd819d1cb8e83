use crate::*;

#[derive(Debug, Clone, PartialEq)]
pub enum PositionalArgKind {
    /// `:name`
    Symbol(String),
    Other(String),
}

#[derive(Debug, Clone)]
pub struct PositionalArg {
    pub kind: PositionalArgKind,
    pub span: Span,
}

impl PositionalArg {
    pub fn lexeme(&self) -> String {
        match self.kind {
            PositionalArgKind::Symbol(ref s) => format!(":{}", s),
            PositionalArgKind::Other(ref s) => s.clone(),
        }
    }
}

/// The source text of an argument expression.
#[derive(Debug, Clone)]
pub struct ArgumentValue {
    pub text: String,
    pub span: Span,
}

/// `keyword: value`
#[derive(Debug, Clone)]
pub struct KeywordArg {
    pub keyword: String,
    pub keyword_span: Span,
    pub value: ArgumentValue,
}

impl KeywordArg {
    pub fn span(&self) -> Span {
        self.keyword_span.through(&self.value.span)
    }
}

/// Keyword arguments in source order. Keys are unique; the parser
/// rejects a repeated keyword before it gets here.
#[derive(Debug, Clone, Default)]
pub struct KeywordArgs(Vec<KeywordArg>);

impl KeywordArgs {
    pub fn new() -> KeywordArgs {
        KeywordArgs(vec![])
    }

    /// Returns the argument back if its keyword is already present.
    pub fn insert(&mut self, arg: KeywordArg) -> Result<(), KeywordArg> {
        if self.get(&arg.keyword).is_some() {
            return Err(arg);
        }
        self.0.push(arg);
        Ok(())
    }

    pub fn get(&self, keyword: &str) -> Option<&KeywordArg> {
        self.0.iter().find(|a| a.keyword == keyword)
    }

    pub fn iter(&self) -> Iter<KeywordArg> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
