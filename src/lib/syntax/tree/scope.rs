use crate::syntax::*;
use crate::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Module,
    Class,
}

/// A `module` or `class` body.
#[derive(Debug)]
pub struct ScopeNode {
    pub kind: ScopeKind,
    pub name: String,
    pub name_span: Span,
    pub body: Vec<Statement>,
    pub span: Span,
}

impl ScopeNode {
    pub fn qualified_name(&self, enclosing: &str) -> String {
        if enclosing.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", enclosing, self.name)
        }
    }
}
