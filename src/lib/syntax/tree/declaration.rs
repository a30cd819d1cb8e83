use crate::syntax::*;
use crate::*;

/// `NAME = type_member ...`
#[derive(Debug, Clone)]
pub struct Declaration {
    pub name: String,
    pub name_span: Span,
    pub call: DeclarationCall,
}

impl Declaration {
    pub fn span(&self) -> Span {
        self.name_span.through(&self.call.span)
    }
}
