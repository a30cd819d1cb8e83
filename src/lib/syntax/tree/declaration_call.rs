use crate::syntax::*;
use crate::*;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString)]
pub enum Callee {
    #[strum(serialize = "type_member")]
    Member,
    #[strum(serialize = "type_template")]
    Template,
}

impl fmt::Display for Callee {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Callee::Member => write!(f, "type_member"),
            Callee::Template => write!(f, "type_template"),
        }
    }
}

/// One `type_member` or `type_template` invocation.
///
/// `uses_parens` only records which call form was written. Classification
/// never looks at it; the spans already reflect the parentheses.
#[derive(Debug, Clone)]
pub struct DeclarationCall {
    pub callee: Callee,
    /// Everything between the callee and the block: the parenthesized
    /// argument list, or the bare-word arguments with their leading
    /// whitespace. Empty, right after the callee, when there are none.
    pub arguments: Span,
    pub uses_parens: bool,
    pub positional_args: Vec<PositionalArg>,
    pub keyword_args: KeywordArgs,
    /// A trailing `{ ... }` or `do ... end` block.
    pub block: Option<Span>,
    pub span: Span,
}
