use crate::*;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    EOF,
    Unknown(char),
    Whitespace(String),
    Newline,
    Comment(String),

    ModuleKeyword,
    ClassKeyword,
    EndKeyword,
    DefKeyword,
    DoKeyword,
    BeginKeyword,
    CaseKeyword,
    IfKeyword,
    UnlessKeyword,
    WhileKeyword,
    UntilKeyword,

    Colon,
    DoubleColon,
    Comma,
    Period,
    Semicolon,
    EqualSign,

    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,

    Identifier(String),
    Constant(String),
    Label(String),
    SymbolLiteral(String),
    SimpleInteger(String),
    SimpleString(String),
}

impl TokenKind {
    /// Tokens that end a statement.
    pub fn is_terminator(&self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::Semicolon | TokenKind::EOF)
    }

    /// Keywords that open a block closed by `end` when they start a statement.
    pub fn opens_block(&self) -> bool {
        use TokenKind::*;

        matches!(
            self,
            ModuleKeyword
                | ClassKeyword
                | DefKeyword
                | BeginKeyword
                | CaseKeyword
                | IfKeyword
                | UnlessKeyword
                | WhileKeyword
                | UntilKeyword
        )
    }
}

#[derive(Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn lexeme(&self) -> String {
        use TokenKind::*;

        match &self.kind {
            EOF => "\0".into(),
            Unknown(c) => c.to_string(),
            Newline => "\n".into(),

            ModuleKeyword => "module".into(),
            ClassKeyword => "class".into(),
            EndKeyword => "end".into(),
            DefKeyword => "def".into(),
            DoKeyword => "do".into(),
            BeginKeyword => "begin".into(),
            CaseKeyword => "case".into(),
            IfKeyword => "if".into(),
            UnlessKeyword => "unless".into(),
            WhileKeyword => "while".into(),
            UntilKeyword => "until".into(),

            Colon => ":".into(),
            DoubleColon => "::".into(),
            Comma => ",".into(),
            Period => ".".into(),
            Semicolon => ";".into(),
            EqualSign => "=".into(),

            OpenParen => "(".into(),
            CloseParen => ")".into(),
            OpenBracket => "[".into(),
            CloseBracket => "]".into(),
            OpenCurly => "{".into(),
            CloseCurly => "}".into(),

            Comment(s) => format!("#{}", s),
            Label(s) => format!("{}:", s),
            SymbolLiteral(s) => format!(":{}", s),

            Whitespace(s) | Identifier(s) | Constant(s) | SimpleInteger(s) | SimpleString(s) => {
                s.clone()
            }
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.kind.fmt(f)
    }
}
