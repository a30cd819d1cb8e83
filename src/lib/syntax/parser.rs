use crate::syntax::*;
use crate::*;
use std::str::FromStr;
use TokenKind::*;

fn symbol_literal(text: &str) -> Option<&str> {
    let name = text.strip_prefix(':')?;
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return None,
    }
    if chars.all(|c| c.is_alphanumeric() || c == '_') {
        Some(name)
    } else {
        None
    }
}

macro_rules! sees {
    ($self: expr, $($kind: pat)|+, $ahead: expr) => {{
        let t = $self.peek($ahead);
        matches!(t.kind, $($kind)|+)
    }};

    ($self: expr, $($kind: pat)|+) => {{
        sees!($self, $($kind)|+, 0)
    }};
}

macro_rules! consume {
    ($self: expr, $kind: pat, $expected: expr) => {{
        let t = $self.peek(0).clone();
        if !matches!(t.kind, $kind) {
            return Failure(vec![Diagnostic::SyntaxError(
                t.span.clone(),
                format!("Expected {}, found `{}`", $expected, t.lexeme().trim()),
            )]);
        }
        $self.offset += 1;
        t
    }};
}

/// Parses the subset of the language that carries type parameter
/// declarations. Statements that aren't `module`/`class` bodies or
/// `NAME = type_member ...` assignments are skipped without being
/// interpreted, keeping `end`-terminated blocks balanced.
pub struct Parser {
    source: Arc<Source>,
    offset: usize,
    tokens: Vec<Token>,
    comments: Vec<Token>,
}

impl Parser {
    pub fn new(source: Arc<Source>) -> Parser {
        let mut tokens = vec![];
        let mut comments = vec![];
        for token in tokenize(&source) {
            match token.kind {
                Whitespace(_) => {}
                Comment(_) => comments.push(token),
                _ => tokens.push(token),
            }
        }
        Parser {
            source,
            offset: 0,
            tokens,
            comments,
        }
    }

    pub fn parse(self) -> (Tree, Vec<Diagnostic>) {
        let (tree, diagnostics, _) = self.parse_with_test_comments();
        (tree, diagnostics)
    }

    pub fn parse_with_test_comments(mut self) -> (Tree, Vec<Diagnostic>, Vec<Token>) {
        let mut diagnostics = vec![];
        let statements = self.parse_body(false, &mut diagnostics);
        debug!(
            "Parsed {} with {} top-level statement(s) and {} diagnostic(s)",
            self.source,
            statements.len(),
            diagnostics.len()
        );
        (
            Tree::new(self.source.clone(), statements),
            diagnostics,
            self.comments,
        )
    }

    fn peek(&self, ahead: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.offset + ahead).min(last)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek(0).clone();
        if !matches!(token.kind, EOF) {
            self.offset += 1;
        }
        token
    }

    fn skip_terminators(&mut self) {
        while sees!(self, Newline | Semicolon) {
            self.offset += 1;
        }
    }

    fn skip_newlines(&mut self) {
        while sees!(self, Newline) {
            self.offset += 1;
        }
    }

    fn parse_body(&mut self, until_end: bool, diagnostics: &mut Vec<Diagnostic>) -> Vec<Statement> {
        let mut statements = vec![];

        loop {
            self.skip_terminators();

            let kind = self.peek(0).kind.clone();
            match kind {
                EOF => {
                    if until_end {
                        diagnostics.push(Diagnostic::SyntaxError(
                            self.peek(0).span.clone(),
                            "Expected `end`, found end of file".into(),
                        ));
                    }
                    break;
                }

                EndKeyword => {
                    if until_end {
                        break;
                    }
                    let t = self.advance();
                    diagnostics.push(Diagnostic::SyntaxError(t.span, "Unexpected `end`".into()));
                }

                ModuleKeyword | ClassKeyword if sees!(self, Constant(_), 1) => {
                    let scope = self.parse_scope(diagnostics);
                    statements.push(Statement::Scope(scope));
                }

                Constant(_) if self.sees_declaration() => {
                    match self.parse_declaration() {
                        Just(d) => statements.push(Statement::Declaration(d)),
                        Diagnosis(d, dd) => {
                            diagnostics.extend(dd);
                            statements.push(Statement::Declaration(d));
                        }
                        Failure(dd) => {
                            diagnostics.extend(dd);
                            self.skip_statement(false, diagnostics);
                        }
                    }
                }

                _ => self.skip_statement(true, diagnostics),
            }
        }

        statements
    }

    fn sees_declaration(&self) -> bool {
        if !sees!(self, Constant(_)) || !sees!(self, EqualSign, 1) {
            return false;
        }
        match self.peek(2).kind {
            Identifier(ref name) => Callee::from_str(name).is_ok(),
            _ => false,
        }
    }

    fn parse_scope(&mut self, diagnostics: &mut Vec<Diagnostic>) -> ScopeNode {
        let keyword = self.advance();
        let kind = match keyword.kind {
            ClassKeyword => ScopeKind::Class,
            _ => ScopeKind::Module,
        };

        let first = self.advance();
        let mut name = first.lexeme();
        let mut name_span = first.span.clone();
        while sees!(self, DoubleColon) && sees!(self, Constant(_), 1) {
            self.advance();
            let segment = self.advance();
            name.push_str("::");
            name.push_str(&segment.lexeme());
            name_span = name_span.through(&segment.span);
        }

        // Superclass expressions and anything else on the header line.
        while !self.peek(0).kind.is_terminator() {
            self.advance();
        }

        let body = self.parse_body(true, diagnostics);
        let end = self.advance();

        trace!("Parsed {:?} {} at {}", kind, name, name_span);

        ScopeNode {
            kind,
            name,
            name_span,
            body,
            span: keyword.span.through(&end.span),
        }
    }

    pub fn parse_declaration(&mut self) -> Diagnosed<Declaration> {
        let mut diagnostics = vec![];

        let name = consume!(self, Constant(_), "a constant");
        consume!(self, EqualSign, "`=`");
        let call = diagnose!(diagnostics, self.parse_declaration_call());

        if !self.peek(0).kind.is_terminator() && !sees!(self, EndKeyword) {
            let t = self.peek(0).clone();
            diagnostics.push(Diagnostic::SyntaxError(
                t.span.clone(),
                format!("Unexpected `{}` after `{}`", t.lexeme(), call.callee),
            ));
            self.skip_statement(false, &mut diagnostics);
        }

        Diagnosed::maybe_diagnosis(
            Declaration {
                name: name.lexeme(),
                name_span: name.span,
                call,
            },
            diagnostics,
        )
    }

    pub fn parse_declaration_call(&mut self) -> Diagnosed<DeclarationCall> {
        let mut diagnostics = vec![];

        let callee_token = consume!(self, Identifier(_), "`type_member` or `type_template`");
        let callee = match Callee::from_str(&callee_token.lexeme()) {
            Ok(c) => c,
            Err(_) => {
                return Failure(vec![Diagnostic::SyntaxError(
                    callee_token.span.clone(),
                    format!(
                        "Expected `type_member` or `type_template`, found `{}`",
                        callee_token.lexeme()
                    ),
                )])
            }
        };

        let uses_parens = sees!(self, OpenParen);
        let mut end_span = callee_token.span.clone();
        let (positional_args, keyword_args) = if uses_parens {
            self.advance();
            let args = diagnose!(diagnostics, self.parse_arguments(true));
            let close = consume!(self, CloseParen, "`)`");
            end_span = close.span;
            args
        } else if self.peek(0).kind.is_terminator() || sees!(self, EndKeyword | OpenCurly | DoKeyword) {
            (vec![], KeywordArgs::new())
        } else {
            let args = diagnose!(diagnostics, self.parse_arguments(false));
            let last = args
                .1
                .iter()
                .map(|a| a.value.span.clone())
                .chain(args.0.iter().map(|a| a.span.clone()))
                .max_by_key(|s| s.end.offset);
            if let Some(last) = last {
                end_span = last;
            }
            args
        };

        let arguments = Span::new(callee_token.span.end.clone(), end_span.end.clone());

        let block = diagnose!(diagnostics, self.parse_potential_block());
        if let Some(ref block) = block {
            end_span = block.clone();
        }

        Diagnosed::maybe_diagnosis(
            DeclarationCall {
                callee,
                span: callee_token.span.through(&end_span),
                arguments,
                uses_parens,
                positional_args,
                keyword_args,
                block,
            },
            diagnostics,
        )
    }

    fn at_end_of_arguments(&self, in_parens: bool) -> bool {
        if in_parens {
            sees!(self, CloseParen | EOF)
        } else {
            self.peek(0).kind.is_terminator() || sees!(self, EndKeyword | OpenCurly | DoKeyword)
        }
    }

    fn parse_arguments(&mut self, in_parens: bool) -> Diagnosed<(Vec<PositionalArg>, KeywordArgs)> {
        let mut diagnostics = vec![];
        let mut positional_args = vec![];
        let mut keyword_args = KeywordArgs::new();

        loop {
            if in_parens {
                self.skip_newlines();
            }
            if self.at_end_of_arguments(in_parens) {
                break;
            }

            if let Label(keyword) = self.peek(0).kind.clone() {
                let label = self.advance();
                let value = diagnose!(diagnostics, self.parse_argument_value(in_parens));
                let arg = KeywordArg {
                    keyword,
                    keyword_span: label.span,
                    value,
                };
                if let Err(arg) = keyword_args.insert(arg) {
                    diagnostics.push(Diagnostic::SyntaxError(
                        arg.span(),
                        format!("Duplicate keyword argument `{}`", arg.keyword),
                    ));
                }
            } else {
                let value = diagnose!(diagnostics, self.parse_argument_value(in_parens));
                let kind = match symbol_literal(&value.text) {
                    Some(name) => PositionalArgKind::Symbol(name.into()),
                    None => PositionalArgKind::Other(value.text.clone()),
                };
                if !keyword_args.is_empty() {
                    diagnostics.push(Diagnostic::SyntaxError(
                        value.span.clone(),
                        "Positional argument after keyword arguments".into(),
                    ));
                }
                positional_args.push(PositionalArg {
                    kind,
                    span: value.span,
                });
            }

            if sees!(self, Comma) {
                self.advance();
                self.skip_newlines();
            } else {
                break;
            }
        }

        Diagnosed::maybe_diagnosis((positional_args, keyword_args), diagnostics)
    }

    /// Consumes the tokens of one argument expression without interpreting
    /// them, up to the next top-level `,` or the end of the argument list.
    fn parse_argument_value(&mut self, in_parens: bool) -> Diagnosed<ArgumentValue> {
        let mut depth = 0usize;
        let mut first: Option<Span> = None;
        let mut last: Option<Span> = None;

        loop {
            let kind = self.peek(0).kind.clone();
            match kind {
                EOF => break,
                Newline if in_parens || depth > 0 => {
                    self.advance();
                    continue;
                }
                Comma if depth == 0 => break,
                _ if depth == 0 && self.at_end_of_arguments(in_parens) => break,
                OpenParen | OpenBracket | OpenCurly => depth += 1,
                CloseParen | CloseBracket | CloseCurly => depth = depth.saturating_sub(1),
                _ => {}
            }
            let t = self.advance();
            if first.is_none() {
                first = Some(t.span.clone());
            }
            last = Some(t.span);
        }

        match (first, last) {
            (Some(first), Some(last)) => {
                let span = first.through(&last);
                Just(ArgumentValue {
                    text: self.source.slice(&span).into(),
                    span,
                })
            }
            _ => Failure(vec![Diagnostic::SyntaxError(
                self.peek(0).span.clone(),
                format!("Expected an argument, found `{}`", self.peek(0).lexeme().trim()),
            )]),
        }
    }

    fn parse_potential_block(&mut self) -> Diagnosed<Option<Span>> {
        let (open, close) = match self.peek(0).kind.clone() {
            OpenCurly => (OpenCurly, CloseCurly),
            DoKeyword => (DoKeyword, EndKeyword),
            _ => return Just(None),
        };
        let start = self.advance();
        let mut depth = 1usize;

        loop {
            let t = self.advance();
            if t.kind == EOF {
                return Failure(vec![Diagnostic::SyntaxError(
                    start.span.clone(),
                    format!(
                        "Unterminated block, expected `{}`",
                        if close == EndKeyword { "end" } else { "}" }
                    ),
                )]);
            }
            if t.kind == open || (open == DoKeyword && t.kind.opens_block()) {
                depth += 1;
            } else if t.kind == close {
                depth -= 1;
                if depth == 0 {
                    return Just(Some(start.span.through(&t.span)));
                }
            }
        }
    }

    /// Skips one statement, including any `end`-terminated blocks it opens.
    /// When resuming in the middle of a statement, a leading `if`/`unless`
    /// is a modifier and opens nothing.
    fn skip_statement(&mut self, at_statement_start: bool, diagnostics: &mut Vec<Diagnostic>) {
        let mut depth = 0usize;
        let mut at_statement_start = at_statement_start;

        loop {
            let kind = self.peek(0).kind.clone();
            match kind {
                EOF => {
                    if depth > 0 {
                        diagnostics.push(Diagnostic::SyntaxError(
                            self.peek(0).span.clone(),
                            "Expected `end`, found end of file".into(),
                        ));
                    }
                    return;
                }
                Newline | Semicolon => {
                    if depth == 0 {
                        return;
                    }
                    at_statement_start = true;
                    self.advance();
                    continue;
                }
                EndKeyword => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                DoKeyword => depth += 1,
                ref k if at_statement_start && k.opens_block() => depth += 1,
                _ => {}
            }
            at_statement_start = matches!(kind, EqualSign | OpenParen | Comma);
            self.advance();
        }
    }
}
