use crate::syntax::*;
use crate::*;
use peekmore::{PeekMore, PeekMoreIterator};
use std::str::CharIndices;

type CharStream<'a> = PeekMoreIterator<CharIndices<'a>>;

pub fn tokenize(source: &Arc<Source>) -> Vec<Token> {
    let mut chars = source.code.char_indices().peekmore();
    let mut tokens = vec![];

    while let Some(token) = next_token(source, &mut chars) {
        tokens.push(token);
    }

    tokens.push(Token {
        kind: TokenKind::EOF,
        span: Span::at_end_of(source),
    });

    tokens
}

fn peek_char(stream: &mut CharStream, n: usize) -> char {
    stream.peek_nth(n).map(|(_, c)| *c).unwrap_or('\0')
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Consumes characters while the predicate holds, returning
/// the end offset of the last consumed character.
fn take_while<F: Fn(char) -> bool>(
    stream: &mut CharStream,
    chars: &mut String,
    mut end_offset: usize,
    f: F,
) -> usize {
    loop {
        match stream.peek_nth(0) {
            Some((_, c)) if f(*c) => {
                let (o, c) = match stream.next() {
                    Some(n) => n,
                    None => break,
                };
                end_offset = o + c.len_utf8();
                chars.push(c);
            }
            _ => break,
        }
    }
    end_offset
}

fn next_token(source: &Arc<Source>, stream: &mut CharStream) -> Option<Token> {
    let (offset, ch) = stream.next()?;
    let kind;
    let mut end_offset = offset + ch.len_utf8();
    let next_ch = peek_char(stream, 0);

    match (ch, next_ch) {
        ('\n', _) => kind = TokenKind::Newline,

        // Whitespace
        (s, _) if matches!(s, ' ' | '\r' | '\t') => {
            let mut chars = ch.to_string();
            end_offset = take_while(stream, &mut chars, end_offset, |c| {
                matches!(c, ' ' | '\r' | '\t')
            });
            kind = TokenKind::Whitespace(chars);
        }

        // Line continuation
        ('\\', '\n') => {
            let (o, c) = stream.next()?;
            end_offset = o + c.len_utf8();
            kind = TokenKind::Whitespace("\\\n".into());
        }

        // Comment
        ('#', _) => {
            let mut chars = String::new();
            end_offset = take_while(stream, &mut chars, end_offset, |c| c != '\n');
            kind = TokenKind::Comment(chars);
        }

        // DoubleColon
        (':', ':') => {
            let (o, c) = stream.next()?;
            end_offset = o + c.len_utf8();
            kind = TokenKind::DoubleColon;
        }

        // SymbolLiteral
        (':', c) if is_identifier_start(c) => {
            let mut chars = String::new();
            end_offset = take_while(stream, &mut chars, end_offset, is_identifier_part);
            kind = TokenKind::SymbolLiteral(chars);
        }

        (':', _) => kind = TokenKind::Colon,

        // SimpleInteger
        (n, _) if n.is_ascii_digit() => {
            let mut chars = ch.to_string();
            end_offset = take_while(stream, &mut chars, end_offset, |c| {
                c.is_ascii_digit() || c == '_'
            });
            kind = TokenKind::SimpleInteger(chars);
        }

        // SimpleString
        (q, _) if q == '"' || q == '\'' => {
            let mut chars = ch.to_string();
            let mut escaped = false;
            loop {
                match stream.peek_nth(0) {
                    None | Some((_, '\n')) => break,
                    Some(_) => {
                        let (o, c) = stream.next()?;
                        end_offset = o + c.len_utf8();
                        chars.push(c);
                        if c == q && !escaped {
                            break;
                        }
                        escaped = c == '\\' && !escaped;
                    }
                }
            }
            kind = TokenKind::SimpleString(chars);
        }

        // Identifier, Constant, Label, and keywords
        (c, _) if is_identifier_start(c) => {
            let mut chars = ch.to_string();
            end_offset = take_while(stream, &mut chars, end_offset, is_identifier_part);
            if matches!(peek_char(stream, 0), '?' | '!') && peek_char(stream, 1) != '=' {
                let (o, c) = stream.next()?;
                end_offset = o + c.len_utf8();
                chars.push(c);
            }

            if peek_char(stream, 0) == ':' && peek_char(stream, 1) != ':' {
                let (o, c) = stream.next()?;
                end_offset = o + c.len_utf8();
                kind = TokenKind::Label(chars);
            } else {
                kind = match chars.as_str() {
                    "module" => TokenKind::ModuleKeyword,
                    "class" => TokenKind::ClassKeyword,
                    "end" => TokenKind::EndKeyword,
                    "def" => TokenKind::DefKeyword,
                    "do" => TokenKind::DoKeyword,
                    "begin" => TokenKind::BeginKeyword,
                    "case" => TokenKind::CaseKeyword,
                    "if" => TokenKind::IfKeyword,
                    "unless" => TokenKind::UnlessKeyword,
                    "while" => TokenKind::WhileKeyword,
                    "until" => TokenKind::UntilKeyword,

                    lexeme if lexeme.starts_with(char::is_uppercase) => {
                        TokenKind::Constant(lexeme.into())
                    }
                    lexeme => TokenKind::Identifier(lexeme.into()),
                };
            }
        }

        (',', _) => kind = TokenKind::Comma,
        ('.', _) => kind = TokenKind::Period,
        (';', _) => kind = TokenKind::Semicolon,
        ('=', _) => kind = TokenKind::EqualSign,

        ('(', _) => kind = TokenKind::OpenParen,
        (')', _) => kind = TokenKind::CloseParen,
        ('[', _) => kind = TokenKind::OpenBracket,
        (']', _) => kind = TokenKind::CloseBracket,
        ('{', _) => kind = TokenKind::OpenCurly,
        ('}', _) => kind = TokenKind::CloseCurly,

        // Unknown
        (c, _) => kind = TokenKind::Unknown(c),
    }

    Some(Token {
        kind,
        span: Span::at_range(source, offset..end_offset),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(code: &str) -> Vec<TokenKind> {
        tokenize(&Source::test(code))
            .into_iter()
            .map(|t| t.kind)
            .filter(|k| !matches!(k, TokenKind::Whitespace(_)))
            .collect()
    }

    #[test]
    fn empty_source() {
        let tokens = tokenize(&Source::test(""));

        assert_eq!(tokens.len(), 1);
        assert_matches!(tokens[0].kind, TokenKind::EOF);
    }

    #[test]
    fn only_whitespace() {
        let tokens = tokenize(&Source::test("  "));

        assert_eq!(tokens.len(), 2);
        assert_matches!(tokens[0].kind, TokenKind::Whitespace(ref s) if s == "  ");
    }

    #[test]
    fn comment() {
        let tokens = tokenize(&Source::test("  # error: Too many arguments\n  "));

        assert_eq!(tokens.len(), 5);
        assert_matches!(tokens[1].kind, TokenKind::Comment(ref s) if s == " error: Too many arguments");
        assert_eq!(tokens[1].span.start.offset, 2);
        assert_eq!(tokens[1].span.end.offset, 29);
        assert_matches!(tokens[2].kind, TokenKind::Newline);
    }

    #[test]
    fn labels_and_symbols() {
        use TokenKind::*;

        assert_eq!(
            kinds("type_member(:out, fixed: Integer)"),
            vec![
                Identifier("type_member".into()),
                OpenParen,
                SymbolLiteral("out".into()),
                Comma,
                Label("fixed".into()),
                Constant("Integer".into()),
                CloseParen,
                EOF,
            ]
        );
    }

    #[test]
    fn scope_resolution_is_not_a_label() {
        use TokenKind::*;

        assert_eq!(
            kinds("extend T::Generic"),
            vec![
                Identifier("extend".into()),
                Constant("T".into()),
                DoubleColon,
                Constant("Generic".into()),
                EOF,
            ]
        );
    }

    #[test]
    fn label_span_includes_colon() {
        let tokens = tokenize(&Source::test("lower: Integer"));

        assert_matches!(tokens[0].kind, TokenKind::Label(ref s) if s == "lower");
        assert_eq!(tokens[0].span.start.offset, 0);
        assert_eq!(tokens[0].span.end.offset, 6);
    }

    #[test]
    fn keywords() {
        use TokenKind::*;

        assert_eq!(
            kinds("module A\nend"),
            vec![ModuleKeyword, Constant("A".into()), Newline, EndKeyword, EOF]
        );
    }

    #[test]
    fn strings_do_not_swallow_lines() {
        use TokenKind::*;

        assert_eq!(
            kinds("\"a\\\"b\" 'c\nd"),
            vec![
                SimpleString("\"a\\\"b\"".into()),
                SimpleString("'c".into()),
                Newline,
                Identifier("d".into()),
                EOF,
            ]
        );
    }
}
