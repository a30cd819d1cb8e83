use crate::semantics::BoundKeyword;
use crate::syntax::Callee;
use crate::*;
use serde::Serialize;
use std::fmt;

#[derive(Clone, PartialEq, IntoStaticStr)]
pub enum Diagnostic {
    SyntaxError(Span, String),
    InvalidVarianceMarker(Span, String),
    DeprecatedBoundsSyntax {
        span: Span,
        callee: Callee,
        bounds: Vec<(BoundKeyword, String)>,
        /// The call's argument list, which the block form replaces.
        arguments: Span,
        /// Positional arguments as written, kept by the block form.
        positional: Vec<String>,
    },
    ExcessArguments {
        span: Span,
        marker: Span,
        callee: Callee,
        got: usize,
    },
}

impl Diagnostic {
    pub fn span(&self) -> &Span {
        use Diagnostic::*;

        match self {
            SyntaxError(ref s, _)
            | InvalidVarianceMarker(ref s, _)
            | DeprecatedBoundsSyntax { span: ref s, .. }
            | ExcessArguments { span: ref s, .. } => s,
        }
    }

    /// Spans related to the finding that are worth pointing at,
    /// apart from the primary span.
    pub fn secondary_spans(&self) -> Vec<(Span, String)> {
        use Diagnostic::*;

        match self {
            ExcessArguments { marker, .. } => {
                vec![(marker.clone(), "variance marker given here".into())]
            }
            SyntaxError(_, _) | InvalidVarianceMarker(_, _) | DeprecatedBoundsSyntax { .. } => {
                vec![]
            }
        }
    }

    pub fn notes(&self) -> Vec<String> {
        use Diagnostic::*;

        match self {
            DeprecatedBoundsSyntax { callee, bounds, .. } => {
                vec![format!("Use `{} {}` instead", callee, block_form(bounds))]
            }
            ExcessArguments { callee, got, .. } => vec![format!(
                "`{}` expects `0..1` arguments, got `{}`",
                callee, got
            )],
            SyntaxError(_, _) | InvalidVarianceMarker(_, _) => vec![],
        }
    }

    /// Edits that would make the diagnostic go away.
    pub fn autocorrects(&self) -> Vec<Autocorrect> {
        use Diagnostic::*;

        match self {
            DeprecatedBoundsSyntax {
                bounds,
                arguments,
                positional,
                ..
            } => {
                let arguments_text = if positional.is_empty() {
                    String::new()
                } else {
                    format!("({})", positional.join(", "))
                };
                vec![Autocorrect::new(
                    "Move the bounds into a block",
                    arguments.clone(),
                    format!("{} {}", arguments_text, block_form(bounds)),
                )]
            }
            SyntaxError(_, _) | InvalidVarianceMarker(_, _) | ExcessArguments { .. } => vec![],
        }
    }

    pub fn level(&self) -> DiagnosticLevel {
        use Diagnostic::*;

        match self {
            SyntaxError(_, _)
            | InvalidVarianceMarker(_, _)
            | DeprecatedBoundsSyntax { .. }
            | ExcessArguments { .. } => DiagnosticLevel::Error,
        }
    }

    pub fn code(&self) -> usize {
        use Diagnostic::*;

        match self {
            SyntaxError(_, _) => 1,
            InvalidVarianceMarker(_, _) => 2,
            DeprecatedBoundsSyntax { .. } => 3,
            ExcessArguments { .. } => 4,
        }
    }

    pub fn failed(diagnostics: &[Diagnostic]) -> bool {
        diagnostics
            .iter()
            .any(|d| matches!(d.level(), DiagnosticLevel::Error))
    }

    pub fn record(&self) -> DiagnosticRecord {
        let kind: &'static str = self.into();
        DiagnosticRecord {
            code: self.code(),
            kind,
            level: self.level(),
            message: self.to_string(),
            span: self.span().clone(),
            secondary_spans: self.secondary_spans(),
            notes: self.notes(),
            autocorrects: self.autocorrects(),
        }
    }
}

impl fmt::Debug for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name: &'static str = self.into();
        write!(
            f,
            "{:?} ({} @ {}:{}:{}-{}:{})",
            self.to_string(),
            name,
            self.span().start.uri,
            self.span().start.line,
            self.span().start.character,
            self.span().end.line,
            self.span().end.character,
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Diagnostic::*;

        match self {
            SyntaxError(_, s) => write!(f, "{}", s),
            InvalidVarianceMarker(_, s) => write!(
                f,
                "Invalid variance kind `{}`, only `:out` and `:in` are supported",
                s
            ),
            DeprecatedBoundsSyntax { .. } => write!(f, "syntax for bounds has changed"),
            ExcessArguments { .. } => write!(f, "Too many arguments"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticLevel {
    Error,
}

/// Flattened form of a diagnostic, for machine-readable output.
#[derive(Debug, Serialize)]
pub struct DiagnosticRecord {
    pub code: usize,
    pub kind: &'static str,
    pub level: DiagnosticLevel,
    pub message: String,
    pub span: Span,
    pub secondary_spans: Vec<(Span, String)>,
    pub notes: Vec<String>,
    pub autocorrects: Vec<Autocorrect>,
}

fn block_form(bounds: &[(BoundKeyword, String)]) -> String {
    let bounds: Vec<_> = bounds
        .iter()
        .map(|(keyword, value)| format!("{}: {}", keyword, value))
        .collect();
    format!("{{{{{}}}}}", bounds.join(", "))
}
