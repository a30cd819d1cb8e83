use colored::*;
use namer::*;
use std::collections::HashMap;

pub struct PrettyReporter {
    sources: HashMap<URI, Arc<Source>>,
}

impl PrettyReporter {
    pub fn new(sources: &[Arc<Source>]) -> PrettyReporter {
        PrettyReporter {
            sources: sources
                .iter()
                .map(|s| (s.uri.clone(), s.clone()))
                .collect(),
        }
    }

    fn header(diagnostic: &Diagnostic) -> String {
        let level = match diagnostic.level() {
            DiagnosticLevel::Error => format!("error[E{:04}]", diagnostic.code()).red().bold(),
        };
        let location_row = format!("{:>5} {}", "-->", diagnostic.span().start);

        format!(
            "{}: {}\n{}\n",
            level,
            diagnostic.to_string().bold(),
            location_row.bright_black()
        )
    }

    fn code_frame(diagnostic: &Diagnostic, source: &Source) -> String {
        let span = diagnostic.span();
        let mut secondary_spans: Vec<_> = diagnostic
            .secondary_spans()
            .into_iter()
            .filter(|(s, _)| s.is_single_line())
            .collect();
        let mut formatted_lines = String::new();

        for n in span.start.line..=span.end.line {
            let line = source.line(n).unwrap_or("");
            let from = if n == span.start.line {
                span.start.character
            } else {
                1
            };
            let to = if n == span.end.line {
                span.end.character
            } else {
                line.chars().count() + 1
            };
            formatted_lines.push_str(&Self::code_frame_line(line, n));
            formatted_lines.push_str(&Self::underline(from, to, "^", "").bright_red().to_string());
            formatted_lines.push_str(&Self::secondary_underlines(&mut secondary_spans, n));
        }

        while let Some((secondary, _)) = secondary_spans.first() {
            let n = secondary.start.line;
            let line = source.line(n).unwrap_or("");
            formatted_lines.push_str(&Self::code_frame_line(line, n));
            formatted_lines.push_str(&Self::secondary_underlines(&mut secondary_spans, n));
        }

        formatted_lines
    }

    /// Underlines, and removes, every secondary span on line `n`.
    fn secondary_underlines(secondary_spans: &mut Vec<(Span, String)>, n: usize) -> String {
        let mut underlines = String::new();
        secondary_spans.retain(|(secondary, label)| {
            if secondary.start.line != n {
                return true;
            }
            underlines.push_str(
                &Self::underline(
                    secondary.start.character,
                    secondary.end.character,
                    "-",
                    label,
                )
                .bright_blue()
                .to_string(),
            );
            false
        });
        underlines
    }

    fn autocorrect(autocorrect: &Autocorrect, source: Option<&Arc<Source>>) -> String {
        let mut result = format!(
            "{:>6} {}\n",
            "=",
            format!("help: {}", autocorrect.title).bold()
        );
        if let Some(preview) = source.and_then(|s| autocorrect.preview(s)) {
            result.push_str(&Self::code_frame_line(&preview, autocorrect.span.start.line));
        }
        result
    }

    fn code_frame_line(line: &str, n: usize) -> String {
        let line_number_column = format!("{:>4} |", n);

        format!("{} {}\n", line_number_column.bright_black(), line)
    }

    fn underline(from: usize, to: usize, mark: &str, label: &str) -> String {
        let width = if to > from { to - from } else { 1 };
        format!(
            "{:>4} | {}{} {}\n",
            "",
            " ".repeat(from.saturating_sub(1)),
            mark.repeat(width),
            label
        )
    }
}

impl Reporter for PrettyReporter {
    fn report(&mut self, diagnostic: Diagnostic) {
        let mut result = String::new();
        result.push_str(Self::header(&diagnostic).as_str());
        if let Some(source) = self.sources.get(&diagnostic.span().start.uri) {
            result.push_str(Self::code_frame(&diagnostic, source).as_str());
        }
        for note in diagnostic.notes() {
            result.push_str(&format!("{:>6} {}\n", "=", format!("note: {}", note).bold()));
        }
        for autocorrect in diagnostic.autocorrects() {
            let source = self.sources.get(&autocorrect.span.start.uri);
            result.push_str(Self::autocorrect(&autocorrect, source).as_str());
        }
        println!("{}", result);
    }
}
