use crate::*;

/// Append-only sink for diagnostics.
pub trait Reporter {
    fn report(&mut self, diagnostic: Diagnostic);

    fn report_all(&mut self, diagnostics: Vec<Diagnostic>) {
        for diagnostic in diagnostics {
            self.report(diagnostic);
        }
    }
}

impl Reporter for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

pub struct BasicReporter;

impl Reporter for BasicReporter {
    fn report(&mut self, diagnostic: Diagnostic) {
        println!("{}: {:?}", diagnostic.span(), diagnostic);
        for note in diagnostic.notes() {
            println!("  note: {}", note);
        }
    }
}
