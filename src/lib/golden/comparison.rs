use crate::golden::*;
use crate::*;

pub enum Mismatch {
    Missing(Expectation),
    Unexpected(Diagnostic),
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mismatch::Missing(e) => write!(f, "Expected diagnostic: {}", e),
            Mismatch::Unexpected(d) => write!(f, "Unexpected diagnostic: {:?}", d),
        }
    }
}

impl fmt::Debug for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Pairs each expectation with a distinct diagnostic. Expectations with
/// caret columns are paired first, since they match more narrowly.
pub fn compare(expectations: &[Expectation], diagnostics: &[Diagnostic]) -> Vec<Mismatch> {
    let mut used = vec![false; diagnostics.len()];
    let mut mismatches = vec![];

    let (narrow, broad): (Vec<_>, Vec<_>) =
        expectations.iter().partition(|e| e.columns.is_some());

    for expectation in narrow.into_iter().chain(broad) {
        let found = diagnostics
            .iter()
            .enumerate()
            .find(|(i, d)| !used[*i] && expectation.matches(d))
            .map(|(i, _)| i);

        match found {
            Some(i) => used[i] = true,
            None => mismatches.push(Mismatch::Missing(expectation.clone())),
        }
    }

    for (diagnostic, used) in diagnostics.iter().zip(used) {
        if !used {
            mismatches.push(Mismatch::Unexpected(diagnostic.clone()));
        }
    }

    mismatches
}
