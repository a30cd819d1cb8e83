use crate::*;

pub use Diagnosed::*;

#[derive(Debug)]
pub enum Diagnosed<T> {
    Just(T),
    Diagnosis(T, Vec<Diagnostic>),
    Failure(Vec<Diagnostic>),
}

impl<T> Diagnosed<T> {
    pub fn maybe_diagnosis(t: T, diagnostics: Vec<Diagnostic>) -> Diagnosed<T> {
        if diagnostics.is_empty() {
            Just(t)
        } else {
            Diagnosis(t, diagnostics)
        }
    }
}

macro_rules! diagnose {
    ($diagnostics: expr, $diagnosed: expr) => {
        match $diagnosed {
            Just(t) => t,
            Diagnosis(t, d) => {
                $diagnostics.extend(d);
                t
            }
            Failure(d) => {
                $diagnostics.extend(d);
                return Failure(std::mem::replace(&mut $diagnostics, vec![]));
            }
        }
    };
}

impl<T> Diagnosed<T> {
    pub fn into_parts(self) -> (Option<T>, Vec<Diagnostic>) {
        match self {
            Just(t) => (Some(t), vec![]),
            Diagnosis(t, d) => (Some(t), d),
            Failure(d) => (None, d),
        }
    }
}

#[cfg(test)]
macro_rules! assert_diagnose {
    ($diagnosed: expr) => {
        match $diagnosed {
            Just(t) => t,
            Diagnosis(_, d) => panic!("{:?}", d),
            Failure(d) => panic!("{:?}", d),
        }
    };
}
