use crate::syntax::Callee;
use crate::*;
use serde::Serialize;
use std::collections::BTreeSet;

/// A generic type parameter synthesized from a `type_member` or
/// `type_template` declaration.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TypeParameter {
    pub name: String,
    pub kind: Callee,
    pub variance: Variance,
    pub bound_kind: BoundKind,
    pub decl_span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Variance {
    Invariant,
    Covariant,
    Contravariant,
}

impl Variance {
    pub fn from_marker(marker: &str) -> Option<Variance> {
        match marker {
            "out" => Some(Variance::Covariant),
            "in" => Some(Variance::Contravariant),
            _ => None,
        }
    }
}

impl Default for Variance {
    fn default() -> Self {
        Variance::Invariant
    }
}

impl fmt::Display for Variance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Variance::Invariant => write!(f, "invariant"),
            Variance::Covariant => write!(f, ":out"),
            Variance::Contravariant => write!(f, ":in"),
        }
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, EnumString, EnumIter,
)]
pub enum BoundKeyword {
    #[strum(serialize = "fixed")]
    Fixed,
    #[strum(serialize = "lower")]
    Lower,
    #[strum(serialize = "upper")]
    Upper,
}

impl fmt::Display for BoundKeyword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoundKeyword::Fixed => write!(f, "fixed"),
            BoundKeyword::Lower => write!(f, "lower"),
            BoundKeyword::Upper => write!(f, "upper"),
        }
    }
}

/// Bounds declared on a type parameter.
///
/// The keyword form of bounds is obsolete, so whatever bounds a
/// declaration still spells that way are kept only as a record of
/// which keywords were present; their types take no part in checking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum BoundKind {
    None,
    Deprecated(BTreeSet<BoundKeyword>),
}

impl BoundKind {
    pub fn is_deprecated(&self) -> bool {
        matches!(self, BoundKind::Deprecated(_))
    }
}

impl Default for BoundKind {
    fn default() -> Self {
        BoundKind::None
    }
}

impl fmt::Display for TypeParameter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.kind)?;
        if self.variance != Variance::Invariant {
            write!(f, " {}", self.variance)?;
        }
        if let BoundKind::Deprecated(ref keywords) = self.bound_kind {
            let keywords: Vec<_> = keywords.iter().map(ToString::to_string).collect();
            write!(f, " (deprecated bounds: {})", keywords.join(", "))?;
        }
        Ok(())
    }
}
