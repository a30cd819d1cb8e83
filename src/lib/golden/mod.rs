//! Expected-diagnostic annotations written in source comments.
//!
//! A trailing `# error: <message>` expects a diagnostic with exactly that
//! message starting on the same line. A comment line of carets,
//! `#   ^^^^ error: <message>`, expects a diagnostic on the closest line
//! above it that isn't itself a caret line, covering exactly the columns
//! under the carets.

mod expectation;
pub use self::expectation::*;

mod comparison;
pub use self::comparison::*;
