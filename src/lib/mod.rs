pub use std::fmt;
pub use std::slice::Iter;
pub use std::sync::Arc;

#[macro_use]
extern crate log;

#[macro_use]
extern crate strum_macros;

#[cfg(test)]
use matches::assert_matches;

mod source;
pub use self::source::*;

#[macro_use]
mod diagnostics;
pub use self::diagnostics::*;

pub mod syntax;

pub mod semantics;

pub mod golden;

#[cfg(test)]
mod fixture_tests;
