mod autocorrect;
pub use self::autocorrect::*;

mod diagnostic;
pub use self::diagnostic::*;

#[macro_use]
mod diagnosed;
pub use self::diagnosed::*;

mod reporter;
pub use self::reporter::*;
