mod tokens;
pub use self::tokens::*;

mod lexer;
pub use self::lexer::*;

mod tree;
pub use self::tree::*;

mod parser;
pub use self::parser::*;
