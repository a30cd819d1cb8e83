mod type_parameter;
pub use self::type_parameter::*;

mod bounds_resolver;
pub use self::bounds_resolver::*;

mod scope;
pub use self::scope::*;

mod namer;
pub use self::namer::*;

#[cfg(test)]
pub mod test_utils;
