mod base;
mod interface;
mod middleware;
mod printer;

pub use self::base::{ConfigError, ParseError};
pub(crate) use self::base::{Abort, Parser};
pub use self::interface::{ConsoleInterface, UserInterface};
pub use self::printer::{wrap_tokens, FormatterParams, HelpFormatter};

#[cfg(test)]
pub(crate) use self::interface::util;
