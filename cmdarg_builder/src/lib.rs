//! Builder module for `cmdarg`.
//! See the `cmdarg` crate documentation for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod matcher;
mod model;
mod parser;
pub mod prelude;

pub use api::*;
pub use model::*;
pub use parser::{
    wrap_tokens, ConfigError, ConsoleInterface, FormatterParams, HelpFormatter, ParseError,
    UserInterface,
};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
