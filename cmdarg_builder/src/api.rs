mod action;
mod argument;
mod core;
mod registry;

pub use self::core::*;
pub use action::*;
pub use argument::*;
pub use registry::*;
