//! Traits which, typically, may be imported without concern: `use cmdarg::prelude::*`.

// Needs to be imported in order to call `Action::apply` directly, or to implement a custom action.
pub use crate::api::Action;
// Needs to be imported in order to implement a custom output sink.
pub use crate::parser::UserInterface;
