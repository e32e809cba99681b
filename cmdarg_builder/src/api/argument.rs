use std::sync::Arc;

use crate::api::{Action, ActionError, StoreString};
use crate::model::Arity;

/// The description of one command line argument.
///
/// There are two classes of arguments:
/// * [`Argument::option`]: optional, recognized by `--NAME` (or the short `-N`) anywhere on the Cli.
/// * [`Argument::positional`]: required, consumed positionally (in registration order) after all options are scanned.
///
/// An argument is immutable once registered on a [`CommandLineParser`](./struct.CommandLineParser.html).
///
/// ### Example
/// ```
/// # use cmdarg_builder as cmdarg;
/// use cmdarg::{Argument, Arity, Constraint, StoreNumber};
///
/// let count = Argument::option("count")
///     .short('c')
///     .arity(Arity::Required)
///     .help("How many times to repeat.")
///     .default_value("5")
///     .action(StoreNumber::<i32>::new(Constraint::Positive));
///
/// assert_eq!(count.long_name(), "count");
/// assert_eq!(count.short_name(), Some('c'));
/// assert!(!count.is_required());
/// ```
#[derive(Clone)]
pub struct Argument {
    long_name: String,
    short_name: Option<char>,
    required: bool,
    arity: Arity,
    help: String,
    default_value: String,
    action: Arc<dyn Action>,
}

impl Argument {
    fn new(long_name: impl Into<String>, required: bool) -> Self {
        Self {
            long_name: long_name.into(),
            short_name: None,
            required,
            arity: Arity::None,
            help: String::default(),
            default_value: String::default(),
            action: Arc::new(StoreString),
        }
    }

    /// Create an optional argument, specified via `--NAME` on the Cli.
    pub fn option(long_name: impl Into<String>) -> Self {
        Self::new(long_name, false)
    }

    /// Create a required argument, specified positionally on the Cli.
    pub fn positional(long_name: impl Into<String>) -> Self {
        Self::new(long_name, true)
    }

    /// Specify the short name, used as `-N` on the Cli.
    /// Ignored for positional arguments.
    pub fn short(mut self, short_name: char) -> Self {
        self.short_name.replace(short_name);
        self
    }

    /// Specify whether the option consumes a value.
    /// Ignored for positional arguments, which always consume exactly one token.
    pub fn arity(mut self, arity: Arity) -> Self {
        self.arity = arity;
        self
    }

    /// Document the argument for the help message.
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Specify the value stored before (and unless) the argument is matched.
    pub fn default_value(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = default_value.into();
        self
    }

    /// Specify the conversion/validation action.
    /// If repeated, only the final action applies.
    pub fn action(mut self, action: impl Action + 'static) -> Self {
        self.action = Arc::new(action);
        self
    }

    /// Specify a conversion/validation action that is shared, for example one taken from an [`ActionRegistry`](./struct.ActionRegistry.html).
    pub fn shared_action(mut self, action: Arc<dyn Action>) -> Self {
        self.action = action;
        self
    }

    /// The unique name of this argument.
    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    /// The short name of this argument, if any.
    pub fn short_name(&self) -> Option<char> {
        self.short_name
    }

    /// Whether this is a positional argument.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether this argument consumes a value.
    pub fn value_arity(&self) -> Arity {
        self.arity
    }

    /// The help text of this argument.
    pub fn help_text(&self) -> &str {
        &self.help
    }

    /// The value stored before (and unless) this argument is matched.
    pub fn default(&self) -> &str {
        &self.default_value
    }

    /// Run this argument's action.
    pub fn apply(&self, current: &str, raw: &str) -> Result<String, ActionError> {
        self.action.apply(current, self, raw)
    }

    /// The human readable name of this argument, as it appears on the Cli.
    ///
    /// Ex: `-c/--count` for an option with a short name, `--count` without, and `count` for a positional.
    pub fn label(&self) -> String {
        if self.required {
            return self.long_name.clone();
        }

        match &self.short_name {
            Some(s) => format!("-{s}/--{n}", n = self.long_name),
            None => format!("--{n}", n = self.long_name),
        }
    }
}

impl std::fmt::Debug for Argument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let class = if self.required { "Positional" } else { "Option" };
        let short = match &self.short_name {
            Some(s) => format!(" -{s},"),
            None => "".to_string(),
        };
        let help = if self.help.is_empty() {
            "".to_string()
        } else {
            format!(", {h}", h = self.help)
        };

        write!(
            f,
            "{class}[{arity}, --{name},{short} default='{default}'{help}]",
            arity = self.arity,
            name = self.long_name,
            default = self.default_value,
        )
    }
}
