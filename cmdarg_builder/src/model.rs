use std::collections::BTreeMap;

/// The final string-encoded value of every registered argument, keyed by long name.
pub type Options = BTreeMap<String, String>;

/// Whether an option consumes a value from the command line.
///
/// Inspired by getopt: <https://www.gnu.org/software/libc/manual/html_node/Getopt-Long-Options.html>
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// `no_argument`: The option never takes a value (ex: `--verbose`).
    #[default]
    None,
    /// `required_argument`: The option always takes a value (ex: `--count 3` or `-c3`).
    Required,
    /// `optional_argument`: The option may take a value, but only when attached (ex: `--level=2` or `-l2`).
    Optional,
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The phase of the command line parser state machine.
///
/// ```console
/// Idle -> ScanningFlags -> ConsumingPositionals -> Done
///              |                   |
///              +-----> HelpAbort <-+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No parse has been attempted yet.
    Idle,
    /// Matching `-x` / `--long` tokens and applying their actions.
    ScanningFlags,
    /// Assigning the remaining tokens to the positional arguments.
    ConsumingPositionals,
    /// The most recent parse completed successfully.
    Done,
    /// The most recent parse aborted (help requested, or a usage/validation error).
    HelpAbort,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
