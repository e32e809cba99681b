pub(crate) const HELP_NAME: &str = "help";
pub(crate) const HELP_SHORT: char = 'h';
pub(crate) const HELP_MESSAGE: &str = "Show this help message and exit";

pub(crate) const TRUE_VALUE: &str = "true";
pub(crate) const FALSE_VALUE: &str = "false";

pub(crate) const DEFAULT_INDENT_BASE: usize = 4;
pub(crate) const DEFAULT_INDENT_HELP: usize = 32;
pub(crate) const DEFAULT_MAX_LENGTH: usize = 80;
pub(crate) const DEFAULT_INDENT_MAX_USAGE: usize = 32;

pub(crate) const MINIMUM_NAME_LENGTH: usize = 2;
