use thiserror::Error;

use crate::api::{ActionError, Argument, ShowHelp};
use crate::constant::*;
use crate::matcher::*;
use crate::model::{Options, Phase};
use crate::parser::HelpFormatter;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// An error in the configuration of the command line parser.
///
/// Registration never changes the parser when this error is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The argument (or its short name) cannot be used on the command line.
    #[error("Config error: invalid name '{name}', {reason}.")]
    InvalidName {
        /// The offending name.
        name: String,
        /// Why the name is invalid.
        reason: String,
    },

    /// The long name is already registered.
    #[error("Config error: cannot duplicate the parameter '{0}'.")]
    DuplicateName(String),

    /// The short name is already registered.
    #[error("Config error: cannot duplicate the short option '-{0}'.")]
    DuplicateShortName(char),

    /// No action is registered under the name.
    #[error("Config error: unknown action '{0}'.")]
    UnknownAction(String),
}

impl ConfigError {
    /// The registration status code of this error.
    ///
    /// * `-1`: invalid descriptor.
    /// * `-2`: duplicate long name.
    /// * `-3`: duplicate short name.
    /// * `-4`: unknown action.
    pub fn code(&self) -> i32 {
        match self {
            ConfigError::InvalidName { .. } => -1,
            ConfigError::DuplicateName(_) => -2,
            ConfigError::DuplicateShortName(_) => -3,
            ConfigError::UnknownAction(_) => -4,
        }
    }
}

/// The reason a parse did not produce the [`Options`].
///
/// Every variant carries the rendered help message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The help flag (`-h` or `--help`) was encountered.
    #[error("help requested.")]
    HelpRequested {
        /// The rendered help message.
        help: String,
    },

    /// A value was rejected by its argument's action.
    #[error("{message}")]
    InvalidValue {
        /// The one line description of the rejected value (ex: `program: argument -c/--count: invalid value 'x' (cannot convert to i32).`).
        message: String,
        /// The rendered help message.
        help: String,
    },

    /// The tokens do not fit the registered arguments (ex: unknown flag, missing value, missing positional).
    #[error("{message}")]
    Usage {
        /// The one line description of the misuse (ex: `program: unrecognized option '--x'`).
        message: String,
        /// The rendered help message.
        help: String,
    },
}

impl ParseError {
    /// The process exit code for this outcome: `0` when help was requested, `1` otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            ParseError::HelpRequested { .. } => 0,
            ParseError::InvalidValue { .. } | ParseError::Usage { .. } => 1,
        }
    }

    /// The rendered help message.
    pub fn help(&self) -> &str {
        match self {
            ParseError::HelpRequested { help }
            | ParseError::InvalidValue { help, .. }
            | ParseError::Usage { help, .. } => help,
        }
    }

    /// The one line error description, if this is an error.
    pub fn message(&self) -> Option<&str> {
        match self {
            ParseError::HelpRequested { .. } => None,
            ParseError::InvalidValue { message, .. } | ParseError::Usage { message, .. } => {
                Some(message)
            }
        }
    }
}

/// Why the engine stopped before reaching `Phase::Done`.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Abort {
    Help,
    Invalid(String),
    Usage(String),
}

impl From<MatchError> for Abort {
    fn from(error: MatchError) -> Self {
        Abort::Usage(error.to_string())
    }
}

/// The parsing engine: owns the registered arguments, their stored values, and the flag lookup table.
pub(crate) struct Parser {
    required: Vec<Argument>,
    optional: Vec<Argument>,
    values: Options,
    flag_table: FlagTable,
    phase: Phase,
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("required", &self.required)
            .field("optional", &self.optional)
            .field("phase", &self.phase)
            .finish()
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Create an engine with only the built-in help argument.
    pub(crate) fn new() -> Self {
        let mut parser = Self {
            required: Vec::default(),
            optional: Vec::default(),
            values: Options::default(),
            flag_table: FlagTable::default(),
            phase: Phase::Idle,
        };
        let help = Argument::option(HELP_NAME)
            .short(HELP_SHORT)
            .help(HELP_MESSAGE)
            .default_value(FALSE_VALUE)
            .action(ShowHelp);
        parser
            .register(help)
            .expect("internal error - the help argument must be valid");
        parser
    }

    pub(crate) fn register(&mut self, argument: Argument) -> Result<(), ConfigError> {
        validate(&argument)?;

        if self.values.contains_key(argument.long_name()) {
            return Err(ConfigError::DuplicateName(argument.long_name().to_string()));
        }

        if !argument.is_required() {
            if let Some(s) = argument.short_name() {
                if self.flag_table.contains_short(s) {
                    return Err(ConfigError::DuplicateShortName(s));
                }
            }
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Registering {argument:?}.");
        }

        self.values
            .insert(argument.long_name().to_string(), argument.default().to_string());

        if argument.is_required() {
            self.required.push(argument);
        } else {
            self.optional.push(argument);
            self.flag_table = FlagTable::new(self.optional.iter().map(FlagConfig::from).collect());
        }

        Ok(())
    }

    pub(crate) fn required(&self) -> &[Argument] {
        &self.required
    }

    pub(crate) fn optional(&self) -> &[Argument] {
        &self.optional
    }

    pub(crate) fn values(&self) -> &Options {
        &self.values
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    /// Reset every stored value to its default.
    pub(crate) fn clear(&mut self) {
        for argument in self.required.iter().chain(self.optional.iter()) {
            self.values
                .insert(argument.long_name().to_string(), argument.default().to_string());
        }
    }

    /// Run the state machine over `tokens` (which exclude the program name).
    pub(crate) fn consume(&mut self, tokens: &[&str]) -> Result<Options, Abort> {
        self.clear();
        self.phase = Phase::ScanningFlags;

        match self.scan(tokens) {
            Ok(()) => {
                self.phase = Phase::Done;

                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Parse complete: {:?}.", self.values);
                }

                Ok(self.values.clone())
            }
            Err(abort) => {
                self.phase = Phase::HelpAbort;

                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Parse aborted: {abort:?}.");
                }

                Err(abort)
            }
        }
    }

    fn scan(&mut self, tokens: &[&str]) -> Result<(), Abort> {
        let Parser {
            required,
            optional,
            values,
            flag_table,
            phase,
        } = self;
        let mut positionals: Vec<String> = Vec::default();

        // 1. Flag scan phase.
        for scanned in TokenScanner::new(flag_table, tokens) {
            match scanned? {
                Scanned::Flag { index, value } => {
                    let argument = &optional[index];

                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Matched flag --{n} with value {value:?}.", n = argument.long_name());
                    }

                    commit(values, argument, value.as_deref().unwrap_or(""))?;
                }
                Scanned::Positional(token) => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Deferred positional '{token}'.");
                    }

                    positionals.push(token);
                }
            }
        }

        // 2. Positional phase.
        *phase = Phase::ConsumingPositionals;

        for (argument, token) in required.iter().zip(positionals.iter()) {
            commit(values, argument, token)?;
        }

        if positionals.len() > required.len() {
            return Err(Abort::Usage(format!(
                "too many required options: {}",
                positionals[required.len()..].join(" ")
            )));
        }

        if positionals.len() < required.len() {
            return Err(Abort::Usage(format!(
                "missing required options: {}",
                required[positionals.len()..]
                    .iter()
                    .map(HelpFormatter::metavar)
                    .collect::<Vec<String>>()
                    .join(" ")
            )));
        }

        Ok(())
    }
}

/// Apply the action of `argument`, storing the new value only on success.
fn commit(values: &mut Options, argument: &Argument, raw: &str) -> Result<(), Abort> {
    let name = argument.long_name();
    let current = values
        .get(name)
        .expect("internal error - every registered argument must have a value");

    match argument.apply(current, raw) {
        Ok(value) => {
            values.insert(name.to_string(), value);
            Ok(())
        }
        Err(ActionError::HelpRequested) => {
            values.insert(name.to_string(), TRUE_VALUE.to_string());
            Err(Abort::Help)
        }
        Err(error) => {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Action rejected '{raw}': {error}");
            }

            Err(Abort::Invalid(error.to_string()))
        }
    }
}

fn validate(argument: &Argument) -> Result<(), ConfigError> {
    let name = argument.long_name();
    let invalid = |reason: &str| ConfigError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.chars().count() < MINIMUM_NAME_LENGTH {
        return Err(invalid("must be at least 2 characters"));
    }

    if name.starts_with('-') {
        return Err(invalid("must not start with '-'"));
    }

    if name.contains(|c: char| c == '=' || c.is_whitespace()) {
        return Err(invalid("must not contain '=' or whitespace"));
    }

    if argument.is_required() {
        return Ok(());
    }

    match argument.short_name() {
        Some(s) if matches!(s, '-' | '=' | ':' | '?') || s.is_whitespace() => {
            Err(ConfigError::InvalidName {
                name: format!("-{s}"),
                reason: "is not a valid short name".to_string(),
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Increment, StoreNumber, StoreTrue};
    use crate::model::Arity;
    use rstest::rstest;

    fn options(pairs: &[(&str, &str)]) -> Options {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn example() -> Parser {
        let mut parser = Parser::new();
        parser
            .register(
                Argument::option("count")
                    .short('c')
                    .arity(Arity::Required)
                    .default_value("5")
                    .action(StoreNumber::<i32>::default()),
            )
            .unwrap();
        parser
            .register(Argument::option("verbose").short('v').action(Increment::<i32>::new()).default_value("0"))
            .unwrap();
        parser.register(Argument::positional("input")).unwrap();
        parser.register(Argument::positional("output")).unwrap();
        parser
    }

    #[test]
    fn parser_empty() {
        // Setup
        let mut parser = Parser::new();

        // Execute
        let result = parser.consume(empty::slice()).unwrap();

        // Verify
        assert_eq!(result, options(&[("help", "false")]));
        assert_eq!(parser.phase(), Phase::Done);
    }

    #[test]
    fn parser_idle() {
        let parser = Parser::default();
        assert_eq!(parser.phase(), Phase::Idle);
        assert_eq!(parser.optional().len(), 1);
        assert!(parser.required().is_empty());
    }

    #[rstest]
    #[case(vec!["-c", "10", "fileA", "fileB"], "10", "0")]
    #[case(vec!["fileA", "-c", "10", "fileB"], "10", "0")]
    #[case(vec!["fileA", "fileB", "--count=10"], "10", "0")]
    #[case(vec!["--cou", "10", "fileA", "fileB"], "10", "0")]
    #[case(vec!["-vvc10", "fileA", "fileB"], "10", "2")]
    #[case(vec!["-v", "fileA", "-v", "fileB", "-v"], "5", "3")]
    #[case(vec!["fileA", "--", "fileB"], "5", "0")]
    fn parser_consume(
        #[case] tokens: Vec<&str>,
        #[case] count: &str,
        #[case] verbose: &str,
    ) {
        // Setup
        let mut parser = example();

        // Execute
        let result = parser.consume(tokens.as_slice()).unwrap();

        // Verify
        assert_eq!(
            result,
            options(&[
                ("count", count),
                ("help", "false"),
                ("input", "fileA"),
                ("output", "fileB"),
                ("verbose", verbose),
            ])
        );
        assert_eq!(parser.values(), &result);
        assert_eq!(parser.phase(), Phase::Done);
    }

    #[test]
    fn parser_consume_resets() {
        // Setup
        let mut parser = example();
        parser
            .consume(&["-c", "10", "-vv", "fileA", "fileB"])
            .unwrap();

        // Execute
        let result = parser.consume(&["a", "b"]).unwrap();

        // Verify
        assert_eq!(result["count"], "5");
        assert_eq!(result["verbose"], "0");
    }

    #[rstest]
    #[case(vec!["--help"])]
    #[case(vec!["-h"])]
    #[case(vec!["--he"])]
    #[case(vec!["-vh"])]
    #[case(vec!["fileA", "-h", "--unknown"])]
    #[case(vec!["-c", "notanumber", "-h"])]
    fn parser_help(#[case] tokens: Vec<&str>) {
        // Setup
        let mut parser = example();

        // Execute
        let abort = parser.consume(tokens.as_slice()).unwrap_err();

        // Verify
        // Whatever comes first aborts the scan; these all reach the help flag (or fail) first.
        if tokens.contains(&"notanumber") {
            assert_matches!(abort, Abort::Invalid(_));
        } else {
            assert_eq!(abort, Abort::Help);
            assert_eq!(parser.values()["help"], "true");
        }
        assert_eq!(parser.phase(), Phase::HelpAbort);
    }

    #[rstest]
    #[case(vec!["-c", "notanumber", "fileA", "fileB"], "argument -c/--count: invalid value 'notanumber' (cannot convert to i32).")]
    #[case(vec!["--count=1.5", "fileA", "fileB"], "argument -c/--count: invalid value '1.5' (cannot convert to i32).")]
    fn parser_invalid(#[case] tokens: Vec<&str>, #[case] expected: &str) {
        // Setup
        let mut parser = example();

        // Execute
        let abort = parser.consume(tokens.as_slice()).unwrap_err();

        // Verify
        assert_eq!(abort, Abort::Invalid(expected.to_string()));
        // The rejected value is never committed.
        assert_eq!(parser.values()["count"], "5");
    }

    #[rstest]
    #[case(vec!["fileA"], "missing required options: OUTPUT")]
    #[case(vec![], "missing required options: INPUT OUTPUT")]
    #[case(vec!["a", "b", "c", "d"], "too many required options: c d")]
    #[case(vec!["--unknown", "a", "b"], "unrecognized option '--unknown'")]
    #[case(vec!["-x", "a", "b"], "invalid option -- 'x'")]
    #[case(vec!["a", "b", "-c"], "option requires an argument -- 'c'")]
    #[case(vec!["a", "b", "--count"], "option '--count' requires an argument")]
    #[case(vec!["a", "b", "--verbose=1"], "option '--verbose' doesn't allow an argument")]
    fn parser_usage(#[case] tokens: Vec<&str>, #[case] expected: &str) {
        // Setup
        let mut parser = example();

        // Execute
        let abort = parser.consume(tokens.as_slice()).unwrap_err();

        // Verify
        assert_eq!(abort, Abort::Usage(expected.to_string()));
        assert_eq!(parser.phase(), Phase::HelpAbort);
    }

    #[test]
    fn parser_positional_action() {
        // Setup
        let mut parser = Parser::new();
        parser
            .register(Argument::positional("size").action(StoreNumber::<u32>::default()))
            .unwrap();

        // Execute
        let abort = parser.consume(&["-3"]).unwrap_err();

        // Verify
        // A lone "-3" looks like a cluster of short flags.
        assert_eq!(abort, Abort::Usage("invalid option -- '3'".to_string()));

        // Execute
        let abort = parser.consume(&["--", "-3"]).unwrap_err();

        // Verify
        assert_eq!(
            abort,
            Abort::Invalid("argument size: invalid value '-3' (cannot convert to u32).".to_string())
        );
    }

    #[rstest]
    #[case(Argument::option("x"), -1)]
    #[case(Argument::option(""), -1)]
    #[case(Argument::option("-flag"), -1)]
    #[case(Argument::option("a=b"), -1)]
    #[case(Argument::option("a b"), -1)]
    #[case(Argument::option("flag").short('-'), -1)]
    #[case(Argument::option("flag").short('?'), -1)]
    #[case(Argument::option("flag").short(' '), -1)]
    #[case(Argument::option("help"), -2)]
    #[case(Argument::positional("help"), -2)]
    #[case(Argument::option("count"), -2)]
    #[case(Argument::positional("input"), -2)]
    #[case(Argument::option("other").short('c'), -3)]
    #[case(Argument::option("other").short('h'), -3)]
    fn parser_register_invalid(#[case] argument: Argument, #[case] code: i32) {
        // Setup
        let mut parser = example();
        let optional_before = format!("{:?}", parser.optional());
        let required_before = format!("{:?}", parser.required());

        // Execute
        let error = parser.register(argument).unwrap_err();

        // Verify
        assert_eq!(error.code(), code);
        assert_eq!(format!("{:?}", parser.optional()), optional_before);
        assert_eq!(format!("{:?}", parser.required()), required_before);
    }

    #[test]
    fn parser_register_positional_short_ignored() {
        // Setup
        let mut parser = example();

        // Execute
        parser
            .register(Argument::positional("extra").short('c'))
            .unwrap();

        // Verify
        // The positional's short name never reaches the flag table.
        let result = parser.consume(&["-c", "1", "a", "b", "c"]).unwrap();
        assert_eq!(result["count"], "1");
        assert_eq!(result["extra"], "c");
    }

    #[test]
    fn parser_clear() {
        // Setup
        let mut parser = Parser::new();
        parser
            .register(Argument::option("flag").default_value("false").action(StoreTrue))
            .unwrap();
        parser.consume(&["--flag"]).unwrap();
        assert_eq!(parser.values()["flag"], "true");

        // Execute
        parser.clear();

        // Verify
        assert_eq!(parser.values()["flag"], "false");
        // Clearing does not change the phase.
        assert_eq!(parser.phase(), Phase::Done);
    }

    #[rstest]
    #[case(ConfigError::InvalidName { name: "x".to_string(), reason: "must be at least 2 characters".to_string() }, "Config error: invalid name 'x', must be at least 2 characters.")]
    #[case(ConfigError::DuplicateName("help".to_string()), "Config error: cannot duplicate the parameter 'help'.")]
    #[case(ConfigError::DuplicateShortName('h'), "Config error: cannot duplicate the short option '-h'.")]
    #[case(ConfigError::UnknownAction("store_it".to_string()), "Config error: unknown action 'store_it'.")]
    fn config_error_display(#[case] error: ConfigError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn parse_error() {
        let help = ParseError::HelpRequested {
            help: "usage".to_string(),
        };
        let usage = ParseError::Usage {
            message: "program: invalid option -- 'x'".to_string(),
            help: "usage".to_string(),
        };

        assert_eq!(help.exit_code(), 0);
        assert_eq!(help.message(), None);
        assert_eq!(help.help(), "usage");
        assert_eq!(usage.exit_code(), 1);
        assert_eq!(usage.message(), Some("program: invalid option -- 'x'"));
        assert_eq!(usage.to_string(), "program: invalid option -- 'x'");
    }
}
