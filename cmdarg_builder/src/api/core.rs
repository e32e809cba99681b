use crate::api::Argument;
use crate::model::{Options, Phase};
use crate::parser::{
    Abort, ConfigError, ConsoleInterface, FormatterParams, HelpFormatter, ParseError, Parser,
    UserInterface,
};

/// The command line parser.
///
/// Every parser starts with the built-in `-h`/`--help` option.
/// Arguments are added with [`CommandLineParser::add_argument`], then the Cli is parsed via one of:
/// * [`CommandLineParser::try_parse`]: returns the outcome, without printing anything.
/// * [`CommandLineParser::parse_tokens`]: reports any abort to the [`UserInterface`] and returns the exit code.
/// * [`CommandLineParser::parse`]: parses [`std::env::args`], exiting the process on abort.
///
/// ### Example
/// ```
/// # use cmdarg_builder as cmdarg;
/// use cmdarg::{Argument, Arity, CommandLineParser, FormatterParams, StoreNumber};
///
/// let mut parser = CommandLineParser::new(FormatterParams::new("program"));
/// parser
///     .add_argument(
///         Argument::option("count")
///             .short('c')
///             .arity(Arity::Required)
///             .default_value("5")
///             .action(StoreNumber::<i32>::default()),
///     )
///     .unwrap();
/// parser.add_argument(Argument::positional("input")).unwrap();
///
/// let options = parser.try_parse(&["-c", "10", "fileA"]).unwrap();
///
/// assert_eq!(options["count"], "10");
/// assert_eq!(options["input"], "fileA");
/// assert_eq!(options["help"], "false");
/// ```
pub struct CommandLineParser {
    formatter: HelpFormatter,
    parser: Parser,
    pub(crate) user_interface: Box<dyn UserInterface>,
}

impl CommandLineParser {
    /// Create a command line parser with the exact `params` layout.
    pub fn new(params: FormatterParams) -> Self {
        Self::from_formatter(HelpFormatter::new(params))
    }

    /// Create a command line parser from a pre-built formatter (ex: [`HelpFormatter::terminal`]).
    pub fn from_formatter(formatter: HelpFormatter) -> Self {
        Self {
            formatter,
            parser: Parser::new(),
            user_interface: Box::new(ConsoleInterface::default()),
        }
    }

    /// Report through `user_interface` instead of the console.
    pub fn with_user_interface(mut self, user_interface: impl UserInterface + 'static) -> Self {
        self.user_interface = Box::new(user_interface);
        self
    }

    /// Register an argument.
    ///
    /// Positional arguments are consumed in the order they are added.
    /// On error, the parser is left unchanged.
    ///
    /// ### Example
    /// ```
    /// # use cmdarg_builder as cmdarg;
    /// use cmdarg::{Argument, CommandLineParser, ConfigError, FormatterParams};
    ///
    /// let mut parser = CommandLineParser::new(FormatterParams::new("program"));
    ///
    /// assert_eq!(parser.add_argument(Argument::option("x")).unwrap_err().code(), -1);
    /// assert_eq!(
    ///     parser.add_argument(Argument::option("help")).unwrap_err(),
    ///     ConfigError::DuplicateName("help".to_string())
    /// );
    /// ```
    pub fn add_argument(&mut self, argument: Argument) -> Result<(), ConfigError> {
        self.parser.register(argument)
    }

    /// Parse `tokens` (excluding the program name).
    ///
    /// Every stored value is first reset to its default.
    /// On success, the value of every registered argument is returned.
    pub fn try_parse(&mut self, tokens: &[&str]) -> Result<Options, ParseError> {
        self.parser.consume(tokens).map_err(|abort| {
            let help = self.help();
            let program = self.formatter.program();

            match abort {
                Abort::Help => ParseError::HelpRequested { help },
                Abort::Invalid(message) => ParseError::InvalidValue {
                    message: format!("{program}: {message}"),
                    help,
                },
                Abort::Usage(message) => ParseError::Usage {
                    message: format!("{program}: {message}"),
                    help,
                },
            }
        })
    }

    /// Reset every stored value to its default.
    pub fn clear(&mut self) {
        self.parser.clear();
    }

    /// Render the help message.
    pub fn help(&self) -> String {
        self.formatter
            .format(self.parser.required(), self.parser.optional())
    }

    /// The currently stored values.
    pub fn values(&self) -> &Options {
        self.parser.values()
    }

    /// The phase reached by the most recent parse.
    pub fn phase(&self) -> Phase {
        self.parser.phase()
    }

    /// The help formatter.
    pub fn formatter(&self) -> &HelpFormatter {
        &self.formatter
    }
}

impl std::fmt::Debug for CommandLineParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandLineParser")
            .field("formatter", &self.formatter)
            .field("parser", &self.parser)
            .finish_non_exhaustive()
    }
}
