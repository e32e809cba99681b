use std::env;

use crate::api::CommandLineParser;
use crate::model::Options;
use crate::parser::base::ParseError;
use crate::parser::interface::UserInterface;

impl CommandLineParser {
    /// Run the command line parser against the input tokens (excluding the program name).
    ///
    /// Parsing happens in two phases:
    /// 1. Flag scanning matches the `-x`/`--long` options anywhere in the tokens, applying their actions as they are met.
    /// 2. Positional consumption assigns the remaining tokens, in order, to the positional arguments.
    ///
    /// If at any point the parser encounters an error (ex: un-matched token, invalid value, etc), it reports the error followed by the help message to `UserInterface::print_error` and returns with `Err(1)`.
    ///
    /// If the help switch (`-h` or `--help`) is encountered, the parser reports the help message to `UserInterface::print` and returns with `Err(0)`.
    ///
    /// ### Example
    /// ```
    /// # use cmdarg_builder as cmdarg;
    /// use cmdarg::{Argument, CommandLineParser, FormatterParams};
    ///
    /// let mut parser = CommandLineParser::new(FormatterParams::new("program"));
    /// parser.add_argument(Argument::positional("input")).unwrap();
    ///
    /// let options = parser.parse_tokens(&["fileA"]).unwrap();
    /// assert_eq!(options["input"], "fileA");
    /// ```
    pub fn parse_tokens(&mut self, tokens: &[&str]) -> Result<Options, i32> {
        self.try_parse(tokens).map_err(|error| {
            report(&error, &*self.user_interface);
            error.exit_code()
        })
    }

    /// Run the command line parser against the Cli [`env::args`].
    ///
    /// Behaves like [`CommandLineParser::parse_tokens`], except that instead of returning an exit code, it exits the process with it (via [`std::process::exit`]).
    pub fn parse(&mut self) -> Options {
        let command_input: Vec<String> = env::args().skip(1).collect();
        match self.parse_tokens(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        ) {
            Ok(options) => options,
            Err(exit_code) => {
                std::process::exit(exit_code);
            }
        }
    }
}

fn report(error: &ParseError, user_interface: &(impl UserInterface + ?Sized)) {
    match error {
        ParseError::HelpRequested { help } => user_interface.print(help.clone()),
        ParseError::InvalidValue { message, help } | ParseError::Usage { message, help } => {
            user_interface.print_error(message.clone());
            user_interface.print_error(String::default());
            user_interface.print_error(help.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::{Argument, CommandLineParser, Constraint, StoreNumber};
    use crate::model::Arity;
    use crate::parser::util::channel_interface;
    use crate::parser::FormatterParams;
    use crate::test::assert_contains;
    use rstest::rstest;

    fn example(
        sender: crate::parser::util::SenderInterface,
    ) -> CommandLineParser {
        let mut clp =
            CommandLineParser::new(FormatterParams::new("program")).with_user_interface(sender);
        clp.add_argument(
            Argument::option("count")
                .short('c')
                .arity(Arity::Required)
                .default_value("5")
                .action(StoreNumber::<i32>::new(Constraint::Positive)),
        )
        .unwrap();
        clp.add_argument(Argument::positional("input")).unwrap();
        clp
    }

    #[test]
    fn parse_tokens_empty() {
        // Setup
        let (sender, receiver) = channel_interface();
        let mut clp =
            CommandLineParser::new(FormatterParams::new("program")).with_user_interface(sender);

        // Execute
        let options = clp.parse_tokens(empty::slice()).unwrap();
        drop(clp);

        // Verify
        assert_eq!(options["help"], "false");
        assert_eq!(receiver.consume(), (None, None));
    }

    #[rstest]
    #[case(vec!["fileA"], "5")]
    #[case(vec!["-c3", "fileA"], "3")]
    #[case(vec!["fileA", "--count", "3"], "3")]
    fn parse_tokens(#[case] tokens: Vec<&str>, #[case] count: &str) {
        // Setup
        let (sender, receiver) = channel_interface();
        let mut clp = example(sender);

        // Execute
        let options = clp.parse_tokens(tokens.as_slice()).unwrap();
        drop(clp);

        // Verify
        assert_eq!(options["count"], count);
        assert_eq!(options["input"], "fileA");
        assert_eq!(receiver.consume(), (None, None));
    }

    #[rstest]
    #[case(vec!["--help"])]
    #[case(vec!["-h"])]
    fn parse_tokens_help(#[case] tokens: Vec<&str>) {
        // Setup
        let (sender, receiver) = channel_interface();
        let mut clp = example(sender);
        let help = clp.help();

        // Execute
        let exit_code = clp.parse_tokens(tokens.as_slice()).unwrap_err();
        drop(clp);

        // Verify
        assert_eq!(exit_code, 0);

        let message = receiver.consume_message();
        assert_eq!(message, help);
        assert_contains!(message, "usage: program [-h] [-c COUNT] INPUT");
        assert_contains!(message, "-h, --help");
    }

    #[rstest]
    #[case(vec!["-c", "0", "fileA"], "program: argument -c/--count: invalid value '0' (must be i32 > 0).")]
    #[case(vec!["-c", "-3", "fileA"], "program: argument -c/--count: invalid value '-3' (must be i32 > 0).")]
    #[case(vec!["--unknown", "fileA"], "program: unrecognized option '--unknown'")]
    #[case(vec![], "program: missing required options: INPUT")]
    fn parse_tokens_error(#[case] tokens: Vec<&str>, #[case] expected: &str) {
        // Setup
        let (sender, receiver) = channel_interface();
        let mut clp = example(sender);
        let help = clp.help();

        // Execute
        let exit_code = clp.parse_tokens(tokens.as_slice()).unwrap_err();
        drop(clp);

        // Verify
        assert_eq!(exit_code, 1);

        let error = receiver.consume_error();
        assert_eq!(error, format!("{expected}\n\n{help}"));
    }
}
