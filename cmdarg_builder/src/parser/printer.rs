use terminal_size::{terminal_size, Width};

use crate::api::Argument;
use crate::constant::*;
use crate::model::Arity;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The layout configuration of a [`HelpFormatter`].
///
/// ### Example
/// ```
/// # use cmdarg_builder as cmdarg;
/// use cmdarg::{FormatterParams, HelpFormatter};
///
/// let params = FormatterParams::new("program")
///     .description("A demonstration.")
///     .max_length(60);
/// let formatter = HelpFormatter::new(params);
///
/// assert_eq!(formatter.max_length(), 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterParams {
    program: String,
    description: String,
    epilogue: String,
    indent_base: usize,
    indent_help: usize,
    max_length: usize,
    indent_max_usage: usize,
}

impl FormatterParams {
    /// Create the default layout for `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            description: String::default(),
            epilogue: String::default(),
            indent_base: DEFAULT_INDENT_BASE,
            indent_help: DEFAULT_INDENT_HELP,
            max_length: DEFAULT_MAX_LENGTH,
            indent_max_usage: DEFAULT_INDENT_MAX_USAGE,
        }
    }

    /// Specify the program name shown in the usage line and the error messages.
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Specify the text shown after the usage line.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Specify the text shown at the very end of the help message.
    pub fn epilogue(mut self, epilogue: impl Into<String>) -> Self {
        self.epilogue = epilogue.into();
        self
    }

    /// Specify the indent of each argument's flags column.
    pub fn indent_base(mut self, indent_base: usize) -> Self {
        self.indent_base = indent_base;
        self
    }

    /// Specify the column at which each argument's help text starts.
    pub fn indent_help(mut self, indent_help: usize) -> Self {
        self.indent_help = indent_help;
        self
    }

    /// Specify the maximum line length.
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Specify the maximum indent of the usage continuation lines.
    pub fn indent_max_usage(mut self, indent_max_usage: usize) -> Self {
        self.indent_max_usage = indent_max_usage;
        self
    }
}

/// Renders the usage synopsis and the two column help body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpFormatter {
    params: FormatterParams,
}

impl HelpFormatter {
    /// Create a formatter with exactly the `params` layout.
    pub fn new(params: FormatterParams) -> Self {
        Self { params }
    }

    /// Create a formatter sized to the terminal.
    ///
    /// When stdout is a terminal, its width replaces the `max_length` of `params`.
    /// Otherwise lines are never wrapped.
    pub fn terminal(params: FormatterParams) -> Self {
        let max_length = if let Some((Width(terminal_width), _)) = terminal_size() {
            terminal_width as usize
        } else {
            usize::MAX
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Terminal width detected, selecting max length: {max_length}.");
        }

        Self::new(params.max_length(max_length))
    }

    /// The program name.
    pub fn program(&self) -> &str {
        &self.params.program
    }

    /// The maximum line length.
    pub fn max_length(&self) -> usize {
        self.params.max_length
    }

    /// The placeholder shown for the value of `argument`.
    ///
    /// Ex: `COUNT` for `count`, `OUTPUT_FILE` for `output-file`.
    pub fn metavar(argument: &Argument) -> String {
        argument.long_name().to_ascii_uppercase().replace('-', "_")
    }

    /// Render the full help message for the `required` (positional) and `optional` arguments.
    /// The lines are joined by `\n`, without a trailing newline.
    pub fn format(&self, required: &[Argument], optional: &[Argument]) -> String {
        let FormatterParams {
            description,
            epilogue,
            max_length,
            ..
        } = &self.params;
        let mut lines = self.usage(required, optional);

        if !description.is_empty() {
            lines.push(String::default());
            lines.extend(chunk(description, *max_length));
        }

        if !required.is_empty() {
            lines.push(String::default());
            lines.push("Required positional arguments:".to_string());

            for argument in required {
                lines.extend(self.argument_help(argument));
            }
        }

        if !optional.is_empty() {
            lines.push(String::default());
            lines.push("Optional arguments:".to_string());

            for argument in optional {
                lines.extend(self.argument_help(argument));
            }
        }

        if !epilogue.is_empty() {
            lines.push(String::default());
            lines.extend(chunk(epilogue, *max_length));
        }

        lines.join("\n")
    }

    fn usage(&self, required: &[Argument], optional: &[Argument]) -> Vec<String> {
        let prefix = format!("usage: {p}", p = self.params.program);
        let summary: Vec<String> = optional
            .iter()
            .map(usage_option)
            .chain(required.iter().map(HelpFormatter::metavar))
            .collect();
        let mut indent = prefix.chars().count() + 1;
        // A long program name pushes the summary onto its own lines.
        let detached = indent > self.params.indent_max_usage;

        if detached {
            indent = self.params.indent_max_usage;
        }

        let mut parts =
            wrap_tokens(&summary, self.params.max_length.saturating_sub(indent)).into_iter();
        let mut lines = Vec::default();

        if detached {
            lines.push(prefix);
        } else {
            match parts.next() {
                Some(first) => lines.push(format!("{prefix} {first}")),
                None => lines.push(prefix),
            }
        }

        for part in parts {
            lines.push(format!("{:indent$}{part}", ""));
        }

        lines
    }

    fn argument_help(&self, argument: &Argument) -> Vec<String> {
        let FormatterParams {
            indent_base,
            indent_help,
            max_length,
            ..
        } = self.params;
        let left_column_width = indent_help.saturating_sub(indent_base);
        let flags = if argument.is_required() {
            vec![HelpFormatter::metavar(argument)]
        } else {
            let long = format!("--{n}{p}", n = argument.long_name(), p = parameter(argument));
            match argument.short_name() {
                Some(s) => vec![format!("-{s},"), long],
                None => vec![long],
            }
        };
        let mut left_parts = wrap_tokens(&flags, left_column_width);
        let last = left_parts
            .pop()
            .expect("internal error - the flags column must not be empty");
        let mut out: Vec<String> = left_parts
            .into_iter()
            .map(|part| format!("{:indent_base$}{part}", ""))
            .collect();
        let mut description_parts =
            chunk(&description(argument), max_length.saturating_sub(indent_help)).into_iter();

        match description_parts.next() {
            None => out.push(format!("{:indent_base$}{last}", "")),
            Some(first) if last.chars().count() < left_column_width => {
                out.push(format!("{:indent_base$}{last:left_column_width$}{first}", ""));
            }
            Some(first) => {
                out.push(format!("{:indent_base$}{last}", ""));
                out.push(format!("{:indent_help$}{first}", ""));
            }
        }

        for part in description_parts {
            out.push(format!("{:indent_help$}{part}", ""));
        }

        out
    }
}

fn parameter(argument: &Argument) -> String {
    match argument.value_arity() {
        Arity::None => "".to_string(),
        Arity::Required => format!(" {m}", m = HelpFormatter::metavar(argument)),
        Arity::Optional => format!(" [{m}]", m = HelpFormatter::metavar(argument)),
    }
}

fn usage_option(argument: &Argument) -> String {
    match argument.short_name() {
        Some(s) => format!("[-{s}{p}]", p = parameter(argument)),
        None => format!("[--{n}{p}]", n = argument.long_name(), p = parameter(argument)),
    }
}

fn description(argument: &Argument) -> String {
    if !argument.is_required() && argument.value_arity() != Arity::None {
        format!(
            "{h} (default: '{d}')",
            h = argument.help_text(),
            d = argument.default()
        )
    } else {
        argument.help_text().to_string()
    }
}

fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    wrap_tokens(&paragraph.split_whitespace().collect::<Vec<&str>>(), width)
}

/// Greedily pack `tokens` into lines no wider than `width`, separated by single spaces.
///
/// A token wider than `width` is never split; it stands alone on its own line.
/// Empty tokens are skipped.
///
/// ### Example
/// ```
/// # use cmdarg_builder as cmdarg;
/// use cmdarg::wrap_tokens;
///
/// assert_eq!(wrap_tokens(&["alpha", "beta", "gamma"], 10), vec!["alpha beta", "gamma"]);
/// ```
pub fn wrap_tokens<S: AsRef<str>>(tokens: &[S], width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();
    let mut current_width = 0;

    for token in tokens {
        let token = token.as_ref();

        if token.is_empty() {
            continue;
        }

        let token_width = token.chars().count();

        if current.is_empty() {
            current.push_str(token);
            current_width = token_width;
        } else if current_width + token_width + 1 > width {
            lines.push(std::mem::take(&mut current));
            current.push_str(token);
            current_width = token_width;
        } else {
            current.push(' ');
            current.push_str(token);
            current_width += token_width + 1;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
