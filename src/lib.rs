//! `cmdarg` is a declarative, getopt style command line option parser for Rust.
//!
//! Programs describe their command line as a list of [`Argument`]s, and `cmdarg` takes care of the rest:
//! scanning the Cli in the familiar GNU style, validating each value, and rendering a word wrapped help message.
//! Specifically, `cmdarg` attempts to prioritize the following design concerns:
//! * *Declarative arguments*:
//! Each argument is a plain value describing its names, whether it takes a value, its default, and its help text.
//! * *Familiar syntax*:
//! The Cli behaves like `getopt_long`: clustered short options, `--long=value`, unambiguous abbreviations, and the `--` terminator.
//! * *Pluggable validation*:
//! Every argument carries an [`Action`] which converts and validates its raw input (ex: "a positive `i32`").
//! Any closure can be an action.
//! * *Results, not exits*:
//! Parsing returns a typed outcome; the program decides when to exit.
//! [`CommandLineParser::parse`] is provided for the common case of exiting on error.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/cmdarg_demo.rs")]
//! ```
//!
//! At 80 columns, this produces the following help message:
//! ```console
//! $ cmdarg_demo -h
//! usage: cmdarg_demo [-h] [-c COUNT] [-s [SUPERCALIFRAGILISTICHESPIRALIDOSO]]
//!                    [--carramba] [-v] INPUT OUTPUT
//!
//! A test example for cmdarg
//!
//! Required positional arguments:
//!     INPUT                       The input file
//!     OUTPUT                      The output file
//!
//! Optional arguments:
//!     -h, --help                  Show this help message and exit
//!     -c, --count COUNT           A simple counter with a rather long helpful
//!                                 message indeed (default: '5')
//!     -s,
//!     --supercalifragilistichespiralidoso [SUPERCALIFRAGILISTICHESPIRALIDOSO]
//!                                 A very long thing to say in one sentence
//!                                 (default: '')
//!     --carramba                  What a surprise!
//!     -v, --verbose               Repeat for more output
//!
//! That's all folks!
//!
//! $ cmdarg_demo -vv --count 3 in.txt out.txt
//! carramba: false
//! count: 3
//! help: false
//! input: in.txt
//! output: out.txt
//! supercalifragilistichespiralidoso:
//! verbose: 2
//!
//! $ cmdarg_demo --count three in.txt out.txt
//! cmdarg_demo: argument -c/--count: invalid value 'three' (cannot convert to i32).
//!
//! usage: cmdarg_demo [-h] [-c COUNT] [-s [SUPERCALIFRAGILISTICHESPIRALIDOSO]]
//! <truncated>
//! ```
//!
//! # Arguments
//! There are two classes of [`Argument`]:
//! * [`Argument::option`]: optional, specified via `--NAME` (or `-N` when it has a short name).
//! Options keep their default value unless they appear on the Cli.
//! * [`Argument::positional`]: required, specified positionally.
//! Once all the options have been scanned, the remaining tokens are assigned to the positionals in the order they were added.
//!
//! Every parser has the built-in `-h`/`--help` option, whose value is `"false"` unless help is requested.
//!
//! The result of a parse is an [`Options`] map, from each argument's long name to its string-encoded value.
//!
//! ### Arity
//! An option's [`Arity`] controls whether it takes a value:
//! ```console
//! Arity    | Syntax                                         | Raw input passed to the action
//! ----------------------------------------------------------------------------------------------------
//! None     | --NAME, -N                                     | "" (an attached value is an error)
//! Required | --NAME VALUE, --NAME=VALUE, -N VALUE, -NVALUE  | VALUE (even when it starts with '-')
//! Optional | --NAME, --NAME=VALUE, -N, -NVALUE              | VALUE, or ""
//! ```
//! An optional value is only ever taken when attached; `--level 2` treats `2` as a positional.
//!
//! ### Actions
//! An [`Action`] receives the current stored value and the raw input, and returns the new value to store.
//! The built-in actions are:
//! * [`StoreString`] (the default), [`StoreTrue`], [`StoreFalse`], and [`ShowHelp`].
//! * [`StoreNumber`]: validates the raw input as a [`Numeric`] type satisfying a [`Constraint`], storing the input *as written*.
//! * [`Increment`]: adds one to the stored value, ignoring the raw input.
//! Use this for repeatable flags (ex: `-vvv`).
//!
//! Notice the asymmetry: `StoreNumber` keeps `"007"` as `"007"`, while `Increment` reformats it to `"8"`.
//!
//! An [`ActionRegistry`] catalogs the built-in actions by name (ex: `store_positive_int`, `increment_long`), and may be extended with custom ones.
//!
//! ### Flag syntax
//! * Options and positionals may be interleaved: `prog a -v b` is equivalent to `prog -v a b`.
//! * Short options may be clustered: `-vvc3` is equivalent to `-v -v -c 3`.
//! * Long options may be abbreviated to any unambiguous prefix: `--cou 3` is equivalent to `--count 3`.
//! * `--` ends option scanning; everything after it is positional (`-` on its own is always positional).
//! * Repeating an option re-applies its action.
//!
//! # Help
//! The [`HelpFormatter`] renders the usage line, the description, the required and optional argument sections, and the epilogue.
//! Its layout comes from [`FormatterParams`].
//! [`HelpFormatter::new`] uses the layout as given, while [`HelpFormatter::terminal`] sizes the help to the terminal (and never wraps when stdout is not a terminal).
//!
//! # Errors
//! * [`ConfigError`]: returned by [`CommandLineParser::add_argument`] for an invalid or duplicate argument; the parser is left unchanged.
//! * [`ParseError`]: returned by [`CommandLineParser::try_parse`] when help is requested, a value is rejected, or the Cli is malformed.
//! Each variant carries the rendered help, and [`ParseError::exit_code`] gives the conventional exit code.
//!
//! # Features
//! * `tracing_debug`: Emit `tracing` debug events while registering and parsing.
pub use cmdarg_builder::*;
