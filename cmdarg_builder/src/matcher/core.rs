use std::collections::VecDeque;
use thiserror::Error;

use crate::matcher::model::*;
use crate::model::Arity;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum MatchError {
    #[error("unrecognized option '--{0}'")]
    UnrecognizedOption(String),

    #[error("invalid option -- '{0}'")]
    InvalidShortOption(char),

    #[error("option '--{0}' doesn't allow an argument")]
    UnexpectedValue(String),

    #[error("option '--{0}' requires an argument")]
    MissingValue(String),

    #[error("option requires an argument -- '{0}'")]
    MissingShortValue(char),

    #[error("option '--{name}' is ambiguous; possibilities: {possibilities}")]
    Ambiguous { name: String, possibilities: String },
}

/// A single unit of the Cli, as seen by the flag scan.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Scanned {
    /// The flag at `index` of the flag table, with its value (if any was supplied).
    Flag { index: usize, value: Option<String> },
    /// A token which is not a flag; deferred to the positional phase.
    Positional(String),
}

/// Getopt style scanner over the Cli tokens.
///
/// Non-flag tokens are permuted out of the way (yielded as `Scanned::Positional`) so that flags may appear anywhere.
/// The scanner stops interpreting flags after the `--` terminator.
pub(crate) struct TokenScanner<'t, 's> {
    table: &'t FlagTable,
    tokens: std::slice::Iter<'s, &'s str>,
    pending: VecDeque<Result<Scanned, MatchError>>,
    terminated: bool,
}

impl<'t, 's> TokenScanner<'t, 's> {
    pub(crate) fn new(table: &'t FlagTable, tokens: &'s [&'s str]) -> Self {
        Self {
            table,
            tokens: tokens.iter(),
            pending: VecDeque::default(),
            terminated: false,
        }
    }

    fn match_option(&mut self, token: &str) -> Result<Scanned, MatchError> {
        let (option_name, single_argument) = split_equals_delimiter(token);
        let index = match self.table.find_long(option_name) {
            LongMatch::Found(index) => index,
            LongMatch::Ambiguous(candidates) => {
                return Err(MatchError::Ambiguous {
                    name: option_name.to_string(),
                    possibilities: candidates
                        .iter()
                        .map(|c| format!("'--{c}'"))
                        .collect::<Vec<String>>()
                        .join(" "),
                });
            }
            LongMatch::Missing => return Err(MatchError::UnrecognizedOption(token.to_string())),
        };
        let config = self.table.config(index);

        match (config.arity(), single_argument) {
            (Arity::None, Some(_)) => Err(MatchError::UnexpectedValue(config.name().to_string())),
            (Arity::None, None) => Ok(Scanned::Flag { index, value: None }),
            (Arity::Required, Some(value)) => Ok(Scanned::Flag {
                index,
                value: Some(value.to_string()),
            }),
            // The value is the next token, whatever it looks like.
            (Arity::Required, None) => match self.tokens.next() {
                Some(value) => Ok(Scanned::Flag {
                    index,
                    value: Some(value.to_string()),
                }),
                None => Err(MatchError::MissingValue(config.name().to_string())),
            },
            // Optional values are only ever taken via '=', never from the next token.
            (Arity::Optional, value) => Ok(Scanned::Flag {
                index,
                value: value.map(str::to_string),
            }),
        }
    }

    fn match_option_short(&mut self, short_option_name: &str) {
        for (offset, single) in short_option_name.char_indices() {
            let index = match self.table.find_short(single) {
                Some(index) => index,
                None => {
                    self.pending
                        .push_back(Err(MatchError::InvalidShortOption(single)));
                    return;
                }
            };
            // Everything after this character in the token (ex: "10" in "-c10").
            let attached = &short_option_name[offset + single.len_utf8()..];

            match self.table.config(index).arity() {
                Arity::None => {
                    self.pending
                        .push_back(Ok(Scanned::Flag { index, value: None }));
                }
                Arity::Required => {
                    let item = if !attached.is_empty() {
                        Ok(Scanned::Flag {
                            index,
                            value: Some(attached.to_string()),
                        })
                    } else {
                        match self.tokens.next() {
                            Some(value) => Ok(Scanned::Flag {
                                index,
                                value: Some(value.to_string()),
                            }),
                            None => Err(MatchError::MissingShortValue(single)),
                        }
                    };
                    self.pending.push_back(item);
                    return;
                }
                Arity::Optional => {
                    let value = if attached.is_empty() {
                        None
                    } else {
                        Some(attached.to_string())
                    };
                    self.pending.push_back(Ok(Scanned::Flag { index, value }));
                    return;
                }
            }
        }
    }
}

impl<'t, 's> Iterator for TokenScanner<'t, 's> {
    type Item = Result<Scanned, MatchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(item) = self.pending.pop_front() {
            return Some(item);
        }

        let token = *self.tokens.next()?;

        if self.terminated {
            return Some(Ok(Scanned::Positional(token.to_string())));
        }

        // 1. The terminator '--': everything afterwards is positional.
        // 2. Find a 'long' flag, such as:
        //  --initial
        //  --initial ..
        //  --initial=..
        // 3. Find 'short' flag(s), such as (both -i and -v are example short flags):
        //  -i
        //  -i..
        //  -i ..
        //  -vi..
        //  -vi ..
        // 4. Anything else (including a lone '-') is positional.
        if token == "--" {
            self.terminated = true;
            self.next()
        } else if let Some(option) = token.strip_prefix("--") {
            Some(self.match_option(option))
        } else if let Some(short_options) = token.strip_prefix('-').filter(|s| !s.is_empty()) {
            self.match_option_short(short_options);
            self.pending.pop_front()
        } else {
            Some(Ok(Scanned::Positional(token.to_string())))
        }
    }
}

fn split_equals_delimiter(token: &str) -> (&str, Option<&str>) {
    match token.split_once('=') {
        Some((n, v)) => (n, Some(v)),
        None => (token, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const HELP: usize = 0;
    const COUNT: usize = 1;
    const VERBOSE: usize = 2;
    const LEVEL: usize = 3;
    const CARRAMBA: usize = 4;

    fn table() -> FlagTable {
        FlagTable::new(vec![
            FlagConfig::new("help", Some('h'), Arity::None),
            FlagConfig::new("count", Some('c'), Arity::Required),
            FlagConfig::new("verbose", Some('v'), Arity::None),
            FlagConfig::new("level", Some('l'), Arity::Optional),
            FlagConfig::new("carramba", None, Arity::None),
        ])
    }

    fn flag(index: usize, value: Option<&str>) -> Result<Scanned, MatchError> {
        Ok(Scanned::Flag {
            index,
            value: value.map(str::to_string),
        })
    }

    fn positional(token: &str) -> Result<Scanned, MatchError> {
        Ok(Scanned::Positional(token.to_string()))
    }

    fn scan(tokens: &[&str]) -> Vec<Result<Scanned, MatchError>> {
        let table = table();
        TokenScanner::new(&table, tokens).collect()
    }

    #[test]
    fn scan_empty() {
        assert_eq!(scan(empty::slice()), vec![]);
    }

    #[rstest]
    #[case(vec!["--help"], vec![flag(HELP, None)])]
    #[case(vec!["-h"], vec![flag(HELP, None)])]
    #[case(vec!["--count", "10"], vec![flag(COUNT, Some("10"))])]
    #[case(vec!["--count=10"], vec![flag(COUNT, Some("10"))])]
    #[case(vec!["--count=10=11"], vec![flag(COUNT, Some("10=11"))])]
    #[case(vec!["--count="], vec![flag(COUNT, Some(""))])]
    #[case(vec!["-c", "10"], vec![flag(COUNT, Some("10"))])]
    #[case(vec!["-c10"], vec![flag(COUNT, Some("10"))])]
    #[case(vec!["-c", "-3"], vec![flag(COUNT, Some("-3"))])]
    #[case(vec!["--count", "--help"], vec![flag(COUNT, Some("--help"))])]
    #[case(vec!["--level"], vec![flag(LEVEL, None)])]
    #[case(vec!["--level=2"], vec![flag(LEVEL, Some("2"))])]
    #[case(vec!["--level", "2"], vec![flag(LEVEL, None), positional("2")])]
    #[case(vec!["-l"], vec![flag(LEVEL, None)])]
    #[case(vec!["-l2"], vec![flag(LEVEL, Some("2"))])]
    #[case(vec!["-l", "2"], vec![flag(LEVEL, None), positional("2")])]
    #[case(vec!["--cou", "1"], vec![flag(COUNT, Some("1"))])]
    #[case(vec!["--carr"], vec![flag(CARRAMBA, None)])]
    fn scan_flag(
        #[case] tokens: Vec<&str>,
        #[case] expected: Vec<Result<Scanned, MatchError>>,
    ) {
        assert_eq!(scan(tokens.as_slice()), expected);
    }

    #[rstest]
    #[case(vec!["-vh"], vec![flag(VERBOSE, None), flag(HELP, None)])]
    #[case(vec!["-vvv"], vec![flag(VERBOSE, None), flag(VERBOSE, None), flag(VERBOSE, None)])]
    #[case(vec!["-vc", "10"], vec![flag(VERBOSE, None), flag(COUNT, Some("10"))])]
    #[case(vec!["-vc10"], vec![flag(VERBOSE, None), flag(COUNT, Some("10"))])]
    #[case(vec!["-cv"], vec![flag(COUNT, Some("v"))])]
    #[case(vec!["-vl2"], vec![flag(VERBOSE, None), flag(LEVEL, Some("2"))])]
    #[case(vec!["-lv"], vec![flag(LEVEL, Some("v"))])]
    fn scan_short_cluster(
        #[case] tokens: Vec<&str>,
        #[case] expected: Vec<Result<Scanned, MatchError>>,
    ) {
        assert_eq!(scan(tokens.as_slice()), expected);
    }

    #[rstest]
    #[case(vec!["a", "b"], vec![positional("a"), positional("b")])]
    #[case(vec!["a", "-v", "b"], vec![positional("a"), flag(VERBOSE, None), positional("b")])]
    #[case(vec!["-"], vec![positional("-")])]
    #[case(vec!["--", "-v", "--help"], vec![positional("-v"), positional("--help")])]
    #[case(vec!["-v", "--", "--", "a"], vec![flag(VERBOSE, None), positional("--"), positional("a")])]
    fn scan_positional(
        #[case] tokens: Vec<&str>,
        #[case] expected: Vec<Result<Scanned, MatchError>>,
    ) {
        assert_eq!(scan(tokens.as_slice()), expected);
    }

    #[rstest]
    #[case(vec!["--unknown"], MatchError::UnrecognizedOption("unknown".to_string()))]
    #[case(vec!["--unknown=1"], MatchError::UnrecognizedOption("unknown=1".to_string()))]
    #[case(vec!["-x"], MatchError::InvalidShortOption('x'))]
    #[case(vec!["--help=1"], MatchError::UnexpectedValue("help".to_string()))]
    #[case(vec!["--hel=1"], MatchError::UnexpectedValue("help".to_string()))]
    #[case(vec!["--count"], MatchError::MissingValue("count".to_string()))]
    #[case(vec!["-c"], MatchError::MissingShortValue('c'))]
    #[case(vec!["--c"], MatchError::Ambiguous { name: "c".to_string(), possibilities: "'--carramba' '--count'".to_string() })]
    fn scan_error(#[case] tokens: Vec<&str>, #[case] expected: MatchError) {
        assert_eq!(scan(tokens.as_slice()), vec![Err(expected)]);
    }

    #[test]
    fn scan_error_mid_cluster() {
        // Flags ahead of the invalid short option are still reported first.
        assert_eq!(
            scan(&["-vxh"]),
            vec![flag(VERBOSE, None), Err(MatchError::InvalidShortOption('x'))]
        );
    }

    #[test]
    fn match_error_display() {
        assert_eq!(
            MatchError::InvalidShortOption('x').to_string(),
            "invalid option -- 'x'"
        );
        assert_eq!(
            MatchError::Ambiguous {
                name: "c".to_string(),
                possibilities: "'--carramba' '--count'".to_string()
            }
            .to_string(),
            "option '--c' is ambiguous; possibilities: '--carramba' '--count'"
        );
    }
}
