use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;
use thiserror::Error;

use crate::api::Argument;
use crate::constant::*;

/// Behaviour to convert and validate the raw input of an [`Argument`].
///
/// An action receives the currently stored value and the raw input token, and returns the new value to store.
/// The parser only commits the returned value on `Ok`; an `Err` aborts the parse.
///
/// Any closure of the form `Fn(&str, &Argument, &str) -> Result<String, ActionError>` is an `Action`.
///
/// ### Example
/// ```
/// # use cmdarg_builder as cmdarg;
/// use cmdarg::{Action, ActionError, Argument};
///
/// let shout = |_current: &str, _argument: &Argument, raw: &str| -> Result<String, ActionError> {
///     Ok(raw.to_uppercase())
/// };
/// let argument = Argument::option("name");
///
/// assert_eq!(shout.apply("", &argument, "abc").unwrap(), "ABC");
/// ```
pub trait Action: Send + Sync {
    /// Compute the new value for `argument`, given its `current` stored value and the `raw` input.
    fn apply(&self, current: &str, argument: &Argument, raw: &str) -> Result<String, ActionError>;
}

impl<F> Action for F
where
    F: Fn(&str, &Argument, &str) -> Result<String, ActionError> + Send + Sync,
{
    fn apply(&self, current: &str, argument: &Argument, raw: &str) -> Result<String, ActionError> {
        self(current, argument, raw)
    }
}

/// The failure outcome of an [`Action`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    /// Not a true error: the help switch was encountered.
    /// The parser resolves this by displaying the help message and exiting successfully.
    #[error("help requested.")]
    HelpRequested,

    /// The raw input was rejected.
    #[error("argument {flag}: invalid value '{value}' ({reason}).")]
    InvalidValue {
        /// The flag(s) of the offending argument (ex: `-c/--count`).
        flag: String,
        /// The rejected literal.
        value: String,
        /// Why the literal was rejected.
        reason: String,
    },
}

impl ActionError {
    /// Reject `value` for `argument`.
    pub fn invalid(argument: &Argument, value: impl Into<String>, reason: impl Into<String>) -> Self {
        ActionError::InvalidValue {
            flag: argument.label(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Store the raw input verbatim.
#[derive(Debug, Default, Clone, Copy)]
pub struct StoreString;

impl Action for StoreString {
    fn apply(&self, _current: &str, _argument: &Argument, raw: &str) -> Result<String, ActionError> {
        Ok(raw.to_string())
    }
}

/// Store `"true"`, ignoring the raw input.
#[derive(Debug, Default, Clone, Copy)]
pub struct StoreTrue;

impl Action for StoreTrue {
    fn apply(&self, _current: &str, _argument: &Argument, _raw: &str) -> Result<String, ActionError> {
        Ok(TRUE_VALUE.to_string())
    }
}

/// Store `"false"`, ignoring the raw input.
#[derive(Debug, Default, Clone, Copy)]
pub struct StoreFalse;

impl Action for StoreFalse {
    fn apply(&self, _current: &str, _argument: &Argument, _raw: &str) -> Result<String, ActionError> {
        Ok(FALSE_VALUE.to_string())
    }
}

/// Request the help message.
///
/// Always fails with [`ActionError::HelpRequested`], which the parser turns into "print help and exit successfully".
#[derive(Debug, Default, Clone, Copy)]
pub struct ShowHelp;

impl Action for ShowHelp {
    fn apply(&self, _current: &str, _argument: &Argument, _raw: &str) -> Result<String, ActionError> {
        Err(ActionError::HelpRequested)
    }
}

/// A numeric type usable with [`StoreNumber`] and [`Increment`].
pub trait Numeric: FromStr + PartialOrd + Display + Copy + Send + Sync + 'static {
    /// The name used when reporting a failed conversion.
    const TYPE_NAME: &'static str;
    /// The additive identity.
    const ZERO: Self;

    /// The value plus one.
    fn successor(self) -> Self;

    /// Whether the value is a finite numeral (rejects `NaN` and the infinities).
    fn is_number(self) -> bool;
}

macro_rules! integer_numeric {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                const TYPE_NAME: &'static str = stringify!($t);
                const ZERO: Self = 0;

                fn successor(self) -> Self {
                    self.saturating_add(1)
                }

                fn is_number(self) -> bool {
                    true
                }
            }
        )*
    };
}

macro_rules! float_numeric {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                const TYPE_NAME: &'static str = stringify!($t);
                const ZERO: Self = 0.0;

                fn successor(self) -> Self {
                    self + 1.0
                }

                fn is_number(self) -> bool {
                    self.is_finite()
                }
            }
        )*
    };
}

integer_numeric!(i32, i64, i128, u32, u64, usize);
float_numeric!(f32, f64);

/// The sign constraint enforced by a [`StoreNumber`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constraint {
    /// Any value is accepted.
    #[default]
    Any,
    /// `value > 0`
    Positive,
    /// `value < 0`
    Negative,
    /// `value <= 0`
    NonPositive,
    /// `value >= 0`
    NonNegative,
    /// `value != 0`
    NonZero,
}

impl Constraint {
    /// All the constraints, in catalog order.
    pub const ALL: [Constraint; 6] = [
        Constraint::Any,
        Constraint::Positive,
        Constraint::Negative,
        Constraint::NonPositive,
        Constraint::NonNegative,
        Constraint::NonZero,
    ];

    /// Check whether `value` satisfies this constraint.
    pub fn check<T: Numeric>(&self, value: T) -> bool {
        match self {
            Constraint::Any => true,
            Constraint::Positive => value > T::ZERO,
            Constraint::Negative => value < T::ZERO,
            Constraint::NonPositive => value <= T::ZERO,
            Constraint::NonNegative => value >= T::ZERO,
            Constraint::NonZero => value != T::ZERO,
        }
    }

    /// The qualifier used in the action catalog names (ex: `store_positive_int`).
    pub(crate) fn qualifier(&self) -> Option<&'static str> {
        match self {
            Constraint::Any => None,
            Constraint::Positive => Some("positive"),
            Constraint::Negative => Some("negative"),
            Constraint::NonPositive => Some("nonpositive"),
            Constraint::NonNegative => Some("nonnegative"),
            Constraint::NonZero => Some("nonzero"),
        }
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Constraint::Any => write!(f, "any"),
            Constraint::Positive => write!(f, "> 0"),
            Constraint::Negative => write!(f, "< 0"),
            Constraint::NonPositive => write!(f, "<= 0"),
            Constraint::NonNegative => write!(f, ">= 0"),
            Constraint::NonZero => write!(f, "!= 0"),
        }
    }
}

/// Validate the raw input as a number `T` satisfying a [`Constraint`].
///
/// On success the *original* raw text is stored, not a reformatted numeral (ex: `"007"` stays `"007"`).
/// Float specials (`NaN`, `inf`, `infinity`) are not numerals and always fail the conversion.
///
/// ### Example
/// ```
/// # use cmdarg_builder as cmdarg;
/// use cmdarg::{Action, Argument, Constraint, StoreNumber};
///
/// let action = StoreNumber::<i32>::new(Constraint::Positive);
/// let argument = Argument::option("count").short('c');
///
/// assert_eq!(action.apply("", &argument, "007").unwrap(), "007");
/// assert!(action.apply("", &argument, "0").is_err());
/// ```
pub struct StoreNumber<T> {
    constraint: Constraint,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: Numeric> StoreNumber<T> {
    /// Create a numeric store action.
    pub fn new(constraint: Constraint) -> Self {
        Self {
            constraint,
            _phantom: PhantomData,
        }
    }

    /// The constraint enforced by this action.
    pub fn constraint(&self) -> Constraint {
        self.constraint
    }
}

impl<T: Numeric> Default for StoreNumber<T> {
    fn default() -> Self {
        Self::new(Constraint::Any)
    }
}

impl<T: Numeric> Action for StoreNumber<T> {
    fn apply(&self, _current: &str, argument: &Argument, raw: &str) -> Result<String, ActionError> {
        match T::from_str(raw).ok().filter(|value| value.is_number()) {
            Some(value) if self.constraint.check(value) => Ok(raw.to_string()),
            Some(_) => Err(ActionError::invalid(
                argument,
                raw,
                format!("must be {} {}", T::TYPE_NAME, self.constraint),
            )),
            None => Err(ActionError::invalid(
                argument,
                raw,
                format!("cannot convert to {}", T::TYPE_NAME),
            )),
        }
    }
}

/// Add one to the stored value, ignoring the raw input.
///
/// An empty, unparsable or non-finite stored value counts as zero.
/// The result is stored reformatted (ex: `"007"` increments to `"8"`).
pub struct Increment<T> {
    _phantom: PhantomData<fn() -> T>,
}

impl<T: Numeric> Increment<T> {
    /// Create an increment action.
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<T: Numeric> Default for Increment<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Numeric> Action for Increment<T> {
    fn apply(&self, current: &str, _argument: &Argument, _raw: &str) -> Result<String, ActionError> {
        let value = T::from_str(current)
            .ok()
            .filter(|value| value.is_number())
            .unwrap_or(T::ZERO);
        Ok(value.successor().to_string())
    }
}
