/// Behaviour for the output and error streams a parser reports to.
///
/// The default is [`ConsoleInterface`].
/// Implement this to capture the help and error messages elsewhere.
///
/// ### Example
/// ```
/// # use cmdarg_builder as cmdarg;
/// use cmdarg::prelude::*;
/// use std::sync::{Arc, Mutex};
///
/// #[derive(Default)]
/// struct Recorder {
///     errors: Arc<Mutex<Vec<String>>>,
/// }
///
/// impl UserInterface for Recorder {
///     fn print(&self, _message: String) {}
///
///     fn print_error(&self, message: String) {
///         self.errors.lock().unwrap().push(message);
///     }
/// }
/// ```
pub trait UserInterface {
    /// Write a line to the output stream.
    fn print(&self, message: String);

    /// Write a line to the error stream.
    fn print_error(&self, message: String);
}

/// Reports to stdout/stderr.
#[derive(Debug, Default)]
pub struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, message: String) {
        eprintln!("{message}");
    }
}
