use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::*;
use crate::parser::ConfigError;

/// A catalog of named actions.
///
/// [`ActionRegistry::builtin`] contains every built-in action under its conventional name:
/// * `store_string`, `store_true`, `store_false`, `show_help_and_exit`.
/// * `store_<type>`: any number of `<type>`.
/// * `store_<constraint>_<type>`: a number of `<type>` satisfying `<constraint>`.
/// * `increment_<type>`: add one to the stored `<type>`.
///
/// Where `<type>` is one of `int` (`i32`), `long` (`i64`), `long_long` (`i64`), `float` (`f32`), `double` (`f64`),
/// and `<constraint>` is one of `positive`, `negative`, `nonpositive`, `nonnegative`, `nonzero`.
///
/// ### Example
/// ```
/// # use cmdarg_builder as cmdarg;
/// use cmdarg::{ActionRegistry, Argument, Arity};
///
/// let registry = ActionRegistry::builtin();
/// let count = Argument::option("count")
///     .arity(Arity::Required)
///     .shared_action(registry.get("store_positive_int").unwrap());
///
/// assert_eq!(count.apply("", "3").unwrap(), "3");
/// assert!(count.apply("", "-3").is_err());
/// ```
pub struct ActionRegistry {
    actions: BTreeMap<String, Arc<dyn Action>>,
}

impl ActionRegistry {
    /// Create a registry without any actions.
    pub fn empty() -> Self {
        Self {
            actions: BTreeMap::default(),
        }
    }

    /// Create a registry with all the built-in actions.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register("store_string", StoreString);
        registry.register("store_true", StoreTrue);
        registry.register("store_false", StoreFalse);
        registry.register("show_help_and_exit", ShowHelp);
        registry.register_numeric::<i32>("int");
        registry.register_numeric::<i64>("long");
        registry.register_numeric::<i64>("long_long");
        registry.register_numeric::<f32>("float");
        registry.register_numeric::<f64>("double");
        registry
    }

    fn register_numeric<T: Numeric>(&mut self, type_name: &str) {
        for constraint in Constraint::ALL {
            let name = match constraint.qualifier() {
                Some(qualifier) => format!("store_{qualifier}_{type_name}"),
                None => format!("store_{type_name}"),
            };
            self.register(name, StoreNumber::<T>::new(constraint));
        }

        self.register(format!("increment_{type_name}"), Increment::<T>::new());
    }

    /// Add an action under `name`.
    /// If the name is already taken, the previous action is replaced and returned.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        action: impl Action + 'static,
    ) -> Option<Arc<dyn Action>> {
        self.actions.insert(name.into(), Arc::new(action))
    }

    /// Look up the action registered under `name`.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Action>, ConfigError> {
        self.actions
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownAction(name.to_string()))
    }

    /// Whether an action is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// The registered names, in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.actions.keys()).finish()
    }
}
