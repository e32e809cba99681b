use std::collections::{BTreeMap, HashMap};

use crate::api::Argument;
use crate::model::Arity;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct FlagConfig {
    name: String,
    short: Option<char>,
    arity: Arity,
}

impl FlagConfig {
    pub(crate) fn new(name: impl Into<String>, short: Option<char>, arity: Arity) -> Self {
        Self {
            name: name.into(),
            short,
            arity,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn short(&self) -> &Option<char> {
        &self.short
    }

    pub(crate) fn arity(&self) -> Arity {
        self.arity
    }
}

impl From<&Argument> for FlagConfig {
    fn from(value: &Argument) -> Self {
        FlagConfig::new(value.long_name(), value.short_name(), value.value_arity())
    }
}

/// The result of resolving a (possibly abbreviated) long option name.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum LongMatch {
    Found(usize),
    Ambiguous(Vec<String>),
    Missing,
}

/// Lookup from `--long` / `-s` names to the index of the flag configuration.
#[derive(Debug, Default)]
pub(crate) struct FlagTable {
    configs: Vec<FlagConfig>,
    long: BTreeMap<String, usize>,
    short: HashMap<char, usize>,
}

impl FlagTable {
    pub(crate) fn new(configs: Vec<FlagConfig>) -> Self {
        let mut long = BTreeMap::default();
        let mut short = HashMap::default();

        for (index, config) in configs.iter().enumerate() {
            // Duplicates are rejected at registration, so the first occurrence always wins here.
            long.entry(config.name().to_string()).or_insert(index);

            if let Some(s) = config.short() {
                short.entry(*s).or_insert(index);
            }
        }

        Self {
            configs,
            long,
            short,
        }
    }

    pub(crate) fn config(&self, index: usize) -> &FlagConfig {
        &self.configs[index]
    }

    pub(crate) fn contains_short(&self, short: char) -> bool {
        self.short.contains_key(&short)
    }

    pub(crate) fn find_short(&self, short: char) -> Option<usize> {
        self.short.get(&short).copied()
    }

    /// Resolve a long option name.
    /// An exact match always wins, otherwise `name` may be an unambiguous prefix of a single long option.
    pub(crate) fn find_long(&self, name: &str) -> LongMatch {
        if name.is_empty() {
            return LongMatch::Missing;
        }

        if let Some(index) = self.long.get(name) {
            return LongMatch::Found(*index);
        }

        let candidates: Vec<(&String, &usize)> = self
            .long
            .range(name.to_string()..)
            .take_while(|(long, _)| long.starts_with(name))
            .collect();

        match candidates.as_slice() {
            [] => LongMatch::Missing,
            [(_, index)] => LongMatch::Found(**index),
            _ => LongMatch::Ambiguous(
                candidates
                    .into_iter()
                    .map(|(long, _)| long.clone())
                    .collect(),
            ),
        }
    }
}
