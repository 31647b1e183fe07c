//! World state - the global flags dialogue guards and action triggers share.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::predicates::PredicateEvaluator;

/// Predicate names answered by [`WorldState`].
pub const HAS_FLAG: &str = "HasFlag";
pub const FLAG_EQUALS: &str = "FlagEquals";
pub const FLAG_AT_LEAST: &str = "FlagAtLeast";

/// Flag value types for global state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FlagValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl FlagValue {
    /// Interpret a textual predicate parameter as the narrowest matching value.
    pub fn parse(raw: &str) -> Self {
        if let Ok(b) = raw.parse::<bool>() {
            FlagValue::Bool(b)
        } else if let Ok(i) = raw.parse::<i64>() {
            FlagValue::Int(i)
        } else if let Ok(f) = raw.parse::<f64>() {
            FlagValue::Float(f)
        } else {
            FlagValue::String(raw.to_string())
        }
    }

    /// Whether the flag counts as "set".
    pub fn is_truthy(&self) -> bool {
        match self {
            FlagValue::Bool(b) => *b,
            FlagValue::Int(i) => *i != 0,
            FlagValue::Float(f) => *f != 0.0,
            FlagValue::String(s) => !s.is_empty(),
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            FlagValue::Int(i) => Some(*i as f64),
            FlagValue::Float(f) => Some(*f),
            _ => None,
        }
    }
}

/// Global flags and variables shared by everything that talks.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorldState {
    pub global_flags: HashMap<String, FlagValue>,
}

impl WorldState {
    /// Create a new empty world state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or overwrite a flag.
    pub fn set_flag(&mut self, name: impl Into<String>, value: FlagValue) {
        self.global_flags.insert(name.into(), value);
    }

    /// Get a flag by name.
    pub fn flag(&self, name: &str) -> Option<&FlagValue> {
        self.global_flags.get(name)
    }

    /// Remove a flag, returning its previous value.
    pub fn clear_flag(&mut self, name: &str) -> Option<FlagValue> {
        self.global_flags.remove(name)
    }
}

impl PredicateEvaluator for WorldState {
    /// Answers `HasFlag [name]`, `FlagEquals [name, value]` and
    /// `FlagAtLeast [name, number]`; abstains on anything else, including
    /// known predicates called with the wrong arity.
    fn evaluate(&self, predicate: &str, parameters: &[String]) -> Option<bool> {
        match (predicate, parameters) {
            (HAS_FLAG, [name]) => Some(self.flag(name).is_some_and(FlagValue::is_truthy)),
            (FLAG_EQUALS, [name, expected]) => {
                let expected = FlagValue::parse(expected);
                Some(match (self.flag(name), &expected) {
                    (None, _) => false,
                    (Some(actual), expected) => match (actual.as_f64(), expected.as_f64()) {
                        (Some(a), Some(e)) => a == e,
                        _ => actual == expected,
                    },
                })
            }
            (FLAG_AT_LEAST, [name, threshold]) => {
                let threshold = threshold.parse::<f64>().ok()?;
                Some(
                    self.flag(name)
                        .and_then(FlagValue::as_f64)
                        .is_some_and(|value| value >= threshold),
                )
            }
            _ => None,
        }
    }
}
