//! Predicate evaluation - how guard conditions ask questions about the world.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Something that can judge named predicates.
///
/// Returns `Some(true)` or `Some(false)` for predicates it knows about and
/// `None` to abstain, so several evaluators with disjoint catalogs can be
/// registered side by side.
pub trait PredicateEvaluator {
    fn evaluate(&self, predicate: &str, parameters: &[String]) -> Option<bool>;
}

impl<E: PredicateEvaluator + ?Sized> PredicateEvaluator for Box<E> {
    fn evaluate(&self, predicate: &str, parameters: &[String]) -> Option<bool> {
        (**self).evaluate(predicate, parameters)
    }
}

/// Shared evaluators let trigger handlers mutate the state a guard reads
/// later in the same conversation.
impl<E: PredicateEvaluator + ?Sized> PredicateEvaluator for Rc<RefCell<E>> {
    fn evaluate(&self, predicate: &str, parameters: &[String]) -> Option<bool> {
        self.borrow().evaluate(predicate, parameters)
    }
}

/// A fixed answer table keyed by predicate name and parameters.
///
/// Useful for tests and for hosts that precompute answers once per frame.
#[derive(Debug, Clone, Default)]
pub struct PredicateTable {
    answers: HashMap<(String, Vec<String>), bool>,
}

impl PredicateTable {
    /// Create an empty table that abstains on everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer for a predicate with no parameters.
    pub fn with(self, predicate: impl Into<String>, answer: bool) -> Self {
        self.with_params(predicate, Vec::<String>::new(), answer)
    }

    /// Record an answer for a predicate with the given parameters.
    pub fn with_params<P, S>(mut self, predicate: impl Into<String>, parameters: P, answer: bool) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(predicate, parameters, answer);
        self
    }

    /// Record or overwrite an answer.
    pub fn set<P, S>(&mut self, predicate: impl Into<String>, parameters: P, answer: bool)
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = (
            predicate.into(),
            parameters.into_iter().map(Into::into).collect(),
        );
        self.answers.insert(key, answer);
    }

    /// Forget an answer so the table abstains on it again.
    pub fn clear(&mut self, predicate: &str, parameters: &[String]) {
        self.answers
            .remove(&(predicate.to_string(), parameters.to_vec()));
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl PredicateEvaluator for PredicateTable {
    fn evaluate(&self, predicate: &str, parameters: &[String]) -> Option<bool> {
        self.answers
            .get(&(predicate.to_string(), parameters.to_vec()))
            .copied()
    }
}
