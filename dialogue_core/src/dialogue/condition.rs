//! Guard conditions - boolean expressions over named predicates.

use conversants::PredicateEvaluator;
use serde::{Deserialize, Serialize};

/// A single predicate clause, optionally negated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub negate: bool,
}

impl Predicate {
    /// Create a predicate clause with no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            negate: false,
        }
    }

    /// Append a parameter.
    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameters.push(parameter.into());
        self
    }

    /// Invert the clause.
    pub fn negated(mut self) -> Self {
        self.negate = !self.negate;
        self
    }

    /// Judge this clause against every evaluator that answers it.
    ///
    /// Answers are AND-ed together and abstentions ignored. If nobody answers
    /// the clause fails closed, whether or not it is negated.
    pub fn check(&self, evaluators: &[&dyn PredicateEvaluator]) -> bool {
        let mut answered = false;
        let mut consensus = true;

        for evaluator in evaluators {
            if let Some(answer) = evaluator.evaluate(&self.name, &self.parameters) {
                answered = true;
                consensus &= answer;
            }
        }

        answered && consensus != self.negate
    }
}

/// Clauses that must all hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateGroup {
    pub clauses: Vec<Predicate>,
}

impl PredicateGroup {
    pub fn all_of(clauses: impl IntoIterator<Item = Predicate>) -> Self {
        Self {
            clauses: clauses.into_iter().collect(),
        }
    }

    pub fn check(&self, evaluators: &[&dyn PredicateEvaluator]) -> bool {
        self.clauses.iter().all(|clause| clause.check(evaluators))
    }
}

/// An OR of AND-groups. No groups means the condition always passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub groups: Vec<PredicateGroup>,
}

impl Condition {
    /// A condition that always passes.
    pub fn always() -> Self {
        Self::default()
    }

    /// Passes when any of the groups passes.
    pub fn any_of(groups: impl IntoIterator<Item = PredicateGroup>) -> Self {
        Self {
            groups: groups.into_iter().collect(),
        }
    }

    /// Shorthand for a single one-clause group.
    pub fn when(predicate: Predicate) -> Self {
        Self::any_of([PredicateGroup::all_of([predicate])])
    }

    /// Add another alternative group.
    pub fn or(mut self, group: PredicateGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn is_unconditional(&self) -> bool {
        self.groups.is_empty()
    }

    /// Evaluate the condition. Pure; safe to call repeatedly.
    pub fn check(&self, evaluators: &[&dyn PredicateEvaluator]) -> bool {
        self.is_unconditional() || self.groups.iter().any(|group| group.check(evaluators))
    }
}
