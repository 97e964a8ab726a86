use serde::Serialize;

use super::rules::scored_pairs;
use super::strategy::{ConstraintChecker, EvaluationContext};
use crate::domain::Constraint;

/// A broken rule together with a readable explanation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintViolation {
    pub constraint: Constraint,
    pub detail: String,
}

/// Caller-supplied rule set checked against each combination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintSet {
    rules: Vec<Constraint>,
}

impl ConstraintSet {
    pub fn new(rules: Vec<Constraint>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Constraint] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every rule the combination breaks, in declaration order.
    pub fn violations(&self, context: &EvaluationContext<'_>) -> Vec<ConstraintViolation> {
        self.rules
            .iter()
            .filter_map(|rule| {
                check(rule, context).map(|detail| ConstraintViolation {
                    constraint: rule.clone(),
                    detail,
                })
            })
            .collect()
    }
}

impl ConstraintChecker for ConstraintSet {
    fn is_satisfied(&self, context: &EvaluationContext<'_>) -> bool {
        self.rules.iter().all(|rule| check(rule, context).is_none())
    }
}

fn check(rule: &Constraint, context: &EvaluationContext<'_>) -> Option<String> {
    let selected = context.selected;
    match rule {
        Constraint::Excludes {
            attribute_a,
            attribute_b,
        } => (selected.contains(&attribute_a) && selected.contains(&attribute_b))
            .then(|| format!("{attribute_a} cannot be combined with {attribute_b}")),
        Constraint::Requires {
            attribute,
            requires,
        } => (selected.contains(&attribute) && !selected.contains(&requires))
            .then(|| format!("{attribute} requires {requires}")),
        Constraint::MinimumCompatibility { level } => {
            scored_pairs(selected, context.compatibility)
                .into_iter()
                .find(|(_, _, found)| found < level)
                .map(|(first, second, found)| {
                    format!(
                        "{first} and {second} score {} below minimum {}",
                        found.value(),
                        level.value()
                    )
                })
        }
    }
}
