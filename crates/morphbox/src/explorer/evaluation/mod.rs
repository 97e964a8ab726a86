mod constraints;
mod rules;
mod strategy;

pub use constraints::{ConstraintSet, ConstraintViolation};
pub use strategy::{
    ConstraintChecker, EvaluationContext, InnovationStrategy, PendingInnovation, RandomInnovation,
    Unconstrained,
};

use crate::domain::{Combination, CompatibilityTable, MorphologicalBox, Parameter, Principle};
use rules::resolved_attributes;
use serde::{Deserialize, Serialize};

/// Stateless scorer for a single combination.
///
/// Innovation and constraint checks are strategies so callers can swap in real
/// logic; the defaults leave innovation unscored and admit everything.
#[derive(Debug, Clone, Default)]
pub struct CombinationEvaluator<I = PendingInnovation, C = Unconstrained> {
    innovation: I,
    constraints: C,
}

impl CombinationEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluator enforcing the constraints declared on `explorer_box`.
    pub fn for_box(
        explorer_box: &MorphologicalBox,
    ) -> CombinationEvaluator<PendingInnovation, ConstraintSet> {
        Self::new().with_constraints(ConstraintSet::new(explorer_box.constraints.clone()))
    }
}

impl<I, C> CombinationEvaluator<I, C>
where
    I: InnovationStrategy,
    C: ConstraintChecker,
{
    pub fn with_strategies(innovation: I, constraints: C) -> Self {
        Self {
            innovation,
            constraints,
        }
    }

    pub fn with_innovation<J: InnovationStrategy>(
        self,
        innovation: J,
    ) -> CombinationEvaluator<J, C> {
        CombinationEvaluator {
            innovation,
            constraints: self.constraints,
        }
    }

    pub fn with_constraints<D: ConstraintChecker>(
        self,
        constraints: D,
    ) -> CombinationEvaluator<I, D> {
        CombinationEvaluator {
            innovation: self.innovation,
            constraints,
        }
    }

    pub fn constraints(&self) -> &C {
        &self.constraints
    }

    /// Score `combination` on every axis. Never fails; degenerate inputs fall
    /// back to the neutral defaults.
    pub fn evaluate(
        &self,
        combination: &Combination,
        parameters: &[Parameter],
        compatibility: &CompatibilityTable,
        principles: &[Principle],
    ) -> CombinationScore {
        let selected = resolved_attributes(combination, parameters);
        let context = EvaluationContext {
            combination,
            parameters,
            compatibility,
            principles,
            selected: &selected,
        };

        CombinationScore {
            compatibility_score: rules::compatibility_score(&selected, compatibility),
            technical_score: rules::technical_score(combination, parameters),
            innovation_score: self
                .innovation
                .score(&context)
                .filter(|score| score.is_finite())
                .map(|score| score.clamp(0.0, rules::MAX_SCORE)),
            principle_score: rules::principle_score(&selected, principles),
            constraints_satisfied: self.constraints.is_satisfied(&context),
        }
    }
}

impl<I> CombinationEvaluator<I, ConstraintSet>
where
    I: InnovationStrategy,
{
    /// Rules broken by `combination`, for diagnostics alongside a score.
    pub fn violations(
        &self,
        combination: &Combination,
        parameters: &[Parameter],
        compatibility: &CompatibilityTable,
        principles: &[Principle],
    ) -> Vec<ConstraintViolation> {
        let selected = resolved_attributes(combination, parameters);
        let context = EvaluationContext {
            combination,
            parameters,
            compatibility,
            principles,
            selected: &selected,
        };
        self.constraints.violations(&context)
    }
}

/// Per-axis scores on a `0..=100` scale plus the constraint verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationScore {
    pub compatibility_score: f64,
    pub technical_score: f64,
    /// `None` while no innovation formula is configured.
    pub innovation_score: Option<f64>,
    pub principle_score: f64,
    pub constraints_satisfied: bool,
}

impl CombinationScore {
    /// Mean of the scored axes; innovation only counts once it has a value.
    pub fn overall(&self) -> f64 {
        let mut total = self.compatibility_score + self.technical_score + self.principle_score;
        let mut axes = 3.0;
        if let Some(innovation) = self.innovation_score {
            total += innovation;
            axes += 1.0;
        }
        total / axes
    }
}
