use serde::Serialize;

use super::evaluation::{
    CombinationEvaluator, CombinationScore, ConstraintChecker, InnovationStrategy,
};
use crate::domain::{Combination, CompatibilityTable, Parameter, Principle};

/// A sampled combination annotated with its score and position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCombination {
    /// 1-based position after sorting.
    pub rank: usize,
    pub combination: Combination,
    pub score: CombinationScore,
    pub overall: f64,
}

/// Score every combination and order them best first.
///
/// Admissible combinations always precede ones that break a constraint; within
/// each group the order is by `overall` descending, ties keeping sample order.
pub fn rank_sample<I, C>(
    evaluator: &CombinationEvaluator<I, C>,
    sample: &[Combination],
    parameters: &[Parameter],
    compatibility: &CompatibilityTable,
    principles: &[Principle],
) -> Vec<RankedCombination>
where
    I: InnovationStrategy,
    C: ConstraintChecker,
{
    let mut ranked: Vec<RankedCombination> = sample
        .iter()
        .map(|combination| {
            let score = evaluator.evaluate(combination, parameters, compatibility, principles);
            RankedCombination {
                rank: 0,
                combination: combination.clone(),
                overall: score.overall(),
                score,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .constraints_satisfied
            .cmp(&a.score.constraints_satisfied)
            .then_with(|| b.overall.total_cmp(&a.overall))
    });

    for (index, entry) in ranked.iter_mut().enumerate() {
        entry.rank = index + 1;
    }

    ranked
}
