//! Sampling and scoring over a morphological box.
//!
//! The generator and evaluator are independent pure computations; the service
//! composes them for collaborators that start from a whole box.

pub mod evaluation;
pub mod generator;
pub mod ranking;
mod service;

#[cfg(test)]
mod tests;

pub use evaluation::{
    CombinationEvaluator, CombinationScore, ConstraintChecker, ConstraintSet, ConstraintViolation,
    EvaluationContext, InnovationStrategy, PendingInnovation, RandomInnovation, Unconstrained,
};
pub use generator::{
    combination_space, CombinationGenerator, CombinationSample, GeneratorConfig,
    DEFAULT_PLACEHOLDER_PROBABILITY, DEFAULT_SAMPLE_CAP, MAX_SAMPLE_CAP,
};
pub use ranking::{rank_sample, RankedCombination};
pub use service::{Assessment, ExploreOptions, Exploration, ExplorerService};
