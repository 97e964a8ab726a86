use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{AttributeId, Combination, CompatibilityTable, Parameter, Principle};

/// Inputs shared by the pluggable scoring hooks.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    pub combination: &'a Combination,
    pub parameters: &'a [Parameter],
    pub compatibility: &'a CompatibilityTable,
    pub principles: &'a [Principle],
    /// Selected attribute ids that resolve against `parameters`.
    pub selected: &'a [&'a AttributeId],
}

/// Extension point for the innovation axis.
pub trait InnovationStrategy: Send + Sync {
    /// `None` means the axis is not scored.
    fn score(&self, context: &EvaluationContext<'_>) -> Option<f64>;
}

/// Default innovation hook; leaves the axis unscored.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingInnovation;

impl InnovationStrategy for PendingInnovation {
    fn score(&self, _context: &EvaluationContext<'_>) -> Option<f64> {
        None
    }
}

/// Uniform draw in `0..100`, reproducible when seeded.
#[derive(Debug)]
pub struct RandomInnovation {
    rng: Mutex<StdRng>,
}

impl RandomInnovation {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }
}

impl InnovationStrategy for RandomInnovation {
    fn score(&self, _context: &EvaluationContext<'_>) -> Option<f64> {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Some(rng.gen_range(0.0..100.0))
    }
}

/// Extension point deciding whether a combination is admissible.
pub trait ConstraintChecker: Send + Sync {
    fn is_satisfied(&self, context: &EvaluationContext<'_>) -> bool;
}

/// Default checker with no rules; every combination is admissible.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconstrained;

impl ConstraintChecker for Unconstrained {
    fn is_satisfied(&self, _context: &EvaluationContext<'_>) -> bool {
        true
    }
}
