use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::evaluation::{CombinationEvaluator, CombinationScore, ConstraintViolation};
use super::generator::{
    CombinationGenerator, CombinationSample, GeneratorConfig, MAX_SAMPLE_CAP,
};
use super::ranking::{rank_sample, RankedCombination};
use crate::domain::{Combination, DomainError, MorphologicalBox};

/// Per-request overrides for a generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExploreOptions {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub sample_cap: Option<usize>,
    #[serde(default)]
    pub allow_duplicates: Option<bool>,
    /// Score and order the sample as well.
    #[serde(default)]
    pub rank: bool,
}

/// Generated sample, optionally ranked.
#[derive(Debug, Clone, Serialize)]
pub struct Exploration {
    #[serde(flatten)]
    pub sample: CombinationSample,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranked: Option<Vec<RankedCombination>>,
}

/// Score for one caller-supplied combination with the rules it breaks.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub score: CombinationScore,
    pub violations: Vec<ConstraintViolation>,
}

/// Entry point for collaborators that work with whole boxes.
#[derive(Debug, Clone, Default)]
pub struct ExplorerService {
    config: GeneratorConfig,
    seed: Option<u64>,
}

impl ExplorerService {
    /// `seed` pins every run without its own seed to one reproducible stream.
    pub fn new(config: GeneratorConfig, seed: Option<u64>) -> Self {
        Self { config, seed }
    }

    pub fn explore(
        &self,
        explorer_box: &MorphologicalBox,
        options: &ExploreOptions,
    ) -> Result<Exploration, DomainError> {
        explorer_box.validate()?;
        let sample_cap = match options.sample_cap {
            Some(requested) if requested == 0 || requested > MAX_SAMPLE_CAP => {
                return Err(DomainError::SampleCapOutOfRange {
                    requested,
                    max: MAX_SAMPLE_CAP,
                });
            }
            Some(requested) => requested,
            None => self.config.sample_cap,
        };

        let generator = CombinationGenerator::new(GeneratorConfig {
            sample_cap,
            default_probability: self.config.default_probability,
            allow_duplicates: options
                .allow_duplicates
                .unwrap_or(self.config.allow_duplicates),
        });

        let mut rng = match options.seed.or(self.seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let sample = generator.generate(&explorer_box.parameters, &mut rng);

        let ranked = if options.rank {
            let table = explorer_box.compatibility_table()?;
            let evaluator = CombinationEvaluator::for_box(explorer_box);
            Some(rank_sample(
                &evaluator,
                &sample.sample,
                &explorer_box.parameters,
                &table,
                &explorer_box.principles,
            ))
        } else {
            None
        };

        debug!(
            box_name = %explorer_box.name,
            total = %sample.total,
            sample_size = sample.sample.len(),
            ranked = options.rank,
            "explored morphological box"
        );

        Ok(Exploration { sample, ranked })
    }

    pub fn assess(
        &self,
        explorer_box: &MorphologicalBox,
        combination: &Combination,
    ) -> Result<Assessment, DomainError> {
        explorer_box.validate()?;
        let table = explorer_box.compatibility_table()?;
        let evaluator = CombinationEvaluator::for_box(explorer_box);

        let score = evaluator.evaluate(
            combination,
            &explorer_box.parameters,
            &table,
            &explorer_box.principles,
        );
        let violations = evaluator.violations(
            combination,
            &explorer_box.parameters,
            &table,
            &explorer_box.principles,
        );

        Ok(Assessment { score, violations })
    }
}
