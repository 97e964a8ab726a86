use std::collections::HashSet;

use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};
use rand::Rng;
use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, warn};

use crate::domain::{Combination, Importance, Parameter, Selection};

pub const DEFAULT_SAMPLE_CAP: usize = 100;
/// Largest sample a single run may draw.
pub const MAX_SAMPLE_CAP: usize = 10_000;
pub const DEFAULT_PLACEHOLDER_PROBABILITY: f64 = 0.3;
const DEDUP_ATTEMPTS_PER_SLOT: usize = 64;

/// Knobs for sampling the combination space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Upper bound on the number of sampled combinations.
    pub sample_cap: usize,
    /// Chance that a low-importance slot is filled with the `Default` placeholder.
    pub default_probability: f64,
    /// When false, repeated combinations are redrawn.
    pub allow_duplicates: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sample_cap: DEFAULT_SAMPLE_CAP,
            default_probability: DEFAULT_PLACEHOLDER_PROBABILITY,
            allow_duplicates: true,
        }
    }
}

impl GeneratorConfig {
    fn sanitized(self) -> Self {
        let sample_cap = match self.sample_cap {
            0 => DEFAULT_SAMPLE_CAP,
            cap => cap.min(MAX_SAMPLE_CAP),
        };
        let default_probability = if self.default_probability.is_finite() {
            self.default_probability.clamp(0.0, 1.0)
        } else {
            DEFAULT_PLACEHOLDER_PROBABILITY
        };

        Self {
            sample_cap,
            default_probability,
            allow_duplicates: self.allow_duplicates,
        }
    }
}

/// Bounded sample of the combination space plus its exact size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinationSample {
    #[serde(serialize_with = "serialize_decimal")]
    pub total: BigUint,
    pub sample: Vec<Combination>,
    pub timestamp: DateTime<Utc>,
}

fn serialize_decimal<S>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_str_radix(10))
}

/// Exact size of the Cartesian product over parameters that offer options.
///
/// Empty parameters contribute the multiplicative identity, so a box with no
/// options at all has exactly one (empty) combination.
pub fn combination_space(parameters: &[Parameter]) -> BigUint {
    parameters
        .iter()
        .map(|parameter| parameter.attributes.len())
        .filter(|len| *len > 0)
        .fold(BigUint::one(), |acc, len| acc * BigUint::from(len))
}

/// Importance-biased sampler over a box's parameters.
#[derive(Debug, Clone, Default)]
pub struct CombinationGenerator {
    config: GeneratorConfig,
}

impl CombinationGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config: config.sanitized(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Sample `min(total, sample_cap)` combinations using the supplied source.
    pub fn generate<R>(&self, parameters: &[Parameter], rng: &mut R) -> CombinationSample
    where
        R: Rng + ?Sized,
    {
        let total = combination_space(parameters);
        let sample_size = total
            .to_usize()
            .map_or(self.config.sample_cap, |total| total.min(self.config.sample_cap));

        let active: Vec<&Parameter> = parameters
            .iter()
            .filter(|parameter| !parameter.attributes.is_empty())
            .collect();

        let sample = if self.config.allow_duplicates {
            let mut sample = Vec::with_capacity(sample_size.min(MAX_SAMPLE_CAP));
            sample.extend((0..sample_size).map(|_| self.draw_combination(&active, rng)));
            sample
        } else {
            self.draw_distinct(&active, sample_size, rng)
        };

        debug!(
            total = %total,
            sample_size = sample.len(),
            parameters = parameters.len(),
            active_parameters = active.len(),
            "sampled combination space"
        );

        CombinationSample {
            total,
            sample,
            timestamp: Utc::now(),
        }
    }

    /// Sample with thread-local entropy; output is not reproducible.
    pub fn generate_with_entropy(&self, parameters: &[Parameter]) -> CombinationSample {
        self.generate(parameters, &mut rand::thread_rng())
    }

    fn draw_distinct<R>(
        &self,
        active: &[&Parameter],
        sample_size: usize,
        rng: &mut R,
    ) -> Vec<Combination>
    where
        R: Rng + ?Sized,
    {
        let budget = sample_size.saturating_mul(DEDUP_ATTEMPTS_PER_SLOT);
        let capacity = sample_size.min(MAX_SAMPLE_CAP);
        let mut seen = HashSet::with_capacity(capacity);
        let mut sample = Vec::with_capacity(capacity);
        let mut attempts = 0;

        while sample.len() < sample_size && attempts < budget {
            attempts += 1;
            let combination = self.draw_combination(active, rng);
            if seen.insert(combination.clone()) {
                sample.push(combination);
            }
        }

        if sample.len() < sample_size {
            warn!(
                requested = sample_size,
                produced = sample.len(),
                attempts,
                "distinct sampling budget exhausted"
            );
        }

        sample
    }

    fn draw_combination<R>(&self, active: &[&Parameter], rng: &mut R) -> Combination
    where
        R: Rng + ?Sized,
    {
        active
            .iter()
            .map(|parameter| (parameter.id.clone(), self.draw_selection(parameter, rng)))
            .collect()
    }

    fn draw_selection<R>(&self, parameter: &Parameter, rng: &mut R) -> Selection
    where
        R: Rng + ?Sized,
    {
        match parameter.importance() {
            Importance::Low if rng.gen_bool(self.config.default_probability) => Selection::Default,
            Importance::High | Importance::Normal | Importance::Low => {
                let index = rng.gen_range(0..parameter.attributes.len());
                Selection::Attribute(parameter.attributes[index].id.clone())
            }
        }
    }
}
