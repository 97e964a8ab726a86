use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::parameter::AttributeId;
use super::DomainError;

/// Pairwise compatibility score in `-2..=2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i8")]
pub struct CompatibilityLevel(i8);

impl CompatibilityLevel {
    pub const MIN: CompatibilityLevel = CompatibilityLevel(-2);
    pub const NEUTRAL: CompatibilityLevel = CompatibilityLevel(0);
    pub const MAX: CompatibilityLevel = CompatibilityLevel(2);

    pub fn new(value: i8) -> Result<Self, DomainError> {
        Self::try_from(i64::from(value))
    }

    pub const fn value(self) -> i8 {
        self.0
    }
}

impl TryFrom<i64> for CompatibilityLevel {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (-2..=2).contains(&value) {
            Ok(Self(value as i8))
        } else {
            Err(DomainError::CompatibilityOutOfRange(value))
        }
    }
}

impl From<CompatibilityLevel> for i8 {
    fn from(value: CompatibilityLevel) -> Self {
        value.0
    }
}

/// Caller-supplied matrix cell; order of the two attributes is irrelevant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityEntry {
    pub attribute_a: AttributeId,
    pub attribute_b: AttributeId,
    pub level: CompatibilityLevel,
}

impl CompatibilityEntry {
    pub fn new(
        attribute_a: impl Into<String>,
        attribute_b: impl Into<String>,
        level: CompatibilityLevel,
    ) -> Self {
        Self {
            attribute_a: AttributeId(attribute_a.into()),
            attribute_b: AttributeId(attribute_b.into()),
            level,
        }
    }
}

/// Symmetric lookup over unordered attribute pairs.
///
/// Keys are stored with the smaller id first, so `(a, b)` and `(b, a)` always
/// resolve to the same cell. Absent pairs are unscored rather than zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompatibilityTable {
    levels: HashMap<(AttributeId, AttributeId), CompatibilityLevel>,
}

impl CompatibilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<'a, I>(entries: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = &'a CompatibilityEntry>,
    {
        let mut table = Self::new();
        for entry in entries {
            if let Some(previous) =
                table.insert(&entry.attribute_a, &entry.attribute_b, entry.level)?
            {
                if previous != entry.level {
                    warn!(
                        attribute_a = %entry.attribute_a,
                        attribute_b = %entry.attribute_b,
                        previous = previous.value(),
                        replacement = entry.level.value(),
                        "conflicting compatibility entries; keeping the later one"
                    );
                }
            }
        }
        Ok(table)
    }

    /// Store a level for the pair, returning the level it replaced.
    pub fn insert(
        &mut self,
        a: &AttributeId,
        b: &AttributeId,
        level: CompatibilityLevel,
    ) -> Result<Option<CompatibilityLevel>, DomainError> {
        if a == b {
            return Err(DomainError::SelfCompatibility(a.clone()));
        }
        Ok(self.levels.insert(pair_key(a, b), level))
    }

    pub fn lookup(&self, a: &AttributeId, b: &AttributeId) -> Option<CompatibilityLevel> {
        self.levels.get(&pair_key(a, b)).copied()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

fn pair_key(a: &AttributeId, b: &AttributeId) -> (AttributeId, AttributeId) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}
