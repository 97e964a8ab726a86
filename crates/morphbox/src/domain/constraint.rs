use serde::{Deserialize, Serialize};

use super::compatibility::CompatibilityLevel;
use super::parameter::AttributeId;

/// Declarative rule a combination must honor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraint {
    /// The two attributes may not be selected together.
    Excludes {
        attribute_a: AttributeId,
        attribute_b: AttributeId,
    },
    /// Selecting `attribute` requires `requires` to be selected as well.
    Requires {
        attribute: AttributeId,
        requires: AttributeId,
    },
    /// No scored pair in the combination may fall below `level`.
    MinimumCompatibility { level: CompatibilityLevel },
}

impl Constraint {
    pub fn excludes(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self::Excludes {
            attribute_a: AttributeId(a.into()),
            attribute_b: AttributeId(b.into()),
        }
    }

    pub fn requires(attribute: impl Into<String>, requires: impl Into<String>) -> Self {
        Self::Requires {
            attribute: AttributeId(attribute.into()),
            requires: AttributeId(requires.into()),
        }
    }

    /// Attribute ids the rule refers to, used for box validation.
    pub fn referenced_attributes(&self) -> Vec<&AttributeId> {
        match self {
            Constraint::Excludes {
                attribute_a,
                attribute_b,
            } => vec![attribute_a, attribute_b],
            Constraint::Requires {
                attribute,
                requires,
            } => vec![attribute, requires],
            Constraint::MinimumCompatibility { .. } => Vec::new(),
        }
    }
}
