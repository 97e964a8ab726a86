use serde::{Deserialize, Serialize};

use super::parameter::AttributeId;

/// Identifier wrapper for TRIZ-style principles.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PrincipleId(pub String);

/// Engineering heuristic tagged as applicable to a set of attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principle {
    pub id: PrincipleId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub applicable_attributes: Vec<AttributeId>,
}

impl Principle {
    pub fn new<I, S>(id: impl Into<String>, name: impl Into<String>, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: PrincipleId(id.into()),
            name: name.into(),
            applicable_attributes: attributes
                .into_iter()
                .map(|attribute| AttributeId(attribute.into()))
                .collect(),
        }
    }

    /// Number of this principle's attributes found in `selected`.
    pub fn matches(&self, selected: &[&AttributeId]) -> usize {
        self.applicable_attributes
            .iter()
            .filter(|attribute| selected.contains(attribute))
            .count()
    }
}
