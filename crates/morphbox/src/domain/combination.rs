use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::parameter::{AttributeId, Parameter, ParameterId};

const DEFAULT_LABEL: &str = "Default";

/// Value held by one parameter slot of a combination.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Selection {
    Attribute(AttributeId),
    /// De-emphasized slot for a low-importance parameter; scores as no match.
    Default,
}

impl Selection {
    pub fn attribute_id(&self) -> Option<&AttributeId> {
        match self {
            Selection::Attribute(id) => Some(id),
            Selection::Default => None,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Selection::Default)
    }

    /// Human-readable cell for a parameter, falling back to the raw id.
    pub fn label<'a>(&'a self, parameter: &'a Parameter) -> &'a str {
        match self {
            Selection::Attribute(id) => parameter
                .attribute(id)
                .map(|attribute| attribute.name.as_str())
                .unwrap_or(id.0.as_str()),
            Selection::Default => DEFAULT_LABEL,
        }
    }
}

impl Serialize for Selection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Selection::Attribute(id) => serializer.serialize_str(&id.0),
            Selection::Default => serializer.serialize_str(DEFAULT_LABEL),
        }
    }
}

impl<'de> Deserialize<'de> for Selection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw == DEFAULT_LABEL {
            Ok(Selection::Default)
        } else {
            Ok(Selection::Attribute(AttributeId(raw)))
        }
    }
}

/// One point in the solution space, keyed by parameter id.
///
/// The map shape guarantees at most one selection per parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Combination(pub BTreeMap<ParameterId, Selection>);

impl Combination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, parameter: ParameterId, selection: Selection) {
        self.0.insert(parameter, selection);
    }

    pub fn with(mut self, parameter: impl Into<String>, attribute: impl Into<String>) -> Self {
        self.select(
            ParameterId(parameter.into()),
            Selection::Attribute(AttributeId(attribute.into())),
        );
        self
    }

    pub fn get(&self, parameter: &ParameterId) -> Option<&Selection> {
        self.0.get(parameter)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParameterId, &Selection)> {
        self.0.iter()
    }
}

impl FromIterator<(ParameterId, Selection)> for Combination {
    fn from_iter<T: IntoIterator<Item = (ParameterId, Selection)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selection_uses_literal_placeholder_on_the_wire() {
        let mut combination = Combination::new().with("material", "al");
        combination.select(ParameterId::from("finish"), Selection::Default);

        let json = serde_json::to_value(&combination).expect("serializes");
        assert_eq!(json["material"], "al");
        assert_eq!(json["finish"], "Default");

        let parsed: Combination = serde_json::from_value(json).expect("parses");
        assert_eq!(parsed, combination);
    }

}
