use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Identifier wrapper for box parameters (the rows of a morphological box).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParameterId(pub String);

/// Identifier wrapper for attribute options.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AttributeId(pub String);

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParameterId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for AttributeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

pub const MIN_WEIGHT: u8 = 1;
pub const MAX_WEIGHT: u8 = 10;
pub const DEFAULT_WEIGHT: u8 = 5;

/// Relative importance of a parameter, validated to `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Weight(u8);

impl Weight {
    pub fn new(value: u8) -> Result<Self, DomainError> {
        Self::try_from(i64::from(value))
    }

    /// Lenient constructor for callers that prefer clamping over rejection.
    pub fn clamped(value: i64) -> Self {
        let bounded = value.clamp(i64::from(MIN_WEIGHT), i64::from(MAX_WEIGHT));
        Self(bounded as u8)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn importance(self) -> Importance {
        match self.0 {
            0..=3 => Importance::Low,
            4..=6 => Importance::Normal,
            _ => Importance::High,
        }
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self(DEFAULT_WEIGHT)
    }
}

impl TryFrom<i64> for Weight {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(MIN_WEIGHT)..=i64::from(MAX_WEIGHT)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(DomainError::WeightOutOfRange(value))
        }
    }
}

impl From<Weight> for u8 {
    fn from(value: Weight) -> Self {
        value.0
    }
}

/// Selection bucket derived from a parameter weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    /// Weight 7 and above.
    High,
    /// Weight 4 to 6.
    Normal,
    /// Weight 3 and below.
    Low,
}

impl Importance {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Normal => "Normal",
            Self::Low => "Low",
        }
    }
}

/// Technical feasibility of an attribute on a `0..=1` scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct TechnicalValue(f64);

impl TechnicalValue {
    /// Stand-in used by the technical score when an attribute carries no value.
    pub const NEUTRAL: TechnicalValue = TechnicalValue(0.5);

    pub fn new(value: f64) -> Result<Self, DomainError> {
        Self::try_from(value)
    }

    pub const fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for TechnicalValue {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::TechnicalValueOutOfRange(value))
        }
    }
}

impl From<TechnicalValue> for f64 {
    fn from(value: TechnicalValue) -> Self {
        value.0
    }
}

/// One discrete option under a parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: AttributeId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_value: Option<TechnicalValue>,
}

impl Attribute {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: AttributeId(id.into()),
            name: name.into(),
            technical_value: None,
        }
    }

    pub fn with_technical_value(mut self, value: TechnicalValue) -> Self {
        self.technical_value = Some(value);
        self
    }
}

/// A design dimension with its ordered attribute options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: ParameterId,
    pub name: String,
    #[serde(default)]
    pub weight: Weight,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Parameter {
    pub fn new(id: impl Into<String>, name: impl Into<String>, weight: Weight) -> Self {
        Self {
            id: ParameterId(id.into()),
            name: name.into(),
            weight,
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn attribute(&self, id: &AttributeId) -> Option<&Attribute> {
        self.attributes.iter().find(|attribute| &attribute.id == id)
    }

    pub fn importance(&self) -> Importance {
        self.weight.importance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_defaults_to_five() {
        assert_eq!(Weight::default().value(), 5);
        assert_eq!(Weight::default().importance(), Importance::Normal);
    }

    #[test]
    fn weight_rejects_values_outside_range() {
        assert!(matches!(
            Weight::try_from(0_i64),
            Err(DomainError::WeightOutOfRange(0))
        ));
        assert!(matches!(
            Weight::try_from(11_i64),
            Err(DomainError::WeightOutOfRange(11))
        ));
        assert_eq!(Weight::try_from(10_i64).expect("upper bound").value(), 10);
    }

    #[test]
    fn clamped_weight_saturates_at_bounds() {
        assert_eq!(Weight::clamped(-4).value(), 1);
        assert_eq!(Weight::clamped(42).value(), 10);
        assert_eq!(Weight::clamped(6).value(), 6);
    }

    #[test]
    fn importance_buckets_follow_weight_thresholds() {
        let bucket = |value: u8| Weight::new(value).expect("valid weight").importance();
        assert_eq!(bucket(1), Importance::Low);
        assert_eq!(bucket(3), Importance::Low);
        assert_eq!(bucket(4), Importance::Normal);
        assert_eq!(bucket(6), Importance::Normal);
        assert_eq!(bucket(7), Importance::High);
        assert_eq!(bucket(10), Importance::High);
    }

    #[test]
    fn parameter_deserializes_with_default_weight() {
        let parameter: Parameter = serde_json::from_str(
            r#"{"id":"material","name":"Material","attributes":[{"id":"al","name":"Aluminum","technical_value":0.8}]}"#,
        )
        .expect("parameter parses");

        assert_eq!(parameter.weight, Weight::default());
        let attribute = parameter
            .attribute(&AttributeId::from("al"))
            .expect("attribute present");
        assert_eq!(attribute.technical_value.map(f64::from), Some(0.8));
    }

    #[test]
    fn parameter_rejects_out_of_range_payloads() {
        let weight = serde_json::from_str::<Parameter>(r#"{"id":"p","name":"P","weight":12}"#);
        assert!(weight.is_err());

        let technical = serde_json::from_str::<Attribute>(
            r#"{"id":"a","name":"A","technical_value":1.5}"#,
        );
        assert!(technical.is_err());
    }
}
