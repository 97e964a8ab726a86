//! Plain data describing a morphological box and the combinations drawn from it.
//!
//! Everything here is constructed fresh from caller data; validation happens at
//! construction and deserialization so the explorer can treat its inputs as
//! well-formed.

mod combination;
mod compatibility;
mod constraint;
mod morph_box;
mod parameter;
mod principle;

pub use combination::{Combination, Selection};
pub use compatibility::{CompatibilityEntry, CompatibilityLevel, CompatibilityTable};
pub use constraint::Constraint;
pub use morph_box::MorphologicalBox;
pub use parameter::{
    Attribute, AttributeId, Importance, Parameter, ParameterId, TechnicalValue, Weight,
    DEFAULT_WEIGHT, MAX_WEIGHT, MIN_WEIGHT,
};
pub use principle::{Principle, PrincipleId};

/// Validation failures for caller-supplied box data.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("weight {0} outside the supported range 1..=10")]
    WeightOutOfRange(i64),
    #[error("technical value {0} outside the supported range 0..=1")]
    TechnicalValueOutOfRange(f64),
    #[error("compatibility level {0} outside the supported range -2..=2")]
    CompatibilityOutOfRange(i64),
    #[error("attribute {0} cannot be paired with itself")]
    SelfCompatibility(AttributeId),
    #[error("parameter id {0} appears more than once")]
    DuplicateParameter(ParameterId),
    #[error("attribute id {0} appears more than once")]
    DuplicateAttribute(AttributeId),
    #[error("sample cap {requested} outside the supported range 1..={max}")]
    SampleCapOutOfRange { requested: usize, max: usize },
    #[error("{context} references unknown attribute {attribute}")]
    UnknownAttribute {
        context: &'static str,
        attribute: AttributeId,
    },
}
