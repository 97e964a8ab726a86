use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::compatibility::{CompatibilityEntry, CompatibilityTable};
use super::constraint::Constraint;
use super::parameter::{AttributeId, Parameter, ParameterId};
use super::principle::Principle;
use super::DomainError;

/// Everything a collaborator hands over to explore one box.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MorphologicalBox {
    #[serde(default)]
    pub name: String,
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub compatibility: Vec<CompatibilityEntry>,
    #[serde(default)]
    pub principles: Vec<Principle>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
}

impl MorphologicalBox {
    /// Reject structurally inconsistent boxes before they reach the explorer.
    ///
    /// Principles may mention attributes outside the box; they are a shared
    /// catalog and unmatched ids simply never count.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut parameter_ids: HashSet<&ParameterId> = HashSet::new();
        let mut attribute_ids: HashSet<&AttributeId> = HashSet::new();

        for parameter in &self.parameters {
            if !parameter_ids.insert(&parameter.id) {
                return Err(DomainError::DuplicateParameter(parameter.id.clone()));
            }
            for attribute in &parameter.attributes {
                if !attribute_ids.insert(&attribute.id) {
                    return Err(DomainError::DuplicateAttribute(attribute.id.clone()));
                }
            }
        }

        for entry in &self.compatibility {
            for attribute in [&entry.attribute_a, &entry.attribute_b] {
                if !attribute_ids.contains(attribute) {
                    return Err(DomainError::UnknownAttribute {
                        context: "compatibility entry",
                        attribute: attribute.clone(),
                    });
                }
            }
        }

        for constraint in &self.constraints {
            for attribute in constraint.referenced_attributes() {
                if !attribute_ids.contains(attribute) {
                    return Err(DomainError::UnknownAttribute {
                        context: "constraint",
                        attribute: attribute.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn compatibility_table(&self) -> Result<CompatibilityTable, DomainError> {
        CompatibilityTable::from_entries(&self.compatibility)
    }
}
