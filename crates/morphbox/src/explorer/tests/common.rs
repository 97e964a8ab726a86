use crate::domain::{
    Attribute, Combination, CompatibilityEntry, CompatibilityLevel, CompatibilityTable,
    Constraint, MorphologicalBox, Parameter, Principle, TechnicalValue, Weight,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub(super) fn weight(value: u8) -> Weight {
    Weight::new(value).expect("valid weight")
}

pub(super) fn level(value: i8) -> CompatibilityLevel {
    CompatibilityLevel::new(value).expect("valid level")
}

pub(super) fn technical(value: f64) -> TechnicalValue {
    TechnicalValue::new(value).expect("valid technical value")
}

pub(super) fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Parameter whose attributes are named after their ids.
pub(super) fn parameter(id: &str, weight_value: u8, attributes: &[&str]) -> Parameter {
    attributes.iter().fold(
        Parameter::new(id, id.to_uppercase(), weight(weight_value)),
        |parameter, attribute| parameter.with_attribute(Attribute::new(*attribute, *attribute)),
    )
}

pub(super) fn table(entries: &[(&str, &str, i8)]) -> CompatibilityTable {
    let entries: Vec<CompatibilityEntry> = entries
        .iter()
        .map(|(a, b, value)| CompatibilityEntry::new(*a, *b, level(*value)))
        .collect();
    CompatibilityTable::from_entries(&entries).expect("table builds")
}

/// Two parameters `A` (`a1`, `a2`) and `B` (`b1`, `b2`) at normal weight.
pub(super) fn pair_parameters() -> Vec<Parameter> {
    vec![
        parameter("A", 5, &["a1", "a2"]),
        parameter("B", 5, &["b1", "b2"]),
    ]
}

fn rated(id: &str, name: &str, value: f64) -> Attribute {
    Attribute::new(id, name).with_technical_value(technical(value))
}

/// Workshop box for a portable water filter concept.
pub(super) fn water_filter_box() -> MorphologicalBox {
    MorphologicalBox {
        name: "Portable water filter".to_string(),
        parameters: vec![
            Parameter::new("housing", "Housing material", weight(8))
                .with_attribute(rated("al", "Aluminum", 0.7))
                .with_attribute(rated("pp", "Polypropylene", 0.9))
                .with_attribute(rated("ss", "Stainless steel", 0.6)),
            Parameter::new("media", "Filtration media", weight(5))
                .with_attribute(rated("ceramic", "Ceramic", 0.8))
                .with_attribute(rated("carbon", "Activated carbon", 0.9))
                .with_attribute(rated("uv", "UV-C lamp", 0.4)),
            Parameter::new("power", "Power source", weight(2))
                .with_attribute(Attribute::new("manual", "Hand pump"))
                .with_attribute(rated("solar", "Solar cell", 0.5))
                .with_attribute(rated("battery", "Battery", 0.7)),
            Parameter::new("form", "Form factor", weight(6))
                .with_attribute(Attribute::new("bottle", "Bottle"))
                .with_attribute(Attribute::new("straw", "Straw"))
                .with_attribute(Attribute::new("pump", "Inline pump")),
            Parameter::new("notes", "Open questions", weight(5)),
        ],
        compatibility: vec![
            CompatibilityEntry::new("uv", "manual", level(-2)),
            CompatibilityEntry::new("uv", "battery", level(2)),
            CompatibilityEntry::new("ceramic", "pump", level(2)),
            CompatibilityEntry::new("straw", "ss", level(-1)),
            CompatibilityEntry::new("pp", "bottle", level(1)),
        ],
        principles: vec![
            Principle::new("p1", "Segmentation", ["ceramic", "pump"]),
            Principle::new("p35", "Parameter changes", ["pp", "uv"]),
        ],
        constraints: vec![Constraint::requires("uv", "battery")],
    }
}

pub(super) fn filter_combination(
    housing: &str,
    media: &str,
    power: &str,
    form: &str,
) -> Combination {
    Combination::new()
        .with("housing", housing)
        .with("media", media)
        .with("power", power)
        .with("form", form)
}
