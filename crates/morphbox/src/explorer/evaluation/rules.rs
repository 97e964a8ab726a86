use crate::domain::{
    AttributeId, Combination, CompatibilityLevel, CompatibilityTable, Parameter, Principle,
    Selection, TechnicalValue,
};

const NEUTRAL_SCORE: f64 = 50.0;
pub(super) const MAX_SCORE: f64 = 100.0;

/// Attribute ids that resolve to a real option of the parameter they are keyed by.
///
/// Placeholders, unknown parameters, and ids foreign to their parameter drop out
/// here so every axis ignores them the same way.
pub(crate) fn resolved_attributes<'a>(
    combination: &'a Combination,
    parameters: &[Parameter],
) -> Vec<&'a AttributeId> {
    let mut resolved: Vec<&AttributeId> = Vec::with_capacity(combination.len());
    for (parameter_id, selection) in combination.iter() {
        let Some(attribute_id) = selection.attribute_id() else {
            continue;
        };
        let known = parameters
            .iter()
            .filter(|parameter| &parameter.id == parameter_id)
            .any(|parameter| parameter.attribute(attribute_id).is_some());
        if known && !resolved.contains(&attribute_id) {
            resolved.push(attribute_id);
        }
    }
    resolved
}

/// Levels for every unordered pair of `selected` present in the table.
pub(crate) fn scored_pairs<'a>(
    selected: &[&'a AttributeId],
    table: &CompatibilityTable,
) -> Vec<(&'a AttributeId, &'a AttributeId, CompatibilityLevel)> {
    let mut pairs = Vec::new();
    for (index, first) in selected.iter().enumerate() {
        for second in &selected[index + 1..] {
            if let Some(level) = table.lookup(first, second) {
                pairs.push((*first, *second, level));
            }
        }
    }
    pairs
}

/// Mean pair level mapped from `-2..=2` onto `0..=100`; 50 when nothing is scored.
pub(crate) fn compatibility_score(selected: &[&AttributeId], table: &CompatibilityTable) -> f64 {
    let pairs = scored_pairs(selected, table);
    if pairs.is_empty() {
        return NEUTRAL_SCORE;
    }

    let sum: f64 = pairs
        .iter()
        .map(|(_, _, level)| f64::from(level.value()))
        .sum();
    let average = sum / pairs.len() as f64;
    ((average + 2.0) / 4.0 * MAX_SCORE).clamp(0.0, MAX_SCORE)
}

/// Weight-averaged technical value; 50 when no parameter resolves.
pub(crate) fn technical_score(combination: &Combination, parameters: &[Parameter]) -> f64 {
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    for parameter in parameters {
        let Some(Selection::Attribute(attribute_id)) = combination.get(&parameter.id) else {
            continue;
        };
        let Some(attribute) = parameter.attribute(attribute_id) else {
            continue;
        };

        let weight = f64::from(parameter.weight.value());
        let value = attribute
            .technical_value
            .unwrap_or(TechnicalValue::NEUTRAL)
            .value();
        weighted_sum += weight * value;
        total_weight += weight;
    }

    if total_weight > 0.0 {
        (weighted_sum / total_weight * MAX_SCORE).clamp(0.0, MAX_SCORE)
    } else {
        NEUTRAL_SCORE
    }
}

/// Principle hits per selected attribute, capped at 100; 0 for an empty selection.
pub(crate) fn principle_score(selected: &[&AttributeId], principles: &[Principle]) -> f64 {
    if selected.is_empty() {
        return 0.0;
    }

    let hits: usize = principles
        .iter()
        .map(|principle| principle.matches(selected))
        .sum();
    (hits as f64 / selected.len() as f64 * MAX_SCORE).min(MAX_SCORE)
}
