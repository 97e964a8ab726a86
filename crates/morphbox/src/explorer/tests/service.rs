use num_bigint::BigUint;

use super::common::*;
use crate::domain::{CompatibilityEntry, DomainError, MorphologicalBox};
use crate::explorer::{ExploreOptions, ExplorerService, GeneratorConfig, MAX_SAMPLE_CAP};

#[test]
fn explore_rejects_invalid_boxes() {
    let mut explorer_box = water_filter_box();
    explorer_box
        .compatibility
        .push(CompatibilityEntry::new("uv", "graphene", level(1)));

    let error = ExplorerService::default()
        .explore(&explorer_box, &ExploreOptions::default())
        .expect_err("unknown attribute is rejected");

    assert!(matches!(error, DomainError::UnknownAttribute { .. }));
}

#[test]
fn explore_with_seed_is_reproducible() {
    let service = ExplorerService::default();
    let explorer_box = water_filter_box();
    let options = ExploreOptions {
        seed: Some(11),
        sample_cap: Some(12),
        ..ExploreOptions::default()
    };

    let first = service.explore(&explorer_box, &options).expect("explores");
    let second = service.explore(&explorer_box, &options).expect("explores");

    assert_eq!(first.sample.total, BigUint::from(81u32));
    assert_eq!(first.sample.sample.len(), 12);
    assert_eq!(first.sample.sample, second.sample.sample);
    assert!(first.ranked.is_none());
}

#[test]
fn service_seed_applies_when_request_has_none() {
    let service = ExplorerService::new(GeneratorConfig::default(), Some(3));
    let explorer_box = water_filter_box();

    let first = service
        .explore(&explorer_box, &ExploreOptions::default())
        .expect("explores");
    let second = service
        .explore(&explorer_box, &ExploreOptions::default())
        .expect("explores");

    assert_eq!(first.sample.sample, second.sample.sample);
}

#[test]
fn explore_can_rank_the_whole_sample() {
    let options = ExploreOptions {
        seed: Some(1),
        allow_duplicates: Some(false),
        rank: true,
        ..ExploreOptions::default()
    };

    let exploration = ExplorerService::default()
        .explore(&water_filter_box(), &options)
        .expect("explores");

    let ranked = exploration.ranked.expect("ranked sample");
    assert_eq!(ranked.len(), 81);
    assert_eq!(ranked.len(), exploration.sample.sample.len());
    let first_violation = ranked
        .iter()
        .position(|entry| !entry.score.constraints_satisfied)
        .unwrap_or(ranked.len());
    assert!(ranked[first_violation..]
        .iter()
        .all(|entry| !entry.score.constraints_satisfied));
}

#[test]
fn assess_reports_broken_rules_with_the_score() {
    let service = ExplorerService::default();
    let explorer_box = water_filter_box();

    let assessment = service
        .assess(&explorer_box, &filter_combination("pp", "uv", "manual", "bottle"))
        .expect("assesses");

    assert!(!assessment.score.constraints_satisfied);
    assert_eq!(assessment.violations.len(), 1);
    // uv-manual is -2 and pp-bottle is +1
    assert_eq!(assessment.score.compatibility_score, 37.5);
    // pp and uv both hit p35
    assert_eq!(assessment.score.principle_score, 50.0);
}

#[test]
fn assess_handles_an_empty_box() {
    let assessment = ExplorerService::default()
        .assess(&MorphologicalBox::default(), &filter_combination("a", "b", "c", "d"))
        .expect("assesses");

    assert_eq!(assessment.score.technical_score, 50.0);
    assert_eq!(assessment.score.compatibility_score, 50.0);
    assert!(assessment.violations.is_empty());
}

#[test]
fn explore_rejects_out_of_range_sample_caps() {
    let service = ExplorerService::default();
    let explorer_box = water_filter_box();

    for requested in [0, MAX_SAMPLE_CAP + 1, usize::MAX] {
        let options = ExploreOptions {
            sample_cap: Some(requested),
            ..ExploreOptions::default()
        };
        match service.explore(&explorer_box, &options) {
            Err(DomainError::SampleCapOutOfRange { requested: found, max }) => {
                assert_eq!(found, requested);
                assert_eq!(max, MAX_SAMPLE_CAP);
            }
            other => panic!("expected sample cap rejection, got {other:?}"),
        }
    }

    let options = ExploreOptions {
        sample_cap: Some(MAX_SAMPLE_CAP),
        ..ExploreOptions::default()
    };
    let exploration = service.explore(&explorer_box, &options).expect("explores");
    assert_eq!(exploration.sample.sample.len(), 81);
}
