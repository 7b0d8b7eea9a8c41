use super::common::*;
use crate::matching::domain::{Dimension, ScholarshipRecord};
use crate::matching::ranking::{RecommendationRanker, RecommendationSource};

fn ids(entries: &crate::matching::ranking::RecommendationSet) -> Vec<&str> {
    entries
        .entries
        .iter()
        .map(|entry| entry.scholarship.id.0.as_str())
        .collect()
}

#[test]
fn computed_ranking_orders_by_overall_fit() {
    let ranker = RecommendationRanker::default();

    let result = ranker.recommend(&student("stu-1", &[]), &corpus(), 10);

    assert_eq!(result.source, RecommendationSource::Computed);
    assert_eq!(ids(&result), vec!["merit", "stem-research", "civic", "need-grant"]);
    assert!(result
        .entries
        .windows(2)
        .all(|pair| pair[0].overall_fit() >= pair[1].overall_fit()));
}

#[test]
fn computed_ranking_truncates_to_limit() {
    let ranker = RecommendationRanker::default();

    let result = ranker.recommend(&student("stu-1", &[]), &corpus(), 2);

    assert_eq!(ids(&result), vec!["merit", "stem-research"]);
}

#[test]
fn ties_preserve_corpus_order() {
    let ranker = RecommendationRanker::default();
    let shared = weights(&[(Dimension::Academics, 0.5), (Dimension::Research, 0.5)]);
    let tied: Vec<ScholarshipRecord> = vec![
        scholarship("second-listed", shared, &[]),
        scholarship("first-listed", shared, &[]),
        scholarship("zero", weights(&[]), &[]),
    ];

    let result = ranker.recommend(&student("stu-1", &[]), &tied, 3);

    assert_eq!(ids(&result), vec!["second-listed", "first-listed", "zero"]);
    assert_eq!(result.entries[0].overall_fit(), result.entries[1].overall_fit());
    assert_eq!(result.entries[2].overall_fit(), 0.0);
}

#[test]
fn pre_declared_order_is_authoritative_when_enough_resolve() {
    let ranker = RecommendationRanker::default();
    let learner = student("stu-1", &["need-grant", "civic", "merit", "stem-research"]);

    let result = ranker.recommend(&learner, &corpus(), 3);

    assert_eq!(result.source, RecommendationSource::PreDeclared);
    assert_eq!(ids(&result), vec!["need-grant", "civic", "merit"]);
    assert!(result.entries[0].overall_fit() < result.entries[2].overall_fit());
}

#[test]
fn dangling_pre_declared_ids_are_dropped() {
    let ranker = RecommendationRanker::default();
    let learner = student("stu-1", &["civic", "retired-award", "need-grant", "merit"]);

    let result = ranker.recommend(&learner, &corpus(), 10);

    assert_eq!(result.source, RecommendationSource::PreDeclared);
    assert_eq!(ids(&result), vec!["civic", "need-grant", "merit"]);
}

#[test]
fn too_few_resolved_ids_fall_back_to_computed_ranking() {
    let ranker = RecommendationRanker::default();
    let learner = student("stu-1", &["civic", "need-grant", "retired-award", "civic"]);

    let result = ranker.recommend(&learner, &corpus(), 2);

    assert_eq!(result.source, RecommendationSource::Computed);
    assert_eq!(ids(&result), vec!["merit", "stem-research"]);
}

#[test]
fn pre_declared_entries_carry_computed_fit() {
    let ranker = RecommendationRanker::default();
    let learner = student("stu-1", &["merit", "civic", "need-grant"]);

    let result = ranker.recommend(&learner, &corpus(), 3);

    assert!((result.entries[0].overall_fit() - 150.46).abs() < 0.01);
}

#[test]
fn empty_corpus_and_zero_limit_produce_empty_results() {
    let ranker = RecommendationRanker::default();

    let empty = ranker.recommend(&student("stu-1", &["merit"]), &[], 5);
    assert!(empty.is_empty());
    assert_eq!(empty.source, RecommendationSource::Computed);

    let none = ranker.recommend(&student("stu-1", &[]), &corpus(), 0);
    assert!(none.is_empty());
}

#[test]
fn limit_beyond_corpus_returns_everything_without_padding() {
    let ranker = RecommendationRanker::default();

    let result = ranker.recommend(&student("stu-1", &[]), &corpus(), 50);

    assert_eq!(result.len(), corpus().len());
}

#[test]
fn repeated_pre_declared_id_counts_once() {
    let ranker = RecommendationRanker::default();
    let learner = student("stu-1", &["civic", "civic", "civic"]);

    let result = ranker.recommend(&learner, &corpus(), 2);

    assert_eq!(result.source, RecommendationSource::Computed);
    assert_eq!(ids(&result), vec!["merit", "stem-research"]);
}
