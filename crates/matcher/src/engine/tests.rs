use super::*;

fn record(id: &str, embedding: &[f32]) -> EmbeddingRecord {
    EmbeddingRecord::new(id, embedding.to_vec())
}

fn abc_candidates() -> Vec<EmbeddingRecord> {
    vec![
        record("A", &[0.0, 0.0]),
        record("B", &[1.0, 1.0]),
        record("C", &[5.0, 5.0]),
    ]
}

#[test]
fn nearest_candidate_is_returned() {
    let hit = find_best_match(&[0.1, 0.1], &abc_candidates(), 1.0).expect("match");
    assert_eq!(hit.person_id, "A");
    assert!((hit.distance - 0.02).abs() < 1e-6);
}

#[test]
fn far_query_is_rejected_with_nearest_distance() {
    let err = find_best_match(&[10.0, 10.0], &abc_candidates(), 1.0).unwrap_err();
    match err {
        NoMatch::BelowThreshold { nearest, distance } => {
            assert_eq!(nearest, "C");
            assert!((distance - 50.0).abs() < 1e-4);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn empty_candidates_report_no_trained_identities() {
    assert!(matches!(
        find_best_match(&[1.0], &[], 0.6),
        Err(NoMatch::NoTrainedIdentities)
    ));
}

#[test]
fn ties_resolve_to_first_candidate() {
    let candidates = vec![
        record("first", &[1.0, 0.0]),
        record("second", &[-1.0, 0.0]),
    ];
    let hit = find_best_match(&[0.0, 0.0], &candidates, 2.0).unwrap();
    assert_eq!(hit.person_id, "first");

    let reversed: Vec<_> = candidates.into_iter().rev().collect();
    let hit = find_best_match(&[0.0, 0.0], &reversed, 2.0).unwrap();
    assert_eq!(hit.person_id, "second");
}

#[test]
fn distance_equal_to_threshold_is_accepted() {
    let candidates = vec![record("edge", &[1.0, 0.0])];
    let hit = find_best_match(&[0.0, 0.0], &candidates, 1.0).unwrap();
    assert_eq!(hit.person_id, "edge");
    assert_eq!(hit.distance, 1.0);
}

#[test]
fn distances_above_one_are_still_tracked() {
    let candidates = vec![record("far", &[2.0, 0.0]), record("farther", &[3.0, 0.0])];
    let hit = find_best_match(&[0.0, 0.0], &candidates, 5.0).unwrap();
    assert_eq!(hit.person_id, "far");
    assert_eq!(hit.distance, 4.0);
}

#[test]
fn mismatched_dimensions_are_skipped() {
    let candidates = vec![
        record("short", &[0.1]),
        record("ok", &[0.5, 0.5]),
        record("long", &[0.1, 0.1, 0.1]),
    ];
    let hit = find_best_match(&[0.1, 0.1], &candidates, 1.0).unwrap();
    assert_eq!(hit.person_id, "ok");
}

#[test]
fn all_mismatched_reports_each_candidate() {
    let candidates = vec![record("x", &[1.0]), record("y", &[1.0, 2.0, 3.0])];
    match find_best_match(&[0.0, 0.0], &candidates, 1.0).unwrap_err() {
        NoMatch::NoComparableCandidates { mismatches } => {
            assert_eq!(mismatches.len(), 2);
            assert!(matches!(
                &mismatches[0],
                StoreError::DimensionMismatch { person_id, expected: 2, got: 1 } if person_id == "x"
            ));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn squared_euclidean_basics() {
    assert_eq!(squared_euclidean(&[1.0, 2.0], &[1.0, 2.0]), Some(0.0));
    assert_eq!(squared_euclidean(&[0.0, 0.0], &[3.0, 4.0]), Some(25.0));
    assert_eq!(squared_euclidean(&[0.0], &[0.0, 0.0]), None);
}

#[test]
fn search_does_not_touch_candidates() {
    let candidates = abc_candidates();
    let before = candidates.clone();
    let _ = find_best_match(&[0.1, 0.1], &candidates, 1.0);
    assert_eq!(candidates, before);
}
