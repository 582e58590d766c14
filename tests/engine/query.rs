//! Nearest-neighbor results, index lifecycle and query authorization.

use crate::common::*;

fn indexed_company(test_db: &TestDb, dimension: usize, count: usize) -> (CompanyId, Vec<Vec<f32>>) {
    let user = test_db.session(p("u"));
    let id = user.register("q").unwrap();
    let (embeddings, values) = batch(dimension, count);
    user.append_keys_values(id, embeddings.clone(), values)
        .unwrap();
    user.build_index(id).unwrap();
    (id, embeddings)
}

#[test]
fn results_match_exhaustive_ranking() {
    let test_db = TestDb::with_roles();
    let (id, embeddings) = indexed_company(&test_db, 8, 60);
    let user = test_db.session(p("u"));

    for seed in 0..10 {
        let target = seeded_vector(8, 10_000 + seed);
        let mut expected: Vec<(f64, String)> = embeddings
            .iter()
            .enumerate()
            .map(|(i, e)| (euclidean(e, &target), format!("v{}", i)))
            .collect();
        expected.sort_by(|a, b| a.0.total_cmp(&b.0));

        let hits = user.query(id, target, 7).unwrap();
        assert_eq!(hits.len(), 7);
        for (hit, (distance, value)) in hits.iter().zip(&expected) {
            assert_eq!(&hit.value, value);
            assert!((hit.distance - distance).abs() < 1e-9);
        }
    }
}

#[test]
fn k_larger_than_index_returns_everything() {
    let test_db = TestDb::with_roles();
    let (id, _) = indexed_company(&test_db, 3, 4);
    let hits = test_db
        .session(p("u"))
        .query(id, vec![0.0, 0.0, 0.0], 1_000)
        .unwrap();
    assert_eq!(hits.len(), 4);
}

#[test]
fn zero_k_returns_nothing() {
    let test_db = TestDb::with_roles();
    let (id, _) = indexed_company(&test_db, 3, 4);
    assert!(test_db
        .session(p("u"))
        .get_similar(id, vec![0.0, 0.0, 0.0], 0)
        .unwrap()
        .is_empty());
}

#[test]
fn query_before_any_build_fails() {
    let test_db = TestDb::with_roles();
    let user = test_db.session(p("u"));
    let id = user.register("unbuilt").unwrap();
    user.append_keys_values(id, vec![vec![1.0]], vec!["a".into()])
        .unwrap();
    assert_eq!(
        user.query(id, vec![1.0], 1),
        Err(Error::IndexNotBuilt {
            company: id.as_u64()
        })
    );
}

#[test]
fn empty_build_answers_empty() {
    let test_db = TestDb::with_roles();
    let user = test_db.session(p("u"));
    let id = user.register("empty").unwrap();
    user.build_index(id).unwrap();
    assert!(user.query(id, vec![1.0, 2.0], 3).unwrap().is_empty());
}

#[test]
fn appends_after_build_wait_for_rebuild() {
    let test_db = TestDb::with_roles();
    let user = test_db.session(p("u"));
    let id = user.register("stale").unwrap();
    user.append_keys_values(id, vec![vec![0.0, 0.0]], vec!["old".into()])
        .unwrap();
    user.build_index(id).unwrap();

    user.append_keys_values(id, vec![vec![5.0, 5.0]], vec!["new".into()])
        .unwrap();
    assert!(user.company_info(id).unwrap().is_index_stale());
    assert_eq!(
        user.get_similar(id, vec![5.0, 5.0], 2).unwrap(),
        vec!["old"]
    );

    user.build_index(id).unwrap();
    assert_eq!(
        user.get_similar(id, vec![5.0, 5.0], 2).unwrap(),
        vec!["new", "old"]
    );
}

#[test]
fn query_dimension_must_match() {
    let test_db = TestDb::with_roles();
    let (id, _) = indexed_company(&test_db, 3, 2);
    assert_eq!(
        test_db.session(p("u")).query(id, vec![1.0], 1),
        Err(Error::DimensionMismatch {
            expected: 3,
            got: 1
        })
    );
}

#[test]
fn non_finite_query_is_rejected() {
    let test_db = TestDb::with_roles();
    let (id, _) = indexed_company(&test_db, 3, 2);
    let user = test_db.session(p("u"));
    for bad in [f32::NAN, f32::INFINITY] {
        assert!(matches!(
            user.query(id, vec![bad, 0.0, 0.0], 2),
            Err(Error::InvalidInput { .. })
        ));
        assert!(matches!(
            user.get_similar(id, vec![0.0, bad, 0.0], 2),
            Err(Error::InvalidInput { .. })
        ));
    }
}

#[test]
fn equal_distances_keep_insertion_order() {
    let test_db = TestDb::with_roles();
    let user = test_db.session(p("u"));
    let id = user.register("ties").unwrap();
    user.append_keys_values(
        id,
        vec![vec![1.0, 0.0], vec![-1.0, 0.0], vec![0.0, 1.0]],
        vec!["first".into(), "second".into(), "third".into()],
    )
    .unwrap();
    user.build_index(id).unwrap();
    assert_eq!(
        user.get_similar(id, vec![0.0, 0.0], 3).unwrap(),
        vec!["first", "second", "third"]
    );
}

#[test]
fn cosine_metric_ignores_magnitude() {
    let test_db = TestDb::with_config(EngineConfig {
        metric: DistanceMetric::Cosine,
        ..EngineConfig::default()
    });
    let owner_session = test_db.session(owner());
    let id = owner_session.register("angles").unwrap();
    owner_session
        .append_keys_values(
            id,
            vec![vec![100.0, 0.0], vec![0.1, 0.1]],
            vec!["far-aligned".into(), "near-diagonal".into()],
        )
        .unwrap();
    owner_session.build_index(id).unwrap();

    let hits = owner_session.query(id, vec![1.0, 0.0], 2).unwrap();
    assert_eq!(hits[0].value, "far-aligned");
    assert!(hits[0].distance.abs() < 1e-9);
    assert_eq!(hits[1].value, "near-diagonal");
}

#[test]
fn privileged_query_access_is_default() {
    let test_db = TestDb::with_roles();
    let (id, _) = indexed_company(&test_db, 2, 3);

    test_db.session(p("m")).add_accesser(p("other")).unwrap();
    let other = test_db.session(p("other"));
    assert_eq!(other.query(id, vec![0.0, 0.0], 1), Err(Error::NotAuthorized));
    assert_eq!(other.company_info(id), Err(Error::NotAuthorized));

    // Managers see every company
    assert_eq!(
        test_db
            .session(p("m"))
            .query(id, vec![0.0, 0.0], 1)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn public_query_access_opens_reads_only() {
    let test_db = TestDb::with_config(EngineConfig {
        query_access: QueryAccess::Public,
        ..EngineConfig::default()
    });
    test_db.db.add_manager(&owner(), p("m")).unwrap();
    test_db.db.add_accesser(&p("m"), p("u")).unwrap();
    let (id, _) = indexed_company(&test_db, 2, 3);

    let anon = test_db.session(Principal::anonymous());
    assert_eq!(anon.query(id, vec![0.0, 0.0], 2).unwrap().len(), 2);
    assert_eq!(anon.build_index(id), Err(Error::NotAuthorized));
    assert_eq!(
        anon.append_keys_values(id, vec![vec![0.0, 0.0]], vec!["x".into()]),
        Err(Error::NotAuthorized)
    );
}

#[test]
fn unknown_company_reported_before_privilege() {
    let test_db = TestDb::with_roles();
    let stranger = test_db.session(p("stranger"));
    assert_eq!(
        stranger.query(CompanyId::new(42), vec![1.0], 1),
        Err(Error::UnknownCompany { company: 42 })
    );
}

mod ranking_properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn top_k_is_a_prefix_of_the_full_ranking(
            embeddings in prop::collection::vec(prop::collection::vec(-10.0f32..10.0, 3), 1..40),
            target in prop::collection::vec(-10.0f32..10.0, 3),
            k in 0u32..50,
        ) {
            let test_db = TestDb::with_roles();
            let user = test_db.session(p("u"));
            let id = user.register("prop").unwrap();
            let values: Vec<String> = (0..embeddings.len()).map(|i| i.to_string()).collect();
            user.append_keys_values(id, embeddings.clone(), values).unwrap();
            user.build_index(id).unwrap();

            let full = user.query(id, target.clone(), embeddings.len() as u32).unwrap();
            let top = user.query(id, target, k).unwrap();
            prop_assert_eq!(top.len(), (k as usize).min(embeddings.len()));
            prop_assert_eq!(&top[..], &full[..top.len()]);
        }
    }
}
