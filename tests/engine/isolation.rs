//! Companies never see each other's entries.

use crate::common::*;

#[test]
fn results_come_only_from_the_queried_company() {
    let test_db = TestDb::with_roles();
    test_db.session(p("m")).add_accesser(p("v")).unwrap();

    let u = test_db.session(p("u"));
    let v = test_db.session(p("v"));
    let a = u.register("a").unwrap();
    let b = v.register("b").unwrap();
    assert_ne!(a, b);

    u.append_keys_values(a, vec![vec![0.0, 0.0], vec![1.0, 1.0]], vec!["a0".into(), "a1".into()])
        .unwrap();
    v.append_keys_values(b, vec![vec![0.0, 0.0]], vec!["b0".into()])
        .unwrap();
    u.build_index(a).unwrap();
    v.build_index(b).unwrap();

    let from_a = u.get_similar(a, vec![0.0, 0.0], 10).unwrap();
    assert_eq!(from_a, vec!["a0", "a1"]);
    let from_b = v.get_similar(b, vec![0.0, 0.0], 10).unwrap();
    assert_eq!(from_b, vec!["b0"]);
}

#[test]
fn rebuilding_one_company_leaves_another_unchanged() {
    let test_db = TestDb::with_roles();
    test_db.session(p("m")).add_accesser(p("v")).unwrap();

    let u = test_db.session(p("u"));
    let v = test_db.session(p("v"));
    let a = u.register("a").unwrap();
    let b = v.register("b").unwrap();

    let (embeddings, values) = batch(3, 10);
    u.append_keys_values(a, embeddings, values).unwrap();
    u.build_index(a).unwrap();
    v.append_keys_values(
        b,
        vec![vec![0.0, 0.0, 0.0], vec![1.0, 0.0, 0.0], vec![0.0, 2.0, 0.0]],
        vec!["b0".into(), "b1".into(), "b2".into()],
    )
    .unwrap();
    v.build_index(b).unwrap();

    let query = vec![0.1, 0.1, 0.0];
    let hits_before = v.query(b, query.clone(), 10).unwrap();
    let info_before = v.company_info(b).unwrap();

    // Entries identical to B's, appended to A and indexed there
    u.append_keys_values(
        a,
        vec![vec![0.1, 0.1, 0.0], vec![0.0, 0.0, 0.0]],
        vec!["a-near".into(), "a-origin".into()],
    )
    .unwrap();
    u.build_index(a).unwrap();
    assert_eq!(u.get_similar(a, query.clone(), 1).unwrap(), vec!["a-near"]);

    assert_eq!(v.query(b, query, 10).unwrap(), hits_before);
    assert_eq!(v.company_info(b).unwrap(), info_before);
}

#[test]
fn company_owner_cannot_touch_foreign_company() {
    let test_db = TestDb::with_roles();
    test_db.session(p("m")).add_accesser(p("v")).unwrap();

    let u = test_db.session(p("u"));
    let v = test_db.session(p("v"));
    let a = u.register("a").unwrap();
    v.register("b").unwrap();

    assert_eq!(
        v.append_keys_values(a, vec![vec![1.0]], vec!["intruder".into()]),
        Err(Error::NotAuthorized)
    );
    assert_eq!(v.build_index(a), Err(Error::NotAuthorized));
    assert_eq!(u.company_info(a).unwrap().entries, 0);
}

#[test]
fn dimensions_are_per_company() {
    let test_db = TestDb::with_roles();
    let u = test_db.session(p("u"));
    let a = u.register("small").unwrap();
    let b = u.register("large").unwrap();

    u.append_keys_values(a, vec![vec![1.0, 2.0]], vec!["a".into()])
        .unwrap();
    u.append_keys_values(b, vec![vec![1.0, 2.0, 3.0, 4.0]], vec!["b".into()])
        .unwrap();
    assert_eq!(u.company_info(a).unwrap().dimension, Some(2));
    assert_eq!(u.company_info(b).unwrap().dimension, Some(4));
}

#[test]
fn ids_are_never_reused() {
    let test_db = TestDb::with_roles();
    let u = test_db.session(p("u"));
    let ids: Vec<CompanyId> = (0..5).map(|i| u.register(format!("c{}", i)).unwrap()).collect();
    assert_eq!(ids, (0..5).map(CompanyId::new).collect::<Vec<_>>());
    assert_eq!(test_db.db.company_count(), 5);
}
