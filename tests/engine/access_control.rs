//! Role rules of the owner → managers → accessers hierarchy.

use crate::common::*;

#[test]
fn owner_is_not_implicitly_a_manager() {
    let test_db = TestDb::new();
    let owner_session = test_db.session(owner());
    assert_eq!(owner_session.add_accesser(p("x")), Err(Error::NotManager));

    // Owner may promote itself, after which manager rights apply
    assert!(owner_session.add_manager(owner()).unwrap());
    assert!(owner_session.add_accesser(p("x")).unwrap());
}

#[test]
fn managers_cannot_add_managers() {
    let test_db = TestDb::with_roles();
    let err = test_db.session(p("m")).add_manager(p("m2")).unwrap_err();
    assert_eq!(err, Error::NotOwner);
    assert!(err.is_hard_failure());
    assert!(!test_db.db.states()[0].managers.contains(&p("m2")));
}

#[test]
fn accessers_have_no_acl_rights() {
    let test_db = TestDb::with_roles();
    let user = test_db.session(p("u"));
    assert_eq!(user.add_accesser(p("friend")), Err(Error::NotManager));
    assert_eq!(user.remove_accesser(p("u")), Err(Error::NotManager));
    assert_eq!(user.set_acl_enabled(false), Err(Error::NotOwner));
}

#[test]
fn removed_accesser_keeps_its_companies() {
    let test_db = TestDb::with_roles();
    let user = test_db.session(p("u"));
    let id = user.register("mine").unwrap();

    assert!(test_db.session(p("m")).remove_accesser(p("u")).unwrap());

    // Registration is gone, company ownership is not
    assert_eq!(user.register("another"), Err(Error::NotAuthorized));
    user.append_keys_values(id, vec![vec![1.0]], vec!["still".into()])
        .unwrap();
    user.build_index(id).unwrap();
    assert_eq!(user.get_similar(id, vec![1.0], 1).unwrap(), vec!["still"]);
}

#[test]
fn removing_absent_accesser_is_noop() {
    let test_db = TestDb::with_roles();
    let manager = test_db.session(p("m"));
    let before = test_db.db.states();
    assert!(!manager.remove_accesser(p("nobody")).unwrap());
    assert_eq!(test_db.db.states(), before);
}

#[test]
fn disabled_acl_opens_registration_only() {
    let test_db = TestDb::with_roles();
    let user = test_db.session(p("u"));
    let id = user.register("private").unwrap();

    assert!(test_db.session(owner()).set_acl_enabled(false).unwrap());
    let stranger = test_db.session(p("stranger"));
    let theirs = stranger.register("open door").unwrap();
    assert_eq!(theirs, CompanyId::new(1));

    // Company-level checks are unaffected by the flag
    assert_eq!(
        stranger.append_keys_values(id, vec![vec![1.0]], vec!["x".into()]),
        Err(Error::NotAuthorized)
    );

    assert!(test_db.session(owner()).set_acl_enabled(true).unwrap());
    assert_eq!(stranger.register("closed"), Err(Error::NotAuthorized));
    // Still owns what it registered while open
    stranger.build_index(theirs).unwrap();
}

#[test]
fn anonymous_caller_is_an_ordinary_principal() {
    let test_db = TestDb::with_roles();
    let anon = test_db.session(Principal::anonymous());
    assert_eq!(anon.register("x"), Err(Error::NotAuthorized));

    // A manager may admit it explicitly
    test_db
        .session(p("m"))
        .add_accesser(Principal::anonymous())
        .unwrap();
    assert!(anon.register("x").is_ok());
}

#[test]
fn states_reflect_each_committed_change() {
    let test_db = TestDb::new();
    let owner_session = test_db.session(owner());

    let initial = owner_session.states().unwrap();
    assert_eq!(initial.len(), 1);
    assert_eq!(initial[0].owner, owner());
    assert!(initial[0].managers.is_empty());
    assert!(initial[0].acl_enabled);

    owner_session.add_manager(p("m")).unwrap();
    test_db.session(p("m")).add_accesser(p("u")).unwrap();
    owner_session.set_acl_enabled(false).unwrap();

    let states = test_db.session(p("stranger")).states().unwrap();
    assert_eq!(states.len(), 1);
    let view = &states[0];
    assert!(view.managers.contains(&p("m")));
    assert!(view.accessers.contains(&p("u")));
    assert!(!view.acl_enabled);
    assert_eq!(view.version, initial[0].version + 3);
}
