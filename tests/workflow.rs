// tests/workflow.rs

//! End-to-end pipeline tests: resolve, validate, dispatch against a
//! recording backend.

mod common;

use common::{RecordingBackend, make_ctx, test_config};
use drover::{ExpirationValue, OptionSet, Session, dispatch, validate};

fn admin_options(name: &str) -> OptionSet {
    OptionSet { admin: Some(name.to_string()), ..Default::default() }
}

#[test]
fn test_install_as_root_dispatches_with_targets_and_admin() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let (backend, calls) = RecordingBackend::new();
    let mut session = Session::new(Box::new(backend));

    let mut ctx = make_ctx("install", admin_options("jdoe"), &["pkgA", "pkgB"]);
    validate::run_checks(&mut ctx, &config, &mut session, true).unwrap();
    dispatch::dispatch(&ctx, &mut session).unwrap();

    let calls = calls.borrow();
    assert_eq!(
        *calls,
        vec![
            "connect".to_string(),
            "env admin=jdoe debug=false".to_string(),
            "install pkgA pkgB admin=Some(\"jdoe\")".to_string(),
        ]
    );
}

#[test]
fn test_list_installed_alias_as_non_root() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let (backend, calls) = RecordingBackend::new();
    let mut session = Session::new(Box::new(backend));

    // Hyphenated alias form, unprivileged principal
    let mut ctx = make_ctx("list-installed", OptionSet::default(), &[]);
    validate::run_checks(&mut ctx, &config, &mut session, false).unwrap();
    dispatch::dispatch(&ctx, &mut session).unwrap();

    let calls = calls.borrow();
    // No connection for a local listing, but the identity still reaches
    // the backend environment
    assert_eq!(calls.len(), 2);
    assert!(calls[0].starts_with("env admin="));
    assert_eq!(calls[1], "list_installed");
}

#[test]
fn test_install_without_targets_fails_before_backend_contact() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let (backend, calls) = RecordingBackend::new();
    let mut session = Session::new(Box::new(backend));

    let mut ctx = make_ctx("install", admin_options("jdoe"), &[]);
    let err = validate::run_checks(&mut ctx, &config, &mut session, true).unwrap_err();

    assert_eq!(err.kind(), "ArgumentError");
    assert!(err.to_string().contains("package basename"));
    assert!(calls.borrow().is_empty(), "backend was contacted: {:?}", calls.borrow());
}

#[test]
fn test_unknown_action_resolution_fails() {
    let err = drover::registry::resolve("bogus-action").unwrap_err();
    assert_eq!(err.kind(), "UnknownAction");
    assert!(err.to_string().contains("bogus-action"));
    assert!(err.to_string().contains("help"));
}

#[test]
fn test_privileged_action_rejected_without_root() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let (backend, calls) = RecordingBackend::new();
    let mut session = Session::new(Box::new(backend));

    let mut ctx = make_ctx("install", admin_options("jdoe"), &["pkgA"]);
    let err = validate::run_checks(&mut ctx, &config, &mut session, false).unwrap_err();

    assert_eq!(err.kind(), "PermissionError");
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_placeholder_admin_rejected_before_connection() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let (backend, calls) = RecordingBackend::new();
    let mut session = Session::new(Box::new(backend));

    let mut ctx = make_ctx("uninstall", admin_options("auto-installed"), &["pkgA"]);
    let err = validate::run_checks(&mut ctx, &config, &mut session, true).unwrap_err();

    assert_eq!(err.kind(), "ArgumentError");
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_expiration_converted_in_place_and_dispatched() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let (backend, _calls) = RecordingBackend::new();
    let mut session = Session::new(Box::new(backend));

    let options = OptionSet {
        admin: Some("jdoe".to_string()),
        expiration: Some(ExpirationValue::Raw("15".to_string())),
        ..Default::default()
    };
    let mut ctx = make_ctx("install", options, &["pilot-pkg"]);
    validate::run_checks(&mut ctx, &config, &mut session, true).unwrap();

    assert_eq!(ctx.options.expiration, Some(ExpirationValue::Days(15)));
    dispatch::dispatch(&ctx, &mut session).unwrap();
}

#[test]
fn test_connection_failure_propagates_and_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let (backend, calls) = RecordingBackend::failing_connect();
    let mut session = Session::new(Box::new(backend));

    // list_available needs a connection but not root
    let mut ctx = make_ctx("avail", OptionSet::default(), &[]);
    let err = validate::run_checks(&mut ctx, &config, &mut session, false).unwrap_err();

    assert_eq!(err.kind(), "ConnectionError");
    assert!(!session.is_connected());
    drop(session);
    // Never connected, so nothing to tear down
    assert!(calls.borrow().iter().all(|c| c != "disconnect"));
}

#[test]
fn test_help_action_never_contacts_backend() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let (backend, calls) = RecordingBackend::new();
    let mut session = Session::new(Box::new(backend));

    let mut ctx = make_ctx("help", OptionSet::default(), &[]);
    validate::run_checks(&mut ctx, &config, &mut session, false).unwrap();
    dispatch::dispatch(&ctx, &mut session).unwrap();

    let calls = calls.borrow();
    // The staged environment is the only thing that reaches the backend
    assert_eq!(calls.len(), 1);
    assert!(calls[0].starts_with("env admin="));
}

#[test]
fn test_force_reaches_list_available() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let (backend, calls) = RecordingBackend::new();
    let mut session = Session::new(Box::new(backend));

    let options = OptionSet { force: true, ..Default::default() };
    let mut ctx = make_ctx("list_available", options, &[]);
    validate::run_checks(&mut ctx, &config, &mut session, false).unwrap();
    dispatch::dispatch(&ctx, &mut session).unwrap();

    assert!(calls.borrow().contains(&"list_available force=true".to_string()));
}

#[test]
fn test_every_routable_action_reaches_its_backend_operation() {
    // One dispatch per registry action; help is covered separately
    let cases = [
        ("uninstall", vec!["pkgA"], "uninstall pkgA"),
        ("dequeue", vec!["pkgA"], "dequeue_pending pkgA"),
        ("sync", vec![], "sync"),
        ("freeze", vec!["pkgA"], "freeze pkgA"),
        ("thaw", vec!["pkgA"], "thaw pkgA"),
        ("forget", vec!["pkgA"], "forget pkgA"),
        ("list_manual", vec![], "list_manual"),
        ("list_pilots", vec![], "list_pilots"),
        ("list_frozen", vec![], "list_frozen"),
        ("list_queue", vec![], "list_pending_queue"),
        ("list_details", vec!["pkgA"], "list_details pkgA"),
        ("list_files", vec!["pkgA"], "list_files pkgA"),
        ("query_files", vec!["/usr/bin/tool"], "query_files /usr/bin/tool"),
    ];

    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    for (token, targets, expected) in cases {
        let (backend, calls) = RecordingBackend::new();
        let mut session = Session::new(Box::new(backend));

        let mut ctx = make_ctx(token, admin_options("jdoe"), &targets);
        validate::run_checks(&mut ctx, &config, &mut session, true).unwrap();
        dispatch::dispatch(&ctx, &mut session).unwrap();

        assert!(
            calls.borrow().iter().any(|c| c == expected),
            "'{}' did not record '{}': {:?}",
            token,
            expected,
            calls.borrow()
        );
    }
}
