use std::fs;

use assert_matches::assert_matches;
use complaintbot_core::error::CoreError;
use complaintbot_ops::patching::{self, UpdatePair};
use complaintbot_ops::OpsError;

#[test]
fn test_apply_update_backs_up_target() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("email_service.py");
    let updated = dir.path().join("email_service.py.updated");
    fs::write(&target, "old").unwrap();
    fs::write(&updated, "new").unwrap();

    patching::apply_update(&updated, &target).unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), "new");
    assert_eq!(
        fs::read_to_string(dir.path().join("email_service.py.bak")).unwrap(),
        "old"
    );
}

#[test]
fn test_apply_update_without_existing_target() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("fresh.py");
    let updated = dir.path().join("fresh.py.updated");
    fs::write(&updated, "content").unwrap();

    patching::apply_update(&updated, &target).unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), "content");
    assert!(!dir.path().join("fresh.py.bak").exists());
}

#[test]
fn test_missing_updated_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let result = patching::apply_update(&dir.path().join("x.updated"), &dir.path().join("x"));
    assert_matches!(result, Err(OpsError::Core(CoreError::NotFound { .. })));
}

#[test]
fn test_discover_and_apply_updates() {
    let dir = tempfile::tempdir().unwrap();
    let utils = dir.path().join("server").join("utils");
    fs::create_dir_all(&utils).unwrap();
    fs::write(utils.join("email_service.py"), "old email").unwrap();
    fs::write(utils.join("email_service.py.updated"), "new email").unwrap();
    fs::write(utils.join("notification_service.py.updated"), "new notify").unwrap();
    fs::write(dir.path().join("README"), "untouched").unwrap();

    let pairs = patching::discover_updates(dir.path()).unwrap();
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].target, utils.join("email_service.py"));

    let report = patching::apply_updates(&pairs);
    assert!(report.succeeded());
    assert_eq!(report.applied.len(), 2);
    assert!(report.failed.is_empty());
    assert_eq!(
        fs::read_to_string(utils.join("notification_service.py")).unwrap(),
        "new notify"
    );
    assert!(utils.join("email_service.py.bak").exists());
}

#[test]
fn test_nothing_to_apply_is_failure() {
    let dir = tempfile::tempdir().unwrap();
    let pairs = [UpdatePair::for_target(dir.path().join("email_service.py"))];

    let report = patching::apply_updates(&pairs);
    assert!(!report.succeeded());
    assert_eq!(report.skipped.len(), 1);
}

#[cfg(unix)]
#[test]
fn test_symlink_cycle_is_not_followed() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("email_service.py"), "old").unwrap();
    fs::write(dir.path().join("email_service.py.updated"), "new").unwrap();
    std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();

    let pairs = patching::discover_updates(dir.path()).unwrap();
    assert_eq!(pairs.len(), 1);

    let report = patching::apply_updates(&pairs);
    assert_eq!(report.applied.len(), 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("email_service.py.bak")).unwrap(),
        "old"
    );
}

#[test]
fn test_build_directories_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let build = dir.path().join("target");
    fs::create_dir_all(&build).unwrap();
    fs::write(build.join("artifact.updated"), "generated").unwrap();

    assert!(patching::discover_updates(dir.path()).unwrap().is_empty());
}

#[test]
fn test_duplicate_target_applied_once() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("email_service.py");
    fs::write(&target, "old").unwrap();
    fs::write(dir.path().join("email_service.py.updated"), "new").unwrap();
    let pairs = [
        UpdatePair::for_target(&target),
        UpdatePair::for_target(&target),
    ];

    let report = patching::apply_updates(&pairs);
    assert_eq!(report.applied.len(), 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("email_service.py.bak")).unwrap(),
        "old"
    );
}
