//! Fixture-root resolution from the process environment.

use serial_test::serial;
use tempfile::TempDir;

use servecfg_harness::{
    FIXTURE_ROOT_ENV, GoldenTestRunner, HarnessError, NoopBundleInit,
};
use servecfg_test_support::{EnvGuard, ModelDirBuilder};

#[test]
#[serial(servecfg_env)]
fn from_env_resolves_fixture_root() {
    let root = TempDir::new().unwrap();
    ModelDirBuilder::new(root.path(), "enved").config_text("platform: custom\n");

    let _guard = EnvGuard::set(FIXTURE_ROOT_ENV, root.path().to_str().unwrap());
    let mut runner = GoldenTestRunner::from_env().unwrap();
    let summary = runner.validate_one("", false, None, &NoopBundleInit).unwrap();
    assert_eq!(summary.tested, 1);
}

#[test]
#[serial(servecfg_env)]
fn from_env_fails_when_unset() {
    let _guard = EnvGuard::unset(FIXTURE_ROOT_ENV);
    let err = GoldenTestRunner::from_env().unwrap_err();
    assert!(matches!(err, HarnessError::FixtureRootUnset { .. }));
}
