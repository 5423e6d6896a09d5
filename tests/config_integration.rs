//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use quadview::config::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("QV_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Test From Env");
    std::env::remove_var("QV_WINDOW__TITLE");
}

#[test]
#[serial]
fn test_env_override_numeric() {
    std::env::set_var("QV_WINDOW__WIDTH", "800");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.width, 800);
    std::env::remove_var("QV_WINDOW__WIDTH");
}

#[test]
#[serial]
fn test_defaults_without_files_or_env() {
    std::env::remove_var("QV_WINDOW__TITLE");
    std::env::remove_var("QV_WINDOW__WIDTH");

    // Point at a directory with no config files; defaults apply.
    let config = AppConfig::load_from("does-not-exist").unwrap();
    assert_eq!(config.window.width, 640);
    assert_eq!(config.window.height, 480);
    assert_eq!(config.camera.direction, [0.1, 0.0, 1.0]);
}
