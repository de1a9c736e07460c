//! The default instance degrades to console-only when its file sink fails

#![allow(clippy::unwrap_used, clippy::expect_used)]

use loglib::{info_log, LogErrorKind};
use tempfile::TempDir;

#[test]
fn test_global_falls_back_to_console_when_file_sink_fails() {
    let dir = TempDir::new().unwrap();
    // A directory cannot be opened as the log file
    std::env::set_var("LOG_FILE", dir.path());
    std::env::remove_var("LOG_LEVEL");
    std::env::remove_var("LOG_PATTERN");

    let err = loglib::initialize(None).unwrap_err();
    assert_eq!(err.kind(), LogErrorKind::SinkInit);
    assert!(!loglib::is_initialized());

    let facade = loglib::global();
    assert!(loglib::is_initialized());
    assert_eq!(facade.file_path(), None);
    info_log!("still logging");

    assert!(std::ptr::eq(facade, loglib::initialize(None).unwrap()));
}
