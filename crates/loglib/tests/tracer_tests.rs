#![allow(clippy::unwrap_used, clippy::expect_used)]

use loglib::test_capture::CaptureSink;
use loglib::{trace_function, LogFacade, Severity};

fn capture_facade(level: Severity) -> (LogFacade, CaptureSink) {
    let capture = CaptureSink::new();
    let facade = LogFacade::builder()
        .no_file()
        .console(false)
        .pattern("%L %v")
        .level(level)
        .sink(capture.clone())
        .build()
        .unwrap();
    (facade, capture)
}

fn traced_work(facade: &LogFacade) {
    trace_function!(facade);
    facade.log(Severity::Info, "working");
}

fn traced_early_return(facade: &LogFacade, bail: bool) -> u32 {
    trace_function!(facade);
    if bail {
        return 0;
    }
    facade.log(Severity::Info, "not reached");
    1
}

fn traced_fallible(facade: &LogFacade) -> Result<(), std::num::ParseIntError> {
    trace_function!(facade);
    let _n: u32 = "not a number".parse()?;
    facade.log(Severity::Info, "not reached");
    Ok(())
}

fn traced_panic(facade: &LogFacade) {
    trace_function!(facade);
    panic!("boom");
}

#[test]
fn test_scope_emits_entering_then_exiting() {
    let (facade, capture) = capture_facade(Severity::Trace);

    traced_work(&facade);

    let lines = capture.lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("T Entering function "));
    assert!(lines[0].starts_with("T Entering function traced_work in file tracer_tests.rs:"));
    assert_eq!(lines[1], "I working");
    assert!(lines[2].starts_with("T Exiting function "));
    assert_eq!(
        lines[0].trim_start_matches("T Entering"),
        lines[2].trim_start_matches("T Exiting"),
        "entry and exit must name the same call site"
    );
}

#[test]
fn test_exit_record_on_early_return() {
    let (facade, capture) = capture_facade(Severity::Trace);

    assert_eq!(traced_early_return(&facade, true), 0);

    let lines = capture.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("Entering function"));
    assert!(lines[1].contains("Exiting function"));
    assert_eq!(capture.count_lines(|l| l.contains("not reached")), 0);
}

#[test]
fn test_exit_record_on_question_mark() {
    let (facade, capture) = capture_facade(Severity::Trace);

    assert!(traced_fallible(&facade).is_err());

    assert_eq!(capture.count_lines(|l| l.contains("Entering function")), 1);
    assert_eq!(capture.count_lines(|l| l.contains("Exiting function")), 1);
}

#[test]
fn test_exit_record_on_panic() {
    let (facade, capture) = capture_facade(Severity::Trace);

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| traced_panic(&facade)));

    assert!(result.is_err());
    let lines = capture.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("Exiting function"));
    assert!(lines[1].contains("traced_panic"));
}

#[test]
fn test_full_path_scope_via_function_name() {
    let (facade, capture) = capture_facade(Severity::Trace);

    {
        let _scope = facade.trace_scope(loglib::function_name!(), "tracer_tests.rs", 7);
    }

    let lines = capture.lines();
    assert_eq!(lines.len(), 2);
    assert!(
        lines[0].contains("tracer_tests::test_full_path_scope_via_function_name in file"),
        "got {}",
        lines[0]
    );
}

#[test]
fn test_tracer_records_are_trace_level() {
    let (facade, capture) = capture_facade(Severity::Debug);

    traced_work(&facade);

    assert_eq!(capture.lines(), vec!["I working"]);
}

#[test]
fn test_explicit_scope_identifiers() {
    let (facade, capture) = capture_facade(Severity::Trace);

    {
        let tracer = facade.trace_scope("handshake", "conn.rs", 42);
        assert_eq!(tracer.function(), "handshake");
        assert_eq!(tracer.file(), "conn.rs");
        assert_eq!(tracer.line(), 42);
    }

    assert_eq!(
        capture.lines(),
        vec![
            "T Entering function handshake in file conn.rs:42",
            "T Exiting function handshake in file conn.rs:42",
        ]
    );
}

#[test]
fn test_nested_scopes_unwind_in_order() {
    let (facade, capture) = capture_facade(Severity::Trace);

    {
        let _outer = facade.trace_scope("outer", "a.rs", 1);
        let _inner = facade.trace_scope("inner", "a.rs", 2);
    }

    assert_eq!(
        capture.lines(),
        vec![
            "T Entering function outer in file a.rs:1",
            "T Entering function inner in file a.rs:2",
            "T Exiting function inner in file a.rs:2",
            "T Exiting function outer in file a.rs:1",
        ]
    );
}
