//! Tests for logger construction and the synchronous path.

mod common;

use common::{ManualClock, read_lines};
use daylog::{Error, Level, Logger, OverflowPolicy};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

#[test]
fn init_opens_dated_file() {
    let tmp = TempDir::new().unwrap();
    let logger = Logger::init(tmp.path().join("server.log"), 8192, 5_000_000, 0).unwrap();

    assert!(!logger.is_async());
    assert!(logger.is_enabled());
    let path = logger.current_path();
    assert!(path.exists());

    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    let today = chrono::Local::now().format("%Y_%m_%d_server.log").to_string();
    // Tolerate the test straddling midnight.
    assert!(name.ends_with("_server.log"));
    assert_eq!(name.len(), today.len());
}

#[test]
fn builder_defaults() {
    let tmp = TempDir::new().unwrap();
    let logger = Logger::builder()
        .path(tmp.path().join("d.log"))
        .build()
        .unwrap();
    assert_eq!(logger.buffer_capacity(), 8192);
    assert_eq!(logger.split_lines(), 5_000_000);
    assert_eq!(logger.overflow_policy(), OverflowPolicy::WriteThrough);
    assert_eq!(logger.queued(), 0);
    assert_eq!(logger.line_count(), 0);
}

#[test]
fn writes_formatted_lines() {
    let tmp = TempDir::new().unwrap();
    let logger = Logger::builder()
        .path(tmp.path().join("app.log"))
        .clock(ManualClock::at(2024, 5, 1))
        .build()
        .unwrap();

    logger.debug("a bug");
    logger.info("some info");
    logger.warn("a warning");
    logger.error("an error");
    logger.fatal("game over");
    logger.log(Level::Info, "explicit");
    assert_eq!(logger.line_count(), 6);

    let lines = read_lines(&tmp.path().join("2024_05_01_app.log"));
    assert_eq!(
        lines,
        vec![
            "2024-05-01 12:30:45.123456 [DEBUG]: a bug",
            "2024-05-01 12:30:45.123456 [INFO] : some info",
            "2024-05-01 12:30:45.123456 [WARN] : a warning",
            "2024-05-01 12:30:45.123456 [ERROR]: an error",
            "2024-05-01 12:30:45.123456 [FATAL]: game over",
            "2024-05-01 12:30:45.123456 [INFO] : explicit",
        ]
    );
}

#[test]
fn appends_to_existing_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("2024_05_01_app.log"), "earlier\n").unwrap();

    let logger = Logger::builder()
        .path(tmp.path().join("app.log"))
        .clock(ManualClock::at(2024, 5, 1))
        .build()
        .unwrap();
    logger.info("later");
    drop(logger);

    let lines = read_lines(&tmp.path().join("2024_05_01_app.log"));
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "earlier");
}

#[test]
fn creates_missing_directory() {
    let tmp = TempDir::new().unwrap();
    let logger = Logger::builder()
        .path(tmp.path().join("nested/deeper/app.log"))
        .clock(ManualClock::at(2024, 5, 1))
        .build()
        .unwrap();
    logger.info("hi");
    drop(logger);

    assert!(tmp.path().join("nested/deeper/2024_05_01_app.log").exists());
}

#[test]
fn open_failure_is_reported() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("2024_05_01_app.log")).unwrap();

    let result = Logger::builder()
        .path(tmp.path().join("app.log"))
        .clock(ManualClock::at(2024, 5, 1))
        .build();

    match result {
        Err(Error::Open { path, .. }) => assert!(path.ends_with("2024_05_01_app.log")),
        other => panic!("expected open error, got {other:?}"),
    }
}

#[test]
fn rejects_invalid_options() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("app.log");

    assert!(matches!(
        Logger::init(&path, 8, 100, 0),
        Err(Error::InvalidConfig(_))
    ));
    assert!(matches!(
        Logger::init(&path, 8192, 0, 0),
        Err(Error::InvalidConfig(_))
    ));
    let dir_only = format!("{}/", tmp.path().display());
    assert!(matches!(
        Logger::init(dir_only, 8192, 100, 0),
        Err(Error::InvalidPath(_))
    ));
}

#[test]
fn disabled_logger_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let logger = Logger::builder()
        .path(tmp.path().join("app.log"))
        .enabled(false)
        .clock(ManualClock::at(2024, 5, 1))
        .build()
        .unwrap();

    logger.info("ignored");
    assert_eq!(logger.line_count(), 0);

    logger.set_enabled(true);
    logger.info("kept");
    drop(logger);

    let lines = read_lines(&tmp.path().join("2024_05_01_app.log"));
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("kept"));
}

#[test]
fn macros_skip_argument_evaluation_when_disabled() {
    static EVALUATED: AtomicUsize = AtomicUsize::new(0);
    fn expensive() -> usize {
        EVALUATED.fetch_add(1, Ordering::SeqCst)
    }

    let tmp = TempDir::new().unwrap();
    let logger = Logger::builder()
        .path(tmp.path().join("app.log"))
        .enabled(false)
        .build()
        .unwrap();

    daylog::info!(logger, "value {}", expensive());
    daylog::error!(logger, "value {}", expensive());
    assert_eq!(EVALUATED.load(Ordering::SeqCst), 0);

    logger.set_enabled(true);
    daylog::warn!(logger, "value {}", expensive());
    assert_eq!(EVALUATED.load(Ordering::SeqCst), 1);
    assert_eq!(logger.line_count(), 1);
}

#[test]
fn flush_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let logger = Logger::builder()
        .path(tmp.path().join("app.log"))
        .auto_flush(false)
        .clock(ManualClock::at(2024, 5, 1))
        .build()
        .unwrap();

    logger.info("buffered");
    logger.flush().unwrap();
    let after_first = fs::read_to_string(tmp.path().join("2024_05_01_app.log")).unwrap();
    assert_eq!(after_first.lines().count(), 1);

    for _ in 0..5 {
        logger.flush().unwrap();
    }
    let after_many = fs::read_to_string(tmp.path().join("2024_05_01_app.log")).unwrap();
    assert_eq!(after_first, after_many);
}

#[test]
fn long_messages_are_bounded_on_disk() {
    let tmp = TempDir::new().unwrap();
    let logger = Logger::builder()
        .path(tmp.path().join("app.log"))
        .buffer_capacity(256)
        .clock(ManualClock::at(2024, 5, 1))
        .build()
        .unwrap();

    logger.info(&"m".repeat(512));
    logger.info("short");
    drop(logger);

    let content = fs::read_to_string(tmp.path().join("2024_05_01_app.log")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].len(), 255);
    assert!(lines[1].ends_with("short"));
}
