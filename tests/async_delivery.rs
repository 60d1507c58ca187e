//! Tests for queued delivery, the drainer and shutdown.

mod common;

use common::{ManualClock, log_files, read_lines, total_lines};
use chrono::NaiveDate;
use daylog::fmt::HEADER_LEN;
use daylog::queue::{DeliveryQueue, QueuedLine};
use daylog::{Level, Logger, OverflowPolicy};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const MESSAGES: [&str; 5] = [
    "this is a bug!",
    "this is an error!",
    "this is a piece of information",
    "this is a warning",
    "this is a fatal error",
];

fn async_logger(tmp: &TempDir, queue: usize, policy: OverflowPolicy) -> Arc<Logger> {
    Arc::new(
        Logger::builder()
            .path(tmp.path().join("async_write"))
            .split_lines(500)
            .queue_capacity(queue)
            .overflow(policy)
            .clock(ManualClock::at(2024, 5, 1))
            .build()
            .unwrap(),
    )
}

fn spawn_producers(logger: &Arc<Logger>, threads: usize, per_thread: usize) {
    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let logger = Arc::clone(logger);
            thread::spawn(move || {
                let level = Level::all()[t % 5];
                for n in 0..per_thread {
                    daylog::log!(logger, level, "t{t} n{n} {}", MESSAGES[t % 5]);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("producer panicked");
    }
}

#[test]
fn concurrent_producers_lose_nothing() {
    let tmp = TempDir::new().unwrap();
    let logger = async_logger(&tmp, 50, OverflowPolicy::WriteThrough);
    assert!(logger.is_async());

    spawn_producers(&logger, 5, 110);
    logger.shutdown();

    assert_eq!(logger.queued(), 0);
    assert_eq!(logger.write_failures(), 0);
    assert_eq!(logger.line_count(), 550);
    assert_eq!(total_lines(tmp.path()), 550);

    let mut seen: Vec<String> = log_files(tmp.path())
        .iter()
        .flat_map(|path| read_lines(path))
        .map(|line| line[HEADER_LEN..].to_string())
        .collect();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 550, "duplicated lines on disk");
}

#[test]
fn full_queue_hands_the_line_back() {
    let line = |text: &str| QueuedLine {
        date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        text: text.to_string(),
    };
    let mut queue = DeliveryQueue::with_capacity(1);
    assert_eq!(queue.capacity(), 1);

    assert!(queue.try_push(line("first\n")).is_ok());
    assert!(queue.is_full());
    assert_eq!(queue.try_push(line("second\n")), Err(line("second\n")));
    assert_eq!(queue.len(), 1);
    assert_eq!(queue.pop(), Some(line("first\n")));
}

#[test]
fn burst_through_single_slot_queue_counts_every_line_once() {
    let tmp = TempDir::new().unwrap();
    let logger = async_logger(&tmp, 1, OverflowPolicy::WriteThrough);

    for n in 0..400 {
        daylog::info!(logger, "burst {n}");
    }
    logger.shutdown();

    assert!(logger.overflow_writes() <= 400);
    assert_eq!(logger.write_failures(), 0);
    assert_eq!(logger.line_count(), 400);
    assert_eq!(total_lines(tmp.path()), 400);

    let mut seen: Vec<String> = read_lines(&tmp.path().join("2024_05_01_async_write"))
        .into_iter()
        .map(|line| line[HEADER_LEN..].to_string())
        .collect();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 400);
}

#[test]
fn segment_split_applies_to_drained_lines() {
    let tmp = TempDir::new().unwrap();
    let logger = async_logger(&tmp, 50, OverflowPolicy::WriteThrough);

    spawn_producers(&logger, 5, 110);
    drop(logger);

    let files = log_files(tmp.path());
    assert_eq!(files.len(), 2);
    assert_eq!(read_lines(&files[0]).len(), 500);
    assert_eq!(read_lines(&files[1]).len(), 50);
    assert!(files[1].ends_with("2024_05_01_async_write.1"));
}

#[test]
fn blocking_policy_preserves_per_thread_order() {
    let tmp = TempDir::new().unwrap();
    let logger = async_logger(&tmp, 4, OverflowPolicy::Block);

    spawn_producers(&logger, 5, 110);
    logger.shutdown();

    let lines: Vec<String> = log_files(tmp.path())
        .iter()
        .flat_map(|path| read_lines(path))
        .collect();
    assert_eq!(lines.len(), 550);

    for t in 0..5 {
        let prefix = format!("t{t} n");
        let sequence: Vec<usize> = lines
            .iter()
            .filter_map(|line| {
                let rest = &line[line.find(&prefix)? + prefix.len()..];
                rest.split(' ').next()?.parse().ok()
            })
            .collect();
        assert_eq!(sequence, (0..110).collect::<Vec<_>>(), "thread {t}");
    }
}

#[test]
fn shutdown_drains_queued_lines() {
    let tmp = TempDir::new().unwrap();
    let logger = async_logger(&tmp, 10_000, OverflowPolicy::WriteThrough);

    for n in 0..1000 {
        daylog::info!(logger, "queued {n}");
    }
    logger.shutdown();

    assert_eq!(total_lines(tmp.path()), 1000);
    let first = read_lines(&tmp.path().join("2024_05_01_async_write"));
    assert!(first[0].ends_with("queued 0"));
    assert!(first[499].ends_with("queued 499"));
}

#[test]
fn drop_drains_queued_lines() {
    let tmp = TempDir::new().unwrap();
    {
        let logger = async_logger(&tmp, 10_000, OverflowPolicy::WriteThrough);
        for n in 0..200 {
            logger.info(&format!("queued {n}"));
        }
    }
    assert_eq!(total_lines(tmp.path()), 200);
}

#[test]
fn fifo_order_without_overflow() {
    let tmp = TempDir::new().unwrap();
    let logger = async_logger(&tmp, 10_000, OverflowPolicy::WriteThrough);

    for n in 0..300 {
        logger.info(&format!("seq {n}"));
    }
    logger.shutdown();

    let lines = read_lines(&tmp.path().join("2024_05_01_async_write"));
    for (n, line) in lines.iter().enumerate() {
        assert!(line.ends_with(&format!("seq {n}")), "{line}");
    }
}

#[test]
fn shutdown_is_idempotent_and_later_lines_are_dropped() {
    let tmp = TempDir::new().unwrap();
    let logger = async_logger(&tmp, 8, OverflowPolicy::WriteThrough);

    logger.info("before");
    logger.shutdown();
    logger.shutdown();
    logger.info("after");
    assert!(logger.flush().is_ok());

    assert_eq!(total_lines(tmp.path()), 1);
    assert_eq!(logger.write_failures(), 0);
}

#[test]
fn concurrent_shutdown_with_inflight_producers() {
    let tmp = TempDir::new().unwrap();
    let logger = async_logger(&tmp, 16, OverflowPolicy::Block);

    let producer = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            for n in 0..500 {
                logger.info(&format!("racing {n}"));
            }
        })
    };
    thread::yield_now();
    logger.shutdown();
    producer.join().expect("producer panicked");

    // Records arriving after the close are dropped, never duplicated.
    assert!(total_lines(tmp.path()) <= 500);
    assert_eq!(logger.write_failures(), 0);
}
