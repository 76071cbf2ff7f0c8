//! Integration tests for `ringlink_queues::config`.
//!
//! Environment-variable tests touch process-global state, so they run
//! inside a single test function.

use ringlink_queues::collections::{ArrayQueue, LinkedQueue};
use ringlink_queues::config::{QueueConfig, ENV_CAPACITY, ENV_MAX_LEN, ENV_POOL_PREALLOCATE};
use ringlink_queues::{CommonError, QueueError};

/// Validates `ArrayQueue::from_config` behavior for a TOML-sourced config.
///
/// Assertions:
/// - Confirms the queue capacity equals the configured capacity.
/// - Confirms the queue overflows at that capacity.
#[test]
fn array_queue_from_toml_config() -> anyhow::Result<()> {
    let config = QueueConfig::from_toml_str("capacity = 2")?;
    let mut queue = ArrayQueue::from_config(&config)?;
    assert_eq!(queue.capacity(), 2);

    queue.enqueue(1)?;
    queue.enqueue(2)?;
    assert_eq!(queue.enqueue(3), Err(QueueError::Overflow { capacity: 2 }));
    Ok(())
}

/// Validates `LinkedQueue::from_config` behavior for the bounded and
/// preallocated scenario.
///
/// Assertions:
/// - Confirms `capacity` becomes the slack hint.
/// - Confirms `max_len` bounds the queue.
#[test]
fn linked_queue_from_builder_config() -> anyhow::Result<()> {
    let config = QueueConfig::builder().capacity(3).max_len(4).pool_preallocate(2).build()?;
    let mut queue: LinkedQueue<u64> = LinkedQueue::from_config(&config)?;
    assert_eq!(queue.slack(), 3);
    assert_eq!(queue.max_len(), Some(4));

    for value in 0..4 {
        queue.enqueue(value)?;
    }
    assert!(queue.is_full());
    assert!(queue.enqueue(4).unwrap_err().is_overflow());
    Ok(())
}

/// Validates that invalid configs are refused by both constructors.
#[test]
fn invalid_config_is_rejected() {
    let zero = QueueConfig { capacity: 0, ..QueueConfig::default() };
    let array = ArrayQueue::<u8>::from_config(&zero);
    assert!(matches!(array, Err(QueueError::Common(CommonError::Validation { .. }))));

    let zero_max = QueueConfig { max_len: Some(0), ..QueueConfig::default() };
    let linked = LinkedQueue::<u8>::from_config(&zero_max);
    assert!(matches!(linked, Err(QueueError::Common(CommonError::Validation { .. }))));
}

/// Validates `QueueConfig::from_env` for the unset, valid and malformed
/// scenarios.
///
/// Assertions:
/// - Confirms unset variables fall back to defaults.
/// - Confirms set variables are parsed.
/// - Confirms a malformed value yields `CommonError::Config` naming the
///   variable.
#[test]
fn environment_loading() {
    std::env::remove_var(ENV_CAPACITY);
    std::env::remove_var(ENV_MAX_LEN);
    std::env::remove_var(ENV_POOL_PREALLOCATE);
    assert_eq!(QueueConfig::from_env().ok(), Some(QueueConfig::default()));

    std::env::set_var(ENV_CAPACITY, "12");
    std::env::set_var(ENV_MAX_LEN, " 30 ");
    std::env::set_var(ENV_POOL_PREALLOCATE, "4");
    let loaded = QueueConfig::from_env();
    assert_eq!(
        loaded.ok(),
        Some(QueueConfig { capacity: 12, max_len: Some(30), pool_preallocate: 4 })
    );

    std::env::set_var(ENV_CAPACITY, "lots");
    match QueueConfig::from_env() {
        Err(CommonError::Config { field, .. }) => {
            assert_eq!(field.as_deref(), Some(ENV_CAPACITY));
        }
        other => panic!("expected config error, got {other:?}"),
    }

    std::env::remove_var(ENV_CAPACITY);
    std::env::remove_var(ENV_MAX_LEN);
    std::env::remove_var(ENV_POOL_PREALLOCATE);
}

/// Validates serde round trip through JSON, the other format the
/// workspace reads.
#[test]
fn config_serializes_to_json() -> anyhow::Result<()> {
    let config = QueueConfig::builder().capacity(8).build()?;
    let json = serde_json::to_string(&config)?;
    assert!(json.contains("\"capacity\":8"));
    let parsed: QueueConfig = serde_json::from_str(&json)?;
    assert_eq!(parsed, config);
    Ok(())
}

/// Validates that a rejected config emits a debug event carrying the
/// structured error fields.
///
/// Assertions:
/// - Confirms the event message is written.
/// - Confirms the rejected field name appears in the event fields.
#[cfg(feature = "observability")]
#[test]
fn rejected_config_is_logged_with_error_fields() {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::util::SubscriberInitExt;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let capture = Capture::default();
    let writer = capture.clone();
    let _guard = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish()
        .set_default();

    let config = QueueConfig { max_len: Some(0), ..QueueConfig::default() };
    assert!(config.validate().is_err());

    let output = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("queue config rejected"), "{output}");
    assert!(output.contains("max_len"), "{output}");
}
