//! Integration tests for `ringlink_queues::error`.
//!
//! These suites validate classification, display strings, logging payloads
//! and error composition so callers receive consistent failure semantics
//! from both queue kinds.

use std::time::Duration;

use ringlink_queues::collections::{ArrayQueue, DynamicArray, LinkedQueue, Queue};
use ringlink_queues::error::{
    ArrayError, CommonError, ErrorClassification, ErrorSeverity, QueueError, QueueResult,
};
use thiserror::Error;

/// Validates the classification matrix for every error variant.
///
/// Assertions:
/// - Confirms `err.is_retryable()` equals `retryable`.
/// - Confirms `err.severity()` equals `severity`.
/// - Confirms `err.is_critical()` equals `critical`.
#[test]
fn classification_matrix_matches_expected_contract() {
    let cases = vec![
        (QueueError::Overflow { capacity: 8 }, true, ErrorSeverity::Warning, false),
        (QueueError::Underflow, true, ErrorSeverity::Info, false),
        (
            QueueError::Storage(ArrayError::IndexOutOfRange { index: 3, len: 2 }),
            false,
            ErrorSeverity::Error,
            false,
        ),
        (QueueError::Common(CommonError::config("bad")), false, ErrorSeverity::Error, false),
        (
            QueueError::Common(CommonError::validation("capacity", "zero")),
            false,
            ErrorSeverity::Error,
            false,
        ),
        (
            QueueError::Common(CommonError::internal("broken ring")),
            false,
            ErrorSeverity::Critical,
            true,
        ),
    ];

    for (err, retryable, severity, critical) in cases {
        assert_eq!(err.is_retryable(), retryable, "{err}");
        assert_eq!(err.severity(), severity, "{err}");
        assert_eq!(err.is_critical(), critical, "{err}");
        assert_eq!(err.retry_after(), None::<Duration>, "{err}");
    }
}

/// Validates the display strings surfaced to callers.
#[test]
fn display_messages_name_the_condition() {
    assert_eq!(
        QueueError::Overflow { capacity: 3 }.to_string(),
        "Queue overflow: capacity of 3 elements reached"
    );
    assert_eq!(QueueError::Underflow.to_string(), "Queue underflow: no elements to remove or inspect");
    assert_eq!(
        ArrayError::IndexOutOfRange { index: 5, len: 2 }.to_string(),
        "Index 5 out of range for array of length 2"
    );
}

/// Validates that both queue kinds report boundary errors identically.
///
/// Assertions:
/// - Confirms `Underflow` from `dequeue` and `front` on empty queues.
/// - Confirms `Overflow` carries the bound for array and bounded linked
///   queues.
#[test]
fn both_queue_kinds_share_the_taxonomy() {
    fn boundaries<Q: Queue<u8>>(queue: &mut Q, bound: usize) {
        assert_eq!(queue.dequeue(), Err(QueueError::Underflow));
        assert_eq!(queue.front(), Err(QueueError::Underflow));
        for value in 0..bound {
            queue.enqueue(value as u8).unwrap();
        }
        assert_eq!(queue.enqueue(0), Err(QueueError::Overflow { capacity: bound }));
    }

    boundaries(&mut ArrayQueue::new(4), 4);
    boundaries(&mut LinkedQueue::bounded(0, 4), 4);
}

/// Validates `From<ArrayError>` composition into `QueueError`.
#[test]
fn storage_errors_compose_into_queue_errors() {
    fn read(array: &DynamicArray<u8>, index: usize) -> QueueResult<u8> {
        Ok(*array.get(index)?)
    }

    let array = DynamicArray::with_default(2, 9_u8);
    assert_eq!(read(&array, 1), Ok(9));
    assert_eq!(
        read(&array, 2),
        Err(QueueError::Storage(ArrayError::IndexOutOfRange { index: 2, len: 2 }))
    );
}

/// Validates structured logging fields for common errors.
#[test]
fn tracing_fields_include_type_and_field() {
    let err = CommonError::validation_with_value("max_len", "must be positive", "0");
    let fields = err.as_tracing_fields();
    assert!(fields.iter().any(|(key, value)| *key == "error_type" && value == "validation"));
    assert!(fields.iter().any(|(key, value)| *key == "field" && value == "max_len"));
}

/// Validates that a downstream error enum can wrap `QueueError` with
/// thiserror and keep its classification.
#[test]
fn downstream_errors_can_wrap_queue_errors() {
    #[derive(Debug, Error)]
    enum IngestError {
        #[error("buffer rejected item: {0}")]
        Buffer(#[from] QueueError),
    }

    fn push(queue: &mut ArrayQueue<u8>, value: u8) -> Result<(), IngestError> {
        queue.enqueue(value)?;
        Ok(())
    }

    let mut queue = ArrayQueue::new(1);
    push(&mut queue, 1).unwrap();
    let err = push(&mut queue, 2).unwrap_err();
    assert!(err.to_string().starts_with("buffer rejected item: Queue overflow"));

    let IngestError::Buffer(inner) = err;
    assert!(inner.is_retryable());
}
