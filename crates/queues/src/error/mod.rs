//! Error types and classification for the queue crate
//!
//! Every fallible operation in this crate returns one of the enums defined
//! here. The layout mirrors the queue family itself:
//!
//! 1. **`QueueError`**: the domain taxonomy surfaced by both queue variants.
//!    `Overflow` is raised only by `enqueue`, `Underflow` only by `dequeue`
//!    and `front`. Failures from collaborators compose into it through
//!    `#[from]` variants.
//!
//! 2. **`ArrayError`**: faults that belong to the capacity-bound storage
//!    (`DynamicArray`) rather than to the queues built on top of it.
//!
//! 3. **`CommonError`**: non-domain failures (configuration, validation,
//!    serialization, broken internal invariants).
//!
//! ## ErrorClassification Trait
//!
//! All error types implement [`ErrorClassification`] so that callers can
//! decide between backing off and giving up without matching on variants:
//!
//! | Error | Retryable | Severity |
//! |-------|-----------|----------|
//! | `QueueError::Overflow` | yes (space appears after a dequeue) | Warning |
//! | `QueueError::Underflow` | yes (items appear after an enqueue) | Info |
//! | `ArrayError::IndexOutOfRange` | no | Error |
//! | `CommonError::Internal` | no | Critical |
//!
//! ## Examples
//!
//! ```rust
//! use ringlink_queues::collections::ArrayQueue;
//! use ringlink_queues::error::{ErrorClassification, QueueError};
//!
//! let mut queue = ArrayQueue::new(1);
//! queue.enqueue('a').unwrap();
//!
//! let err = queue.enqueue('b').unwrap_err();
//! assert_eq!(err, QueueError::Overflow { capacity: 1 });
//! assert!(err.is_retryable());
//! ```

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Standard result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

/// Standard result type using CommonError
pub type CommonResult<T> = Result<T, CommonError>;

/// Queue operation errors
///
/// Both queue variants report precondition violations through this enum.
/// A failed call never leaves the queue partially updated: state is either
/// read or fully updated before the error is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// `enqueue` was called on a queue holding `capacity` elements.
    #[error("Queue overflow: capacity of {capacity} elements reached")]
    Overflow {
        /// The bound that was hit.
        capacity: usize,
    },

    /// `dequeue` or `front` was called on an empty queue.
    #[error("Queue underflow: no elements to remove or inspect")]
    Underflow,

    /// The backing storage rejected an access.
    #[error(transparent)]
    Storage(#[from] ArrayError),

    /// Non-domain failure (configuration, validation, internal).
    #[error(transparent)]
    Common(#[from] CommonError),
}

impl QueueError {
    /// Returns `true` for [`QueueError::Overflow`].
    #[must_use]
    pub const fn is_overflow(&self) -> bool {
        matches!(self, Self::Overflow { .. })
    }

    /// Returns `true` for [`QueueError::Underflow`].
    #[must_use]
    pub const fn is_underflow(&self) -> bool {
        matches!(self, Self::Underflow)
    }
}

/// Capacity-bound storage errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArrayError {
    /// `index` is not below the current length.
    #[error("Index {index} out of range for array of length {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Length at the time of the access.
        len: usize,
    },
}

/// Common error variants that appear across modules
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommonError {
    /// Configuration-related errors
    Config { message: String, field: Option<String> },

    /// Serialization or deserialization errors
    Serialization { message: String, format: Option<String> },

    /// Validation errors
    Validation { field: String, message: String, value: Option<String> },

    /// Internal errors that shouldn't normally occur
    Internal { message: String, context: Option<String> },
}

impl fmt::Display for CommonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { message, field } => {
                if let Some(field) = field {
                    write!(f, "Configuration error in field '{}': {}", field, message)
                } else {
                    write!(f, "Configuration error: {}", message)
                }
            }
            Self::Serialization { message, format } => {
                if let Some(format) = format {
                    write!(f, "Serialization error ({}): {}", format, message)
                } else {
                    write!(f, "Serialization error: {}", message)
                }
            }
            Self::Validation { field, message, value } => {
                if let Some(value) = value {
                    write!(
                        f,
                        "Validation error for field '{}' (value: '{}'): {}",
                        field, value, message
                    )
                } else {
                    write!(f, "Validation error for field '{}': {}", field, message)
                }
            }
            Self::Internal { message, context } => {
                if let Some(ctx) = context {
                    write!(f, "Internal error in '{}': {}", ctx, message)
                } else {
                    write!(f, "Internal error: {}", message)
                }
            }
        }
    }
}

impl std::error::Error for CommonError {}

impl ErrorClassification for CommonError {
    fn is_retryable(&self) -> bool {
        false
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Config { .. } | Self::Serialization { .. } | Self::Validation { .. } => {
                ErrorSeverity::Error
            }
            Self::Internal { .. } => ErrorSeverity::Critical,
        }
    }

    fn is_critical(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }

    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

impl CommonError {
    /// Create a simple configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into(), field: None }
    }

    /// Create a configuration error for a specific field
    pub fn config_field<S: Into<String>, F: Into<String>>(field: F, message: S) -> Self {
        Self::Config { message: message.into(), field: Some(field.into()) }
    }

    /// Create a serialization error with format information
    pub fn serialization_format<S: Into<String>, F: Into<String>>(format: F, message: S) -> Self {
        Self::Serialization { message: message.into(), format: Some(format.into()) }
    }

    /// Create a validation error
    pub fn validation<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::Validation { field: field.into(), message: message.into(), value: None }
    }

    /// Create a validation error with the invalid value
    pub fn validation_with_value<F: Into<String>, M: Into<String>, V: Into<String>>(
        field: F,
        message: M,
        value: V,
    ) -> Self {
        Self::Validation { field: field.into(), message: message.into(), value: Some(value.into()) }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal { message: message.into(), context: None }
    }

    /// Create an internal error with context
    pub fn internal_with_context<S: Into<String>, C: Into<String>>(message: S, context: C) -> Self {
        Self::Internal { message: message.into(), context: Some(context.into()) }
    }

    /// Convert error to structured logging fields
    ///
    /// Returns key-value pairs suitable for structured logging.
    ///
    /// ```rust,ignore
    /// let err = CommonError::config_field("capacity", "must be positive");
    /// let fields = err.as_tracing_fields();
    /// tracing::error!(error_type = %fields[0].1, "Queue construction failed");
    /// ```
    pub fn as_tracing_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("error_type", self.error_type_name().to_string())];

        match self {
            Self::Config { message, field } => {
                fields.push(("message", message.clone()));
                if let Some(field) = field {
                    fields.push(("field", field.clone()));
                }
            }
            Self::Serialization { message, format } => {
                fields.push(("message", message.clone()));
                if let Some(format) = format {
                    fields.push(("format", format.clone()));
                }
            }
            Self::Validation { field, message, value } => {
                fields.push(("field", field.clone()));
                fields.push(("message", message.clone()));
                if let Some(value) = value {
                    fields.push(("value", value.clone()));
                }
            }
            Self::Internal { message, context } => {
                fields.push(("message", message.clone()));
                if let Some(ctx) = context {
                    fields.push(("context", ctx.clone()));
                }
            }
        }

        fields
    }

    /// Get the error type name for categorization
    fn error_type_name(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::Serialization { .. } => "serialization",
            Self::Validation { .. } => "validation",
            Self::Internal { .. } => "internal",
        }
    }
}

/// Error classification trait for consistent error handling
///
/// Lets callers decide whether to back off and retry (for example, wait for
/// a consumer to drain an overflowing queue) or to treat the failure as
/// fatal.
pub trait ErrorClassification {
    /// Check if this error is retryable
    ///
    /// Retryable errors describe a transient queue state that another
    /// operation can change: a full queue after a dequeue, an empty queue
    /// after an enqueue.
    fn is_retryable(&self) -> bool;

    /// Get the error severity level
    fn severity(&self) -> ErrorSeverity;

    /// Check if this is a critical error requiring immediate attention
    ///
    /// Critical errors indicate a broken internal invariant.
    fn is_critical(&self) -> bool;

    /// Get the suggested retry delay if applicable
    fn retry_after(&self) -> Option<Duration>;
}

/// Error severity levels for monitoring and alerting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational, typically for debugging
    Info,
    /// Warning, should be monitored but not critical
    Warning,
    /// Error, requires attention and action
    Error,
    /// Critical, immediate action required
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(feature = "foundation")]
impl From<serde_json::Error> for CommonError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization_format("JSON", err.to_string())
    }
}

#[cfg(feature = "foundation")]
impl From<toml::de::Error> for CommonError {
    fn from(err: toml::de::Error) -> Self {
        Self::serialization_format("TOML", err.to_string())
    }
}

#[cfg(feature = "foundation")]
impl From<toml::ser::Error> for CommonError {
    fn from(err: toml::ser::Error) -> Self {
        Self::serialization_format("TOML", err.to_string())
    }
}

/// Macro to implement ErrorClassification by delegating to CommonError
///
/// Module-specific errors that embed `CommonError` list only their own
/// variants; the embedded variant delegates automatically.
///
/// ```rust,ignore
/// impl_error_classification!(QueueError, Common,
///     Self::Underflow => {
///         retryable: true,
///         severity: ErrorSeverity::Info,
///         critical: false,
///     }
/// );
/// ```
#[macro_export]
macro_rules! impl_error_classification {
    (
        $error_type:ty,
        $common_variant:ident
        $(,
            $variant:pat => {
                retryable: $retryable:expr,
                severity: $severity:expr,
                critical: $critical:expr
                $(, retry_after: $retry_after:expr)?
                $(,)?
            }
        )*
        $(,)?
    ) => {
        impl $crate::error::ErrorClassification for $error_type {
            fn is_retryable(&self) -> bool {
                match self {
                    Self::$common_variant(e) => e.is_retryable(),
                    $(
                        $variant => $retryable,
                    )*
                }
            }

            fn severity(&self) -> $crate::error::ErrorSeverity {
                match self {
                    Self::$common_variant(e) => e.severity(),
                    $(
                        $variant => $severity,
                    )*
                }
            }

            fn is_critical(&self) -> bool {
                match self {
                    Self::$common_variant(e) => e.is_critical(),
                    $(
                        $variant => $critical,
                    )*
                }
            }

            fn retry_after(&self) -> Option<std::time::Duration> {
                match self {
                    Self::$common_variant(e) => e.retry_after(),
                    $(
                        $(
                            $variant => $retry_after,
                        )?
                    )*
                    #[allow(unreachable_patterns)]
                    _ => None,
                }
            }
        }
    };
}

impl_error_classification!(QueueError, Common,
    Self::Overflow { .. } => {
        retryable: true,  // Space appears after a dequeue
        severity: ErrorSeverity::Warning,
        critical: false,
    },
    Self::Underflow => {
        retryable: true,
        severity: ErrorSeverity::Info,
        critical: false,
    },
    Self::Storage(e) => {
        retryable: e.is_retryable(),
        severity: e.severity(),
        critical: e.is_critical(),
        retry_after: e.retry_after(),
    }
);

impl ErrorClassification for ArrayError {
    fn is_retryable(&self) -> bool {
        false
    }

    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }

    fn is_critical(&self) -> bool {
        false
    }

    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for error handling functionality
    //!
    //! Tests cover variants, display formatting, severity levels,
    //! retryability, and conversions.

    use super::*;

    /// Validates `QueueError::Overflow` behavior for the overflow display
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms `err.to_string()` mentions the capacity.
    /// - Ensures `err.is_overflow()` evaluates to true.
    /// - Confirms `err.severity()` equals `ErrorSeverity::Warning`.
    #[test]
    fn test_overflow_display_and_classification() {
        let err = QueueError::Overflow { capacity: 3 };
        assert_eq!(err.to_string(), "Queue overflow: capacity of 3 elements reached");
        assert!(err.is_overflow());
        assert!(!err.is_underflow());
        assert!(err.is_retryable());
        assert!(!err.is_critical());
        assert_eq!(err.severity(), ErrorSeverity::Warning);
        assert_eq!(err.retry_after(), None);
    }

    /// Validates `QueueError::Underflow` behavior for the underflow
    /// classification scenario.
    ///
    /// Assertions:
    /// - Ensures `err.is_underflow()` evaluates to true.
    /// - Confirms `err.severity()` equals `ErrorSeverity::Info`.
    #[test]
    fn test_underflow_classification() {
        let err = QueueError::Underflow;
        assert!(err.is_underflow());
        assert!(err.is_retryable());
        assert_eq!(err.severity(), ErrorSeverity::Info);
    }

    /// Validates `ArrayError` conversion into `QueueError`.
    ///
    /// Assertions:
    /// - Confirms the storage error is wrapped transparently.
    /// - Ensures the wrapped error is not retryable.
    #[test]
    fn test_storage_error_is_transparent() {
        let err: QueueError = ArrayError::IndexOutOfRange { index: 4, len: 2 }.into();
        assert_eq!(err.to_string(), "Index 4 out of range for array of length 2");
        assert!(!err.is_retryable());
        assert_eq!(err.severity(), ErrorSeverity::Error);
    }

    /// Validates `CommonError::internal` delegation through `QueueError`.
    ///
    /// Assertions:
    /// - Ensures `err.is_critical()` evaluates to true.
    /// - Confirms `err.severity()` equals `ErrorSeverity::Critical`.
    #[test]
    fn test_common_internal_is_critical() {
        let err: QueueError = CommonError::internal_with_context("ring broken", "dequeue").into();
        assert!(err.is_critical());
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.to_string(), "Internal error in 'dequeue': ring broken");
    }

    /// Validates `CommonError::config_field` display formatting.
    #[test]
    fn test_config_field_display() {
        let err = CommonError::config_field("capacity", "must be positive");
        assert_eq!(err.to_string(), "Configuration error in field 'capacity': must be positive");
        assert!(!err.is_retryable());
    }

    /// Validates `CommonError::as_tracing_fields` for the validation
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms the first field is the error type name.
    /// - Confirms the value field is present when supplied.
    #[test]
    fn test_tracing_fields() {
        let err = CommonError::validation_with_value("max_len", "must be non-zero", "0");
        let fields = err.as_tracing_fields();
        assert_eq!(fields[0], ("error_type", "validation".to_string()));
        assert!(fields.contains(&("field", "max_len".to_string())));
        assert!(fields.contains(&("value", "0".to_string())));
    }

    /// Validates `ErrorSeverity` ordering and display.
    #[test]
    fn test_severity_ordering() {
        assert!(ErrorSeverity::Info < ErrorSeverity::Warning);
        assert!(ErrorSeverity::Warning < ErrorSeverity::Error);
        assert!(ErrorSeverity::Error < ErrorSeverity::Critical);
        assert_eq!(ErrorSeverity::Critical.to_string(), "CRITICAL");
    }
}
