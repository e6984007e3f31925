//! Error types returned by the queues.

use core::fmt;

/// Errors raised by queue construction and by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// The requested capacity cannot hold a single element.
    InvalidCapacity(usize),

    /// The queue was closed and holds no more elements.
    Closed,
}

impl QueueError {
    /// Returns `true` for [`QueueError::Closed`].
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self, QueueError::Closed)
    }
}

impl core::error::Error for QueueError {}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::InvalidCapacity(capacity) => {
                write!(f, "QueueError::InvalidCapacity({capacity}): capacity must be at least 1")
            }
            QueueError::Closed => write!(f, "QueueError::Closed"),
        }
    }
}

/// Result of a consuming or constructing queue operation.
pub type QueueResult<T> = Result<T, QueueError>;

/// Errors raised by producers.
///
/// Every variant hands the rejected item back, so a failed `produce` never
/// drops data.
#[derive(Clone, PartialEq, Eq)]
pub enum ProduceError<T> {
    /// The queue was closed before space became available.
    Closed(T),

    /// No space became available before the timeout elapsed.
    Timeout(T),
}

impl<T> ProduceError<T> {
    /// Returns the item that could not be enqueued.
    pub fn into_inner(self) -> T {
        match self {
            ProduceError::Closed(item) | ProduceError::Timeout(item) => item,
        }
    }

    /// Returns `true` when the queue was closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self, ProduceError::Closed(_))
    }

    /// Returns `true` when the bounded wait elapsed.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProduceError::Timeout(_))
    }
}

// Written by hand so `T` does not need to be `Debug` or `Display`.
impl<T> fmt::Debug for ProduceError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProduceError::Closed(_) => f.write_str("Closed(..)"),
            ProduceError::Timeout(_) => f.write_str("Timeout(..)"),
        }
    }
}

impl<T> fmt::Display for ProduceError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProduceError::Closed(_) => write!(f, "ProduceError::Closed"),
            ProduceError::Timeout(_) => write!(f, "ProduceError::Timeout"),
        }
    }
}

impl<T> core::error::Error for ProduceError<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_produce_error_returns_item() {
        let err = ProduceError::Closed(String::from("message"));
        assert!(err.is_closed());
        assert!(!err.is_timeout());
        assert_eq!(err.into_inner(), "message");

        let err = ProduceError::Timeout(3);
        assert!(err.is_timeout());
        assert_eq!(err.into_inner(), 3);
    }

    #[test]
    fn test_error_display() {
        let msg = format!("{}", QueueError::InvalidCapacity(0));
        assert!(msg.contains("InvalidCapacity(0)"));

        let msg = format!("{}", ProduceError::Closed(1));
        assert_eq!(msg, "ProduceError::Closed");

        let msg = format!("{:?}", ProduceError::Timeout(vec![1, 2]));
        assert_eq!(msg, "Timeout(..)");
    }
}
