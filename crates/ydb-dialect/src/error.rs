//! Error types for ydb-dialect

use crate::session::DriverError;
use crate::types::TypeKind;
use std::panic::Location;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for ydb-dialect operations
pub type YdbResult<T> = Result<T, YdbError>;

/// Error types for dialect operations
#[derive(Debug, Error)]
pub enum YdbError {
    /// The driver did not report ready within the startup budget
    #[error("Driver has not become ready in {}ms!", .0.as_millis())]
    DriverNotReady(Duration),

    /// A driver accessor was used before `init()` (or after `destroy()`)
    #[error("Driver is not initialized: call init() first")]
    NotInitialized,

    /// A parameter value whose shape has no wire mapping
    #[error("Unsupported parameter type: {0}")]
    UnsupportedParameter(String),

    /// A composite type kind that cannot be declared
    #[error("{0} type not supported")]
    UnsupportedType(TypeKind),

    /// A parameter without a usable type (void/null)
    #[error("Type is empty")]
    EmptyType,

    /// Session or transport failure reported by the driver
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    /// Streaming execution was requested
    #[error("streaming not supported by the YDB dialect")]
    StreamingNotSupported,

    /// An operation this dialect does not provide
    #[error("{0} not implemented")]
    NotImplemented(&'static str),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A failure raised while running a query, tagged with the caller's location
    #[error("{operation} failed at {location}: {source}")]
    Execute {
        operation: &'static str,
        location: &'static Location<'static>,
        #[source]
        source: Box<YdbError>,
    },
}

impl YdbError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an unsupported parameter error naming the offending shape
    pub fn unsupported_parameter(shape: impl Into<String>) -> Self {
        Self::UnsupportedParameter(shape.into())
    }

    /// Wrap this error with the operation and call site that triggered it.
    ///
    /// Errors that already carry a location are returned unchanged, so a
    /// failure is wrapped at most once.
    pub fn at(self, operation: &'static str, location: &'static Location<'static>) -> Self {
        match self {
            err @ Self::Execute { .. } => err,
            err => Self::Execute {
                operation,
                location,
                source: Box::new(err),
            },
        }
    }

    /// The underlying failure, with any call-site wrapper removed.
    pub fn root(&self) -> &YdbError {
        match self {
            Self::Execute { source, .. } => source.root(),
            err => err,
        }
    }

    /// The call site recorded when the error was wrapped, if any.
    pub fn location(&self) -> Option<&'static Location<'static>> {
        match self {
            Self::Execute { location, .. } => Some(*location),
            _ => None,
        }
    }

    /// Whether the underlying failure is transient and may succeed on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self.root(), Self::Driver(err) if err.is_retryable())
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), Self::NotFound(_))
    }

    /// Check if the driver failed to become ready
    pub fn is_not_ready(&self) -> bool {
        matches!(self.root(), Self::DriverNotReady(_))
    }

    /// Check if this error comes from the type mapper
    pub fn is_type_error(&self) -> bool {
        matches!(
            self.root(),
            Self::UnsupportedParameter(_) | Self::UnsupportedType(_) | Self::EmptyType
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::DriverErrorKind;

    #[test]
    fn not_ready_message_names_the_budget() {
        let err = YdbError::DriverNotReady(Duration::from_secs(5));
        assert_eq!(err.to_string(), "Driver has not become ready in 5000ms!");
        assert!(err.is_not_ready());
    }

    #[test]
    fn unsupported_type_names_the_kind() {
        let err = YdbError::UnsupportedType(TypeKind::List);
        assert_eq!(err.to_string(), "list type not supported");
        assert!(err.is_type_error());
    }

    #[test]
    fn at_wraps_once_and_keeps_root() {
        let here = Location::caller();
        let err = YdbError::validation("bad").at("execute_query", here);
        let again = err.at("fetch_all", Location::caller());

        assert_eq!(again.location(), Some(here));
        assert!(matches!(again.root(), YdbError::Validation(_)));
        assert!(again.to_string().starts_with("execute_query failed at "));
    }

    #[test]
    fn retryable_follows_driver_kind() {
        let transient: YdbError = DriverError::new(DriverErrorKind::Unavailable, "node down").into();
        let fatal: YdbError = DriverError::new(DriverErrorKind::BadRequest, "syntax").into();

        assert!(transient.is_retryable());
        assert!(!fatal.is_retryable());
        assert!(
            transient
                .at("execute_query", Location::caller())
                .is_retryable()
        );
    }
}
