//! Core error types for diagram generation
//!
//! This module defines the error types shared by providers, the graph engine
//! and the render service.

use thiserror::Error;

/// Core error types for diagram generation
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Parse error: {message} at line {line}, column {column}")]
    ParseError {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Provider error: {message}")]
    ProviderError { message: String },

    #[error("Service error: {message}")]
    ServiceError { message: String },

    #[error("Invariant violation: {message}")]
    InvariantViolation { message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create a new parse error
    pub fn parse_error(message: String, line: usize, column: usize) -> Self {
        Self::ParseError {
            message,
            line,
            column,
        }
    }

    /// Create a new provider error
    pub fn provider_error(message: String) -> Self {
        Self::ProviderError { message }
    }

    /// Create a new service error
    pub fn service_error(message: String) -> Self {
        Self::ServiceError { message }
    }

    /// Create a new invariant violation.
    ///
    /// These indicate a defect in the graph engine, never bad input.
    pub fn invariant_violation(message: String) -> Self {
        Self::InvariantViolation { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error() {
        let error = DiagramError::parse_error("unexpected '{'".to_string(), 3, 7);
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Parse error"));
        assert!(error_msg.contains("unexpected '{'"));
        assert!(error_msg.contains("line 3"));
        assert!(error_msg.contains("column 7"));
    }

    #[test]
    fn test_provider_error() {
        let error = DiagramError::provider_error("bad schema".to_string());
        assert_eq!(format!("{}", error), "Provider error: bad schema");
    }

    #[test]
    fn test_service_error() {
        let error = DiagramError::service_error("no image path".to_string());
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Service error"));
        assert!(error_msg.contains("no image path"));
    }

    #[test]
    fn test_invariant_violation() {
        let error = DiagramError::invariant_violation("pair mismatch".to_string());
        assert!(format!("{}", error).contains("Invariant violation"));
    }

    #[test]
    fn test_io_error_conversion() {
        use std::io;
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let error: DiagramError = io_err.into();
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("IO error"));
        assert!(error_msg.contains("read-only"));
    }
}
