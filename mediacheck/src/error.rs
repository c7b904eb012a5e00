//! Media session error types and handling
//!
//! This module defines the error type shared by the capture utilities and the
//! platform backends, keeping platform reason codes intact as they propagate.

use thiserror::Error;

/// Main error type for media session operations
#[derive(Error, Debug)]
pub enum MediaError {
    /// Feature not available on this platform
    #[error("Not supported: {reason}")]
    Unsupported {
        /// What the platform is missing
        reason: String,
    },

    /// Permission to capture was denied
    #[error("Permission denied: {operation}")]
    PermissionDenied {
        /// Operation that was denied
        operation: String,
    },

    /// Permission query exists but failed for this capability
    #[error("Permission query failed: {reason}")]
    PermissionQueryFailed {
        /// Failure reason
        reason: String,
    },

    /// Device enumeration failed
    #[error("Device enumeration failed: {reason}")]
    EnumerationFailed {
        /// Failure reason
        reason: String,
    },

    /// Device not found error
    #[error("Device not found: {device_id}")]
    DeviceNotFound {
        /// Device identifier
        device_id: String,
    },

    /// Device is already in use
    #[error("Device is busy: {device}")]
    DeviceBusy {
        /// Device name that is busy
        device: String,
    },

    /// No device satisfies the requested constraints
    #[error("Constraints cannot be satisfied: {constraint}")]
    Overconstrained {
        /// Constraint that could not be met
        constraint: String,
    },

    /// Capture stream error
    #[error("Stream error: {reason}")]
    StreamError {
        /// Reason for the stream error
        reason: String,
    },

    /// Hardware error
    #[error("Hardware error: {reason}")]
    HardwareError {
        /// Reason for the hardware error
        reason: String,
    },

    /// Invalid configuration provided
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Error message
        message: String,
    },

    /// Platform supplies no frequency analyser
    #[error("Audio analyser unavailable: {reason}")]
    AnalyserUnavailable {
        /// Why no analyser can be constructed
        reason: String,
    },
}

/// Result type alias for media session operations
pub type MediaResult<T> = Result<T, MediaError>;

impl MediaError {
    /// Get error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            MediaError::Unsupported { .. } => ErrorCategory::Platform,
            MediaError::PermissionDenied { .. } => ErrorCategory::Permission,
            MediaError::PermissionQueryFailed { .. } => ErrorCategory::Permission,
            MediaError::EnumerationFailed { .. } => ErrorCategory::Device,
            MediaError::DeviceNotFound { .. } => ErrorCategory::Device,
            MediaError::DeviceBusy { .. } => ErrorCategory::Device,
            MediaError::Overconstrained { .. } => ErrorCategory::Configuration,
            MediaError::StreamError { .. } => ErrorCategory::Stream,
            MediaError::HardwareError { .. } => ErrorCategory::Device,
            MediaError::InvalidConfiguration { .. } => ErrorCategory::Configuration,
            MediaError::AnalyserUnavailable { .. } => ErrorCategory::Platform,
        }
    }
}

/// Error categories for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Platform compatibility errors
    Platform,
    /// Permission and consent errors
    Permission,
    /// Device and hardware errors
    Device,
    /// Configuration and constraint errors
    Configuration,
    /// Capture stream errors
    Stream,
}
