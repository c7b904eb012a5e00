//! Tests for the native desktop backend
//!
//! Capture hardware is not available in test environments, so these verify
//! the backend's structure and its no-hardware behavior: permission
//! posture, analyser unavailability, and request validation.

use mediacheck::*;
use mediacheck_host::HostPlatform;

#[tokio::test]
async fn test_platform_construction() {
    let platform = HostPlatform::new();
    let _ = platform.is_capture_supported();

    let platform = HostPlatform::default();
    let _ = platform.is_capture_supported();
}

#[tokio::test]
async fn test_permission_reports_unsupported_without_device_access() {
    let session = MediaSession::new(HostPlatform::new());

    assert_eq!(
        session.check_permission(PermissionKind::Microphone).await,
        PermissionState::Unsupported
    );
    assert_eq!(
        session.check_permission(PermissionKind::Camera).await,
        PermissionState::Unsupported
    );
}

#[tokio::test]
async fn test_direct_permission_query_is_unsupported() {
    let platform = HostPlatform::new();
    let result = platform.query_permission(PermissionKind::Microphone).await;
    assert!(matches!(result, Err(MediaError::Unsupported { .. })));
}

#[tokio::test]
async fn test_analyser_is_unavailable() {
    let platform = HostPlatform::new();
    let stream = CaptureStream::new(Vec::new());

    let result = platform.create_analyser(&stream, &AnalyserConfig::default());
    assert!(matches!(result, Err(MediaError::AnalyserUnavailable { .. })));
}

#[tokio::test]
async fn test_empty_request_is_rejected() {
    let session = MediaSession::new(HostPlatform::new());

    let result = session.request_stream(&StreamConstraints::default()).await;
    assert!(matches!(result, Err(MediaError::InvalidConfiguration { .. })));
}
