//! The injectable platform collaborator
//!
//! Everything this layer does goes through [`MediaPlatform`], so the
//! permission, enumeration, and acquisition logic is testable against fakes
//! without real capture hardware present.

use async_trait::async_trait;

use crate::analyzer::{AnalyserConfig, FrequencyAnalyser};
use crate::error::MediaError;
use crate::permissions::{PermissionKind, PermissionState};
use crate::stream::{CaptureStream, StreamConstraints};

/// Raw device entry as reported by the platform, before filtering
///
/// The kind is passed through as-is and may name kinds this layer does not
/// recognize; the label may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDeviceInfo {
    /// Opaque device identifier
    pub device_id: String,
    /// Human-readable label, possibly withheld
    pub label: String,
    /// Platform-reported kind string
    pub kind: String,
}

/// Host platform media-capture interface
///
/// Backends implement this over the real capture subsystem (a desktop audio
/// and camera stack, a browser's media devices, an in-memory fake in tests).
#[async_trait]
pub trait MediaPlatform: Send + Sync {
    /// Whether the platform exposes a device subsystem and a stream-request
    /// function at all.
    ///
    /// Pure and side-effect free; absence of support is `false`, never an
    /// error.
    fn is_capture_supported(&self) -> bool;

    /// Whether the platform offers a permission query facility
    fn supports_permission_query(&self) -> bool;

    /// Query the platform-reported permission state for `kind`.
    ///
    /// Only called when [`supports_permission_query`] is `true`.
    ///
    /// [`supports_permission_query`]: MediaPlatform::supports_permission_query
    async fn query_permission(&self, kind: PermissionKind) -> Result<PermissionState, MediaError>;

    /// Enumerate all devices the platform reports, unfiltered
    async fn enumerate_devices(&self) -> Result<Vec<PlatformDeviceInfo>, MediaError>;

    /// Request a capture stream satisfying `constraints`.
    ///
    /// Failures carry the platform's reason and are not translated by the
    /// calling layer.
    async fn request_stream(
        &self,
        constraints: &StreamConstraints,
    ) -> Result<CaptureStream, MediaError>;

    /// Wire a frequency analyser onto the stream's audio.
    ///
    /// Behavior on a stream without audio tracks is platform-defined;
    /// callers check [`CaptureStream::has_audio`] first.
    fn create_analyser(
        &self,
        stream: &CaptureStream,
        config: &AnalyserConfig,
    ) -> Result<Box<dyn FrequencyAnalyser>, MediaError>;
}
