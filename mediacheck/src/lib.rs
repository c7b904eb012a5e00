//! # Mediacheck
//!
//! Device, permission, and level-meter utilities for media capture
//! sessions. This crate holds the platform-independent layer: capability
//! and permission checks, device enumeration with stable fallback labels,
//! stream acquisition and teardown, audio level measurement over a
//! platform frequency analyser, and video settings reads.
//!
//! All platform access goes through the injectable [`MediaPlatform`]
//! collaborator; `mediacheck-host` implements it over the native desktop
//! capture stack.

#![warn(clippy::all)]

pub mod analyzer;
pub mod check;
pub mod devices;
pub mod error;
pub mod permissions;
pub mod platform;
pub mod session;
pub mod stream;
pub mod video;

// Re-export main types
pub use analyzer::{
    audio_level, read_audio_level, AnalyserConfig, AudioAnalysis, AudioAnalyzer,
    FrequencyAnalyser,
};
pub use check::{CheckResult, CheckStatus};
pub use devices::{enumerate_devices, MediaDeviceInfo, MediaDeviceKind};
pub use error::{ErrorCategory, MediaError, MediaResult};
pub use permissions::{check_permission, PermissionKind, PermissionState};
pub use platform::{MediaPlatform, PlatformDeviceInfo};
pub use session::MediaSession;
pub use stream::{
    request_stream, stop_stream, CaptureStream, MediaTrack, StreamConstraints, TrackConstraints,
    TrackKind, TrackRequest, TrackSettings,
};
pub use video::{video_analysis, video_settings, VideoAnalysis, VideoSettings};
