//! Session-level entry point over a platform collaborator

use crate::analyzer::{AnalyserConfig, AudioAnalyzer};
use crate::devices::{self, MediaDeviceInfo};
use crate::error::MediaError;
use crate::permissions::{self, PermissionKind, PermissionState};
use crate::platform::MediaPlatform;
use crate::stream::{self, CaptureStream, StreamConstraints};
use crate::video::{self, VideoAnalysis, VideoSettings};

/// Media session utilities bound to a platform collaborator
///
/// A thin, stateless wrapper; every operation is also available as a free
/// function in its module.
#[derive(Debug, Clone)]
pub struct MediaSession<P> {
    platform: P,
}

impl<P: MediaPlatform> MediaSession<P> {
    /// Bind the utilities to `platform`
    pub fn new(platform: P) -> Self {
        Self { platform }
    }

    /// The underlying platform collaborator
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Whether media capture is available at all
    pub fn is_capture_supported(&self) -> bool {
        self.platform.is_capture_supported()
    }

    /// Query the permission state for `kind`; never fails
    pub async fn check_permission(&self, kind: PermissionKind) -> PermissionState {
        permissions::check_permission(&self.platform, kind).await
    }

    /// List available devices with never-empty labels
    pub async fn enumerate_devices(&self) -> Result<Vec<MediaDeviceInfo>, MediaError> {
        devices::enumerate_devices(&self.platform).await
    }

    /// Acquire a capture stream; platform failures propagate unmodified
    pub async fn request_stream(
        &self,
        constraints: &StreamConstraints,
    ) -> Result<CaptureStream, MediaError> {
        stream::request_stream(&self.platform, constraints).await
    }

    /// Stop all tracks of `stream`; absence is a no-op
    pub fn stop_stream(&self, stream: Option<&CaptureStream>) {
        stream::stop_stream(stream);
    }

    /// Wire an audio analyzer onto `stream` with the default analysis
    /// parameters (FFT window 256, smoothing 0.8)
    pub fn audio_analyzer(&self, stream: &CaptureStream) -> Result<AudioAnalyzer, MediaError> {
        self.audio_analyzer_with(stream, &AnalyserConfig::default())
    }

    /// Wire an audio analyzer onto `stream` with explicit parameters
    pub fn audio_analyzer_with(
        &self,
        stream: &CaptureStream,
        config: &AnalyserConfig,
    ) -> Result<AudioAnalyzer, MediaError> {
        config.validate()?;
        let analyser = self.platform.create_analyser(stream, config)?;
        Ok(AudioAnalyzer::new(analyser))
    }

    /// Read the first video track's negotiated settings, if any
    pub fn video_settings(&self, stream: &CaptureStream) -> Option<VideoSettings> {
        video::video_settings(stream)
    }

    /// Read the first video track's settings and running state, if any
    pub fn video_analysis(&self, stream: &CaptureStream) -> Option<VideoAnalysis> {
        video::video_analysis(stream)
    }
}
