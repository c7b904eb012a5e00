//! # Mediacheck Host
//!
//! Native desktop backend for `mediacheck`: implements the
//! [`MediaPlatform`] collaborator over the system audio host (cpal) and the
//! native camera stack (nokhwa).
//!
//! Desktop platforms have no permission broker to query, so permission
//! checks report `unsupported`; acquisition either works or fails with the
//! device-level reason. The desktop stack also supplies no frequency
//! analyser node, so analyser construction reports unavailability rather
//! than synthesizing one.
//!
//! ```rust,no_run
//! use mediacheck::{MediaSession, StreamConstraints};
//! use mediacheck_host::HostPlatform;
//!
//! # async fn example() -> Result<(), mediacheck::MediaError> {
//! let session = MediaSession::new(HostPlatform::new());
//! let devices = session.enumerate_devices().await?;
//! let stream = session.request_stream(&StreamConstraints::audio_only()).await?;
//! session.stop_stream(Some(&stream));
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]

mod audio;
mod video;

use async_trait::async_trait;
use mediacheck::{
    AnalyserConfig, CaptureStream, FrequencyAnalyser, MediaError, MediaPlatform, MediaTrack,
    PermissionKind, PermissionState, PlatformDeviceInfo, StreamConstraints, TrackConstraints,
    TrackRequest,
};
use tracing::warn;

pub use audio::HostAudioTrack;
pub use video::HostVideoTrack;

/// The native desktop platform collaborator
#[derive(Debug, Clone, Copy, Default)]
pub struct HostPlatform;

impl HostPlatform {
    /// Create the desktop backend
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MediaPlatform for HostPlatform {
    fn is_capture_supported(&self) -> bool {
        !cpal::available_hosts().is_empty()
    }

    fn supports_permission_query(&self) -> bool {
        // No permission broker on desktop; access is mediated per-device.
        false
    }

    async fn query_permission(&self, kind: PermissionKind) -> Result<PermissionState, MediaError> {
        Err(MediaError::Unsupported {
            reason: format!("no permission broker to query for {}", kind),
        })
    }

    async fn enumerate_devices(&self) -> Result<Vec<PlatformDeviceInfo>, MediaError> {
        let mut entries = audio::list_audio_devices()?;

        // A broken camera subsystem degrades to audio-only results.
        match video::list_video_devices() {
            Ok(cameras) => entries.extend(cameras),
            Err(err) => warn!(error = %err, "camera enumeration failed, listing audio devices only"),
        }

        Ok(entries)
    }

    async fn request_stream(
        &self,
        constraints: &StreamConstraints,
    ) -> Result<CaptureStream, MediaError> {
        if !constraints.audio.is_requested() && !constraints.video.is_requested() {
            return Err(MediaError::InvalidConfiguration {
                message: "at least one of audio or video must be requested".to_string(),
            });
        }

        let mut tracks: Vec<Box<dyn MediaTrack>> = Vec::new();

        if constraints.audio.is_requested() {
            let track = audio::open_audio_track(preferences(&constraints.audio)).await?;
            tracks.push(Box::new(track));
        }

        if constraints.video.is_requested() {
            match video::open_video_track(preferences(&constraints.video)).await {
                Ok(track) => tracks.push(Box::new(track)),
                Err(err) => {
                    // Release whatever was already acquired before failing.
                    for track in &tracks {
                        track.stop();
                    }
                    return Err(err);
                }
            }
        }

        Ok(CaptureStream::new(tracks))
    }

    fn create_analyser(
        &self,
        _stream: &CaptureStream,
        _config: &AnalyserConfig,
    ) -> Result<Box<dyn FrequencyAnalyser>, MediaError> {
        Err(MediaError::AnalyserUnavailable {
            reason: "the desktop capture stack exposes no frequency analyser".to_string(),
        })
    }
}

fn preferences(request: &TrackRequest) -> Option<TrackConstraints> {
    match request {
        TrackRequest::Constrained(constraints) => Some(constraints.clone()),
        _ => None,
    }
}
