//! Capture streams, tracks, and the constraint model used to request them

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::MediaError;
use crate::platform::MediaPlatform;

/// Kind of signal carried by a single track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    /// Audio signal
    Audio,
    /// Video signal
    Video,
}

/// Currently negotiated settings of a track
///
/// Every field is optional; the platform reports only what it negotiated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackSettings {
    /// Frame width in pixels
    pub width: Option<u32>,
    /// Frame height in pixels
    pub height: Option<u32>,
    /// Frames per second
    pub frame_rate: Option<f64>,
    /// Sample rate in Hz
    pub sample_rate: Option<u32>,
    /// Number of audio channels
    pub channels: Option<u16>,
    /// Identifier of the device backing this track
    pub device_id: Option<String>,
}

/// A single audio or video signal within a capture stream, independently
/// stoppable.
///
/// Implemented by platform backends. Stopping an already-stopped track is
/// harmless; `settings` is a point-in-time read of the negotiated values.
pub trait MediaTrack: Send + Sync {
    /// Track identifier
    fn id(&self) -> &str;

    /// Whether this track carries audio or video
    fn kind(&self) -> TrackKind;

    /// Stop the track and release the underlying capture resource
    fn stop(&self);

    /// Whether the track has transitioned to ended
    fn is_ended(&self) -> bool;

    /// Currently negotiated track settings
    fn settings(&self) -> TrackSettings;
}

/// A live handle to one or more active capture tracks.
///
/// Owned by the caller once returned from acquisition; the utility layer
/// keeps no reference after handing it over.
pub struct CaptureStream {
    tracks: Vec<Box<dyn MediaTrack>>,
}

impl CaptureStream {
    /// Create a stream from platform-negotiated tracks
    pub fn new(tracks: Vec<Box<dyn MediaTrack>>) -> Self {
        Self { tracks }
    }

    /// All tracks in this stream, in platform order
    pub fn tracks(&self) -> &[Box<dyn MediaTrack>] {
        &self.tracks
    }

    /// Audio tracks in this stream
    pub fn audio_tracks(&self) -> impl Iterator<Item = &dyn MediaTrack> {
        self.tracks_of(TrackKind::Audio)
    }

    /// Video tracks in this stream
    pub fn video_tracks(&self) -> impl Iterator<Item = &dyn MediaTrack> {
        self.tracks_of(TrackKind::Video)
    }

    fn tracks_of(&self, kind: TrackKind) -> impl Iterator<Item = &dyn MediaTrack> {
        self.tracks
            .iter()
            .filter(move |t| t.kind() == kind)
            .map(|t| t.as_ref())
    }

    /// Whether at least one audio track is present.
    ///
    /// Analyser construction on a stream without audio is platform-defined;
    /// check this first.
    pub fn has_audio(&self) -> bool {
        self.audio_tracks().next().is_some()
    }

    /// Stop every track in the stream
    pub fn stop(&self) {
        for track in &self.tracks {
            track.stop();
        }
    }
}

impl fmt::Debug for CaptureStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureStream")
            .field("tracks", &self.tracks.len())
            .field(
                "kinds",
                &self.tracks.iter().map(|t| t.kind()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Per-track capture request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackRequest {
    /// Do not capture this kind of track
    #[default]
    Disabled,
    /// Capture with platform-default constraints
    Default,
    /// Capture with detailed constraints
    Constrained(TrackConstraints),
}

impl TrackRequest {
    /// Whether this request asks for a track at all
    pub fn is_requested(&self) -> bool {
        !matches!(self, TrackRequest::Disabled)
    }
}

/// Detailed per-track constraint preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackConstraints {
    /// Preferred device identifier
    pub device_id: Option<String>,
    /// Preferred frame width in pixels
    pub width: Option<u32>,
    /// Preferred frame height in pixels
    pub height: Option<u32>,
    /// Preferred frames per second
    pub frame_rate: Option<f64>,
    /// Preferred sample rate in Hz
    pub sample_rate: Option<u32>,
}

/// Declarative description of the stream to acquire
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamConstraints {
    /// Audio side of the request
    pub audio: TrackRequest,
    /// Video side of the request
    pub video: TrackRequest,
}

impl StreamConstraints {
    /// Request default-constraint audio only
    pub fn audio_only() -> Self {
        Self {
            audio: TrackRequest::Default,
            video: TrackRequest::Disabled,
        }
    }

    /// Request default-constraint video only
    pub fn video_only() -> Self {
        Self {
            audio: TrackRequest::Disabled,
            video: TrackRequest::Default,
        }
    }

    /// Request default-constraint audio and video
    pub fn audio_video() -> Self {
        Self {
            audio: TrackRequest::Default,
            video: TrackRequest::Default,
        }
    }
}

/// Request a capture stream satisfying `constraints`.
///
/// Platform failures (denied permission, no matching device, device busy,
/// hardware fault) propagate unmodified; no retry, no constraint
/// relaxation.
pub async fn request_stream(
    platform: &impl MediaPlatform,
    constraints: &StreamConstraints,
) -> Result<CaptureStream, MediaError> {
    let stream = platform.request_stream(constraints).await?;
    debug!(tracks = stream.tracks().len(), "capture stream acquired");
    Ok(stream)
}

/// Stop every track of `stream`, releasing the underlying hardware.
///
/// An absent stream is a no-op, not an error.
pub fn stop_stream(stream: Option<&CaptureStream>) {
    if let Some(stream) = stream {
        stream.stop();
        debug!(tracks = stream.tracks().len(), "capture stream stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_stream_absent() {
        stop_stream(None);
    }

    #[test]
    fn test_constraint_constructors() {
        let audio = StreamConstraints::audio_only();
        assert!(audio.audio.is_requested());
        assert!(!audio.video.is_requested());

        let both = StreamConstraints::audio_video();
        assert_eq!(both.audio, TrackRequest::Default);
        assert_eq!(both.video, TrackRequest::Default);

        assert_eq!(StreamConstraints::default().audio, TrackRequest::Disabled);
    }

    #[test]
    fn test_constrained_request() {
        let request = TrackRequest::Constrained(TrackConstraints {
            device_id: Some("front-camera".to_string()),
            width: Some(1280),
            height: Some(720),
            frame_rate: Some(30.0),
            sample_rate: None,
        });
        assert!(request.is_requested());
    }
}
