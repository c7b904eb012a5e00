//! Video track settings reads

use serde::{Deserialize, Serialize};

use crate::stream::CaptureStream;

/// Point-in-time snapshot of the active video track's negotiated settings
///
/// Fields the platform reports as unset read as 0. Settings are not
/// refreshed if the platform renegotiates later.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSettings {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Frames per second
    pub frame_rate: f64,
}

/// Video activity snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoAnalysis {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Frames per second
    pub frame_rate: f64,
    /// Whether the track is still running
    pub is_active: bool,
}

/// Read the negotiated settings of the stream's first video track.
///
/// Returns `None` when the stream has no video track; that is absence, not
/// a failure.
pub fn video_settings(stream: &CaptureStream) -> Option<VideoSettings> {
    let track = stream.video_tracks().next()?;
    let settings = track.settings();

    Some(VideoSettings {
        width: settings.width.unwrap_or(0),
        height: settings.height.unwrap_or(0),
        frame_rate: settings.frame_rate.unwrap_or(0.0),
    })
}

/// Read the first video track's settings together with its running state.
pub fn video_analysis(stream: &CaptureStream) -> Option<VideoAnalysis> {
    let track = stream.video_tracks().next()?;
    let settings = track.settings();

    Some(VideoAnalysis {
        width: settings.width.unwrap_or(0),
        height: settings.height.unwrap_or(0),
        frame_rate: settings.frame_rate.unwrap_or(0.0),
        is_active: !track.is_ended(),
    })
}
