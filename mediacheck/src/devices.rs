//! Device descriptors and enumeration

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::MediaError;
use crate::platform::MediaPlatform;

/// Recognized media device kinds
///
/// Anything else the platform reports is dropped at enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaDeviceKind {
    /// Audio capture device (microphone)
    #[serde(rename = "audioinput")]
    AudioInput,
    /// Video capture device (camera)
    #[serde(rename = "videoinput")]
    VideoInput,
    /// Audio playback device (speaker, headphones)
    #[serde(rename = "audiooutput")]
    AudioOutput,
}

impl MediaDeviceKind {
    /// Parse the kind string reported by the platform.
    ///
    /// Returns `None` for unrecognized kinds so enumeration can filter them.
    pub fn from_platform(kind: &str) -> Option<Self> {
        match kind {
            "audioinput" => Some(MediaDeviceKind::AudioInput),
            "videoinput" => Some(MediaDeviceKind::VideoInput),
            "audiooutput" => Some(MediaDeviceKind::AudioOutput),
            _ => None,
        }
    }
}

impl fmt::Display for MediaDeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Platform spelling, also used in synthesized labels.
        let name = match self {
            MediaDeviceKind::AudioInput => "audioinput",
            MediaDeviceKind::VideoInput => "videoinput",
            MediaDeviceKind::AudioOutput => "audiooutput",
        };
        f.write_str(name)
    }
}

/// A media device as presented to callers
///
/// Immutable snapshot, created fresh on each enumeration. The id is only
/// stable within a single permission-granted session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDeviceInfo {
    /// Opaque device identifier
    pub device_id: String,
    /// Human-readable label, never empty
    pub label: String,
    /// Device kind
    pub kind: MediaDeviceKind,
}

/// List the available input/output devices.
///
/// Devices of unrecognized kinds are silently dropped; platform ordering is
/// preserved and nothing is deduplicated. When the platform withholds a
/// label (typical before permission is granted) one is synthesized from the
/// kind and an id prefix so the label is never empty.
pub async fn enumerate_devices(
    platform: &impl MediaPlatform,
) -> Result<Vec<MediaDeviceInfo>, MediaError> {
    let entries = platform.enumerate_devices().await?;
    let reported = entries.len();

    let devices: Vec<MediaDeviceInfo> = entries
        .into_iter()
        .filter_map(|entry| {
            let kind = MediaDeviceKind::from_platform(&entry.kind)?;
            let label = if entry.label.is_empty() {
                fallback_label(kind, &entry.device_id)
            } else {
                entry.label
            };
            Some(MediaDeviceInfo {
                device_id: entry.device_id,
                label,
                kind,
            })
        })
        .collect();

    debug!(reported, kept = devices.len(), "enumerated media devices");
    Ok(devices)
}

/// Synthesize a label from the device kind and the first 8 characters of
/// its id.
fn fallback_label(kind: MediaDeviceKind, device_id: &str) -> String {
    let prefix: String = device_id.chars().take(8).collect();
    format!("{} ({}...)", kind, prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in [
            MediaDeviceKind::AudioInput,
            MediaDeviceKind::VideoInput,
            MediaDeviceKind::AudioOutput,
        ] {
            assert_eq!(MediaDeviceKind::from_platform(&kind.to_string()), Some(kind));
        }
    }

    #[test]
    fn test_kind_rejects_unknown() {
        assert_eq!(MediaDeviceKind::from_platform("audiodisplay"), None);
        assert_eq!(MediaDeviceKind::from_platform(""), None);
        // Parsing is exact, not case-folded.
        assert_eq!(MediaDeviceKind::from_platform("AudioInput"), None);
    }

    #[test]
    fn test_fallback_label() {
        assert_eq!(
            fallback_label(MediaDeviceKind::AudioInput, "a1b2c3d4e5"),
            "audioinput (a1b2c3d4...)"
        );
    }

    #[test]
    fn test_fallback_label_short_id() {
        assert_eq!(
            fallback_label(MediaDeviceKind::VideoInput, "cam0"),
            "videoinput (cam0...)"
        );
        assert_eq!(
            fallback_label(MediaDeviceKind::AudioOutput, ""),
            "audiooutput (...)"
        );
    }
}
