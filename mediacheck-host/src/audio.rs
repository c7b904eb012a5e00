//! Microphone and speaker access through the system audio host

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use mediacheck::{MediaError, MediaTrack, PlatformDeviceInfo, TrackConstraints, TrackKind, TrackSettings};
use parking_lot::Mutex;
use tracing::{debug, warn};

/// List capture and playback devices known to the system audio host.
///
/// cpal identifies devices by name only, so the name doubles as the id.
pub(crate) fn list_audio_devices() -> Result<Vec<PlatformDeviceInfo>, MediaError> {
    let host = cpal::default_host();
    let mut entries = Vec::new();

    let inputs = host
        .input_devices()
        .map_err(|e| MediaError::EnumerationFailed {
            reason: format!("input devices: {}", e),
        })?;
    for device in inputs {
        entries.push(device_entry(&device, "audioinput"));
    }

    let outputs = host
        .output_devices()
        .map_err(|e| MediaError::EnumerationFailed {
            reason: format!("output devices: {}", e),
        })?;
    for device in outputs {
        entries.push(device_entry(&device, "audiooutput"));
    }

    Ok(entries)
}

fn device_entry(device: &cpal::Device, kind: &str) -> PlatformDeviceInfo {
    let name = device.name().unwrap_or_default();
    PlatformDeviceInfo {
        device_id: name.clone(),
        label: name,
        kind: kind.to_string(),
    }
}

/// Audio track backed by a cpal input stream confined to a dedicated thread
///
/// Capture handles are not `Send`, so the stream is built, played, and
/// dropped entirely on that thread; `stop` hangs up the channel the thread
/// blocks on. Dropping the track has the same effect.
pub struct HostAudioTrack {
    id: String,
    settings: TrackSettings,
    stop_tx: Mutex<Option<Sender<()>>>,
    ended: AtomicBool,
}

impl MediaTrack for HostAudioTrack {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> TrackKind {
        TrackKind::Audio
    }

    fn stop(&self) {
        if let Some(tx) = self.stop_tx.lock().take() {
            let _ = tx.send(());
            debug!(track = %self.id, "audio capture stopped");
        }
        self.ended.store(true, Ordering::SeqCst);
    }

    fn is_ended(&self) -> bool {
        self.ended.load(Ordering::SeqCst)
    }

    fn settings(&self) -> TrackSettings {
        self.settings.clone()
    }
}

/// Open the preferred (or default) capture device and start a stream on it.
pub(crate) async fn open_audio_track(
    preferred: Option<TrackConstraints>,
) -> Result<HostAudioTrack, MediaError> {
    let (ready_tx, ready_rx) = std::sync::mpsc::channel();
    let (stop_tx, stop_rx) = std::sync::mpsc::channel();

    std::thread::Builder::new()
        .name("mediacheck-audio-capture".to_string())
        .spawn(move || capture_thread(preferred, ready_tx, stop_rx))
        .map_err(|e| MediaError::StreamError {
            reason: format!("failed to spawn capture thread: {}", e),
        })?;

    let settings = tokio::task::spawn_blocking(move || ready_rx.recv())
        .await
        .map_err(|e| MediaError::StreamError {
            reason: format!("capture thread wait failed: {}", e),
        })?
        .map_err(|_| MediaError::StreamError {
            reason: "capture thread exited before reporting".to_string(),
        })??;

    let id = format!(
        "audio:{}",
        settings.device_id.as_deref().unwrap_or("default")
    );

    Ok(HostAudioTrack {
        id,
        settings,
        stop_tx: Mutex::new(Some(stop_tx)),
        ended: AtomicBool::new(false),
    })
}

fn capture_thread(
    preferred: Option<TrackConstraints>,
    ready_tx: Sender<Result<TrackSettings, MediaError>>,
    stop_rx: Receiver<()>,
) {
    let (stream, settings) = match build_input_stream(preferred.as_ref()) {
        Ok(pair) => pair,
        Err(err) => {
            let _ = ready_tx.send(Err(err));
            return;
        }
    };

    if let Err(err) = stream.play() {
        let _ = ready_tx.send(Err(MediaError::StreamError {
            reason: format!("failed to start capture: {}", err),
        }));
        return;
    }

    debug!(
        device = settings.device_id.as_deref().unwrap_or("default"),
        "audio capture running"
    );
    let _ = ready_tx.send(Ok(settings));

    // Hold the stream open until stop() hangs up or the track is dropped.
    let _ = stop_rx.recv();
}

fn build_input_stream(
    preferred: Option<&TrackConstraints>,
) -> Result<(cpal::Stream, TrackSettings), MediaError> {
    let host = cpal::default_host();

    let device = match preferred.and_then(|c| c.device_id.as_deref()) {
        Some(wanted) => host
            .input_devices()
            .map_err(|e| MediaError::EnumerationFailed {
                reason: format!("input devices: {}", e),
            })?
            .find(|d| d.name().map(|n| n == wanted).unwrap_or(false))
            .ok_or_else(|| MediaError::DeviceNotFound {
                device_id: wanted.to_string(),
            })?,
        None => host
            .default_input_device()
            .ok_or_else(|| MediaError::DeviceNotFound {
                device_id: "default audio input".to_string(),
            })?,
    };

    let name = device.name().unwrap_or_default();

    let default_config = device
        .default_input_config()
        .map_err(|e| MediaError::HardwareError {
            reason: format!("input config for {}: {}", name, e),
        })?;

    let mut stream_config: cpal::StreamConfig = default_config.config();
    if let Some(rate) = preferred.and_then(|c| c.sample_rate) {
        stream_config.sample_rate = cpal::SampleRate(rate);
    }

    // Samples are discarded; the stream exists to hold the device open,
    // which is what a pre-call device check needs.
    let error_name = name.clone();
    let on_error = move |err| {
        warn!(device = %error_name, error = %err, "audio capture stream error");
    };

    let stream = match default_config.sample_format() {
        cpal::SampleFormat::F32 => device.build_input_stream(
            &stream_config,
            move |_data: &[f32], _: &cpal::InputCallbackInfo| {},
            on_error,
            None,
        ),
        cpal::SampleFormat::I16 => device.build_input_stream(
            &stream_config,
            move |_data: &[i16], _: &cpal::InputCallbackInfo| {},
            on_error,
            None,
        ),
        cpal::SampleFormat::U16 => device.build_input_stream(
            &stream_config,
            move |_data: &[u16], _: &cpal::InputCallbackInfo| {},
            on_error,
            None,
        ),
        sample_format => {
            return Err(MediaError::StreamError {
                reason: format!("unsupported sample format: {:?}", sample_format),
            });
        }
    }
    .map_err(|e| map_build_error(e, &name))?;

    let settings = TrackSettings {
        sample_rate: Some(stream_config.sample_rate.0),
        channels: Some(stream_config.channels),
        device_id: Some(name),
        ..TrackSettings::default()
    };

    Ok((stream, settings))
}

fn map_build_error(err: cpal::BuildStreamError, device: &str) -> MediaError {
    match err {
        cpal::BuildStreamError::DeviceNotAvailable => MediaError::DeviceBusy {
            device: device.to_string(),
        },
        cpal::BuildStreamError::StreamConfigNotSupported => MediaError::Overconstrained {
            constraint: "audio stream config".to_string(),
        },
        other => MediaError::StreamError {
            reason: format!("failed to build capture stream: {}", other),
        },
    }
}
