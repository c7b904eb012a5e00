//! Camera access through nokhwa

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender};

use mediacheck::{MediaError, MediaTrack, PlatformDeviceInfo, TrackConstraints, TrackKind, TrackSettings};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    ApiBackend, CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType,
    Resolution,
};
use nokhwa::Camera;
use parking_lot::Mutex;
use tracing::debug;

/// List cameras known to the native capture backend.
///
/// The camera index doubles as the id; it is only stable within a session.
pub(crate) fn list_video_devices() -> Result<Vec<PlatformDeviceInfo>, MediaError> {
    let cameras = nokhwa::query(ApiBackend::Auto).map_err(|e| MediaError::EnumerationFailed {
        reason: format!("camera query: {}", e),
    })?;

    Ok(cameras
        .into_iter()
        .map(|info| PlatformDeviceInfo {
            device_id: info.index().to_string(),
            label: info.human_name(),
            kind: "videoinput".to_string(),
        })
        .collect())
}

/// Video track backed by a nokhwa camera confined to a dedicated thread
///
/// The camera is opened, held, and closed entirely on that thread; `stop`
/// hangs up the channel the thread blocks on. Dropping the track has the
/// same effect.
pub struct HostVideoTrack {
    id: String,
    settings: TrackSettings,
    stop_tx: Mutex<Option<Sender<()>>>,
    ended: AtomicBool,
}

impl MediaTrack for HostVideoTrack {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> TrackKind {
        TrackKind::Video
    }

    fn stop(&self) {
        if let Some(tx) = self.stop_tx.lock().take() {
            let _ = tx.send(());
            debug!(track = %self.id, "video capture stopped");
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

/// Open the preferred (or first) camera and start capturing from it.
pub(crate) async fn open_video_track(
    preferred: Option<TrackConstraints>,
) -> Result<HostVideoTrack, MediaError> {
    let (ready_tx, ready_rx) = std::sync::mpsc::channel();
    let (stop_tx, stop_rx) = std::sync::mpsc::channel();

    std::thread::Builder::new()
        .name("mediacheck-video-capture".to_string())
        .spawn(move || camera_thread(preferred, ready_tx, stop_rx))
        .map_err(|e| MediaError::StreamError {
            reason: format!("failed to spawn camera thread: {}", e),
        })?;

    let settings = tokio::task::spawn_blocking(move || ready_rx.recv())
        .await
        .map_err(|e| MediaError::StreamError {
            reason: format!("camera thread wait failed: {}", e),
        })?
        .map_err(|_| MediaError::StreamError {
            reason: "camera thread exited before reporting".to_string(),
        })??;

    let id = format!(
        "video:{}",
        settings.device_id.as_deref().unwrap_or("default")
    );

    Ok(HostVideoTrack {
        id,
        settings,
        stop_tx: Mutex::new(Some(stop_tx)),
        ended: AtomicBool::new(false),
    })
}

fn camera_thread(
    preferred: Option<TrackConstraints>,
    ready_tx: Sender<Result<TrackSettings, MediaError>>,
    stop_rx: Receiver<()>,
) {
    let index = camera_index(preferred.as_ref());
    let requested = requested_format(preferred.as_ref());

    let mut camera = match Camera::new(index.clone(), requested) {
        Ok(camera) => camera,
        Err(err) => {
            let _ = ready_tx.send(Err(MediaError::DeviceNotFound {
                device_id: format!("{} ({})", index, err),
            }));
            return;
        }
    };

    if let Err(err) = camera.open_stream() {
        let _ = ready_tx.send(Err(MediaError::HardwareError {
            reason: format!("failed to open camera {}: {}", index, err),
        }));
        return;
    }

    let resolution = camera.resolution();
    let settings = TrackSettings {
        width: Some(resolution.width()),
        height: Some(resolution.height()),
        frame_rate: Some(f64::from(camera.frame_rate())),
        device_id: Some(index.to_string()),
        ..TrackSettings::default()
    };

    debug!(camera = %index, "video capture running");
    let _ = ready_tx.send(Ok(settings));

    // Hold the camera open until stop() hangs up or the track is dropped.
    let _ = stop_rx.recv();
    let _ = camera.stop_stream();
}

fn camera_index(preferred: Option<&TrackConstraints>) -> CameraIndex {
    match preferred.and_then(|c| c.device_id.as_deref()) {
        Some(id) => match id.parse::<u32>() {
            Ok(index) => CameraIndex::Index(index),
            Err(_) => CameraIndex::String(id.to_string()),
        },
        None => CameraIndex::Index(0),
    }
}

fn requested_format(preferred: Option<&TrackConstraints>) -> RequestedFormat<'static> {
    if let Some(constraints) = preferred {
        if let (Some(width), Some(height)) = (constraints.width, constraints.height) {
            let frame_rate = constraints.frame_rate.unwrap_or(30.0) as u32;
            let format = CameraFormat::new(
                Resolution::new(width, height),
                FrameFormat::MJPEG,
                frame_rate,
            );
            return RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(format));
        }
    }

    RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution)
}
