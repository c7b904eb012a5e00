//! End-to-end device check against the native desktop backend.
//!
//! Reports capability and permission state, lists devices, then opens and
//! releases the default microphone.
//!
//! Run with: cargo run --example device_check

use mediacheck::{CheckResult, MediaSession, PermissionKind, StreamConstraints};
use mediacheck_host::HostPlatform;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let session = MediaSession::new(HostPlatform::new());

    if !session.is_capture_supported() {
        println!("media capture is not supported on this machine");
        return;
    }
    println!("media capture: supported");

    for kind in [PermissionKind::Microphone, PermissionKind::Camera] {
        let state = session.check_permission(kind).await;
        println!("{} permission: {}", kind, state);
    }

    match session.enumerate_devices().await {
        Ok(devices) => {
            println!("{} device(s):", devices.len());
            for device in &devices {
                println!("  [{}] {}", device.kind, device.label);
            }
        }
        Err(err) => println!("device enumeration failed: {}", err),
    }

    let report = match session.request_stream(&StreamConstraints::audio_only()).await {
        Ok(stream) => {
            let negotiated = stream
                .audio_tracks()
                .next()
                .map(|track| track.settings())
                .unwrap_or_default();

            session.stop_stream(Some(&stream));

            CheckResult::success(format!(
                "microphone opened at {} Hz, {} channel(s)",
                negotiated.sample_rate.unwrap_or(0),
                negotiated.channels.unwrap_or(0),
            ))
        }
        Err(err) => CheckResult::failure(format!("microphone check failed: {}", err)),
    };

    println!("[{:?}] {} ({})", report.status, report.message, report.timestamp);
}
