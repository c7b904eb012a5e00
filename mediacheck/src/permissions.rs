//! Permission state model and queries

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::platform::MediaPlatform;

/// Capability a permission query is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionKind {
    /// Video capture
    Camera,
    /// Audio capture
    Microphone,
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Matches the key the platform's query facility expects.
        let name = match self {
            PermissionKind::Camera => "camera",
            PermissionKind::Microphone => "microphone",
        };
        f.write_str(name)
    }
}

/// Permission state for a capture capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    /// Asking would show a prompt; also reported when the query itself
    /// fails for this capability
    Prompt,
    /// Capture is allowed
    Granted,
    /// Capture is blocked
    Denied,
    /// The platform offers no permission query facility
    Unsupported,
}

impl fmt::Display for PermissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PermissionState::Prompt => "prompt",
            PermissionState::Granted => "granted",
            PermissionState::Denied => "denied",
            PermissionState::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}

/// Query the permission state for `kind`.
///
/// Returns [`PermissionState::Unsupported`] without touching the platform
/// when no query facility exists. A query that fails reports
/// [`PermissionState::Prompt`]: some platforms expose a query facility but
/// decline the camera/microphone capability names, and callers always get a
/// usable state instead of an error path.
pub async fn check_permission(
    platform: &impl MediaPlatform,
    kind: PermissionKind,
) -> PermissionState {
    if !platform.supports_permission_query() {
        return PermissionState::Unsupported;
    }

    match platform.query_permission(kind).await {
        Ok(state) => state,
        Err(err) => {
            debug!(capability = %kind, error = %err, "permission query failed, reporting prompt");
            PermissionState::Prompt
        }
    }
}
