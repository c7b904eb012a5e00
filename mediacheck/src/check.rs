//! Device-check reporting records
//!
//! Plain records a device-check flow hands to its UI layer after probing a
//! camera or microphone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Progress state of a single device check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Check has not started
    Idle,
    /// Check is running
    Testing,
    /// Device worked
    Success,
    /// Device failed or was unavailable
    Error,
}

/// Outcome of a single device check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    /// Final status
    pub status: CheckStatus,
    /// Human-readable outcome description
    pub message: String,
    /// When the check concluded
    pub timestamp: DateTime<Utc>,
}

impl CheckResult {
    /// Record a passed check
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Success,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Record a failed check
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Error,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_constructors() {
        let passed = CheckResult::success("microphone delivered audio");
        assert_eq!(passed.status, CheckStatus::Success);
        assert_eq!(passed.message, "microphone delivered audio");

        let failed = CheckResult::failure("camera busy");
        assert_eq!(failed.status, CheckStatus::Error);
    }
}
