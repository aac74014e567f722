//! Service state vocabulary.
//!
//! The control tool grew several status vocabularies over time: the normalized
//! dashboard states (RUNNING/STOPPED/...), and the raw init-system words
//! (active/inactive/failed/...) that appear verbatim in per-unit rows. The
//! first collapses onto [`ServiceState`]; the second is badged directly via
//! [`unit_badge`]. The two classifiers cover different vocabularies and stay
//! separate.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical run state of one service. Every raw vocabulary collapses onto
/// this set; unmapped input is `Unknown`, never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceState {
    Running,
    Stopped,
    Failed,
    #[default]
    Unknown,
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Running => "RUNNING",
            Self::Stopped => "STOPPED",
            Self::Failed => "FAILED",
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(label)
    }
}

/// Compact visual classification shown next to a state value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Green,
    Yellow,
    Red,
    Gray,
}

impl Badge {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Green => "🟢",
            Self::Yellow => "🟡",
            Self::Red => "🔴",
            Self::Gray => "⚪",
        }
    }
}

/// Map a raw status word onto [`ServiceState`]. Case-insensitive, total.
pub fn classify_state(raw: &str) -> ServiceState {
    match raw.trim().to_ascii_uppercase().as_str() {
        "RUNNING" | "ACTIVE" => ServiceState::Running,
        "STOPPED" | "INACTIVE" | "DEAD" => ServiceState::Stopped,
        "FAILED" | "DOWN" | "ERROR" => ServiceState::Failed,
        _ => ServiceState::Unknown,
    }
}

/// Badge for a dashboard-vocabulary state value. Operates on the raw string
/// so that pass-through words like DEGRADED/WARNING (which `classify_state`
/// does not cover) can still map to yellow.
pub fn state_badge(raw: &str) -> Badge {
    match classify_state(raw) {
        ServiceState::Running => Badge::Green,
        ServiceState::Stopped | ServiceState::Failed => Badge::Red,
        ServiceState::Unknown => match raw.trim().to_ascii_uppercase().as_str() {
            "DEGRADED" | "WARNING" => Badge::Yellow,
            _ => Badge::Gray,
        },
    }
}

impl ServiceState {
    pub fn badge(self) -> Badge {
        match self {
            Self::Running => Badge::Green,
            Self::Stopped | Self::Failed => Badge::Red,
            Self::Unknown => Badge::Gray,
        }
    }
}

/// Badge for raw init-system unit vocabulary. Evaluated on the first word of
/// the value, so `active (running)` still reads as active.
pub fn unit_badge(raw: &str) -> Badge {
    let word = raw
        .trim()
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    match word.as_str() {
        "active" | "running" => Badge::Green,
        "failed" | "inactive" | "dead" => Badge::Red,
        "activating" | "deactivating" | "reloading" => Badge::Yellow,
        _ => Badge::Gray,
    }
}
