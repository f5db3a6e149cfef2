//! Timer phase and serializable snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Countdown state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    /// Stopped, value untouched
    #[default]
    Idle,
    /// Ticking once per second
    Running,
    /// Reached zero, completion signal fired
    Alerting,
}

impl TimerPhase {
    pub fn is_running(self) -> bool {
        self == TimerPhase::Running
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Running => "running",
            TimerPhase::Alerting => "alerting",
        }
    }

    /// Label the main button shows in this phase
    pub fn button_label(self) -> &'static str {
        match self {
            TimerPhase::Running => "Pause",
            TimerPhase::Idle | TimerPhase::Alerting => "Start",
        }
    }
}

/// Point-in-time view of a timer for status output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub id: String,
    pub title: String,
    pub phase: TimerPhase,
    pub total_seconds: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub initial_total_seconds: u64,
    pub progress_percent: u8,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_label_follows_phase() {
        assert_eq!(TimerPhase::Idle.button_label(), "Start");
        assert_eq!(TimerPhase::Running.button_label(), "Pause");
        assert_eq!(TimerPhase::Alerting.button_label(), "Start");
    }

    #[test]
    fn test_phase_serializes_lowercase() {
        let json = serde_json::to_string(&TimerPhase::Alerting).unwrap();
        assert_eq!(json, "\"alerting\"");
    }
}
