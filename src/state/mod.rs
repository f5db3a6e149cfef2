//! State management module
//! 
//! This module contains the clock value, the timer phase and the timer
//! controller that ties them to the views.

pub mod clock_value;
pub mod timer;
pub mod timer_state;

// Re-export main types
pub use clock_value::{ClockValue, Component};
pub use timer::{CompletionFn, Timer, TimerViews, ALERT_CLASS, FIELD_WIDTH, RUNNING_CLASS};
pub use timer_state::{TimerPhase, TimerSnapshot};
