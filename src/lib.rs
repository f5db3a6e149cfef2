//! Countdown Binding - a countdown timer kept in sync with its views
//! 
//! This library provides a clock value with carry/borrow arithmetic, an
//! observer binding layer that keeps any number of views consistent with one
//! piece of state (including two-way edits), and a timer controller built on
//! top of both.

pub mod binding;
pub mod config;
pub mod error;
pub mod state;
pub mod tasks;
pub mod utils;
pub mod views;

// Re-export commonly used types
pub use binding::{BoundView, ObservableProperty, Observer, ViewHandle};
pub use config::Config;
pub use error::ClockError;
pub use state::{ClockValue, Component, Timer, TimerPhase, TimerSnapshot, TimerViews};
pub use utils::signals::shutdown_signal;
