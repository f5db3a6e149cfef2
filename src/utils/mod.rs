//! Utility functions module
//! 
//! This module contains utility functions used throughout the application.

pub mod format;
pub mod signals;

// Re-export main functions
pub use format::{fill_decimal_places, format_clock};
pub use signals::shutdown_signal;
