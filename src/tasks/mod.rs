//! Background tasks module
//! 
//! This module contains the tasks that drive a timer: the periodic tick and
//! the stdin command loop.

pub mod countdown;
pub mod input;

// Re-export main functions
pub use countdown::countdown_task;
pub use input::{input_task, parse_command, Command};
