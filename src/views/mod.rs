//! View implementations
//! 
//! In-process view handles and the terminal status line.

pub mod memory;
pub mod terminal;

pub use memory::MemoryView;
pub use terminal::TerminalPanel;
