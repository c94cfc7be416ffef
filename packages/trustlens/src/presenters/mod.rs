//! Presentation surfaces.

pub mod memory;
pub mod terminal;

pub use memory::MemorySurface;
pub use terminal::TerminalPresenter;
