//! Seams between the orchestrator and its collaborators.

pub mod judge;
pub mod presenter;
pub mod store;

pub use judge::Judge;
pub use presenter::{Badge, Presenter, UiBlock};
pub use store::ResultStore;
