//! Ports (trait boundaries) for external dependencies.
//!
//! Following hexagonal architecture, these traits are owned by the domain
//! and implemented by adapters outside the crate: the grid game supplies an
//! [`Environment`], reporting sinks implement [`TrainingObserver`].

pub mod environment;
pub mod observer;

pub use environment::{Environment, RenderGuard, Step, StepInfo};
pub use observer::TrainingObserver;
