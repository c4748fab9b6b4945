//! Diagram intake
//!
//! Turns a file on disk into a validated [`DiagramImage`](pid_domain::DiagramImage).

mod loader;

pub use loader::{IntakeError, load_diagram};
