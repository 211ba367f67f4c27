//! Runtime orchestration and lifecycle management.
//!
//! - [`AdminSystem`] - spawns the list controller, wires its collaborators, shuts it down
//! - [`setup_tracing`] - initializes the tracing/logging infrastructure

pub mod admin_system;
pub mod tracing;

pub use self::admin_system::*;
pub use self::tracing::*;
