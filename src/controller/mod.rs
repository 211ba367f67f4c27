//! # List Controller
//!
//! Client-side state for the paginated, editable user list.
//!
//! - [`state`]: the pure [`ListState`] machine (`apply(event) -> effects`).
//! - [`actor`]: [`ListActor`], the Tokio task that owns the state and runs effects.
//! - [`handle`]: [`ListHandle`], the typed async API used by front ends and tests.
//! - [`ports`]: notification and confirmation side channels.

pub mod actor;
pub mod error;
pub mod handle;
pub mod ports;
pub mod state;

pub use actor::ListActor;
pub use error::ListError;
pub use handle::ListHandle;
pub use ports::*;
pub use state::{
    Effect, FormMode, FormState, InFlight, ListEvent, ListState, Phase, DELETE_PROMPT,
    GENERIC_FAILURE,
};

/// Mailbox capacity of the list controller.
pub const MAILBOX_SIZE: usize = 32;
