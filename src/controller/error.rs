//! Error types for the list controller.

use thiserror::Error;

/// Reasons an intent was rejected, plus failures reaching the controller task.
///
/// A rejected intent leaves the list state untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ListError {
    /// A save or delete is still in flight.
    #[error("Another operation is still in progress")]
    Busy,

    /// The collection is being fetched.
    #[error("The user list is still loading")]
    Loading,

    /// The create/edit form is open.
    #[error("The user form is open")]
    FormOpen,

    /// The intent needs the create/edit form, which is closed.
    #[error("The user form is not open")]
    NoForm,

    /// The controller task has stopped.
    #[error("Controller closed")]
    ActorClosed,

    /// The controller task dropped the response channel.
    #[error("Controller dropped response channel")]
    ActorDropped,
}
