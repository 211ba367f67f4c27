use std::sync::Arc;

use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

use crate::clients::{ClientError, HttpUserClient, UserCollection};
use crate::config::ClientConfig;
use crate::controller::{Confirm, ListActor, ListHandle, Notifier, MAILBOX_SIZE};

/// Errors raised while starting or stopping the system.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("failed to build the user collection client: {0}")]
    Client(#[from] ClientError),

    #[error("controller task failed: {0}")]
    TaskFailed(#[from] JoinError),
}

/// Starts the list controller and wires it to its collaborators.
///
/// # Example
///
/// ```ignore
/// let system = AdminSystem::connect(&config, notifier, confirm)?;
///
/// system.users.mount().await?;
/// let state = system.users.settled().await?;
///
/// system.shutdown().await?;
/// ```
pub struct AdminSystem {
    /// Handle for driving the user list.
    pub users: ListHandle,

    /// Controller task, awaited on shutdown.
    handle: JoinHandle<()>,
}

impl AdminSystem {
    /// Spawns the controller over any collection client.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(
        collection: Arc<dyn UserCollection>,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
    ) -> Self {
        let (actor, users) = ListActor::new(MAILBOX_SIZE, collection, notifier, confirm);
        let handle = tokio::spawn(actor.run());
        Self { users, handle }
    }

    /// Spawns the controller over the HTTP collection described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Client`] when the HTTP client cannot be built.
    pub fn connect(
        config: &ClientConfig,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
    ) -> Result<Self, LifecycleError> {
        let collection = HttpUserClient::from_config(config)?;
        Ok(Self::new(Arc::new(collection), notifier, confirm))
    }

    /// Closes the controller mailbox and waits for the task to finish.
    ///
    /// Clones of [`AdminSystem::users`] held elsewhere keep the controller
    /// alive, so drop them first.
    pub async fn shutdown(self) -> Result<(), LifecycleError> {
        info!("Shutting down system...");
        drop(self.users);

        if let Err(e) = self.handle.await {
            error!(error = %e, "Controller task failed");
            return Err(e.into());
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
