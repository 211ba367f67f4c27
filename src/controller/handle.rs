use tokio::sync::{mpsc, oneshot, watch};

use crate::controller::error::ListError;
use crate::controller::state::{ListEvent, ListState};
use crate::model::{DraftField, User};

/// Type alias for the one-shot channel carrying the state after an intent.
pub type Response = oneshot::Sender<Result<ListState, ListError>>;

/// Message sent to the [`ListActor`](crate::controller::ListActor) mailbox.
#[derive(Debug)]
pub struct ListRequest {
    pub event: ListEvent,
    pub respond_to: Response,
}

/// Typed async API over the list controller.
///
/// Each intent resolves once the controller has applied it and started any
/// resulting network call; it does not wait for that call. Use
/// [`ListHandle::settled`] to wait until loads and saves have finished.
#[derive(Clone)]
pub struct ListHandle {
    sender: mpsc::Sender<ListRequest>,
    snapshots: watch::Receiver<ListState>,
}

impl ListHandle {
    pub fn new(sender: mpsc::Sender<ListRequest>, snapshots: watch::Receiver<ListState>) -> Self {
        Self { sender, snapshots }
    }

    async fn send(&self, event: ListEvent) -> Result<ListState, ListError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ListRequest { event, respond_to })
            .await
            .map_err(|_| ListError::ActorClosed)?;
        response.await.map_err(|_| ListError::ActorDropped)?
    }

    /// Loads (or reloads) the collection.
    pub async fn mount(&self) -> Result<ListState, ListError> {
        self.send(ListEvent::Mount).await
    }

    pub async fn open_create(&self) -> Result<ListState, ListError> {
        self.send(ListEvent::OpenCreate).await
    }

    pub async fn open_edit(&self, user: User) -> Result<ListState, ListError> {
        self.send(ListEvent::OpenEdit(user)).await
    }

    pub async fn close_modal(&self) -> Result<ListState, ListError> {
        self.send(ListEvent::CloseModal).await
    }

    pub async fn edit_field(
        &self,
        field: DraftField,
        value: impl Into<String>,
    ) -> Result<ListState, ListError> {
        self.send(ListEvent::EditField {
            field,
            value: value.into(),
        })
        .await
    }

    pub async fn submit(&self) -> Result<ListState, ListError> {
        self.send(ListEvent::Submit).await
    }

    /// Asks for confirmation and, if given, deletes `user`.
    pub async fn delete(&self, user: User) -> Result<ListState, ListError> {
        self.send(ListEvent::RequestDelete(user)).await
    }

    pub async fn go_to_page(&self, page: usize) -> Result<ListState, ListError> {
        self.send(ListEvent::GoToPage(page)).await
    }

    /// The most recently published state.
    pub fn snapshot(&self) -> ListState {
        self.snapshots.borrow().clone()
    }

    /// Waits until nothing is loading and no save or delete is in flight.
    pub async fn settled(&self) -> Result<ListState, ListError> {
        let mut snapshots = self.snapshots.clone();
        let state = snapshots
            .wait_for(ListState::is_settled)
            .await
            .map_err(|_| ListError::ActorClosed)?;
        Ok(state.clone())
    }
}
