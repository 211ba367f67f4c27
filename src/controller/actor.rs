use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, info_span, warn, Instrument, Span};

use crate::clients::UserCollection;
use crate::controller::error::ListError;
use crate::controller::handle::{ListHandle, ListRequest};
use crate::controller::ports::{Confirm, Notifier};
use crate::controller::state::{Effect, FormMode, ListEvent, ListState, DELETE_PROMPT};

/// The task that owns a [`ListState`].
///
/// Intents arrive on the mailbox and are applied one at a time. Network calls
/// run in spawned tasks and report back on a separate completion channel, so
/// the state is never touched outside this task and needs no lock. Every
/// applied event publishes a fresh snapshot on the watch channel.
pub struct ListActor {
    receiver: mpsc::Receiver<ListRequest>,
    completions: mpsc::UnboundedReceiver<ListEvent>,
    completion_sender: mpsc::UnboundedSender<ListEvent>,
    snapshots: watch::Sender<ListState>,
    state: ListState,
    collection: Arc<dyn UserCollection>,
    notifier: Arc<dyn Notifier>,
    confirm: Arc<dyn Confirm>,
}

impl ListActor {
    pub fn new(
        buffer_size: usize,
        collection: Arc<dyn UserCollection>,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
    ) -> (Self, ListHandle) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (completion_sender, completions) = mpsc::unbounded_channel();
        let (snapshots, snapshot_receiver) = watch::channel(ListState::new());
        let actor = Self {
            receiver,
            completions,
            completion_sender,
            snapshots,
            state: ListState::new(),
            collection,
            notifier,
            confirm,
        };
        (actor, ListHandle::new(sender, snapshot_receiver))
    }

    /// Runs until every [`ListHandle`] has been dropped.
    ///
    /// Completions are drained before new intents so an intent always sees
    /// the results that have already arrived.
    pub async fn run(mut self) {
        info!("List controller started");
        loop {
            tokio::select! {
                biased;
                Some(event) = self.completions.recv() => {
                    // Completions are never rejected; the error is only logged.
                    let _ = self.dispatch(event);
                }
                request = self.receiver.recv() => match request {
                    Some(ListRequest { event, respond_to }) => {
                        let result = self.dispatch(event).map(|()| self.state.clone());
                        let _ = respond_to.send(result);
                    }
                    None => break,
                },
            }
        }
        info!(
            users = self.state.items().len(),
            in_flight = self.state.is_busy(),
            "List controller stopped"
        );
    }

    fn dispatch(&mut self, event: ListEvent) -> Result<(), ListError> {
        let name = event.name();
        debug!(event = name, "Apply");
        let effects = self
            .state
            .apply(event)
            .inspect_err(|error| warn!(event = name, %error, "Intent rejected"))?;
        self.run_effects(effects);
        self.snapshots.send_replace(self.state.clone());
        Ok(())
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        let mut queue = VecDeque::from(effects);
        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::Fetch { generation } => {
                    let collection = Arc::clone(&self.collection);
                    self.spawn_call(info_span!("fetch_users", generation), async move {
                        ListEvent::FetchCompleted {
                            generation,
                            result: collection.list().await,
                        }
                    });
                }
                Effect::Create { session, draft } => {
                    let collection = Arc::clone(&self.collection);
                    self.spawn_call(info_span!("create_user", session), async move {
                        ListEvent::SaveCompleted {
                            session,
                            mode: FormMode::Create,
                            result: collection.create(&draft).await,
                        }
                    });
                }
                Effect::Update { session, id, draft } => {
                    let collection = Arc::clone(&self.collection);
                    self.spawn_call(info_span!("update_user", session, %id), async move {
                        ListEvent::SaveCompleted {
                            session,
                            mode: FormMode::Edit,
                            result: collection.update(&id, &draft).await,
                        }
                    });
                }
                Effect::ConfirmDelete(user) => {
                    // Blocks this task until answered.
                    if !self.confirm.confirm(DELETE_PROMPT) {
                        info!(id = %user.id, "Delete declined");
                        continue;
                    }
                    match self.state.apply(ListEvent::DeleteConfirmed(user)) {
                        Ok(more) => queue.extend(more),
                        Err(error) => warn!(%error, "Delete no longer allowed"),
                    }
                }
                Effect::Delete { id } => {
                    let collection = Arc::clone(&self.collection);
                    self.spawn_call(info_span!("delete_user", %id), async move {
                        let result = collection.delete(&id).await;
                        ListEvent::DeleteCompleted { id, result }
                    });
                }
                Effect::Notify(notification) => self.notifier.notify(notification),
            }
        }
    }

    fn spawn_call<F>(&self, span: Span, call: F)
    where
        F: Future<Output = ListEvent> + Send + 'static,
    {
        let completions = self.completion_sender.clone();
        tokio::spawn(
            async move {
                let event = call.await;
                if completions.send(event).is_err() {
                    debug!("Controller stopped before the call completed");
                }
            }
            .instrument(span),
        );
    }
}
