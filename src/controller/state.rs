//! # List State Machine
//!
//! [`ListState`] holds everything the list screen shows: the loaded collection,
//! the current page, and the create/edit form. It changes only through
//! [`ListState::apply`], which takes a [`ListEvent`] (a user intent or the
//! completion of a network call) and returns the [`Effect`]s the runtime must
//! carry out. Nothing in here performs I/O.
//!
//! ## Phases
//!
//! | Phase       | Meaning                                   |
//! |-------------|-------------------------------------------|
//! | `Idle`      | list shown, no form, nothing loading      |
//! | `Loading`   | a fetch of the collection is outstanding  |
//! | `ModalOpen` | the create or edit form is open           |
//!
//! A save or delete in flight additionally marks the state busy; a second
//! submit or delete is rejected with [`ListError::Busy`] until it completes.
//!
//! ## Stale completions
//!
//! Every fetch gets a new generation number and only the completion carrying
//! the latest one is applied. Every opening of the form gets a new session
//! number, so a save that completes after its form was closed still notifies
//! and re-fetches but leaves any newer form alone.

use tracing::{debug, info};

use crate::clients::ClientError;
use crate::controller::error::ListError;
use crate::controller::ports::Notification;
use crate::model::{DraftField, User, UserDraft, UserId};
use crate::pagination::{clamp_page, total_pages, window, PageWindow, PAGE_SIZE};
use crate::validation::{validate, ValidationErrors};

/// Prompt shown before a delete is sent.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this user?";

/// Shown when a failed save carries no server message.
pub const GENERIC_FAILURE: &str = "An error occurred";

/// Which kind of save the form performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

impl FormMode {
    /// `"create"` / `"update"`, as used in failure notices.
    pub fn verb(&self) -> &'static str {
        match self {
            FormMode::Create => "create",
            FormMode::Edit => "update",
        }
    }

    /// `"created"` / `"updated"`, as used in success notices.
    pub fn past_tense(&self) -> &'static str {
        match self {
            FormMode::Create => "created",
            FormMode::Edit => "updated",
        }
    }
}

/// The open create/edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub session: u64,
    pub mode: FormMode,
    pub draft: UserDraft,
    pub errors: ValidationErrors,
}

/// The mutation currently awaiting the server.
#[derive(Debug, Clone, PartialEq)]
pub enum InFlight {
    Save { session: u64, mode: FormMode },
    Delete { id: UserId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    ModalOpen(FormMode),
}

/// Inputs to the state machine.
#[derive(Debug, Clone)]
pub enum ListEvent {
    Mount,
    OpenCreate,
    OpenEdit(User),
    CloseModal,
    EditField { field: DraftField, value: String },
    Submit,
    RequestDelete(User),
    /// The user answered yes to [`DELETE_PROMPT`].
    DeleteConfirmed(User),
    GoToPage(usize),
    FetchCompleted {
        generation: u64,
        result: Result<Vec<User>, ClientError>,
    },
    SaveCompleted {
        session: u64,
        mode: FormMode,
        result: Result<User, ClientError>,
    },
    DeleteCompleted {
        id: UserId,
        result: Result<(), ClientError>,
    },
}

impl ListEvent {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            ListEvent::Mount => "mount",
            ListEvent::OpenCreate => "open_create",
            ListEvent::OpenEdit(_) => "open_edit",
            ListEvent::CloseModal => "close_modal",
            ListEvent::EditField { .. } => "edit_field",
            ListEvent::Submit => "submit",
            ListEvent::RequestDelete(_) => "request_delete",
            ListEvent::DeleteConfirmed(_) => "delete_confirmed",
            ListEvent::GoToPage(_) => "go_to_page",
            ListEvent::FetchCompleted { .. } => "fetch_completed",
            ListEvent::SaveCompleted { .. } => "save_completed",
            ListEvent::DeleteCompleted { .. } => "delete_completed",
        }
    }
}

/// Work the runtime performs on behalf of the state machine, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Fetch { generation: u64 },
    Create { session: u64, draft: UserDraft },
    Update { session: u64, id: UserId, draft: UserDraft },
    /// Ask [`DELETE_PROMPT`]; a yes answer comes back as [`ListEvent::DeleteConfirmed`].
    ConfirmDelete(User),
    Delete { id: UserId },
    Notify(Notification),
}

/// State of the user list screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    items: Vec<User>,
    is_loading: bool,
    current_page: usize,
    editing_target: Option<User>,
    form: Option<FormState>,
    in_flight: Option<InFlight>,
    fetch_generation: u64,
    next_session: u64,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_loading: false,
            current_page: 1,
            editing_target: None,
            form: None,
            in_flight: None,
            fetch_generation: 0,
            next_session: 0,
        }
    }
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The whole loaded collection, in server order.
    pub fn items(&self) -> &[User] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// The record being edited; `None` when creating or when no form is open.
    pub fn editing_target(&self) -> Option<&User> {
        self.editing_target.as_ref()
    }

    pub fn form(&self) -> Option<&FormState> {
        self.form.as_ref()
    }

    pub fn in_flight(&self) -> Option<&InFlight> {
        self.in_flight.as_ref()
    }

    pub fn fetch_generation(&self) -> u64 {
        self.fetch_generation
    }

    pub fn phase(&self) -> Phase {
        match (&self.form, self.is_loading) {
            (Some(form), _) => Phase::ModalOpen(form.mode),
            (None, true) => Phase::Loading,
            (None, false) => Phase::Idle,
        }
    }

    /// A save or delete is awaiting the server.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Nothing is loading and no mutation is in flight.
    pub fn is_settled(&self) -> bool {
        !self.is_loading && self.in_flight.is_none()
    }

    /// The visible page of the collection.
    pub fn page(&self) -> PageWindow<'_, User> {
        window(&self.items, PAGE_SIZE, self.current_page)
    }

    /// Applies one event and returns the effects to run.
    ///
    /// # Errors
    ///
    /// Returns a [`ListError`] when the intent is not allowed in the current
    /// state. The state is left unchanged in that case.
    pub fn apply(&mut self, event: ListEvent) -> Result<Vec<Effect>, ListError> {
        match event {
            ListEvent::Mount => Ok(vec![self.start_fetch()]),
            ListEvent::OpenCreate => {
                self.ensure_idle()?;
                self.open_form(FormMode::Create, UserDraft::default(), None);
                Ok(Vec::new())
            }
            ListEvent::OpenEdit(user) => {
                self.ensure_idle()?;
                let draft = UserDraft::from(&user);
                self.open_form(FormMode::Edit, draft, Some(user));
                Ok(Vec::new())
            }
            ListEvent::CloseModal => {
                if self.form.is_none() {
                    return Err(ListError::NoForm);
                }
                self.close_form();
                Ok(Vec::new())
            }
            ListEvent::EditField { field, value } => {
                let form = self.form.as_mut().ok_or(ListError::NoForm)?;
                form.draft.set_field(field, value);
                form.errors.remove(field);
                Ok(Vec::new())
            }
            ListEvent::Submit => self.submit(),
            ListEvent::RequestDelete(user) => {
                self.ensure_idle()?;
                Ok(vec![Effect::ConfirmDelete(user)])
            }
            ListEvent::DeleteConfirmed(user) => {
                self.ensure_idle()?;
                let id = user.id;
                self.in_flight = Some(InFlight::Delete { id: id.clone() });
                Ok(vec![Effect::Delete { id }])
            }
            ListEvent::GoToPage(page) => {
                self.current_page = clamp_page(page, total_pages(self.items.len(), PAGE_SIZE));
                Ok(Vec::new())
            }
            ListEvent::FetchCompleted { generation, result } => {
                Ok(self.fetch_completed(generation, result))
            }
            ListEvent::SaveCompleted {
                session,
                mode,
                result,
            } => Ok(self.save_completed(session, mode, result)),
            ListEvent::DeleteCompleted { id, result } => Ok(self.delete_completed(id, result)),
        }
    }

    fn ensure_idle(&self) -> Result<(), ListError> {
        if self.is_busy() {
            Err(ListError::Busy)
        } else if self.form.is_some() {
            Err(ListError::FormOpen)
        } else if self.is_loading {
            Err(ListError::Loading)
        } else {
            Ok(())
        }
    }

    fn open_form(&mut self, mode: FormMode, draft: UserDraft, target: Option<User>) {
        self.next_session += 1;
        self.form = Some(FormState {
            session: self.next_session,
            mode,
            draft,
            errors: ValidationErrors::new(),
        });
        self.editing_target = target;
    }

    fn close_form(&mut self) {
        self.form = None;
        self.editing_target = None;
    }

    fn start_fetch(&mut self) -> Effect {
        self.fetch_generation += 1;
        self.is_loading = true;
        Effect::Fetch {
            generation: self.fetch_generation,
        }
    }

    fn submit(&mut self) -> Result<Vec<Effect>, ListError> {
        if self.is_busy() {
            return Err(ListError::Busy);
        }
        let form = self.form.as_mut().ok_or(ListError::NoForm)?;

        let errors = validate(&form.draft);
        if !errors.is_empty() {
            debug!(errors = %errors, "Draft rejected locally");
            form.errors = errors;
            return Ok(Vec::new());
        }
        form.errors.clear();

        let session = form.session;
        let draft = form.draft.clone();
        let (mode, effect) = match &self.editing_target {
            Some(target) => (
                FormMode::Edit,
                Effect::Update {
                    session,
                    id: target.id.clone(),
                    draft,
                },
            ),
            None => (FormMode::Create, Effect::Create { session, draft }),
        };
        self.in_flight = Some(InFlight::Save { session, mode });
        Ok(vec![effect])
    }

    fn fetch_completed(
        &mut self,
        generation: u64,
        result: Result<Vec<User>, ClientError>,
    ) -> Vec<Effect> {
        if generation != self.fetch_generation {
            debug!(generation, latest = self.fetch_generation, "Discarding stale fetch");
            return Vec::new();
        }
        self.is_loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.current_page =
                    clamp_page(self.current_page, total_pages(self.items.len(), PAGE_SIZE));
                info!(count = self.items.len(), page = self.current_page, "Users loaded");
                Vec::new()
            }
            Err(error) => vec![Effect::Notify(Notification::error(format!(
                "Failed to fetch users: {}",
                error.describe()
            )))],
        }
    }

    fn save_completed(
        &mut self,
        session: u64,
        mode: FormMode,
        result: Result<User, ClientError>,
    ) -> Vec<Effect> {
        if matches!(&self.in_flight, Some(InFlight::Save { session: s, .. }) if *s == session) {
            self.in_flight = None;
        }
        let current_form = self.form.as_ref().is_some_and(|form| form.session == session);

        match result {
            Ok(user) => {
                info!(id = %user.id, mode = mode.verb(), "User saved");
                if current_form {
                    self.close_form();
                }
                let notice = Notification::success(format!(
                    "User {} successfully!",
                    mode.past_tense()
                ));
                vec![Effect::Notify(notice), self.start_fetch()]
            }
            Err(error) => {
                let reason = error.server_message().unwrap_or(GENERIC_FAILURE);
                let notice =
                    Notification::error(format!("Failed to {} user: {reason}", mode.verb()));
                if let (true, Some(field_errors), Some(form)) =
                    (current_form, error.field_errors(), self.form.as_mut())
                {
                    form.errors.merge(field_errors);
                }
                vec![Effect::Notify(notice)]
            }
        }
    }

    fn delete_completed(&mut self, id: UserId, result: Result<(), ClientError>) -> Vec<Effect> {
        if matches!(&self.in_flight, Some(InFlight::Delete { id: pending }) if *pending == id) {
            self.in_flight = None;
        }
        match result {
            Ok(()) => {
                info!(%id, "User deleted");
                vec![
                    Effect::Notify(Notification::success("User deleted successfully!")),
                    self.start_fetch(),
                ]
            }
            Err(error) => vec![Effect::Notify(Notification::error(format!(
                "Failed to delete user: {}",
                error.describe()
            )))],
        }
    }
}
