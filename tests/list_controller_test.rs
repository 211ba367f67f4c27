use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use user_admin::clients::mock::{Call, MockUserCollection};
use user_admin::clients::{ClientError, UserCollection};
use user_admin::controller::{
    FixedConfirm, FormMode, ListActor, ListError, Notification, Phase, RecordingNotifier,
};
use user_admin::lifecycle::AdminSystem;
use user_admin::model::{DraftField, User, UserDraft, UserId, UserStatus};
use user_admin::validation::{ValidationErrors, EMAIL_REQUIRED, NAME_REQUIRED};

fn users(count: u64) -> Vec<User> {
    (1..=count)
        .map(|n| User::new(n, format!("User {n}"), format!("u{n}@x.com"), UserStatus::Active))
        .collect()
}

/// Real controller over a mocked collection, with recording side channels.
fn start(
    collection: Arc<dyn UserCollection>,
    confirm: &FixedConfirm,
) -> (AdminSystem, RecordingNotifier) {
    let notifier = RecordingNotifier::new();
    let system = AdminSystem::new(
        collection,
        Arc::new(notifier.clone()),
        Arc::new(confirm.clone()),
    );
    (system, notifier)
}

#[tokio::test]
async fn test_mount_loads_and_pages() {
    let mock = MockUserCollection::new();
    mock.expect_list().return_ok(users(23));
    let (system, notifier) = start(Arc::new(mock.clone()), &FixedConfirm::new(true));

    system.users.mount().await.unwrap();
    let state = system.users.settled().await.unwrap();
    assert_eq!(state.items().len(), 23);
    assert_eq!(state.phase(), Phase::Idle);

    let state = system.users.go_to_page(2).await.unwrap();
    let page = state.page();
    assert_eq!(page.items.first().map(|u| u.id.clone()), Some(UserId::from(11u64)));
    assert_eq!(page.items.last().map(|u| u.id.clone()), Some(UserId::from(20u64)));
    assert_eq!(page.summary().as_deref(), Some("Showing 11 to 20 of 23 entries"));

    assert!(notifier.notifications().is_empty());
    system.shutdown().await.unwrap();
    mock.verify();
}

#[tokio::test]
async fn test_failed_fetch_is_notified() {
    let mock = MockUserCollection::new();
    mock.expect_list()
        .return_err(ClientError::transport("Network Error"));
    let (system, notifier) = start(Arc::new(mock.clone()), &FixedConfirm::new(true));

    system.users.mount().await.unwrap();
    let state = system.users.settled().await.unwrap();

    assert!(!state.is_loading());
    assert_eq!(system.users.snapshot(), state);
    let notifications = notifier.notifications();
    assert_eq!(
        notifications,
        vec![Notification::error("Failed to fetch users: Network Error")]
    );
    assert!(notifications[0].is_error());
    assert_eq!(notifications[0].message(), "Failed to fetch users: Network Error");
    system.shutdown().await.unwrap();
    mock.verify();
}

/// Submitting an empty create form never reaches the network.
#[tokio::test]
async fn test_empty_create_form_is_rejected_locally() {
    let mock = MockUserCollection::new();
    mock.expect_list().return_ok(Vec::new());
    let (system, notifier) = start(Arc::new(mock.clone()), &FixedConfirm::new(true));

    system.users.mount().await.unwrap();
    system.users.settled().await.unwrap();
    system.users.open_create().await.unwrap();
    let state = system.users.submit().await.unwrap();

    assert_eq!(state.phase(), Phase::ModalOpen(FormMode::Create));
    let errors = &state.form().unwrap().errors;
    assert_eq!(errors.get(DraftField::Name), Some(NAME_REQUIRED));
    assert_eq!(errors.get(DraftField::Email), Some(EMAIL_REQUIRED));

    assert_eq!(mock.calls(), vec![Call::List]);
    assert!(notifier.notifications().is_empty());
    system.shutdown().await.unwrap();
    mock.verify();
}

#[tokio::test]
async fn test_create_closes_form_and_refetches() {
    let created = User::new(1u64, "Ann", "ann@x.com", UserStatus::Pending);
    let draft = UserDraft::new("Ann", "ann@x.com", "Pending");

    let mock = MockUserCollection::new();
    mock.expect_list().return_ok(Vec::new());
    mock.expect_create().return_ok(created.clone());
    mock.expect_list().return_ok(vec![created.clone()]);
    let (system, notifier) = start(Arc::new(mock.clone()), &FixedConfirm::new(true));

    system.users.mount().await.unwrap();
    system.users.settled().await.unwrap();
    system.users.open_create().await.unwrap();
    system.users.edit_field(DraftField::Name, "Ann").await.unwrap();
    system.users.edit_field(DraftField::Email, "ann@x.com").await.unwrap();
    system.users.edit_field(DraftField::Status, "Pending").await.unwrap();
    system.users.submit().await.unwrap();
    let state = system.users.settled().await.unwrap();

    assert_eq!(state.phase(), Phase::Idle);
    assert_eq!(state.items(), &[created]);
    assert_eq!(
        mock.calls(),
        vec![Call::List, Call::Create(draft), Call::List]
    );
    assert_eq!(
        notifier.notifications(),
        vec![Notification::success("User created successfully!")]
    );
    system.shutdown().await.unwrap();
    mock.verify();
}

#[tokio::test]
async fn test_update_sends_the_edited_draft() {
    let all = users(2);
    let target = all[1].clone();
    let updated = User::new(2u64, "User 2", "u2@x.com", UserStatus::Inactive);

    let mock = MockUserCollection::new();
    mock.expect_list().return_ok(all.clone());
    mock.expect_update(target.id.clone()).return_ok(updated.clone());
    mock.expect_list().return_ok(vec![all[0].clone(), updated]);
    let (system, notifier) = start(Arc::new(mock.clone()), &FixedConfirm::new(true));

    system.users.mount().await.unwrap();
    system.users.settled().await.unwrap();
    let state = system.users.open_edit(target.clone()).await.unwrap();
    assert_eq!(state.editing_target(), Some(&target));

    system.users.edit_field(DraftField::Status, "Inactive").await.unwrap();
    system.users.submit().await.unwrap();
    let state = system.users.settled().await.unwrap();

    assert!(state.form().is_none());
    assert_eq!(state.items()[1].status, UserStatus::Inactive);
    assert_eq!(
        mock.calls()[1],
        Call::Update(target.id, UserDraft::new("User 2", "u2@x.com", "Inactive"))
    );
    assert_eq!(
        notifier.notifications(),
        vec![Notification::success("User updated successfully!")]
    );
    system.shutdown().await.unwrap();
    mock.verify();
}

#[tokio::test]
async fn test_server_field_errors_keep_the_form_open() {
    let mock = MockUserCollection::new();
    mock.expect_list().return_ok(Vec::new());
    mock.expect_create().return_err(ClientError::Validation {
        server_message: Some("Validation failed".to_string()),
        field_errors: ValidationErrors::from_server([("email", "Email already exists")]),
    });
    let (system, notifier) = start(Arc::new(mock.clone()), &FixedConfirm::new(true));

    system.users.mount().await.unwrap();
    system.users.settled().await.unwrap();
    system.users.open_create().await.unwrap();
    system.users.edit_field(DraftField::Name, "Ann").await.unwrap();
    system.users.edit_field(DraftField::Email, "ann@x.com").await.unwrap();
    system.users.submit().await.unwrap();
    let state = system.users.settled().await.unwrap();

    let form = state.form().expect("form stays open");
    assert_eq!(form.errors.get(DraftField::Email), Some("Email already exists"));
    assert_eq!(form.draft.name, "Ann");
    assert_eq!(
        notifier.notifications(),
        vec![Notification::error("Failed to create user: Validation failed")]
    );
    assert_eq!(mock.calls().len(), 2);
    system.shutdown().await.unwrap();
    mock.verify();
}

/// Confirmed delete: one delete with the record's id, one re-fetch, one notice.
#[tokio::test]
async fn test_confirmed_delete_refetches() {
    let all = users(3);
    let target = all[1].clone();
    let remaining = vec![all[0].clone(), all[2].clone()];

    let mock = MockUserCollection::new();
    mock.expect_list().return_ok(all.clone());
    mock.expect_delete(target.id.clone()).return_ok(());
    mock.expect_list().return_ok(remaining.clone());
    let confirm = FixedConfirm::new(true);
    let (system, notifier) = start(Arc::new(mock.clone()), &confirm);

    system.users.mount().await.unwrap();
    system.users.settled().await.unwrap();
    system.users.delete(target.clone()).await.unwrap();
    let state = system.users.settled().await.unwrap();

    assert_eq!(confirm.asked(), 1);
    assert_eq!(state.items(), remaining.as_slice());
    assert_eq!(
        mock.calls(),
        vec![Call::List, Call::Delete(target.id), Call::List]
    );
    assert_eq!(
        notifier.notifications(),
        vec![Notification::success("User deleted successfully!")]
    );
    system.shutdown().await.unwrap();
    mock.verify();
}

#[tokio::test]
async fn test_declined_delete_changes_nothing() {
    let all = users(3);
    let mock = MockUserCollection::new();
    mock.expect_list().return_ok(all.clone());
    let confirm = FixedConfirm::new(false);
    let (system, notifier) = start(Arc::new(mock.clone()), &confirm);

    system.users.mount().await.unwrap();
    let before = system.users.settled().await.unwrap();
    let after = system.users.delete(all[0].clone()).await.unwrap();

    assert_eq!(confirm.asked(), 1);
    assert_eq!(after, before);
    assert_eq!(mock.calls(), vec![Call::List]);
    assert!(notifier.notifications().is_empty());
    system.shutdown().await.unwrap();
    mock.verify();
}

#[tokio::test]
async fn test_failed_delete_is_notified_without_refetch() {
    let all = users(1);
    let mock = MockUserCollection::new();
    mock.expect_list().return_ok(all.clone());
    mock.expect_delete(all[0].id.clone())
        .return_err(ClientError::Transport {
            message: "Request failed with status code 404".to_string(),
            server_message: Some("User not found".to_string()),
        });
    let (system, notifier) = start(Arc::new(mock.clone()), &FixedConfirm::new(true));

    system.users.mount().await.unwrap();
    system.users.settled().await.unwrap();
    system.users.delete(all[0].clone()).await.unwrap();
    let state = system.users.settled().await.unwrap();

    assert_eq!(state.items(), all.as_slice());
    assert_eq!(
        notifier.notifications(),
        vec![Notification::error("Failed to delete user: User not found")]
    );
    system.shutdown().await.unwrap();
    mock.verify();
}

/// Collection whose `create` waits until the test releases it.
struct GatedCreate {
    inner: MockUserCollection,
    gate: Arc<Semaphore>,
}

#[async_trait]
impl UserCollection for GatedCreate {
    async fn list(&self) -> Result<Vec<User>, ClientError> {
        self.inner.list().await
    }

    async fn get(&self, id: &UserId) -> Result<User, ClientError> {
        self.inner.get(id).await
    }

    async fn create(&self, draft: &UserDraft) -> Result<User, ClientError> {
        let _permit = self.gate.acquire().await.expect("gate closed");
        self.inner.create(draft).await
    }

    async fn update(&self, id: &UserId, draft: &UserDraft) -> Result<User, ClientError> {
        self.inner.update(id, draft).await
    }

    async fn delete(&self, id: &UserId) -> Result<(), ClientError> {
        self.inner.delete(id).await
    }
}

#[tokio::test]
async fn test_busy_controller_rejects_second_submit() {
    let created = User::new(1u64, "Ann", "ann@x.com", UserStatus::Active);
    let mock = MockUserCollection::new();
    mock.expect_list().return_ok(Vec::new());
    mock.expect_create().return_ok(created.clone());
    mock.expect_list().return_ok(vec![created]);

    let gate = Arc::new(Semaphore::new(0));
    let collection = GatedCreate {
        inner: mock.clone(),
        gate: Arc::clone(&gate),
    };
    let (system, notifier) = start(Arc::new(collection), &FixedConfirm::new(true));

    system.users.mount().await.unwrap();
    system.users.settled().await.unwrap();
    system.users.open_create().await.unwrap();
    system.users.edit_field(DraftField::Name, "Ann").await.unwrap();
    system.users.edit_field(DraftField::Email, "ann@x.com").await.unwrap();

    let state = system.users.submit().await.unwrap();
    assert!(state.is_busy());
    assert_eq!(system.users.submit().await, Err(ListError::Busy));
    assert_eq!(system.users.open_create().await, Err(ListError::Busy));

    gate.add_permits(1);
    let state = system.users.settled().await.unwrap();
    assert!(!state.is_busy());
    assert_eq!(state.items().len(), 1);
    assert_eq!(notifier.notifications().len(), 1);

    system.shutdown().await.unwrap();
    mock.verify();
}

#[tokio::test]
async fn test_handle_reports_stopped_controller() {
    let mock = MockUserCollection::new();
    let (actor, handle) = ListActor::new(
        4,
        Arc::new(mock),
        Arc::new(RecordingNotifier::new()),
        Arc::new(FixedConfirm::new(true)),
    );
    drop(actor);

    assert_eq!(handle.mount().await, Err(ListError::ActorClosed));
}
