//! Command flows, each driving the list controller the way a user would on
//! the list screen.
//!
//! Every flow returns `Ok(false)` when the operation did not go through for a
//! reason already shown to the user (local validation, unknown id). Server
//! failures are reported through the notifier instead.

use anyhow::Result;
use tracing::{info, warn};

use crate::cli::render;
use crate::controller::ListHandle;
use crate::model::{DraftField, User, UserDraft, UserId};

/// Loads the collection and prints the requested page.
pub async fn list(users: &ListHandle, page: usize) -> Result<bool> {
    users.mount().await?;
    users.settled().await?;
    let state = users.go_to_page(page).await?;
    if state.current_page() != page {
        info!(requested = page, shown = state.current_page(), "Page clamped");
    }
    println!("{}", render::page(&state.page()));
    Ok(true)
}

/// Opens the create form, fills it in and submits it.
pub async fn create(users: &ListHandle, draft: UserDraft) -> Result<bool> {
    users.mount().await?;
    users.settled().await?;
    users.open_create().await?;
    for field in DraftField::ALL {
        users.edit_field(field, draft.field(field)).await?;
    }
    save(users).await
}

/// Opens the edit form for `id`, applies `changes` and submits it.
pub async fn update(
    users: &ListHandle,
    id: &UserId,
    changes: Vec<(DraftField, String)>,
) -> Result<bool> {
    let Some(user) = find(users, id).await? else {
        return Ok(false);
    };
    users.open_edit(user).await?;
    for (field, value) in changes {
        users.edit_field(field, value).await?;
    }
    save(users).await
}

/// Deletes `id` after confirmation. A declined confirmation is not a failure.
pub async fn delete(users: &ListHandle, id: &UserId) -> Result<bool> {
    let Some(user) = find(users, id).await? else {
        return Ok(false);
    };
    let state = users.delete(user).await?;
    if !state.is_busy() {
        println!("Nothing deleted.");
        return Ok(true);
    }
    users.settled().await?;
    Ok(true)
}

async fn find(users: &ListHandle, id: &UserId) -> Result<Option<User>> {
    users.mount().await?;
    let state = users.settled().await?;
    let found = state.items().iter().find(|user| &user.id == id).cloned();
    if found.is_none() {
        warn!(%id, loaded = state.items().len(), "User not in collection");
        eprintln!("No user with id {id}");
    }
    Ok(found)
}

/// Submits the open form and waits for the save and the refresh after it.
async fn save(users: &ListHandle) -> Result<bool> {
    users.submit().await?;
    let state = users.settled().await?;
    match state.form() {
        None => Ok(true),
        Some(form) => {
            if !form.errors.is_empty() {
                eprintln!("{}", render::field_errors(&form.errors));
            }
            Ok(false)
        }
    }
}
