//! # User Admin
//!
//! > **Client-side state for a paginated, editable user list.**
//!
//! This crate manages the user records of a remote collection resource
//! (`GET/POST/PUT/DELETE /users`). Its core is the list controller: one Tokio
//! task that owns the loaded collection, the current page and the create/edit
//! form, and that re-fetches the whole collection after every successful
//! mutation.
//!
//! ## 🏗️ Design
//!
//! ### State machine plus actor
//! All transitions live in [`ListState::apply`](controller::ListState::apply),
//! a pure function from an event to a list of effects (fetch, create, update,
//! delete, confirm, notify). The [`ListActor`](controller::ListActor) runs those
//! effects. Network calls are spawned and their results come back through the
//! actor's own mailbox, so the state is only ever touched by one task and needs
//! no lock.
//!
//! ### Stale results
//! Each fetch carries a generation number and each opening of the form a
//! session number. Late fetch results are dropped; a late save still notifies
//! and refreshes but never writes into a newer form.
//!
//! ### Errors
//! Each layer has its own `thiserror` enum: [`ClientError`](clients::ClientError)
//! for the remote resource, [`ListError`](controller::ListError) for rejected
//! intents, [`LifecycleError`](lifecycle::LifecycleError) for startup and
//! shutdown. Field-level messages, local or from the server, share one
//! [`ValidationErrors`](validation::ValidationErrors) type.
//!
//! ### Observability
//! `tracing` everywhere, with one span per network call. See
//! [`lifecycle::tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`model`], [`validation`], [`pagination`])
//! - **Role**: records and drafts, the field validator, and page windowing.
//! - **Key items**: [`User`](model::User), [`UserDraft`](model::UserDraft),
//!   [`validate`](validation::validate), [`window`](pagination::window).
//!
//! ### 2. The Interface ([`clients`])
//! - **Role**: the [`UserCollection`](clients::UserCollection) trait, its HTTP
//!   adapter and an expectation-driven mock.
//!
//! ### 3. The Engine ([`controller`])
//! - **Role**: the list state machine, the actor that runs it and the
//!   [`ListHandle`](controller::ListHandle) used to drive it.
//!
//! ### 4. The Orchestrator ([`lifecycle`], [`config`])
//! - **Role**: wires client, notifier and confirmation into a running
//!   [`AdminSystem`](lifecycle::AdminSystem) and shuts it down.
//!
//! ### 5. The Front End ([`cli`])
//! - **Role**: the `user-admin` commands, table rendering and prompts.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! USER_ADMIN_BASE_URL=http://localhost:8080/api RUST_LOG=info cargo run -- list
//! cargo test
//! ```

pub mod cli;
pub mod clients;
pub mod config;
pub mod controller;
pub mod lifecycle;
pub mod model;
pub mod pagination;
pub mod validation;
