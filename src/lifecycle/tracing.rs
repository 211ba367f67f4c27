//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! Levels come from `RUST_LOG`. Output is compact, hides module paths
//! (`with_target(false)`) and goes to stderr so command output on stdout stays
//! clean.
//!
//! ```bash
//! # Controller transitions and HTTP calls
//! RUST_LOG=info user-admin list
//!
//! # Every applied event, request and response size
//! RUST_LOG=debug user-admin create --name Ann --email ann@example.com
//!
//! # Only the HTTP adapter
//! RUST_LOG=user_admin::clients=debug user-admin list
//! ```
//!
//! ## What Gets Traced
//!
//! - **Controller lifecycle**: start, stop, and how many users were loaded
//! - **Events**: each applied event at `debug`, rejected intents at `warn`
//! - **Network calls**: one span per call (`fetch_users`, `create_user`,
//!   `update_user`, `delete_user`) carrying the fetch generation, form session
//!   or user id
//! - **HTTP**: status codes of rejected requests, with the mapped error
//!
//! With `RUST_LOG=info` a confirmed delete reads:
//!
//! ```text
//! INFO List controller started
//! INFO fetch_users{generation=1}:list: Users loaded count=23 page=1
//! INFO Confirmation prompt="Are you sure you want to delete this user?" answer=true
//! INFO User deleted id=7
//! INFO fetch_users{generation=2}:list: Users loaded count=22 page=1
//! ```

/// Installs the global subscriber. Call once, at startup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
