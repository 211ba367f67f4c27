//! # user-admin
//!
//! Terminal front end for the user list controller. See [`user_admin::cli`].
//!
//! ```bash
//! user-admin list --page 2
//! user-admin create --name "Ann Lee" --email ann@example.com --status Pending
//! user-admin update 7 --status Inactive
//! user-admin delete 7
//! ```

use std::process::ExitCode;

use clap::Parser;
use user_admin::cli::{self, Cli};
use user_admin::lifecycle::setup_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    setup_tracing();
    cli::run(Cli::parse()).await
}
