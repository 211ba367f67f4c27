//! Clients for the remote user collection.
//!
//! - [`UserCollection`]: the trait the controller calls into.
//! - [`HttpUserClient`]: the reqwest adapter for `GET/POST/PUT/DELETE /users`.
//! - [`mock`]: an expectation-driven stand-in for tests.

pub mod collection;
pub mod error;
pub mod http_client;
pub mod mock;

pub use collection::*;
pub use error::*;
pub use http_client::*;
