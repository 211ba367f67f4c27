//! Pure data structures for the user collection: records, drafts and form fields.

pub mod user;

pub use user::*;
