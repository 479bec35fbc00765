//! Typed records persisted as JSON through a `storage::Storage`.
//! - `record::PersistentRecord` is the save/load contract every record implements.
//! - `session::Session` caches the authenticated court-site session.

pub mod errors;
pub mod record;
pub mod session;

pub use errors::ModelError;
pub use record::PersistentRecord;
pub use session::Session;
