//! Adapters implementing the anchor management ports.

pub mod connection;
pub mod fs;
pub mod identity;
pub mod registration;
pub mod session;

pub use connection::{HttpConnection, InMemoryAnchorDirectory};
pub use identity::SessionIdentity;
pub use registration::RegistrationPoller;
pub use session::{FileSessionStore, StoredSession};
