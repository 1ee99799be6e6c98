pub mod poller;

pub use poller::{RegistrationPoller, DEFAULT_POLL_INTERVAL};
