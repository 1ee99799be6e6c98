//! Safety policy for deleting a device from an anchor.

pub mod guard;

pub use guard::{BlockedReason, RemovalDecision, RemovalGuard, SAME_DEVICE_WARNING};
