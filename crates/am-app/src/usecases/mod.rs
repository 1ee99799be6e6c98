//! Business logic use cases
//!
//! A step is its own use case when it wraps a single collaborator call that
//! the orchestrator may run again after a state transition:
//!
//! ```text
//! ManageOrchestrator
//!         ↓
//! LoadAnchorInfo   → fetch, repeated after every mutation
//! RemoveDevice     → one remove call, never retried automatically
//! EndSession       → clear + restart after removing the current device
//! ```

pub mod end_session;
pub mod load_anchor_info;
pub mod manage;
pub mod remove_device;

pub use end_session::EndSession;
pub use load_anchor_info::LoadAnchorInfo;
pub use remove_device::RemoveDevice;
