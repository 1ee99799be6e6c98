//! # am-core
//!
//! Core domain models and device lifecycle rules for anchor management.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! the device set model, the recovery posture evaluator, the removal guard and the
//! management state machine, plus the ports the application layer talks through.

// Public module exports
pub mod anchor;
pub mod config;
pub mod device;
pub mod manage;
pub mod ports;
pub mod recovery;
pub mod registration;
pub mod removal;

// Re-export commonly used types at the crate root
pub use anchor::Anchor;
pub use config::AppConfig;
pub use device::{Device, DeviceAlias, DevicePartition, DevicePurpose, DeviceSet, PublicKey};
pub use manage::{ManageCommand, ManageState, ManageView};
pub use recovery::RecoveryPosture;
pub use registration::{AnchorInfo, DeviceRegistration};
pub use removal::{RemovalDecision, RemovalGuard};
