//! Anchor management application layer
//!
//! This crate contains the management use cases and the orchestrator that
//! drives the management state machine against the ports.

pub mod usecases;

pub use usecases::manage::{
    ManageExit, ManageOrchestrator, ManageOrchestratorDeps, ManageOrchestratorError,
};
