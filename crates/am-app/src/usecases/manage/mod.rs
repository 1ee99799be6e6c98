mod context;
mod orchestrator;

pub use context::ManageContext;
pub use orchestrator::{ManageExit, ManageOrchestrator, ManageOrchestratorDeps, ManageOrchestratorError};
