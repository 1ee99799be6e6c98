//! Terminal front-end for anchor management.
//!
//! `adapters` implements the presentation and wizard ports on top of a
//! line-oriented console; `bootstrap` loads configuration, sets up tracing
//! and assembles the orchestrator.

pub mod adapters;
pub mod bootstrap;
