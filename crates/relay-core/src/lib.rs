//! `relay-core` is the action pipeline between an AI assistant and a Roblox
//! Studio plugin.
//!
//! ```text
//! reply text ──► extract ──► validate ──► Action
//!                                            │
//! Orchestrator: user turn → prompt → Generator → Action → assistant turn
//!                                                        → PendingAction
//! ```

pub mod action;
pub mod config;
pub mod error;
pub mod events;
pub mod extract;
pub mod generator;
pub mod orchestrator;
pub mod paths;
pub mod store;
pub mod types;
pub mod validate;

pub use action::{Action, ActionKind, ScriptType};
pub use error::{ProviderError, RelayError, Result, SchemaViolation};
pub use orchestrator::Orchestrator;
