//! # Host Core (The Host)
//!
//! The conversational side of Improv Battle. This crate interfaces with
//! `show_rules`, exposes the closed tool surface the governing language model
//! may call, renders the host persona from session snapshots, and wires one
//! session to an external speech pipeline.
//!
//! ## Core Components
//!
//! - **tools**: the fixed set of operations the agent may invoke - the only
//!   legal mutation path into a game session
//! - **host**: persona instruction rendering and the host binding handed to
//!   the speech pipeline
//! - **telemetry**: per-session usage accumulation, flushed at teardown
//! - **orchestrator**: session startup, metadata pre-seeding, and teardown
//!
//! ## Design Philosophy
//!
//! - **Narrow mutation path**: the agent is an untrusted free-text actor; it
//!   touches game state only through tool calls, each safe to repeat
//! - **Soft failure**: nothing in this crate ends a session on its own
//!   account - failures degrade to an inline message and play continues
//! - **Explicit snapshots**: persona instructions are a pure function of a
//!   session snapshot, rendered at a deliberate, visible point

pub mod host;
pub mod orchestrator;
pub mod telemetry;
pub mod tools;

pub use host::*;
pub use orchestrator::*;
pub use telemetry::*;
pub use tools::*;
