//! # DiVI
//!
//! An in-memory key-value and counter store driven by a tiny line-oriented
//! command language, used to sync or coordinate small bits of state
//! between cluster nodes:
//! - Four operations: `GET`, `PUT`, `COUNT`, `INC`
//! - Whole-request atomicity: a request compiles to one plan and executes
//!   under one lock acquisition
//! - Validation before mutation: a request that fails to compile never
//!   touches state
//! - TCP front end with a worker thread pool and a JSON response envelope
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │              (acceptor + worker pool)                        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ request body (UTF-8 command text)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Action Parser                              │
//! │            (one Action per input line)                       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Vec<Action>
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Plan Compiler                               │
//! │     (vocabulary + arity checks, all-or-nothing)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ LogicalPlan
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    Executor                                  │
//! │   (locks the Bucket once, applies ops in order)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Vec<OpResult>
//!                       ▼
//!              {"results": [...]}
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;

pub mod network;
pub mod plan;
pub mod protocol;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use config::Config;
pub use error::{DiviError, Result};
pub use plan::{parse_text, LogicalPlan, Op, OpResult};
pub use store::Bucket;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of DiVI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
