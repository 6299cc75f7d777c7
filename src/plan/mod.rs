//! Plan Module
//!
//! The command pipeline: raw request text is parsed into [`Action`]s,
//! compiled into a validated [`LogicalPlan`], and executed atomically
//! against a [`Bucket`](crate::store::Bucket).
//!
//! ```text
//! raw text ──parse──▶ Vec<Action> ──compile──▶ LogicalPlan ──execute──▶ Vec<OpResult>
//! ```
//!
//! Validation is front-loaded: parsing is infallible, compilation checks the
//! operation vocabulary and arities for the whole plan, and execution of a
//! compiled plan cannot fail. A request that fails to compile never touches
//! the store.

mod action;
mod logical;
mod op;

pub use action::{parse_text, Action};
pub use logical::LogicalPlan;
pub use op::{CtrOp, Op, OpResult, StrOp, ACK_TOKEN};
