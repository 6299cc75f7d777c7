//! Store Module
//!
//! The process-wide shared state: two independent in-memory maps behind
//! one exclusive lock.
//!
//! ## Responsibilities
//! - Hold the string map and the counter map (disjoint namespaces)
//! - Serialize whole-plan execution through a single mutex
//! - Apply validated operations, one entry point per map kind
//! - Render the diagnostic snapshot

mod bucket;

pub use bucket::{Bucket, BucketState};
