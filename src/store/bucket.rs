//! Bucket implementation
//!
//! HashMap-based state store with a single `parking_lot::Mutex` guarding
//! both maps jointly.

use std::collections::HashMap;

use parking_lot::{Mutex, MutexGuard};

use crate::plan::{CtrOp, OpResult, StrOp};

/// The shared state store: one instance per process
///
/// Owns a string map and a counter map protected by one exclusive lock.
/// The lock is coarse on purpose: the executor holds it for an entire
/// plan, which is the whole concurrency contract of the system. All
/// mutation goes through [`BucketState`] behind the lock.
#[derive(Debug, Default)]
pub struct Bucket {
    state: Mutex<BucketState>,
}

/// The two maps, accessible only while holding the bucket's lock
#[derive(Debug, Default)]
pub struct BucketState {
    s_map: HashMap<String, String>,
    c_map: HashMap<String, u64>,
}

impl Bucket {
    /// Create an empty bucket
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the exclusive lock over both maps.
    ///
    /// Callers block until the lock is granted; there is no timeout. The
    /// guard releases on drop, on every exit path.
    pub(crate) fn lock(&self) -> MutexGuard<'_, BucketState> {
        self.state.lock()
    }

    /// Render a diagnostic snapshot of the non-empty maps.
    ///
    /// Each map renders as a labeled block (`s_map:` / `c_map:`) of
    /// `key=value` lines and is omitted entirely when empty. Blocks are
    /// concatenated directly, with nothing between the last line of one
    /// and the header of the next. Entry order within a block is map
    /// iteration order, not insertion order.
    pub fn dump(&self) -> String {
        let state = self.state.lock();
        let mut out = String::new();

        if !state.s_map.is_empty() {
            out.push_str("s_map:");
            for (key, value) in &state.s_map {
                out.push('\n');
                out.push_str(key);
                out.push('=');
                out.push_str(value);
            }
        }

        if !state.c_map.is_empty() {
            out.push_str("c_map:");
            for (key, count) in &state.c_map {
                out.push('\n');
                out.push_str(key);
                out.push('=');
                out.push_str(&count.to_string());
            }
        }

        out
    }
}

impl BucketState {
    /// Apply a string-map operation.
    ///
    /// `GET` on a missing key reads as the empty string and does not
    /// create an entry.
    pub fn apply_str(&mut self, op: StrOp) -> OpResult {
        match op {
            StrOp::Get { key } => {
                OpResult::Text(self.s_map.get(&key).cloned().unwrap_or_default())
            }
            StrOp::Put { key, value } => {
                self.s_map.insert(key, value);
                OpResult::Ack
            }
        }
    }

    /// Apply a counter-map operation.
    ///
    /// `COUNT` on a missing key reads as zero and does not create an
    /// entry; `INC` creates the counter at zero before incrementing.
    pub fn apply_ctr(&mut self, op: CtrOp) -> OpResult {
        match op {
            CtrOp::Count { key } => {
                OpResult::Counter(self.c_map.get(&key).copied().unwrap_or(0))
            }
            CtrOp::Inc { key } => {
                let counter = self.c_map.entry(key).or_insert(0);
                *counter += 1;
                OpResult::Counter(*counter)
            }
        }
    }
}
