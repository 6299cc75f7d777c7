//! Logical plans
//!
//! A [`LogicalPlan`] is the ordered, validated operation sequence compiled
//! from one request. Compilation is all-or-nothing; execution holds the
//! bucket's lock for the whole plan, so two plans never interleave their
//! operations.

use crate::error::{DiviError, Result};
use crate::store::Bucket;
use super::{parse_text, Action, Op, OpResult};

/// An ordered, non-empty sequence of validated operations
///
/// Built once per request and consumed exactly once by [`execute`].
///
/// [`execute`]: LogicalPlan::execute
#[derive(Debug)]
pub struct LogicalPlan {
    ops: Vec<Op>,
}

impl LogicalPlan {
    /// Compile parsed actions into a plan.
    ///
    /// If any action fails validation the whole plan fails and nothing from
    /// the request will ever execute.
    pub fn compile(actions: Vec<Action>) -> Result<Self> {
        if actions.is_empty() {
            return Err(DiviError::EmptyPlan);
        }

        let ops = actions
            .into_iter()
            .map(Op::compile)
            .collect::<Result<Vec<_>>>()?;

        Ok(LogicalPlan { ops })
    }

    /// Parse and compile a request body in one step.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::compile(parse_text(text))
    }

    /// Number of operations in the plan
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// A compiled plan is never empty
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Render the plan as one `OP:args` line per operation, for
    /// diagnostics and logging.
    pub fn explain(&self) -> String {
        self.ops
            .iter()
            .map(Op::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Execute the plan against a bucket, producing one result per
    /// operation in plan order.
    ///
    /// The bucket's lock is taken once and held until every operation has
    /// applied, which makes the plan an indivisible unit relative to any
    /// concurrently executing plan on the same bucket. The guard is
    /// released on all exit paths.
    pub fn execute(self, bucket: &Bucket) -> Vec<OpResult> {
        tracing::trace!("executing plan:\n{}", self.explain());

        let mut state = bucket.lock();

        let mut results = Vec::with_capacity(self.ops.len());
        for op in self.ops {
            let result = match op {
                Op::Str(op) => state.apply_str(op),
                Op::Ctr(op) => state.apply_ctr(op),
            };
            results.push(result);
        }

        results
    }
}
