//! Operation model
//!
//! The closed vocabulary of executable operations and their results. Each
//! operation targets exactly one of the bucket's two maps, and the variant
//! alone decides which one; nothing outside this type routes an operation.
//!
//! ## Vocabulary
//! - `GET key` - read from the string map (absent keys read as `""`)
//! - `PUT key value` - unconditional write to the string map
//! - `COUNT key` - read from the counter map (absent keys read as `0`)
//! - `INC key` - increment a counter, creating it at `0` first

use std::fmt;

use crate::error::{DiviError, Result};
use super::Action;

/// Acknowledgement token returned by a successful `PUT`
pub const ACK_TOKEN: &str = "$ok";

/// An operation on the string map
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrOp {
    /// Read a value by key
    Get { key: String },

    /// Set a key to a value, overwriting any prior value
    Put { key: String, value: String },
}

/// An operation on the counter map
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CtrOp {
    /// Read a counter by key
    Count { key: String },

    /// Increment a counter by one
    Inc { key: String },
}

/// A validated, executable operation
///
/// Constructed only by [`Op::compile`], so an `Op` in hand always carries
/// the right number of arguments for its vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// Targets the bucket's string map
    Str(StrOp),

    /// Targets the bucket's counter map
    Ctr(CtrOp),
}

impl Op {
    /// Compile one action into an operation.
    ///
    /// Fails on an empty operation token, a token outside the vocabulary
    /// (exact, case-sensitive match), or a wrong argument count. The
    /// offending token and line number travel with the error.
    pub fn compile(action: Action) -> Result<Op> {
        let Action { op, args, line } = action;

        if op.is_empty() {
            return Err(DiviError::MalformedLine { line });
        }

        match op.as_str() {
            "GET" => {
                let [key] = take_args("GET", args, line)?;
                Ok(Op::Str(StrOp::Get { key }))
            }
            "PUT" => {
                let [key, value] = take_args("PUT", args, line)?;
                Ok(Op::Str(StrOp::Put { key, value }))
            }
            "COUNT" => {
                let [key] = take_args("COUNT", args, line)?;
                Ok(Op::Ctr(CtrOp::Count { key }))
            }
            "INC" => {
                let [key] = take_args("INC", args, line)?;
                Ok(Op::Ctr(CtrOp::Inc { key }))
            }
            _ => Err(DiviError::UnknownOp { op, line }),
        }
    }
}

/// Check an action's arity and hand the argument tokens over by value.
fn take_args<const N: usize>(
    op: &'static str,
    args: Vec<String>,
    line: usize,
) -> Result<[String; N]> {
    let actual = args.len();
    <[String; N]>::try_from(args).map_err(|_| DiviError::Arity {
        op,
        expected: N,
        actual,
        line,
    })
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Str(StrOp::Get { key }) => write!(f, "GET:{}", key),
            Op::Str(StrOp::Put { key, value }) => write!(f, "PUT:{},{}", key, value),
            Op::Ctr(CtrOp::Count { key }) => write!(f, "COUNT:{}", key),
            Op::Ctr(CtrOp::Inc { key }) => write!(f, "INC:{}", key),
        }
    }
}

/// Outcome of applying one operation
///
/// One is produced per executed operation, in plan order. Rendering (via
/// `Display`) yields the wire string: the stored-or-empty value for `GET`,
/// the literal `$ok` for `PUT`, and the decimal counter for `COUNT`/`INC`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpResult {
    /// Value read from the string map (empty when the key is absent)
    Text(String),

    /// Acknowledgement of a write
    Ack,

    /// Counter value as of this operation
    Counter(u64),
}

impl fmt::Display for OpResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpResult::Text(value) => f.write_str(value),
            OpResult::Ack => f.write_str(ACK_TOKEN),
            OpResult::Counter(count) => write!(f, "{}", count),
        }
    }
}
