//! Action parsing
//!
//! Splits raw request text into one [`Action`] per line. The grammar is
//! deliberately tiny: `\n` delimits lines, a single space delimits fields,
//! and there is no quoting or escaping, so argument values can never
//! contain a space or newline.
//!
//! The parser performs no validation. Operation names and argument counts
//! are checked later by plan compilation, which also rejects the empty
//! action produced by an empty line.

use std::fmt;

/// One parsed, not-yet-validated line: an operation token plus its
/// argument tokens, verbatim from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Operation token (empty for an empty line)
    pub op: String,

    /// Argument tokens in input order, excluding the operation token
    pub args: Vec<String>,

    /// 1-based line number within the request body, for error reporting
    pub line: usize,
}

impl Action {
    fn from_line(line: &str, number: usize) -> Self {
        match line.split_once(' ') {
            Some((op, rest)) => Action {
                op: op.to_string(),
                args: rest.split(' ').map(str::to_string).collect(),
                line: number,
            },
            // No space: the whole line is the operation token.
            None => Action {
                op: line.to_string(),
                args: Vec::new(),
                line: number,
            },
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op:{} args:[{}]", self.op, self.args.join(", "))
    }
}

/// Parse a request body into actions, one per line, preserving input order.
///
/// A buffer with no trailing newline still yields a final line; a trailing
/// newline yields a final empty line, which compilation rejects. Argument
/// tokens are copied into owned strings so actions do not borrow from the
/// request buffer.
pub fn parse_text(text: &str) -> Vec<Action> {
    text.split('\n')
        .enumerate()
        .map(|(idx, line)| Action::from_line(line, idx + 1))
        .collect()
}
