//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and diagnostic reporting.

use serde::{Deserialize, Serialize};
use std::fmt;

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Matching context
pub const FIELD_MATCHER: &str = "matcher";
pub const FIELD_RECORD_COUNT: &str = "record_count";
pub const FIELD_PASSED: &str = "passed";
pub const FIELD_TYPE_NAME: &str = "type_name";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

/// Operations that emit canonical start/end events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Op {
    /// Evaluating a sequence expectation
    SequenceOf,
    /// Evaluating a field-map expectation
    FieldMapOf,
    /// Compiling a regular expression matcher
    CompilePattern,
    /// Parsing a mail address
    ParseAddress,
    /// Running an assertion end to end
    Assert,
}

impl Op {
    /// Stable string form used as the `op` field value
    pub fn as_str(&self) -> &'static str {
        match self {
            Op::SequenceOf => "sequence_of",
            Op::FieldMapOf => "field_map_of",
            Op::CompilePattern => "compile_pattern",
            Op::ParseAddress => "parse_address",
            Op::Assert => "assert",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
