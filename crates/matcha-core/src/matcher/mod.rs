//! The matcher contract and every built-in matcher.
//!
//! | factory | matches |
//! |---|---|
//! | [`be_any`] | any non-zero value |
//! | [`be_zero`] | the zero value of the actual's kind, or nil |
//! | [`be_string`], [`be_int`], [`be_bool`], [`be_time`], [`be_uuid`], [`be_slice`], [`be_struct`] | a value of exactly that kind |
//! | [`slice_len`] | a sequence of a given length |
//! | [`reg_exp`] | a string (or string reference) matching a pattern |
//! | [`email`] | a string (or string reference) that parses as a mail address |
//! | [`sequence_of`] | a sequence, element by element |
//! | [`field_map_of`] | a record, field by field |
//!
//! Every matcher can be wrapped with [`Matcher::pointer`] and [`Matcher::not`].

use serde::Serialize;
use std::fmt;

use crate::expect::Rule;
use crate::record::Record;
use crate::value::Value;

mod field_map;
mod modifier;
mod primitive;
mod sequence;
mod string;

pub use field_map::{field_map_of, FieldMapOf, FieldMapOptions};
pub use modifier::{negation, pointer_of, Negation, PointerOf};
pub use primitive::{
    be_any, be_bool, be_int, be_slice, be_string, be_struct, be_time, be_uuid, be_zero,
    slice_len, Anything, MatcherOptions, SliceLen, TypeOf, Zero,
};
pub use sequence::{sequence_of, SequenceOf, SequenceOptions};
pub use string::{email, parse_address, reg_exp, Email, Mailbox, RegExp};

/// Which family a matcher belongs to.
///
/// Only used to pick diagnostic vocabulary ("Index" versus "Field"); it never
/// changes matching semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatcherKind {
    Primitive,
    Sequence,
    FieldMap,
    Pointer,
    Negation,
}

impl MatcherKind {
    pub fn label(&self) -> &'static str {
        match self {
            MatcherKind::Primitive => "Primitive",
            MatcherKind::Sequence => "SequenceOf",
            MatcherKind::FieldMap => "FieldMapOf",
            MatcherKind::Pointer => "PointerOf",
            MatcherKind::Negation => "Not",
        }
    }
}

impl fmt::Display for MatcherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A composable rule deciding whether a value satisfies an expectation.
///
/// `evaluate` is a pure function of the matcher and the actual value: the
/// diagnostics it produces are returned in the [`Verdict`], never stored on the
/// matcher, so a matcher can be shared and evaluated concurrently.
pub trait Matcher: fmt::Debug + Send + Sync {
    fn evaluate(&self, actual: &Value) -> Verdict;

    fn matches(&self, actual: &Value) -> bool {
        self.evaluate(actual).is_match()
    }

    fn kind(&self) -> MatcherKind {
        MatcherKind::Primitive
    }

    /// Kind of the matcher that actually inspects the value, looking
    /// through reference wrappers
    fn target_kind(&self) -> MatcherKind {
        self.kind()
    }

    /// Report heading used when this matcher's records are rendered
    fn title(&self) -> Option<String> {
        None
    }

    /// Human-readable form of the expectation
    fn describe(&self) -> String {
        format!("{self:?}")
    }

    /// Invert the result. The negated matcher produces no records.
    fn not(self) -> Rule
    where
        Self: Sized + 'static,
    {
        Rule::new(self).not()
    }

    /// Apply this matcher to the target of a reference.
    fn pointer(self) -> Rule
    where
        Self: Sized + 'static,
    {
        Rule::new(self).pointer()
    }

    fn into_rule(self) -> Rule
    where
        Self: Sized + 'static,
    {
        Rule::new(self)
    }
}

/// Outcome of one evaluation: the boolean answer plus every diagnostic
/// collected on the way.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Verdict {
    matched: bool,
    records: Vec<Record>,
}

impl Verdict {
    pub fn pass() -> Self {
        Self {
            matched: true,
            records: Vec::new(),
        }
    }

    pub fn fail() -> Self {
        Self {
            matched: false,
            records: Vec::new(),
        }
    }

    pub fn from_bool(matched: bool) -> Self {
        if matched {
            Self::pass()
        } else {
            Self::fail()
        }
    }

    /// Satisfied exactly when no record was produced
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            matched: records.is_empty(),
            records,
        }
    }

    pub fn is_match(&self) -> bool {
        self.matched
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Flip the answer and drop the records: "matched" has no sub-records to
    /// explain why it should not have.
    pub fn negate(self) -> Self {
        Self::from_bool(!self.matched)
    }
}

/// Implements [`IntoExpect`](crate::expect::IntoExpect) for matcher types.
macro_rules! rule_expect {
    ($($t:ty),* $(,)?) => {
        $(
            impl $crate::expect::IntoExpect for $t {
                fn into_expect(self) -> $crate::expect::Expect {
                    $crate::expect::Expect::Rule($crate::expect::Rule::new(self))
                }
            }
        )*
    };
}

pub(crate) use rule_expect;
