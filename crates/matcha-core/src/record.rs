//! Mismatch diagnostics.
//!
//! A [`Record`] describes one point of mismatch. Composite matchers nest the
//! records of nested expectations as children, so the records of one
//! evaluation form a tree mirroring the nesting of the matchers.
//!
//! Each record keeps the keys of its ancestors, which is all [`Record::path`]
//! needs to rebuild a breadcrumb such as `Group > ID`.

use serde::Serialize;
use std::fmt;

use crate::expect::Expect;
use crate::matcher::MatcherKind;
use crate::value::Value;

/// Default separator between breadcrumb segments
pub const PATH_SEPARATOR: &str = " > ";

/// Mismatch taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordCode {
    /// The actual value is nil where a container was required
    TargetIsNil,
    /// The actual value is not the kind of container expected
    UnexpectedType,
    /// An index or field named by the expectation is missing
    NotFound,
    /// An element or field is present but does not satisfy its expectation
    NotEqual,
    /// Element or field counts differ in strict mode
    UnmatchLength,
}

impl RecordCode {
    /// Stable code string
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordCode::TargetIsNil => "target_is_nil",
            RecordCode::UnexpectedType => "unexpected_type",
            RecordCode::NotFound => "not_found",
            RecordCode::NotEqual => "not_equal",
            RecordCode::UnmatchLength => "unmatch_length",
        }
    }
}

impl fmt::Display for RecordCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One diagnostic unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub code: RecordCode,
    /// Field name or stringified index; empty for whole-value mismatches
    pub key: String,
    /// Matcher that produced this record
    pub origin: MatcherKind,
    /// Outermost matcher of the tree this record belongs to
    pub root: MatcherKind,
    pub expect: Option<Expect>,
    pub actual: Option<Value>,
    children: Vec<Record>,
    #[serde(skip)]
    ancestors: Vec<String>,
    #[serde(skip)]
    depth: usize,
}

impl Record {
    fn new(code: RecordCode, origin: MatcherKind) -> Self {
        Self {
            code,
            key: String::new(),
            origin,
            root: origin,
            expect: None,
            actual: None,
            children: Vec::new(),
            ancestors: Vec::new(),
            depth: 0,
        }
    }

    pub fn target_is_nil(origin: MatcherKind) -> Self {
        let mut record = Self::new(RecordCode::TargetIsNil, origin);
        record.actual = Some(Value::Nil);
        record
    }

    /// `expected` is the label of the container kind the matcher wanted
    pub fn unexpected_type(origin: MatcherKind, expected: &str, actual: Value) -> Self {
        let mut record = Self::new(RecordCode::UnexpectedType, origin);
        record.expect = Some(Expect::Literal(Value::Str(expected.to_string())));
        record.actual = Some(actual);
        record
    }

    /// Carries the missing key only
    pub fn not_found(origin: MatcherKind, key: impl Into<String>) -> Self {
        let mut record = Self::new(RecordCode::NotFound, origin);
        record.key = key.into();
        record
    }

    pub fn not_equal(
        origin: MatcherKind,
        key: impl Into<String>,
        expect: Expect,
        actual: Option<Value>,
    ) -> Self {
        let mut record = Self::new(RecordCode::NotEqual, origin);
        record.key = key.into();
        record.expect = Some(expect);
        record.actual = actual;
        record
    }

    pub fn unmatch_length(origin: MatcherKind, expected: usize, actual: usize) -> Self {
        let mut record = Self::new(RecordCode::UnmatchLength, origin);
        record.expect = Some(Expect::Literal(Value::Uint(expected as u64)));
        record.actual = Some(Value::Uint(actual as u64));
        record
    }

    /// Adopt `children`, re-rooting their whole subtree under this record.
    pub fn with_children(mut self, children: Vec<Record>) -> Self {
        let mut lineage = self.ancestors.clone();
        lineage.push(self.key.clone());
        self.children = children
            .into_iter()
            .map(|child| child.rebased(&lineage, self.depth + 1, self.root))
            .collect();
        self
    }

    fn rebased(mut self, lineage: &[String], depth: usize, root: MatcherKind) -> Self {
        self.ancestors = lineage.to_vec();
        self.depth = depth;
        self.root = root;

        let mut child_lineage = self.ancestors.clone();
        child_lineage.push(self.key.clone());
        self.children = std::mem::take(&mut self.children)
            .into_iter()
            .map(|child| child.rebased(&child_lineage, depth + 1, root))
            .collect();
        self
    }

    pub fn children(&self) -> &[Record] {
        &self.children
    }

    /// Key of the parent record, if this record is nested
    pub fn parent_key(&self) -> Option<&str> {
        self.ancestors.last().map(String::as_str)
    }

    /// Nesting level; only affects indentation
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Breadcrumb from the outermost ancestor down to this record
    pub fn path(&self) -> String {
        self.path_with(PATH_SEPARATOR)
    }

    pub fn path_with(&self, separator: &str) -> String {
        self.ancestors
            .iter()
            .chain(std::iter::once(&self.key))
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// The literal expectation, if the expectation was not a rule
    pub fn expect_value(&self) -> Option<&Value> {
        self.expect.as_ref().and_then(Expect::as_literal)
    }
}
