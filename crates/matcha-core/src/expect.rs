//! Expectations: either a literal value or a matching rule.
//!
//! The choice between "compare by value" and "delegate to a matcher" is made
//! once, when the expectation is built, instead of being probed at every
//! comparison site.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::inspect::Inspect;
use crate::matcher::{Matcher, MatcherKind, Negation, PointerOf, Verdict};
use crate::value::{StructValue, Value};

/// What an actual value is checked against.
#[derive(Debug, Clone, PartialEq)]
pub enum Expect {
    /// Structural equality with this value
    Literal(Value),
    /// Delegate to a matcher
    Rule(Rule),
}

impl Expect {
    pub fn literal<T: Inspect + ?Sized>(value: &T) -> Self {
        Expect::Literal(value.inspect())
    }

    pub fn evaluate(&self, actual: &Value) -> Verdict {
        match self {
            Expect::Literal(expected) => Verdict::from_bool(expected == actual),
            Expect::Rule(rule) => rule.evaluate(actual),
        }
    }

    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            Expect::Literal(value) => Some(value),
            Expect::Rule(_) => None,
        }
    }

    pub fn as_rule(&self) -> Option<&Rule> {
        match self {
            Expect::Literal(_) => None,
            Expect::Rule(rule) => Some(rule),
        }
    }
}

impl fmt::Display for Expect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expect::Literal(value) => write!(f, "{value}"),
            Expect::Rule(rule) => f.write_str(&rule.describe()),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum ExpectRepr<'a> {
    Literal(&'a Value),
    Rule(String),
}

impl Serialize for Expect {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Expect::Literal(value) => ExpectRepr::Literal(value).serialize(serializer),
            Expect::Rule(rule) => ExpectRepr::Rule(rule.describe()).serialize(serializer),
        }
    }
}

/// Shared handle to a matcher.
///
/// Cloning is cheap and the underlying matcher is immutable, so one rule can
/// be evaluated from many threads at once. Two rules are equal only when they
/// are the same instance.
#[derive(Clone)]
pub struct Rule(Arc<dyn Matcher>);

impl Rule {
    pub fn new<M: Matcher + 'static>(matcher: M) -> Self {
        Rule(Arc::new(matcher))
    }

    pub fn evaluate(&self, actual: &Value) -> Verdict {
        self.0.evaluate(actual)
    }

    pub fn matches(&self, actual: &Value) -> bool {
        self.0.matches(actual)
    }

    pub fn kind(&self) -> MatcherKind {
        self.0.kind()
    }

    pub fn target_kind(&self) -> MatcherKind {
        self.0.target_kind()
    }

    pub fn title(&self) -> Option<String> {
        self.0.title()
    }

    pub fn describe(&self) -> String {
        self.0.describe()
    }

    /// Invert this rule
    pub fn not(&self) -> Rule {
        Rule::new(Negation::new(self.clone()))
    }

    /// Apply this rule after stripping one level of reference
    pub fn pointer(&self) -> Rule {
        Rule::new(PointerOf::new(self.clone()))
    }

    pub fn ptr_eq(&self, other: &Rule) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<M: Matcher + 'static> From<M> for Rule {
    fn from(matcher: M) -> Self {
        Rule::new(matcher)
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Rule").field(&self.0).finish()
    }
}

/// Conversion into an [`Expect`].
///
/// Implemented for plain values (literals), every matcher type, [`Rule`] and
/// [`Expect`] itself.
pub trait IntoExpect {
    fn into_expect(self) -> Expect;
}

/// Shorthand for `value.into_expect()`
pub fn expect<E: IntoExpect>(value: E) -> Expect {
    value.into_expect()
}

impl IntoExpect for Expect {
    fn into_expect(self) -> Expect {
        self
    }
}

impl IntoExpect for Rule {
    fn into_expect(self) -> Expect {
        Expect::Rule(self)
    }
}

impl IntoExpect for Value {
    fn into_expect(self) -> Expect {
        Expect::Literal(self)
    }
}

macro_rules! literal_expect {
    ($($t:ty),* $(,)?) => {
        $(
            impl IntoExpect for $t {
                fn into_expect(self) -> Expect {
                    Expect::Literal(self.inspect())
                }
            }
        )*
    };
}

literal_expect!(
    bool,
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    char,
    String,
    Uuid,
    DateTime<Utc>,
    StructValue,
    serde_json::Value,
);

impl<T: Inspect + ?Sized> IntoExpect for &T {
    fn into_expect(self) -> Expect {
        Expect::Literal(self.inspect())
    }
}

impl<T: Inspect> IntoExpect for Vec<T> {
    fn into_expect(self) -> Expect {
        Expect::Literal(self.inspect())
    }
}

impl<T: Inspect, const N: usize> IntoExpect for [T; N] {
    fn into_expect(self) -> Expect {
        Expect::Literal(self.inspect())
    }
}

impl<T: Inspect> IntoExpect for Option<T> {
    fn into_expect(self) -> Expect {
        Expect::Literal(Inspect::inspect(&self))
    }
}

impl<T: Inspect + ?Sized> IntoExpect for Box<T> {
    fn into_expect(self) -> Expect {
        Expect::Literal(self.inspect())
    }
}

/// Build a `Vec<Expect>` from mixed literals and matchers.
///
/// ```
/// use matcha_core::{elements, matcher::be_int};
///
/// let expected = elements![1, be_int(), "three"];
/// assert_eq!(expected.len(), 3);
/// ```
#[macro_export]
macro_rules! elements {
    ($($element:expr),* $(,)?) => {
        vec![$($crate::expect::IntoExpect::into_expect($element)),*]
    };
}

/// Build `(name, Expect)` pairs for [`field_map_of`](crate::matcher::field_map_of).
///
/// ```
/// use matcha_core::{fields, matcher::{be_string, field_map_of}};
///
/// let user = field_map_of(fields! {
///     "name" => be_string(),
///     "age" => 30,
/// });
/// ```
#[macro_export]
macro_rules! fields {
    ($($name:expr => $expected:expr),* $(,)?) => {
        vec![$(($name, $crate::expect::IntoExpect::into_expect($expected))),*]
    };
}
