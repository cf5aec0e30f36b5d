use super::{rule_expect, Matcher, MatcherKind, Verdict};
use crate::expect::Rule;
use crate::value::Value;

/// Applies the inner rule after stripping one level of reference.
///
/// Nil is handed to the inner rule as is, so "pointer to zero" and "pointer
/// to a typed value" stay distinguishable. A value that is not a reference
/// fails without consulting the inner rule.
#[derive(Debug, Clone)]
pub struct PointerOf {
    inner: Rule,
}

impl PointerOf {
    pub fn new(inner: Rule) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &Rule {
        &self.inner
    }
}

pub fn pointer_of(inner: impl Into<Rule>) -> PointerOf {
    PointerOf::new(inner.into())
}

impl Matcher for PointerOf {
    fn evaluate(&self, actual: &Value) -> Verdict {
        match actual {
            Value::Nil => self.inner.evaluate(actual),
            Value::Ref(target) => self.inner.evaluate(target),
            _ => Verdict::fail(),
        }
    }

    fn kind(&self) -> MatcherKind {
        MatcherKind::Pointer
    }

    fn target_kind(&self) -> MatcherKind {
        self.inner.target_kind()
    }

    fn title(&self) -> Option<String> {
        self.inner.title()
    }

    fn describe(&self) -> String {
        format!("pointer to {}", self.inner.describe())
    }
}

/// Inverts the inner rule.
#[derive(Debug, Clone)]
pub struct Negation {
    inner: Rule,
}

impl Negation {
    pub fn new(inner: Rule) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &Rule {
        &self.inner
    }
}

pub fn negation(inner: impl Into<Rule>) -> Negation {
    Negation::new(inner.into())
}

impl Matcher for Negation {
    fn evaluate(&self, actual: &Value) -> Verdict {
        self.inner.evaluate(actual).negate()
    }

    fn kind(&self) -> MatcherKind {
        MatcherKind::Negation
    }

    fn describe(&self) -> String {
        format!("not {}", self.inner.describe())
    }
}

rule_expect!(PointerOf, Negation);
