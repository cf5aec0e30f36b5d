use super::{rule_expect, Matcher, Verdict};
use crate::value::{Value, ValueKind};

/// Options shared by the leaf matchers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatcherOptions {
    /// Accept the zero value instead of treating it as "absent"
    pub allow_zero: bool,
}

/// Matches any value except a zero one, unless zero is allowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anything {
    options: MatcherOptions,
}

pub fn be_any() -> Anything {
    Anything::default()
}

impl Anything {
    /// Accept everything, nil included
    pub fn allow_zero(mut self) -> Self {
        self.options.allow_zero = true;
        self
    }
}

impl Matcher for Anything {
    fn evaluate(&self, actual: &Value) -> Verdict {
        Verdict::from_bool(self.options.allow_zero || !actual.is_zero())
    }

    fn describe(&self) -> String {
        if self.options.allow_zero {
            "anything".to_string()
        } else {
            "any non-zero value".to_string()
        }
    }
}

/// Matches the zero value of the actual's kind, or nil.
#[derive(Debug, Clone, Copy, Default)]
pub struct Zero;

pub fn be_zero() -> Zero {
    Zero
}

impl Matcher for Zero {
    fn evaluate(&self, actual: &Value) -> Verdict {
        Verdict::from_bool(actual.is_zero())
    }

    fn describe(&self) -> String {
        "zero value".to_string()
    }
}

/// Matches values whose runtime kind is exactly `kind`.
///
/// Zero values are rejected unless [`allow_zero`](TypeOf::allow_zero) was
/// called; booleans allow zero from the start since `false` is a legitimate
/// answer, not an absent one.
#[derive(Debug, Clone, Copy)]
pub struct TypeOf {
    kind: ValueKind,
    options: MatcherOptions,
}

impl TypeOf {
    pub fn new(kind: ValueKind) -> Self {
        Self {
            kind,
            options: MatcherOptions::default(),
        }
    }

    pub fn allow_zero(mut self) -> Self {
        self.options.allow_zero = true;
        self
    }

    pub fn value_kind(&self) -> ValueKind {
        self.kind
    }
}

pub fn be_string() -> TypeOf {
    TypeOf::new(ValueKind::Str)
}

pub fn be_int() -> TypeOf {
    TypeOf::new(ValueKind::Int)
}

pub fn be_bool() -> TypeOf {
    TypeOf::new(ValueKind::Bool).allow_zero()
}

pub fn be_time() -> TypeOf {
    TypeOf::new(ValueKind::Time)
}

/// Rejects the nil UUID unless zero is allowed
pub fn be_uuid() -> TypeOf {
    TypeOf::new(ValueKind::Uuid)
}

/// Any non-empty sequence
pub fn be_slice() -> TypeOf {
    TypeOf::new(ValueKind::Seq)
}

/// Any record with at least one non-zero field; nil never matches
pub fn be_struct() -> TypeOf {
    TypeOf::new(ValueKind::Struct)
}

impl Matcher for TypeOf {
    fn evaluate(&self, actual: &Value) -> Verdict {
        if !self.options.allow_zero && actual.is_zero() {
            return Verdict::fail();
        }
        Verdict::from_bool(actual.kind() == self.kind)
    }

    fn describe(&self) -> String {
        format!("any {}", self.kind.label())
    }
}

/// Matches sequences holding exactly `n` elements.
#[derive(Debug, Clone, Copy)]
pub struct SliceLen(usize);

pub fn slice_len(n: usize) -> SliceLen {
    SliceLen(n)
}

impl Matcher for SliceLen {
    fn evaluate(&self, actual: &Value) -> Verdict {
        Verdict::from_bool(actual.as_seq().is_some_and(|items| items.len() == self.0))
    }

    fn describe(&self) -> String {
        format!("slice of length {}", self.0)
    }
}

rule_expect!(Anything, Zero, TypeOf, SliceLen);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::Inspect;

    fn check<M: Matcher>(m: &M, v: impl Inspect) -> bool {
        m.matches(&v.inspect())
    }

    #[test]
    fn test_any_rejects_zero_by_default() {
        assert!(check(&be_any(), 1));
        assert!(check(&be_any(), "abca"));
        assert!(!check(&be_any(), 0));
        assert!(!check(&be_any(), ""));
        assert!(!check(&be_any(), Value::Nil));
    }

    #[test]
    fn test_any_allow_zero_accepts_nil() {
        let m = be_any().allow_zero();
        assert!(check(&m, 0));
        assert!(check(&m, Value::Nil));
    }

    #[test]
    fn test_bool_accepts_false() {
        assert!(check(&be_bool(), false));
        assert!(check(&be_bool(), true));
        assert!(!check(&be_bool(), ""));
        assert!(!check(&be_bool(), Box::new(true)));
    }

    #[test]
    fn test_typed_matchers_reject_other_kinds() {
        assert!(check(&be_string(), "123"));
        assert!(!check(&be_string(), 123));
        assert!(!check(&be_string(), Box::new("123")));
        assert!(check(&be_int(), 123));
        assert!(!check(&be_int(), "123"));
        assert!(!check(&be_int(), 0));
        assert!(check(&be_int().allow_zero(), 0));
    }

    #[test]
    fn test_uuid_rejects_nil_uuid() {
        assert!(check(&be_uuid(), uuid::Uuid::now_v7()));
        assert!(!check(&be_uuid(), uuid::Uuid::nil()));
        assert!(check(&be_uuid().allow_zero(), uuid::Uuid::nil()));
    }

    #[test]
    fn test_slice_len() {
        assert!(check(&slice_len(3), vec!["a", "b", "c"]));
        assert!(!check(&slice_len(3), vec!["a", "b", "c", "d"]));
        assert!(!check(&slice_len(0), 0));
    }
}
