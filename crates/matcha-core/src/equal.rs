//! The single entry point for "does `actual` satisfy `expect`".

use crate::expect::IntoExpect;
use crate::inspect::Inspect;
use crate::matcher::Verdict;

/// Check `actual` against an expectation.
///
/// A matcher expectation is evaluated; anything else is compared by value,
/// structurally for sequences and records.
///
/// ```
/// use matcha_core::prelude::*;
///
/// assert!(equal(3, &3));
/// assert!(equal(be_int(), &3));
/// assert!(equal(vec![1, 2], &vec![1, 2]));
/// assert!(!equal("3", &3));
/// ```
pub fn equal<E, A>(expect: E, actual: &A) -> bool
where
    E: IntoExpect,
    A: Inspect + ?Sized,
{
    evaluate(expect, actual).is_match()
}

/// Like [`equal`] but keeps the records explaining a mismatch.
pub fn evaluate<E, A>(expect: E, actual: &A) -> Verdict
where
    E: IntoExpect,
    A: Inspect + ?Sized,
{
    expect.into_expect().evaluate(&actual.inspect())
}
