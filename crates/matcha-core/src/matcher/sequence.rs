use serde::Serialize;

use super::{rule_expect, Matcher, MatcherKind, Verdict};
use crate::expect::{Expect, IntoExpect};
use crate::record::Record;
use crate::schema::Op;
use crate::value::{Value, ValueKind};

/// How [`SequenceOf`] lines expectations up against the actual elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SequenceOptions {
    /// Element `i` must match actual element `i`
    pub order: bool,
    /// The actual sequence may hold more elements than expected
    pub contains: bool,
}

impl Default for SequenceOptions {
    fn default() -> Self {
        Self {
            order: true,
            contains: false,
        }
    }
}

/// Matches a sequence element by element.
///
/// Each expected element is a literal or a nested rule, so sequences of
/// records can be checked with [`field_map_of`](super::field_map_of) per
/// element.
///
/// In unordered mode every expected element claims the first unused actual
/// element it matches. This is greedy, not an optimal assignment: with
/// overlapping rules an arrangement that a bipartite matching would accept can
/// be rejected.
#[derive(Debug, Clone)]
pub struct SequenceOf {
    elements: Vec<Expect>,
    options: SequenceOptions,
}

pub fn sequence_of<I, T>(elements: I) -> SequenceOf
where
    I: IntoIterator<Item = T>,
    T: IntoExpect,
{
    SequenceOf {
        elements: elements.into_iter().map(IntoExpect::into_expect).collect(),
        options: SequenceOptions::default(),
    }
}

impl SequenceOf {
    pub fn with_options(mut self, options: SequenceOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_order(mut self, order: bool) -> Self {
        self.options.order = order;
        self
    }

    pub fn with_contains(mut self, contains: bool) -> Self {
        self.options.contains = contains;
        self
    }

    pub fn elements(&self) -> &[Expect] {
        &self.elements
    }

    pub fn options(&self) -> SequenceOptions {
        self.options
    }

    fn positional(&self, items: &[Value]) -> Vec<Record> {
        let mut records = Vec::new();
        for (i, expected) in self.elements.iter().enumerate() {
            let Some(item) = items.get(i) else {
                records.push(Record::not_found(MatcherKind::Sequence, i.to_string()));
                continue;
            };
            let verdict = expected.evaluate(item);
            if !verdict.is_match() {
                records.push(
                    Record::not_equal(
                        MatcherKind::Sequence,
                        i.to_string(),
                        expected.clone(),
                        Some(item.clone()),
                    )
                    .with_children(verdict.into_records()),
                );
            }
        }
        records
    }

    fn greedy(&self, items: &[Value]) -> Vec<Record> {
        let mut used = vec![false; items.len()];
        let mut records = Vec::new();
        for (i, expected) in self.elements.iter().enumerate() {
            let found =
                (0..items.len()).find(|&j| !used[j] && expected.evaluate(&items[j]).is_match());
            match found {
                Some(j) => used[j] = true,
                None => {
                    let culprit = items.get(i);
                    let children = culprit
                        .map(|item| expected.evaluate(item).into_records())
                        .unwrap_or_default();
                    records.push(
                        Record::not_equal(
                            MatcherKind::Sequence,
                            i.to_string(),
                            expected.clone(),
                            culprit.cloned(),
                        )
                        .with_children(children),
                    );
                }
            }
        }
        records
    }
}

impl Matcher for SequenceOf {
    fn evaluate(&self, actual: &Value) -> Verdict {
        let items = match actual {
            Value::Nil => {
                return Verdict::from_records(vec![Record::target_is_nil(MatcherKind::Sequence)])
            }
            Value::Seq(items) => items,
            other => {
                return Verdict::from_records(vec![Record::unexpected_type(
                    MatcherKind::Sequence,
                    ValueKind::Seq.label(),
                    other.clone(),
                )])
            }
        };

        if !self.options.contains && self.elements.len() != items.len() {
            return Verdict::from_records(vec![Record::unmatch_length(
                MatcherKind::Sequence,
                self.elements.len(),
                items.len(),
            )]);
        }

        let records = if self.options.order {
            self.positional(items)
        } else {
            self.greedy(items)
        };

        tracing::trace!(
            component = module_path!(),
            op = Op::SequenceOf.as_str(),
            record_count = records.len(),
            "sequence evaluated"
        );

        Verdict::from_records(records)
    }

    fn kind(&self) -> MatcherKind {
        MatcherKind::Sequence
    }

    fn title(&self) -> Option<String> {
        Some("SequenceOf got errors".to_string())
    }

    fn describe(&self) -> String {
        let elements: Vec<String> = self.elements.iter().map(ToString::to_string).collect();
        format!("[{}]", elements.join(", "))
    }
}

rule_expect!(SequenceOf);
