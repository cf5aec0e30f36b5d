use serde::Serialize;
use std::collections::BTreeMap;

use super::{rule_expect, Matcher, MatcherKind, Verdict};
use crate::expect::{Expect, IntoExpect};
use crate::record::Record;
use crate::schema::Op;
use crate::value::{FieldAccess, Value, ValueKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldMapOptions {
    /// The record may have fields that are not named in the expectation
    pub contains: bool,
}

impl Default for FieldMapOptions {
    fn default() -> Self {
        Self { contains: true }
    }
}

/// Matches a record field by field.
///
/// Fields are checked in name order. A field whose expectation is itself a
/// composite rule carries that rule's records as children, so a mismatch deep
/// inside nested records is reported at the exact field that differs.
#[derive(Debug, Clone)]
pub struct FieldMapOf {
    fields: BTreeMap<String, Expect>,
    options: FieldMapOptions,
}

/// Build a field-map matcher; see the [`fields!`](crate::fields) macro.
///
/// A name given twice keeps its last expectation.
pub fn field_map_of<K, I>(fields: I) -> FieldMapOf
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Expect)>,
{
    FieldMapOf {
        fields: fields
            .into_iter()
            .map(|(name, expected)| (name.into(), expected))
            .collect(),
        options: FieldMapOptions::default(),
    }
}

impl FieldMapOf {
    pub fn with_options(mut self, options: FieldMapOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_contains(mut self, contains: bool) -> Self {
        self.options.contains = contains;
        self
    }

    /// Add or replace the expectation for one field
    pub fn field(mut self, name: impl Into<String>, expected: impl IntoExpect) -> Self {
        self.fields.insert(name.into(), expected.into_expect());
        self
    }

    pub fn fields(&self) -> &BTreeMap<String, Expect> {
        &self.fields
    }

    pub fn options(&self) -> FieldMapOptions {
        self.options
    }

    fn compare<R: FieldAccess>(&self, record: &R) -> Vec<Record> {
        let mut records = Vec::new();
        for (name, expected) in &self.fields {
            let Some(value) = record.field_by_name(name) else {
                records.push(Record::not_found(MatcherKind::FieldMap, name.as_str()));
                continue;
            };
            let verdict = expected.evaluate(value);
            if !verdict.is_match() {
                records.push(
                    Record::not_equal(
                        MatcherKind::FieldMap,
                        name.as_str(),
                        expected.clone(),
                        Some(value.clone()),
                    )
                    .with_children(verdict.into_records()),
                );
            }
        }
        records
    }
}

impl Matcher for FieldMapOf {
    fn evaluate(&self, actual: &Value) -> Verdict {
        let record = match actual {
            Value::Nil => {
                return Verdict::from_records(vec![Record::target_is_nil(MatcherKind::FieldMap)])
            }
            Value::Struct(record) => record,
            other => {
                return Verdict::from_records(vec![Record::unexpected_type(
                    MatcherKind::FieldMap,
                    ValueKind::Struct.label(),
                    other.clone(),
                )])
            }
        };

        if !self.options.contains && self.fields.len() != record.field_count() {
            return Verdict::from_records(vec![Record::unmatch_length(
                MatcherKind::FieldMap,
                self.fields.len(),
                record.field_count(),
            )]);
        }

        let records = self.compare(record);
        tracing::trace!(
            component = module_path!(),
            op = Op::FieldMapOf.as_str(),
            type_name = record.type_name(),
            record_count = records.len(),
            "field map evaluated"
        );

        Verdict::from_records(records)
    }

    fn kind(&self) -> MatcherKind {
        MatcherKind::FieldMap
    }

    fn title(&self) -> Option<String> {
        Some("FieldMapOf got errors".to_string())
    }

    fn describe(&self) -> String {
        if self.fields.is_empty() {
            return "{}".to_string();
        }
        let fields: Vec<String> = self
            .fields
            .iter()
            .map(|(name, expected)| format!("{name}: {expected}"))
            .collect();
        format!("{{ {} }}", fields.join(", "))
    }
}

rule_expect!(FieldMapOf);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;
    use crate::inspect::Inspect;
    use crate::matcher::{be_any, be_int, be_string};
    use crate::record::RecordCode;

    fn user() -> Value {
        Value::structure("User")
            .field("ID", &1)
            .field("Name", "John")
            .field("Age", &30)
            .build()
    }

    #[test]
    fn test_contains_mode_ignores_extra_fields() {
        let m = field_map_of(fields! { "Name" => "John", "ID" => be_int() });
        assert!(m.matches(&user()));
    }

    #[test]
    fn test_exact_mode_checks_field_count_first() {
        let m = field_map_of(fields! { "Name" => "Nobody" }).with_contains(false);
        let verdict = m.evaluate(&user());
        assert_eq!(verdict.records().len(), 1);
        let record = &verdict.records()[0];
        assert_eq!(record.code, RecordCode::UnmatchLength);
        assert_eq!(record.expect_value(), Some(&Value::Uint(1)));
        assert_eq!(record.actual, Some(Value::Uint(3)));
    }

    #[test]
    fn test_every_field_is_reported() {
        let m = field_map_of(fields! {
            "Name" => "Jane",
            "WrongField" => be_any(),
            "Age" => be_string(),
        });
        let verdict = m.evaluate(&user());
        let summary: Vec<_> = verdict
            .records()
            .iter()
            .map(|r| (r.key.as_str(), r.code))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Age", RecordCode::NotEqual),
                ("Name", RecordCode::NotEqual),
                ("WrongField", RecordCode::NotFound),
            ]
        );
    }

    #[test]
    fn test_nil_and_non_record() {
        let m = field_map_of(fields! { "ID" => 1 });
        assert_eq!(m.evaluate(&Value::Nil).records()[0].code, RecordCode::TargetIsNil);

        let verdict = m.evaluate(&"user".inspect());
        assert_eq!(verdict.records()[0].code, RecordCode::UnexpectedType);
        assert_eq!(
            verdict.records()[0].expect_value(),
            Some(&Value::Str("Struct".into()))
        );
    }

    #[test]
    fn test_nested_mismatch_becomes_child() {
        let post = Value::structure("Post")
            .field_value("Group", Value::structure("Group").field("ID", &2).build())
            .build();
        let m = field_map_of(fields! {
            "Group" => field_map_of(fields! { "ID" => 1 }),
        });
        let verdict = m.evaluate(&post);
        let parent = &verdict.records()[0];
        assert_eq!(parent.key, "Group");
        assert_eq!(parent.children().len(), 1);
        assert_eq!(parent.children()[0].key, "ID");
        assert_eq!(parent.children()[0].path(), "Group > ID");
    }

    #[test]
    fn test_builder_replaces_field() {
        let m = field_map_of(fields! { "ID" => 2 }).field("ID", 1);
        assert!(m.matches(&user()));
        assert_eq!(m.describe(), "{ ID: 1 }");
    }
}
