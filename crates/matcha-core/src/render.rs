//! Human-readable rendering of record trees.
//!
//! Rendering is a pure function of a record: its code picks the message, the
//! kind of matcher that produced it picks the vocabulary ("Index" for
//! sequences, "Field" for records), and its depth picks the indentation.

use crate::expect::Expect;
use crate::matcher::MatcherKind;
use crate::record::{Record, RecordCode, PATH_SEPARATOR};
use crate::value::Value;

/// Layout of rendered reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces per nesting level
    pub indent: usize,
    /// Joins the keys of a breadcrumb
    pub separator: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: 4,
            separator: PATH_SEPARATOR.to_string(),
        }
    }
}

/// Re-sort records by key for display. Records sharing a key keep their
/// relative order.
pub fn sorted_by_key(mut records: Vec<Record>) -> Vec<Record> {
    records.sort_by(|a, b| a.key.cmp(&b.key));
    records
}

/// Title line followed by one block per record.
pub fn render_report(title: &str, records: &[Record], opts: &RenderOptions) -> String {
    let mut blocks = Vec::with_capacity(records.len() + 1);
    blocks.push(title.to_string());
    blocks.extend(records.iter().map(|record| render_record(record, opts)));
    blocks.join("\n\n")
}

/// Render one record and, below it, its children.
pub fn render_record(record: &Record, opts: &RenderOptions) -> String {
    let indent = " ".repeat((record.depth() + 1) * opts.indent);
    let detail = indent.repeat(2);
    let path = record.path_with(&opts.separator);
    let sequence = record.origin == MatcherKind::Sequence;

    match record.code {
        RecordCode::TargetIsNil => {
            format!("{indent}Target is nil. expect {} but got nil", record.origin)
        }
        RecordCode::UnmatchLength => format!(
            "{indent}{} length is unmatched. expect {} but got {}",
            if sequence { "Slice" } else { "Field" },
            shown(record.expect_value()),
            shown(record.actual.as_ref()),
        ),
        RecordCode::UnexpectedType => format!(
            "{indent}Target is unexpected type. expect {} but got {}",
            record
                .expect_value()
                .and_then(Value::as_str)
                .unwrap_or_default(),
            record
                .actual
                .as_ref()
                .map_or("Nil", |actual| actual.kind().label()),
        ),
        RecordCode::NotFound if sequence => format!("{indent}Index: {path} is not found."),
        RecordCode::NotFound => format!("{indent}Field is not found. field: {path}"),
        RecordCode::NotEqual => {
            let mut message = format!(
                "{indent}{} ( {path} ) didn't match.\n\n{detail}expect: {}\n\n{detail}got: {}",
                key_word(record),
                record
                    .expect
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
                shown(record.actual.as_ref()),
            );
            for child in record.children() {
                message.push_str("\n\n");
                message.push_str(&render_record(child, opts));
            }
            message
        }
    }
}

fn shown(value: Option<&Value>) -> String {
    value.map_or_else(|| Value::Nil.to_string(), ToString::to_string)
}

fn key_word(record: &Record) -> &'static str {
    match &record.expect {
        Some(Expect::Rule(rule)) if rule.target_kind() == MatcherKind::FieldMap => "Field",
        Some(Expect::Rule(rule)) if rule.target_kind() == MatcherKind::Sequence => "Index",
        Some(Expect::Literal(Value::Seq(_))) => "Index",
        _ if record.origin == MatcherKind::Sequence => "Index",
        _ => "Field",
    }
}
