mod common;

use common::sample_user;
use matcha_assert::{assert_equal, assert_matcha, Assertion, RecordingSignal};
use matcha_core::logging_facility::init_test_capture;
use matcha_core::prelude::*;
use matcha_core::schema::{Op, EVENT_END, EVENT_START, FIELD_PASSED};
use matcha_core::RenderOptions;
use tracing::Level;
use uuid::Uuid;

fn user_rule() -> Rule {
    field_map_of(fields! {
        "id" => be_uuid(),
        "name" => be_string(),
        "age" => be_int(),
        "created_at" => be_time(),
        "group" => field_map_of(fields! {
            "id" => be_uuid(),
            "name" => "Platform",
        })
        .pointer(),
    })
    .into_rule()
}

#[test]
fn test_matching_user_passes() {
    let user = sample_user();
    let assertion = Assertion::new(user_rule(), &user);
    assert!(assertion.passed());
    assert!(assertion.records().is_empty());
    assert!(assertion.report().is_none());
    assert_equal(user_rule(), &user);
    assert_matcha!(user_rule(), user);
}

#[test]
fn test_failures_are_signalled_once_with_full_report() {
    let mut user = sample_user();
    user.age = 0;
    if let Some(group) = user.group.as_mut() {
        group.id = Uuid::nil();
    }

    let mut signal = RecordingSignal::new();
    let assertion = Assertion::new(user_rule(), &user);
    assert!(!assertion.check(&mut signal));

    assert_eq!(signal.reports().len(), 1);
    let report = &signal.reports()[0];
    assert!(report.starts_with("FieldMapOf got errors"));
    assert!(report.contains("Field ( age ) didn't match."));
    assert!(report.contains("Field ( group > id ) didn't match."));
}

#[test]
fn test_records_are_sorted_by_key() {
    let assertion = Assertion::new(
        field_map_of(fields! { "zeta" => 1, "alpha" => 1, "mid" => 1 }),
        &serde_json::json!({ "zeta": 2, "mid": 2 }),
    );
    let keys: Vec<String> = assertion.records().into_iter().map(|r| r.key).collect();
    assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
}

#[test]
fn test_render_options_are_applied() {
    let assertion = Assertion::new(
        field_map_of(fields! {
            "group" => field_map_of(fields! { "name" => "Other" }).pointer(),
        }),
        &sample_user(),
    )
    .with_render_options(RenderOptions {
        indent: 2,
        separator: "/".to_string(),
    });
    let report = assertion.report().unwrap();
    assert!(report.contains("\n\n  Field ( group ) didn't match."));
    assert!(report.contains("\n\n    Field ( group/name ) didn't match."));
}

#[test]
fn test_to_json() {
    let assertion = Assertion::new(sequence_of([1, 2, 3]), &vec![1, 2]);
    let json = assertion.to_json();
    assert_eq!(json["passed"], serde_json::json!(false));
    assert_eq!(json["title"], serde_json::json!("SequenceOf got errors"));
    assert_eq!(json["expect"]["rule"], serde_json::json!("[1, 2, 3]"));
    assert_eq!(json["actual"]["kind"], serde_json::json!("seq"));
    assert_eq!(json["records"][0]["code"], serde_json::json!("unmatch_length"));
}

#[test]
fn test_check_logs_start_end_and_report() {
    let capture = init_test_capture();
    let mut signal = RecordingSignal::new();
    Assertion::new(sequence_of(["assert-log-probe"]), &vec!["other"]).check(&mut signal);

    let events = capture.events_for_op(Op::Assert.as_str());
    assert!(events
        .iter()
        .any(|e| e.event.as_deref() == Some(EVENT_START)));
    assert!(events
        .iter()
        .any(|e| e.event.as_deref() == Some(EVENT_END)
            && e.fields.get(FIELD_PASSED).map(String::as_str) == Some("false")));
    assert!(events.iter().any(|e| e.level == Level::ERROR
        && e
            .message
            .as_deref()
            .is_some_and(|m| m.contains("assert-log-probe"))));
}

#[test]
#[should_panic(expected = "Field is not found. field: nickname")]
fn test_assert_equal_panics_with_report() {
    assert_equal(field_map_of(fields! { "nickname" => be_any() }), &sample_user());
}

#[test]
#[should_panic(expected = "while checking the user")]
fn test_assert_macro_prepends_message() {
    let user = sample_user();
    assert_matcha!(be_zero(), user, "while checking the {}", "user");
}
