mod common;

use chrono::{DateTime, Utc};
use common::{sample_group, sample_user, Group, User};
use matcha_core::prelude::*;
use uuid::Uuid;

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::default()
}

#[test]
fn test_zero_user_matches_zero_fields() {
    let rule = field_map_of(fields! {
        "id" => Uuid::nil(),
        "group_id" => Uuid::nil(),
        "name" => "",
        "age" => 0,
        "status" => "",
        "created_at" => epoch(),
        "updated_at" => epoch(),
    });
    assert!(equal(rule, &User::default()));
}

#[test]
fn test_literals_and_rules_mix() {
    let user = sample_user();
    let rule = field_map_of(fields! {
        "id" => user.id,
        "group_id" => be_uuid(),
        "name" => be_string(),
        "age" => be_int(),
        "status" => "active",
        "created_at" => be_time(),
        "group" => be_struct().pointer(),
        "posts" => slice_len(2),
    });
    assert!(equal(rule, &user));
}

#[test]
fn test_wrong_value_fails() {
    let user = sample_user();
    let rule = field_map_of(fields! {
        "id" => user.id,
        "name" => "Wrong Name",
    });
    let verdict = evaluate(rule, &user);
    assert!(!verdict.is_match());
    assert_eq!(verdict.records().len(), 1);
    let record = &verdict.records()[0];
    assert_eq!(record.code, RecordCode::NotEqual);
    assert_eq!(record.key, "name");
    assert_eq!(record.actual, Some(Value::Str("John Doe".into())));
}

#[test]
fn test_unknown_field_is_not_found() {
    let verdict = evaluate(
        field_map_of(fields! {
            "id" => Uuid::nil(),
            "wrong_field_name" => "",
        }),
        &User::default(),
    );
    assert_eq!(verdict.records().len(), 1);
    assert_eq!(verdict.records()[0].code, RecordCode::NotFound);
    assert_eq!(verdict.records()[0].key, "wrong_field_name");
}

#[test]
fn test_exact_mode_counts_fields() {
    let rule = field_map_of(fields! {
        "id" => Uuid::nil(),
        "name" => "",
        "created_at" => epoch(),
        "updated_at" => epoch(),
    })
    .with_contains(false);
    assert!(equal(rule.clone(), &Group::default()));

    let verdict = evaluate(rule, &User::default());
    assert_eq!(verdict.records().len(), 1);
    let record = &verdict.records()[0];
    assert_eq!(record.code, RecordCode::UnmatchLength);
    assert_eq!(record.expect_value(), Some(&Value::Uint(4)));
    assert_eq!(record.actual, Some(Value::Uint(9)));
}

#[test]
fn test_nil_target() {
    let verdict = evaluate(field_map_of(fields! { "id" => Uuid::nil() }), &None::<User>);
    assert_eq!(verdict.records().len(), 1);
    assert_eq!(verdict.records()[0].code, RecordCode::TargetIsNil);
    assert_eq!(verdict.records()[0].actual, Some(Value::Nil));
}

#[test]
fn test_non_record_target() {
    let verdict = evaluate(field_map_of(fields! { "id" => Uuid::nil() }), &1);
    assert_eq!(verdict.records().len(), 1);
    let record = &verdict.records()[0];
    assert_eq!(record.code, RecordCode::UnexpectedType);
    assert_eq!(record.expect_value(), Some(&Value::Str("Struct".into())));
    assert_eq!(record.actual, Some(Value::Int(1)));
}

#[test]
fn test_nested_group_mismatch_reports_child_path() {
    let user = sample_user();
    let rule = field_map_of(fields! {
        "name" => "John Doe",
        "group" => field_map_of(fields! {
            "id" => Uuid::nil(),
            "name" => "Platform",
        })
        .pointer(),
    });

    let verdict = evaluate(rule, &user);
    assert_eq!(verdict.records().len(), 1);

    let group = &verdict.records()[0];
    assert_eq!(group.key, "group");
    assert_eq!(group.code, RecordCode::NotEqual);
    assert_eq!(group.children().len(), 1);

    let id = &group.children()[0];
    assert_eq!(id.key, "id");
    assert_eq!(id.path(), "group > id");
    assert_eq!(id.parent_key(), Some("group"));
    assert_eq!(id.depth(), 1);
    assert_eq!(id.actual, user.group.as_ref().map(|g| Value::Uuid(g.id)));
}

#[test]
fn test_sequence_of_records_inside_record() {
    let user = sample_user();
    let rule = field_map_of(fields! {
        "posts" => sequence_of(elements![
            field_map_of(fields! { "title" => "first" }),
            field_map_of(fields! { "title" => "third" }),
        ]),
    });

    let verdict = evaluate(rule, &user);
    let posts = &verdict.records()[0];
    assert_eq!(posts.key, "posts");
    let index = &posts.children()[0];
    assert_eq!(index.key, "1");
    let title = &index.children()[0];
    assert_eq!(title.path(), "posts > 1 > title");
    assert_eq!(title.depth(), 2);
}

#[test]
fn test_json_documents_are_records() {
    let doc = serde_json::json!({
        "id": 7,
        "tags": ["a", "b"],
        "owner": null,
    });
    let rule = field_map_of(fields! {
        "id" => be_any(),
        "tags" => sequence_of(["b", "a"]).with_order(false),
        "owner" => be_zero(),
    });
    assert!(equal(rule, &doc));
}

#[test]
fn test_rule_is_reusable() {
    let rule = field_map_of(fields! { "name" => "Platform" }).into_rule();
    let other = Group {
        name: "Other".to_string(),
        ..sample_group()
    };
    assert!(rule.matches(&sample_group().inspect()));
    assert!(!rule.matches(&other.inspect()));
    assert!(rule.matches(&sample_group().inspect()));
}

#[test]
fn test_shared_rule_keeps_records_per_thread() {
    let rule = field_map_of(fields! {
        "name" => "John Doe",
        "posts" => sequence_of([
            field_map_of(fields! { "title" => "first" }),
            field_map_of(fields! { "title" => "second" }),
        ]),
    })
    .into_rule();

    let mut users: Vec<User> = (0..8).map(|_| sample_user()).collect();
    for (i, user) in users.iter_mut().enumerate().skip(1) {
        user.posts[i % 2].title = format!("worker-{i}");
    }

    let verdicts: Vec<Verdict> = std::thread::scope(|scope| {
        let handles: Vec<_> = users
            .iter()
            .map(|user| {
                let rule = rule.clone();
                scope.spawn(move || {
                    (0..50)
                        .map(|_| rule.evaluate(&user.inspect()))
                        .last()
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(verdicts[0].is_match());
    assert!(verdicts[0].records().is_empty());
    for (i, verdict) in verdicts.iter().enumerate().skip(1) {
        assert!(!verdict.is_match());
        let [posts] = verdict.records() else {
            panic!("worker {i}: expected one record, got {:?}", verdict.records());
        };
        assert_eq!(posts.key, "posts");
        assert_eq!(posts.code, RecordCode::NotEqual);

        let [post] = posts.children() else {
            panic!("worker {i}: expected one post record");
        };
        assert_eq!(post.key, (i % 2).to_string());
        assert_eq!(post.code, RecordCode::NotEqual);

        let [title] = post.children() else {
            panic!("worker {i}: expected one title record");
        };
        assert_eq!(title.path(), format!("posts > {} > title", i % 2));
        assert_eq!(title.actual, Some(Value::Str(format!("worker-{i}"))));
    }
}
