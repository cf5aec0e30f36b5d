use chrono::{DateTime, TimeZone, Utc};
use matcha_core::inspect_struct;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

inspect_struct!(Group {
    id,
    name,
    created_at,
    updated_at,
});

#[derive(Debug, Clone, Default)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

inspect_struct!(Post {
    id,
    title,
    content,
    description,
    created_at,
    updated_at,
});

#[derive(Debug, Clone, Default)]
pub struct User {
    pub id: Uuid,
    pub group_id: Uuid,
    pub name: String,
    pub age: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub group: Option<Group>,
    pub posts: Vec<Post>,
}

inspect_struct!(User {
    id,
    group_id,
    name,
    age,
    status,
    created_at,
    updated_at,
    group,
    posts,
});

/// A fixed, non-epoch timestamp
#[allow(dead_code)]
pub fn timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 1, 9, 30, 0).unwrap()
}

#[allow(dead_code)]
pub fn sample_group() -> Group {
    Group {
        id: Uuid::now_v7(),
        name: "Platform".to_string(),
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

#[allow(dead_code)]
pub fn sample_post(title: &str) -> Post {
    Post {
        id: Uuid::now_v7(),
        title: title.to_string(),
        content: format!("{title} body"),
        description: None,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

/// John Doe, 25, in [`sample_group`], with two posts
#[allow(dead_code)]
pub fn sample_user() -> User {
    let group = sample_group();
    User {
        id: Uuid::now_v7(),
        group_id: group.id,
        name: "John Doe".to_string(),
        age: 25,
        status: "active".to_string(),
        created_at: timestamp(),
        updated_at: timestamp(),
        group: Some(group),
        posts: vec![sample_post("first"), sample_post("second")],
    }
}
