use chrono::{DateTime, Utc};
use matcha_core::inspect_struct;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
}

inspect_struct!(Group { id, name });

#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub created_at: DateTime<Utc>,
    pub group: Option<Group>,
}

inspect_struct!(User {
    id,
    name,
    age,
    created_at,
    group,
});

#[allow(dead_code)]
pub fn sample_user() -> User {
    User {
        id: Uuid::now_v7(),
        name: "John Doe".to_string(),
        age: 25,
        created_at: Utc::now(),
        group: Some(Group {
            id: Uuid::now_v7(),
            name: "Platform".to_string(),
        }),
    }
}
