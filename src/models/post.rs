use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Body of the new-post and edit-post forms. `tags` holds the ids of every
/// checked tag box, one repeated key per box.
#[derive(Debug, Clone, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<i32>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewPost {
    pub user_id: i32,
    pub title: String,
    pub content: String,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PostChanges {
    pub title: String,
    pub content: String,
}

impl PostForm {
    pub fn into_new_post(self, user_id: i32) -> (NewPost, Vec<i32>) {
        let post = NewPost {
            user_id,
            title: self.title,
            content: self.content,
        };
        (post, self.tags)
    }

    pub fn into_changes(self) -> (PostChanges, Vec<i32>) {
        let changes = PostChanges {
            title: self.title,
            content: self.content,
        };
        (changes, self.tags)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = crate::schema::posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub user_id: i32,
}

impl Post {
    /// e.g. `Sat Mar 2 2024, 6:05 PM`
    pub fn friendly_date(&self) -> String {
        self.created_at.format("%a %b %-d %Y, %-I:%M %p").to_string()
    }
}
