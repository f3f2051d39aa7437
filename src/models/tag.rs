use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TagForm {
    #[serde(rename = "tag-name")]
    pub name: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = crate::schema::tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Tag {
    pub id: i32,
    pub name: String,
}

// one row of the post <-> tag join
#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = crate::schema::posts_tags)]
pub struct PostTag {
    pub post_id: i32,
    pub tag_id: i32,
}

/// A tag rendered as a checkbox on the post forms.
#[derive(Serialize, Debug)]
pub struct TagChoice<'a> {
    pub id: i32,
    pub name: &'a str,
    pub checked: bool,
}

impl<'a> TagChoice<'a> {
    pub fn list(all: &'a [Tag], selected: &[Tag]) -> Vec<Self> {
        all.iter()
            .map(|t| TagChoice {
                id: t.id,
                name: &t.name,
                checked: selected.iter().any(|s| s.id == t.id),
            })
            .collect()
    }
}
