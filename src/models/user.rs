use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Shown for users who did not give an image. Matches the column default.
pub const DEFAULT_IMAGE_URL: &str = "https://www.gravatar.com/avatar/?d=mp";

// the body of the new-user and edit-user forms
#[derive(Debug, Clone, Deserialize, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserForm {
    #[serde(rename = "first-name")]
    pub first_name: String,
    #[serde(rename = "last-name")]
    pub last_name: String,
    #[serde(rename = "img-url", default)]
    pub image_url: String,
}

impl UserForm {
    /// A blank image URL becomes [`DEFAULT_IMAGE_URL`].
    pub fn normalized(mut self) -> Self {
        let trimmed = self.image_url.trim();
        self.image_url = if trimmed.is_empty() {
            DEFAULT_IMAGE_URL.to_owned()
        } else {
            trimmed.to_owned()
        };
        self
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub image_url: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
