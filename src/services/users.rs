use axum::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{info, instrument};

use crate::models::user::*;
use crate::schema;

use super::{BloglyDb, Svc};

#[async_trait]
pub trait UserService<E = anyhow::Error>: Svc {
    /// All users, by last name then first name.
    async fn get_users(&self) -> Result<Vec<User>, E>;
    async fn get_user(&self, user_id: i32) -> Result<User, E>;
    async fn create_user(&self, user: &UserForm) -> Result<User, E>;
    async fn update_user(&self, user_id: i32, user: &UserForm) -> Result<User, E>;
    /// Removes the user and, through the foreign key, their posts.
    async fn delete_user(&self, user_id: i32) -> Result<User, E>;
}

#[async_trait]
impl UserService<anyhow::Error> for BloglyDb {
    async fn get_users(&self) -> anyhow::Result<Vec<User>> {
        use schema::users::dsl::*;

        let mut conn = self.db.get().await?;
        let us: Vec<User> = users
            .order((last_name, first_name))
            .select(User::as_select())
            .load(&mut conn)
            .await?;
        Ok(us)
    }

    async fn get_user(&self, user_id: i32) -> anyhow::Result<User> {
        use schema::users::dsl::*;

        let mut conn = self.db.get().await?;
        let user = users
            .find(user_id)
            .select(User::as_select())
            .first(&mut conn)
            .await?;
        Ok(user)
    }

    #[instrument(skip_all)]
    async fn create_user(&self, u: &UserForm) -> anyhow::Result<User> {
        use schema::users::dsl::*;

        let mut conn = self.db.get().await?;

        let user = diesel::insert_into(users)
            .values(u)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await?;

        info!(user.id, "created user");
        Ok(user)
    }

    #[instrument(skip(self, u))]
    async fn update_user(&self, user_id: i32, u: &UserForm) -> anyhow::Result<User> {
        use schema::users::dsl::*;

        let mut conn = self.db.get().await?;
        let user = diesel::update(users.find(user_id))
            .set(u)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, user_id: i32) -> anyhow::Result<User> {
        use schema::users::dsl::*;

        let mut conn = self.db.get().await?;
        let user = diesel::delete(users.find(user_id))
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await?;

        info!("deleted user");
        Ok(user)
    }
}
