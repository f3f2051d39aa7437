use axum::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::{info, instrument};

use crate::models::post::*;
use crate::models::tag::{PostTag, Tag};
use crate::schema::{posts, posts_tags, tags};

use super::{BloglyDb, Svc};

#[async_trait]
pub trait PostService<E = anyhow::Error>: Svc {
    async fn get_user_posts(&self, user_id: i32) -> Result<Vec<Post>, E>;
    async fn get_post(&self, post_id: i32) -> Result<Post, E>;
    async fn get_post_tags(&self, post_id: i32) -> Result<Vec<Tag>, E>;
    async fn create_post(&self, post: &NewPost, tag_ids: &[i32]) -> Result<Post, E>;
    /// Overwrites title, content and the whole tag set.
    async fn update_post(
        &self,
        post_id: i32,
        changes: &PostChanges,
        tag_ids: &[i32],
    ) -> Result<Post, E>;
    async fn delete_post(&self, post_id: i32) -> Result<Post, E>;
}

async fn link_tags(
    conn: &mut AsyncPgConnection,
    post_id: i32,
    tag_ids: &[i32],
) -> QueryResult<()> {
    if tag_ids.is_empty() {
        return Ok(());
    }

    let rows: Vec<PostTag> = tag_ids
        .iter()
        .map(|&tag_id| PostTag { post_id, tag_id })
        .collect();
    diesel::insert_into(posts_tags::table)
        .values(&rows)
        .on_conflict_do_nothing()
        .execute(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl PostService<anyhow::Error> for BloglyDb {
    async fn get_user_posts(&self, user_id: i32) -> anyhow::Result<Vec<Post>> {
        let mut conn = self.db.get().await?;
        let ps = posts::table
            .filter(posts::user_id.eq(user_id))
            .order((posts::created_at, posts::id))
            .select(Post::as_select())
            .load(&mut conn)
            .await?;
        Ok(ps)
    }

    async fn get_post(&self, post_id: i32) -> anyhow::Result<Post> {
        let mut conn = self.db.get().await?;
        let post = posts::table
            .find(post_id)
            .select(Post::as_select())
            .first(&mut conn)
            .await?;
        Ok(post)
    }

    async fn get_post_tags(&self, post_id: i32) -> anyhow::Result<Vec<Tag>> {
        let mut conn = self.db.get().await?;
        let ts = tags::table
            .inner_join(posts_tags::table)
            .filter(posts_tags::post_id.eq(post_id))
            .order(tags::name)
            .select(Tag::as_select())
            .load(&mut conn)
            .await?;
        Ok(ts)
    }

    #[instrument(skip_all, fields(user_id = post.user_id))]
    async fn create_post(&self, post: &NewPost, tag_ids: &[i32]) -> anyhow::Result<Post> {
        let mut conn = self.db.get().await?;

        let created = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let created = diesel::insert_into(posts::table)
                        .values(post)
                        .returning(Post::as_returning())
                        .get_result(conn)
                        .await?;
                    link_tags(conn, created.id, tag_ids).await?;
                    Ok(created)
                }
                .scope_boxed()
            })
            .await?;

        info!(post_id = created.id, "created post");
        Ok(created)
    }

    #[instrument(skip(self, changes))]
    async fn update_post(
        &self,
        post_id: i32,
        changes: &PostChanges,
        tag_ids: &[i32],
    ) -> anyhow::Result<Post> {
        let mut conn = self.db.get().await?;

        let updated = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let updated = diesel::update(posts::table.find(post_id))
                        .set(changes)
                        .returning(Post::as_returning())
                        .get_result(conn)
                        .await?;
                    diesel::delete(posts_tags::table.filter(posts_tags::post_id.eq(post_id)))
                        .execute(conn)
                        .await?;
                    link_tags(conn, post_id, tag_ids).await?;
                    Ok(updated)
                }
                .scope_boxed()
            })
            .await?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete_post(&self, post_id: i32) -> anyhow::Result<Post> {
        let mut conn = self.db.get().await?;
        let post = diesel::delete(posts::table.find(post_id))
            .returning(Post::as_returning())
            .get_result(&mut conn)
            .await?;

        info!(user_id = post.user_id, "deleted post");
        Ok(post)
    }
}
