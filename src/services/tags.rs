use axum::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{info, instrument};

use crate::models::post::Post;
use crate::models::tag::*;
use crate::schema::{posts, posts_tags, tags};

use super::{BloglyDb, Svc};

#[async_trait]
pub trait TagService<E = anyhow::Error>: Svc {
    /// All tags, by name.
    async fn get_tags(&self) -> Result<Vec<Tag>, E>;
    async fn get_tag(&self, tag_id: i32) -> Result<Tag, E>;
    async fn get_tag_posts(&self, tag_id: i32) -> Result<Vec<Post>, E>;
    async fn create_tag(&self, tag: &TagForm) -> Result<Tag, E>;
    async fn update_tag(&self, tag_id: i32, tag: &TagForm) -> Result<Tag, E>;
    async fn delete_tag(&self, tag_id: i32) -> Result<Tag, E>;
}

#[async_trait]
impl TagService<anyhow::Error> for BloglyDb {
    async fn get_tags(&self) -> anyhow::Result<Vec<Tag>> {
        let mut conn = self.db.get().await?;
        let ts = tags::table
            .order(tags::name)
            .select(Tag::as_select())
            .load(&mut conn)
            .await?;
        Ok(ts)
    }

    async fn get_tag(&self, tag_id: i32) -> anyhow::Result<Tag> {
        let mut conn = self.db.get().await?;
        let tag = tags::table
            .find(tag_id)
            .select(Tag::as_select())
            .first(&mut conn)
            .await?;
        Ok(tag)
    }

    async fn get_tag_posts(&self, tag_id: i32) -> anyhow::Result<Vec<Post>> {
        let mut conn = self.db.get().await?;
        let ps = posts::table
            .inner_join(posts_tags::table)
            .filter(posts_tags::tag_id.eq(tag_id))
            .order((posts::created_at, posts::id))
            .select(Post::as_select())
            .load(&mut conn)
            .await?;
        Ok(ps)
    }

    #[instrument(skip_all, fields(name = %t.name))]
    async fn create_tag(&self, t: &TagForm) -> anyhow::Result<Tag> {
        let mut conn = self.db.get().await?;
        let tag = diesel::insert_into(tags::table)
            .values(t)
            .returning(Tag::as_returning())
            .get_result(&mut conn)
            .await?;

        info!(tag.id, "created tag");
        Ok(tag)
    }

    #[instrument(skip(self, t))]
    async fn update_tag(&self, tag_id: i32, t: &TagForm) -> anyhow::Result<Tag> {
        let mut conn = self.db.get().await?;
        let tag = diesel::update(tags::table.find(tag_id))
            .set(t)
            .returning(Tag::as_returning())
            .get_result(&mut conn)
            .await?;
        Ok(tag)
    }

    #[instrument(skip(self))]
    async fn delete_tag(&self, tag_id: i32) -> anyhow::Result<Tag> {
        let mut conn = self.db.get().await?;
        let tag = diesel::delete(tags::table.find(tag_id))
            .returning(Tag::as_returning())
            .get_result(&mut conn)
            .await?;

        info!("deleted tag");
        Ok(tag)
    }
}
