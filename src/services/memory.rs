//! In-process stand-in for [`super::BloglyDb`] used by the router tests.
//! Misses surface as `diesel::result::Error::NotFound`, like the real thing.

use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::bail;
use axum::async_trait;
use chrono::Utc;
use diesel::result::Error::NotFound;

use crate::models::post::*;
use crate::models::tag::*;
use crate::models::user::*;

use super::{PostService, Svc, TagService, UserService};

#[derive(Default)]
struct Tables {
    last_id: i32,
    users: Vec<User>,
    posts: Vec<Post>,
    tags: Vec<Tag>,
    posts_tags: Vec<PostTag>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }

    fn relink(&mut self, post_id: i32, tag_ids: &[i32]) -> anyhow::Result<()> {
        if let Some(missing) = tag_ids.iter().find(|&&t| !self.tags.iter().any(|tag| tag.id == t)) {
            bail!("posts_tags_tag_id_fkey violated by tag {missing}");
        }
        self.posts_tags.retain(|pt| pt.post_id != post_id);
        for &tag_id in tag_ids {
            let row = PostTag { post_id, tag_id };
            if !self.posts_tags.contains(&row) {
                self.posts_tags.push(row);
            }
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct BloglyMem {
    tables: Arc<Mutex<Tables>>,
}

impl Svc for BloglyMem {}

impl BloglyMem {
    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }
}

#[async_trait]
impl UserService<anyhow::Error> for BloglyMem {
    async fn get_users(&self) -> anyhow::Result<Vec<User>> {
        let mut us = self.lock().users.clone();
        us.sort_by(|a, b| (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name)));
        Ok(us)
    }

    async fn get_user(&self, user_id: i32) -> anyhow::Result<User> {
        let t = self.lock();
        let user = t.users.iter().find(|u| u.id == user_id).ok_or(NotFound)?;
        Ok(user.clone())
    }

    async fn create_user(&self, form: &UserForm) -> anyhow::Result<User> {
        let mut t = self.lock();
        let user = User {
            id: t.next_id(),
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            image_url: form.image_url.clone(),
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, user_id: i32, form: &UserForm) -> anyhow::Result<User> {
        let mut t = self.lock();
        let user = t.users.iter_mut().find(|u| u.id == user_id).ok_or(NotFound)?;
        user.first_name = form.first_name.clone();
        user.last_name = form.last_name.clone();
        user.image_url = form.image_url.clone();
        Ok(user.clone())
    }

    async fn delete_user(&self, user_id: i32) -> anyhow::Result<User> {
        let mut t = self.lock();
        let idx = t.users.iter().position(|u| u.id == user_id).ok_or(NotFound)?;
        let user = t.users.remove(idx);

        let owned: Vec<i32> = t
            .posts
            .iter()
            .filter(|p| p.user_id == user_id)
            .map(|p| p.id)
            .collect();
        t.posts.retain(|p| p.user_id != user_id);
        t.posts_tags.retain(|pt| !owned.contains(&pt.post_id));
        Ok(user)
    }
}

#[async_trait]
impl PostService<anyhow::Error> for BloglyMem {
    async fn get_user_posts(&self, user_id: i32) -> anyhow::Result<Vec<Post>> {
        let t = self.lock();
        Ok(t.posts.iter().filter(|p| p.user_id == user_id).cloned().collect())
    }

    async fn get_post(&self, post_id: i32) -> anyhow::Result<Post> {
        let t = self.lock();
        let post = t.posts.iter().find(|p| p.id == post_id).ok_or(NotFound)?;
        Ok(post.clone())
    }

    async fn get_post_tags(&self, post_id: i32) -> anyhow::Result<Vec<Tag>> {
        let t = self.lock();
        let mut ts: Vec<Tag> = t
            .tags
            .iter()
            .filter(|tag| t.posts_tags.contains(&PostTag { post_id, tag_id: tag.id }))
            .cloned()
            .collect();
        ts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(ts)
    }

    async fn create_post(&self, new: &NewPost, tag_ids: &[i32]) -> anyhow::Result<Post> {
        let mut t = self.lock();
        if !t.users.iter().any(|u| u.id == new.user_id) {
            bail!("posts_user_id_fkey violated by user {}", new.user_id);
        }
        let post = Post {
            id: t.next_id(),
            title: new.title.clone(),
            content: new.content.clone(),
            created_at: Utc::now().naive_utc(),
            user_id: new.user_id,
        };
        t.relink(post.id, tag_ids)?;
        t.posts.push(post.clone());
        Ok(post)
    }

    async fn update_post(
        &self,
        post_id: i32,
        changes: &PostChanges,
        tag_ids: &[i32],
    ) -> anyhow::Result<Post> {
        let mut t = self.lock();
        if !t.posts.iter().any(|p| p.id == post_id) {
            return Err(NotFound.into());
        }
        t.relink(post_id, tag_ids)?;
        let post = t.posts.iter_mut().find(|p| p.id == post_id).ok_or(NotFound)?;
        post.title = changes.title.clone();
        post.content = changes.content.clone();
        Ok(post.clone())
    }

    async fn delete_post(&self, post_id: i32) -> anyhow::Result<Post> {
        let mut t = self.lock();
        let idx = t.posts.iter().position(|p| p.id == post_id).ok_or(NotFound)?;
        let post = t.posts.remove(idx);
        t.posts_tags.retain(|pt| pt.post_id != post_id);
        Ok(post)
    }
}

#[async_trait]
impl TagService<anyhow::Error> for BloglyMem {
    async fn get_tags(&self) -> anyhow::Result<Vec<Tag>> {
        let mut ts = self.lock().tags.clone();
        ts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(ts)
    }

    async fn get_tag(&self, tag_id: i32) -> anyhow::Result<Tag> {
        let t = self.lock();
        let tag = t.tags.iter().find(|tag| tag.id == tag_id).ok_or(NotFound)?;
        Ok(tag.clone())
    }

    async fn get_tag_posts(&self, tag_id: i32) -> anyhow::Result<Vec<Post>> {
        let t = self.lock();
        Ok(t.posts
            .iter()
            .filter(|p| t.posts_tags.contains(&PostTag { post_id: p.id, tag_id }))
            .cloned()
            .collect())
    }

    async fn create_tag(&self, form: &TagForm) -> anyhow::Result<Tag> {
        let mut t = self.lock();
        if t.tags.iter().any(|tag| tag.name == form.name) {
            bail!("tags_name_key violated by {:?}", form.name);
        }
        let tag = Tag {
            id: t.next_id(),
            name: form.name.clone(),
        };
        t.tags.push(tag.clone());
        Ok(tag)
    }

    async fn update_tag(&self, tag_id: i32, form: &TagForm) -> anyhow::Result<Tag> {
        let mut t = self.lock();
        let tag = t.tags.iter_mut().find(|tag| tag.id == tag_id).ok_or(NotFound)?;
        tag.name = form.name.clone();
        Ok(tag.clone())
    }

    async fn delete_tag(&self, tag_id: i32) -> anyhow::Result<Tag> {
        let mut t = self.lock();
        let idx = t.tags.iter().position(|tag| tag.id == tag_id).ok_or(NotFound)?;
        let tag = t.tags.remove(idx);
        t.posts_tags.retain(|pt| pt.tag_id != tag_id);
        Ok(tag)
    }
}
