use axum::extract::{Path, Request, State};
use axum::response::{Html, Response};
use axum::routing::{get, post};
use axum::{RequestExt, Router};
use axum_extra::extract::Form;
use tera::Context;
use tracing::debug;

use crate::error::AppError;
use crate::models::post::PostForm;
use crate::models::tag::TagChoice;
use crate::services::{BloglyService, PostService, TagService, UserService};

use super::{found, RouteState};

async fn new_post_form<S: UserService + TagService>(
    State((svc, templates)): State<RouteState<S>>,
    Path(user_id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let user = svc.get_user(user_id).await?;
    let tags = svc.get_tags().await?;

    let mut ctx = Context::new();
    ctx.insert("user", &user);
    ctx.insert("full_name", &user.full_name());
    ctx.insert("tags", &TagChoice::list(&tags, &[]));
    templates.render("posts/new.html", &ctx).await
}

async fn create_post<S: UserService + PostService>(
    State((svc, _)): State<RouteState<S>>,
    Path(user_id): Path<i32>,
    req: Request,
) -> Result<Response, AppError> {
    let Form(form): Form<PostForm> = req.extract().await?;
    let user = svc.get_user(user_id).await?;

    let (new_post, tag_ids) = form.into_new_post(user.id);
    let post = svc.create_post(&new_post, &tag_ids).await?;
    debug!(post.id, user.id, "post created from form");

    Ok(found(format!("/users/{}", user.id)))
}

async fn show_post<S: UserService + PostService>(
    State((svc, templates)): State<RouteState<S>>,
    Path(post_id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let post = svc.get_post(post_id).await?;
    let author = svc.get_user(post.user_id).await?;
    let tags = svc.get_post_tags(post_id).await?;

    let mut ctx = Context::new();
    ctx.insert("post", &post);
    ctx.insert("created", &post.friendly_date());
    ctx.insert("author", &author);
    ctx.insert("author_name", &author.full_name());
    ctx.insert("tags", &tags);
    templates.render("posts/detail.html", &ctx).await
}

async fn edit_post_form<S: PostService + TagService>(
    State((svc, templates)): State<RouteState<S>>,
    Path(post_id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let post = svc.get_post(post_id).await?;
    let selected = svc.get_post_tags(post_id).await?;
    let tags = svc.get_tags().await?;

    let mut ctx = Context::new();
    ctx.insert("post", &post);
    ctx.insert("tags", &TagChoice::list(&tags, &selected));
    templates.render("posts/edit.html", &ctx).await
}

async fn update_post<S: PostService>(
    State((svc, _)): State<RouteState<S>>,
    Path(post_id): Path<i32>,
    req: Request,
) -> Result<Response, AppError> {
    let Form(form): Form<PostForm> = req.extract().await?;

    let (changes, tag_ids) = form.into_changes();
    svc.update_post(post_id, &changes, &tag_ids).await?;
    Ok(found(format!("/posts/{post_id}")))
}

async fn delete_post<S: PostService>(
    State((svc, _)): State<RouteState<S>>,
    Path(post_id): Path<i32>,
) -> Result<Response, AppError> {
    let post = svc.delete_post(post_id).await?;
    Ok(found(format!("/users/{}", post.user_id)))
}

pub fn router<S: BloglyService>() -> Router<RouteState<S>> {
    Router::new()
        .route(
            "/users/:id/posts/new",
            get(new_post_form::<S>).post(create_post::<S>),
        )
        .route("/posts/:id", get(show_post::<S>))
        .route("/posts/:id/edit", get(edit_post_form::<S>).post(update_post::<S>))
        .route("/posts/:id/delete", post(delete_post::<S>))
}
