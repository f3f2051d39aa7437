use axum::extract::{Path, Request, State};
use axum::response::{Html, Response};
use axum::routing::{get, post};
use axum::{RequestExt, Router};
use axum_extra::extract::Form;
use tera::Context;

use crate::error::AppError;
use crate::models::tag::TagForm;
use crate::services::{BloglyService, Svc, TagService};

use super::{found, RouteState};

async fn list_tags<S: TagService>(
    State((tagsvc, templates)): State<RouteState<S>>,
) -> Result<Html<String>, AppError> {
    let tags = tagsvc.get_tags().await?;

    let mut ctx = Context::new();
    ctx.insert("tags", &tags);
    templates.render("tags/list.html", &ctx).await
}

async fn new_tag_form<S: Svc>(
    State((_, templates)): State<RouteState<S>>,
) -> Result<Html<String>, AppError> {
    templates.render("tags/new.html", &Context::new()).await
}

async fn create_tag<S: TagService>(
    State((tagsvc, _)): State<RouteState<S>>,
    req: Request,
) -> Result<Response, AppError> {
    let Form(form): Form<TagForm> = req.extract().await?;
    tagsvc.create_tag(&form).await?;
    Ok(found("/tags"))
}

async fn show_tag<S: TagService>(
    State((tagsvc, templates)): State<RouteState<S>>,
    Path(tag_id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let tag = tagsvc.get_tag(tag_id).await?;
    let posts = tagsvc.get_tag_posts(tag_id).await?;

    let mut ctx = Context::new();
    ctx.insert("tag", &tag);
    ctx.insert("posts", &posts);
    templates.render("tags/detail.html", &ctx).await
}

async fn edit_tag_form<S: TagService>(
    State((tagsvc, templates)): State<RouteState<S>>,
    Path(tag_id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let tag = tagsvc.get_tag(tag_id).await?;

    let mut ctx = Context::new();
    ctx.insert("tag", &tag);
    templates.render("tags/edit.html", &ctx).await
}

async fn update_tag<S: TagService>(
    State((tagsvc, _)): State<RouteState<S>>,
    Path(tag_id): Path<i32>,
    req: Request,
) -> Result<Response, AppError> {
    let Form(form): Form<TagForm> = req.extract().await?;
    tagsvc.update_tag(tag_id, &form).await?;
    Ok(found("/tags"))
}

async fn delete_tag<S: TagService>(
    State((tagsvc, _)): State<RouteState<S>>,
    Path(tag_id): Path<i32>,
) -> Result<Response, AppError> {
    tagsvc.delete_tag(tag_id).await?;
    Ok(found("/tags"))
}

pub fn router<S: BloglyService>() -> Router<RouteState<S>> {
    Router::new()
        .route("/tags", get(list_tags::<S>))
        .route("/tags/new", get(new_tag_form::<S>).post(create_tag::<S>))
        .route("/tags/:id", get(show_tag::<S>))
        .route("/tags/:id/edit", get(edit_tag_form::<S>).post(update_tag::<S>))
        .route("/tags/:id/delete", post(delete_tag::<S>))
}
