use axum::extract::{Path, Request, State};
use axum::response::{Html, Response};
use axum::routing::{get, post};
use axum::{RequestExt, Router};
use axum_extra::extract::Form;
use tera::Context;

use crate::error::AppError;
use crate::models::user::UserForm;
use crate::services::{BloglyService, PostService, Svc, UserService};

use super::{found, RouteState};

async fn list_users<S: UserService>(
    State((usersvc, templates)): State<RouteState<S>>,
) -> Result<Html<String>, AppError> {
    let users = usersvc.get_users().await?;

    let mut ctx = Context::new();
    ctx.insert("users", &users);
    templates.render("users/list.html", &ctx).await
}

async fn new_user_form<S: Svc>(
    State((_, templates)): State<RouteState<S>>,
) -> Result<Html<String>, AppError> {
    templates.render("users/new.html", &Context::new()).await
}

async fn create_user<S: UserService>(
    State((usersvc, _)): State<RouteState<S>>,
    req: Request,
) -> Result<Response, AppError> {
    let Form(form): Form<UserForm> = req.extract().await?;
    usersvc.create_user(&form.normalized()).await?;
    Ok(found("/users"))
}

async fn show_user<S: UserService + PostService>(
    State((svc, templates)): State<RouteState<S>>,
    Path(user_id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let user = svc.get_user(user_id).await?;
    let posts = svc.get_user_posts(user_id).await?;

    let mut ctx = Context::new();
    ctx.insert("user", &user);
    ctx.insert("full_name", &user.full_name());
    ctx.insert("posts", &posts);
    templates.render("users/detail.html", &ctx).await
}

async fn edit_user_form<S: UserService>(
    State((usersvc, templates)): State<RouteState<S>>,
    Path(user_id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let user = usersvc.get_user(user_id).await?;

    let mut ctx = Context::new();
    ctx.insert("user", &user);
    templates.render("users/edit.html", &ctx).await
}

async fn update_user<S: UserService>(
    State((usersvc, _)): State<RouteState<S>>,
    Path(user_id): Path<i32>,
    req: Request,
) -> Result<Response, AppError> {
    let Form(form): Form<UserForm> = req.extract().await?;
    usersvc.update_user(user_id, &form.normalized()).await?;
    Ok(found("/users"))
}

async fn delete_user<S: UserService>(
    State((usersvc, _)): State<RouteState<S>>,
    Path(user_id): Path<i32>,
) -> Result<Response, AppError> {
    usersvc.delete_user(user_id).await?;
    Ok(found("/users"))
}

pub fn router<S: BloglyService>() -> Router<RouteState<S>> {
    Router::new()
        .route("/users", get(list_users::<S>))
        .route("/users/new", get(new_user_form::<S>).post(create_user::<S>))
        .route("/users/:id", get(show_user::<S>))
        .route("/users/:id/edit", get(edit_user_form::<S>).post(update_user::<S>))
        .route("/users/:id/delete", post(delete_user::<S>))
}
