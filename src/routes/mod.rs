pub mod posts;
pub mod tags;
pub mod users;

#[cfg(test)]
mod testing;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::middleware::logging::HttpLoggingExt;
use crate::services::BloglyService;
use crate::templates::Templates;

pub type RouteState<S> = (S, Templates);

/// `302 Found` to `location`.
pub fn found(location: impl Into<String>) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.into())]).into_response()
}

async fn homepage() -> Response {
    found("/users")
}

pub fn router<S: BloglyService>() -> Router<RouteState<S>> {
    Router::new()
        .route("/", get(homepage))
        .merge(users::router())
        .merge(posts::router())
        .merge(tags::router())
}

/// The whole site: pages, static assets under `/static`, request logging.
pub fn app<S: BloglyService>(svc: S, templates: Templates, static_dir: &str) -> Router {
    Router::new()
        .merge(router().with_state((svc, templates)))
        .nest_service(
            "/static",
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::CACHE_CONTROL,
                    header::HeaderValue::from_static("max-age=13420"),
                ))
                .layer(CompressionLayer::new())
                .service(tower_http::services::ServeDir::new(static_dir)),
        )
        .with_http_logging()
}
