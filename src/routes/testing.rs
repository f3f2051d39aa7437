use std::path::Path;

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use crate::services::memory::BloglyMem;
use crate::templates::Templates;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

pub fn test_app_with(svc: BloglyMem) -> Router {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let templates = Templates::load(root.join("templates")).unwrap();
    let static_dir = root.join("static");
    super::app(svc, templates, static_dir.to_str().unwrap())
}

pub fn test_app() -> Router {
    test_app_with(BloglyMem::default())
}

async fn send(app: &Router, req: Request<Body>) -> TestResponse {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let headers = res.headers().clone();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let req = Request::get(uri).body(Body::empty()).unwrap();
    send(app, req).await
}

/// POST an already urlencoded form body.
pub async fn post_form(app: &Router, uri: &str, form: &str) -> TestResponse {
    let req = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_owned()))
        .unwrap();
    send(app, req).await
}
