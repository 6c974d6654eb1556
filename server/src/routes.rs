//! Static routing table.
//!
//! Public paths (health and API docs) sit outside the API-key check;
//! everything under `/v1` goes through it. Both halves share the logging and
//! correlation-id layers, which are applied around the merged router.

use axum::{
    http::{header, StatusCode},
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::handlers::{
    create_task, delete_task, list_external_tasks, list_tasks, method_not_allowed, update_task,
};
use crate::middleware::{log_request, require_api_key, tag_request_id};
use crate::AppState;

const OPENAPI_YAML: &str = include_str!("../docs/openapi.yaml");

const SWAGGER_HTML: &str = r#"<!doctype html>
<html>
  <head>
    <meta charset="UTF-8" />
    <title>Tasks API</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
  </head>
  <body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
      window.ui = SwaggerUIBundle({ url: '/swagger.yaml', dom_id: '#swagger-ui' });
    </script>
  </body>
</html>"#;

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(public_routes())
        .merge(private_routes(state))
        .layer(middleware::from_fn(tag_request_id))
        .layer(middleware::from_fn(log_request))
}

fn public_routes() -> Router {
    Router::new()
        .route("/healthz", get(health).fallback(method_not_allowed))
        .route("/swagger", get(swagger_ui).fallback(method_not_allowed))
        .route("/swagger.yaml", get(openapi_document).fallback(method_not_allowed))
}

fn private_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/tasks",
            get(list_tasks)
                .post(create_task)
                .patch(update_task)
                .delete(delete_task)
                .fallback(method_not_allowed),
        )
        .route(
            "/v1/external-tasks",
            get(list_external_tasks).fallback(method_not_allowed),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

async fn swagger_ui() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        SWAGGER_HTML,
    )
}

async fn openapi_document() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/yaml")], OPENAPI_YAML)
}
