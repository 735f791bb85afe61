use axum::extract::{DefaultBodyLimit, Request, State};
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::error::{ServerError, ServerResult};
use crate::handler;
use crate::path::DataPath;
use crate::state::AppState;

/// Build the axum router with all blobd endpoints.
///
/// Blob requests are not matched by axum's router: they fall through to
/// [`dispatch`], which parses the path itself so that malformed `/data`
/// paths report 400 instead of 404.
pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_blob_size);
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .fallback(dispatch)
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Route a request by path shape and method.
///
/// | shape                     | PUT    | GET  | DELETE | other |
/// |---------------------------|--------|------|--------|-------|
/// | `/data/{repo}`            | create | 400  | 400    | 405   |
/// | `/data/{repo}/{objectID}` | 405    | read | delete | 405   |
/// | malformed `/data/...`     | 400    | 400  | 400    | 400   |
pub async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
    let method = request.method().clone();
    let path = DataPath::parse(request.uri().path());
    route(&state, &method, path, request).await.into_response()
}

async fn route(state: &AppState, method: &Method, path: DataPath, request: Request) -> ServerResult<Response> {
    match path {
        DataPath::Outside => Err(ServerError::NotFound),
        DataPath::Malformed(reason) => {
            tracing::info!(%method, path = %request.uri().path(), reason, "malformed request path");
            Err(ServerError::BadRequest(reason.into()))
        }
        DataPath::Repository(repository) => {
            tracing::info!(%method, %repository, object_id = "", "request");
            if *method == Method::PUT {
                handler::create(state, repository, request).await
            } else if *method == Method::GET || *method == Method::DELETE {
                Err(ServerError::BadRequest("object id required".into()))
            } else {
                Err(ServerError::MethodNotAllowed { allow: "PUT" })
            }
        }
        DataPath::Object {
            repository,
            object_id,
        } => {
            tracing::info!(%method, %repository, %object_id, "request");
            if *method == Method::GET {
                handler::read(state, repository, &object_id).await
            } else if *method == Method::DELETE {
                handler::delete(state, repository, &object_id).await
            } else {
                Err(ServerError::MethodNotAllowed { allow: "GET, DELETE" })
            }
        }
    }
}
