use axum::body::Bytes;
use axum::extract::{FromRequest, Request, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

use blobd_store::{DeleteOutcome, StoredBlob};
use blobd_types::{ObjectId, Repository};

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Body of a successful create.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateResponse {
    pub oid: ObjectId,
    pub size: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "ok".into() }
    }
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Info handler: build version and current table occupancy.
pub async fn info_handler(State(state): State<AppState>) -> ServerResult<Json<serde_json::Value>> {
    let stats = state.table.stats()?;
    Ok(Json(json!({
        "name": "blobd",
        "version": env!("CARGO_PKG_VERSION"),
        "oid_strategy": state.oids.strategy(),
        "objects": stats.objects,
        "bytes": stats.bytes,
    })))
}

/// `PUT /data/{repository}`
///
/// The body is buffered completely before anything touches the table, so a
/// failed or oversized upload leaves no trace.
pub async fn create(state: &AppState, repository: Repository, request: Request) -> ServerResult<Response> {
    let body = Bytes::from_request(request, state).await.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ServerError::PayloadTooLarge {
                limit: state.max_blob_size,
            }
        } else {
            ServerError::Transport(rejection.body_text())
        }
    })?;

    let oid = state.oids.generate(&body);
    let blob = StoredBlob::new(body);
    let size = blob.size();
    state.table.put(&repository, oid, blob)?;

    tracing::debug!(%repository, oid = %oid.short_hex(), size, "object created");
    Ok((StatusCode::CREATED, Json(CreateResponse { oid, size })).into_response())
}

/// `GET /data/{repository}/{objectID}`
pub async fn read(state: &AppState, repository: Repository, object_id: &str) -> ServerResult<Response> {
    let oid = parse_oid(object_id)?;
    let blob = state.table.get(&repository, &oid)?.ok_or(ServerError::NotFound)?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/octet-stream")],
        blob.into_data(),
    )
        .into_response())
}

/// `DELETE /data/{repository}/{objectID}`
///
/// The first delete of an object reports 200; every later one reports 404.
pub async fn delete(state: &AppState, repository: Repository, object_id: &str) -> ServerResult<Response> {
    let oid = parse_oid(object_id)?;
    match state.table.delete(&repository, &oid)? {
        DeleteOutcome::Deleted => {
            tracing::debug!(%repository, oid = %oid.short_hex(), "object deleted");
            Ok(StatusCode::OK.into_response())
        }
        DeleteOutcome::NotFound => Err(ServerError::NotFound),
    }
}

/// An object ID that does not parse cannot name a stored object.
fn parse_oid(object_id: &str) -> ServerResult<ObjectId> {
    object_id.parse().map_err(|e| {
        tracing::debug!(object_id, error = %e, "unparseable object id");
        ServerError::NotFound
    })
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use blobd_crypto::{ContentOidGenerator, RandomOidGenerator};
    use blobd_store::InMemoryObjectTable;

    use super::*;

    fn state() -> AppState {
        AppState::new(Arc::new(InMemoryObjectTable::new()), Arc::new(RandomOidGenerator), 1024)
    }

    fn put_request(body: &'static str) -> Request {
        Request::builder()
            .method("PUT")
            .uri("/data/codingtest")
            .body(Body::from(body))
            .unwrap()
    }

    fn repo() -> Repository {
        Repository::new("codingtest").unwrap()
    }

    async fn create_ok(state: &AppState, body: &'static str) -> CreateResponse {
        let response = create(state, repo(), put_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_reports_oid_and_size() {
        let state = state();
        let created = create_ok(&state, "something").await;
        assert_eq!(created.size, 9);
        assert!(state.table.contains(&repo(), &created.oid).unwrap());
    }

    #[tokio::test]
    async fn create_accepts_empty_body() {
        let state = state();
        let created = create_ok(&state, "").await;
        assert_eq!(created.size, 0);
    }

    #[tokio::test]
    async fn content_strategy_dedups() {
        let state = AppState::new(Arc::new(InMemoryObjectTable::new()), Arc::new(ContentOidGenerator), 1024);
        let a = create_ok(&state, "same").await;
        let b = create_ok(&state, "same").await;
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn body_failure_mid_read_stores_nothing() {
        let table = Arc::new(InMemoryObjectTable::new());
        let state = AppState::new(table.clone(), Arc::new(RandomOidGenerator), 1024);
        let chunks: Vec<Result<Bytes, io::Error>> = vec![
            Ok(Bytes::from_static(b"part")),
            Err(io::Error::other("connection reset")),
        ];
        let request = Request::builder()
            .method("PUT")
            .uri("/data/codingtest")
            .body(Body::from_stream(futures_util::stream::iter(chunks)))
            .unwrap();

        let err = create(&state, repo(), request).await.unwrap_err();
        assert!(matches!(err, ServerError::Transport(_)));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(table.is_empty().unwrap());
    }

    #[tokio::test]
    async fn info_reports_table_stats() {
        let state = state();
        create_ok(&state, "something").await;
        create_ok(&state, "other").await;

        let Json(info) = info_handler(State(state)).await.unwrap();
        assert_eq!(info["name"], "blobd");
        assert_eq!(info["oid_strategy"], "random");
        assert_eq!(info["objects"], 2);
        assert_eq!(info["bytes"], 14);
    }

    #[tokio::test]
    async fn read_returns_raw_bytes() {
        let state = state();
        let created = create_ok(&state, "other").await;
        let response = read(&state, repo(), &created.oid.to_hex()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"other");
    }

    #[tokio::test]
    async fn read_unknown_is_not_found() {
        let state = state();
        let missing = ObjectId::from_hash([3; 32]).to_hex();
        assert!(matches!(read(&state, repo(), &missing).await, Err(ServerError::NotFound)));
        assert!(matches!(read(&state, repo(), "unknown-oid").await, Err(ServerError::NotFound)));
    }

    #[tokio::test]
    async fn delete_then_delete_again() {
        let state = state();
        let created = create_ok(&state, "something").await;
        let oid = created.oid.to_hex();

        let first = delete(&state, repo(), &oid).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        assert!(matches!(delete(&state, repo(), &oid).await, Err(ServerError::NotFound)));
        assert!(matches!(read(&state, repo(), &oid).await, Err(ServerError::NotFound)));
    }

    #[tokio::test]
    async fn health_is_ok() {
        let Json(health) = health_handler().await;
        assert_eq!(health.status, "ok");
    }
}
