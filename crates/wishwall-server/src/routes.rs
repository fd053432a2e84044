use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use wishwall_engine::Wish;

use crate::store::{NewWish, StoreError, WishStore};

pub type SharedStore = Arc<Mutex<dyn WishStore>>;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
}

impl AppState {
    pub fn new(store: impl WishStore + 'static) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("wish store unavailable: {0}")]
    Internal(String),
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Store(StoreError::Validation) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "wish request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Serialize)]
struct WishList {
    wishes: Vec<Wish>,
}

/// `/api/wishes` with permissive CORS. Methods other than GET, POST and
/// OPTIONS get 405 from the method router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            "/api/wishes",
            get(list_wishes).post(create_wish).options(preflight),
        )
        .layer(cors)
        .with_state(state)
}

/// Run a store operation off the async runtime, holding the store lock.
async fn with_store<R, F>(state: &AppState, f: F) -> Result<R, ApiError>
where
    R: Send + 'static,
    F: FnOnce(&mut dyn WishStore) -> Result<R, StoreError> + Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || {
        // Both stores are whole after any panic inside a call, so a
        // poisoned lock is still safe to reuse.
        let mut guard = store.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("wish store lock was poisoned, recovering");
            store.clear_poison();
            poisoned.into_inner()
        });
        f(&mut *guard).map_err(ApiError::from)
    })
    .await?
}

async fn list_wishes(State(state): State<AppState>) -> Result<Json<WishList>, ApiError> {
    let wishes = with_store(&state, |store| Ok(store.list())).await?;
    tracing::debug!(count = wishes.len(), "listed wishes");
    Ok(Json(WishList { wishes }))
}

async fn create_wish(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Wish>), ApiError> {
    let new: NewWish = serde_json::from_slice(&body).map_err(|_| StoreError::Validation)?;
    new.validate()?;
    let wish = with_store(&state, move |store| store.append(&new)).await?;
    tracing::info!(id = %wish.id, name = %wish.name, "wish created");
    Ok((StatusCode::CREATED, Json(wish)))
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{now_millis, FileWishStore, MemoryWishStore};
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> (Router, AppState) {
        let state = AppState::new(MemoryWishStore::new());
        (router(state.clone()), state)
    }

    fn post(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/wishes")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_list() -> Request<Body> {
        Request::builder()
            .uri("/api/wishes")
            .body(Body::empty())
            .unwrap()
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    fn json_of(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    #[tokio::test]
    async fn post_then_list_round_trip() {
        let (app, _) = app();
        let before = now_millis();
        let (status, body) = send(&app, post(r#"{"name":"Asha","message":"Happy New Year"}"#)).await;
        let after = now_millis();
        assert_eq!(status, StatusCode::CREATED);
        let created = json_of(&body);
        assert_eq!(created["name"], "Asha");
        assert_eq!(created["message"], "Happy New Year");
        assert!(created["id"].as_str().is_some_and(|id| !id.is_empty()));
        let created_at = created["createdAt"].as_u64().unwrap();
        assert!(
            (before..=after).contains(&created_at),
            "createdAt {} outside {}..={}",
            created_at,
            before,
            after
        );

        let (status, body) = send(&app, get_list()).await;
        assert_eq!(status, StatusCode::OK);
        let list = json_of(&body);
        assert_eq!(list["wishes"][0], created);
    }

    #[tokio::test]
    async fn blank_fields_are_rejected_and_store_untouched() {
        let (app, state) = app();
        for body in [
            r#"{"name":"  ","message":"hi"}"#,
            r#"{"name":"Asha"}"#,
            "not json",
        ] {
            let (status, bytes) = send(&app, post(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
            assert_eq!(json_of(&bytes)["error"], "name and message are required");
        }
        assert!(state.store.lock().unwrap().list().is_empty());
    }

    #[tokio::test]
    async fn options_is_ok_with_empty_body() {
        let (app, _) = app();
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/wishes")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn cors_preflight_allows_any_origin() {
        let (app, _) = app();
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/wishes")
            .header(header::ORIGIN, "http://example.test")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        let methods = res.headers()[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
        assert!(methods.contains("POST"));
    }

    #[tokio::test]
    async fn other_methods_are_405() {
        let (app, _) = app();
        let req = Request::builder()
            .method(Method::DELETE)
            .uri("/api/wishes")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn poisoned_store_keeps_serving() {
        let (app, state) = app();
        send(&app, post(r#"{"name":"Asha","message":"before"}"#)).await;

        let store = Arc::clone(&state.store);
        let panicked = std::thread::spawn(move || {
            let _guard = store.lock().unwrap();
            panic!("handler died holding the lock");
        })
        .join();
        assert!(panicked.is_err());
        assert!(state.store.is_poisoned());

        let (status, _) = send(&app, post(r#"{"name":"Ravi","message":"after"}"#)).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, body) = send(&app, get_list()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body)["wishes"].as_array().unwrap().len(), 2);
        assert!(!state.store.is_poisoned());
    }

    #[tokio::test]
    async fn write_failure_is_500() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("wishes.json");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep"), "").unwrap();
        let app = router(AppState::new(FileWishStore::new(&target)));
        let (status, body) = send(&app, post(r#"{"name":"Asha","message":"hi"}"#)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json_of(&body)["error"].as_str().is_some());
    }

    #[tokio::test]
    async fn file_store_serves_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wishes.json");
        let app = router(AppState::new(FileWishStore::new(&path)));

        send(&app, post(r#"{"name":"Asha","message":"first"}"#)).await;
        send(&app, post(r#"{"name":"Ravi","message":"second"}"#)).await;

        let (_, body) = send(&app, get_list()).await;
        let list = json_of(&body);
        assert_eq!(list["wishes"][0]["name"], "Ravi");
        assert_eq!(list["wishes"][1]["name"], "Asha");
    }
}
