//! API integration tests.
//!
//! Builds the full router over a temp database and drives it in-process
//! with `tower::ServiceExt::oneshot`. The speech backend is a stub, so
//! these tests cover routing, auth and persistence rather than ffmpeg.

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::Utc;
use tempfile::TempDir;
use tower::ServiceExt;

use qclip_api::auth::TokenClaims;
use qclip_api::{create_router, ApiConfig, AppState};
use qclip_db::Database;
use qclip_models::EncodingConfig;
use qclip_pipeline::{PipelineError, PipelineResult, SpeechRecognizer, Transcriber, VideoPipeline};
use qclip_storage::ClipStore;

const TEST_SECRET: &str = "integration-secret";

/// Speech backend that always fails, standing in for an unconfigured service.
struct NoSpeech;

#[async_trait::async_trait]
impl SpeechRecognizer for NoSpeech {
    async fn recognize_wav(&self, _audio_path: &Path) -> PipelineResult<String> {
        Err(PipelineError::transcription_failed(
            "speech service not configured",
        ))
    }
}

/// Build an `AppState` backed by temp dirs and no external services.
fn test_state() -> (AppState, TempDir) {
    let dir = TempDir::new().unwrap();
    let config = ApiConfig {
        jwt_secret: TEST_SECRET.to_string(),
        database_path: dir.path().join("api.db"),
        work_dir: dir.path().join("work"),
        ..ApiConfig::default()
    };
    std::fs::create_dir_all(&config.work_dir).unwrap();

    let db = Database::new(config.database_path.clone()).unwrap();
    let store = ClipStore::new(None, None);
    let transcriber = Transcriber::new(Arc::new(NoSpeech));
    let pipeline = VideoPipeline::new(
        db.clone(),
        store.clone(),
        transcriber,
        None,
        EncodingConfig::default(),
    );

    let state = AppState {
        config,
        db,
        store,
        pipeline: Arc::new(pipeline),
        encoding: EncodingConfig::default(),
    };
    (state, dir)
}

fn mint_token(user_id: &str) -> String {
    let claims = TokenClaims {
        sub: user_id.to_string(),
        exp: (Utc::now() + chrono::Duration::hours(1)).timestamp(),
    };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Test health endpoint.
#[tokio::test]
async fn test_health_endpoint() {
    let (state, _dir) = test_state();
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

/// Listing videos without a bearer token is rejected.
#[tokio::test]
async fn test_videos_require_auth() {
    let (state, _dir) = test_state();
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/videos")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A fresh user sees an empty video list.
#[tokio::test]
async fn test_list_videos_empty() {
    let (state, _dir) = test_state();
    let app = create_router(state);
    let token = mint_token("user-1");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/videos")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, serde_json::json!([]));
}

/// Deleting an unknown video returns a 404 with the detail body shape.
#[tokio::test]
async fn test_delete_missing_video() {
    let (state, _dir) = test_state();
    let app = create_router(state);
    let token = mint_token("user-1");

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/videos/no-such-video")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Video not found");
}

/// Upload is auth-gated before any multipart parsing happens.
#[tokio::test]
async fn test_upload_requires_auth() {
    let (state, _dir) = test_state();
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/upload")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A token signed with the wrong secret is rejected.
#[tokio::test]
async fn test_wrong_secret_rejected() {
    let (state, _dir) = test_state();
    let app = create_router(state);

    let claims = TokenClaims {
        sub: "user-1".to_string(),
        exp: (Utc::now() + chrono::Duration::hours(1)).timestamp(),
    };
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(b"some-other-secret"),
    )
    .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/videos")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
