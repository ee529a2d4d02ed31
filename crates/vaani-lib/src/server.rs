//! HTTP API for the vaani recitation companion.
//!
//! Verse endpoints proxy the scripture source; TTS endpoints run the
//! phonetic conversion and call the synthesis bridge. CORS-permissive so
//! the companion app can call from any localhost port.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::info;

use vaani_core::types::{ChapterDetail, ChapterSummary, Verse, VerseOfTheDay, VersesCount};

use crate::scripture::{ScriptureClient, ScriptureError};
use crate::synth::{SynthClient, SynthError};

/// Shared state: one client per upstream, constructed at startup.
#[derive(Clone)]
pub struct AppState {
    pub scripture: ScriptureClient,
    pub synth: SynthClient,
}

/// Build the axum router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/v1/slok/{chapter}/{verse}", get(get_verse))
        .route("/api/v1/chapters", get(get_chapters))
        .route("/api/v1/chapter/{chapter}", get(get_chapter))
        .route("/api/v1/chapter/{chapter}/verses-count", get(get_verses_count))
        .route("/api/v1/verse-of-the-day", get(get_verse_of_the_day))
        .route("/api/v1/tts/generate", get(generate_speech_get).post(generate_speech))
        .route("/api/v1/tts/preview", get(phonetic_preview))
        .route("/api/v1/tts/health", get(tts_health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process exits.
pub async fn serve(host: &str, port: u16, state: AppState) -> Result<(), String> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("failed to bind {addr}: {e}"))?;

    info!("vaani listening on {addr}");
    axum::serve(listener, router(state))
        .await
        .map_err(|e| format!("server error: {e}"))
}

// ─── Error mapping ─────────────────────────────────────────────────────────

/// JSON error envelope: `(status, {"detail": …})`.
struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn new(code: u16, detail: String) -> Self {
        Self {
            status: StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            detail,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

impl From<ScriptureError> for ApiError {
    fn from(e: ScriptureError) -> Self {
        Self::new(e.http_status(), e.to_string())
    }
}

impl From<SynthError> for ApiError {
    fn from(e: SynthError) -> Self {
        Self::new(e.http_status(), e.to_string())
    }
}

// ─── Info and health ───────────────────────────────────────────────────────

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "message": "vaani recitation companion API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "verses": "/api/v1/slok/{chapter}/{verse}",
            "chapters": "/api/v1/chapters",
            "verse_of_the_day": "/api/v1/verse-of-the-day",
            "tts": "/api/v1/tts/generate",
            "health": "/health",
        },
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "vaani",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn tts_health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let reachable = state.synth.health().await;
    Json(json!({
        "status": if reachable { "healthy" } else { "degraded" },
        "engine": "mms-bridge",
        "reachable": reachable,
    }))
}

// ─── Verse endpoints ───────────────────────────────────────────────────────

async fn get_verse(
    State(state): State<AppState>,
    Path((chapter, verse)): Path<(u32, u32)>,
) -> Result<Json<Verse>, ApiError> {
    Ok(Json(state.scripture.verse(chapter, verse).await?))
}

async fn get_chapters(State(state): State<AppState>) -> Json<Vec<ChapterSummary>> {
    Json(state.scripture.all_chapters().await)
}

#[derive(serde::Deserialize)]
struct ChapterParams {
    #[serde(default)]
    include_verses: bool,
}

async fn get_chapter(
    State(state): State<AppState>,
    Path(chapter): Path<u32>,
    Query(params): Query<ChapterParams>,
) -> Result<Json<ChapterDetail>, ApiError> {
    let detail = if params.include_verses {
        state.scripture.chapter_with_verses(chapter).await?
    } else {
        ChapterDetail::from(state.scripture.chapter(chapter).await?)
    };
    Ok(Json(detail))
}

async fn get_verses_count(
    State(state): State<AppState>,
    Path(chapter): Path<u32>,
) -> Result<Json<VersesCount>, ApiError> {
    Ok(Json(state.scripture.verses_count(chapter).await?))
}

async fn get_verse_of_the_day(
    State(state): State<AppState>,
) -> Result<Json<VerseOfTheDay>, ApiError> {
    Ok(Json(state.scripture.verse_of_the_day().await?))
}

// ─── TTS endpoints ─────────────────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct GenerateRequest {
    text: String,
}

#[derive(serde::Deserialize)]
struct TextParams {
    text: String,
}

async fn generate_speech(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Response, ApiError> {
    speak(&state, &req.text).await
}

async fn generate_speech_get(
    State(state): State<AppState>,
    Query(params): Query<TextParams>,
) -> Result<Response, ApiError> {
    speak(&state, &params.text).await
}

async fn speak(state: &AppState, text: &str) -> Result<Response, ApiError> {
    let wav = state.synth.synthesize(text).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "audio/wav"),
            (header::CONTENT_DISPOSITION, "inline; filename=\"recitation.wav\""),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        wav,
    )
        .into_response())
}

async fn phonetic_preview(
    State(state): State<AppState>,
    Query(params): Query<TextParams>,
) -> Json<vaani_core::types::PhoneticPreview> {
    Json(state.synth.preview(&params.text))
}
