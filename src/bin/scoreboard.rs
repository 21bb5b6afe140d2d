//! Scoreboard service entry point
//!
//! Minimal in-memory leaderboard backend for the game: submit a score and
//! get back its rank, or list every score highest-first. Scores live for
//! the lifetime of the process; there is no authentication.

use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use colonnade::leaderboard::{Leaderboard, ScoreEntry, ScoreService};

/// Shared application state
#[derive(Clone)]
struct AppState {
    board: Arc<Mutex<Leaderboard>>,
}

#[derive(Debug, Deserialize)]
struct SubmitRequest {
    name: String,
    score: u32,
}

#[derive(Debug, Serialize)]
struct SubmitResponse {
    /// 1-based rank of the submitted score
    position: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let addr = std::env::var("SCOREBOARD_ADDR").unwrap_or_else(|_| "127.0.0.1:3001".into());
    let state = AppState {
        board: Arc::new(Mutex::new(Leaderboard::new())),
    };
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("scoreboard listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}

fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/submit-score", post(submit_score))
        .route("/scores", get(scores))
        .layer(cors)
        .with_state(state)
}

async fn submit_score(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> Json<SubmitResponse> {
    let mut board = state.board.lock().unwrap_or_else(PoisonError::into_inner);
    let position = board.submit(&req.name, req.score);
    log::info!("{} scored {} -> rank {position}", req.name, req.score);
    Json(SubmitResponse { position })
}

async fn scores(State(state): State<AppState>) -> Json<Vec<ScoreEntry>> {
    let board = state.board.lock().unwrap_or_else(PoisonError::into_inner);
    Json(board.scores())
}
