//! Server network layer exposing the leaderboard over HTTP

use crate::store::HighscoreStore;
use crate::submission::process_submission;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::{debug, error, info};
use serde_json::Value;
use shared::{ErrorResponse, ScoreRecord, SubmitResponse};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task;

const INDEX_HTML: &str = include_str!("../static/index.html");

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// State shared by all request handlers
///
/// Submissions take the write lock for their whole read-modify-write cycle,
/// so two requests in this process never overwrite each other's entry.
/// File access itself runs on the blocking pool.
#[derive(Clone)]
pub struct AppState {
    store: Arc<RwLock<HighscoreStore>>,
}

impl AppState {
    pub fn new(store: HighscoreStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}

/// Builds the routes for the page and the highscore endpoints
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/highscores", get(get_highscores).post(post_highscore))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn get_highscores(State(state): State<AppState>) -> Json<Vec<ScoreRecord>> {
    let store = state.store.read().await.clone();
    match task::spawn_blocking(move || store.read()).await {
        Ok(scores) => Json(scores),
        Err(e) => {
            error!("Highscore read task failed: {}", e);
            Json(Vec::new())
        }
    }
}

async fn post_highscore(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(JsonRejection::BytesRejection(rejection)) => return rejection.into_response(),
        Err(rejection) => {
            debug!("Rejected non-JSON submission: {}", rejection);
            return error_response(StatusCode::UNSUPPORTED_MEDIA_TYPE, "Unsupported media type");
        }
    };

    // Held until the file write finishes
    let guard = state.store.write().await;
    let store = guard.clone();
    let result = task::spawn_blocking(move || {
        let result = process_submission(&store, &payload);
        (payload, result)
    })
    .await;
    drop(guard);

    match result {
        Ok((_, Ok(_))) => (StatusCode::CREATED, Json(SubmitResponse::success())).into_response(),
        Ok((payload, Err(e))) => {
            debug!("Rejected submission {}: {}", payload, e);
            error_response(StatusCode::BAD_REQUEST, e.message())
        }
        Err(e) => {
            error!("Submission task failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

fn error_response(status: StatusCode, reason: &str) -> Response {
    (status, Json(ErrorResponse::new(reason))).into_response()
}

/// HTTP server bound to an address and backed by a highscore store
pub struct Server {
    listener: TcpListener,
    state: AppState,
}

impl Server {
    pub async fn new(addr: &str, store: HighscoreStore) -> Result<Self, BoxError> {
        let listener = TcpListener::bind(addr).await?;
        info!("Server listening on {}", listener.local_addr()?);
        info!("Highscores stored in {}", store.path().display());

        Ok(Server {
            listener,
            state: AppState::new(store),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves requests until Ctrl+C
    pub async fn run(self) -> Result<(), BoxError> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
            info!("Received Ctrl+C, shutting down gracefully...");
        })
        .await
    }

    /// Serves requests until `shutdown` completes
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), BoxError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, router(self.state))
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Server shut down");
        Ok(())
    }
}
