use axum::{
    routing::{get, post},
    Router,
};
use pointcast::notify::RoomNotifier;
use pointcast::room::{self, repository::InMemoryRoomRepository};
use pointcast::shared::AppState;
use pointcast::websockets;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pointcast=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting pointcast voting server");

    // Shared application state: the room store and the notification fan-out
    let room_repository = Arc::new(InMemoryRoomRepository::new());
    let notifier = Arc::new(RoomNotifier::new());
    let app_state = AppState::new(room_repository, notifier);

    let app = Router::new()
        .route("/create-room", post(room::create_room))
        .route("/join", post(room::join_room))
        .route("/vote", post(room::submit_vote))
        .route("/lock", post(room::lock_votes))
        .route("/results", get(room::get_results))
        .route("/restart", post(room::restart_game))
        .route("/ws/:room_id", get(websockets::websocket_handler))
        .layer(TraceLayer::new_for_http())
        // Browser clients are served from a different origin
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("Server running on http://localhost:3000");
    axum::serve(listener, app).await.unwrap();
}
