use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod auth;
mod config;
mod error;
mod handlers;
mod mailer;
mod models;
mod services;
mod store;
mod week;

use config::Config;
use mailer::{Mailer, ResendMailer};
use store::postgres::PgRecordStore;
use store::RecordStore;

#[derive(Clone)]
pub struct AppState<S: RecordStore, M: Mailer> {
    pub store: S,
    pub mailer: M,
    pub config: Arc<Config>,
}

fn build_router<S: RecordStore, M: Mailer>(state: AppState<S, M>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz::<S, M>));

    let protected_routes = Router::new()
        // Profile
        .route("/elder-info", post(handlers::profile::save_elder_info::<S, M>))
        .route("/elder-info", get(handlers::profile::get_elder_info::<S, M>))
        // Daily check-ins
        .route("/mood-survey", post(handlers::surveys::save_mood_survey::<S, M>))
        .route("/mood-surveys", get(handlers::surveys::list_mood_surveys::<S, M>))
        .route("/camera-mood", post(handlers::camera::save_camera_mood::<S, M>))
        .route("/camera-moods", get(handlers::camera::list_camera_moods::<S, M>))
        .route(
            "/completion-status",
            get(handlers::completion::get_completion_status::<S, M>),
        )
        // Weekly reports
        .route("/weekly-report", get(handlers::reports::weekly_report::<S, M>))
        .route(
            "/weekly-report/download",
            get(handlers::reports::download_weekly_report::<S, M>),
        )
        .route(
            "/send-weekly-report",
            post(handlers::reports::send_weekly_report::<S, M>),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth::<S, M>,
        ));

    let cors = CorsLayer::new()
        .allow_origin(
            state
                .config
                .frontend_url
                .parse::<axum::http::HeaderValue>()
                .expect("FRONTEND_URL must be a valid origin"),
        )
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ]);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodmirror_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    // Record store
    let pool = store::postgres::create_pool(&config.database_url).await;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations applied");

    let state = AppState {
        store: PgRecordStore::new(pool),
        mailer: ResendMailer::new(config.resend_api_key.clone()),
        config: config.clone(),
    };

    let app = build_router(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
