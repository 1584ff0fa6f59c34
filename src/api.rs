use axum::extract::{FromRequest, FromRequestParts};
use axum::http::request::Parts;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::UserCredentials;
use crate::config::Config;
use crate::error::{ApplicationError, BindAddressSnafu, ConnectDatabaseSnafu, WebServerSnafu};
use crate::prelude::*;

mod error;
mod state;

pub mod blogs;
pub mod login;
pub mod stats;
pub mod users;


pub use error::*;
pub use state::*;

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

pub fn create_router(app: App) -> Router {
    Router::new()
        .route("/api/blogs", get(blogs::list).post(blogs::create))
        .route(
            "/api/blogs/:id",
            get(blogs::info).put(blogs::update).delete(blogs::remove),
        )
        .route("/api/users", get(users::list).post(users::create))
        .route("/api/login", post(login::login))
        .route("/api/stats", get(stats::summary))
        .fallback(unknown_endpoint)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app)
}

async fn unknown_endpoint() -> ApiError {
    NotFoundSnafu { what: "endpoint" }.build()
}

/// Connects to the database and serves the API until the process receives ctrl-c.
pub async fn serve(config: &Config) -> Result<(), ApplicationError> {
    let database = config.database().await.context(ConnectDatabaseSnafu)?;
    let app = create_app(database, config.authenticator());

    let address = config.host;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .context(BindAddressSnafu { address })?;

    tracing::info!(%address, "listening for requests");

    axum::serve(listener, create_router(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context(WebServerSnafu)
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "could not listen for ctrl-c, shutting down");
    }
    tracing::info!("shutting down");
}

/// The caller authenticated by the bearer token of the request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserCredentials);

#[axum::async_trait]
impl FromRequestParts<App> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, app: &App) -> Result<Self, Self::Rejection> {
        app.authenticator
            .extract_token(&parts.headers)
            .map(CurrentUser)
            .context(UnauthorizedSnafu)
    }
}

/// JSON request body whose rejections answer with the usual `{"error": ...}` body.
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Payload<T>(pub T);
