use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::Context;
use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::classifier::{OutcomeClassifier, OutcomeWeights};
use crate::db::Db;
use crate::server::auth::Credentials;
use crate::server::panic::catch_panic_layer_fn;

pub(crate) mod api;
pub(crate) mod auth;
pub(crate) mod error;

mod panic;


/// Name of the database file inside the data directory.
const DATABASE_FILENAME: &str = "paysim.sqlite3";

// SERVER
// ================================================================================================

/// An HTTP server exposing the mock payment-transaction API.
#[derive(clap::Parser)]
pub struct Server {
    /// The port the HTTP server will be hosted on.
    #[arg(long, default_value = "3000", env = "PAYSIM_PORT")]
    port: u16,
    /// The interface the server binds to.
    #[arg(long, default_value = "0.0.0.0", env = "PAYSIM_HOST")]
    host: IpAddr,
    /// The directory holding the transaction database file.
    #[arg(long, default_value = ".", env = "PAYSIM_DATA_DIRECTORY")]
    data_directory: PathBuf,
    /// Username expected by the auth gate and served by the credential route.
    #[arg(long, default_value = "Secret_Username", env = "PAYSIM_API_USERNAME")]
    api_username: String,
    /// Password expected by the auth gate and served by the credential route.
    #[arg(long, default_value = "Secret_Password", env = "PAYSIM_API_PASSWORD")]
    api_password: String,
    /// Relative weight of the success outcome in the classifier draw.
    ///
    /// A zero weight removes the outcome from the draw; at least one of the three weights must
    /// be non-zero.
    #[arg(long, default_value = "8", env = "PAYSIM_SUCCESS_WEIGHT")]
    success_weight: u32,
    /// Relative weight of the failure outcome in the classifier draw.
    #[arg(long, default_value = "1", env = "PAYSIM_FAILURE_WEIGHT")]
    failure_weight: u32,
    /// Relative weight of the suspicious outcome in the classifier draw.
    #[arg(long, default_value = "1", env = "PAYSIM_SUSPICIOUS_WEIGHT")]
    suspicious_weight: u32,
}

/// Shared state handed to every route handler.
#[derive(Clone)]
pub(crate) struct AppState {
    pub db: Db,
    pub classifier: OutcomeClassifier,
    pub credentials: Credentials,
}

impl Server {
    /// Spawns the payment API server, returning its handle and the port it is listening on.
    pub async fn spawn(&self) -> anyhow::Result<(JoinHandle<anyhow::Result<()>>, u16)> {
        let classifier = OutcomeClassifier::new(OutcomeWeights {
            success: self.success_weight,
            failure: self.failure_weight,
            suspicious: self.suspicious_weight,
        })
        .context("at least one outcome weight must be non-zero")?;

        std::fs::create_dir_all(&self.data_directory)
            .context("failed to create the data directory")?;
        let db = Db::load(self.data_directory.join(DATABASE_FILENAME))
            .await
            .context("failed to initialize the transaction database")?;

        let listener = TcpListener::bind((self.host, self.port))
            .await
            .context("failed to bind to API port")?;

        // We do this to get the actual port if configured with `self.port=0`.
        let port = listener
            .local_addr()
            .expect("local address should exist for a tcp listener")
            .port();

        tracing::info!(server.host = %self.host, server.port = port, "payment server listening");

        let state = AppState {
            db,
            classifier,
            credentials: Credentials {
                username: self.api_username.clone(),
                password: self.api_password.clone(),
            },
        };

        let server = axum::serve(listener, build_router(state));
        let server =
            tokio::spawn(async move { server.await.context("failed while serving payment API") });

        Ok((server, port))
    }
}

// ROUTER
// ================================================================================================

/// Assembles the route tree with the auth gate over the two protected routes.
fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/make-payment", post(api::make_payment))
        .route("/get-transaction-details/{id}", get(api::get_transaction_details))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_basic_auth));

    // Layers wrap inside-out; panic recovery added last sits outermost.
    Router::new()
        .route("/health", get(api::health))
        .route("/docs", get(api::docs))
        .route("/get-credentials", post(api::get_credentials))
        .merge(protected)
        .layer(cors_allow_all())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(catch_panic_layer_fn))
        .with_state(state)
}

/// The fixed cross-origin policy: any origin, any method, any headers.
fn cors_allow_all() -> CorsLayer {
    CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
}
