//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create Axum Router with the gateway handler
//! - Wire up middleware (tracing, request ID)
//! - Answer pre-flight requests
//! - Dispatch each request to exactly one route handler
//! - Bound each dispatch by the inbound request timeout
//! - Convert every handler error into the 500 error envelope
//! - Apply the CORS envelope once per response

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{Method, Request, StatusCode},
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::datastore::DataStoreClient;
use crate::error::{GatewayError, GatewayResult};
use crate::handlers;
use crate::http::request::content_type;
use crate::http::response::{error_json, preflight, with_cors};
use crate::messaging::MessagingClient;
use crate::observability::metrics;
use crate::routing::{Route, RouteTable};

/// Largest inbound body read by any handler.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub routes: Arc<RouteTable>,
    pub datastore: DataStoreClient,
    pub messaging: MessagingClient,
}

impl AppState {
    /// Build the adapters around one shared outbound HTTP client.
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.upstream_secs))
            .build()?;

        Ok(Self {
            datastore: DataStoreClient::new(http.clone(), config.datastore.clone()),
            messaging: MessagingClient::new(http, config.messaging.clone()),
            routes: Arc::new(RouteTable::gateway()),
            config: Arc::new(config),
        })
    }
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: Arc<GatewayConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        let state = AppState::new(config)?;
        let config = state.config.clone();
        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    pub fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(gateway_handler))
            .route("/", any(gateway_handler))
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Single entry point for every request.
async fn gateway_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    if method == Method::OPTIONS {
        let response = preflight();
        metrics::record_request(method.as_str(), response.status().as_u16(), "preflight", start_time);
        return response;
    }

    let route = state.routes.match_request(&method, request.uri().path());
    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %request.uri().path(),
        route = route.name(),
        "Dispatching request"
    );

    let request_secs = state.config.timeouts.request_secs;
    let outcome = tokio::time::timeout(
        Duration::from_secs(request_secs),
        dispatch(&state, route, request),
    )
    .await
    .unwrap_or_else(|_| Err(GatewayError::Timeout(request_secs)));

    let response = match outcome {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(request_id = %request_id, route = route.name(), error = %e, "Request failed");
            error_json(e.to_string(), StatusCode::INTERNAL_SERVER_ERROR)
        }
    };
    let response = if route.is_bare() {
        response
    } else {
        with_cors(response)
    };

    metrics::record_request(method.as_str(), response.status().as_u16(), route.name(), start_time);
    response
}

async fn dispatch(state: &AppState, route: Route, request: Request<Body>) -> GatewayResult<Response> {
    match route {
        Route::Health => Ok(handlers::health::health()),
        Route::Env => Ok(handlers::health::env_report(&state.config)),
        Route::WhatsAppTest => handlers::whatsapp::send_test(state, request.uri()).await,
        Route::CreateDelivery => {
            let body = read_body_lenient(request).await;
            handlers::deliveries::create(state, &body).await
        }
        Route::AcceptDriver => {
            let body = read_body_lenient(request).await;
            handlers::deliveries::accept_driver(state, &body).await
        }
        Route::WebhookVerify => Ok(handlers::whatsapp::webhook_verify()),
        Route::WebhookReceive => {
            let content_type = content_type(request.headers()).map(str::to_owned);
            let body = read_body(request).await?;
            Ok(handlers::whatsapp::webhook_receive(content_type.as_deref(), &body))
        }
        Route::NotFound => Ok(error_json("route not found", StatusCode::NOT_FOUND)),
    }
}

async fn read_body(request: Request<Body>) -> GatewayResult<Bytes> {
    axum::body::to_bytes(request.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|e| GatewayError::Body(e.to_string()))
}

/// Body for the JSON routes. An unreadable body reads as empty, which the
/// handlers treat as `{}`.
async fn read_body_lenient(request: Request<Body>) -> Bytes {
    match read_body(request).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(error = %e, "Discarding unreadable request body");
            Bytes::new()
        }
    }
}
