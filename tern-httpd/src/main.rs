//! Tern HTTP Server
//!
//! A thin REST front end over a triple index held by a search engine.
//! Find requests translate `s`/`p`/`o`/`graph` query parameters (each an
//! N-Triples encoded term) into field filters and stream the matching
//! triples back; uploads accept an N-Triples body and bulk-index it.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /{index}/triples` - Find triples matching a pattern
//! - `POST /{index}/triples` - Bulk-load an N-Triples body
//! - `GET /{index}/size` - Document count for an index
//!
//! # Example
//!
//! ```bash
//! tern-httpd --search-url http://localhost:9200 --listen 0.0.0.0:9090
//! curl 'http://localhost:9090/books/triples?s=%3Chttp%3A%2F%2Fexample.org%2Fbook%2F1%3E'
//! ```

use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use clap::Parser;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tern_core::{Triple, TriplePattern};
use tern_graph::{Graph, GraphError};
use tern_ingest::{BulkLoader, IngestError};
use tern_ntriples::{decode_predicate, decode_subject, decode_term, encode_term};
use tern_search_protocol::{
    ErrorCode, SearchError, DEFAULT_KEEP_ALIVE_MS, DEFAULT_PAGE_SIZE, PROTOCOL_VERSION,
};
use tern_search_service::{BackendConfig, RemoteBackend, ScrollConfig, ServiceError};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

mod params;

use params::{Params, DEFAULT_MAX_PARAMS};

/// Tern HTTP Server
#[derive(Parser, Debug)]
#[command(name = "tern-httpd")]
#[command(about = "HTTP front end for the tern triple index")]
struct Args {
    /// Listen address
    #[arg(long, default_value = "0.0.0.0:9090", env = "TERN_HTTPD_LISTEN")]
    listen: SocketAddr,

    /// Search engine base URL
    #[arg(long, default_value = "http://localhost:9200", env = "TERN_SEARCH_URL")]
    search_url: String,

    /// Bearer token for the search engine
    #[arg(long, env = "TERN_SEARCH_TOKEN")]
    auth_token: Option<String>,

    /// Index name reported by the health endpoint
    #[arg(long, default_value = "triples", env = "TERN_HTTPD_INDEX")]
    index: String,

    /// Hits fetched per scroll page during a find
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, env = "TERN_HTTPD_SCROLL_PAGE_SIZE")]
    scroll_page_size: usize,

    /// Scroll keep-alive between pages, in milliseconds
    #[arg(
        long,
        default_value_t = DEFAULT_KEEP_ALIVE_MS,
        env = "TERN_HTTPD_SCROLL_KEEP_ALIVE_MS"
    )]
    scroll_keep_alive_ms: u64,

    /// Maximum triples returned by a single find request
    #[arg(long, default_value = "10000", env = "TERN_HTTPD_MAX_LIMIT")]
    max_limit: usize,

    /// Maximum query parameters accepted per request
    #[arg(long, default_value_t = DEFAULT_MAX_PARAMS, env = "TERN_HTTPD_MAX_PARAMS")]
    max_params: usize,

    /// Request timeout against the search engine, in milliseconds
    #[arg(long, default_value = "30000", env = "TERN_HTTPD_REQUEST_TIMEOUT_MS")]
    request_timeout_ms: u64,
}

/// Application state shared across handlers.
struct AppState {
    /// Shared client for the search engine.
    backend: Arc<RemoteBackend>,
    /// Index name reported by the health endpoint.
    default_index: String,
    /// Scroll settings applied to every find.
    scroll: ScrollConfig,
    /// Cap on triples returned by one find request.
    max_limit: usize,
    /// Cap on query parameters accepted per request.
    max_params: usize,
}

impl AppState {
    /// Default-graph handle on `index`; the pattern supplies any graph
    /// scoping.
    fn graph(&self, index: &str) -> Graph<RemoteBackend> {
        Graph::new(Arc::clone(&self.backend), index).with_scroll_config(self.scroll.clone())
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tern_httpd=info".parse().unwrap())
                .add_directive("tern_search_service=info".parse().unwrap())
                .add_directive("tower_http=info".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    info!(
        listen = %args.listen,
        search_url = %args.search_url,
        index = %args.index,
        "Starting tern HTTP server"
    );

    let mut config =
        BackendConfig::new(&args.search_url).with_request_timeout_ms(args.request_timeout_ms);
    if let Some(token) = &args.auth_token {
        config = config.with_auth_token(token);
    }
    let backend =
        Arc::new(RemoteBackend::from_config(&config).expect("Failed to build search client"));

    let scroll = ScrollConfig {
        page_size: args.scroll_page_size,
        keep_alive_ms: args.scroll_keep_alive_ms,
    }
    .clamped();

    // Create app state
    let state = Arc::new(AppState {
        backend,
        default_index: args.index,
        scroll,
        max_limit: args.max_limit,
        max_params: args.max_params,
    });

    // Build router
    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/{index}/triples", get(handle_find).post(handle_upload))
        .route("/{index}/size", get(handle_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(args.listen)
        .await
        .expect("Failed to bind address");

    info!(address = %args.listen, "Server listening");

    axum::serve(listener, app).await.expect("Server error");
}

/// One triple in a find response, every position N-Triples encoded.
#[derive(Serialize)]
struct TripleRow {
    s: String,
    p: String,
    o: String,
}

impl From<&Triple> for TripleRow {
    fn from(triple: &Triple) -> Self {
        Self {
            s: encode_term(&triple.s),
            p: encode_term(&triple.p),
            o: encode_term(&triple.o),
        }
    }
}

#[derive(Serialize)]
struct TriplesResponse {
    triples: Vec<TripleRow>,
    count: usize,
}

#[derive(Serialize)]
struct SizeResponse {
    size: i64,
}

#[derive(Serialize)]
struct UploadResponse {
    count: u64,
}

/// Handle GET /{index}/triples
async fn handle_find(
    State(state): State<Arc<AppState>>,
    Path(index): Path<String>,
    uri: Uri,
) -> impl IntoResponse {
    let params = Params::decode(uri.query().unwrap_or(""), state.max_params);

    if params.contains("query") || params.contains("q") {
        return error_response(
            StatusCode::BAD_REQUEST,
            ErrorCode::InvalidRequest,
            "SPARQL is not supported; bind s, p, o and graph to N-Triples terms".to_string(),
        );
    }

    let pattern = match pattern_from(&params) {
        Ok(pattern) => pattern,
        Err(e) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidRequest,
                e.to_string(),
            )
        }
    };

    let limit = params
        .first_as_i64("limit")
        .map(|value| value.max(0) as usize)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .min(state.max_limit);

    let graph = state.graph(&index);
    let mut cursor = match graph.find(&pattern).await {
        Ok(cursor) => cursor,
        Err(e) => return graph_error_response(e),
    };

    let mut triples = Vec::new();
    while triples.len() < limit {
        match cursor.next().await {
            Ok(Some(triple)) => triples.push(TripleRow::from(&triple)),
            Ok(None) => break,
            Err(e) => return graph_error_response(e),
        }
    }

    let count = triples.len();
    (StatusCode::OK, Json(TriplesResponse { triples, count })).into_response()
}

/// Handle POST /{index}/triples
async fn handle_upload(
    State(state): State<Arc<AppState>>,
    Path(index): Path<String>,
    body: String,
) -> impl IntoResponse {
    let mut loader = BulkLoader::new(Arc::clone(&state.backend), &index);
    if let Err(e) = loader.load_str(&body).await {
        return ingest_error_response(e);
    }

    match loader.finish().await {
        Ok(stats) => {
            info!(
                index = %index,
                triples = stats.triples,
                batches = stats.batches,
                "upload complete"
            );
            let response = UploadResponse {
                count: stats.triples,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => ingest_error_response(e),
    }
}

/// Handle GET /{index}/size
async fn handle_size(
    State(state): State<Arc<AppState>>,
    Path(index): Path<String>,
) -> impl IntoResponse {
    let size = state.graph(&index).size().await;
    Json(SizeResponse { size })
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    index: String,
}

/// Handle GET /health
async fn handle_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        index: state.default_index.clone(),
    })
}

/// Build a pattern from the `s`/`p`/`o`/`graph` parameters.
fn pattern_from(params: &Params) -> tern_ntriples::Result<TriplePattern> {
    let mut pattern = TriplePattern::any();
    if let Some(raw) = params.first("s") {
        pattern = pattern.with_subject(decode_subject(raw)?);
    }
    if let Some(raw) = params.first("p") {
        pattern = pattern.with_predicate(decode_predicate(raw)?);
    }
    if let Some(raw) = params.first("o") {
        pattern = pattern.with_object(decode_term(raw)?);
    }
    if let Some(raw) = params.first("graph") {
        pattern = pattern.with_graph(decode_term(raw)?);
    }
    Ok(pattern)
}

fn error_response(status: StatusCode, code: ErrorCode, message: String) -> Response {
    let body = SearchError::new(PROTOCOL_VERSION, None, code, message);
    (status, Json(body)).into_response()
}

fn service_status(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
        ServiceError::IndexNotFound { .. } => StatusCode::NOT_FOUND,
        ServiceError::ScrollExpired { .. } => StatusCode::GONE,
        ServiceError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        ServiceError::Connect { .. } => StatusCode::BAD_GATEWAY,
        ServiceError::Backend { .. } | ServiceError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn graph_error_response(err: GraphError) -> Response {
    let (status, code) = match &err {
        GraphError::Translate { .. } | GraphError::InvalidGraph { .. } => {
            (StatusCode::BAD_REQUEST, ErrorCode::InvalidRequest)
        }
        GraphError::Fetch { source } => (service_status(source), source.error_code()),
        GraphError::Decode { .. } => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Internal),
    };
    if status.is_server_error() {
        error!(error = %err, "find failed");
    }
    error_response(status, code, err.to_string())
}

fn ingest_error_response(err: IngestError) -> Response {
    let (status, code) = match &err {
        IngestError::Parse { .. } => (StatusCode::BAD_REQUEST, ErrorCode::InvalidRequest),
        IngestError::Backend { source } => (service_status(source), source.error_code()),
        IngestError::Io { .. } => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Internal),
    };
    if status.is_server_error() {
        error!(error = %err, "upload failed");
    }
    error_response(status, code, err.to_string())
}
