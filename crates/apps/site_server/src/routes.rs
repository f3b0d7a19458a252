use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path as AxumPath, State};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use catalog::{ShipmentDb, TrackingError};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::SiteConfig;

type AppState = Arc<SiteConfig>;

/// Page routes and the template each one renders.
pub const PAGES: [(&str, &str); 6] = [
    ("/", "home.html"),
    ("/about", "about.html"),
    ("/services", "services.html"),
    ("/destinations", "destinations.html"),
    ("/tracking", "tracking.html"),
    ("/contact", "contact.html"),
];

const SHIPMENTS_FILE: &str = "shipments.json";

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::OPTIONS]);

    let mut router = Router::<AppState>::new()
        .route("/healthz", get(healthz))
        .route("/static/*path", get(get_static))
        .route("/api/track/:id", get(track_shipment));
    for (route, template) in PAGES {
        router = router.route(
            route,
            get(move |State(state): State<AppState>| async move {
                serve_page(&state, template).await
            }),
        );
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

async fn serve_page(state: &SiteConfig, template: &str) -> Response {
    let path = state.templates.join(template);
    match tokio::fs::read(&path).await {
        Ok(data) => bytes_response(data, "text/html; charset=utf-8"),
        Err(err) => {
            error!("template read failed: {path:?} -> {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, "page unavailable").into_response()
        }
    }
}

async fn get_static(State(state): State<AppState>, AxumPath(path): AxumPath<String>) -> Response {
    let Some(relative) = safe_relative_path(&path) else {
        return (StatusCode::NOT_FOUND, "not found").into_response();
    };
    serve_file(&state.static_root.join(relative)).await
}

async fn track_shipment(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Response {
    let result = match load_shipments(&state.data_root.join(SHIPMENTS_FILE)).await {
        Ok(db) => db.lookup(&id),
        Err(err) => Err(err),
    };
    match result {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => {
            let status = match err {
                TrackingError::NotFound(_) => StatusCode::NOT_FOUND,
                TrackingError::Unavailable(_) | TrackingError::Corrupt(_) => {
                    error!("tracking lookup failed: {err}");
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            (status, Json(json!({ "error": err.public_message() }))).into_response()
        }
    }
}

/// Reads the shipment database fresh for every request, so staff edits to
/// the file show up without a restart.
async fn load_shipments(path: &Path) -> Result<ShipmentDb, TrackingError> {
    let text = tokio::fs::read_to_string(path).await.map_err(|err| {
        if err.kind() == ErrorKind::InvalidData {
            TrackingError::Corrupt(err.to_string())
        } else {
            TrackingError::Unavailable(format!("{path:?}: {err}"))
        }
    })?;
    ShipmentDb::from_json_str(&text)
}

/// Rejects absolute paths and any `..` component.
fn safe_relative_path(path: &str) -> Option<PathBuf> {
    let candidate = Path::new(path.trim_start_matches('/'));
    let mut out = PathBuf::new();
    for component in candidate.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    (!out.as_os_str().is_empty()).then_some(out)
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") | Some("mjs") => "text/javascript",
        Some("wasm") => "application/wasm",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

async fn serve_file(path: &Path) -> Response {
    match tokio::fs::read(path).await {
        Ok(data) => bytes_response(data, content_type_for(path)),
        Err(err) => {
            warn!("file read failed: {path:?} -> {err}");
            (StatusCode::NOT_FOUND, "not found").into_response()
        }
    }
}

fn bytes_response(data: Vec<u8>, content_type: &'static str) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        http::header::CONTENT_TYPE,
        HeaderValue::from_static(content_type),
    );
    (StatusCode::OK, headers, Body::from(data)).into_response()
}
