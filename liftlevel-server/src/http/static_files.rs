//! Static file serving for embedded page assets

use axum::{
    body::Body,
    extract::Path,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

/// Embedded page assets (compiled into binary)
#[derive(RustEmbed)]
#[folder = "static/"]
struct PageAssets;

/// GET /static/*path
pub async fn static_handler(Path(path): Path<String>) -> impl IntoResponse {
    let path = path.trim_start_matches('/');
    serve_file(path).unwrap_or_else(|| (StatusCode::NOT_FOUND, "Not found").into_response())
}

/// Serve a file from embedded assets
fn serve_file(path: &str) -> Option<Response<Body>> {
    let file = PageAssets::get(path)?;

    // Determine content type from file extension
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .body(Body::from(file.data.into_owned()))
        .ok()
}
