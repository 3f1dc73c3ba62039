//! Tile endpoint: `/api/tiles/{dataset}/{z}/{x}/{y}.{ext}?month=`.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::{header, HeaderMap, StatusCode},
    response::Response,
};
use serde::Deserialize;
use tracing::error;

use uvd_common::{TileAddress, UvdError};
use uvd_tiles::TileFormat;

use super::common::{invalid_parameter, json_error};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TileQuery {
    month: Option<u8>,
}

/// Serve one encoded tile. All parameter validation happens before any
/// sampling or disk work.
pub async fn tile_handler(
    Path((dataset, z, x, y_ext)): Path<(String, String, String, String)>,
    Query(query): Query<TileQuery>,
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    let Some(month) = query.month else {
        return invalid_parameter("month", "query parameter is required (1-12)");
    };

    // "{y}.{ext}" — split from the right so the extension is whatever
    // follows the final dot.
    let Some((y_str, ext)) = y_ext.rsplit_once('.') else {
        return invalid_parameter("y", "expected {y}.{ext}, e.g. 5.bin");
    };

    let format = match TileFormat::from_extension(ext) {
        Ok(f) => f,
        Err(e) => return json_error(&e),
    };

    let (Ok(z), Ok(x), Ok(y)) = (z.parse::<u32>(), x.parse::<u32>(), y_str.parse::<u32>()) else {
        return invalid_parameter("z/x/y", "tile coordinates must be non-negative integers");
    };

    let addr = match TileAddress::new(z, x, y, month) {
        Ok(addr) => addr,
        Err(e) => return json_error(&e),
    };

    if state.dataset(&dataset).is_none() {
        // A known namespace without a loaded provider is a service
        // condition, not a bad request.
        let err = if matches!(dataset.as_str(), "uv" | "temperature") {
            UvdError::ProviderUnavailable(dataset)
        } else {
            UvdError::DatasetNotFound(dataset)
        };
        return json_error(&err);
    }

    // Generation hits disk and the quantizer; keep it off the runtime
    // worker threads.
    let fetched = {
        let state = Arc::clone(&state);
        let dataset = dataset.clone();
        tokio::task::spawn_blocking(move || {
            let ds = state
                .dataset(&dataset)
                .ok_or(UvdError::DatasetNotFound(dataset))?;
            ds.tiles.fetch(addr, format)
        })
        .await
    };

    let raw = match fetched {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(e)) => {
            error!(error = %e, "Tile generation failed");
            return json_error(&e);
        }
        Err(e) => {
            error!(error = %e, "Tile generation task panicked");
            return json_error(&UvdError::InternalError("tile generation failed".into()));
        }
    };

    let accept_encoding = headers
        .get(header::ACCEPT_ENCODING)
        .and_then(|v| v.to_str().ok());
    let memo_key = state
        .dataset(&dataset)
        .map(|ds| ds.tiles.key(addr, format).memo_key())
        .unwrap_or_default();
    let (body, content_encoding) = state
        .compressor
        .compress_for_transport(&raw, accept_encoding, &memo_key)
        .await;

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, format.content_type())
        .header(header::CACHE_CONTROL, "public, max-age=86400, immutable");
    if let Some(encoding) = content_encoding {
        builder = builder.header(header::CONTENT_ENCODING, encoding);
    }
    builder.body(body.into()).unwrap()
}
