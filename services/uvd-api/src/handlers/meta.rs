//! Health and methodology endpoints.

use std::sync::Arc;

use axum::{extract::Extension, Json};
use serde_json::{json, Value};

use uvd_common::{DatasetConfig, DOSE_MAX, MODEL_VERSION, TILE_SIZE};
use uvd_model::{DISCLAIMER, EXPOSURE_PRESETS, FITZPATRICK, H_MIN, K_MINUTES};

use crate::state::AppState;

pub async fn health_handler(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    let mut datasets = state.dataset_names();
    datasets.sort_unstable();
    Json(json!({
        "status": "ok",
        "model_version": MODEL_VERSION,
        "datasets": datasets,
    }))
}

/// Full description of the model: equations, constants, and the tile
/// encoding, so clients can decode tiles and reproduce estimates.
pub async fn methodology_handler() -> Json<Value> {
    let uv = DatasetConfig::uv();
    let temperature = DatasetConfig::temperature();

    let fitzpatrick: Value = FITZPATRICK
        .iter()
        .map(|(t, k)| (t.to_string(), json!(k)))
        .collect::<serde_json::Map<_, _>>()
        .into();
    let presets: Value = EXPOSURE_PRESETS
        .iter()
        .map(|(name, f)| (name.to_string(), json!(f)))
        .collect::<serde_json::Map<_, _>>()
        .into();

    Json(json!({
        "model_version": MODEL_VERSION,
        "equations": {
            "t_minutes": "K_minutes * k_skin / ((H_D_month / 1000) * f_cover)",
            "infinity_rule": "H_D_month < H_min OR f_cover <= 0 -> Infinity",
        },
        "constants": {
            "K_minutes": K_MINUTES,
            "H_min": H_MIN,
        },
        "fitzpatrick_table": fitzpatrick,
        "exposure_presets": presets,
        "encoding": {
            "tile_size": TILE_SIZE,
            "no_data": 65535,
            "max_code": 65534,
            "H_D_max": DOSE_MAX,
            "datasets": {
                "uv": { "scale": uv.scale, "offset": uv.offset },
                "temperature": { "scale": temperature.scale, "offset": temperature.offset },
            },
        },
        "disclaimer": DISCLAIMER,
    }))
}
