//! Estimate endpoint: `/api/estimate`.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::{header, StatusCode},
    response::Response,
};
use serde::{Deserialize, Serialize};

use uvd_common::{UvdError, MODEL_VERSION};
use uvd_model::{compute_estimate, exposure_preset, K_MINUTES};

use super::common::{invalid_parameter, json_error};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EstimateQuery {
    lat: f64,
    lon: f64,
    month: u8,
    skin_type: u8,
    coverage: Option<f64>,
    coverage_preset: Option<String>,
}

#[derive(Debug, Serialize)]
struct EstimateInputs {
    lat: f64,
    lon: f64,
    month: u8,
    skin_type: u8,
    coverage: f64,
}

#[derive(Debug, Serialize)]
struct EstimateIntermediate {
    #[serde(rename = "H_D_month")]
    h_d_month: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

#[derive(Debug, Serialize)]
struct EstimateOutputs {
    minutes_required: Option<f64>,
    is_infinite: bool,
}

#[derive(Debug, Serialize)]
struct ConstantsUsed {
    #[serde(rename = "K_minutes")]
    k_minutes: f64,
    k_skin: f64,
    f_cover: f64,
}

#[derive(Debug, Serialize)]
struct EstimateResponse {
    inputs: EstimateInputs,
    intermediate: EstimateIntermediate,
    outputs: EstimateOutputs,
    constants_used: ConstantsUsed,
    model_version: &'static str,
}

/// Point estimate: sample the dose at the location, run the model, and
/// annotate with temperature when that dataset is loaded.
pub async fn estimate_handler(
    Query(query): Query<EstimateQuery>,
    Extension(state): Extension<Arc<AppState>>,
) -> Response {
    if !(-90.0..=90.0).contains(&query.lat) {
        return invalid_parameter("lat", "must be between -90 and 90");
    }
    if !(-360.0..=360.0).contains(&query.lon) {
        return invalid_parameter("lon", "must be between -360 and 360");
    }
    if !(1..=12).contains(&query.month) {
        return invalid_parameter("month", "must be between 1 and 12");
    }
    if !(1..=6).contains(&query.skin_type) {
        return invalid_parameter("skin_type", "must be a Fitzpatrick type between 1 and 6");
    }

    let f_cover = match (&query.coverage, &query.coverage_preset) {
        (Some(coverage), _) => {
            if !(0.0..=1.0).contains(coverage) {
                return invalid_parameter("coverage", "must be between 0 and 1");
            }
            *coverage
        }
        (None, Some(preset)) => match exposure_preset(preset) {
            Some(f) => f,
            None => {
                return invalid_parameter(
                    "coverage_preset",
                    format!("unknown preset '{preset}', expected face_hands, tshirt_shorts, or swimsuit"),
                )
            }
        },
        (None, None) => exposure_preset("face_hands").unwrap_or(0.05),
    };

    let Some(uv) = state.dataset("uv") else {
        return json_error(&UvdError::ProviderUnavailable("uv".into()));
    };

    // Wrap longitude into [-180, 180).
    let norm_lon = (query.lon + 180.0).rem_euclid(360.0) - 180.0;

    let sampled = uv.provider.sample_at(query.month, query.lat, norm_lon) as f64;
    // NaN means ocean or missing coverage; treat as zero dose.
    let h_d_month = if sampled.is_nan() { 0.0 } else { sampled };

    let temperature = state.dataset("temperature").and_then(|ds| {
        let t = ds.provider.sample_at(query.month, query.lat, norm_lon) as f64;
        if t.is_nan() {
            None
        } else {
            Some((t * 10.0).round() / 10.0)
        }
    });

    let Some(estimate) = compute_estimate(h_d_month, f_cover, query.skin_type) else {
        return invalid_parameter("skin_type", "must be a Fitzpatrick type between 1 and 6");
    };

    let response = EstimateResponse {
        inputs: EstimateInputs {
            lat: query.lat,
            lon: norm_lon,
            month: query.month,
            skin_type: query.skin_type,
            coverage: f_cover,
        },
        intermediate: EstimateIntermediate {
            h_d_month,
            temperature,
        },
        outputs: EstimateOutputs {
            minutes_required: estimate.minutes_required,
            is_infinite: estimate.is_infinite,
        },
        constants_used: ConstantsUsed {
            k_minutes: K_MINUTES,
            k_skin: estimate.k_skin,
            f_cover: estimate.f_cover,
        },
        model_version: MODEL_VERSION,
    };

    match serde_json::to_string(&response) {
        Ok(body) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap(),
        Err(e) => json_error(&e.into()),
    }
}
