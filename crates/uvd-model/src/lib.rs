//! Vitamin-D exposure model.
//!
//! Pure functions mapping a monthly mean daily erythemal dose to the
//! minutes of midday sun required to reach the reference synthesis
//! target, scaled by Fitzpatrick skin type and exposed skin fraction.
//! Educational model only.

use serde::Serialize;

/// Reference minutes for skin type 1 at 1 kJ/m²/day and full exposure.
pub const K_MINUTES: f64 = 60.0;

/// Doses below this (J/m²/day) are treated as no meaningful synthesis.
pub const H_MIN: f64 = 200.0;

/// Fitzpatrick skin-type multipliers, indexed by type 1 through 6.
pub const FITZPATRICK: [(u8, f64); 6] = [
    (1, 1.0),
    (2, 1.2),
    (3, 1.5),
    (4, 2.0),
    (5, 2.8),
    (6, 3.8),
];

/// Named exposure presets (fraction of body exposed).
pub const EXPOSURE_PRESETS: [(&str, f64); 3] = [
    ("face_hands", 0.05),
    ("tshirt_shorts", 0.25),
    ("swimsuit", 0.85),
];

pub const DISCLAIMER: &str = "This is an EDUCATIONAL MODEL. \
    It is NOT medical advice. \
    It does NOT diagnose vitamin D deficiency.";

/// Look up the multiplier for a Fitzpatrick skin type.
pub fn skin_multiplier(skin_type: u8) -> Option<f64> {
    FITZPATRICK
        .iter()
        .find(|(t, _)| *t == skin_type)
        .map(|(_, k)| *k)
}

/// Look up a named coverage preset.
pub fn exposure_preset(name: &str) -> Option<f64> {
    EXPOSURE_PRESETS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, f)| *f)
}

/// Result of one model evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct Estimate {
    /// Minutes of midday sun required; `None` when infinite.
    pub minutes_required: Option<f64>,
    pub is_infinite: bool,
    /// Constants that fed the computation, echoed for transparency.
    pub k_skin: f64,
    pub f_cover: f64,
}

/// Evaluate the model for one point.
///
/// `dose` is the monthly mean daily erythemal dose in J/m²/day.
/// Returns an infinite estimate when the dose is below [`H_MIN`] or no
/// skin is exposed.
pub fn compute_estimate(dose: f64, f_cover: f64, skin_type: u8) -> Option<Estimate> {
    let k_skin = skin_multiplier(skin_type)?;

    let is_infinite = dose < H_MIN || f_cover <= 0.0;
    let minutes_required = if is_infinite {
        None
    } else {
        let dose_kj = dose / 1000.0;
        Some((K_MINUTES * k_skin) / (dose_kj * f_cover))
    };

    Some(Estimate {
        minutes_required,
        is_infinite,
        k_skin,
        f_cover,
    })
}
