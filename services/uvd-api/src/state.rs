//! Application state and shared resources.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use uvd_common::DatasetConfig;
use uvd_provider::{GridProvider, NetcdfProvider, SyntheticProvider};
use uvd_tiles::{QuantSpec, TileCache, TransferCompressor};

/// Filename of the UV climatology archive under the data directory.
const UV_ARCHIVE: &str = "uvdvcclim_world_monthly.nc";
/// Variable holding monthly mean daily erythemal dose, in kJ/m²/day.
const UV_VARIABLE: &str = "uvd_clear_mean";
/// Archive values are kJ; the model and tiles work in J.
const UV_UNIT_SCALE: f32 = 1000.0;

const TEMPERATURE_ARCHIVE: &str = "temperature_monthly.nc";
const TEMPERATURE_VARIABLE: &str = "temperature_2m_mean";

/// One servable dataset: its sampler plus the tile cache built on it.
pub struct DatasetState {
    pub provider: Arc<dyn GridProvider>,
    pub tiles: TileCache,
}

/// Shared application state.
pub struct AppState {
    datasets: HashMap<String, DatasetState>,
    pub compressor: TransferCompressor,
}

impl AppState {
    /// Build state from the environment.
    ///
    /// `UVD_DATA_DIR` holds the NetCDF archives, `UVD_CACHE_DIR` the
    /// tile cache tree, and `UVD_PROVIDER=sample` swaps the archives
    /// for the synthetic provider. The UV dataset is mandatory; the
    /// temperature dataset loads when its archive is present.
    pub fn from_env() -> Result<Self> {
        let data_dir = PathBuf::from(env::var("UVD_DATA_DIR").unwrap_or_else(|_| "./data".into()));
        let cache_dir =
            PathBuf::from(env::var("UVD_CACHE_DIR").unwrap_or_else(|_| "./tile_cache".into()));
        let provider_kind = env::var("UVD_PROVIDER").unwrap_or_else(|_| "netcdf".into());

        let mut datasets = HashMap::new();

        if provider_kind == "sample" {
            let provider: Arc<dyn GridProvider> = Arc::new(SyntheticProvider::new());
            datasets.insert(
                "uv".to_string(),
                dataset(provider, &cache_dir, DatasetConfig::uv()),
            );
            return Ok(Self {
                datasets,
                compressor: TransferCompressor::new(),
            });
        }

        let uv_path = data_dir.join(UV_ARCHIVE);
        let uv = NetcdfProvider::open(&uv_path, UV_VARIABLE, UV_UNIT_SCALE)
            .with_context(|| format!("loading UV archive from {}", uv_path.display()))?;
        info!(path = %uv_path.display(), "UV climatology loaded");
        let provider: Arc<dyn GridProvider> = Arc::new(uv);
        datasets.insert(
            "uv".to_string(),
            dataset(provider, &cache_dir, DatasetConfig::uv()),
        );

        // Temperature is optional; estimates fall back to dose-only.
        let temp_path = data_dir.join(TEMPERATURE_ARCHIVE);
        match NetcdfProvider::open(&temp_path, TEMPERATURE_VARIABLE, 1.0) {
            Ok(temp) => {
                info!(path = %temp_path.display(), "Temperature climatology loaded");
                let provider: Arc<dyn GridProvider> = Arc::new(temp);
                datasets.insert(
                    "temperature".to_string(),
                    dataset(provider, &cache_dir, DatasetConfig::temperature()),
                );
            }
            Err(e) => {
                warn!(
                    path = %temp_path.display(),
                    error = %e,
                    "Temperature archive unavailable, serving UV only"
                );
            }
        }

        Ok(Self {
            datasets,
            compressor: TransferCompressor::new(),
        })
    }

    /// Build state directly from providers (tests and tooling).
    pub fn with_datasets(
        entries: Vec<(&str, Arc<dyn GridProvider>, DatasetConfig)>,
        cache_dir: &std::path::Path,
    ) -> Self {
        let datasets = entries
            .into_iter()
            .map(|(name, provider, config)| {
                (name.to_string(), dataset(provider, cache_dir, config))
            })
            .collect();
        Self {
            datasets,
            compressor: TransferCompressor::new(),
        }
    }

    pub fn dataset(&self, name: &str) -> Option<&DatasetState> {
        self.datasets.get(name)
    }

    pub fn dataset_names(&self) -> Vec<&str> {
        self.datasets.keys().map(String::as_str).collect()
    }
}

fn dataset(
    provider: Arc<dyn GridProvider>,
    cache_dir: &std::path::Path,
    config: DatasetConfig,
) -> DatasetState {
    let tiles = TileCache::new(
        config.namespace,
        Arc::clone(&provider),
        cache_dir,
        QuantSpec::from(&config),
    );
    DatasetState { provider, tiles }
}
