//! Write-once disk cache for encoded tiles.
//!
//! Tiles are deterministic functions of their key, so entries are
//! never invalidated or evicted; bumping the model version segment in
//! the path is the only invalidation mechanism. Concurrent writers to
//! the same key race harmlessly (both produce identical bytes) but
//! each write goes through a temp file + rename so readers never see a
//! partial entry.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use tracing::debug;

use uvd_common::{TileAddress, UvdResult, MODEL_VERSION, TILE_SIZE};
use uvd_provider::GridProvider;

use crate::codec::TileFormat;
use crate::mercator::{latitude_samples, longitude_samples};
use crate::quant::QuantSpec;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Fully-qualified cache key for one tile.
///
/// [`TileKey::storage_path`] is the only place the key schema maps to
/// a filesystem path, so write and read sites cannot drift.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileKey {
    pub namespace: String,
    pub version: String,
    pub addr: TileAddress,
    pub format: TileFormat,
}

impl TileKey {
    /// `{root}/{namespace}/{version}/{month}/{z}/{x}/{y}.{ext}`
    pub fn storage_path(&self, root: &Path) -> PathBuf {
        root.join(&self.namespace)
            .join(&self.version)
            .join(self.addr.month.to_string())
            .join(self.addr.z.to_string())
            .join(self.addr.x.to_string())
            .join(format!("{}.{}", self.addr.y, self.format.extension()))
    }

    /// Stable string form, used as the transfer-compressor memo key.
    pub fn memo_key(&self) -> String {
        format!(
            "{}:{}:{}:{}:{}:{}.{}",
            self.namespace,
            self.version,
            self.addr.month,
            self.addr.z,
            self.addr.x,
            self.addr.y,
            self.format.extension()
        )
    }
}

/// Generates and caches encoded tiles for one dataset namespace.
pub struct TileCache {
    namespace: String,
    provider: Arc<dyn GridProvider>,
    cache_root: PathBuf,
    spec: QuantSpec,
    tile_size: usize,
}

impl TileCache {
    pub fn new(
        namespace: impl Into<String>,
        provider: Arc<dyn GridProvider>,
        cache_root: impl Into<PathBuf>,
        spec: QuantSpec,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            provider,
            cache_root: cache_root.into(),
            spec,
            tile_size: TILE_SIZE,
        }
    }

    /// Override the tile edge length (tests use small tiles).
    pub fn with_tile_size(mut self, tile_size: usize) -> Self {
        self.tile_size = tile_size;
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Build the cache key for an address/format pair.
    pub fn key(&self, addr: TileAddress, format: TileFormat) -> TileKey {
        TileKey {
            namespace: self.namespace.clone(),
            version: MODEL_VERSION.to_string(),
            addr,
            format,
        }
    }

    /// Return the encoded tile, generating and persisting it on first
    /// request. Cached bytes are returned verbatim, trusted once
    /// written.
    pub fn fetch(&self, addr: TileAddress, format: TileFormat) -> UvdResult<Bytes> {
        let key = self.key(addr, format);
        let path = key.storage_path(&self.cache_root);

        if path.exists() {
            debug!(key = %key.memo_key(), "Tile cache hit");
            return Ok(Bytes::from(std::fs::read(&path)?));
        }

        debug!(key = %key.memo_key(), "Tile cache miss, generating");
        let lats = latitude_samples(addr.z, addr.y, self.tile_size);
        let lons = longitude_samples(addr.z, addr.x, self.tile_size);
        let grid = self.provider.sample_grid(addr.month, &lats, &lons);
        let bytes = format.encode(&grid, self.tile_size, self.tile_size, &self.spec)?;

        write_atomic(&path, &bytes)?;
        Ok(Bytes::from(bytes))
    }
}

/// Whole-file write that a concurrent reader can never observe half
/// done: write a unique sibling temp file, then rename into place.
fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let parent = path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "cache path has no parent")
    })?;
    std::fs::create_dir_all(parent)?;

    let temp_name = format!(
        ".{}.tmp-{}-{}",
        path.file_name().and_then(|n| n.to_str()).unwrap_or("tile"),
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    );
    let temp_path = parent.join(temp_name);

    std::fs::write(&temp_path, bytes)?;
    match std::fs::rename(&temp_path, path) {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = std::fs::remove_file(&temp_path);
            Err(e)
        }
    }
}
