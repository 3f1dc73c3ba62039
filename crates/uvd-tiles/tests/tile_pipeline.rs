//! End-to-end tile generation tests against deterministic providers.

use std::sync::Arc;

use test_utils::{temp_cache_dir, PartialCoverageProvider, UniformProvider};
use uvd_common::{TileAddress, TILE_SIZE};
use uvd_provider::SyntheticProvider;
use uvd_tiles::{QuantSpec, TileCache, TileFormat, TransferCompressor, NO_DATA};

fn raster_of(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|px| u16::from_le_bytes([px[0], px[1]]))
        .collect()
}

#[test]
fn uniform_zero_world_tile_encodes_to_zero_codes() {
    let dir = temp_cache_dir();
    let cache = TileCache::new(
        "uv",
        Arc::new(UniformProvider::new(0.0)),
        dir.path(),
        QuantSpec::new(3.0, 0.0),
    );
    let addr = TileAddress::new(0, 0, 0, 6).unwrap();

    let bytes = cache.fetch(addr, TileFormat::RawU16).unwrap();
    let raster = raster_of(&bytes);

    assert_eq!(raster.len(), TILE_SIZE * TILE_SIZE);
    assert!(raster.iter().all(|&c| c == 0));
    assert!(!raster.contains(&NO_DATA));
}

#[test]
fn repeated_fetches_are_byte_identical() {
    let dir = temp_cache_dir();
    let cache = TileCache::new(
        "uv",
        Arc::new(SyntheticProvider::new()),
        dir.path(),
        QuantSpec::new(3.0, 0.0),
    );
    let addr = TileAddress::new(4, 7, 5, 9).unwrap();

    let first = cache.fetch(addr, TileFormat::RawU16).unwrap();
    let second = cache.fetch(addr, TileFormat::RawU16).unwrap();
    assert_eq!(first, second);
}

#[test]
fn two_caches_sharing_a_root_serve_the_same_bytes() {
    // Simulates concurrent processes: the second cache reads what the
    // first one wrote.
    let dir = temp_cache_dir();
    let make = || {
        TileCache::new(
            "uv",
            Arc::new(SyntheticProvider::new()),
            dir.path(),
            QuantSpec::new(3.0, 0.0),
        )
    };
    let addr = TileAddress::new(2, 1, 1, 3).unwrap();

    let written = make().fetch(addr, TileFormat::RawU16).unwrap();
    let read_back = make().fetch(addr, TileFormat::RawU16).unwrap();
    assert_eq!(written, read_back);
}

#[test]
fn partial_coverage_marks_only_uncovered_rows() {
    let dir = temp_cache_dir();
    let cache = TileCache::new(
        "uv",
        Arc::new(PartialCoverageProvider::new(3000.0, 0.0)),
        dir.path(),
        QuantSpec::new(3.0, 0.0),
    );
    // Whole-world tile: northern half has no data.
    let addr = TileAddress::new(0, 0, 0, 1).unwrap();

    let raster = raster_of(&cache.fetch(addr, TileFormat::RawU16).unwrap());
    let top_left = raster[0];
    let bottom_left = raster[(TILE_SIZE - 1) * TILE_SIZE];

    assert_eq!(top_left, NO_DATA);
    assert_eq!(bottom_left, 9000);
    assert!(raster.contains(&NO_DATA));
    assert!(raster.contains(&9000));
}

#[test]
fn legacy_png_and_raw_share_one_cache_tree() {
    let dir = temp_cache_dir();
    let cache = TileCache::new(
        "uv",
        Arc::new(UniformProvider::new(5000.0)),
        dir.path(),
        QuantSpec::new(3.0, 0.0),
    );
    let addr = TileAddress::new(1, 0, 1, 7).unwrap();

    let raw = cache.fetch(addr, TileFormat::RawU16).unwrap();
    let png = cache.fetch(addr, TileFormat::LegacyPng).unwrap();

    assert_eq!(raw.len(), TILE_SIZE * TILE_SIZE * 2);
    assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);

    let raw_path = cache.key(addr, TileFormat::RawU16).storage_path(dir.path());
    let png_path = cache.key(addr, TileFormat::LegacyPng).storage_path(dir.path());
    assert!(raw_path.exists());
    assert!(png_path.exists());
    assert_ne!(raw_path, png_path);
}

#[tokio::test]
async fn compressed_tile_is_memoized_and_reproducible() {
    let dir = temp_cache_dir();
    let cache = TileCache::new(
        "uv",
        Arc::new(UniformProvider::new(1234.0)),
        dir.path(),
        QuantSpec::new(3.0, 0.0),
    );
    let compressor = TransferCompressor::new();
    let addr = TileAddress::new(0, 0, 0, 2).unwrap();

    let raw = cache.fetch(addr, TileFormat::RawU16).unwrap();
    let key = cache.key(addr, TileFormat::RawU16).memo_key();

    let (first, enc) = compressor
        .compress_for_transport(&raw, Some("gzip"), &key)
        .await;
    assert_eq!(enc, Some("gzip"));
    assert!(first.len() < raw.len());

    let (second, _) = compressor
        .compress_for_transport(&raw, Some("gzip"), &key)
        .await;
    assert_eq!(first, second);
    assert_eq!(compressor.memo_len().await, 1);
}
