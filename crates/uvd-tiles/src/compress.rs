//! Negotiated transfer compression with an in-memory memo.
//!
//! Raw rasters compress well (uniform regions, sentinel runs) and the
//! same tiles are requested repeatedly, so compressed bytes are
//! memoized per tile key. The memo has no eviction: the key universe
//! is bounded by the zoom cap and dataset count, and it empties on
//! restart. Concurrent writers to one key race benignly; both compute
//! identical bytes and last-write-wins.

use std::collections::HashMap;
use std::io::Write;

use bytes::Bytes;
use tokio::sync::RwLock;

/// Content-Encoding value applied when the client accepts it.
pub const ENCODING: &str = "gzip";

/// Memoizing gzip compressor for tile transport.
#[derive(Default)]
pub struct TransferCompressor {
    memo: RwLock<HashMap<String, Bytes>>,
}

impl TransferCompressor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compress `raw` for transport if `accept_encoding` allows gzip.
    ///
    /// Returns the payload plus the Content-Encoding tag to set, or
    /// the raw bytes and `None` when the client did not opt in.
    pub async fn compress_for_transport(
        &self,
        raw: &Bytes,
        accept_encoding: Option<&str>,
        memo_key: &str,
    ) -> (Bytes, Option<&'static str>) {
        if !accepts_gzip(accept_encoding) {
            return (raw.clone(), None);
        }

        if let Some(hit) = self.memo.read().await.get(memo_key) {
            return (hit.clone(), Some(ENCODING));
        }

        let compressed = gzip(raw);
        self.memo
            .write()
            .await
            .insert(memo_key.to_string(), compressed.clone());
        (compressed, Some(ENCODING))
    }

    /// Number of memoized entries (diagnostics/tests).
    pub async fn memo_len(&self) -> usize {
        self.memo.read().await.len()
    }
}

fn accepts_gzip(accept_encoding: Option<&str>) -> bool {
    let Some(header) = accept_encoding else {
        return false;
    };
    header.split(',').any(|entry| {
        let token = entry.split(';').next().unwrap_or("").trim();
        token.eq_ignore_ascii_case("gzip") || token == "*"
    })
}

fn gzip(raw: &[u8]) -> Bytes {
    let mut encoder = flate2::write::GzEncoder::new(
        Vec::with_capacity(raw.len() / 4),
        flate2::Compression::default(),
    );
    // Writing to a Vec cannot fail
    encoder.write_all(raw).expect("gzip write to Vec");
    Bytes::from(encoder.finish().expect("gzip finish to Vec"))
}
