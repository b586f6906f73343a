use std::num::NonZeroU32;
use std::time::Instant;
use tracing::{debug, trace};

use crate::errors::{SearchError, SearchResult};
use crate::metrics::SearchMetrics;

pub const DEFAULT_HASH_BASE: u32 = 256;
pub const DEFAULT_MODULUS: u32 = 101;

/// Base and modulus of the polynomial rolling hash.
///
/// The default modulus is small on purpose: collisions are common and every
/// hash hit is confirmed by comparing bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    pub base: NonZeroU32,
    pub modulus: NonZeroU32,
}

impl HashParams {
    /// Builds hash parameters, rejecting zero values
    pub fn new(base: u32, modulus: u32) -> SearchResult<Self> {
        let base = NonZeroU32::new(base)
            .ok_or_else(|| SearchError::invalid_hash_params("base must be positive"))?;
        let modulus = NonZeroU32::new(modulus)
            .ok_or_else(|| SearchError::invalid_hash_params("modulus must be positive"))?;
        Ok(Self { base, modulus })
    }
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            base: NonZeroU32::new(DEFAULT_HASH_BASE).unwrap_or(NonZeroU32::MIN),
            modulus: NonZeroU32::new(DEFAULT_MODULUS).unwrap_or(NonZeroU32::MIN),
        }
    }
}

/// Rabin-Karp substring matcher
#[derive(Debug, Clone)]
pub struct RollingHashMatcher {
    params: HashParams,
    metrics: SearchMetrics,
}

impl RollingHashMatcher {
    /// Creates a new matcher with its own metrics
    pub fn new(params: HashParams) -> Self {
        Self::with_metrics(params, SearchMetrics::new())
    }

    /// Creates a new matcher recording into the given metrics
    pub fn with_metrics(params: HashParams, metrics: SearchMetrics) -> Self {
        Self { params, metrics }
    }

    pub fn params(&self) -> HashParams {
        self.params
    }

    /// Gets the metrics this matcher records into
    pub fn metrics(&self) -> &SearchMetrics {
        &self.metrics
    }

    /// Finds every offset where `pattern` occurs in `text`.
    ///
    /// Offsets are ascending and overlapping occurrences are all reported.
    /// Both slices are compared as given, so callers fold case beforehand.
    pub fn find_matches(&self, text: &[u8], pattern: &[u8]) -> Vec<usize> {
        let started = Instant::now();
        let n = text.len();
        let m = pattern.len();
        let mut matches = Vec::new();

        if m == 0 || m > n {
            debug!(
                "Pattern length {} cannot match text of length {}, skipping scan",
                m, n
            );
            self.metrics.record_search_time(started.elapsed());
            return matches;
        }

        let base = i128::from(self.params.base.get());
        let modulus = i128::from(self.params.modulus.get());

        // base^(m-1) mod modulus
        let mut window_scaler: i128 = 1;
        for _ in 1..m {
            window_scaler = (window_scaler * base) % modulus;
        }

        let mut pattern_hash: i128 = 0;
        let mut window_hash: i128 = 0;
        for (&p, &t) in pattern.iter().zip(&text[..m]) {
            pattern_hash = (base * pattern_hash + i128::from(p)) % modulus;
            window_hash = (base * window_hash + i128::from(t)) % modulus;
        }

        let last = n - m;
        let mut hash_hits = 0u64;
        for i in 0..=last {
            if pattern_hash == window_hash {
                hash_hits += 1;
                if &text[i..i + m] == pattern {
                    trace!("Verified match at offset {}", i);
                    matches.push(i);
                } else {
                    trace!("Hash collision at offset {}", i);
                }
            }

            if i < last {
                window_hash = (base * (window_hash - i128::from(text[i]) * window_scaler)
                    + i128::from(text[i + m]))
                    % modulus;
                if window_hash < 0 {
                    window_hash += modulus;
                }
            }
        }

        let elapsed = started.elapsed();
        self.metrics
            .record_scan((last + 1) as u64, hash_hits, matches.len() as u64);
        self.metrics.record_search_time(elapsed);
        debug!(
            "Scanned {} windows in {}: {} hash hits, {} verified",
            last + 1,
            humantime::format_duration(elapsed),
            hash_hits,
            matches.len()
        );

        matches
    }
}
