//! Canonicalization of raw provider bars into a clean price history.
//!
//! Sort by date, keep the first bar of any duplicated date, drop void bars,
//! and rescale OHLC by the adjusted-close ratio.

use super::provider::RawBar;
use crate::domain::Bar;
use tracing::debug;

/// Counts of what canonicalization removed or flagged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CanonicalStats {
    pub duplicates: usize,
    pub void: usize,
    /// Bars kept despite failing the OHLC sanity check.
    pub suspicious: usize,
}

/// Canonicalize raw bars for `symbol`.
pub fn canonicalize(symbol: &str, raw: Vec<RawBar>) -> Vec<Bar> {
    canonicalize_with_stats(symbol, raw).0
}

/// Canonicalize and report what was dropped.
pub fn canonicalize_with_stats(symbol: &str, mut raw: Vec<RawBar>) -> (Vec<Bar>, CanonicalStats) {
    let mut stats = CanonicalStats::default();

    // Stable sort keeps provider order among equal dates, so dedup keeps the first.
    raw.sort_by_key(|b| b.date);
    let before = raw.len();
    raw.dedup_by_key(|b| b.date);
    stats.duplicates = before - raw.len();

    let mut bars = Vec::with_capacity(raw.len());
    for r in raw {
        let bar = adjust(symbol, r);
        if bar.is_void() {
            stats.void += 1;
            continue;
        }
        if !bar.is_sane() {
            stats.suspicious += 1;
        }
        bars.push(bar);
    }

    if stats != CanonicalStats::default() {
        debug!(
            %symbol,
            duplicates = stats.duplicates,
            void = stats.void,
            suspicious = stats.suspicious,
            "canonicalized bars"
        );
    }

    (bars, stats)
}

/// Apply the adj_close/close ratio to OHLC when both are usable.
fn adjust(symbol: &str, r: RawBar) -> Bar {
    let ratio = if r.adj_close.is_finite() && r.adj_close > 0.0 && r.close.is_finite() && r.close > 0.0
    {
        r.adj_close / r.close
    } else {
        1.0
    };
    let scale = |v: f64| if ratio == 1.0 { v } else { v * ratio };
    Bar {
        symbol: symbol.to_string(),
        date: r.date,
        open: scale(r.open),
        high: scale(r.high),
        low: scale(r.low),
        close: scale(r.close),
        volume: r.volume,
        adj_close: r.adj_close,
    }
}
