//! Fixed-size rolling windows over optional columns.
//!
//! A window produces a value only when all `window` samples in it are
//! defined (a full window, no gaps). This is the only rule; callers never
//! see partial-window statistics.

use super::stats;

/// Rolling arithmetic mean.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, stats::mean)
}

/// Rolling sample standard deviation (n - 1 denominator).
pub fn rolling_std(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, stats::sample_std)
}

fn rolling(
    values: &[Option<f64>],
    window: usize,
    stat: fn(&[f64]) -> Option<f64>,
) -> Vec<Option<f64>> {
    assert!(window >= 1, "rolling window must be >= 1");
    let n = values.len();
    let mut out = vec![None; n];
    if n < window {
        return out;
    }

    let mut buf = Vec::with_capacity(window);
    for end in (window - 1)..n {
        buf.clear();
        buf.extend(values[(end + 1 - window)..=end].iter().flatten());
        if buf.len() == window {
            out[end] = stat(&buf);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    fn col(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn mean_warmup_then_values() {
        let r = rolling_mean(&col(&[1.0, 2.0, 3.0, 4.0]), 3);
        assert!(r[0].is_none());
        assert!(r[1].is_none());
        assert_approx(r[2], 2.0, DEFAULT_EPSILON);
        assert_approx(r[3], 3.0, DEFAULT_EPSILON);
    }

    #[test]
    fn gap_invalidates_every_window_containing_it() {
        let mut v = col(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        v[2] = None;
        let r = rolling_mean(&v, 3);
        assert!(r[2].is_none());
        assert!(r[3].is_none());
        assert!(r[4].is_none());
        assert_approx(r[5], 5.0, DEFAULT_EPSILON);
    }

    #[test]
    fn std_is_sample_std() {
        // mean 2.5, squared deviations sum 5.0, / (4 - 1)
        let r = rolling_std(&col(&[1.0, 2.0, 3.0, 4.0]), 4);
        assert_approx(r[3], (5.0_f64 / 3.0).sqrt(), DEFAULT_EPSILON);
    }

    #[test]
    fn too_short_is_all_none() {
        let r = rolling_std(&col(&[1.0, 2.0]), 30);
        assert_eq!(r, vec![None, None]);
    }
}
