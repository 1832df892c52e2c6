//! Scalar statistics over plain columns.

use super::TRADING_DAYS_PER_YEAR;

/// Volatility below this is treated as zero when used as a denominator.
pub const MIN_VOLATILITY: f64 = 1e-12;

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1); `None` with fewer than 2 values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Scale a daily standard deviation to an annual one.
pub fn annualize_volatility(daily_std: f64) -> f64 {
    daily_std * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Annualized volatility of daily returns: `std * sqrt(252)`.
pub fn annualized_volatility(daily_returns: &[f64]) -> Option<f64> {
    sample_std(daily_returns).map(annualize_volatility)
}

/// Annualized Sharpe ratio with a zero risk-free rate.
///
/// `(mean * 252) / (std * sqrt(252))`. `None` when the volatility is
/// undefined or effectively zero.
pub fn sharpe_ratio(daily_returns: &[f64]) -> Option<f64> {
    let vol = annualized_volatility(daily_returns)?;
    if !vol.is_finite() || vol < MIN_VOLATILITY {
        return None;
    }
    let m = mean(daily_returns)?;
    Some(m * TRADING_DAYS_PER_YEAR / vol)
}

/// Pearson correlation of two equally long columns.
///
/// `None` with fewer than 2 observations or when either column has zero
/// variance. The result is clamped to [-1, 1].
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let mx = mean(x)?;
    let my = mean(y)?;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let (dx, dy) = (a - mx, b - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    let n = x.len() as f64;
    if negligible_spread(sxx, n, mx) || negligible_spread(syy, n, my) {
        return None;
    }
    let r = sxy / (sxx.sqrt() * syy.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// A column whose spread is within rounding noise of its mean is constant.
fn negligible_spread(sum_sq: f64, n: f64, mean: f64) -> bool {
    sum_sq <= 0.0 || (sum_sq / n).sqrt() <= n * f64::EPSILON * mean.abs()
}

/// Pearson correlation over the rows where both columns are defined.
pub fn pearson_pairwise(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .unzip();
    pearson(&xs, &ys)
}
