//! NaN-aware statistical helpers for the tethys indicator reducers.
//!
//! Missing values are `NaN` throughout the workspace. Every function here
//! skips them, and returns `NaN` when nothing is left to summarise.

/// Arithmetic mean of the finite values. Returns `NaN` if there are none.
pub fn mean(data: &[f64]) -> f64 {
    let (sum, n) = data
        .iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(s, n), &v| (s + v, n + 1));
    if n == 0 { f64::NAN } else { sum / n as f64 }
}

/// Sum of the finite values (0.0 when there are none).
pub fn sum(data: &[f64]) -> f64 {
    data.iter().filter(|v| v.is_finite()).sum()
}

/// Finite values of `data`, sorted ascending.
pub fn sorted_finite(data: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = data.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// R's default quantile algorithm (type=7).
///
/// **Expects pre-sorted, finite input** (see [`sorted_finite`]). Returns
/// `NaN` for an empty slice.
pub fn quantile_type7(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    let h = (n - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}

/// Median of pre-sorted data. For even length, averages the middle two values.
/// Returns `NaN` for an empty slice.
pub fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Trailing moving average over complete windows.
///
/// Returns `data.len() - window + 1` values; a window containing `NaN`
/// yields `NaN`. Empty when `window` is zero or longer than `data`.
pub fn rolling_mean(data: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || window > data.len() {
        return Vec::new();
    }
    data.windows(window)
        .map(|w| w.iter().sum::<f64>() / window as f64)
        .collect()
}

/// Lengths of the runs of consecutive `true` values, in order.
pub fn run_lengths(mask: &[bool]) -> Vec<usize> {
    let mut runs = Vec::new();
    let mut current = 0usize;
    for &m in mask {
        if m {
            current += 1;
        } else if current > 0 {
            runs.push(current);
            current = 0;
        }
    }
    if current > 0 {
        runs.push(current);
    }
    runs
}

/// Length of the longest run of consecutive `true` values.
pub fn longest_run(mask: &[bool]) -> usize {
    run_lengths(mask).into_iter().max().unwrap_or(0)
}
