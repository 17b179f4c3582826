//! Pure series computations: alignment, rolling averages, ratio
//! multiples. No I/O, no hidden state — same input, same output.

use crate::errors::CoreError;
use crate::models::series::{AlignedSeries, RawSeriesPoint, SeriesPoint};

/// Map raw points into a fixed-length chart series.
///
/// Takes the last `window` points (input is oldest-first). When the
/// source has fewer points than `window` — including none at all — the
/// old end is padded with zero-valued `D-{offset}` placeholders so the
/// result is always exactly `window` long. Never fails, never returns
/// a shorter series: the chart consumer relies on the fixed shape.
pub fn align(points: &[RawSeriesPoint], window: usize) -> AlignedSeries {
    let take = points.len().min(window);
    let pad = window - take;
    let tail = &points[points.len() - take..];

    let mut series = Vec::with_capacity(window);
    for i in 0..window {
        if i < pad {
            // Placeholder label counts days before present.
            series.push(SeriesPoint {
                label: format!("D-{}", window - 1 - i),
                value: 0.0,
            });
        } else {
            let p = &tail[i - pad];
            series.push(SeriesPoint {
                label: p.label.clone(),
                value: p.value,
            });
        }
    }
    series
}

/// Trailing moving average over `series` with the given window.
///
/// Maintains a sliding sum: emit once the first full window is filled,
/// then subtract the element leaving and add the element entering —
/// O(n) total. Returns the empty vec when the series is shorter than
/// the window (callers treat that as insufficient history).
///
/// Plain floating-point arithmetic throughout: a NaN in the input
/// propagates into every window containing it.
pub fn rolling_average(series: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || series.len() < window {
        return Vec::new();
    }

    let divisor = window as f64;
    let mut out = Vec::with_capacity(series.len() - window + 1);

    let mut sum: f64 = series[..window].iter().sum();
    out.push(sum / divisor);

    for i in window..series.len() {
        sum += series[i] - series[i - window];
        out.push(sum / divisor);
    }

    out
}

/// A derived ratio multiple: latest value plus its last-N history.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioSeries {
    /// Most recent raw value divided by its rolling average.
    pub latest: f64,
    /// The same ratio for each of the last `output_points` days,
    /// oldest-first.
    pub history: AlignedSeries,
}

/// Divide an instantaneous series by its own trailing moving average.
///
/// Requires enough raw history for at least `output_points` full
/// windows, else `InsufficientHistory`. Division by a zero or
/// near-zero average is not special-cased; with the 200- and 365-day
/// windows used here a zero denominator does not occur for real
/// market data.
pub fn derive_ratio(
    points: &[RawSeriesPoint],
    window: usize,
    output_points: usize,
) -> Result<RatioSeries, CoreError> {
    if points.len() < window {
        return Err(CoreError::InsufficientHistory {
            required: window,
            available: points.len(),
        });
    }

    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    let averages = rolling_average(&values, window);

    if averages.len() < output_points {
        return Err(CoreError::InsufficientHistory {
            required: output_points,
            available: averages.len(),
        });
    }

    let raw_tail = &points[points.len() - output_points..];
    let avg_tail = &averages[averages.len() - output_points..];

    let history: AlignedSeries = raw_tail
        .iter()
        .zip(avg_tail)
        .map(|(p, avg)| SeriesPoint {
            label: p.label.clone(),
            value: p.value / avg,
        })
        .collect();

    let latest = history.last().map(|p| p.value).unwrap_or(f64::NAN);

    Ok(RatioSeries { latest, history })
}
