//! Expectancy surface over win rate and payoff ratio.
//!
//! For a trade risking one unit, the expected value at win rate `w` and
//! profit/loss ratio `r` is `w * r - (1 - w)`. Sampling that function over
//! a grid gives the background surface of the report chart; the zero line
//! of the same function is the breakeven curve.

pub const WIN_RATE_MIN: f64 = 0.01;
pub const WIN_RATE_MAX: f64 = 0.99;
pub const RATIO_MIN: f64 = 0.01;
pub const RATIO_MAX: f64 = 5.0;
pub const GRID_SAMPLES: usize = 100;

/// Expected value of risking one unit at the given win rate and ratio.
pub fn expected_value_per_unit_risk(win_rate: f64, ratio: f64) -> f64 {
    win_rate * ratio - (1.0 - win_rate)
}

/// The payoff ratio at which a given win rate breaks even.
pub fn breakeven_ratio(win_rate: f64) -> f64 {
    (1.0 - win_rate) / win_rate
}

/// Evenly spaced samples over `[start, stop]`, endpoints included.
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![start];
    }
    let step = (stop - start) / (count - 1) as f64;
    (0..count).map(|i| start + step * i as f64).collect()
}

/// Expected value sampled over the win-rate/ratio grid.
///
/// `z` is indexed by ratio row, then win-rate column.
#[derive(Debug, Clone)]
pub struct ExpectancySurface {
    pub win_rates: Vec<f64>,
    pub ratios: Vec<f64>,
    pub z: Vec<Vec<f64>>,
    pub z_min: f64,
    pub z_max: f64,
}

impl ExpectancySurface {
    pub fn sample() -> Self {
        let win_rates = linspace(WIN_RATE_MIN, WIN_RATE_MAX, GRID_SAMPLES);
        let ratios = linspace(RATIO_MIN, RATIO_MAX, GRID_SAMPLES);

        let mut z = Vec::with_capacity(ratios.len());
        let mut z_min = f64::INFINITY;
        let mut z_max = f64::NEG_INFINITY;
        for &ratio in &ratios {
            let mut row = Vec::with_capacity(win_rates.len());
            for &win_rate in &win_rates {
                let value = expected_value_per_unit_risk(win_rate, ratio);
                z_min = z_min.min(value);
                z_max = z_max.max(value);
                row.push(value);
            }
            z.push(row);
        }

        ExpectancySurface {
            win_rates,
            ratios,
            z,
            z_min,
            z_max,
        }
    }
}

/// The breakeven curve as (win-rate percent, ratio) points, with the ratio
/// clamped to the chart's vertical range.
pub fn breakeven_curve() -> Vec<(f64, f64)> {
    linspace(1.0, 99.0, GRID_SAMPLES)
        .into_iter()
        .map(|pct| {
            let ratio = breakeven_ratio(pct / 100.0).clamp(0.0, RATIO_MAX);
            (pct, ratio)
        })
        .collect()
}
