//! Percentile ribbons
//!
//! A ladder of `k` symmetric percentile pairs between `percentile_min` and
//! `percentile_max`. Lower percentiles are spaced evenly over
//! `[percentile_min, 50)` and upper ones over `(50, percentile_max]`, so
//! the median itself is never a band edge. Pairs are stored innermost
//! first, which makes band widths grow with the index.

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use crate::error::{validation, StatsError, StatsResult};
use crate::percentile::SortedSamples;
use crate::quantile_box::PercentilePair;

/// One shaded band: percentile pair plus its per-column curves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RibbonBand {
    pub percentiles: PercentilePair,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

/// Ordered ribbon bands, innermost first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RibbonBands {
    bands: Vec<RibbonBand>,
}

impl RibbonBands {
    pub fn bands(&self) -> &[RibbonBand] {
        &self.bands
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RibbonBand> {
        self.bands.iter()
    }
}

impl IntoIterator for RibbonBands {
    type Item = RibbonBand;
    type IntoIter = std::vec::IntoIter<RibbonBand>;

    fn into_iter(self) -> Self::IntoIter {
        self.bands.into_iter()
    }
}

/// Percentile ladder for `count` ribbons, innermost pair first
pub fn ribbon_percentiles(
    count: usize,
    percentile_min: f64,
    percentile_max: f64,
) -> StatsResult<Vec<PercentilePair>> {
    validation::validate_ladder(count, percentile_min, percentile_max)?;

    let lower_step = (50.0 - percentile_min) / count as f64;
    let upper_step = (percentile_max - 50.0) / count as f64;

    Ok((0..count)
        .rev()
        .map(|i| PercentilePair {
            low: percentile_min + i as f64 * lower_step,
            high: percentile_max - i as f64 * upper_step,
        })
        .collect())
}

/// Compute ribbon curves for a sample matrix
///
/// Rows of `samples` are draws and columns are x positions; every
/// percentile is taken down each column independently.
pub fn compute_ribbon_bands(
    samples: ArrayView2<'_, f64>,
    count: usize,
    percentile_min: f64,
    percentile_max: f64,
) -> StatsResult<RibbonBands> {
    let ladder = ribbon_percentiles(count, percentile_min, percentile_max)?;
    if samples.nrows() == 0 || samples.ncols() == 0 {
        return Err(StatsError::invalid(format!(
            "sample matrix is empty ({}x{})",
            samples.nrows(),
            samples.ncols()
        )));
    }

    let columns: Vec<SortedSamples> = samples
        .columns()
        .into_iter()
        .map(|column| SortedSamples::from_data(column.iter()))
        .collect::<StatsResult<_>>()?;

    let bands = ladder
        .into_iter()
        .map(|pair| -> StatsResult<RibbonBand> {
            let lower = columns
                .iter()
                .map(|c| c.percentile(pair.low))
                .collect::<StatsResult<Vec<_>>>()?;
            let upper = columns
                .iter()
                .map(|c| c.percentile(pair.high))
                .collect::<StatsResult<Vec<_>>>()?;
            Ok(RibbonBand {
                percentiles: pair,
                lower,
                upper,
            })
        })
        .collect::<StatsResult<Vec<_>>>()?;

    tracing::debug!(
        bands = bands.len(),
        columns = samples.ncols(),
        "computed ribbon bands"
    );
    Ok(RibbonBands { bands })
}
