//! Quantile boxes: nested percentile bands around the median
//!
//! A box summarises the samples at one position with an outer band
//! (e.g. the central 95%), an inner band (e.g. the central 50%) and the
//! median. Boxes are computed either by grouping a flat sample vector on
//! its positions or from the columns of a sample matrix.

use std::collections::HashMap;

use ndarray::{ArrayView2, ArrayViewD, Ix1, Ix2};
use serde::{Deserialize, Serialize};

use crate::error::{validation, StatsError, StatsResult};
use crate::percentile::SortedSamples;

/// A (low, high) percentile pair centred on the median
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentilePair {
    pub low: f64,
    pub high: f64,
}

impl PercentilePair {
    /// Pair covering the central `width` percent: (50 - w/2, 50 + w/2)
    pub fn centred(width: f64) -> StatsResult<Self> {
        validation::validate_percentile(width)?;
        let half = width / 2.0;
        Ok(Self {
            low: 50.0 - half,
            high: 50.0 + half,
        })
    }

    /// Coverage width in percent
    pub fn width(&self) -> f64 {
        self.high - self.low
    }
}

/// Sample values at the two ends of a percentile pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandEnds {
    pub low: f64,
    pub high: f64,
}

impl BandEnds {
    fn from_sorted(sorted: &SortedSamples, pair: PercentilePair) -> StatsResult<Self> {
        Ok(Self {
            low: sorted.percentile(pair.low)?,
            high: sorted.percentile(pair.high)?,
        })
    }
}

/// Summary of the samples at one position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantileBox {
    pub position: f64,
    pub outer: BandEnds,
    pub inner: BandEnds,
    pub median: f64,
}

impl QuantileBox {
    /// (outer_low, outer_high, inner_low, inner_high, median)
    pub fn endpoints(&self) -> (f64, f64, f64, f64, f64) {
        (
            self.outer.low,
            self.outer.high,
            self.inner.low,
            self.inner.high,
            self.median,
        )
    }

    fn at(mut self, position: f64) -> Self {
        self.position = position;
        self
    }
}

/// Compute the box of a single sample set
///
/// `inner_pct` and `outer_pct` are coverage widths with
/// `0 <= inner_pct <= outer_pct <= 100`. The returned box sits at
/// position 0; use [`compute_boxes_by_position`] to place boxes.
pub fn compute_box<'a>(
    samples: impl IntoIterator<Item = &'a f64>,
    inner_pct: f64,
    outer_pct: f64,
) -> StatsResult<QuantileBox> {
    validation::validate_widths(inner_pct, outer_pct)?;
    let sorted = SortedSamples::from_data(samples)?;

    Ok(QuantileBox {
        position: 0.0,
        outer: BandEnds::from_sorted(&sorted, PercentilePair::centred(outer_pct)?)?,
        inner: BandEnds::from_sorted(&sorted, PercentilePair::centred(inner_pct)?)?,
        median: sorted.median(),
    })
}

/// Layout of the samples passed to [`compute_boxes_by_position`]
#[derive(Debug, Clone, Copy)]
pub enum BoxSamples<'a> {
    /// One sample per entry of `positions`; samples sharing a position
    /// form one group
    Flat(&'a [f64]),
    /// Rows are independent draws, column `i` belongs to `positions[i]`
    Columns(ArrayView2<'a, f64>),
}

/// Compute one box per position
pub fn compute_boxes_by_position(
    positions: &[f64],
    samples: BoxSamples<'_>,
    inner_pct: f64,
    outer_pct: f64,
) -> StatsResult<Vec<QuantileBox>> {
    validation::validate_widths(inner_pct, outer_pct)?;

    let boxes = match samples {
        BoxSamples::Flat(values) => flat_boxes(positions, values, inner_pct, outer_pct)?,
        BoxSamples::Columns(matrix) => column_boxes(positions, matrix, inner_pct, outer_pct)?,
    };

    tracing::debug!(boxes = boxes.len(), inner_pct, outer_pct, "computed quantile boxes");
    Ok(boxes)
}

/// Compute boxes from arrays of unknown rank
///
/// 1D positions with 1D samples group by position; 1D positions with 2D
/// samples read one column per position. Any other combination is
/// rejected.
pub fn compute_boxes_dyn(
    positions: ArrayViewD<'_, f64>,
    samples: ArrayViewD<'_, f64>,
    inner_pct: f64,
    outer_pct: f64,
) -> StatsResult<Vec<QuantileBox>> {
    let (pos_rank, sample_rank) = (positions.ndim(), samples.ndim());
    let positions = positions.into_dimensionality::<Ix1>().map_err(|_| {
        StatsError::invalid(format!(
            "unsupported ranks: {pos_rank}D positions with {sample_rank}D samples"
        ))
    })?;
    let positions = positions.to_vec();

    match sample_rank {
        1 => {
            let flat = samples
                .into_dimensionality::<Ix1>()
                .map_err(|e| StatsError::invalid(e.to_string()))?
                .to_vec();
            compute_boxes_by_position(&positions, BoxSamples::Flat(&flat), inner_pct, outer_pct)
        }
        2 => {
            let matrix = samples
                .into_dimensionality::<Ix2>()
                .map_err(|e| StatsError::invalid(e.to_string()))?;
            compute_boxes_by_position(&positions, BoxSamples::Columns(matrix), inner_pct, outer_pct)
        }
        _ => Err(StatsError::invalid(format!(
            "unsupported ranks: 1D positions with {sample_rank}D samples"
        ))),
    }
}

fn flat_boxes(
    positions: &[f64],
    values: &[f64],
    inner_pct: f64,
    outer_pct: f64,
) -> StatsResult<Vec<QuantileBox>> {
    if positions.len() != values.len() {
        return Err(StatsError::shape(
            "positions/samples",
            positions.len(),
            values.len(),
        ));
    }

    // Group in first-seen order; -0.0 and 0.0 share a key
    let mut order: Vec<(f64, Vec<f64>)> = Vec::new();
    let mut index: HashMap<u64, usize> = HashMap::new();
    for (&pos, &value) in positions.iter().zip(values) {
        if pos.is_nan() {
            return Err(StatsError::invalid("position is NaN"));
        }
        let key = (if pos == 0.0 { 0.0f64 } else { pos }).to_bits();
        let slot = *index.entry(key).or_insert_with(|| {
            order.push((pos, Vec::new()));
            order.len() - 1
        });
        order[slot].1.push(value);
    }

    order
        .iter()
        .map(|(pos, group)| compute_box(group, inner_pct, outer_pct).map(|b| b.at(*pos)))
        .collect()
}

fn column_boxes(
    positions: &[f64],
    matrix: ArrayView2<'_, f64>,
    inner_pct: f64,
    outer_pct: f64,
) -> StatsResult<Vec<QuantileBox>> {
    if matrix.ncols() != positions.len() {
        return Err(StatsError::shape(
            "positions/sample columns",
            positions.len(),
            matrix.ncols(),
        ));
    }

    positions
        .iter()
        .zip(matrix.columns())
        .map(|(&pos, column)| compute_box(column.iter(), inner_pct, outer_pct).map(|b| b.at(pos)))
        .collect()
}
