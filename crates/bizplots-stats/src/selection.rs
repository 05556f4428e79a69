//! Row selection for spaghetti plots
//!
//! Either a count of rows drawn uniformly without replacement, or an
//! explicit list of row indices passed through after bounds checking.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};

/// Which sample rows to draw
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleRequest {
    /// Draw this many distinct rows at random
    Count(usize),
    /// Use these rows, in this order (duplicates are kept)
    Indices(Vec<usize>),
}

impl Default for SampleRequest {
    fn default() -> Self {
        SampleRequest::Count(20)
    }
}

impl From<usize> for SampleRequest {
    fn from(count: usize) -> Self {
        SampleRequest::Count(count)
    }
}

impl From<Vec<usize>> for SampleRequest {
    fn from(indices: Vec<usize>) -> Self {
        SampleRequest::Indices(indices)
    }
}

/// Select rows from `0..total_rows`
///
/// With `seed` set the same seed always yields the same rows; without it
/// the generator is seeded from OS entropy.
pub fn select_sample_rows(
    total_rows: usize,
    request: &SampleRequest,
    seed: Option<u64>,
) -> StatsResult<Vec<usize>> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    select_sample_rows_with(&mut rng, total_rows, request)
}

/// Select rows drawing from a caller-supplied generator
pub fn select_sample_rows_with<R: Rng + ?Sized>(
    rng: &mut R,
    total_rows: usize,
    request: &SampleRequest,
) -> StatsResult<Vec<usize>> {
    match request {
        SampleRequest::Count(count) => {
            if *count > total_rows {
                return Err(StatsError::invalid(format!(
                    "cannot draw {count} rows without replacement from {total_rows}"
                )));
            }
            let rows = rand::seq::index::sample(rng, total_rows, *count).into_vec();
            tracing::debug!(count, total_rows, "drew sample rows");
            Ok(rows)
        }
        SampleRequest::Indices(indices) => {
            if let Some(&index) = indices.iter().find(|&&i| i >= total_rows) {
                return Err(StatsError::OutOfBounds {
                    index,
                    len: total_rows,
                });
            }
            Ok(indices.clone())
        }
    }
}
