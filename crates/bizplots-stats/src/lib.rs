//! bizplots-stats - Summary statistics behind bizplots
//!
//! This crate turns raw samples into the numbers a summary plot needs:
//!
//! - **Percentiles**: linear interpolation between closest ranks
//! - **Quantile boxes**: outer band, inner band and median per position
//! - **Ribbons**: nested percentile curves across a shared x domain
//! - **Row selection**: seeded draws of sample rows for spaghetti plots
//!
//! Everything here is a pure function of its inputs. Randomness only
//! enters through an explicit seed or generator handle.

pub mod error;
pub mod percentile;
pub mod quantile_box;
pub mod ribbons;
pub mod selection;

pub use error::{StatsError, StatsResult};
pub use percentile::*;
pub use quantile_box::*;
pub use ribbons::*;
pub use selection::*;
