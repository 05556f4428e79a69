//! Configuration for bizplots-core
//!
//! Default percentiles, stroke scales, sampling and figure settings for
//! the three plot kinds.

use serde::{Deserialize, Serialize};

use bizplots_stats::SampleRequest;

use crate::error::{ConfigError, ConfigResult};
use crate::format::CurrencyFormat;
use crate::group::StrokeScale;
use crate::types::Orientation;

/// Plot-wide configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Quantile box settings
    pub quantiles: QuantileConfig,
    /// Spaghetti settings
    pub spaghetti: SpaghettiConfig,
    /// Ribbon settings
    pub ribbons: RibbonConfig,
    /// Y-axis currency labels
    pub currency: CurrencyFormat,
    /// Output figure
    pub figure: FigureConfig,
}

/// Quantile box configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantileConfig {
    /// Percentile width of the thick inner line
    pub pct_inner: f64,
    /// Percentile width of the thin outer line
    pub pct_outer: f64,
    pub orientation: Orientation,
    /// Base line width, scaled per role by `stroke`
    pub line_width: f64,
    pub stroke: StrokeScale,
}

impl Default for QuantileConfig {
    fn default() -> Self {
        Self {
            pct_inner: 50.0,
            pct_outer: 95.0,
            orientation: Orientation::Vertical,
            line_width: 1.5,
            stroke: StrokeScale::default(),
        }
    }
}

/// Spaghetti configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpaghettiConfig {
    /// Rows drawn when the caller does not pass their own request
    pub samples: SampleRequest,
    /// Fixed seed for reproducible draws, at most `i64::MAX` so it
    /// survives a TOML round trip
    pub seed: Option<u64>,
    pub alpha: f64,
    pub line_width: f64,
}

impl Default for SpaghettiConfig {
    fn default() -> Self {
        Self {
            samples: SampleRequest::default(),
            seed: None,
            alpha: 0.5,
            line_width: 1.0,
        }
    }
}

/// Ribbon configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RibbonConfig {
    pub num_ribbons: usize,
    /// Lower percentile of the outermost ribbon
    pub percentile_min: f64,
    /// Upper percentile of the outermost ribbon
    pub percentile_max: f64,
    /// Opacity of each ribbon; overlaps darken toward the median
    pub alpha: f64,
}

impl Default for RibbonConfig {
    fn default() -> Self {
        Self {
            num_ribbons: 3,
            percentile_min: 5.0,
            percentile_max: 95.0,
            alpha: 0.3,
        }
    }
}

/// SVG figure configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Margin around the plot area in pixels
    pub margin: u32,
    /// Legend icon width in pixels
    pub icon_width: f64,
    /// Legend icon height in pixels
    pub icon_height: f64,
    /// Number of labelled y ticks
    pub y_ticks: usize,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 500,
            margin: 60,
            icon_width: 28.0,
            icon_height: 14.0,
            y_ticks: 5,
        }
    }
}

impl PlotConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> ConfigResult<Self> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> ConfigResult<Self> {
        serde_json::from_str(json_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        self.quantiles.validate()?;
        self.spaghetti.validate()?;
        self.ribbons.validate()?;
        self.figure.validate()
    }
}

impl QuantileConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        for (name, pct) in [("pct_inner", self.pct_inner), ("pct_outer", self.pct_outer)] {
            if !(0.0..=100.0).contains(&pct) {
                return Err(ConfigError::OutOfRange(format!(
                    "{name} must be between 0 and 100, got {pct}"
                )));
            }
        }

        if self.pct_inner > self.pct_outer {
            return Err(ConfigError::Inconsistent(format!(
                "pct_inner ({}) must not exceed pct_outer ({})",
                self.pct_inner, self.pct_outer
            )));
        }

        if self.line_width <= 0.0 {
            return Err(ConfigError::OutOfRange(
                "line_width must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

impl SpaghettiConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        validate_alpha("spaghetti.alpha", self.alpha)?;
        if self.line_width <= 0.0 {
            return Err(ConfigError::OutOfRange(
                "spaghetti.line_width must be positive".to_string(),
            ));
        }
        if let Some(seed) = self.seed {
            if seed > i64::MAX as u64 {
                return Err(ConfigError::OutOfRange(format!(
                    "spaghetti.seed must not exceed {}, got {seed}",
                    i64::MAX
                )));
            }
        }
        Ok(())
    }
}

impl RibbonConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.num_ribbons == 0 {
            return Err(ConfigError::OutOfRange(
                "num_ribbons must be at least 1".to_string(),
            ));
        }

        if !(0.0..50.0).contains(&self.percentile_min) {
            return Err(ConfigError::OutOfRange(format!(
                "percentile_min must lie in [0, 50), got {}",
                self.percentile_min
            )));
        }

        if !(self.percentile_max > 50.0 && self.percentile_max <= 100.0) {
            return Err(ConfigError::OutOfRange(format!(
                "percentile_max must lie in (50, 100], got {}",
                self.percentile_max
            )));
        }

        validate_alpha("ribbons.alpha", self.alpha)
    }
}

impl FigureConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.width <= 2 * self.margin || self.height <= 2 * self.margin {
            return Err(ConfigError::Inconsistent(format!(
                "figure {}x{} leaves no plot area inside margin {}",
                self.width, self.height, self.margin
            )));
        }

        if self.icon_width <= 0.0 || self.icon_height <= 0.0 {
            return Err(ConfigError::OutOfRange(
                "legend icon size must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

fn validate_alpha(name: &str, alpha: f64) -> ConfigResult<()> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(ConfigError::OutOfRange(format!(
            "{name} must be between 0.0 and 1.0, got {alpha}"
        )));
    }
    Ok(())
}
