//! Currency labels for axis ticks
//!
//! Values can be rescaled into thousands, millions, ... with a short
//! suffix, then printed with a currency symbol, comma thousands
//! separators and one of three sign policies.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Magnitude suffixes, one per power of 1000
pub const SUFFIXES: [&str; 6] = ["", "k", "m", "bn", "tn", "qn"];

/// Significant digits used when no decimal count is given
const GENERAL_PRECISION: usize = 6;

/// How to sign a formatted value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignPolicy {
    /// `+` for positive values, `-` for negative ones
    Always,
    /// `-` for negative values only
    NegativeOnly,
    /// `-` for negative values, a blank for positive ones
    #[default]
    SpaceForPositive,
}

impl SignPolicy {
    pub fn as_char(&self) -> char {
        match self {
            SignPolicy::Always => '+',
            SignPolicy::NegativeOnly => '-',
            SignPolicy::SpaceForPositive => ' ',
        }
    }

    fn prefix(&self, negative: bool) -> &'static str {
        match (self, negative) {
            (_, true) => "-",
            (SignPolicy::Always, false) => "+",
            (SignPolicy::NegativeOnly, false) => "",
            (SignPolicy::SpaceForPositive, false) => " ",
        }
    }
}

impl TryFrom<char> for SignPolicy {
    type Error = ConfigError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '+' => Ok(SignPolicy::Always),
            '-' => Ok(SignPolicy::NegativeOnly),
            ' ' => Ok(SignPolicy::SpaceForPositive),
            other => Err(ConfigError::OutOfRange(format!(
                "sign must be one of '+', '-', ' ', got {other:?}"
            ))),
        }
    }
}

/// Options for [`as_currency`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    /// Currency symbol
    pub symbol: char,
    /// Digits after the decimal point (None = general notation)
    pub decimals: Option<usize>,
    /// Sign policy
    pub sign: SignPolicy,
    /// Rescale into k, m, bn, tn, qn
    pub human_readable: bool,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: '$',
            decimals: Some(2),
            sign: SignPolicy::SpaceForPositive,
            human_readable: true,
        }
    }
}

impl CurrencyFormat {
    pub fn new(symbol: char) -> Self {
        Self {
            symbol,
            ..Default::default()
        }
    }

    pub fn with_decimals(mut self, decimals: Option<usize>) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn with_sign(mut self, sign: SignPolicy) -> Self {
        self.sign = sign;
        self
    }

    pub fn with_human_readable(mut self, human_readable: bool) -> Self {
        self.human_readable = human_readable;
        self
    }

    /// Format `x` with these options
    pub fn format(&self, x: f64) -> String {
        as_currency(x, self)
    }
}

/// Rescale `x` by a power of 1000 and return the matching suffix
///
/// Values below 1000 in magnitude (zero included) come back unchanged.
/// Magnitudes past the last suffix are expressed in that suffix.
pub fn human_readable(x: f64) -> (f64, &'static str) {
    let value = x.abs();
    if !value.is_finite() || value < 1000.0 {
        return (x, "");
    }

    let mut class = 0usize;
    while value >= 1000f64.powi(class as i32 + 1) {
        class += 1;
    }
    let last = SUFFIXES.len() - 1;
    if class > last {
        tracing::warn!(value = x, "magnitude beyond '{}', clamping", SUFFIXES[last]);
    }
    let class = class.min(last);
    (x / 1000f64.powi(class as i32), SUFFIXES[class])
}

/// Format `x` as a currency string
///
/// ```
/// use bizplots_core::format::{as_currency, CurrencyFormat, SignPolicy};
///
/// let fmt = CurrencyFormat::default()
///     .with_decimals(Some(0))
///     .with_sign(SignPolicy::NegativeOnly)
///     .with_human_readable(false);
/// assert_eq!(as_currency(-50.0, &fmt), "-$50");
/// ```
pub fn as_currency(x: f64, format: &CurrencyFormat) -> String {
    let (value, suffix) = if format.human_readable {
        human_readable(x)
    } else {
        (x, "")
    };

    let negative = value.is_sign_negative() && !value.is_nan();
    let digits = if value.is_finite() {
        let magnitude = value.abs();
        let body = match format.decimals {
            Some(decimals) => format!("{magnitude:.decimals$}"),
            None => general(magnitude),
        };
        group_thousands(&body)
    } else if value.is_nan() {
        "nan".to_string()
    } else {
        "inf".to_string()
    };

    format!(
        "{}{}{}{}",
        format.sign.prefix(negative),
        format.symbol,
        digits,
        suffix
    )
}

/// General notation with six significant digits, trailing zeros trimmed
fn general(magnitude: f64) -> String {
    if magnitude == 0.0 {
        return "0".to_string();
    }

    let sci = format!("{:.*e}", GENERAL_PRECISION - 1, magnitude);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= GENERAL_PRECISION as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (GENERAL_PRECISION as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{magnitude:.decimals$}")).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Insert commas every three digits of the integer part
fn group_thousands(body: &str) -> String {
    let split = body.find(['.', 'e']).unwrap_or(body.len());
    let (int_part, rest) = body.split_at(split);

    let mut grouped = String::with_capacity(body.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped.push_str(rest);
    grouped
}

/// Turns a tick value into its label
pub trait TickFormatter: Send + Sync {
    fn format_tick(&self, value: f64) -> String;
}

/// Currency tick labels
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurrencyFormatter {
    pub format: CurrencyFormat,
    /// Replace ASCII hyphen-minus with U+2212
    pub unicode_minus: bool,
}

impl CurrencyFormatter {
    pub fn new(symbol: char, decimals: Option<usize>, human_readable: bool) -> Self {
        Self {
            format: CurrencyFormat::new(symbol)
                .with_decimals(decimals)
                .with_human_readable(human_readable),
            unicode_minus: true,
        }
    }
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::new('$', None, true)
    }
}

impl TickFormatter for CurrencyFormatter {
    fn format_tick(&self, value: f64) -> String {
        let label = self.format.format(value);
        if self.unicode_minus {
            label.replace('-', "\u{2212}")
        } else {
            label
        }
    }
}
