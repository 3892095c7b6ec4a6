//! Extraction of the predicted price range from completion text.
//!
//! The prompt asks for a line of the form `Price Prediction: $X to $Y`. The
//! first line containing the marker is examined; an explicit `$X to $Y` pair
//! wins, otherwise the line must hold exactly two dollar amounts. Amounts with
//! a letter suffix (`$60K`, `$1.2M`) are rejected rather than truncated.

use regex::Regex;
use std::sync::OnceLock;

pub const PRICE_MARKER: &str = "Price Prediction";

/// Dollar amount plus any trailing letters, which must be empty.
const AMOUNT: &str = r"\$\s*(\d[\d,]*(?:\.\d+)?)([A-Za-z]*)";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RangeParseError {
    #[error("no line containing \"Price Prediction\"")]
    MarkerNotFound,

    #[error("expected two dollar amounts, found {0}")]
    TooFewAmounts(usize),

    #[error("ambiguous price line with {0} dollar amounts")]
    TooManyAmounts(usize),

    #[error("invalid dollar amount: {0}")]
    InvalidAmount(String),
}

fn pair_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"(?i){AMOUNT}\s*(?:to|-|–)\s*{AMOUNT}"))
            .expect("valid price pair regex")
    })
}

fn amount_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(AMOUNT).expect("valid amount regex"))
}

fn parse_amount(raw: &str, suffix: &str) -> Result<f64, RangeParseError> {
    if !suffix.is_empty() {
        return Err(RangeParseError::InvalidAmount(format!("{raw}{suffix}")));
    }

    let value = raw
        .replace(',', "")
        .parse::<f64>()
        .map_err(|_| RangeParseError::InvalidAmount(raw.to_string()))?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(RangeParseError::InvalidAmount(raw.to_string()))
    }
}

/// First line of `text` carrying the price marker.
pub fn find_price_line(text: &str) -> Option<&str> {
    text.lines().find(|line| line.contains(PRICE_MARKER))
}

/// Parse `(min, max)` from the price line of `text`.
pub fn parse_price_range(text: &str) -> Result<(f64, f64), RangeParseError> {
    let line = find_price_line(text).ok_or(RangeParseError::MarkerNotFound)?;

    let (low, high) = if let Some(cap) = pair_regex().captures(line) {
        (parse_amount(&cap[1], &cap[2])?, parse_amount(&cap[3], &cap[4])?)
    } else {
        let amounts = amount_regex()
            .captures_iter(line)
            .map(|cap| parse_amount(&cap[1], &cap[2]))
            .collect::<Result<Vec<_>, _>>()?;

        match amounts.as_slice() {
            [low, high] => (*low, *high),
            found if found.len() < 2 => return Err(RangeParseError::TooFewAmounts(found.len())),
            found => return Err(RangeParseError::TooManyAmounts(found.len())),
        }
    };

    Ok((low.min(high), low.max(high)))
}
