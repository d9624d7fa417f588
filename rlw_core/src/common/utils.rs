use crate::common::exception::{ErrCode, RlwError};

/// Ranges at or below this width are treated as flat
pub const MIN_RANGE: f64 = 1e-7;

/// Check if a high/low range is too narrow to divide by.
/// NaN widths count as flat.
pub fn is_flat_range(highest: f64, lowest: f64) -> bool {
    !(highest - lowest > MIN_RANGE)
}

/// Parse a price field, rejecting empty and non-numeric text
pub fn parse_price(field: &str, s: &str) -> Result<f64, RlwError> {
    s.trim().parse::<f64>().map_err(|e| {
        RlwError::new(
            format!("{}='{}' is not a number: {}", field, s, e),
            ErrCode::SrcDataFormatError,
        )
    })
}
