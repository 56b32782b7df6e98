//! Measurement units and tolerant number parsing.
//!
//! Lengths are twips (1/20 point). Proportional widths are fiftieths of a
//! percent, so 5000 is the full writable width.

use crate::error::{DocfillError, DocfillResult};

/// Proportional units for 100%.
pub const PCT_FULL: u32 = 5000;
/// Proportional units per percent.
pub const PCT_PER_PERCENT: f64 = 50.0;
/// Twips per centimetre.
pub const TWIPS_PER_CM: f64 = 566.9291338582677;

/// Centimetres to twips, rounded to the nearest twip.
pub fn cm_to_twips(cm: f64) -> u32 {
    (cm * TWIPS_PER_CM).round().max(0.0) as u32
}

/// Percentage of the writable width to proportional units.
pub fn percent_to_pct(percent: f64) -> u32 {
    (percent * PCT_PER_PERCENT).round().max(0.0) as u32
}

/// Absolute length to proportional units relative to `page_width` twips.
pub fn twips_to_pct(twips: u32, page_width: u32) -> u32 {
    if page_width == 0 {
        return PCT_FULL;
    }
    (f64::from(twips) / f64::from(page_width) * f64::from(PCT_FULL)).round() as u32
}

/// Points to the half-point unit used for font sizes.
pub fn points_to_half_points(points: f32) -> u32 {
    (points * 2.0).round().max(0.0) as u32
}

/// Split a literal into its leading numeric token and the remainder.
///
/// Tolerates surrounding whitespace, a leading sign and a comma as the
/// decimal separator: `" 2,5 cm"` gives `(2.5, "cm")`.
pub fn split_number(literal: &str) -> DocfillResult<(f64, &str)> {
    let s = literal.trim();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - digits_start;
    if end < bytes.len() && matches!(bytes[end], b'.' | b',') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if digits == 0 {
        return Err(DocfillError::format(format!("no number in {literal:?}")));
    }
    let value = s[..end]
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|e| DocfillError::format(format!("{literal:?}: {e}")))?;
    Ok((value, s[end..].trim()))
}
