//! Conversion between decimal amounts and base units

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitsError {
    #[error("Amount is not a finite non-negative number")]
    NotFinite,
    #[error("Amount has more than {0} decimal places")]
    TooManyDecimals(u8),
    #[error("Amount is too large")]
    Overflow,
    #[error("Malformed amount: {0}")]
    Malformed(String),
}

/// Convert a decimal amount into base units with `decimals` fractional digits.
///
/// The amount is rendered with its shortest round-trip representation first,
/// so `0.1` converts to exactly `100000000000000000` at 18 decimals.
pub fn parse_units(amount: f64, decimals: u8) -> Result<u128, UnitsError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(UnitsError::NotFinite);
    }
    parse_decimal_str(&amount.to_string(), decimals)
}

/// Like [`parse_units`], but digits beyond `decimals` are truncated instead of
/// rejected. For derived amounts such as an even share of a total.
pub fn parse_units_floor(amount: f64, decimals: u8) -> Result<u128, UnitsError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(UnitsError::NotFinite);
    }
    let rendered = amount.to_string();
    let truncated = match rendered.split_once('.') {
        Some((whole, frac)) if frac.len() > decimals as usize => {
            format!("{}.{}", whole, &frac[..decimals as usize])
        }
        _ => rendered,
    };
    parse_decimal_str(&truncated, decimals)
}

/// Parse a plain decimal string (`"12"`, `"0.25"`) into base units
pub fn parse_decimal_str(value: &str, decimals: u8) -> Result<u128, UnitsError> {
    let (whole, frac) = match value.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (value, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(UnitsError::Malformed(value.to_string()));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(UnitsError::Malformed(value.to_string()));
    }

    let frac = frac.trim_end_matches('0');
    if frac.len() > decimals as usize {
        return Err(UnitsError::TooManyDecimals(decimals));
    }

    let scale = 10u128
        .checked_pow(decimals as u32)
        .ok_or(UnitsError::Overflow)?;

    let whole_units = if whole.is_empty() {
        0
    } else {
        whole.parse::<u128>().map_err(|_| UnitsError::Overflow)?
    };

    let frac_units = if frac.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac, width = decimals as usize);
        padded.parse::<u128>().map_err(|_| UnitsError::Overflow)?
    };

    whole_units
        .checked_mul(scale)
        .and_then(|units| units.checked_add(frac_units))
        .ok_or(UnitsError::Overflow)
}

/// Render a base-unit quantity as a JSON-RPC hex quantity
pub fn to_hex_quantity(value: u128) -> String {
    format!("0x{:x}", value)
}

/// Parse a JSON-RPC hex quantity (`"0x1f90"`)
pub fn from_hex_quantity(value: &str) -> Option<u128> {
    let digits = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X"))?;
    if digits.is_empty() {
        return Some(0);
    }
    u128::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ETHER: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_units(1.0, 18), Ok(ETHER));
        assert_eq!(parse_units(1.5, 18), Ok(ETHER + ETHER / 2));
        assert_eq!(parse_units(0.1, 18), Ok(100_000_000_000_000_000));
        assert_eq!(parse_units(0.0000001, 18), Ok(100_000_000_000));
    }

    #[test]
    fn test_parse_units_rejects_bad_values() {
        assert_eq!(parse_units(-1.0, 18), Err(UnitsError::NotFinite));
        assert_eq!(parse_units(f64::NAN, 18), Err(UnitsError::NotFinite));
        assert_eq!(parse_decimal_str("0.123", 2), Err(UnitsError::TooManyDecimals(2)));
        assert!(matches!(parse_decimal_str("1.2.3", 18), Err(UnitsError::Malformed(_))));
        assert!(matches!(parse_decimal_str(".", 18), Err(UnitsError::Malformed(_))));
    }

    #[test]
    fn test_parse_units_floor_truncates() {
        assert_eq!(parse_units_floor(0.01 / 3.0, 18), Ok(3_333_333_333_333_333));
        assert_eq!(parse_units_floor(1.5, 18), Ok(ETHER + ETHER / 2));
        assert_eq!(parse_units_floor(0.129, 2), Ok(12));
        assert_eq!(parse_units_floor(0.001, 2), Ok(0));
        assert_eq!(parse_units_floor(-0.5, 18), Err(UnitsError::NotFinite));
    }

    #[test]
    fn test_hex_quantity() {
        assert_eq!(to_hex_quantity(21000), "0x5208");
        assert_eq!(from_hex_quantity("0x1f90"), Some(8080));
        assert_eq!(from_hex_quantity("0x"), Some(0));
        assert_eq!(from_hex_quantity("1f90"), None);
    }
}
