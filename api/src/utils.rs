use crate::{
    consts::{DISPLAY_PLACES, MAX_DECIMALS, TOKEN_DECIMALS},
    error::AmountError,
};

/// Checks whether `raw` has the shape of an amount while it is being typed:
/// ASCII digits with at most one decimal point.
///
/// The empty string and a lone `"."` pass, since both are valid intermediate
/// states of an input field. Signs, exponents, separators and whitespace do not.
pub fn is_amount_shape(raw: &str) -> bool {
    let mut seen_point = false;
    raw.chars().all(|c| match c {
        '0'..='9' => true,
        '.' if !seen_point => {
            seen_point = true;
            true
        }
        _ => false,
    })
}

/// Converts a human decimal string into base units with `decimals` fractional digits.
///
/// Conversion is exact. More fractional digits than the asset supports is an
/// error rather than a rounding.
pub fn to_base_units(raw: &str, decimals: u8) -> Result<u128, AmountError> {
    if raw.is_empty() {
        return Err(AmountError::Empty);
    }
    if raw == "." || !is_amount_shape(raw) {
        return Err(AmountError::Malformed(raw.to_string()));
    }
    let (whole, fraction) = raw.split_once('.').unwrap_or((raw, ""));
    if fraction.len() > decimals as usize {
        return Err(AmountError::TooManyDecimals { max: decimals });
    }

    let whole_units = parse_digits(whole)?
        .checked_mul(pow10(decimals)?)
        .ok_or(AmountError::Overflow)?;
    let fraction_units = parse_digits(fraction)?
        .checked_mul(pow10(decimals - fraction.len() as u8)?)
        .ok_or(AmountError::Overflow)?;
    whole_units
        .checked_add(fraction_units)
        .ok_or(AmountError::Overflow)
}

/// Converts base units back into the canonical decimal string.
///
/// Lossless: no trailing fractional zeros, no trailing point, `"0"` for zero.
pub fn to_decimal_string(value: u128, decimals: u8) -> String {
    let decimals = decimals as usize;
    let digits = value.to_string();
    if decimals == 0 {
        return digits;
    }
    let padded = format!("{:0>width$}", digits, width = decimals + 1);
    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    }
}

/// Renders base units with exactly `places` fractional digits, rounding half up.
///
/// All arithmetic stays on the integer, so large balances never pick up float noise.
pub fn format_display(value: u128, decimals: u8, places: u8) -> String {
    let places = places.min(MAX_DECIMALS);
    let rounded = if places < decimals {
        match 10u128.checked_pow((decimals - places) as u32) {
            Some(divisor) => {
                let quotient = value / divisor;
                if value % divisor >= divisor / 2 {
                    quotient + 1
                } else {
                    quotient
                }
            }
            // Every u128 is below half of 10^39.
            None => 0,
        }
    } else {
        value
    };

    let fraction_digits = places.min(decimals) as usize;
    let digits = format!("{:0>width$}", rounded, width = fraction_digits + 1);
    let (whole, fraction) = digits.split_at(digits.len() - fraction_digits);
    if places == 0 {
        return whole.to_string();
    }
    format!("{whole}.{fraction:0<width$}", width = places as usize)
}

/// Renders a native-asset or reward amount the way every view shows balances.
pub fn display_amount(value: u128) -> String {
    format_display(value, TOKEN_DECIMALS, DISPLAY_PLACES)
}

/// Parses an amount that must be strictly positive.
pub fn parse_positive(raw: &str) -> Result<u128, AmountError> {
    match to_base_units(raw, TOKEN_DECIMALS)? {
        0 => Err(AmountError::NotPositive),
        units => Ok(units),
    }
}

/// True iff `raw` parses and is strictly greater than zero.
pub fn is_positive_amount(raw: &str) -> bool {
    parse_positive(raw).is_ok()
}

/// True iff `raw` parses and does not exceed `available` base units.
///
/// Only a convenience check against the last polled figure. The contract
/// validates again on submission.
pub fn is_within_balance(raw: &str, available: u128) -> bool {
    to_base_units(raw, TOKEN_DECIMALS).is_ok_and(|units| units <= available)
}

fn parse_digits(digits: &str) -> Result<u128, AmountError> {
    if digits.is_empty() {
        return Ok(0);
    }
    digits.parse::<u128>().map_err(|_| AmountError::Overflow)
}

fn pow10(exp: u8) -> Result<u128, AmountError> {
    10u128
        .checked_pow(exp as u32)
        .ok_or(AmountError::Overflow)
}
