//! Size parsing and formatting utilities.
//!
//! This module converts between compact magnitude strings (like "512", "10M"
//! or "1.5K") and raw byte counts. Units are binary and single-letter:
//! `B` (1), `K` (1024), `M` (1024²) and `G` (1024³).

use anyhow::{Result, anyhow, bail};

/// Unit letters in escalation order, paired with their multipliers.
const UNITS: [(char, u64); 4] = [
    ('B', 1),
    ('K', 1_024),
    ('M', 1_048_576),
    ('G', 1_073_741_824),
];

/// Parse a magnitude string into bytes.
///
/// The accepted form is `<number>[unit]` where `unit` is one of `B`, `K`, `M`
/// or `G` (case-sensitive). A missing unit means bytes, so `"100"` and
/// `"100B"` are equivalent. The number may carry a fractional part
/// (`"1.5K"`), which makes the output of [`format_size`] parseable again.
///
/// # Arguments
///
/// * `size_str` - A string representing the size (e.g., "512", "10M", "2G")
///
/// # Returns
///
/// - `Ok(u64)` - The size in bytes
/// - `Err(anyhow::Error)` - If the string is malformed or the value overflows
///
/// # Errors
///
/// This function will return an error if:
/// - The unit character is not one of `B`, `K`, `M`, `G`
/// - There is no number before the unit, or more than one unit character
/// - The number is malformed (e.g., "1.2.3K") or has more than 9 fractional digits
/// - The resulting value would overflow `u64`
///
/// # Examples
///
/// ```
/// # use dirlist::utils::parse_size;
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// assert_eq!(parse_size("100")?, 100);
/// assert_eq!(parse_size("10M")?, 10_485_760);
/// assert_eq!(parse_size("1.5K")?, 1_536);
/// # Ok(())
/// # }
/// ```
pub fn parse_size(size_str: &str) -> Result<u64> {
    let (number_str, multiplier) = parse_size_unit(size_str)?;

    if number_str.contains('.') {
        parse_decimal_size(number_str, multiplier)
    } else {
        parse_integer_size(number_str, multiplier)
    }
}

/// Format a byte count using the largest unit that keeps the value below 1024.
///
/// The value is printed with exactly one fractional digit followed by the unit
/// letter. Escalation stops at `G`, so very large values keep growing in `G`.
///
/// # Examples
///
/// ```
/// # use dirlist::utils::format_size;
/// assert_eq!(format_size(0), "0.0B");
/// assert_eq!(format_size(1536), "1.5K");
/// assert_eq!(format_size(1_073_741_824), "1.0G");
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;

    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{value:.1}{}", UNITS[unit].0)
}

/// Split off the unit suffix and return the numeric part with its multiplier.
fn parse_size_unit(size_str: &str) -> Result<(&str, u64)> {
    let split = size_str
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(size_str.len());
    let (number_str, suffix) = size_str.split_at(split);

    if number_str.is_empty() {
        bail!("Missing number in size: {size_str:?}");
    }

    let mut chars = suffix.chars();
    let multiplier = match chars.next() {
        None => 1,
        Some(unit) => unit_multiplier(unit)
            .ok_or_else(|| anyhow!("Invalid size unit: {unit} (must be B, K, M, or G)"))?,
    };

    if !chars.as_str().is_empty() {
        bail!("Unexpected characters after size unit: {size_str}");
    }

    Ok((number_str, multiplier))
}

/// Look up the multiplier for a unit letter.
fn unit_multiplier(unit: char) -> Option<u64> {
    UNITS
        .iter()
        .find(|(letter, _)| *letter == unit)
        .map(|(_, multiplier)| *multiplier)
}

/// Parse a decimal size value (e.g., "1.5").
fn parse_decimal_size(number_str: &str, multiplier: u64) -> Result<u64> {
    let parts: Vec<&str> = number_str.split('.').collect();
    if parts.len() != 2 {
        return Err(anyhow!("Invalid decimal format: {number_str}"));
    }

    let integer_part: u64 = if parts[0].is_empty() {
        0
    } else {
        parts[0].parse()?
    };
    let fractional_result = parse_fractional_part(parts[1])?;

    let integer_bytes = multiply_with_overflow_check(integer_part, multiplier)?;
    let fractional_bytes =
        multiply_with_overflow_check(fractional_result, multiplier)? / 1_000_000_000;

    add_with_overflow_check(integer_bytes, fractional_bytes)
}

/// Parse the fractional part of a decimal number, scaled to nanounits.
fn parse_fractional_part(fractional_str: &str) -> Result<u64> {
    let fractional_digits = fractional_str.len();
    if fractional_digits > 9 {
        return Err(anyhow!("Too many decimal places: {fractional_str}"));
    }

    let fractional_part: u64 = fractional_str.parse()?;
    let fractional_multiplier = 10u64.pow(9 - u32::try_from(fractional_digits)?);

    Ok(fractional_part * fractional_multiplier)
}

/// Parse an integer size value.
fn parse_integer_size(number_str: &str, multiplier: u64) -> Result<u64> {
    let number: u64 = number_str.parse()?;
    multiply_with_overflow_check(number, multiplier)
}

/// Multiply two values with overflow checking.
fn multiply_with_overflow_check(a: u64, b: u64) -> Result<u64> {
    a.checked_mul(b)
        .ok_or_else(|| anyhow!("Size value overflow: {a} * {b}"))
}

/// Add two values with overflow checking.
fn add_with_overflow_check(a: u64, b: u64) -> Result<u64> {
    a.checked_add(b)
        .ok_or_else(|| anyhow!("Final overflow: {a} + {b}"))
}
