use crate::error::FormatError;

/// Largest code length a 31-bit truncated value can fill.
pub const MAX_DIGITS: u32 = 9;

/// Reduces `value` modulo `10^digits` and renders it zero-padded to exactly
/// `digits` characters.
pub fn format_code(value: u32, digits: u32) -> Result<String, FormatError> {
    if !(1..=MAX_DIGITS).contains(&digits) {
        return Err(FormatError::InvalidDigits(digits));
    }
    let code = value % 10u32.pow(digits);
    Ok(format!("{:0width$}", code, width = digits as usize))
}
