use crate::error::ValidationError;

/// Reads a whole number out of a form input the way browsers' `parseInt`
/// does: leading whitespace, an optional sign, then as many digits as there
/// are. Trailing junk after the digits is ignored.
pub fn parse_int(field: &'static str, raw: &str) -> Result<i32, ValidationError> {
    let invalid = || ValidationError::InvalidNumber {
        field,
        value: raw.to_string(),
    };

    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return Err(invalid());
    }

    let value: i64 = digits.parse().map_err(|_| invalid())?;
    let value = if negative { -value } else { value };
    i32::try_from(value).map_err(|_| invalid())
}

pub fn parse_optional_int(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<i32>, ValidationError> {
    raw.map(|raw| parse_int(field, raw)).transpose()
}

/// Case-insensitive substring match used by the list search boxes.
pub fn matches_search(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(&term.to_lowercase())
}
