//! CLI argument validators.

use crate::constants::precision;

/// Parse and validate a precision value.
pub fn parse_precision(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number of digits"))?;

    if !(precision::MIN..=precision::MAX).contains(&value) {
        return Err(format!(
            "precision must be between {} and {}, got {value}",
            precision::MIN,
            precision::MAX
        ));
    }

    Ok(value)
}

/// Parse and validate a timeout in whole seconds (at least 1).
pub fn parse_timeout(s: &str) -> Result<u64, String> {
    let value: u64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number of seconds"))?;

    if value == 0 {
        return Err("timeout must be at least 1 second".to_string());
    }

    Ok(value)
}
