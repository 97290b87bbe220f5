//! Environment variable helpers

use std::str::FromStr;

/// Read an environment variable, falling back to `default` when unset or blank.
pub fn env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => default.to_string(),
    }
}

/// Read and parse an environment variable.
///
/// Returns `Ok(None)` when the variable is unset or blank, and `Err` carrying
/// the raw value when it cannot be parsed.
pub fn env_parse<T: FromStr>(key: &str) -> Result<Option<T>, String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => {
            value.trim().parse().map(Some).map_err(|_| value)
        }
        _ => Ok(None),
    }
}
