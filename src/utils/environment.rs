use std::env;

use anyhow::{Context, Result, bail};
use encoding_rs::{Encoding, UTF_8};

/// Environment variable naming the default text encoding label (e.g. `shift_jis`)
pub const ENCODING_ENV_VAR: &str = "CSV_RECORDS_ENCODING";

/// Environment variable overriding the maximum CSV file size in bytes
pub const MAX_BYTES_ENV_VAR: &str = "CSV_RECORDS_MAX_BYTES";

// Default maximum file size: 64MB
pub const DEFAULT_MAX_FILE_BYTES: u64 = 64 * 1024 * 1024;

/// Resolve a WHATWG encoding label such as `utf-8`, `latin1` or `shift_jis`
pub fn encoding_from_label(label: &str) -> Result<&'static Encoding> {
    match Encoding::for_label(label.trim().as_bytes()) {
        Some(encoding) => Ok(encoding),
        None => bail!("Unknown text encoding: {}", label),
    }
}

/// Pick the encoding to read with: an explicit label wins, then
/// `CSV_RECORDS_ENCODING`, then UTF-8
pub fn resolve_encoding(explicit: Option<&str>) -> Result<&'static Encoding> {
    resolve_encoding_internal(explicit, env::var(ENCODING_ENV_VAR).ok().as_deref())
}

pub(crate) fn resolve_encoding_internal(
    explicit: Option<&str>,
    from_env: Option<&str>,
) -> Result<&'static Encoding> {
    match explicit.or(from_env) {
        Some(label) => encoding_from_label(label),
        None => Ok(UTF_8),
    }
}

/// Maximum CSV file size, from `CSV_RECORDS_MAX_BYTES` or the 64MB default
pub fn max_file_bytes() -> Result<u64> {
    max_file_bytes_internal(env::var(MAX_BYTES_ENV_VAR).ok().as_deref())
}

pub(crate) fn max_file_bytes_internal(from_env: Option<&str>) -> Result<u64> {
    match from_env {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} must be a byte count, got '{}'", MAX_BYTES_ENV_VAR, value)),
        None => Ok(DEFAULT_MAX_FILE_BYTES),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_from_label() {
        assert_eq!(encoding_from_label("utf-8").unwrap(), UTF_8);
        assert_eq!(encoding_from_label(" Shift_JIS ").unwrap(), encoding_rs::SHIFT_JIS);
        assert_eq!(encoding_from_label("latin1").unwrap(), encoding_rs::WINDOWS_1252);
    }

    #[test]
    fn test_unknown_encoding_label() {
        let err = encoding_from_label("klingon").unwrap_err();
        assert!(err.to_string().contains("Unknown text encoding: klingon"));
    }

    #[test]
    fn test_explicit_encoding_wins_over_env() {
        let encoding = resolve_encoding_internal(Some("utf-16le"), Some("shift_jis")).unwrap();
        assert_eq!(encoding, encoding_rs::UTF_16LE);
    }

    #[test]
    fn test_env_encoding_used_when_no_explicit() {
        let encoding = resolve_encoding_internal(None, Some("shift_jis")).unwrap();
        assert_eq!(encoding, encoding_rs::SHIFT_JIS);
        assert_eq!(resolve_encoding_internal(None, None).unwrap(), UTF_8);
    }

    #[test]
    fn test_max_file_bytes() {
        assert_eq!(max_file_bytes_internal(None).unwrap(), DEFAULT_MAX_FILE_BYTES);
        assert_eq!(max_file_bytes_internal(Some("1024")).unwrap(), 1024);

        let err = max_file_bytes_internal(Some("lots")).unwrap_err();
        assert!(err.to_string().contains(MAX_BYTES_ENV_VAR));
    }
}
