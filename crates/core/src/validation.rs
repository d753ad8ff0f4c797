//! Input validation utilities.

use crate::{CertificateError, CertificateResult};

/// Validates that a jurisdiction identifier is safe to use as a file name component.
///
/// The jurisdiction selects `officials/<jurisdiction>.yaml`, so it must not be able to
/// climb out of the reference data directory:
/// - rejects empty or whitespace-only strings
/// - bounds the length
/// - restricts characters to ASCII alphanumerics, `.`, `-` and `_`, and rejects `.`/`..`
///
/// # Errors
///
/// Returns `CertificateError::InvalidInput` if the jurisdiction is invalid.
pub fn validate_jurisdiction(jurisdiction: &str) -> CertificateResult<()> {
    const MAX_JURISDICTION_LEN: usize = 64;

    if jurisdiction.trim().is_empty() {
        return Err(CertificateError::InvalidInput(
            "jurisdiction cannot be empty".into(),
        ));
    }

    if jurisdiction.len() > MAX_JURISDICTION_LEN {
        return Err(CertificateError::InvalidInput(format!(
            "jurisdiction exceeds maximum length of {} characters",
            MAX_JURISDICTION_LEN
        )));
    }

    let ok = jurisdiction
        .bytes()
        .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'.' | b'-' | b'_'));

    if !ok || jurisdiction == "." || jurisdiction == ".." {
        return Err(CertificateError::InvalidInput(
            "jurisdiction contains invalid characters (only alphanumeric, '.', '-', '_' allowed)"
                .into(),
        ));
    }

    Ok(())
}
