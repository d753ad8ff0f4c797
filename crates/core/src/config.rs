//! Reference data configuration.
//!
//! Configuration is resolved once at process startup and then passed into services, so
//! nothing reads process-wide environment variables while composing.

use crate::constants::{
    CERTIFICATE_TYPES_FILENAME, DEFAULT_REFERENCE_DATA_DIR, OFFICIALS_DIR_NAME,
    REFERENCE_FILE_EXTENSION,
};
use crate::validation::validate_jurisdiction;
use crate::{CertificateError, CertificateResult};
use std::path::{Path, PathBuf};

/// Reference data configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct ReferenceConfig {
    reference_data_dir: PathBuf,
    jurisdiction: String,
}

impl ReferenceConfig {
    /// Create a new `ReferenceConfig`.
    ///
    /// # Errors
    ///
    /// Returns `CertificateError::InvalidInput` if the jurisdiction is not a safe file name.
    pub fn new(reference_data_dir: PathBuf, jurisdiction: String) -> CertificateResult<Self> {
        validate_jurisdiction(&jurisdiction)?;

        Ok(Self {
            reference_data_dir,
            jurisdiction,
        })
    }

    pub fn reference_data_dir(&self) -> &Path {
        &self.reference_data_dir
    }

    pub fn jurisdiction(&self) -> &str {
        &self.jurisdiction
    }

    pub fn certificate_types_path(&self) -> PathBuf {
        certificate_types_path(&self.reference_data_dir)
    }

    pub fn officials_path(&self) -> PathBuf {
        officials_path(&self.reference_data_dir, &self.jurisdiction)
    }
}

pub(crate) fn certificate_types_path(dir: &Path) -> PathBuf {
    dir.join(CERTIFICATE_TYPES_FILENAME)
}

pub(crate) fn officials_path(dir: &Path, jurisdiction: &str) -> PathBuf {
    dir.join(OFFICIALS_DIR_NAME)
        .join(format!("{jurisdiction}.{REFERENCE_FILE_EXTENSION}"))
}

/// Resolve the reference data directory without reading environment variables.
///
/// If `override_dir` is provided it must contain `certificate_types.yaml`. Otherwise this
/// searches for `reference_data/` relative to the current working directory and then walks
/// up from `CARGO_MANIFEST_DIR`.
pub fn resolve_reference_data_dir(override_dir: Option<PathBuf>) -> CertificateResult<PathBuf> {
    fn looks_like_reference_dir(path: &Path) -> bool {
        path.is_dir() && certificate_types_path(path).is_file()
    }

    if let Some(dir) = override_dir {
        if looks_like_reference_dir(&dir) {
            return Ok(dir);
        }
        return Err(CertificateError::InvalidInput(format!(
            "reference data directory override is not valid (must contain {})",
            CERTIFICATE_TYPES_FILENAME
        )));
    }

    let cwd_relative = PathBuf::from(DEFAULT_REFERENCE_DATA_DIR);
    if looks_like_reference_dir(&cwd_relative) {
        return Ok(cwd_relative);
    }

    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    for ancestor in manifest_dir.ancestors() {
        let candidate = ancestor.join(DEFAULT_REFERENCE_DATA_DIR);
        if looks_like_reference_dir(&candidate) {
            return Ok(candidate);
        }
    }

    Err(CertificateError::InvalidInput(format!(
        "could not locate {}/ directory with {}",
        DEFAULT_REFERENCE_DATA_DIR, CERTIFICATE_TYPES_FILENAME
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn officials_path_uses_jurisdiction_file() {
        let cfg = ReferenceConfig::new(PathBuf::from("/data"), "42".into()).expect("config");
        assert_eq!(cfg.officials_path(), PathBuf::from("/data/officials/42.yaml"));
        assert_eq!(
            cfg.certificate_types_path(),
            PathBuf::from("/data/certificate_types.yaml")
        );
    }

    #[test]
    fn rejects_unsafe_jurisdiction() {
        let err = ReferenceConfig::new(PathBuf::from("/data"), "../x".into()).unwrap_err();
        assert!(matches!(err, CertificateError::InvalidInput(_)));
    }

    #[test]
    fn override_must_contain_certificate_types() {
        let tmp = TempDir::new().expect("tempdir");
        let err = resolve_reference_data_dir(Some(tmp.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, CertificateError::InvalidInput(_)));

        std::fs::write(tmp.path().join(CERTIFICATE_TYPES_FILENAME), "[]").expect("write");
        let dir = resolve_reference_data_dir(Some(tmp.path().to_path_buf())).expect("resolve");
        assert_eq!(dir, tmp.path());
    }

    #[test]
    fn finds_workspace_reference_data() {
        let dir = resolve_reference_data_dir(None).expect("workspace reference_data/");
        assert!(dir.join(CERTIFICATE_TYPES_FILENAME).is_file());
    }
}
