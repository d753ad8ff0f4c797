//! Reference data loading.
//!
//! Certificate types and the jurisdiction's officials are fetched once, concurrently, when a
//! session starts. Providers are asynchronous so that file-backed and remote sources share one
//! seam.

use crate::config::{certificate_types_path, officials_path};
use crate::validation::validate_jurisdiction;
use crate::{CertificateError, CertificateResult};
use async_trait::async_trait;
use brgy_types::{CertificateType, CertificateTypeId, Official, Resident};
use brgy_wire::{CertificateTypes, Officials, ResidentRecord};
use std::path::{Path, PathBuf};

/// A source of certificate types and officials.
#[async_trait]
pub trait ReferenceDataProvider: Send + Sync {
    async fn certificate_types(&self) -> CertificateResult<Vec<CertificateType>>;

    /// Officials for a jurisdiction, presiding official first.
    async fn officials(&self, jurisdiction: &str) -> CertificateResult<Vec<Official>>;
}

/// Reference data held by a session.
#[derive(Clone, Debug, Default)]
pub struct ReferenceData {
    pub certificate_types: Vec<CertificateType>,
    pub officials: Vec<Official>,
}

impl ReferenceData {
    /// Fetch both lists concurrently.
    ///
    /// # Errors
    ///
    /// Returns `CertificateError::ReferenceDataUnavailable` wrapping the first failure. Callers
    /// may fall back to [`ReferenceData::default`], which composes to the prompt narrative.
    pub async fn fetch(
        provider: &dyn ReferenceDataProvider,
        jurisdiction: &str,
    ) -> CertificateResult<Self> {
        let result = tokio::try_join!(
            provider.certificate_types(),
            provider.officials(jurisdiction)
        );

        match result {
            Ok((certificate_types, officials)) => {
                tracing::info!(
                    jurisdiction,
                    certificate_types = certificate_types.len(),
                    officials = officials.len(),
                    "reference data loaded"
                );
                Ok(Self {
                    certificate_types,
                    officials,
                })
            }
            Err(e) => {
                tracing::warn!(jurisdiction, error = %e, "reference data unavailable");
                Err(CertificateError::ReferenceDataUnavailable(Box::new(e)))
            }
        }
    }

    pub fn find(&self, id: &CertificateTypeId) -> Option<&CertificateType> {
        self.certificate_types.iter().find(|t| &t.id == id)
    }
}

/// Reads reference data from a directory of YAML files.
///
/// Layout:
/// - `certificate_types.yaml`
/// - `officials/<jurisdiction>.yaml`
#[derive(Clone, Debug)]
pub struct YamlDirectoryProvider {
    dir: PathBuf,
}

impl YamlDirectoryProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl ReferenceDataProvider for YamlDirectoryProvider {
    async fn certificate_types(&self) -> CertificateResult<Vec<CertificateType>> {
        let text = read_to_string(&certificate_types_path(&self.dir)).await?;
        Ok(CertificateTypes::parse(&text)?)
    }

    async fn officials(&self, jurisdiction: &str) -> CertificateResult<Vec<Official>> {
        validate_jurisdiction(jurisdiction)?;
        let text = read_to_string(&officials_path(&self.dir, jurisdiction)).await?;
        Ok(Officials::parse(&text)?)
    }
}

/// In-memory provider, the same lists for every jurisdiction.
#[derive(Clone, Debug, Default)]
pub struct StaticProvider {
    pub certificate_types: Vec<CertificateType>,
    pub officials: Vec<Official>,
}

#[async_trait]
impl ReferenceDataProvider for StaticProvider {
    async fn certificate_types(&self) -> CertificateResult<Vec<CertificateType>> {
        Ok(self.certificate_types.clone())
    }

    async fn officials(&self, _jurisdiction: &str) -> CertificateResult<Vec<Official>> {
        Ok(self.officials.clone())
    }
}

/// Load a single resident record from a YAML file.
///
/// # Errors
///
/// Returns `CertificateError::FileRead` if the file cannot be read, or
/// `CertificateError::Wire` if it is not a valid resident record.
pub async fn load_resident(path: &Path) -> CertificateResult<Resident> {
    let text = read_to_string(path).await?;
    Ok(ResidentRecord::parse(&text)?)
}

async fn read_to_string(path: &Path) -> CertificateResult<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CertificateError::FileRead {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use brgy_types::NonEmptyText;
    use tempfile::TempDir;

    const TYPES_YAML: &str = "\
- iid: 1
  iname: Barangay Clearance
  body_text: I, [BARANGAY_CAPTAIN], certify that [APPLICANT_NAME] is a resident.
- iid: \"2\"
  iname: Death Certification
  body_text: \"[DECEASED_NAME] died on [DATE_OF_DEATH].\"
";

    const OFFICIALS_YAML: &str = "\
- full_name: Hon. Maria Santos
  position: Punong Barangay
- full_name: Pedro Cruz
  position: Kagawad
";

    fn write_reference_dir() -> TempDir {
        let tmp = TempDir::new().expect("tempdir");
        std::fs::write(tmp.path().join("certificate_types.yaml"), TYPES_YAML).expect("types");
        std::fs::create_dir(tmp.path().join("officials")).expect("officials dir");
        std::fs::write(tmp.path().join("officials/42.yaml"), OFFICIALS_YAML).expect("officials");
        tmp
    }

    struct FailingProvider;

    #[async_trait]
    impl ReferenceDataProvider for FailingProvider {
        async fn certificate_types(&self) -> CertificateResult<Vec<CertificateType>> {
            Err(CertificateError::InvalidInput("provider offline".into()))
        }

        async fn officials(&self, _jurisdiction: &str) -> CertificateResult<Vec<Official>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn loads_reference_data_from_yaml_directory() {
        let tmp = write_reference_dir();
        let provider = YamlDirectoryProvider::new(tmp.path());

        let data = ReferenceData::fetch(&provider, "42").await.expect("fetch");

        assert_eq!(data.certificate_types.len(), 2);
        assert_eq!(data.officials[0].full_name.as_str(), "Hon. Maria Santos");
        let death = data.find(&CertificateTypeId::new("2")).expect("type 2");
        assert_eq!(death.name.as_str(), "Death Certification");
        assert!(data.find(&CertificateTypeId::new("9")).is_none());
    }

    #[tokio::test]
    async fn missing_officials_file_is_unavailable() {
        let tmp = write_reference_dir();
        let provider = YamlDirectoryProvider::new(tmp.path());

        let err = ReferenceData::fetch(&provider, "7").await.unwrap_err();
        match err {
            CertificateError::ReferenceDataUnavailable(inner) => {
                assert!(matches!(*inner, CertificateError::FileRead { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn rejects_unsafe_jurisdiction_before_reading() {
        let tmp = write_reference_dir();
        let provider = YamlDirectoryProvider::new(tmp.path());
        let err = provider.officials("../42").await.unwrap_err();
        assert!(matches!(err, CertificateError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn malformed_yaml_surfaces_wire_error() {
        let tmp = write_reference_dir();
        std::fs::write(tmp.path().join("certificate_types.yaml"), "- iid: 1\n  nope: x\n")
            .expect("write");
        let provider = YamlDirectoryProvider::new(tmp.path());
        let err = provider.certificate_types().await.unwrap_err();
        assert!(matches!(err, CertificateError::Wire(_)));
    }

    #[tokio::test]
    async fn provider_failure_is_wrapped() {
        let err = ReferenceData::fetch(&FailingProvider, "42").await.unwrap_err();
        assert!(matches!(err, CertificateError::ReferenceDataUnavailable(_)));
        assert!(err.to_string().starts_with("initial data unavailable"));
    }

    #[tokio::test]
    async fn static_provider_ignores_jurisdiction() {
        let provider = StaticProvider {
            certificate_types: Vec::new(),
            officials: vec![Official {
                full_name: NonEmptyText::new("Hon. Maria Santos").unwrap(),
                position: None,
            }],
        };
        let data = ReferenceData::fetch(&provider, "anywhere").await.expect("fetch");
        assert_eq!(data.officials.len(), 1);
        assert!(data.certificate_types.is_empty());
    }

    #[tokio::test]
    async fn workspace_reference_data_loads() {
        let dir = crate::config::resolve_reference_data_dir(None).expect("reference_data/");
        let provider = YamlDirectoryProvider::new(dir);
        let data = ReferenceData::fetch(&provider, "default").await.expect("fetch");
        assert!(!data.certificate_types.is_empty());
        assert!(!data.officials.is_empty());
    }

    #[tokio::test]
    async fn loads_resident_file() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("juan.yaml");
        std::fs::write(
            &path,
            "first_name: Juan\nlast_name: Dela Cruz\npurok: Purok 1\nbarangay: San Isidro\ncity: Tagum\nprovince: Davao del Norte\n",
        )
        .expect("write");
        let resident = load_resident(&path).await.expect("resident");
        assert_eq!(resident.short_name(), "Juan Dela Cruz");
    }
}
