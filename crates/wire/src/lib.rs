//! Wire/boundary support for barangay reference data.
//!
//! This crate provides **wire models** and **translation helpers** for the YAML files that
//! stand in for the reference data provider:
//! - certificate type lists (`certificate_types.yaml`)
//! - officials lists per jurisdiction (`officials/<jurisdiction>.yaml`)
//! - resident records picked by the "select person" flows
//!
//! Wire field names follow the provider's column names (`iid`, `iname`, `body_text`,
//! `full_name`), so records exported from the provider can be dropped in unchanged.

pub mod certificate_type;
pub mod official;
pub mod resident;

pub use certificate_type::CertificateTypes;
pub use official::Officials;
pub use resident::ResidentRecord;

/// Errors returned by the `brgy-wire` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`WireError`].
pub type WireResult<T> = Result<T, WireError>;

/// Deserialize YAML into a wire struct, reporting the failing path on schema mismatch.
///
/// `what` names the document kind in the error message (e.g. "certificate types").
pub(crate) fn parse_yaml<T>(yaml_text: &str, what: &str) -> WireResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let deserializer = serde_yaml::Deserializer::from_str(yaml_text);
    serde_path_to_error::deserialize::<_, T>(deserializer).map_err(|err| {
        let path = err.path().to_string();
        let source = err.into_inner();
        let path = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        WireError::Translation(format!("{what} schema mismatch at {path}: {source}"))
    })
}
