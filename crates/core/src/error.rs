use crate::schema::FieldName;

#[derive(Debug, thiserror::Error)]
pub enum CertificateError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown form field '{0}'")]
    UnknownField(String),
    #[error("field '{field}' is not collected for certificate type '{certificate}'")]
    FieldNotInSchema {
        field: FieldName,
        certificate: String,
    },
    #[error("invalid value '{value}' for '{field}' (expected one of: {})", allowed.join(", "))]
    InvalidChoice {
        field: FieldName,
        value: String,
        allowed: &'static [&'static str],
    },
    #[error("unknown certificate type id '{0}'")]
    UnknownCertificateType(String),

    #[error("initial data unavailable: {0}")]
    ReferenceDataUnavailable(#[source] Box<CertificateError>),
    #[error("failed to read reference data file {path}: {source}", path = path.display())]
    FileRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("reference data error: {0}")]
    Wire(#[from] brgy_wire::WireError),
}

pub type CertificateResult<T> = std::result::Result<T, CertificateError>;
