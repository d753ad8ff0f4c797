//! Constants used throughout the composer crate.
//!
//! Reference data file layout and fixed narrative text live here so the provider, the
//! configuration resolver and the CLI agree on them.

/// Directory searched for reference data when no explicit directory is configured.
pub const DEFAULT_REFERENCE_DATA_DIR: &str = "reference_data";

/// Filename of the certificate type list inside the reference data directory.
pub const CERTIFICATE_TYPES_FILENAME: &str = "certificate_types.yaml";

/// Directory holding one officials list per jurisdiction (`<jurisdiction>.yaml`).
pub const OFFICIALS_DIR_NAME: &str = "officials";

/// File extension of reference data files.
pub const REFERENCE_FILE_EXTENSION: &str = "yaml";

/// Narrative shown when no certificate type is selected or no officials are loaded.
pub const SELECT_TYPE_PROMPT: &str = "Please select a certificate type first";
