//! # Barangay Certificate Core
//!
//! Core logic for composing barangay certificate narratives.
//!
//! This crate contains the pure composition pipeline and the state around it:
//! - Field schema selection per certificate type, with tagged form state
//! - Template segmentation, placeholder resolution and segment styling
//! - Reference data loading (certificate types and officials) behind an async provider
//!
//! **No presentation concerns**: rendering a narrative to a document or terminal belongs in
//! the caller (see the `brgy` CLI crate).

pub mod clock;
pub mod composer;
pub mod config;
pub mod constants;
pub mod dates;
pub mod error;
pub mod form;
pub mod reference;
pub mod resolver;
pub mod schema;
pub mod segmenter;
pub mod session;
pub mod style;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use composer::{compose, Narrative, Segment};
pub use config::{resolve_reference_data_dir, ReferenceConfig};
pub use error::{CertificateError, CertificateResult};
pub use form::{FormState, PersonSlot};
pub use reference::{
    load_resident, ReferenceData, ReferenceDataProvider, StaticProvider, YamlDirectoryProvider,
};
pub use resolver::{resolve, Placeholder, ResolveContext};
pub use schema::{select_schema, CertificateKind, FieldName, SchemaSelection};
pub use segmenter::{segment, Token};
pub use session::CertificateSession;
