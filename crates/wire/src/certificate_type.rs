//! Certificate type list wire model.
//!
//! Each record carries the provider's identifier, display name and raw template body. The
//! identifier may be written as a YAML string or integer; both are kept as opaque text.

use crate::{parse_yaml, WireError, WireResult};
use brgy_types::{CertificateType, CertificateTypeId, NonEmptyText};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Certificate type list operations.
///
/// Zero-sized type used for namespacing; all methods are associated functions.
pub struct CertificateTypes;

impl CertificateTypes {
    /// Parse a certificate type list from YAML text.
    ///
    /// An empty document is an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`WireError`] if:
    /// - the YAML does not match the wire schema (unknown keys included),
    /// - a display name is blank,
    /// - two records share an identifier.
    pub fn parse(yaml_text: &str) -> WireResult<Vec<CertificateType>> {
        if yaml_text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let wire: Vec<CertificateTypeWire> = parse_yaml(yaml_text, "certificate types")?;

        let mut seen = HashSet::new();
        wire.into_iter()
            .enumerate()
            .map(|(index, record)| {
                let id = record.iid.into_text();
                if !seen.insert(id.clone()) {
                    return Err(WireError::InvalidInput(format!(
                        "duplicate certificate type id '{id}'"
                    )));
                }
                let name = NonEmptyText::new(&record.iname).map_err(|e| {
                    WireError::Translation(format!("certificate type [{index}].iname: {e}"))
                })?;
                Ok(CertificateType {
                    id: CertificateTypeId::new(id),
                    name,
                    template: record.body_text.unwrap_or_default(),
                })
            })
            .collect()
    }

    /// Render a certificate type list as YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`WireError`] if serialisation fails.
    pub fn render(types: &[CertificateType]) -> WireResult<String> {
        let wire: Vec<CertificateTypeWire> = types
            .iter()
            .map(|t| CertificateTypeWire {
                iid: IdWire::Text(t.id.as_str().to_string()),
                iname: t.name.as_str().to_string(),
                body_text: Some(t.template.clone()),
            })
            .collect();
        serde_yaml::to_string(&wire).map_err(WireError::from)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct CertificateTypeWire {
    iid: IdWire,
    iname: String,
    /// Missing bodies are treated as empty templates.
    #[serde(default)]
    body_text: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
enum IdWire {
    Number(i64),
    Text(String),
}

impl IdWire {
    fn into_text(self) -> String {
        match self {
            IdWire::Number(n) => n.to_string(),
            IdWire::Text(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST: &str = r#"
- iid: 1
  iname: Indigency Certification
  body_text: "This is to certify that [APPLICANT_NAME] is indigent."
- iid: "bp-2"
  iname: Business Permit Certification
"#;

    #[test]
    fn parses_numeric_and_text_ids() {
        let types = CertificateTypes::parse(LIST).expect("parse");
        assert_eq!(types.len(), 2);
        assert_eq!(types[0].id.as_str(), "1");
        assert_eq!(types[0].name.as_str(), "Indigency Certification");
        assert!(types[0].template.contains("[APPLICANT_NAME]"));
        assert_eq!(types[1].id.as_str(), "bp-2");
        assert_eq!(types[1].template, "");
    }

    #[test]
    fn empty_document_is_empty_list() {
        assert!(CertificateTypes::parse("  \n").expect("parse").is_empty());
        assert!(CertificateTypes::parse("[]").expect("parse").is_empty());
    }

    #[test]
    fn rejects_unknown_keys_with_path() {
        let err = CertificateTypes::parse("- iid: 1\n  iname: X\n  colour: red\n").unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, WireError::Translation(_)));
        assert!(msg.contains("colour"), "{msg}");
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = CertificateTypes::parse("- iid: 1\n  iname: A\n- iid: \"1\"\n  iname: B\n")
            .unwrap_err();
        assert!(matches!(err, WireError::InvalidInput(_)));
    }

    #[test]
    fn rejects_blank_names() {
        let err = CertificateTypes::parse("- iid: 1\n  iname: \"  \"\n").unwrap_err();
        assert!(err.to_string().contains("iname"));
    }

    #[test]
    fn render_then_parse_preserves_records() {
        let types = CertificateTypes::parse(LIST).expect("parse");
        let yaml = CertificateTypes::render(&types).expect("render");
        assert_eq!(CertificateTypes::parse(&yaml).expect("reparse"), types);
    }
}
