//! Officials list wire model.
//!
//! List order is significant and preserved: the first official is the presiding one.

use crate::{parse_yaml, WireError, WireResult};
use brgy_types::{NonEmptyText, Official};
use serde::Deserialize;

/// Officials list operations.
pub struct Officials;

impl Officials {
    /// Parse an ordered officials list from YAML text.
    ///
    /// An empty document is an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`WireError`] if the YAML does not match the wire schema or a name is blank.
    pub fn parse(yaml_text: &str) -> WireResult<Vec<Official>> {
        if yaml_text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let wire: Vec<OfficialWire> = parse_yaml(yaml_text, "officials")?;
        wire.into_iter()
            .enumerate()
            .map(|(index, record)| {
                let full_name = NonEmptyText::new(&record.full_name).map_err(|e| {
                    WireError::Translation(format!("officials [{index}].full_name: {e}"))
                })?;
                Ok(Official {
                    full_name,
                    position: record.position.filter(|p| !p.trim().is_empty()),
                })
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OfficialWire {
    full_name: String,
    #[serde(default)]
    position: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_provider_order() {
        let yaml = "- full_name: Hon. Maria Santos\n  position: Punong Barangay\n- full_name: Pedro Cruz\n";
        let officials = Officials::parse(yaml).expect("parse");
        assert_eq!(officials.len(), 2);
        assert_eq!(officials[0].full_name.as_str(), "Hon. Maria Santos");
        assert_eq!(officials[0].position.as_deref(), Some("Punong Barangay"));
        assert_eq!(officials[1].position, None);
    }

    #[test]
    fn rejects_missing_name() {
        let err = Officials::parse("- position: Kagawad\n").unwrap_err();
        assert!(err.to_string().contains("officials schema mismatch"));
    }
}
