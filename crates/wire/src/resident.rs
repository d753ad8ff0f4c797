//! Resident record wire model used by the "select person" flows.

use crate::{parse_yaml, WireError, WireResult};
use brgy_types::Resident;
use serde::Deserialize;

/// Resident record operations.
pub struct ResidentRecord;

impl ResidentRecord {
    /// Parse a single resident record from YAML text.
    ///
    /// `age` may be written as a number or a string.
    ///
    /// # Errors
    ///
    /// Returns [`WireError`] if the YAML does not match the wire schema or the first or last
    /// name is blank.
    pub fn parse(yaml_text: &str) -> WireResult<Resident> {
        let wire: ResidentWire = parse_yaml(yaml_text, "resident")?;

        if wire.first_name.trim().is_empty() || wire.last_name.trim().is_empty() {
            return Err(WireError::InvalidInput(
                "resident first_name and last_name are required".into(),
            ));
        }

        Ok(Resident {
            first_name: wire.first_name,
            middle_name: non_blank(wire.middle_name),
            last_name: wire.last_name,
            address: non_blank(wire.address),
            purok: wire.purok,
            barangay: wire.barangay,
            city: wire.city,
            province: wire.province,
            contact_number: non_blank(wire.contact_number),
            age: wire.age.map(AgeWire::into_text).and_then(|a| non_blank(Some(a))),
            civil_status: non_blank(wire.civil_status),
            gender: non_blank(wire.gender),
            birth_place: non_blank(wire.birth_place),
            birthday: non_blank(wire.birthday),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ResidentWire {
    first_name: String,
    #[serde(default)]
    middle_name: Option<String>,
    last_name: String,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    purok: String,
    #[serde(default)]
    barangay: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    province: String,
    #[serde(default)]
    contact_number: Option<String>,
    #[serde(default)]
    age: Option<AgeWire>,
    #[serde(default)]
    civil_status: Option<String>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    birth_place: Option<String>,
    #[serde(default)]
    birthday: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AgeWire {
    Number(u32),
    Text(String),
}

impl AgeWire {
    fn into_text(self) -> String {
        match self {
            AgeWire::Number(n) => n.to_string(),
            AgeWire::Text(s) => s,
        }
    }
}
