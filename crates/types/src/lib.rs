//! Shared value types for barangay certificate issuance.
//!
//! These are the read-only reference records handed to the composer (certificate types,
//! seated officials) and the resident record used when an operator picks a person from the
//! registry. Wire formats live in `brgy-wire`; composition lives in `brgy-core`.

use serde::{Deserialize, Serialize};

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("text cannot be empty")]
    Empty,
}

/// A string type that guarantees non-empty content.
///
/// The input is trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText`, trimming the input.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Opaque identifier of a certificate type, as issued by the reference data provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CertificateTypeId(String);

impl CertificateTypeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CertificateTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A certificate type: a named narrative template.
///
/// The display name doubles as the discriminator that selects the extra-field schema, so it
/// is compared case-insensitively by the schema selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateType {
    pub id: CertificateTypeId,
    pub name: NonEmptyText,
    /// Raw template body containing zero or more `[UPPER_SNAKE_CASE]` placeholders.
    pub template: String,
}

/// A seated office-holder of a jurisdiction.
///
/// Only the first official of a list is ever substituted into a narrative; `position` is
/// informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Official {
    pub full_name: NonEmptyText,
    pub position: Option<String>,
}

/// A resident picked from the registry to fill person fields of a form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resident {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    /// Street address, without purok or barangay.
    pub address: Option<String>,
    pub purok: String,
    pub barangay: String,
    pub city: String,
    pub province: String,
    pub contact_number: Option<String>,
    pub age: Option<String>,
    pub civil_status: Option<String>,
    pub gender: Option<String>,
    pub birth_place: Option<String>,
    /// ISO 8601 calendar date (`YYYY-MM-DD`).
    pub birthday: Option<String>,
}

impl Resident {
    /// `first last`, the form used for the complainant.
    pub fn short_name(&self) -> String {
        join_nonempty([self.first_name.as_str(), self.last_name.as_str()])
    }

    /// `first last middle`, the form used for every other selected person.
    pub fn full_name(&self) -> String {
        join_nonempty([
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.middle_name.as_deref().unwrap_or_default(),
        ])
    }

    /// `address purok, barangay`
    pub fn local_address(&self) -> String {
        let street = join_nonempty([
            self.address.as_deref().unwrap_or_default(),
            self.purok.as_str(),
        ]);
        join_comma(&street, &self.barangay)
    }

    /// `address purok, barangay city province`
    pub fn complete_address(&self) -> String {
        join_nonempty([
            self.local_address().as_str(),
            self.city.as_str(),
            self.province.as_str(),
        ])
    }
}

fn join_nonempty<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_comma(left: &str, right: &str) -> String {
    match (left.trim().is_empty(), right.trim().is_empty()) {
        (false, false) => format!("{}, {}", left.trim(), right.trim()),
        (false, true) => left.trim().to_string(),
        (true, _) => right.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resident() -> Resident {
        Resident {
            first_name: "Juan".into(),
            middle_name: Some("Reyes".into()),
            last_name: "Dela Cruz".into(),
            address: Some("123".into()),
            purok: "Purok 1".into(),
            barangay: "San Isidro".into(),
            city: "Tagum".into(),
            province: "Davao del Norte".into(),
            ..Resident::default()
        }
    }

    #[test]
    fn non_empty_text_trims_and_rejects_blank() {
        assert_eq!(NonEmptyText::new("  Maria ").unwrap().as_str(), "Maria");
        assert!(matches!(NonEmptyText::new("   "), Err(TextError::Empty)));
    }

    #[test]
    fn non_empty_text_deserialize_rejects_blank() {
        let err = serde_json::from_str::<NonEmptyText>("\"\"").unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn resident_names() {
        let r = resident();
        assert_eq!(r.short_name(), "Juan Dela Cruz");
        assert_eq!(r.full_name(), "Juan Dela Cruz Reyes");

        let no_middle = Resident {
            middle_name: None,
            ..resident()
        };
        assert_eq!(no_middle.full_name(), "Juan Dela Cruz");
    }

    #[test]
    fn resident_addresses() {
        let r = resident();
        assert_eq!(r.local_address(), "123 Purok 1, San Isidro");
        assert_eq!(
            r.complete_address(),
            "123 Purok 1, San Isidro Tagum Davao del Norte"
        );

        let no_street = Resident {
            address: None,
            ..resident()
        };
        assert_eq!(no_street.local_address(), "Purok 1, San Isidro");
    }
}
