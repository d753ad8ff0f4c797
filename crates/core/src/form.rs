//! Form state store.
//!
//! `FormState` is a value: every update returns a new state and leaves the old one intact,
//! so a preview can hold on to the state it was composed from. Type-specific fields are a
//! tagged variant per certificate kind; a field outside the active schema has nowhere to be
//! stored and updating it is an error.

use crate::schema::{CalamityType, CertificateKind, FieldName, PermitType, SoloParentType};
use crate::{CertificateError, CertificateResult};
use brgy_types::{CertificateType, Resident};

/// Person fields filled from a resident picked in the registry.
///
/// The complainant is filled separately by [`FormState::with_complainant`] because it copies
/// the resident's whole profile, not only the name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersonSlot {
    Applicant,
    Mother,
    Father,
    IssuedTo,
    Partner,
}

impl PersonSlot {
    pub fn field(self) -> FieldName {
        match self {
            PersonSlot::Applicant => FieldName::ApplicantName,
            PersonSlot::Mother => FieldName::MotherName,
            PersonSlot::Father => FieldName::FatherName,
            PersonSlot::IssuedTo => FieldName::IssuedTo,
            PersonSlot::Partner => FieldName::PartnerName,
        }
    }
}

/// Fields present on every certificate form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommonFields {
    pub applicant_name: String,
    pub complainant_name: String,
    pub complainant_middle_name: String,
    pub complainant_address: String,
    pub complete_address: String,
    pub complainant_contact: String,
    pub complainant_age: String,
    pub gender: String,
    pub birthday: String,
    pub birth_place: String,
    pub civil_status: String,
    pub issuance_date: String,
    pub amount: String,
    pub start_date: String,
    pub end_date: String,
    pub calamity_name: String,
    pub calamity_date: String,
    pub mother_name: String,
    pub father_name: String,
    pub partner_name: String,
    pub issued_to: String,
    pub lot_size: String,
}

impl CommonFields {
    fn slot(&self, field: FieldName) -> Option<&String> {
        Some(match field {
            FieldName::ApplicantName => &self.applicant_name,
            FieldName::ComplainantName => &self.complainant_name,
            FieldName::ComplainantMiddleName => &self.complainant_middle_name,
            FieldName::ComplainantAddress => &self.complainant_address,
            FieldName::CompleteAddress => &self.complete_address,
            FieldName::ComplainantContact => &self.complainant_contact,
            FieldName::ComplainantAge => &self.complainant_age,
            FieldName::Gender => &self.gender,
            FieldName::Birthday => &self.birthday,
            FieldName::BirthPlace => &self.birth_place,
            FieldName::CivilStatus => &self.civil_status,
            FieldName::IssuanceDate => &self.issuance_date,
            FieldName::Amount => &self.amount,
            FieldName::StartDate => &self.start_date,
            FieldName::EndDate => &self.end_date,
            FieldName::CalamityName => &self.calamity_name,
            FieldName::CalamityDate => &self.calamity_date,
            FieldName::MotherName => &self.mother_name,
            FieldName::FatherName => &self.father_name,
            FieldName::PartnerName => &self.partner_name,
            FieldName::IssuedTo => &self.issued_to,
            FieldName::LotSize => &self.lot_size,
            _ => return None,
        })
    }

    fn slot_mut(&mut self, field: FieldName) -> Option<&mut String> {
        Some(match field {
            FieldName::ApplicantName => &mut self.applicant_name,
            FieldName::ComplainantName => &mut self.complainant_name,
            FieldName::ComplainantMiddleName => &mut self.complainant_middle_name,
            FieldName::ComplainantAddress => &mut self.complainant_address,
            FieldName::CompleteAddress => &mut self.complete_address,
            FieldName::ComplainantContact => &mut self.complainant_contact,
            FieldName::ComplainantAge => &mut self.complainant_age,
            FieldName::Gender => &mut self.gender,
            FieldName::Birthday => &mut self.birthday,
            FieldName::BirthPlace => &mut self.birth_place,
            FieldName::CivilStatus => &mut self.civil_status,
            FieldName::IssuanceDate => &mut self.issuance_date,
            FieldName::Amount => &mut self.amount,
            FieldName::StartDate => &mut self.start_date,
            FieldName::EndDate => &mut self.end_date,
            FieldName::CalamityName => &mut self.calamity_name,
            FieldName::CalamityDate => &mut self.calamity_date,
            FieldName::MotherName => &mut self.mother_name,
            FieldName::FatherName => &mut self.father_name,
            FieldName::PartnerName => &mut self.partner_name,
            FieldName::IssuedTo => &mut self.issued_to,
            FieldName::LotSize => &mut self.lot_size,
            _ => return None,
        })
    }
}

/// Type-specific fields of the active certificate kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExtraFields {
    #[default]
    None,
    Business {
        business_name: String,
        business_address: String,
    },
    BusinessClosure {
        business_name: String,
        business_address: String,
        closure_date: String,
    },
    Death {
        deceased_name: String,
        date_of_death: String,
        place_of_death: String,
    },
    Relationship {
        relationship: String,
    },
    Lot {
        lot_location: String,
    },
    ElectricalPermit {
        permit_type: Option<PermitType>,
    },
    SoloParent {
        solo_parent_type: Option<SoloParentType>,
    },
    Calamity {
        calamity_type: Option<CalamityType>,
    },
    Purpose {
        purpose: String,
    },
}

impl ExtraFields {
    /// Blank type-specific fields for a certificate kind.
    pub fn blank(kind: CertificateKind) -> Self {
        match kind {
            CertificateKind::BusinessPermit => ExtraFields::Business {
                business_name: String::new(),
                business_address: String::new(),
            },
            CertificateKind::BusinessClosure => ExtraFields::BusinessClosure {
                business_name: String::new(),
                business_address: String::new(),
                closure_date: String::new(),
            },
            CertificateKind::Death => ExtraFields::Death {
                deceased_name: String::new(),
                date_of_death: String::new(),
                place_of_death: String::new(),
            },
            CertificateKind::Relationship => ExtraFields::Relationship {
                relationship: String::new(),
            },
            CertificateKind::Lot => ExtraFields::Lot {
                lot_location: String::new(),
            },
            CertificateKind::ElectricalPermit => ExtraFields::ElectricalPermit { permit_type: None },
            CertificateKind::SoloParent => ExtraFields::SoloParent {
                solo_parent_type: None,
            },
            CertificateKind::Calamity => ExtraFields::Calamity {
                calamity_type: None,
            },
            CertificateKind::Indigency | CertificateKind::Unemployment => ExtraFields::Purpose {
                purpose: String::new(),
            },
            CertificateKind::Other => ExtraFields::None,
        }
    }

    /// Raw value of a type-specific field; `None` if the active variant lacks it.
    fn value(&self, field: FieldName) -> Option<&str> {
        match (self, field) {
            (
                ExtraFields::Business { business_name, .. }
                | ExtraFields::BusinessClosure { business_name, .. },
                FieldName::BusinessName,
            ) => Some(business_name.as_str()),
            (
                ExtraFields::Business {
                    business_address, ..
                }
                | ExtraFields::BusinessClosure {
                    business_address, ..
                },
                FieldName::BusinessAddress,
            ) => Some(business_address.as_str()),
            (ExtraFields::BusinessClosure { closure_date, .. }, FieldName::ClosureDate) => {
                Some(closure_date.as_str())
            }
            (ExtraFields::Death { deceased_name, .. }, FieldName::DeceasedName) => {
                Some(deceased_name.as_str())
            }
            (ExtraFields::Death { date_of_death, .. }, FieldName::DateOfDeath) => {
                Some(date_of_death.as_str())
            }
            (ExtraFields::Death { place_of_death, .. }, FieldName::PlaceOfDeath) => {
                Some(place_of_death.as_str())
            }
            (ExtraFields::Relationship { relationship }, FieldName::Relationship) => {
                Some(relationship.as_str())
            }
            (ExtraFields::Lot { lot_location }, FieldName::LotLocation) => Some(lot_location.as_str()),
            (ExtraFields::ElectricalPermit { permit_type }, FieldName::PermitType) => {
                Some(permit_type.map_or("", PermitType::as_str))
            }
            (ExtraFields::SoloParent { solo_parent_type }, FieldName::SoloParentType) => {
                Some(solo_parent_type.map_or("", SoloParentType::as_str))
            }
            (ExtraFields::Calamity { calamity_type }, FieldName::CalamityType) => {
                Some(calamity_type.map_or("", CalamityType::as_str))
            }
            (ExtraFields::Purpose { purpose }, FieldName::Purpose) => Some(purpose.as_str()),
            _ => None,
        }
    }

    /// Set a type-specific field. Returns `Ok(false)` if the active variant lacks it.
    fn set(&mut self, field: FieldName, value: String) -> CertificateResult<bool> {
        let slot = match (self, field) {
            (
                ExtraFields::Business { business_name, .. }
                | ExtraFields::BusinessClosure { business_name, .. },
                FieldName::BusinessName,
            ) => business_name,
            (
                ExtraFields::Business {
                    business_address, ..
                }
                | ExtraFields::BusinessClosure {
                    business_address, ..
                },
                FieldName::BusinessAddress,
            ) => business_address,
            (ExtraFields::BusinessClosure { closure_date, .. }, FieldName::ClosureDate) => {
                closure_date
            }
            (ExtraFields::Death { deceased_name, .. }, FieldName::DeceasedName) => deceased_name,
            (ExtraFields::Death { date_of_death, .. }, FieldName::DateOfDeath) => date_of_death,
            (ExtraFields::Death { place_of_death, .. }, FieldName::PlaceOfDeath) => place_of_death,
            (ExtraFields::Relationship { relationship }, FieldName::Relationship) => relationship,
            (ExtraFields::Lot { lot_location }, FieldName::LotLocation) => lot_location,
            (ExtraFields::Purpose { purpose }, FieldName::Purpose) => purpose,
            (ExtraFields::ElectricalPermit { permit_type }, FieldName::PermitType) => {
                *permit_type = parse_choice(field, &value, PermitType::VALUES, PermitType::parse)?;
                return Ok(true);
            }
            (ExtraFields::SoloParent { solo_parent_type }, FieldName::SoloParentType) => {
                *solo_parent_type =
                    parse_choice(field, &value, SoloParentType::VALUES, SoloParentType::parse)?;
                return Ok(true);
            }
            (ExtraFields::Calamity { calamity_type }, FieldName::CalamityType) => {
                *calamity_type =
                    parse_choice(field, &value, CalamityType::VALUES, CalamityType::parse)?;
                return Ok(true);
            }
            _ => return Ok(false),
        };
        *slot = value;
        Ok(true)
    }
}

/// An empty value clears an enumerated field.
fn parse_choice<T>(
    field: FieldName,
    value: &str,
    allowed: &'static [&'static str],
    parse: fn(&str) -> Option<T>,
) -> CertificateResult<Option<T>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    parse(value)
        .map(Some)
        .ok_or_else(|| CertificateError::InvalidChoice {
            field,
            value: value.to_string(),
            allowed,
        })
}

/// All collectible fields of a certificate form, plus the selected certificate type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    certificate_type: Option<CertificateType>,
    kind: CertificateKind,
    common: CommonFields,
    extra: ExtraFields,
}

impl FormState {
    /// The initial state: no certificate type, every field blank.
    pub fn new() -> Self {
        Self::default()
    }

    /// A blank state for a newly selected certificate type.
    ///
    /// Nothing carries over from a previous state; callers replace their state wholesale.
    pub fn for_certificate_type(certificate_type: &CertificateType) -> Self {
        let kind = CertificateKind::from_display_name(certificate_type.name.as_str());
        Self {
            certificate_type: Some(certificate_type.clone()),
            kind,
            common: CommonFields::default(),
            extra: ExtraFields::blank(kind),
        }
    }

    pub fn certificate_type(&self) -> Option<&CertificateType> {
        self.certificate_type.as_ref()
    }

    pub fn kind(&self) -> CertificateKind {
        self.kind
    }

    pub fn common(&self) -> &CommonFields {
        &self.common
    }

    pub fn extra(&self) -> &ExtraFields {
        &self.extra
    }

    /// Whether the field is collected for the active certificate type.
    pub fn is_active(&self, field: FieldName) -> bool {
        self.value(field).is_some()
    }

    /// Raw value of a field, possibly empty. `None` if the field is not in the active schema.
    pub fn value(&self, field: FieldName) -> Option<&str> {
        match self.common.slot(field) {
            Some(value) => Some(value.as_str()),
            None => self.extra.value(field),
        }
    }

    /// Value of a field if it is in the active schema and not blank.
    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.value(field).filter(|v| !v.trim().is_empty())
    }

    /// Return a new state with one field replaced.
    ///
    /// # Errors
    ///
    /// - `FieldNotInSchema` if the field is not collected for the active certificate type.
    /// - `InvalidChoice` if an enumerated field is given a value outside its enumeration.
    pub fn with_field(&self, field: FieldName, value: impl Into<String>) -> CertificateResult<Self> {
        let value = value.into();
        let mut next = self.clone();

        if let Some(slot) = next.common.slot_mut(field) {
            *slot = value;
            return Ok(next);
        }

        if next.extra.set(field, value)? {
            return Ok(next);
        }

        Err(CertificateError::FieldNotInSchema {
            field,
            certificate: self
                .certificate_type
                .as_ref()
                .map_or_else(|| "<none>".to_string(), |t| t.name.to_string()),
        })
    }

    /// Return a new state with the complainant profile copied from a resident.
    ///
    /// Every complainant field is overwritten, so values missing on the resident become blank.
    pub fn with_complainant(&self, resident: &Resident) -> Self {
        let mut next = self.clone();
        let common = &mut next.common;
        common.complainant_name = resident.short_name();
        common.complainant_middle_name = resident.middle_name.clone().unwrap_or_default();
        common.complainant_address = resident.local_address();
        common.complete_address = resident.complete_address();
        common.complainant_contact = resident.contact_number.clone().unwrap_or_default();
        common.complainant_age = resident.age.clone().unwrap_or_default();
        common.civil_status = resident.civil_status.clone().unwrap_or_default();
        common.gender = resident.gender.clone().unwrap_or_default();
        common.birth_place = resident.birth_place.clone().unwrap_or_default();
        common.birthday = resident.birthday.clone().unwrap_or_default();
        next
    }

    /// Return a new state with one person field set to the resident's full name.
    pub fn with_person(&self, slot: PersonSlot, resident: &Resident) -> Self {
        let mut next = self.clone();
        if let Some(value) = next.common.slot_mut(slot.field()) {
            *value = resident.full_name();
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brgy_types::{CertificateTypeId, NonEmptyText};

    fn certificate(name: &str) -> CertificateType {
        CertificateType {
            id: CertificateTypeId::new(name.to_lowercase().replace(' ', "-")),
            name: NonEmptyText::new(name).unwrap(),
            template: String::new(),
        }
    }

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
            civil_status: Some("Single".into()),
            birthday: Some("1990-02-14".into()),
            ..Resident::default()
        }
    }

    #[test]
    fn updates_are_copy_on_write() {
        let before = FormState::for_certificate_type(&certificate("Indigency Certification"));
        let after = before
            .with_field(FieldName::Purpose, "medical assistance")
            .expect("purpose is collected");

        assert_eq!(before.get(FieldName::Purpose), None);
        assert_eq!(after.get(FieldName::Purpose), Some("medical assistance"));
    }

    #[test]
    fn switching_type_resets_business_fields() {
        let permit = FormState::for_certificate_type(&certificate("Business Permit Certification"))
            .with_field(FieldName::BusinessName, "Sari-Sari Store")
            .unwrap()
            .with_field(FieldName::BusinessAddress, "Purok 3")
            .unwrap()
            .with_field(FieldName::ComplainantName, "Ana Lopez")
            .unwrap();
        assert_eq!(permit.get(FieldName::BusinessName), Some("Sari-Sari Store"));

        let death = FormState::for_certificate_type(&certificate("Death Certification"));

        assert_eq!(death.value(FieldName::BusinessName), None);
        assert_eq!(death.value(FieldName::BusinessAddress), None);
        assert_eq!(death.get(FieldName::ComplainantName), None);
        for field in [
            FieldName::DeceasedName,
            FieldName::DateOfDeath,
            FieldName::PlaceOfDeath,
        ] {
            assert_eq!(death.value(field), Some(""), "{field}");
        }
    }

    #[test]
    fn rejects_fields_outside_schema() {
        let lot = FormState::for_certificate_type(&certificate("Lot Certification"));
        let err = lot
            .with_field(FieldName::BusinessName, "Store")
            .unwrap_err();
        assert!(matches!(
            err,
            CertificateError::FieldNotInSchema {
                field: FieldName::BusinessName,
                ..
            }
        ));

        let none = FormState::new();
        assert!(none.with_field(FieldName::Purpose, "x").is_err());
        assert!(none.with_field(FieldName::LotSize, "200 sqm").is_ok());
    }

    #[test]
    fn enumerated_fields_validate_and_clear() {
        let calamity = FormState::for_certificate_type(&certificate("Calamity Certification"));
        let typhoon = calamity
            .with_field(FieldName::CalamityType, "typhoon")
            .expect("valid choice");
        assert_eq!(typhoon.get(FieldName::CalamityType), Some("typhoon"));

        let err = typhoon
            .with_field(FieldName::CalamityType, "volcano")
            .unwrap_err();
        assert!(err.to_string().contains("flood, fire, earthquake, typhoon, landslide"));

        let cleared = typhoon.with_field(FieldName::CalamityType, "").unwrap();
        assert_eq!(cleared.value(FieldName::CalamityType), Some(""));
    }

    #[test]
    fn closure_date_only_for_closure_variant() {
        let permit = FormState::for_certificate_type(&certificate("Business Permit Certification"));
        assert!(!permit.is_active(FieldName::ClosureDate));

        let closure =
            FormState::for_certificate_type(&certificate("Business Closure Certification"));
        assert!(closure.is_active(FieldName::ClosureDate));
        assert!(closure.is_active(FieldName::BusinessName));
    }

    #[test]
    fn with_complainant_copies_profile() {
        let form = FormState::new()
            .with_field(FieldName::ComplainantContact, "0917")
            .unwrap()
            .with_complainant(&resident());

        assert_eq!(form.get(FieldName::ComplainantName), Some("Juan Dela Cruz"));
        assert_eq!(form.get(FieldName::ComplainantMiddleName), Some("Reyes"));
        assert_eq!(
            form.get(FieldName::ComplainantAddress),
            Some("123 Purok 1, San Isidro")
        );
        assert_eq!(
            form.get(FieldName::CompleteAddress),
            Some("123 Purok 1, San Isidro Tagum Davao del Norte")
        );
        assert_eq!(form.get(FieldName::CivilStatus), Some("Single"));
        assert_eq!(form.get(FieldName::Birthday), Some("1990-02-14"));
        // Missing on the resident, so the previous value is cleared.
        assert_eq!(form.get(FieldName::ComplainantContact), None);
    }

    #[test]
    fn with_person_uses_full_name() {
        let form = FormState::new()
            .with_person(PersonSlot::Mother, &resident())
            .with_person(PersonSlot::Applicant, &resident());
        assert_eq!(form.get(FieldName::MotherName), Some("Juan Dela Cruz Reyes"));
        assert_eq!(form.get(FieldName::ApplicantName), Some("Juan Dela Cruz Reyes"));
        assert_eq!(form.get(FieldName::FatherName), None);
    }
}
