//! Field schema selection.
//!
//! Every certificate form collects the common applicant fields. Some certificate types also
//! collect extra fields; which ones is decided by the certificate type's display name,
//! compared case-insensitively against a fixed table. Names not in the table collect the
//! common fields only.

use crate::form::FormState;
use crate::CertificateError;
use brgy_types::CertificateType;
use serde::Serialize;
use std::collections::BTreeSet;
use std::str::FromStr;

/// Name of a collectible form field.
///
/// The wire name (`as_str`) is what form-update events carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    // Common fields.
    ApplicantName,
    ComplainantName,
    ComplainantMiddleName,
    ComplainantAddress,
    CompleteAddress,
    ComplainantContact,
    ComplainantAge,
    Gender,
    Birthday,
    BirthPlace,
    CivilStatus,
    IssuanceDate,
    Amount,
    StartDate,
    EndDate,
    CalamityName,
    CalamityDate,
    MotherName,
    FatherName,
    PartnerName,
    IssuedTo,
    LotSize,

    // Type-specific fields.
    BusinessName,
    BusinessAddress,
    ClosureDate,
    DeceasedName,
    DateOfDeath,
    PlaceOfDeath,
    Relationship,
    LotLocation,
    PermitType,
    SoloParentType,
    CalamityType,
    Purpose,
}

impl FieldName {
    /// Fields present on every certificate form, in form order.
    pub const COMMON: [FieldName; 22] = [
        FieldName::ApplicantName,
        FieldName::ComplainantName,
        FieldName::ComplainantMiddleName,
        FieldName::ComplainantAddress,
        FieldName::CompleteAddress,
        FieldName::ComplainantContact,
        FieldName::ComplainantAge,
        FieldName::Gender,
        FieldName::Birthday,
        FieldName::BirthPlace,
        FieldName::CivilStatus,
        FieldName::IssuanceDate,
        FieldName::Amount,
        FieldName::StartDate,
        FieldName::EndDate,
        FieldName::CalamityName,
        FieldName::CalamityDate,
        FieldName::MotherName,
        FieldName::FatherName,
        FieldName::PartnerName,
        FieldName::IssuedTo,
        FieldName::LotSize,
    ];

    /// Fields that only some certificate types collect.
    pub const TYPE_SPECIFIC: [FieldName; 12] = [
        FieldName::BusinessName,
        FieldName::BusinessAddress,
        FieldName::ClosureDate,
        FieldName::DeceasedName,
        FieldName::DateOfDeath,
        FieldName::PlaceOfDeath,
        FieldName::Relationship,
        FieldName::LotLocation,
        FieldName::PermitType,
        FieldName::SoloParentType,
        FieldName::CalamityType,
        FieldName::Purpose,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::ApplicantName => "applicant_name",
            FieldName::ComplainantName => "complainant_name",
            FieldName::ComplainantMiddleName => "complainant_middle_name",
            FieldName::ComplainantAddress => "complainant_address",
            FieldName::CompleteAddress => "complete_address",
            FieldName::ComplainantContact => "complainant_contact",
            FieldName::ComplainantAge => "complainant_age",
            FieldName::Gender => "gender",
            FieldName::Birthday => "birthday",
            FieldName::BirthPlace => "birth_place",
            FieldName::CivilStatus => "civil_status",
            FieldName::IssuanceDate => "issuance_date",
            FieldName::Amount => "amount",
            FieldName::StartDate => "start_date",
            FieldName::EndDate => "end_date",
            FieldName::CalamityName => "calamity_name",
            FieldName::CalamityDate => "calamity_date",
            FieldName::MotherName => "mother_name",
            FieldName::FatherName => "father_name",
            FieldName::PartnerName => "partner_name",
            FieldName::IssuedTo => "issued_to",
            FieldName::LotSize => "lot_size",
            FieldName::BusinessName => "business_name",
            FieldName::BusinessAddress => "business_address",
            FieldName::ClosureDate => "closure_date",
            FieldName::DeceasedName => "deceased_name",
            FieldName::DateOfDeath => "date_of_death",
            FieldName::PlaceOfDeath => "place_of_death",
            FieldName::Relationship => "relationship",
            FieldName::LotLocation => "lot_location",
            FieldName::PermitType => "permit_type",
            FieldName::SoloParentType => "solo_parent_type",
            FieldName::CalamityType => "calamity_type",
            FieldName::Purpose => "purpose",
        }
    }

    pub fn is_common(self) -> bool {
        Self::COMMON.contains(&self)
    }

    /// Whether the field holds an ISO calendar date.
    pub fn is_date(self) -> bool {
        matches!(
            self,
            FieldName::Birthday
                | FieldName::IssuanceDate
                | FieldName::StartDate
                | FieldName::EndDate
                | FieldName::CalamityDate
                | FieldName::ClosureDate
                | FieldName::DateOfDeath
        )
    }

    /// Allowed values of an enumerated field.
    pub fn choices(self) -> Option<&'static [&'static str]> {
        match self {
            FieldName::PermitType => Some(PermitType::VALUES),
            FieldName::SoloParentType => Some(SoloParentType::VALUES),
            FieldName::CalamityType => Some(CalamityType::VALUES),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = CertificateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::COMMON
            .into_iter()
            .chain(Self::TYPE_SPECIFIC)
            .find(|f| f.as_str() == s)
            .ok_or_else(|| CertificateError::UnknownField(s.to_string()))
    }
}

/// Certificate kinds with their own extra-field schema.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CertificateKind {
    BusinessClosure,
    BusinessPermit,
    Death,
    Relationship,
    Lot,
    ElectricalPermit,
    SoloParent,
    Calamity,
    Indigency,
    Unemployment,
    /// Any other certificate type: common fields only.
    #[default]
    Other,
}

impl CertificateKind {
    /// Select the kind for a certificate type display name (case-insensitive).
    pub fn from_display_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "business closure certification" => CertificateKind::BusinessClosure,
            "business permit certification" => CertificateKind::BusinessPermit,
            "death certification" => CertificateKind::Death,
            "relationship certification" => CertificateKind::Relationship,
            "lot certification" => CertificateKind::Lot,
            "electrical permit" => CertificateKind::ElectricalPermit,
            "solo parent certification" => CertificateKind::SoloParent,
            "calamity certification" => CertificateKind::Calamity,
            "indigency certification" => CertificateKind::Indigency,
            "unemployment certification" => CertificateKind::Unemployment,
            _ => CertificateKind::Other,
        }
    }

    /// Extra fields collected for this kind, in form order.
    pub fn extra_fields(self) -> &'static [FieldName] {
        match self {
            CertificateKind::BusinessClosure => &[
                FieldName::BusinessName,
                FieldName::BusinessAddress,
                FieldName::ClosureDate,
            ],
            CertificateKind::BusinessPermit => {
                &[FieldName::BusinessName, FieldName::BusinessAddress]
            }
            CertificateKind::Death => &[
                FieldName::DeceasedName,
                FieldName::DateOfDeath,
                FieldName::PlaceOfDeath,
            ],
            CertificateKind::Relationship => &[FieldName::Relationship],
            CertificateKind::Lot => &[FieldName::LotLocation],
            CertificateKind::ElectricalPermit => &[FieldName::PermitType],
            CertificateKind::SoloParent => &[FieldName::SoloParentType],
            CertificateKind::Calamity => &[FieldName::CalamityType],
            CertificateKind::Indigency | CertificateKind::Unemployment => &[FieldName::Purpose],
            CertificateKind::Other => &[],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PermitType {
    Residential,
    Commercial,
    Industrial,
}

impl PermitType {
    pub const VALUES: &'static [&'static str] = &["residential", "commercial", "industrial"];

    pub fn as_str(self) -> &'static str {
        match self {
            PermitType::Residential => "residential",
            PermitType::Commercial => "commercial",
            PermitType::Industrial => "industrial",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "residential" => Some(PermitType::Residential),
            "commercial" => Some(PermitType::Commercial),
            "industrial" => Some(PermitType::Industrial),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoloParentType {
    SingleParent,
    Widowed,
    Separated,
    SoloByChoice,
}

impl SoloParentType {
    pub const VALUES: &'static [&'static str] =
        &["single_parent", "widowed", "separated", "solo_by_choice"];

    pub fn as_str(self) -> &'static str {
        match self {
            SoloParentType::SingleParent => "single_parent",
            SoloParentType::Widowed => "widowed",
            SoloParentType::Separated => "separated",
            SoloParentType::SoloByChoice => "solo_by_choice",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "single_parent" => Some(SoloParentType::SingleParent),
            "widowed" => Some(SoloParentType::Widowed),
            "separated" => Some(SoloParentType::Separated),
            "solo_by_choice" => Some(SoloParentType::SoloByChoice),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CalamityType {
    Flood,
    Fire,
    Earthquake,
    Typhoon,
    Landslide,
}

impl CalamityType {
    pub const VALUES: &'static [&'static str] =
        &["flood", "fire", "earthquake", "typhoon", "landslide"];

    pub fn as_str(self) -> &'static str {
        match self {
            CalamityType::Flood => "flood",
            CalamityType::Fire => "fire",
            CalamityType::Earthquake => "earthquake",
            CalamityType::Typhoon => "typhoon",
            CalamityType::Landslide => "landslide",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "flood" => Some(CalamityType::Flood),
            "fire" => Some(CalamityType::Fire),
            "earthquake" => Some(CalamityType::Earthquake),
            "typhoon" => Some(CalamityType::Typhoon),
            "landslide" => Some(CalamityType::Landslide),
            _ => None,
        }
    }
}

/// Result of selecting a certificate type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaSelection {
    pub kind: CertificateKind,
    /// Extra fields to show and collect beyond the common ones.
    pub required_extra_fields: BTreeSet<FieldName>,
    /// The blank form state that replaces whatever was entered before.
    pub resets: FormState,
}

/// Select the field schema for a certificate type.
///
/// Never fails: an unrecognized display name selects the common fields only.
pub fn select_schema(certificate_type: &CertificateType) -> SchemaSelection {
    let kind = CertificateKind::from_display_name(certificate_type.name.as_str());
    tracing::debug!(
        certificate = certificate_type.name.as_str(),
        ?kind,
        "selected field schema"
    );

    SchemaSelection {
        kind,
        required_extra_fields: kind.extra_fields().iter().copied().collect(),
        resets: FormState::for_certificate_type(certificate_type),
    }
}
