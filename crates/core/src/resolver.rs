//! Placeholder resolution.
//!
//! Each recognized placeholder reads one or more form fields, the officials list or the
//! current date. When the source is missing, blank or (for dates) unparseable, the
//! placeholder resolves to its own bracketed text so the gap stays visible in the preview.

use crate::dates::{format_long_date, format_month_year, month_name, ordinal, parse_iso_date};
use crate::form::FormState;
use crate::schema::FieldName;
use brgy_types::Official;
use chrono::{Datelike, NaiveDate};

/// The recognized placeholder vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placeholder {
    BarangayCaptain,
    ApplicantName,
    ResidentName,
    DeceasedName,
    BusinessName,
    BusinessAddress,
    Address,
    CivilStatus,
    Age,
    Gender,
    Purpose,
    PlaceOfDeath,
    MothersName,
    FathersName,
    IssuedTo,
    LotLocation,
    Relationship,
    PartnerName,
    BirthPlace,
    CalamityName,
    LotSize,
    BirthDate,
    CalamityDate,
    StartDate,
    EndDate,
    DateOfDeath,
    ClosureDate,
    Date,
    Month,
    Year,
}

impl Placeholder {
    pub const ALL: [Placeholder; 30] = [
        Placeholder::BarangayCaptain,
        Placeholder::ApplicantName,
        Placeholder::ResidentName,
        Placeholder::DeceasedName,
        Placeholder::BusinessName,
        Placeholder::BusinessAddress,
        Placeholder::Address,
        Placeholder::CivilStatus,
        Placeholder::Age,
        Placeholder::Gender,
        Placeholder::Purpose,
        Placeholder::PlaceOfDeath,
        Placeholder::MothersName,
        Placeholder::FathersName,
        Placeholder::IssuedTo,
        Placeholder::LotLocation,
        Placeholder::Relationship,
        Placeholder::PartnerName,
        Placeholder::BirthPlace,
        Placeholder::CalamityName,
        Placeholder::LotSize,
        Placeholder::BirthDate,
        Placeholder::CalamityDate,
        Placeholder::StartDate,
        Placeholder::EndDate,
        Placeholder::DateOfDeath,
        Placeholder::ClosureDate,
        Placeholder::Date,
        Placeholder::Month,
        Placeholder::Year,
    ];

    /// Bracketed template text, which is also the fallback literal.
    pub fn token(self) -> &'static str {
        match self {
            Placeholder::BarangayCaptain => "[BARANGAY_CAPTAIN]",
            Placeholder::ApplicantName => "[APPLICANT_NAME]",
            Placeholder::ResidentName => "[RESIDENT_NAME]",
            Placeholder::DeceasedName => "[DECEASED_NAME]",
            Placeholder::BusinessName => "[BUSINESS_NAME]",
            Placeholder::BusinessAddress => "[BUSINESS_ADDRESS]",
            Placeholder::Address => "[ADDRESS]",
            Placeholder::CivilStatus => "[CIVIL_STATUS]",
            Placeholder::Age => "[AGE]",
            Placeholder::Gender => "[GENDER]",
            Placeholder::Purpose => "[PURPOSE]",
            Placeholder::PlaceOfDeath => "[PLACE_OF_DEATH]",
            Placeholder::MothersName => "[MOTHERS_NAME]",
            Placeholder::FathersName => "[FATHERS_NAME]",
            Placeholder::IssuedTo => "[ISSUED_TO]",
            Placeholder::LotLocation => "[LOT_LOCATION]",
            Placeholder::Relationship => "[RELATIONSHIP]",
            Placeholder::PartnerName => "[PARTNER_NAME]",
            Placeholder::BirthPlace => "[BIRTH_PLACE]",
            Placeholder::CalamityName => "[CALAMITY_NAME]",
            Placeholder::LotSize => "[LOT_SIZE]",
            Placeholder::BirthDate => "[BIRTH_DATE]",
            Placeholder::CalamityDate => "[CALAMITY_DATE]",
            Placeholder::StartDate => "[START_DATE]",
            Placeholder::EndDate => "[END_DATE]",
            Placeholder::DateOfDeath => "[DATE_OF_DEATH]",
            Placeholder::ClosureDate => "[CLOSURE_DATE]",
            Placeholder::Date => "[DATE]",
            Placeholder::Month => "[MONTH]",
            Placeholder::Year => "[YEAR]",
        }
    }

    /// Look up a placeholder by its bracketed text.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.token() == token)
    }
}

/// Everything a placeholder can be resolved against.
#[derive(Clone, Copy, Debug)]
pub struct ResolveContext<'a> {
    pub form: &'a FormState,
    /// Ordered as supplied; the first entry is the presiding official.
    pub officials: &'a [Official],
    pub today: NaiveDate,
}

impl<'a> ResolveContext<'a> {
    pub fn new(form: &'a FormState, officials: &'a [Official], today: NaiveDate) -> Self {
        Self {
            form,
            officials,
            today,
        }
    }

    fn field(&self, field: FieldName) -> Option<String> {
        self.form.get(field).map(str::to_string)
    }

    fn long_date(&self, field: FieldName) -> Option<String> {
        self.date(field).map(format_long_date)
    }

    fn date(&self, field: FieldName) -> Option<NaiveDate> {
        let raw = self.form.get(field)?;
        let parsed = parse_iso_date(raw);
        if parsed.is_none() {
            tracing::debug!(field = field.as_str(), value = raw, "unparseable date value");
        }
        parsed
    }
}

/// Resolve placeholder text. Unrecognized placeholders are returned unchanged.
pub fn resolve(token: &str, ctx: &ResolveContext<'_>) -> String {
    match Placeholder::from_token(token) {
        Some(placeholder) => resolve_placeholder(placeholder, ctx),
        None => token.to_string(),
    }
}

/// Resolve a recognized placeholder, falling back to its bracketed text.
pub fn resolve_placeholder(placeholder: Placeholder, ctx: &ResolveContext<'_>) -> String {
    let value = match placeholder {
        Placeholder::BarangayCaptain => ctx
            .officials
            .first()
            .map(|official| official.full_name.to_string()),
        Placeholder::ApplicantName => ctx
            .field(FieldName::ApplicantName)
            .or_else(|| ctx.field(FieldName::ComplainantName)),
        Placeholder::ResidentName | Placeholder::DeceasedName => {
            ctx.field(FieldName::ComplainantName)
        }
        Placeholder::BusinessName => ctx.field(FieldName::BusinessName),
        Placeholder::BusinessAddress => ctx.field(FieldName::BusinessAddress),
        Placeholder::Address => ctx
            .field(FieldName::ComplainantAddress)
            .or_else(|| ctx.field(FieldName::BusinessAddress)),
        Placeholder::CivilStatus => ctx.field(FieldName::CivilStatus),
        Placeholder::Age => ctx.field(FieldName::ComplainantAge),
        Placeholder::Gender => ctx.field(FieldName::Gender),
        Placeholder::Purpose => ctx.field(FieldName::Purpose),
        Placeholder::PlaceOfDeath => ctx.field(FieldName::PlaceOfDeath),
        Placeholder::MothersName => ctx.field(FieldName::MotherName),
        Placeholder::FathersName => ctx.field(FieldName::FatherName),
        Placeholder::IssuedTo => ctx.field(FieldName::IssuedTo),
        Placeholder::LotLocation => ctx.field(FieldName::LotLocation),
        Placeholder::Relationship => ctx.field(FieldName::Relationship),
        Placeholder::PartnerName => ctx.field(FieldName::PartnerName),
        Placeholder::BirthPlace => ctx.field(FieldName::BirthPlace),
        Placeholder::CalamityName => ctx.field(FieldName::CalamityName),
        Placeholder::LotSize => ctx.field(FieldName::LotSize),
        Placeholder::BirthDate => ctx.long_date(FieldName::Birthday),
        Placeholder::CalamityDate => ctx.long_date(FieldName::CalamityDate),
        Placeholder::StartDate => ctx.long_date(FieldName::StartDate),
        Placeholder::EndDate => ctx.long_date(FieldName::EndDate),
        Placeholder::DateOfDeath => ctx.long_date(FieldName::DateOfDeath),
        Placeholder::ClosureDate => ctx.date(FieldName::ClosureDate).map(format_month_year),
        Placeholder::Date => Some(ordinal(ctx.today.day())),
        Placeholder::Month => Some(month_name(ctx.today)),
        Placeholder::Year => Some(ctx.today.year().to_string()),
    };

    value.unwrap_or_else(|| placeholder.token().to_string())
}
