//! Certificate session.
//!
//! A session owns the reference data fetched at startup and the current form state. Every
//! edit replaces the form state with a new value, and the narrative is recomposed only when
//! the state or the date has changed since it was last composed.

use crate::clock::{Clock, SystemClock};
use crate::composer::{compose, Narrative};
use crate::form::{FormState, PersonSlot};
use crate::reference::{ReferenceData, ReferenceDataProvider};
use crate::schema::{select_schema, FieldName};
use crate::{CertificateError, CertificateResult};
use brgy_types::{CertificateTypeId, Resident};
use chrono::NaiveDate;
use std::collections::BTreeSet;

#[derive(Clone, Debug)]
struct Memo {
    form: FormState,
    today: NaiveDate,
    narrative: Narrative,
}

/// Form state and narrative for one certificate being prepared.
#[derive(Clone, Debug)]
pub struct CertificateSession<C = SystemClock> {
    reference: ReferenceData,
    form: FormState,
    clock: C,
    memo: Option<Memo>,
}

impl CertificateSession<SystemClock> {
    pub fn new(reference: ReferenceData) -> Self {
        Self::with_clock(reference, SystemClock)
    }
}

impl<C: Clock> CertificateSession<C> {
    pub fn with_clock(reference: ReferenceData, clock: C) -> Self {
        Self {
            reference,
            form: FormState::new(),
            clock,
            memo: None,
        }
    }

    /// Fetch reference data and start a session.
    ///
    /// # Errors
    ///
    /// Returns `CertificateError::ReferenceDataUnavailable` if either list cannot be fetched.
    pub async fn start(
        provider: &dyn ReferenceDataProvider,
        jurisdiction: &str,
        clock: C,
    ) -> CertificateResult<Self> {
        let reference = ReferenceData::fetch(provider, jurisdiction).await?;
        Ok(Self::with_clock(reference, clock))
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Select a certificate type, discarding everything entered so far.
    ///
    /// Returns the extra fields the type collects beyond the common ones.
    ///
    /// # Errors
    ///
    /// Returns `CertificateError::UnknownCertificateType` if no loaded type has the id.
    pub fn select_certificate_type(
        &mut self,
        id: &CertificateTypeId,
    ) -> CertificateResult<BTreeSet<FieldName>> {
        let certificate_type = self
            .reference
            .find(id)
            .ok_or_else(|| CertificateError::UnknownCertificateType(id.to_string()))?;

        let selection = select_schema(certificate_type);
        tracing::info!(
            certificate_type = %id,
            kind = ?selection.kind,
            "certificate type selected"
        );
        self.form = selection.resets;
        Ok(selection.required_extra_fields)
    }

    /// # Errors
    ///
    /// See [`FormState::with_field`]. On error the form state is unchanged.
    pub fn update_field(&mut self, field: FieldName, value: impl Into<String>) -> CertificateResult<()> {
        self.form = self.form.with_field(field, value)?;
        Ok(())
    }

    /// Like [`update_field`](Self::update_field), addressing the field by its wire name.
    ///
    /// # Errors
    ///
    /// Returns `CertificateError::UnknownField` for names outside the vocabulary.
    pub fn update_field_by_name(&mut self, name: &str, value: impl Into<String>) -> CertificateResult<()> {
        let field: FieldName = name.parse()?;
        self.update_field(field, value)
    }

    /// Copy a resident's profile into the complainant fields.
    pub fn select_complainant(&mut self, resident: &Resident) {
        self.form = self.form.with_complainant(resident);
    }

    /// Fill one person field with a resident's full name.
    pub fn select_person(&mut self, slot: PersonSlot, resident: &Resident) {
        self.form = self.form.with_person(slot, resident);
    }

    /// The narrative for the current state, recomposed only when the state or date changed.
    pub fn narrative(&mut self) -> &Narrative {
        let today = self.clock.today();
        let memo = match self.memo.take() {
            Some(memo) if memo.today == today && memo.form == self.form => memo,
            _ => {
                tracing::debug!(%today, "composing narrative");
                Memo {
                    narrative: compose(
                        self.form.certificate_type(),
                        &self.form,
                        &self.reference.officials,
                        today,
                    ),
                    form: self.form.clone(),
                    today,
                }
            }
        };
        &self.memo.insert(memo).narrative
    }

    pub fn plain_text(&mut self) -> String {
        self.narrative().plain_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::composer::Segment;
    use crate::reference::StaticProvider;
    use brgy_types::{CertificateType, NonEmptyText, Official};

    fn certificate(id: &str, name: &str, template: &str) -> CertificateType {
        CertificateType {
            id: CertificateTypeId::new(id),
            name: NonEmptyText::new(name).unwrap(),
            template: template.to_string(),
        }
    }

    fn reference() -> ReferenceData {
        ReferenceData {
            certificate_types: vec![
                certificate(
                    "1",
                    "Business Permit Certification",
                    "[BUSINESS_NAME] at [BUSINESS_ADDRESS] owned by [APPLICANT_NAME].",
                ),
                certificate(
                    "2",
                    "Death Certification",
                    "[DECEASED_NAME] died on [DATE_OF_DEATH] at [PLACE_OF_DEATH].",
                ),
            ],
            officials: vec![Official {
                full_name: NonEmptyText::new("Hon. Maria Santos").unwrap(),
                position: Some("Punong Barangay".into()),
            }],
        }
    }

    fn session() -> CertificateSession<FixedClock> {
        CertificateSession::with_clock(
            reference(),
            FixedClock(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()),
        )
    }

    #[test]
    fn prompt_before_selection() {
        let mut session = session();
        assert_eq!(session.plain_text(), "Please select a certificate type first");
    }

    #[test]
    fn switching_types_resets_entered_values() {
        let mut session = session();
        let fields = session
            .select_certificate_type(&CertificateTypeId::new("1"))
            .expect("select business");
        assert!(fields.contains(&FieldName::BusinessName));

        session
            .update_field(FieldName::BusinessName, "Aling Nena Store")
            .expect("business name");
        assert_eq!(
            session.plain_text(),
            "Aling Nena Store at [BUSINESS_ADDRESS] owned by [APPLICANT_NAME]."
        );

        let fields = session
            .select_certificate_type(&CertificateTypeId::new("2"))
            .expect("select death");
        assert!(!fields.contains(&FieldName::BusinessName));
        assert!(fields.contains(&FieldName::DateOfDeath));
        assert_eq!(session.form().value(FieldName::BusinessName), None);

        let err = session
            .update_field(FieldName::BusinessName, "Aling Nena Store")
            .unwrap_err();
        assert!(matches!(err, CertificateError::FieldNotInSchema { .. }));
        assert_eq!(
            session.plain_text(),
            "[DECEASED_NAME] died on [DATE_OF_DEATH] at [PLACE_OF_DEATH]."
        );
    }

    #[test]
    fn unknown_type_leaves_state_untouched() {
        let mut session = session();
        session
            .select_certificate_type(&CertificateTypeId::new("1"))
            .expect("select");
        session
            .update_field(FieldName::BusinessName, "Store")
            .expect("update");

        let err = session
            .select_certificate_type(&CertificateTypeId::new("99"))
            .unwrap_err();
        assert!(matches!(err, CertificateError::UnknownCertificateType(_)));
        assert_eq!(session.form().get(FieldName::BusinessName), Some("Store"));
    }

    #[test]
    fn updates_by_wire_name() {
        let mut session = session();
        session
            .select_certificate_type(&CertificateTypeId::new("2"))
            .expect("select");
        session
            .update_field_by_name("date_of_death", "2024-01-15")
            .expect("date");
        assert!(session.plain_text().contains("January 15, 2024"));

        let err = session.update_field_by_name("nickname", "x").unwrap_err();
        assert!(matches!(err, CertificateError::UnknownField(_)));
    }

    #[test]
    fn narrative_is_recomposed_after_edits() {
        let mut session = session();
        session
            .select_certificate_type(&CertificateTypeId::new("1"))
            .expect("select");
        let before = session.narrative().clone();
        assert_eq!(session.narrative(), &before);

        session
            .update_field(FieldName::ApplicantName, "Juan Dela Cruz")
            .expect("update");
        let after = session.narrative();
        assert_ne!(after, &before);
        assert!(after.segments().contains(&Segment::bold("Juan Dela Cruz")));
    }

    #[test]
    fn selecting_residents_fills_fields() {
        let resident = Resident {
            first_name: "Juan".into(),
            middle_name: Some("Reyes".into()),
            last_name: "Dela Cruz".into(),
            purok: "Purok 1".into(),
            barangay: "San Isidro".into(),
            ..Resident::default()
        };
        let mut session = session();
        session
            .select_certificate_type(&CertificateTypeId::new("1"))
            .expect("select");
        session.select_complainant(&resident);
        session.select_person(PersonSlot::Applicant, &resident);

        assert_eq!(
            session.form().get(FieldName::ComplainantName),
            Some("Juan Dela Cruz")
        );
        assert_eq!(
            session.form().get(FieldName::ApplicantName),
            Some("Juan Dela Cruz Reyes")
        );
    }

    #[tokio::test]
    async fn starts_from_provider() {
        let provider = StaticProvider {
            certificate_types: reference().certificate_types,
            officials: reference().officials,
        };
        let session = CertificateSession::start(
            &provider,
            "42",
            FixedClock(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()),
        )
        .await
        .expect("start");
        assert_eq!(session.reference().certificate_types.len(), 2);
    }
}
