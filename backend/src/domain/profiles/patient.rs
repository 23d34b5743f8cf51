//! Patient profile aggregate.

use uuid::Uuid;

use super::{ProfileDetails, ProfileDetailsDraft, ProfileValidationError};

/// Input payload for [`Patient::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientDraft {
    pub id: Uuid,
    pub details: ProfileDetailsDraft,
    pub professional_id: Uuid,
    pub clinical_history_status: bool,
}

/// A patient registered with the clinic.
///
/// `clinical_history_status` records whether the patient's clinical history
/// has been completed. New registrations always start with the flag unset;
/// the command service enforces that rule, while this aggregate merely
/// carries the stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    pub(super) id: Uuid,
    pub(super) details: ProfileDetails,
    pub(super) professional_id: Uuid,
    pub(super) clinical_history_status: bool,
}

impl Patient {
    /// Creates a validated patient from a draft.
    pub fn new(draft: PatientDraft) -> Result<Self, ProfileValidationError> {
        Self::try_from(draft)
    }

    /// Stable patient identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Validated contact details.
    pub fn details(&self) -> &ProfileDetails {
        &self.details
    }

    /// Professional responsible for this patient.
    pub fn professional_id(&self) -> Uuid {
        self.professional_id
    }

    /// Whether the clinical history has been completed.
    pub fn clinical_history_status(&self) -> bool {
        self.clinical_history_status
    }
}

impl TryFrom<PatientDraft> for Patient {
    type Error = ProfileValidationError;

    fn try_from(draft: PatientDraft) -> Result<Self, Self::Error> {
        let details = ProfileDetails::new(draft.details)?;
        Ok(Self {
            id: draft.id,
            details,
            professional_id: draft.professional_id,
            clinical_history_status: draft.clinical_history_status,
        })
    }
}
