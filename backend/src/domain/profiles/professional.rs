//! Professional profile aggregate.

use uuid::Uuid;

use super::{ProfileDetails, ProfileDetailsDraft, ProfileValidationError};

/// Input payload for [`Professional::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfessionalDraft {
    pub id: Uuid,
    pub details: ProfileDetailsDraft,
}

/// A clinician practising at the clinic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Professional {
    pub(super) id: Uuid,
    pub(super) details: ProfileDetails,
}

impl Professional {
    /// Creates a validated professional from a draft.
    pub fn new(draft: ProfessionalDraft) -> Result<Self, ProfileValidationError> {
        Self::try_from(draft)
    }

    /// Stable professional identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Validated contact details.
    pub fn details(&self) -> &ProfileDetails {
        &self.details
    }
}

impl TryFrom<ProfessionalDraft> for Professional {
    type Error = ProfileValidationError;

    fn try_from(draft: ProfessionalDraft) -> Result<Self, Self::Error> {
        let details = ProfileDetails::new(draft.details)?;
        Ok(Self {
            id: draft.id,
            details,
        })
    }
}
