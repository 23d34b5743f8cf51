//! Contact details shared by patient and professional profiles.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use uuid::Uuid;

use super::ProfileValidationError;

/// Maximum allowed length for a full name.
pub const FULL_NAME_MAX: usize = 128;
/// Minimum allowed length for a phone number.
pub const PHONE_MIN: usize = 6;
/// Maximum allowed length for a phone number.
pub const PHONE_MAX: usize = 20;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Deliberately permissive: one @ with non-blank text on both sides.
        let pattern = r"^[^@\s]+@[^@\s]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        let pattern = r"^[0-9+\-() ]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

/// Input payload for [`ProfileDetails::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDetailsDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub user_id: Uuid,
}

/// Validated contact details for a clinic profile.
///
/// ## Invariants
/// - `full_name` is trimmed, non-empty, and at most [`FULL_NAME_MAX`] chars.
/// - `email` contains exactly one `@` with non-blank text on both sides.
/// - `phone` uses digits, spaces, `+`, `-`, or parentheses, with a length
///   between [`PHONE_MIN`] and [`PHONE_MAX`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDetails {
    pub(super) full_name: String,
    pub(super) email: String,
    pub(super) phone: String,
    pub(super) birth_date: NaiveDate,
    pub(super) user_id: Uuid,
}

impl ProfileDetails {
    /// Creates validated profile details from a draft.
    pub fn new(draft: ProfileDetailsDraft) -> Result<Self, ProfileValidationError> {
        Self::try_from(draft)
    }

    /// Person's legal name as shown in the clinic record.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Contact email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Contact phone number.
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Date of birth (calendar date, no time component).
    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    /// Identity-layer account owning this profile.
    pub fn user_id(&self) -> Uuid {
        self.user_id
    }
}

impl TryFrom<ProfileDetailsDraft> for ProfileDetails {
    type Error = ProfileValidationError;

    fn try_from(draft: ProfileDetailsDraft) -> Result<Self, Self::Error> {
        let full_name = draft.full_name.trim().to_owned();
        if full_name.is_empty() {
            return Err(ProfileValidationError::EmptyFullName);
        }
        if full_name.chars().count() > FULL_NAME_MAX {
            return Err(ProfileValidationError::FullNameTooLong { max: FULL_NAME_MAX });
        }

        if !email_regex().is_match(&draft.email) {
            return Err(ProfileValidationError::InvalidEmail);
        }

        let phone_length = draft.phone.chars().count();
        if !(PHONE_MIN..=PHONE_MAX).contains(&phone_length) {
            return Err(ProfileValidationError::PhoneLengthOutOfRange {
                min: PHONE_MIN,
                max: PHONE_MAX,
            });
        }
        if !phone_regex().is_match(&draft.phone) {
            return Err(ProfileValidationError::InvalidPhoneCharacters);
        }

        Ok(Self {
            full_name,
            email: draft.email,
            phone: draft.phone,
            birth_date: draft.birth_date,
            user_id: draft.user_id,
        })
    }
}
