//! Patient and professional profile aggregates.
//!
//! Both roles share the same validated contact details; patients additionally
//! carry their assigned professional and a clinical-history flag. Constructors
//! go through draft types so adapters can assemble raw input and receive a
//! typed validation error instead of a half-built aggregate.

use std::fmt;

mod details;
mod patient;
mod professional;

pub use details::{
    FULL_NAME_MAX, PHONE_MAX, PHONE_MIN, ProfileDetails, ProfileDetailsDraft,
};
pub use patient::{Patient, PatientDraft};
pub use professional::{Professional, ProfessionalDraft};

/// Validation errors raised by profile constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    EmptyFullName,
    FullNameTooLong { max: usize },
    InvalidEmail,
    InvalidPhoneCharacters,
    PhoneLengthOutOfRange { min: usize, max: usize },
}

impl fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFullName => write!(f, "full name must not be empty"),
            Self::FullNameTooLong { max } => {
                write!(f, "full name must be at most {max} characters")
            }
            Self::InvalidEmail => {
                write!(f, "email must contain a single @ with text on both sides")
            }
            Self::InvalidPhoneCharacters => write!(
                f,
                "phone may only contain digits, spaces, +, -, or parentheses",
            ),
            Self::PhoneLengthOutOfRange { min, max } => {
                write!(f, "phone must be between {min} and {max} characters")
            }
        }
    }
}

impl std::error::Error for ProfileValidationError {}
