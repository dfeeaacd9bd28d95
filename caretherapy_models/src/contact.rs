use std::{str::FromStr, sync::LazyLock};

use nutype::nutype;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::email_address::EmailAddress;

/// A contact form submission as received from the client, before any rule
/// has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactSubmissionDraft {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub preferred_contact: Option<String>,
    pub verification_token: String,
}

/// A fully validated and normalized contact form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: SubmitterName,
    pub email: EmailAddress,
    pub phone: Option<PhoneNumber>,
    pub subject: MessageSubject,
    pub message: MessageBody,
    pub preferred_contact: Option<PreferredContact>,
    pub verification_token: RecaptchaToken,
}

#[nutype(
    sanitize(trim),
    validate(len_char_min = 2, len_char_max = 100),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct SubmitterName(String);

#[nutype(
    sanitize(trim, with = |s: String| s.replace([' ', '-', '(', ')'], "")),
    validate(regex = PHONE_NUMBER_REGEX),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct PhoneNumber(String);

pub static PHONE_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\+27|0)[1-9][0-9]{8}$").unwrap());

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct MessageSubject(String);

#[nutype(
    sanitize(trim),
    validate(len_char_min = 10, len_char_max = 1000),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct MessageBody(String);

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 2048),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct RecaptchaToken(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredContact {
    Email,
    Phone,
}

impl FromStr for PreferredContact {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for PreferredContact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Email => "email".fmt(f),
            Self::Phone => "phone".fmt(f),
        }
    }
}

/// The identifier used to bucket rate limit counts, derived from the
/// forwarded address of the client.
#[nutype(
    sanitize(trim),
    derive(Debug, Clone, PartialEq, Eq, Hash, Deref, From, Display, Serialize, Deserialize)
)]
pub struct ClientKey(String);

impl ClientKey {
    pub fn unknown() -> Self {
        Self::new("unknown")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ContactSubmissionDraft {
    /// Validates every field and returns either the normalized submission or
    /// the full list of field errors. No field is checked against anything
    /// but its own format rules, so a failed validation has no side effects.
    pub fn validate(self) -> Result<ContactSubmission, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = checked(
            &mut errors,
            "name",
            "must be between 2 and 100 characters",
            SubmitterName::try_new(self.name),
        );
        let email = checked(
            &mut errors,
            "email",
            "must be a valid email address",
            self.email.trim().parse::<EmailAddress>(),
        );
        let phone = match optional(self.phone) {
            Some(phone) => checked(
                &mut errors,
                "phone",
                "must be a valid South African phone number",
                PhoneNumber::try_new(phone),
            )
            .map(Some),
            None => Some(None),
        };
        let subject = checked(
            &mut errors,
            "subject",
            "must be between 1 and 256 characters",
            MessageSubject::try_new(self.subject),
        );
        let message = checked(
            &mut errors,
            "message",
            "must be between 10 and 1000 characters",
            MessageBody::try_new(self.message),
        );
        let preferred_contact = match optional(self.preferred_contact) {
            Some(preferred) => checked(
                &mut errors,
                "preferredContact",
                "must be either \"email\" or \"phone\"",
                preferred.parse::<PreferredContact>(),
            )
            .map(Some),
            None => Some(None),
        };
        let verification_token = checked(
            &mut errors,
            "verificationToken",
            "must not be empty",
            RecaptchaToken::try_new(self.verification_token),
        );

        match (
            name,
            email,
            phone,
            subject,
            message,
            preferred_contact,
            verification_token,
        ) {
            (
                Some(name),
                Some(email),
                Some(phone),
                Some(subject),
                Some(message),
                Some(preferred_contact),
                Some(verification_token),
            ) if errors.is_empty() => Ok(ContactSubmission {
                name,
                email,
                phone,
                subject,
                message,
                preferred_contact,
                verification_token,
            }),
            _ => Err(errors),
        }
    }
}

impl ContactSubmission {
    /// Turns the normalized submission back into a draft. Validating the
    /// result yields the identical submission again.
    pub fn to_draft(&self) -> ContactSubmissionDraft {
        ContactSubmissionDraft {
            name: self.name.clone().into_inner(),
            email: self.email.to_string(),
            phone: self.phone.clone().map(PhoneNumber::into_inner),
            subject: self.subject.clone().into_inner(),
            message: self.message.clone().into_inner(),
            preferred_contact: self.preferred_contact.map(|p| p.to_string()),
            verification_token: self.verification_token.clone().into_inner(),
        }
    }
}

fn checked<T, E>(
    errors: &mut Vec<FieldError>,
    field: &str,
    message: &str,
    result: Result<T, E>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(FieldError::new(field, message));
            None
        }
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn valid_draft() {
        let submission = draft().validate().unwrap();
        assert_eq!(*submission.name, "Jo Doe");
        assert_eq!(submission.email.as_str(), "jo@example.com");
        assert_eq!(submission.phone, None);
        assert_eq!(*submission.subject, "General");
        assert_eq!(*submission.message, "I would like to book a session please.");
        assert_eq!(submission.preferred_contact, None);
        assert_eq!(*submission.verification_token, "tok123");
    }

    #[test]
    fn normalizes_optional_fields() {
        let submission = ContactSubmissionDraft {
            phone: Some("+27 79 790-8846".into()),
            preferred_contact: Some("Phone".into()),
            ..draft()
        }
        .validate()
        .unwrap();
        assert_eq!(submission.phone.as_deref().map(String::as_str), Some("+27797908846"));
        assert_eq!(submission.preferred_contact, Some(PreferredContact::Phone));
    }

    #[test]
    fn empty_optional_fields_are_absent() {
        let submission = ContactSubmissionDraft {
            phone: Some("  ".into()),
            preferred_contact: Some(String::new()),
            ..draft()
        }
        .validate()
        .unwrap();
        assert_eq!(submission.phone, None);
        assert_eq!(submission.preferred_contact, None);
    }

    #[test]
    fn name_too_short() {
        let errors = ContactSubmissionDraft {
            name: "J".into(),
            ..draft()
        }
        .validate()
        .unwrap_err();
        assert_eq!(fields(&errors), ["name"]);
    }

    #[test]
    fn message_out_of_bounds() {
        for message in ["short", &"x".repeat(1001)] {
            let errors = ContactSubmissionDraft {
                message: message.into(),
                ..draft()
            }
            .validate()
            .unwrap_err();
            assert_eq!(fields(&errors), ["message"]);
        }
    }

    #[test]
    fn invalid_email_and_phone() {
        let errors = ContactSubmissionDraft {
            email: "not-an-email".into(),
            phone: Some("12345".into()),
            ..draft()
        }
        .validate()
        .unwrap_err();
        assert_eq!(fields(&errors), ["email", "phone"]);
    }

    #[test]
    fn invalid_preferred_contact() {
        let errors = ContactSubmissionDraft {
            preferred_contact: Some("fax".into()),
            ..draft()
        }
        .validate()
        .unwrap_err();
        assert_eq!(fields(&errors), ["preferredContact"]);
    }

    #[test]
    fn missing_verification_token() {
        let errors = ContactSubmissionDraft {
            verification_token: "  ".into(),
            ..draft()
        }
        .validate()
        .unwrap_err();
        assert_eq!(fields(&errors), ["verificationToken"]);
    }

    #[test]
    fn all_errors_are_reported_at_once() {
        let errors = ContactSubmissionDraft::default().validate().unwrap_err();
        assert_eq!(
            fields(&errors),
            ["name", "email", "subject", "message", "verificationToken"]
        );
    }

    #[test]
    fn validation_is_idempotent() {
        let submission = ContactSubmissionDraft {
            name: "  Jo Doe  ".into(),
            phone: Some("079 790 8846".into()),
            preferred_contact: Some("EMAIL".into()),
            ..draft()
        }
        .validate()
        .unwrap();

        let revalidated = submission.to_draft().validate().unwrap();
        assert_eq!(revalidated, submission);
    }

    #[test]
    fn field_error_serialization() {
        let errors = ContactSubmissionDraft {
            name: "J".into(),
            preferred_contact: Some("fax".into()),
            ..draft()
        }
        .validate()
        .unwrap_err();

        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!([
                {"field": "name", "message": "must be between 2 and 100 characters"},
                {"field": "preferredContact", "message": "must be either \"email\" or \"phone\""},
            ])
        );
    }

    #[test]
    fn preferred_contact_serialization() {
        assert_eq!(
            serde_json::to_value(PreferredContact::Email).unwrap(),
            serde_json::json!("email")
        );
        assert_eq!(
            serde_json::from_str::<PreferredContact>("\"phone\"").unwrap(),
            PreferredContact::Phone
        );
    }

    fn draft() -> ContactSubmissionDraft {
        ContactSubmissionDraft {
            name: "Jo Doe".into(),
            email: "jo@example.com".into(),
            phone: None,
            subject: "General".into(),
            message: "I would like to book a session please.".into(),
            preferred_contact: None,
            verification_token: "tok123".into(),
        }
    }

    fn fields(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }
}
