use caretherapy_models::contact::{ContactSubmission, ContactSubmissionDraft, FieldError};
use serde::{Deserialize, Serialize};

/// The raw request body. Every field is optional at this level so that a
/// missing field surfaces as a validation error instead of a
/// deserialization failure.
///
/// Limits: name 2-100 characters, subject 1-256, message 10-1000, phone a
/// South African number, `preferredContact` one of `email`/`phone`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub preferred_contact: Option<String>,
    #[serde(default)]
    pub verification_token: String,
}

impl From<ApiContactRequest> for ContactSubmissionDraft {
    fn from(value: ApiContactRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            phone: value.phone,
            subject: value.subject,
            message: value.message,
            preferred_contact: value.preferred_contact,
            verification_token: value.verification_token,
        }
    }
}

#[derive(Serialize)]
pub struct ApiContactResponse {
    pub message: &'static str,
    pub data: ApiContactResponseData,
}

#[derive(Serialize)]
pub struct ApiContactResponseData {
    pub name: String,
    pub email: String,
}

impl From<ContactSubmission> for ApiContactResponse {
    fn from(value: ContactSubmission) -> Self {
        Self {
            message: "Form submitted successfully!",
            data: ApiContactResponseData {
                name: value.name.into_inner(),
                email: value.email.to_string(),
            },
        }
    }
}

#[derive(Serialize)]
pub struct ApiValidationError {
    pub error: &'static str,
    pub details: Vec<FieldError>,
}

impl ApiValidationError {
    pub fn new(details: Vec<FieldError>) -> Self {
        Self {
            error: "Validation failed",
            details,
        }
    }
}
