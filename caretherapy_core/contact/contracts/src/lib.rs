use std::future::Future;

use caretherapy_models::contact::{
    ClientKey, ContactSubmission, ContactSubmissionDraft, FieldError,
};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactService: Send + Sync + 'static {
    /// Runs a contact form submission through the full pipeline: config
    /// check, rate limit, validation, bot verification and finally email
    /// dispatch. Dispatch failures are logged but do not fail the
    /// submission.
    fn submit(
        &self,
        draft: ContactSubmissionDraft,
        client: ClientKey,
    ) -> impl Future<Output = Result<ContactSubmission, ContactSubmitError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error("The submission contains invalid fields.")]
    Validation(Vec<FieldError>),
    #[error("The client has exceeded the submission rate limit.")]
    RateLimited,
    #[error("The verification response is invalid or the user is probably not human.")]
    VerificationFailed,
    #[error("The server is missing required configuration.")]
    NotConfigured,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactService {
    pub fn with_submit(
        mut self,
        draft: ContactSubmissionDraft,
        client: ClientKey,
        result: Result<ContactSubmission, ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(
                mockall::predicate::eq(draft),
                mockall::predicate::eq(client),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(result)));
        self
    }
}
