use caretherapy_core_contact_contracts::{ContactService, ContactSubmitError};
use caretherapy_email_contracts::template::ContactEmailService;
use caretherapy_models::{
    contact::{ClientKey, ContactSubmission, ContactSubmissionDraft},
    email_address::EmailAddress,
};
use caretherapy_shared_contracts::{
    captcha::{CaptchaCheckError, CaptchaService},
    rate_limit::RateLimitService,
    time::TimeService,
};
use caretherapy_templates_contracts::{BusinessNotificationTemplate, UserConfirmationTemplate};

pub struct ContactServiceImpl<RateLimit, Captcha, Time, ContactEmail> {
    rate_limit: RateLimit,
    captcha: Captcha,
    time: Time,
    contact_email: Option<ContactEmail>,
    config: ContactServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    pub inbox: EmailAddress,
    pub business_name: String,
    pub business_phone: String,
}

impl<RateLimit, Captcha, Time, ContactEmail>
    ContactServiceImpl<RateLimit, Captcha, Time, ContactEmail>
{
    pub fn new(
        rate_limit: RateLimit,
        captcha: Captcha,
        time: Time,
        contact_email: Option<ContactEmail>,
        config: ContactServiceConfig,
    ) -> Self {
        Self {
            rate_limit,
            captcha,
            time,
            contact_email,
            config,
        }
    }
}

impl<RateLimit, Captcha, Time, ContactEmail> ContactService
    for ContactServiceImpl<RateLimit, Captcha, Time, ContactEmail>
where
    RateLimit: RateLimitService,
    Captcha: CaptchaService,
    Time: TimeService,
    ContactEmail: ContactEmailService,
{
    async fn submit(
        &self,
        draft: ContactSubmissionDraft,
        client: ClientKey,
    ) -> Result<ContactSubmission, ContactSubmitError> {
        if !self.captcha.is_configured() {
            return Err(ContactSubmitError::NotConfigured);
        }

        if !self.rate_limit.check(&client) {
            tracing::warn!(%client, "submission rejected by rate limiter");
            return Err(ContactSubmitError::RateLimited);
        }

        let submission = draft.validate().map_err(ContactSubmitError::Validation)?;

        self.captcha
            .check(&submission.verification_token)
            .await
            .map_err(|err| match err {
                CaptchaCheckError::Failed => ContactSubmitError::VerificationFailed,
                CaptchaCheckError::NotConfigured => ContactSubmitError::NotConfigured,
                CaptchaCheckError::Other(err) => err.into(),
            })?;

        self.dispatch(&submission, &client).await;

        Ok(submission)
    }
}

impl<RateLimit, Captcha, Time, ContactEmail>
    ContactServiceImpl<RateLimit, Captcha, Time, ContactEmail>
where
    Time: TimeService,
    ContactEmail: ContactEmailService,
{
    /// Sends the business notification and the submitter confirmation.
    /// The submission has already been accepted at this point, so failures
    /// only surface in the logs.
    async fn dispatch(&self, submission: &ContactSubmission, client: &ClientKey) {
        let Some(contact_email) = &self.contact_email else {
            tracing::error!(
                %client,
                "email transport is not configured, submission accepted without notification"
            );
            return;
        };

        let notification = BusinessNotificationTemplate {
            name: submission.name.clone().into_inner(),
            email: submission.email.as_str().into(),
            phone: submission
                .phone
                .as_ref()
                .map(|phone| phone.clone().into_inner())
                .unwrap_or_else(|| "Not provided".into()),
            subject: submission.subject.clone().into_inner(),
            preferred_contact: submission
                .preferred_contact
                .as_ref()
                .map(|preferred| preferred.to_string())
                .unwrap_or_else(|| "Not specified".into()),
            message: submission.message.clone().into_inner(),
            submitted_at: self
                .time
                .now()
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            client_key: client.clone().into_inner(),
        };
        match contact_email
            .send_business_notification(
                self.config.inbox.clone(),
                submission.email.clone(),
                &notification,
            )
            .await
        {
            Ok(true) => {}
            Ok(false) => tracing::error!("transport refused the business notification"),
            Err(err) => tracing::error!("failed to send business notification: {err:#}"),
        }

        let confirmation = UserConfirmationTemplate {
            name: submission.name.clone().into_inner(),
            message: submission.message.clone().into_inner(),
            business_name: self.config.business_name.clone(),
            business_phone: self.config.business_phone.clone(),
            business_email: self.config.inbox.as_str().into(),
        };
        match contact_email
            .send_user_confirmation(submission.email.clone(), &confirmation)
            .await
        {
            Ok(true) => {}
            Ok(false) => tracing::error!("transport refused the submitter confirmation"),
            Err(err) => tracing::error!("failed to send submitter confirmation: {err:#}"),
        }
    }
}
