use std::future::Future;

use caretherapy_models::email_address::EmailAddress;
use caretherapy_templates_contracts::{BusinessNotificationTemplate, UserConfirmationTemplate};

/// Composes and sends the two contact form emails. Each call is one
/// independent dispatch; neither retries nor depends on the other.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactEmailService: Send + Sync + 'static {
    fn send_business_notification(
        &self,
        recipient: EmailAddress,
        reply_to: EmailAddress,
        data: &BusinessNotificationTemplate,
    ) -> impl Future<Output = anyhow::Result<bool>> + Send;

    fn send_user_confirmation(
        &self,
        recipient: EmailAddress,
        data: &UserConfirmationTemplate,
    ) -> impl Future<Output = anyhow::Result<bool>> + Send;
}

#[cfg(feature = "mock")]
impl MockContactEmailService {
    pub fn with_send_business_notification(
        mut self,
        recipient: EmailAddress,
        reply_to: EmailAddress,
        data: BusinessNotificationTemplate,
        result: anyhow::Result<bool>,
    ) -> Self {
        self.expect_send_business_notification()
            .once()
            .with(
                mockall::predicate::eq(recipient),
                mockall::predicate::eq(reply_to),
                mockall::predicate::eq(data),
            )
            .return_once(move |_, _, _| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_send_user_confirmation(
        mut self,
        recipient: EmailAddress,
        data: UserConfirmationTemplate,
        result: anyhow::Result<bool>,
    ) -> Self {
        self.expect_send_user_confirmation()
            .once()
            .with(
                mockall::predicate::eq(recipient),
                mockall::predicate::eq(data),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(result)));
        self
    }
}
