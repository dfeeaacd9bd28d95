use caretherapy_email_contracts::{
    template::ContactEmailService, ContentType, Email, EmailService,
};
use caretherapy_models::email_address::EmailAddress;
use caretherapy_templates_contracts::{
    BusinessNotificationTemplate, Template, TemplateService, UserConfirmationTemplate,
};

#[derive(Debug, Clone)]
pub struct ContactEmailServiceImpl<Email, Template> {
    email: Email,
    template: Template,
}

impl<Email, Template> ContactEmailServiceImpl<Email, Template> {
    pub fn new(email: Email, template: Template) -> Self {
        Self { email, template }
    }
}

impl<EmailS, TemplateS> ContactEmailService for ContactEmailServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    async fn send_business_notification(
        &self,
        recipient: EmailAddress,
        reply_to: EmailAddress,
        data: &BusinessNotificationTemplate,
    ) -> anyhow::Result<bool> {
        self.send_email(
            recipient,
            Some(reply_to),
            format!("[Contact Form] {}", data.subject),
            data,
        )
        .await
    }

    async fn send_user_confirmation(
        &self,
        recipient: EmailAddress,
        data: &UserConfirmationTemplate,
    ) -> anyhow::Result<bool> {
        self.send_email(
            recipient,
            None,
            format!("We received your message - {}", data.business_name),
            data,
        )
        .await
    }
}

impl<EmailS, TemplateS> ContactEmailServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    async fn send_email<T: Template + 'static>(
        &self,
        recipient: EmailAddress,
        reply_to: Option<EmailAddress>,
        subject: String,
        data: &T,
    ) -> anyhow::Result<bool> {
        self.email
            .send(Email {
                recipient,
                subject,
                body: self.template.render(data)?,
                content_type: ContentType::Html,
                reply_to,
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use caretherapy_email_contracts::MockEmailService;
    use caretherapy_templates_contracts::MockTemplateService;

    use super::*;

    #[tokio::test]
    async fn business_notification() {
        // Arrange
        let data = business_data();

        let template = MockTemplateService::new()
            .with_render(data.clone(), "<html>notification</html>".into());

        let email = MockEmailService::new().with_send(
            Email {
                recipient: "caretherapysa@gmail.com".parse().unwrap(),
                subject: "[Contact Form] General".into(),
                body: "<html>notification</html>".into(),
                content_type: ContentType::Html,
                reply_to: Some("jo@example.com".parse().unwrap()),
            },
            true,
        );

        let sut = ContactEmailServiceImpl::new(email, template);

        // Act
        let result = sut
            .send_business_notification(
                "caretherapysa@gmail.com".parse().unwrap(),
                "jo@example.com".parse().unwrap(),
                &data,
            )
            .await;

        // Assert
        assert!(result.unwrap());
    }

    #[tokio::test]
    async fn user_confirmation() {
        // Arrange
        let data = confirmation_data();

        let template = MockTemplateService::new()
            .with_render(data.clone(), "<html>confirmation</html>".into());

        let email = MockEmailService::new().with_send(
            Email {
                recipient: "jo@example.com".parse().unwrap(),
                subject: "We received your message - CARE Therapy".into(),
                body: "<html>confirmation</html>".into(),
                content_type: ContentType::Html,
                reply_to: None,
            },
            false,
        );

        let sut = ContactEmailServiceImpl::new(email, template);

        // Act
        let result = sut
            .send_user_confirmation("jo@example.com".parse().unwrap(), &data)
            .await;

        // Assert
        assert!(!result.unwrap());
    }

    fn business_data() -> BusinessNotificationTemplate {
        BusinessNotificationTemplate {
            name: "Jo Doe".into(),
            email: "jo@example.com".into(),
            phone: "Not provided".into(),
            subject: "General".into(),
            preferred_contact: "Not specified".into(),
            message: "I would like to book a session please.".into(),
            submitted_at: "2025-01-01 08:00:00 UTC".into(),
            client_key: "203.0.113.7".into(),
        }
    }

    fn confirmation_data() -> UserConfirmationTemplate {
        UserConfirmationTemplate {
            name: "Jo Doe".into(),
            message: "I would like to book a session please.".into(),
            business_name: "CARE Therapy".into(),
            business_phone: "+27 79 790 8846".into(),
            business_email: "caretherapysa@gmail.com".into(),
        }
    }
}
