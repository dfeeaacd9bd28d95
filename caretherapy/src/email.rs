use anyhow::Context;
use caretherapy_config::EmailConfig;
use caretherapy_email_impl::EmailServiceImpl;

/// Build the transport for the configured SMTP relay
pub fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    EmailServiceImpl::new(&config.smtp_url, config.from.clone())
        .context("Failed to create SMTP transport")
}
