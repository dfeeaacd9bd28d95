use std::{sync::Arc, time::Duration};

use caretherapy_api_rest::{RestServer, RestServerConfig};
use caretherapy_config::Config;
use caretherapy_core_contact_impl::{ContactServiceConfig, ContactServiceImpl};
use caretherapy_core_content_contracts::ContentService;
use caretherapy_core_content_impl::{ContentServiceConfig, ContentServiceImpl};
use caretherapy_core_health_impl::{HealthServiceConfig, HealthServiceImpl};
use caretherapy_email_contracts::EmailService;
use caretherapy_email_impl::template::ContactEmailServiceImpl;
use caretherapy_extern_impl::recaptcha::{RecaptchaApiServiceConfig, RecaptchaApiServiceImpl};
use caretherapy_shared_contracts::rate_limit::RateLimitService;
use caretherapy_shared_impl::{
    captcha::{CaptchaServiceConfig, CaptchaServiceImpl},
    rate_limit::{RateLimitServiceConfig, RateLimitServiceImpl},
    time::TimeServiceImpl,
};
use caretherapy_templates_impl::TemplateServiceImpl;
use tracing::{info, warn};

use crate::email;

const PRUNE_INTERVAL: Duration = Duration::from_secs(300);

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let email = match &config.email {
        Some(email_config) => {
            info!("Connecting to smtp server");
            let email = email::connect(email_config)?;
            email.ping().await?;
            Some(email)
        }
        None => {
            warn!("email transport is not configured, accepted submissions will not be forwarded");
            None
        }
    };

    if config.recaptcha.is_none() {
        warn!("recaptcha is not configured, contact form submissions will be rejected");
    }
    let captcha = CaptchaServiceImpl::new(
        RecaptchaApiServiceImpl::new(RecaptchaApiServiceConfig::new(
            config
                .recaptcha
                .as_ref()
                .and_then(|recaptcha| recaptcha.siteverify_endpoint_override.clone()),
        )),
        CaptchaServiceConfig {
            secret: config
                .recaptcha
                .as_ref()
                .map(|recaptcha| recaptcha.secret.clone()),
            min_score: config
                .recaptcha
                .as_ref()
                .and_then(|recaptcha| recaptcha.min_score),
        },
    );

    let rate_limit = Arc::new(RateLimitServiceImpl::new(
        TimeServiceImpl,
        RateLimitServiceConfig {
            max_requests: config.contact.rate_limit.max_requests,
            window: config.contact.rate_limit.window.into(),
        },
    ));
    spawn_prune_task(Arc::clone(&rate_limit));

    let contact_email = email
        .clone()
        .map(|email| ContactEmailServiceImpl::new(email, TemplateServiceImpl::default()));

    let contact = ContactServiceImpl::new(
        Arc::clone(&rate_limit),
        captcha,
        TimeServiceImpl,
        contact_email,
        ContactServiceConfig {
            inbox: config.contact.inbox.clone(),
            business_name: config.contact.business_name.clone(),
            business_phone: config.contact.business_phone.clone(),
        },
    );

    let content = ContentServiceImpl::new(ContentServiceConfig {
        posts_dir: config.content.posts_dir.clone(),
    });
    let slugs = content.list_slugs().await?;
    info!(posts = slugs.len(), "content library loaded");

    let health = HealthServiceImpl::new(
        TimeServiceImpl,
        email,
        HealthServiceConfig {
            cache_ttl: config.health.cache_ttl.into(),
        },
    );

    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    RestServer::new(
        health,
        contact,
        content,
        RestServerConfig {
            forwarded_ip_header: config.http.forwarded_ip_header,
        },
    )
    .serve(config.http.host, config.http.port)
    .await
}

fn spawn_prune_task(rate_limit: impl RateLimitService) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PRUNE_INTERVAL);
        loop {
            interval.tick().await;
            rate_limit.prune();
        }
    });
}
