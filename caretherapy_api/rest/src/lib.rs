use std::{net::IpAddr, sync::Arc};

use axum::Router;
use caretherapy_core_contact_contracts::ContactService;
use caretherapy_core_content_contracts::ContentService;
use caretherapy_core_health_contracts::HealthService;
use caretherapy_utils::Apply;
use tokio::net::TcpListener;

mod middlewares;
mod models;
mod routes;


pub struct RestServer<Health, Contact, Content> {
    health: Health,
    contact: Contact,
    content: Content,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    /// Name of the header carrying the forwarded client address, used to
    /// derive the rate limit key.
    pub forwarded_ip_header: String,
}

impl<Health, Contact, Content> RestServer<Health, Contact, Content>
where
    Health: HealthService,
    Contact: ContactService,
    Content: ContentService,
{
    pub fn new(health: Health, contact: Contact, content: Content, config: RestServerConfig) -> Self {
        Self {
            health,
            contact,
            content,
            config,
        }
    }

    pub async fn serve(self, host: IpAddr, port: u16) -> anyhow::Result<()> {
        let listener = TcpListener::bind((host, port)).await?;
        tracing::info!(%host, port, "listening");
        axum::serve(listener, self.router()).await.map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        let forwarded_ip_header: Arc<str> = self.config.forwarded_ip_header.into();
        Router::new()
            .merge(routes::health::router(self.health.into()))
            .merge(routes::contact::router(self.contact.into()))
            .merge(routes::content::router(self.content.into()))
            .apply(middlewares::trace::add)
            .apply(middlewares::request_id::add)
            .apply(middlewares::client_key::add(forwarded_ip_header))
            .apply(middlewares::panic_handler::add)
    }
}
