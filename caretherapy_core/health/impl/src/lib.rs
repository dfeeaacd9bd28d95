use std::{sync::Arc, time::Duration};

use caretherapy_core_health_contracts::{HealthService, HealthStatus};
use caretherapy_email_contracts::EmailService;
use caretherapy_shared_contracts::time::TimeService;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::error;

pub struct HealthServiceImpl<Time, Email> {
    time: Time,
    email: Option<Email>,
    config: HealthServiceConfig,
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct HealthServiceConfig {
    pub cache_ttl: Duration,
}

#[derive(Debug, Default)]
struct State {
    cache: RwLock<Option<CachedStatus>>,
}

#[derive(Debug)]
struct CachedStatus {
    status: HealthStatus,
    timestamp: DateTime<Utc>,
}

impl<Time, Email> HealthServiceImpl<Time, Email> {
    pub fn new(time: Time, email: Option<Email>, config: HealthServiceConfig) -> Self {
        Self {
            time,
            email,
            config,
            state: Default::default(),
        }
    }
}

impl<Time, Email> HealthService for HealthServiceImpl<Time, Email>
where
    Time: TimeService,
    Email: EmailService,
{
    async fn get_status(&self) -> HealthStatus {
        let now = self.time.now();
        let cache_guard = self.state.cache.read().await;
        if let Some(cached) = cache_guard
            .as_ref()
            .filter(|c| now < c.timestamp + self.config.cache_ttl)
        {
            return cached.status;
        }
        drop(cache_guard);

        let mut cache_guard = self.state.cache.write().await;
        if let Some(cached) = cache_guard
            .as_ref()
            .filter(|c| now < c.timestamp + self.config.cache_ttl)
        {
            return cached.status;
        }

        let email = match &self.email {
            Some(email) => Some(
                email
                    .ping()
                    .await
                    .inspect_err(|err| error!("Failed to ping smtp server: {err}"))
                    .is_ok(),
            ),
            None => None,
        };

        let status = HealthStatus { email };

        cache_guard
            .insert(CachedStatus {
                status,
                timestamp: now,
            })
            .status
    }
}

#[cfg(test)]
mod tests {
    use caretherapy_email_contracts::MockEmailService;
    use caretherapy_shared_contracts::time::MockTimeService;
    use chrono::TimeDelta;

    use super::*;

    #[tokio::test]
    async fn ok() {
        // Arrange
        let time = MockTimeService::new().with_now(now());

        let mut email = MockEmailService::new();
        email
            .expect_ping()
            .once()
            .return_once(|| Box::pin(std::future::ready(Ok(()))));

        let sut = HealthServiceImpl::new(time, Some(email), config());

        // Act
        let status = sut.get_status().await;

        // Assert
        assert_eq!(status, HealthStatus { email: Some(true) });
    }

    #[tokio::test]
    async fn unhealthy_smtp_server() {
        // Arrange
        let time = MockTimeService::new().with_now(now());

        let mut email = MockEmailService::new();
        email
            .expect_ping()
            .once()
            .return_once(|| Box::pin(std::future::ready(Err(anyhow::anyhow!("timeout")))));

        let sut = HealthServiceImpl::new(time, Some(email), config());

        // Act
        let status = sut.get_status().await;

        // Assert
        assert_eq!(status, HealthStatus { email: Some(false) });
    }

    #[tokio::test]
    async fn no_email_transport_configured() {
        // Arrange
        let time = MockTimeService::new().with_now(now());

        let sut = HealthServiceImpl::<_, MockEmailService>::new(time, None, config());

        // Act
        let status = sut.get_status().await;

        // Assert
        assert_eq!(status, HealthStatus { email: None });
    }

    #[tokio::test]
    async fn cached() {
        // Arrange
        let time = MockTimeService::new()
            .with_now(now())
            .with_now(now() + TimeDelta::seconds(5));

        let mut email = MockEmailService::new();
        email
            .expect_ping()
            .once()
            .return_once(|| Box::pin(std::future::ready(Ok(()))));

        let sut = HealthServiceImpl::new(time, Some(email), config());

        // Act
        let first = sut.get_status().await;
        let second = sut.get_status().await;

        // Assert
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn cache_expired() {
        // Arrange
        let time = MockTimeService::new()
            .with_now(now())
            .with_now(now() + TimeDelta::seconds(15));

        let mut email = MockEmailService::new();
        email
            .expect_ping()
            .times(2)
            .returning(|| Box::pin(std::future::ready(Ok(()))));

        let sut = HealthServiceImpl::new(time, Some(email), config());

        // Act
        let first = sut.get_status().await;
        let second = sut.get_status().await;

        // Assert
        assert_eq!(first, second);
    }

    fn config() -> HealthServiceConfig {
        HealthServiceConfig {
            cache_ttl: Duration::from_secs(10),
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::UNIX_EPOCH + TimeDelta::days(20_000)
    }
}
