use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
    time::Duration,
};

use caretherapy_models::contact::ClientKey;
use caretherapy_shared_contracts::{rate_limit::RateLimitService, time::TimeService};
use chrono::{DateTime, Utc};

/// Fixed window rate limiter. Each client gets a window starting at its
/// first attempt; once `max_requests` attempts have been recorded, further
/// attempts are denied until the window has fully elapsed.
pub struct RateLimitServiceImpl<Time> {
    time: Time,
    config: RateLimitServiceConfig,
    windows: Mutex<HashMap<ClientKey, Window>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitServiceConfig {
    pub max_requests: u32,
    pub window: Duration,
}

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    started_at: DateTime<Utc>,
}

impl<Time> RateLimitServiceImpl<Time> {
    pub fn new(time: Time, config: RateLimitServiceConfig) -> Self {
        Self {
            time,
            config,
            windows: Default::default(),
        }
    }

    fn expired(&self, window: &Window, now: DateTime<Utc>) -> bool {
        (now - window.started_at).to_std().unwrap_or_default() >= self.config.window
    }
}

impl<Time> RateLimitService for RateLimitServiceImpl<Time>
where
    Time: TimeService,
{
    fn check(&self, key: &ClientKey) -> bool {
        let now = self.time.now();
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let window = windows.entry(key.clone()).or_insert(Window {
            count: 0,
            started_at: now,
        });
        if self.expired(window, now) {
            *window = Window {
                count: 0,
                started_at: now,
            };
        }

        if window.count >= self.config.max_requests {
            return false;
        }
        window.count += 1;
        true
    }

    fn prune(&self) {
        let now = self.time.now();
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let before = windows.len();
        windows.retain(|_, window| !self.expired(window, now));
        let pruned = before - windows.len();
        if pruned > 0 {
            tracing::debug!(pruned, remaining = windows.len(), "pruned expired windows");
        }
    }
}
