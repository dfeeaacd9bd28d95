use caretherapy_models::contact::ClientKey;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait RateLimitService: Send + Sync + 'static {
    /// Records an attempt for the given client and reports whether it is
    /// still within the current window. Denied attempts are not recorded.
    fn check(&self, key: &ClientKey) -> bool;

    /// Drops all windows that have already expired.
    fn prune(&self);
}

impl<T: RateLimitService> RateLimitService for std::sync::Arc<T> {
    fn check(&self, key: &ClientKey) -> bool {
        (**self).check(key)
    }

    fn prune(&self) {
        (**self).prune()
    }
}

#[cfg(feature = "mock")]
impl MockRateLimitService {
    pub fn with_check(mut self, key: ClientKey, allowed: bool) -> Self {
        self.expect_check()
            .once()
            .with(mockall::predicate::eq(key))
            .return_const(allowed);
        self
    }
}
