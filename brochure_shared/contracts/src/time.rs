use chrono::{DateTime, Utc};

/// Clock used for submission and health timestamps.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TimeService: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

#[cfg(feature = "mock")]
impl MockTimeService {
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.expect_now().once().return_const(now);
        self
    }
}
