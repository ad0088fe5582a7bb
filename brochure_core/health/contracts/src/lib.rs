use std::{future::Future, sync::Arc};

use chrono::{DateTime, Utc};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait HealthFeatureService: Send + Sync + 'static {
    fn get_status(&self) -> impl Future<Output = HealthStatus> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub service: Arc<str>,
    pub timestamp: DateTime<Utc>,
}

#[cfg(feature = "mock")]
impl MockHealthFeatureService {
    pub fn with_get_status(mut self, status: HealthStatus) -> Self {
        self.expect_get_status()
            .once()
            .return_once(move || Box::pin(std::future::ready(status)));
        self
    }
}
