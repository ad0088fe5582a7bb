use brochure_shared_contracts::time::TimeService;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, Default)]
pub struct TimeServiceImpl;

impl TimeService for TimeServiceImpl {
    #[tracing::instrument(level = "trace", skip(self), ret)]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
