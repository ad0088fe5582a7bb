use std::sync::Arc;

use brochure_core_health_contracts::{HealthFeatureService, HealthStatus};
use brochure_shared_contracts::time::TimeService;

#[derive(Debug, Clone)]
pub struct HealthFeatureServiceImpl<Time> {
    pub time: Time,
    pub config: HealthFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct HealthFeatureConfig {
    pub service_name: Arc<str>,
}

impl<Time> HealthFeatureService for HealthFeatureServiceImpl<Time>
where
    Time: TimeService,
{
    async fn get_status(&self) -> HealthStatus {
        HealthStatus {
            service: Arc::clone(&self.config.service_name),
            timestamp: self.time.now(),
        }
    }
}
