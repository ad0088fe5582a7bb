use brochure_shared_contracts::id::IdService;
use uuid::Uuid;

/// Generates time ordered (v7) ids, so submission ids sort by arrival.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdServiceImpl;

impl IdService for IdServiceImpl {
    #[tracing::instrument(level = "trace", skip(self))]
    fn generate<I: From<Uuid> + 'static>(&self) -> I {
        Uuid::now_v7().into()
    }
}
