use uuid::Uuid;

/// Source of identifiers handed out to accepted submissions.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait IdService: Send + Sync + 'static {
    /// Returns a fresh, time ordered id wrapped in `I`.
    fn generate<I: From<Uuid> + 'static>(&self) -> I;
}

#[cfg(feature = "mock")]
impl MockIdService {
    pub fn with_generate<I: From<Uuid> + Send + 'static>(mut self, id: I) -> Self {
        self.expect_generate().once().return_once(|| id);
        self
    }
}
