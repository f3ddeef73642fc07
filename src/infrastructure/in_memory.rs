use crate::domain::ports::ObservabilitySink;
use crate::domain::record::FailureRecord;
use crate::domain::request::RequestId;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory observability sink.
///
/// Clones share the same buffer, so a test can hand one clone to the boundary
/// and inspect what was recorded through another.
#[derive(Default, Clone)]
pub struct InMemorySink {
    records: Arc<RwLock<Vec<FailureRecord>>>,
}

impl InMemorySink {
    /// Creates a new, empty in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far, in arrival order.
    pub async fn records(&self) -> Vec<FailureRecord> {
        self.records.read().await.clone()
    }

    pub async fn find(&self, request_id: RequestId) -> Option<FailureRecord> {
        let records = self.records.read().await;
        records.iter().find(|r| r.request_id == request_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ObservabilitySink for InMemorySink {
    async fn record(&self, record: FailureRecord) -> Result<()> {
        let mut records = self.records.write().await;
        records.push(record);
        Ok(())
    }
}
