use crate::domain::failure::FailureKind;
use crate::domain::ports::ObservabilitySink;
use crate::domain::record::FailureRecord;
use crate::error::Result;
use async_trait::async_trait;

/// Emits each failure record as a structured `tracing` event.
///
/// Internal faults are logged at error level, client errors at warn level.
/// This is the sink the CLI uses unless persistent storage is requested.
#[derive(Debug, Default, Clone)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ObservabilitySink for TracingSink {
    async fn record(&self, record: FailureRecord) -> Result<()> {
        let context = serde_json::to_string(&record.context)?;
        let causes = record.cause_messages().join(" <- ");
        match record.kind {
            FailureKind::InternalFault => tracing::error!(
                request_id = %record.request_id,
                kind = %record.kind,
                context = %context,
                causes = %causes,
                "{}",
                record.message
            ),
            FailureKind::InvalidInput => tracing::warn!(
                request_id = %record.request_id,
                kind = %record.kind,
                context = %context,
                causes = %causes,
                "{}",
                record.message
            ),
        }
        Ok(())
    }
}
