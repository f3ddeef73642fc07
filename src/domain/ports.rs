use super::failure::Failure;
use super::identifier::ValidatedId;
use super::record::FailureRecord;
use crate::error::Result;
use async_trait::async_trait;

/// The computation layer: domain logic with no knowledge of response shapes.
#[async_trait]
pub trait Computation: Send + Sync {
    async fn compute(&self, id: &ValidatedId) -> std::result::Result<String, Failure>;
}

/// Receives the full detail of failures the boundary translated.
#[async_trait]
pub trait ObservabilitySink: Send + Sync {
    async fn record(&self, record: FailureRecord) -> Result<()>;
}

pub type ComputationBox = Box<dyn Computation>;
pub type SinkBox = Box<dyn ObservabilitySink>;
