use crate::domain::failure::Failure;
use crate::domain::identifier::ValidatedId;
use crate::domain::ports::{Computation, ComputationBox};
use async_trait::async_trait;
use std::collections::HashSet;
use std::io;

/// Wraps a computation and makes it fail for a chosen set of ids.
///
/// The injected failure is an `InternalFault` whose cause is a timed-out IO
/// error, which is what a lost database connection looks like from here.
pub struct FaultInjector {
    inner: ComputationBox,
    fault_ids: HashSet<String>,
}

impl FaultInjector {
    pub fn new<I, S>(inner: ComputationBox, fault_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner,
            fault_ids: fault_ids.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl Computation for FaultInjector {
    async fn compute(&self, id: &ValidatedId) -> Result<String, Failure> {
        if self.fault_ids.contains(id.as_str()) {
            return Err(Failure::internal_fault("identifier lookup failed")
                .with_context("id", id.as_str())
                .caused_by(io::Error::new(io::ErrorKind::TimedOut, "db timeout")));
        }
        self.inner.compute(id).await
    }
}
