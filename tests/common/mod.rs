use async_trait::async_trait;
use idguard::domain::failure::Failure;
use idguard::domain::identifier::ValidatedId;
use idguard::domain::ports::{Computation, ObservabilitySink};
use idguard::domain::record::FailureRecord;
use idguard::error::{GuardError, Result};
use std::fs::File;
use std::io::Error;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Echoes the id back and counts how often it was called.
#[derive(Clone, Default)]
pub struct CountingComputation {
    calls: Arc<AtomicUsize>,
}

impl CountingComputation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Computation for CountingComputation {
    async fn compute(&self, id: &ValidatedId) -> std::result::Result<String, Failure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(id.as_str().to_owned())
    }
}

/// Returns a value that differs from the id it was given.
pub struct CanonicalComputation;

#[async_trait]
impl Computation for CanonicalComputation {
    async fn compute(&self, id: &ValidatedId) -> std::result::Result<String, Failure> {
        Ok(format!("canonical:{}", id.as_str()))
    }
}

/// Always fails with whatever the closure builds.
pub struct FailingComputation<F>(pub F);

#[async_trait]
impl<F> Computation for FailingComputation<F>
where
    F: Fn(&ValidatedId) -> Failure + Send + Sync,
{
    async fn compute(&self, id: &ValidatedId) -> std::result::Result<String, Failure> {
        Err((self.0)(id))
    }
}

/// A sink that cannot record anything.
pub struct BrokenSink;

#[async_trait]
impl ObservabilitySink for BrokenSink {
    async fn record(&self, _record: FailureRecord) -> Result<()> {
        Err(GuardError::SinkError("journal unavailable".to_string()))
    }
}

pub fn generate_csv(path: &Path, ids: &[&str]) -> std::result::Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["id"])?;
    for id in ids {
        wtr.write_record([id])?;
    }

    wtr.flush()?;
    Ok(())
}
