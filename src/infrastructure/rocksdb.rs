use crate::domain::ports::ObservabilitySink;
use crate::domain::record::FailureRecord;
use crate::domain::request::RequestId;
use crate::error::{GuardError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column family holding one JSON failure record per request id.
pub const CF_FAILURES: &str = "failures";

/// A persistent observability sink backed by RocksDB.
///
/// Records are stored as JSON in the `failures` column family, keyed by the
/// request id bytes, so a failure can be looked up from the id a client reports.
/// Clones write to the same journal.
#[derive(Clone)]
pub struct RocksDbSink {
    db: Arc<DB>,
}

impl RocksDbSink {
    /// Opens the failure journal at `path`, creating it and the `failures` column family on first use.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_failures = ColumnFamilyDescriptor::new(CF_FAILURES, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_failures])?;

        Ok(Self { db: Arc::new(db) })
    }

    pub fn get(&self, request_id: RequestId) -> Result<Option<FailureRecord>> {
        let cf = self.failures_cf()?;
        match self.db.get_cf(&cf, request_id.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn all(&self) -> Result<Vec<FailureRecord>> {
        let cf = self.failures_cf()?;
        let mut records = Vec::new();
        for item in self.db.iterator_cf(&cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            records.push(serde_json::from_slice(&value)?);
        }
        Ok(records)
    }

    fn failures_cf(&self) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(CF_FAILURES)
            .ok_or_else(|| GuardError::SinkError("Failures column family not found".to_string()))
    }
}

#[async_trait]
impl ObservabilitySink for RocksDbSink {
    async fn record(&self, record: FailureRecord) -> Result<()> {
        let cf = self.failures_cf()?;
        let value = serde_json::to_vec(&record)?;
        self.db.put_cf(&cf, record.request_id.as_bytes(), value)?;
        Ok(())
    }
}
