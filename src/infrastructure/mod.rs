//! Adapters for the domain ports: observability sinks and computation decorators.

pub mod fault;
pub mod in_memory;
#[cfg(feature = "sink-rocksdb")]
pub mod rocksdb;
pub mod tracing_sink;
