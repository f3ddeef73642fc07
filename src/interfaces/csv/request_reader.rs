use crate::domain::request::Request;
use crate::error::{GuardError, Result};
use serde::Deserialize;
use std::io::Read;

/// One row of a request batch, before any validation.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct RawRequest {
    pub id: String,
}

impl From<RawRequest> for Request {
    fn from(raw: RawRequest) -> Self {
        Request::new(raw.id)
    }
}

/// Reads request ids from a CSV source with an `id` header column.
///
/// Wraps `csv::Reader` and yields `Result<RawRequest>`. Whitespace is trimmed and
/// extra columns are tolerated; rows that cannot be read surface as errors
/// instead of being dropped.
pub struct RequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RequestReader<R> {
    /// Creates a new `RequestReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily reads and deserializes the rows.
    pub fn requests(self) -> impl Iterator<Item = Result<RawRequest>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(GuardError::from))
    }
}
