use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Correlates a request with whatever the observability sink recorded for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single incoming request, exactly as the caller supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub request_id: RequestId,
    pub id: String,
}

impl Request {
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_request_id(RequestId::new(), id)
    }

    pub fn with_request_id(request_id: RequestId, id: impl Into<String>) -> Self {
        Self {
            request_id,
            id: id.into(),
        }
    }
}
