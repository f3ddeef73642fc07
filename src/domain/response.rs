use super::failure::{Failure, FailureKind};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// The only message a client ever sees for an internal fault.
pub const SERVER_ERROR_MESSAGE: &str = "There is a problem in the server side.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusClass {
    Success,
    ClientError,
    ServerError,
}

impl StatusClass {
    /// HTTP-style status code for transports that need one.
    pub fn status_code(&self) -> u16 {
        match self {
            StatusClass::Success => 200,
            StatusClass::ClientError => 400,
            StatusClass::ServerError => 500,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            StatusClass::Success => "OK",
            StatusClass::ClientError => "Bad Request",
            StatusClass::ServerError => "Internal Server Error",
        }
    }
}

/// Client-facing description of a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDescriptor {
    pub status_class: StatusClass,
    pub message: String,
    pub kind: FailureKind,
}

impl ErrorDescriptor {
    /// Translates a failure into what the client is allowed to see.
    ///
    /// Invalid input echoes the failure message so the caller can act on it.
    /// Internal faults only expose the kind and a generic message; their text,
    /// context and causes stay with the observability sink.
    pub fn from_failure(failure: &Failure) -> Self {
        match failure.kind() {
            FailureKind::InvalidInput => Self {
                status_class: StatusClass::ClientError,
                message: failure.message().to_owned(),
                kind: FailureKind::InvalidInput,
            },
            FailureKind::InternalFault => Self {
                status_class: StatusClass::ServerError,
                message: SERVER_ERROR_MESSAGE.to_owned(),
                kind: FailureKind::InternalFault,
            },
        }
    }
}

/// Outcome of one request, produced once by the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Success { value: String },
    Error(ErrorDescriptor),
}

impl Response {
    pub fn success(value: impl Into<String>) -> Self {
        Response::Success {
            value: value.into(),
        }
    }

    pub fn from_failure(failure: &Failure) -> Self {
        Response::Error(ErrorDescriptor::from_failure(failure))
    }

    pub fn status_class(&self) -> StatusClass {
        match self {
            Response::Success { .. } => StatusClass::Success,
            Response::Error(descriptor) => descriptor.status_class,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success { .. })
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Response::Success { value } => Some(value),
            Response::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorDescriptor> {
        match self {
            Response::Success { .. } => None,
            Response::Error(descriptor) => Some(descriptor),
        }
    }
}

impl Serialize for Response {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Response::Success { value } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("statusClass", &StatusClass::Success)?;
                map.serialize_entry("value", value)?;
                map.end()
            }
            Response::Error(descriptor) => descriptor.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invalid_input_is_client_error() {
        let failure = Failure::invalid_input("id should not include hyphen");
        let response = Response::from_failure(&failure);

        assert_eq!(response.status_class(), StatusClass::ClientError);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "statusClass": "ClientError",
                "message": "id should not include hyphen",
                "kind": "InvalidInput"
            })
        );
    }

    #[test]
    fn test_internal_fault_hides_detail() {
        let failure = Failure::internal_fault("db timeout")
            .with_context("host", "10.0.0.7")
            .caused_by("connection reset");
        let descriptor = ErrorDescriptor::from_failure(&failure);

        assert_eq!(descriptor.status_class, StatusClass::ServerError);
        assert_eq!(descriptor.message, SERVER_ERROR_MESSAGE);
        assert_eq!(descriptor.kind, FailureKind::InternalFault);

        let body = serde_json::to_string(&Response::Error(descriptor)).unwrap();
        assert!(!body.contains("db timeout"));
        assert!(!body.contains("10.0.0.7"));
        assert!(!body.contains("connection reset"));
    }

    #[test]
    fn test_success_shape() {
        let response = Response::success("abc1");
        assert!(response.is_success());
        assert_eq!(response.value(), Some("abc1"));
        assert!(response.error().is_none());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "statusClass": "Success", "value": "abc1" })
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(StatusClass::Success.status_code(), 200);
        assert_eq!(StatusClass::ClientError.status_code(), 400);
        assert_eq!(StatusClass::ClientError.reason(), "Bad Request");
        assert_eq!(StatusClass::ServerError.status_code(), 500);
    }
}
