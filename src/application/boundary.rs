use crate::domain::failure::{Failure, FailureKind};
use crate::domain::identifier::ValidatedId;
use crate::domain::ports::{ComputationBox, SinkBox};
use crate::domain::record::FailureRecord;
use crate::domain::request::{Request, RequestId};
use crate::domain::response::Response;

/// Where a request is in its trip through the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Received,
    Validating,
    Rejected,
    Invoking,
    Succeeded,
    Failed,
    Responded,
}

impl RequestState {
    pub fn can_advance_to(&self, next: RequestState) -> bool {
        use RequestState::*;
        matches!(
            (self, next),
            (Received, Validating)
                | (Validating, Rejected)
                | (Validating, Invoking)
                | (Invoking, Succeeded)
                | (Invoking, Failed)
                | (Succeeded, Responded)
                | (Failed, Responded)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestState::Rejected | RequestState::Responded)
    }
}

/// Library-side settings for the boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundaryConfig {
    /// Send `InvalidInput` failures to the sink as well. Internal faults are always recorded.
    pub record_client_errors: bool,
}

/// The result of handling one request: the response plus the states it went through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub request_id: RequestId,
    pub id: String,
    pub response: Response,
    pub states: Vec<RequestState>,
}

impl Exchange {
    pub fn final_state(&self) -> RequestState {
        self.states
            .last()
            .copied()
            .unwrap_or(RequestState::Received)
    }
}

struct Trail {
    request_id: RequestId,
    states: Vec<RequestState>,
}

impl Trail {
    fn new(request_id: RequestId) -> Self {
        Self {
            request_id,
            states: vec![RequestState::Received],
        }
    }

    fn advance(&mut self, next: RequestState) {
        let current = self.states.last().copied().unwrap_or(RequestState::Received);
        debug_assert!(
            current.can_advance_to(next),
            "illegal transition {current:?} -> {next:?}"
        );
        tracing::debug!(request_id = %self.request_id, from = ?current, to = ?next, "request state");
        self.states.push(next);
    }
}

/// Terminates failure propagation: every request leaves with exactly one response.
///
/// The boundary validates the raw input, calls the computation and translates
/// any failure into a client-facing response. Full failure detail goes to the
/// injected sink, keyed by request id. The boundary holds no per-request state
/// and can be shared across tasks behind an `Arc`.
pub struct Boundary {
    computation: ComputationBox,
    sink: SinkBox,
    config: BoundaryConfig,
}

impl Boundary {
    pub fn new(computation: ComputationBox, sink: SinkBox) -> Self {
        Self::with_config(computation, sink, BoundaryConfig::default())
    }

    pub fn with_config(computation: ComputationBox, sink: SinkBox, config: BoundaryConfig) -> Self {
        Self {
            computation,
            sink,
            config,
        }
    }

    pub fn config(&self) -> BoundaryConfig {
        self.config
    }

    /// Handles one request from receipt to response.
    pub async fn handle(&self, request: Request) -> Exchange {
        let mut trail = Trail::new(request.request_id);

        trail.advance(RequestState::Validating);
        let id = match ValidatedId::parse(&request.id) {
            Ok(id) => id,
            Err(failure) => {
                trail.advance(RequestState::Rejected);
                let response = self.settle(&request, failure).await;
                return Self::exchange(request, response, trail);
            }
        };

        trail.advance(RequestState::Invoking);
        let response = match self.computation.compute(&id).await {
            Ok(value) => {
                trail.advance(RequestState::Succeeded);
                Response::success(value)
            }
            Err(failure) => {
                trail.advance(RequestState::Failed);
                self.settle(&request, failure).await
            }
        };

        trail.advance(RequestState::Responded);
        Self::exchange(request, response, trail)
    }

    /// Consumes a failure: translates it for the client and records it when required.
    async fn settle(&self, request: &Request, failure: Failure) -> Response {
        let response = Response::from_failure(&failure);

        match failure.kind() {
            FailureKind::InvalidInput => {
                tracing::warn!(
                    request_id = %request.request_id,
                    id = %request.id,
                    reason = failure.message(),
                    "request rejected"
                );
            }
            FailureKind::InternalFault => {
                tracing::debug!(request_id = %request.request_id, "internal fault translated");
            }
        }

        if failure.kind() == FailureKind::InternalFault || self.config.record_client_errors {
            let record =
                FailureRecord::capture(request.request_id, &failure, [("id", request.id.as_str())]);
            if let Err(e) = self.sink.record(record).await {
                tracing::error!(
                    request_id = %request.request_id,
                    kind = %failure.kind(),
                    reason = failure.message(),
                    error = %e,
                    "failed to record failure"
                );
            }
        }

        response
    }

    fn exchange(request: Request, response: Response, trail: Trail) -> Exchange {
        Exchange {
            request_id: request.request_id,
            id: request.id,
            response,
            states: trail.states,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::service::IdService;
    use crate::domain::ports::Computation;
    use crate::domain::response::{SERVER_ERROR_MESSAGE, StatusClass};
    use crate::infrastructure::in_memory::InMemorySink;
    use async_trait::async_trait;

    struct TimingOut;

    #[async_trait]
    impl Computation for TimingOut {
        async fn compute(&self, id: &ValidatedId) -> Result<String, Failure> {
            Err(Failure::internal_fault("db timeout").with_context("id", id.as_str()))
        }
    }

    #[test]
    fn test_state_transitions() {
        use RequestState::*;
        assert!(Received.can_advance_to(Validating));
        assert!(Validating.can_advance_to(Rejected));
        assert!(!Rejected.can_advance_to(Invoking));
        assert!(!Responded.can_advance_to(Received));
        assert!(!Invoking.can_advance_to(Validating));
        assert!(Rejected.is_terminal());
        assert!(Responded.is_terminal());
        assert!(!Failed.is_terminal());
    }

    #[tokio::test]
    async fn test_rejected_path() {
        let sink = InMemorySink::new();
        let boundary = Boundary::new(Box::new(IdService::new()), Box::new(sink.clone()));

        let exchange = boundary.handle(Request::new("abc-1")).await;

        assert_eq!(exchange.response.status_class(), StatusClass::ClientError);
        assert_eq!(
            exchange.states,
            vec![
                RequestState::Received,
                RequestState::Validating,
                RequestState::Rejected
            ]
        );
        assert!(exchange.final_state().is_terminal());
        assert!(sink.is_empty().await);
    }

    #[tokio::test]
    async fn test_success_path() {
        let sink = InMemorySink::new();
        let boundary = Boundary::new(Box::new(IdService::new()), Box::new(sink.clone()));

        let exchange = boundary.handle(Request::new("abc1")).await;

        assert_eq!(exchange.response, Response::success("abc1"));
        assert_eq!(exchange.final_state(), RequestState::Responded);
        assert!(exchange.states.contains(&RequestState::Succeeded));
        assert!(sink.is_empty().await);
    }

    #[tokio::test]
    async fn test_internal_fault_path() {
        let sink = InMemorySink::new();
        let boundary = Boundary::new(Box::new(TimingOut), Box::new(sink.clone()));
        let request = Request::new("abc1");
        let request_id = request.request_id;

        let exchange = boundary.handle(request).await;

        let descriptor = exchange.response.error().unwrap();
        assert_eq!(descriptor.status_class, StatusClass::ServerError);
        assert_eq!(descriptor.message, SERVER_ERROR_MESSAGE);
        assert!(exchange.states.contains(&RequestState::Failed));

        let records = sink.records().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].request_id, request_id);
        assert_eq!(records[0].message, "db timeout");
    }

    #[tokio::test]
    async fn test_client_errors_recorded_when_configured() {
        let sink = InMemorySink::new();
        let boundary = Boundary::with_config(
            Box::new(IdService::new()),
            Box::new(sink.clone()),
            BoundaryConfig {
                record_client_errors: true,
            },
        );

        boundary.handle(Request::new("abc-1")).await;
        boundary.handle(Request::new("abc_1")).await;

        let records = sink.records().await;
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.kind == FailureKind::InvalidInput));
    }
}
