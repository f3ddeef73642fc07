use super::failure::{Failure, FailureKind};
use super::request::RequestId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error as StdError;

/// One link of a failure's causal chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CauseRecord {
    pub message: String,
    /// `None` when the cause is a foreign error rather than a wrapped [`Failure`].
    pub kind: Option<FailureKind>,
    pub context: BTreeMap<String, String>,
}

impl CauseRecord {
    fn from_error(err: &(dyn StdError + 'static)) -> Self {
        match err.downcast_ref::<Failure>() {
            Some(failure) => Self {
                message: failure.message().to_owned(),
                kind: Some(failure.kind()),
                context: failure.context().clone(),
            },
            None => Self {
                message: err.to_string(),
                kind: None,
                context: BTreeMap::new(),
            },
        }
    }
}

/// Everything known about a failure, as handed to the observability sink.
///
/// Unlike the client response this keeps the original message, the context of
/// every failure in the chain and the causes themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureRecord {
    pub request_id: RequestId,
    pub kind: FailureKind,
    pub message: String,
    /// Request context, then cause contexts from the innermost out, then the
    /// failure's own context. Later entries win on key clashes.
    pub context: BTreeMap<String, String>,
    /// Outermost first.
    pub causes: Vec<CauseRecord>,
}

impl FailureRecord {
    pub fn capture<I, K, V>(request_id: RequestId, failure: &Failure, request_context: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let causes: Vec<CauseRecord> = failure.causes().map(CauseRecord::from_error).collect();

        let mut context: BTreeMap<String, String> = request_context
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        for cause in causes.iter().rev() {
            context.extend(cause.context.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        context.extend(
            failure
                .context()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        Self {
            request_id,
            kind: failure.kind(),
            message: failure.message().to_owned(),
            context,
            causes,
        }
    }

    pub fn cause_messages(&self) -> Vec<&str> {
        self.causes.iter().map(|c| c.message.as_str()).collect()
    }

    /// The innermost message: the last cause, or the failure itself when nothing was wrapped.
    pub fn root_cause(&self) -> &str {
        self.causes
            .last()
            .map(|c| c.message.as_str())
            .unwrap_or(&self.message)
    }

    /// True if `text` appears in the message or anywhere in the causal chain.
    pub fn mentions(&self, text: &str) -> bool {
        self.message.contains(text) || self.causes.iter().any(|c| c.message.contains(text))
    }
}
