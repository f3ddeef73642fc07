use crate::domain::failure::Failure;
use crate::domain::identifier::ValidatedId;
use crate::domain::ports::Computation;
use async_trait::async_trait;

/// Resolves an identifier to its canonical value.
///
/// The service enforces the domain rule that identifiers are ASCII
/// alphanumeric. It reports violations as `InvalidInput` failures and leaves
/// the response shape to whoever called it, so batch jobs and other services
/// can use it the same way the boundary does.
#[derive(Debug, Default, Clone)]
pub struct IdService;

impl IdService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Computation for IdService {
    async fn compute(&self, id: &ValidatedId) -> Result<String, Failure> {
        if let Some(offending) = id.as_str().chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(
                Failure::invalid_input("id should only contain alphanumeric characters")
                    .with_context("id", id.as_str())
                    .with_context("character", offending.to_string()),
            );
        }
        Ok(id.as_str().to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::failure::FailureKind;

    #[tokio::test]
    async fn test_returns_id_unchanged() {
        let id = ValidatedId::parse("abc1").unwrap();
        let value = IdService::new().compute(&id).await.unwrap();
        assert_eq!(value, "abc1");
    }

    #[tokio::test]
    async fn test_domain_rule_violation_is_invalid_input() {
        let id = ValidatedId::parse("abc_1").unwrap();
        let failure = IdService::new().compute(&id).await.unwrap_err();

        assert_eq!(failure.kind(), FailureKind::InvalidInput);
        assert_eq!(
            failure.message(),
            "id should only contain alphanumeric characters"
        );
        assert_eq!(
            failure.context().get("character").map(String::as_str),
            Some("_")
        );
    }
}
