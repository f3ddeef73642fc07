use super::failure::Failure;
use std::fmt;

/// An identifier that passed the boundary's structural checks.
///
/// Holding a `ValidatedId` guarantees the value is non-empty and contains no
/// hyphen, so the computation never sees those inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedId(String);

impl ValidatedId {
    pub const DISALLOWED: char = '-';

    pub fn parse(raw: &str) -> Result<Self, Failure> {
        if raw.is_empty() {
            return Err(Failure::invalid_input("id should not be empty").with_context("id", raw));
        }
        if raw.contains(Self::DISALLOWED) {
            return Err(
                Failure::invalid_input("id should not include hyphen").with_context("id", raw)
            );
        }
        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<&str> for ValidatedId {
    type Error = Failure;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl AsRef<str> for ValidatedId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValidatedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
