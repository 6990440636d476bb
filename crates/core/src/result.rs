//! Asynchronous shard registration results.

use crate::RegistrationError;
use shardreg_types::PieceCid;

/// Outcome of one shard registration, delivered on the result channel.
#[derive(Debug, Clone)]
pub struct ShardResult {
    /// Shard key the result refers to.
    pub key: PieceCid,
    /// Failure, if registration did not succeed.
    pub error: Option<RegistrationError>,
}

impl ShardResult {
    /// A successful registration.
    pub fn success(key: PieceCid) -> Self {
        Self { key, error: None }
    }

    /// A failed registration.
    pub fn failure(key: PieceCid, error: RegistrationError) -> Self {
        Self {
            key,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_and_failure() {
        let key = PieceCid::from_data(b"piece");
        assert!(ShardResult::success(key).is_success());

        let failed = ShardResult::failure(key, RegistrationError::Failed("disk full".into()));
        assert!(!failed.is_success());
        assert_eq!(failed.key, key);
    }
}
