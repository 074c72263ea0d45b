//! Process environment access behind a mockable seam.

use std::env;

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    /// Reads an environment variable.
    fn env_var(&self, key: &str) -> Result<String, env::VarError>;
}

/// Runtime backed by the real process environment.
pub struct RealRuntime;

impl Runtime for RealRuntime {
    #[tracing::instrument(skip(self))]
    fn env_var(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }
}
