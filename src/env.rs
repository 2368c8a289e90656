//! Environment access behind a trait, so configuration can be loaded
//! without touching the process environment in tests.

use std::env;

pub trait ReadEnv {
    fn var(&self, key: &str) -> Result<String, env::VarError>;
}

/// Delegates to `std::env`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl ReadEnv for SystemEnv {
    #[inline]
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }
}

#[cfg(test)]
pub use in_memory::InMemoryEnv;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_env_missing_var() {
        let result = SystemEnv.var("MOCKAPI_FORWARDER_NONEXISTENT_12345");
        assert!(matches!(result, Err(env::VarError::NotPresent)));
    }

    #[test]
    fn test_in_memory_env() {
        let env = InMemoryEnv::new().with("MOCK_API_KEY", "secret");
        assert_eq!(env.var("MOCK_API_KEY").unwrap(), "secret");
        assert!(matches!(env.var("MOCK_API_URL"), Err(env::VarError::NotPresent)));
    }
}
