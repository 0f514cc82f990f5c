use std::env::{self, VarError};

use crate::domain::ports::{KeyLookup, LookupError};

/// Lookup over the process environment
///
/// The key `TIMEOUT` with prefix `APP_` reads `APP_TIMEOUT`.
#[derive(Debug, Clone, Default)]
pub struct EnvLookup {
    prefix: String,
}

impl EnvLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl KeyLookup for EnvLookup {
    fn lookup(&self, key: &str) -> Result<String, LookupError> {
        let key = key.trim();
        let variable = format!("{}{key}", self.prefix);
        match env::var(&variable) {
            Ok(value) => Ok(value),
            Err(VarError::NotPresent) => Err(LookupError::NotFound(variable)),
            Err(VarError::NotUnicode(_)) => Err(LookupError::Invalid {
                key: variable,
                reason: "value is not valid unicode".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_variable() {
        temp_env::with_var("CCMS_TEST_ENV_LOOKUP_URL", Some("http://svc"), || {
            let lookup = EnvLookup::new();
            assert_eq!(lookup.lookup("CCMS_TEST_ENV_LOOKUP_URL").unwrap(), "http://svc");
        });
    }

    #[test]
    fn test_prefix_is_prepended() {
        temp_env::with_var("CCMS_TEST_PREFIX_TIMEOUT", Some("30"), || {
            let lookup = EnvLookup::with_prefix("CCMS_TEST_PREFIX_");
            assert_eq!(lookup.prefix(), "CCMS_TEST_PREFIX_");
            assert_eq!(lookup.lookup(" TIMEOUT ").unwrap(), "30");
        });
    }

    #[test]
    fn test_missing_variable_is_not_found() {
        temp_env::with_var_unset("CCMS_TEST_ENV_LOOKUP_MISSING", || {
            let lookup = EnvLookup::new();
            match lookup.lookup("CCMS_TEST_ENV_LOOKUP_MISSING") {
                Err(LookupError::NotFound(name)) => {
                    assert_eq!(name, "CCMS_TEST_ENV_LOOKUP_MISSING");
                }
                other => panic!("expected NotFound, got {other:?}"),
            }
        });
    }
}
