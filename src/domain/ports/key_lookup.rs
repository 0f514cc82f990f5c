use thiserror::Error;

/// Error returned by a [`KeyLookup`] implementation
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("key not found: {0}")]
    NotFound(String),

    #[error("invalid value for key {key}: {reason}")]
    Invalid { key: String, reason: String },
}

/// Capability that resolves an indirection key to its string value
///
/// The resolver treats every error as fatal for the whole resolution.
/// Implementations backed by a remote store are expected to enforce their
/// own request timeout.
///
/// Any closure of the right shape is a `KeyLookup`:
///
/// ```
/// use ccms_config::domain::ports::{KeyLookup, LookupError};
///
/// let lookup = |key: &str| -> Result<String, LookupError> {
///     match key {
///         "TIMEOUT_SECONDS" => Ok("30".to_string()),
///         other => Err(LookupError::NotFound(other.to_string())),
///     }
/// };
///
/// assert_eq!(lookup.lookup("TIMEOUT_SECONDS").unwrap(), "30");
/// assert!(lookup.lookup("MISSING").is_err());
/// ```
pub trait KeyLookup {
    fn lookup(&self, key: &str) -> Result<String, LookupError>;
}

impl<F> KeyLookup for F
where
    F: Fn(&str) -> Result<String, LookupError>,
{
    fn lookup(&self, key: &str) -> Result<String, LookupError> {
        self(key)
    }
}
