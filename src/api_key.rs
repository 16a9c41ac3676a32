//! Provider API key handling.
//!
//! The key authenticates every catalog request and is sent as the
//! `X-ListenAPI-Key` header. It is kept out of `Debug` output.
//!
//! # Secrets File
//!
//! ```toml
//! api_key = "0123456789abcdef0123456789abcdef"
//! ```

use std::{fmt, fs, io, str::FromStr};

use veil::Redact;

use crate::error::{Error, Result};

/// Credential for the podcast provider.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Redact)]
#[redact(all)]
pub struct ApiKey(String);

impl ApiKey {
    /// Secrets files should be small; anything larger is refused unread.
    const MAX_FILE_SIZE: u64 = 1024;

    /// Loads the API key from the `api_key` entry of a TOML secrets file.
    ///
    /// # Errors
    ///
    /// Will return `Err` if:
    /// - the file cannot be read or is larger than 1 KiB
    /// - the file is not valid TOML
    /// - the file has no `api_key` string entry
    /// - the key itself is invalid
    pub fn from_file(secrets_file: &str) -> Result<Self> {
        let attributes = fs::metadata(secrets_file)?;
        if attributes.len() > Self::MAX_FILE_SIZE {
            return Err(Error::invalid_argument(format!(
                "{secrets_file} is too large"
            )));
        }

        let contents = fs::read_to_string(secrets_file)?;
        let value = contents.parse::<toml::Table>().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{secrets_file} format is invalid: {e}"),
            )
        })?;

        match value.get("api_key").and_then(toml::Value::as_str) {
            Some(key) => key.parse(),
            None => Err(Error::not_found(format!(
                "{secrets_file} does not contain an api_key"
            ))),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ApiKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim();
        if key.is_empty() {
            return Err(Error::invalid_argument("api key is empty"));
        }

        if key.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(Error::invalid_argument(
                "api key contains whitespace or control characters",
            ));
        }

        Ok(Self(key.to_owned()))
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
