use std::fmt;

use url::Url;

use crate::domain::validation::ConfigError;

#[derive(Clone, PartialEq, Eq, Hash)]
/// KYA SMS API key sent in the `APIKEY` header.
///
/// Invariant: non-empty after trimming. `Debug` output never shows the key.
pub struct ApiKey(String);

impl ApiKey {
    /// Header name used by KYA SMS (`APIKEY`).
    pub const HEADER: &'static str = "APIKEY";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::Empty {
                field: Self::HEADER,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Root URL every endpoint path is appended to.
///
/// Invariant: absolute `http`/`https` URL, stored without a trailing slash.
pub struct BaseUrl(String);

impl BaseUrl {
    /// Production API root.
    pub const DEFAULT: &'static str = "https://route.kyasms.com/api/v3";

    /// Create a validated [`BaseUrl`].
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();
        let trimmed = value.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::Empty { field: "base_url" });
        }

        let parsed = Url::parse(trimmed).map_err(|err| ConfigError::InvalidBaseUrl {
            input: value.clone(),
            reason: err.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                input: value.clone(),
                reason: format!("unsupported scheme {:?}", parsed.scheme()),
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the URL as configured (no trailing slash).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build the absolute URL for `path` with `query` appended in order.
    pub fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, url::ParseError> {
        let path = path.trim_start_matches('/');
        let mut url = Url::parse(&format!("{}/{}", self.0, path))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One or many recipients for `sms/send`.
///
/// Phone numbers or, for bulk sends, contact group ids. Always sent to the API
/// as a single comma-joined string.
pub enum Recipients {
    One(String),
    Many(Vec<String>),
}

impl Recipients {
    /// Comma-joined wire representation.
    pub fn joined(&self) -> String {
        match self {
            Self::One(value) => value.clone(),
            Self::Many(values) => values.join(","),
        }
    }
}

impl From<String> for Recipients {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<&str> for Recipients {
    fn from(value: &str) -> Self {
        Self::One(value.to_owned())
    }
}

impl From<Vec<String>> for Recipients {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<Vec<&str>> for Recipients {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(str::to_owned).collect())
    }
}

impl From<&[&str]> for Recipients {
    fn from(values: &[&str]) -> Self {
        Self::Many(values.iter().map(|value| (*value).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Recipients {
    fn from(values: [&str; N]) -> Self {
        Self::Many(values.iter().map(|value| (*value).to_owned()).collect())
    }
}

impl From<&[String]> for Recipients {
    fn from(values: &[String]) -> Self {
        Self::Many(values.to_vec())
    }
}
