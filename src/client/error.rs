//! Error taxonomy and the single place where failed exchanges are classified.

use std::collections::BTreeMap;
use std::error::Error as StdError;

use serde::Deserialize;

use crate::domain::ConfigError;

pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;

const DEFAULT_AUTH_MESSAGE: &str = "Invalid or missing API key";
const INSUFFICIENT_BALANCE_MESSAGE: &str = "Insufficient balance. Please top up your account.";
const RATE_LIMIT_MESSAGE: &str = "Too many requests. Please slow down.";
const NOT_FOUND_MESSAGE: &str = "Resource not found.";
const NETWORK_MESSAGE: &str = "Unable to reach the server";

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`KyaSmsClient`](crate::KyaSmsClient) operations.
///
/// Remote failures are classified once, at the transport boundary:
/// - `401` becomes [`KyaSmsError::Authentication`],
/// - `422` becomes [`KyaSmsError::Validation`] with the per-field messages,
/// - every other non-2xx status becomes [`KyaSmsError::Api`],
/// - a request that got no response becomes [`KyaSmsError::Network`],
/// - anything that failed before a request went out is [`KyaSmsError::Base`].
pub enum KyaSmsError {
    /// Unclassified failure: bad local configuration or an unbuildable request.
    #[error("{message}")]
    Base {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The API key was rejected.
    #[error("authentication error: {message}")]
    Authentication { message: String },

    /// The API rejected one or more input fields.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Any other non-successful HTTP response.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// No response reached the client (DNS, refused connection, TLS, timeout).
    #[error("{message}: {source}")]
    Network {
        message: String,
        #[source]
        source: BoxError,
    },
}

impl KyaSmsError {
    pub(crate) fn base(message: impl Into<String>, source: Option<BoxError>) -> Self {
        Self::Base {
            message: message.into(),
            source,
        }
    }

    /// HTTP status of the failed response, when there was one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Authentication { .. } => Some(401),
            Self::Validation(_) => Some(422),
            Self::Api(api) => Some(api.status_code()),
            Self::Base { .. } | Self::Network { .. } => None,
        }
    }
}

impl From<ConfigError> for KyaSmsError {
    fn from(value: ConfigError) -> Self {
        Self::base(value.to_string(), Some(Box::new(value)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
/// Messages attached to one invalid field.
pub enum FieldErrors {
    One(String),
    Many(Vec<String>),
}

impl FieldErrors {
    /// All messages, regardless of how the API shaped them.
    pub fn messages(&self) -> Vec<&str> {
        match self {
            Self::One(message) => vec![message.as_str()],
            Self::Many(messages) => messages.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation error: {message}")]
/// Field-level input rejection (HTTP 422).
pub struct ValidationError {
    message: String,
    errors: BTreeMap<String, FieldErrors>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>, errors: BTreeMap<String, FieldErrors>) -> Self {
        Self {
            message: message.into(),
            errors,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Every rejected field with its messages.
    pub fn errors(&self) -> &BTreeMap<String, FieldErrors> {
        &self.errors
    }

    /// Messages for one field, if the API rejected it.
    pub fn error(&self, field: &str) -> Option<&FieldErrors> {
        self.errors.get(field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("API error ({status_code}): {message}")]
/// Non-successful response other than 401/422.
pub struct ApiError {
    message: String,
    status_code: u16,
    error_code: Option<String>,
}

impl ApiError {
    pub fn new(message: impl Into<String>, status_code: u16, error_code: Option<String>) -> Self {
        Self {
            message: message.into(),
            status_code,
            error_code,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Provider-specific error code, when the response body carried one.
    pub fn error_code(&self) -> Option<&str> {
        self.error_code.as_deref()
    }

    pub fn is_rate_limit_error(&self) -> bool {
        self.status_code == 429
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code >= 500
    }

    pub fn is_insufficient_balance(&self) -> bool {
        self.status_code == 402
    }
}

/// How an exchange with the API failed, before classification.
#[derive(Debug)]
pub(crate) enum Failure {
    /// The server answered with a non-2xx status.
    Status { status: u16, body: String },
    /// The request went out but no response came back.
    NoResponse(BoxError),
    /// The request could not be built or sent.
    NotSent(BoxError),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorBody {
    #[serde(deserialize_with = "crate::transport::lenient::opt_string")]
    message: Option<String>,
    #[serde(deserialize_with = "crate::transport::lenient::map")]
    errors: BTreeMap<String, FieldErrors>,
    #[serde(deserialize_with = "crate::transport::lenient::opt_string")]
    code: Option<String>,
    #[serde(deserialize_with = "crate::transport::lenient::opt_string")]
    error_code: Option<String>,
}

impl ErrorBody {
    fn parse(body: &str) -> Self {
        serde_json::from_str::<serde_json::Value>(body)
            .map(crate::transport::lenient::from_value_or_default)
            .unwrap_or_default()
    }
}

/// Map a failed exchange to exactly one [`KyaSmsError`].
///
/// Statuses with a fixed message (402, 429, 404) ignore the body's message.
pub(crate) fn classify(failure: Failure) -> KyaSmsError {
    match failure {
        Failure::Status { status, body } => {
            let body = ErrorBody::parse(&body);
            let message = body.message.filter(|message| !message.is_empty());
            let error_code = body.error_code.or(body.code);
            let fallback = || format!("Request failed with status code {status}");

            match status {
                401 => KyaSmsError::Authentication {
                    message: message.unwrap_or_else(|| DEFAULT_AUTH_MESSAGE.to_owned()),
                },
                422 => ValidationError::new(message.unwrap_or_else(fallback), body.errors).into(),
                402 => ApiError::new(INSUFFICIENT_BALANCE_MESSAGE, status, error_code).into(),
                429 => ApiError::new(RATE_LIMIT_MESSAGE, status, error_code).into(),
                404 => ApiError::new(NOT_FOUND_MESSAGE, status, error_code).into(),
                _ => ApiError::new(message.unwrap_or_else(fallback), status, error_code).into(),
            }
        }
        Failure::NoResponse(source) => KyaSmsError::Network {
            message: NETWORK_MESSAGE.to_owned(),
            source,
        },
        Failure::NotSent(source) => KyaSmsError::base(source.to_string(), Some(source)),
    }
}
