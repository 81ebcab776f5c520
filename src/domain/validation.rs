use std::fmt;

/// Local configuration problems detected before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Empty { field: &'static str },
    InvalidBaseUrl { input: String, reason: String },
    MissingEnvVar { name: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidBaseUrl { input, reason } => {
                write!(f, "invalid base URL {input:?}: {reason}")
            }
            Self::MissingEnvVar { name } => {
                write!(f, "{name} environment variable is not set")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
