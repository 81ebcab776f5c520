//! Client layer: configuration, the transport adapter and the operation modules.

mod campaign;
mod error;
mod http;
mod otp;
mod sms;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{ApiKey, BaseUrl, ConfigError};

pub use campaign::CampaignApi;
pub use error::{ApiError, FieldErrors, KyaSmsError, ValidationError};
pub use http::HttpClient;
pub use otp::OtpApi;
pub use sms::SmsApi;

use http::ReqwestTransport;

/// Environment variable holding the API key read by [`KyaSmsClient::from_env`].
pub const API_KEY_ENV: &str = "KYA_SMS_API_KEY";
/// Optional base URL override read by [`KyaSmsClient::from_env`].
pub const BASE_URL_ENV: &str = "KYA_SMS_BASE_URL";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, PartialEq, Eq)]
/// Plain client configuration, validated by [`KyaSmsClient::from_config`].
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    /// Trace every request and response at `DEBUG` level.
    pub debug: bool,
}

impl ClientConfig {
    /// Default base URL, 30 second timeout, debug off.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: BaseUrl::DEFAULT.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            debug: false,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("debug", &self.debug)
            .finish()
    }
}

#[derive(Debug, Clone)]
/// Builder for [`KyaSmsClient`].
///
/// Use this when you need to customize the base URL, timeout, debug tracing or user-agent.
pub struct KyaSmsClientBuilder {
    config: ClientConfig,
    user_agent: Option<String>,
}

impl KyaSmsClientBuilder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            config: ClientConfig::new(api_key),
            user_agent: None,
        }
    }

    /// Point the client at another deployment (or a local mock server).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Timeout applied to the entire request. Expiry surfaces as [`KyaSmsError::Network`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Validate the configuration and build a [`KyaSmsClient`].
    pub fn build(self) -> Result<KyaSmsClient, KyaSmsError> {
        let api_key = ApiKey::new(self.config.api_key)?;
        let base_url = BaseUrl::new(self.config.base_url)?;

        let mut builder = reqwest::Client::builder().timeout(self.config.timeout);
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let client = builder
            .build()
            .map_err(|err| KyaSmsError::base("failed to build HTTP client", Some(Box::new(err))))?;

        Ok(KyaSmsClient {
            http: HttpClient::new(
                api_key,
                base_url,
                self.config.debug,
                Arc::new(ReqwestTransport { client }),
            ),
            timeout: self.config.timeout,
        })
    }
}

#[derive(Debug, Clone)]
/// High-level KYA SMS client.
///
/// Operations are grouped by area: [`sms`](Self::sms), [`otp`](Self::otp)
/// and [`campaign`](Self::campaign). Each call is a single HTTP exchange with
/// no retries. Clones share the connection pool but carry their own
/// configuration.
pub struct KyaSmsClient {
    http: HttpClient,
    timeout: Duration,
}

impl KyaSmsClient {
    /// Client with the default base URL and timeout.
    ///
    /// For more customization, use [`KyaSmsClient::builder`].
    pub fn new(api_key: impl Into<String>) -> Result<Self, KyaSmsError> {
        Self::builder(api_key).build()
    }

    pub fn from_config(config: ClientConfig) -> Result<Self, KyaSmsError> {
        KyaSmsClientBuilder {
            config,
            user_agent: None,
        }
        .build()
    }

    pub fn builder(api_key: impl Into<String>) -> KyaSmsClientBuilder {
        KyaSmsClientBuilder::new(api_key)
    }

    /// Read [`API_KEY_ENV`] (required) and [`BASE_URL_ENV`] (optional).
    ///
    /// Fails with [`ConfigError::MissingEnvVar`] as the error source when the
    /// key is unset or empty.
    pub fn from_env() -> Result<Self, KyaSmsError> {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, KyaSmsError> {
        let present = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = present(API_KEY_ENV).ok_or(ConfigError::MissingEnvVar { name: API_KEY_ENV })?;
        let mut config = ClientConfig::new(api_key);
        if let Some(base_url) = present(BASE_URL_ENV) {
            config.base_url = base_url;
        }
        Self::from_config(config)
    }

    pub fn sms(&self) -> SmsApi<'_> {
        SmsApi::new(&self.http)
    }

    pub fn otp(&self) -> OtpApi<'_> {
        OtpApi::new(&self.http)
    }

    pub fn campaign(&self) -> CampaignApi<'_> {
        CampaignApi::new(&self.http)
    }

    /// Raw JSON access for endpoints without a typed wrapper.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn base_url(&self) -> &BaseUrl {
        self.http.base_url()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn is_debug(&self) -> bool {
        self.http.is_debug()
    }

    /// Replace the API key used by subsequent calls.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) -> Result<(), KyaSmsError> {
        self.http.set_api_key(ApiKey::new(api_key)?);
        Ok(())
    }

    /// Replace the base URL used by subsequent calls.
    pub fn set_base_url(&mut self, base_url: impl Into<String>) -> Result<(), KyaSmsError> {
        self.http.set_base_url(BaseUrl::new(base_url)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::client::http::testing::{FakeTransport, http_client};

    fn config_error(err: &KyaSmsError) -> Option<&ConfigError> {
        match err {
            KyaSmsError::Base {
                source: Some(source),
                ..
            } => source.downcast_ref::<ConfigError>(),
            _ => None,
        }
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let vars = pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect::<HashMap<_, _>>();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn new_uses_defaults() {
        let client = KyaSmsClient::new("key").unwrap();
        assert_eq!(client.base_url().as_str(), BaseUrl::DEFAULT);
        assert_eq!(client.timeout(), Duration::from_secs(30));
        assert!(!client.is_debug());
    }

    #[test]
    fn empty_api_key_is_rejected_as_base_error() {
        let err = KyaSmsClient::new("  ").unwrap_err();
        assert!(matches!(
            config_error(&err),
            Some(ConfigError::Empty { field: "APIKEY" })
        ));
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn builder_applies_overrides() {
        let client = KyaSmsClient::builder("key")
            .base_url("http://localhost:8080/api/v3/")
            .timeout(Duration::from_secs(5))
            .debug(true)
            .user_agent("kyasms-tests")
            .build()
            .unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8080/api/v3");
        assert_eq!(client.timeout(), Duration::from_secs(5));
        assert!(client.is_debug());
    }

    #[test]
    fn from_config_rejects_malformed_base_url() {
        let config = ClientConfig {
            base_url: "ftp://example.com".to_owned(),
            ..ClientConfig::new("key")
        };
        let err = KyaSmsClient::from_config(config).unwrap_err();
        assert!(matches!(
            config_error(&err),
            Some(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn from_env_requires_api_key() {
        for lookup in [env(&[]), env(&[(API_KEY_ENV, "")])] {
            let err = KyaSmsClient::from_env_with(lookup).unwrap_err();
            assert!(matches!(
                config_error(&err),
                Some(ConfigError::MissingEnvVar {
                    name: "KYA_SMS_API_KEY"
                })
            ));
            assert_eq!(err.to_string(), "KYA_SMS_API_KEY environment variable is not set");
        }
    }

    #[test]
    fn from_env_reads_optional_base_url() {
        let client = KyaSmsClient::from_env_with(env(&[(API_KEY_ENV, "key")])).unwrap();
        assert_eq!(client.base_url().as_str(), BaseUrl::DEFAULT);

        let client = KyaSmsClient::from_env_with(env(&[
            (API_KEY_ENV, "key"),
            (BASE_URL_ENV, "https://staging.example.com/api/v3"),
        ]))
        .unwrap();
        assert_eq!(
            client.base_url().as_str(),
            "https://staging.example.com/api/v3"
        );
    }

    #[tokio::test]
    async fn setters_affect_subsequent_calls_only_after_validation() {
        let transport = FakeTransport::new();
        let mut client = KyaSmsClient {
            http: http_client(&transport),
            timeout: DEFAULT_TIMEOUT,
        };

        assert!(client.set_api_key("").is_err());
        assert!(client.set_base_url("not a url").is_err());
        client.sms().get_status(&["m-1"]).await.unwrap();
        let request = transport.last_request();
        assert_eq!(request.api_key, "test-key");
        assert_eq!(request.url.host_str(), Some("example.invalid"));

        client.set_api_key("rotated").unwrap();
        client.set_base_url("https://other.example.com/v3").unwrap();
        client.otp().verify("app", "k", "1").await.unwrap();
        let request = transport.last_request();
        assert_eq!(request.api_key, "rotated");
        assert_eq!(request.url.as_str(), "https://other.example.com/v3/otp/verify");
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = ClientConfig::new("super-secret");
        assert!(!format!("{config:?}").contains("super-secret"));

        let client = KyaSmsClient::new("super-secret").unwrap();
        assert!(!format!("{client:?}").contains("super-secret"));
    }
}
