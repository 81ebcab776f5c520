//! Transport adapter: one JSON request per call, failures routed through [`classify`].

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::error::{BoxError, Failure, KyaSmsError, classify};
use crate::domain::{ApiKey, BaseUrl};

pub(crate) type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub(crate) struct HttpRequest {
    pub(crate) method: HttpMethod,
    pub(crate) url: Url,
    pub(crate) api_key: String,
    pub(crate) body: Option<Value>,
}

#[derive(Debug, Clone)]
pub(crate) struct HttpResponse {
    pub(crate) status: u16,
    pub(crate) body: String,
}

/// Sends one request. Only [`Failure::NoResponse`] and [`Failure::NotSent`]
/// are returned as errors; every HTTP status is a response.
pub(crate) trait HttpTransport: Send + Sync {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, Failure>>;
}

#[derive(Debug, Clone)]
pub(crate) struct ReqwestTransport {
    pub(crate) client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, Failure>> {
        Box::pin(async move {
            let method = match request.method {
                HttpMethod::Get => reqwest::Method::GET,
                HttpMethod::Post => reqwest::Method::POST,
                HttpMethod::Put => reqwest::Method::PUT,
                HttpMethod::Delete => reqwest::Method::DELETE,
            };

            let mut builder = self
                .client
                .request(method, request.url)
                .header(ApiKey::HEADER, request.api_key)
                .header(reqwest::header::ACCEPT, "application/json");
            if let Some(body) = request.body.as_ref() {
                builder = builder.json(body);
            }

            let response = builder.send().await.map_err(send_failure)?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|err| Failure::NoResponse(Box::new(err)))?;
            Ok(HttpResponse { status, body })
        })
    }
}

fn send_failure(err: reqwest::Error) -> Failure {
    if err.is_builder() {
        Failure::NotSent(Box::new(err))
    } else {
        Failure::NoResponse(Box::new(err))
    }
}

#[derive(Clone)]
/// Authenticated JSON client for the KYA SMS API.
///
/// Every call attaches the `APIKEY` header, serializes the body as JSON and
/// returns the decoded response body. Non-2xx responses and transport
/// failures come back as a classified [`KyaSmsError`]. With `debug` enabled,
/// requests and responses are traced at `DEBUG` level (the key is never logged).
pub struct HttpClient {
    api_key: ApiKey,
    base_url: BaseUrl,
    debug: bool,
    transport: Arc<dyn HttpTransport>,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("api_key", &self.api_key)
            .field("base_url", &self.base_url)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    pub(crate) fn new(
        api_key: ApiKey,
        base_url: BaseUrl,
        debug: bool,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            api_key,
            base_url,
            debug,
            transport,
        }
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub(crate) fn set_api_key(&mut self, api_key: ApiKey) {
        self.api_key = api_key;
    }

    pub(crate) fn set_base_url(&mut self, base_url: BaseUrl) {
        self.base_url = base_url;
    }

    /// `GET path?query`.
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, KyaSmsError> {
        self.execute(HttpMethod::Get, path, query, None).await
    }

    /// `POST path` with a JSON body.
    pub async fn post<B>(&self, path: &str, body: &B) -> Result<Value, KyaSmsError>
    where
        B: Serialize + ?Sized,
    {
        let body = encode_body(body)?;
        self.execute(HttpMethod::Post, path, &[], Some(body)).await
    }

    /// `PUT path` with a JSON body.
    pub async fn put<B>(&self, path: &str, body: &B) -> Result<Value, KyaSmsError>
    where
        B: Serialize + ?Sized,
    {
        let body = encode_body(body)?;
        self.execute(HttpMethod::Put, path, &[], Some(body)).await
    }

    /// `DELETE path`.
    pub async fn delete(&self, path: &str) -> Result<Value, KyaSmsError> {
        self.execute(HttpMethod::Delete, path, &[], None).await
    }

    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<Value, KyaSmsError> {
        let url = self
            .base_url
            .endpoint(path, query)
            .map_err(|err| classify(Failure::NotSent(Box::new(err))))?;

        if self.debug {
            match body.as_ref() {
                Some(body) => debug!(%method, path, query = ?query, %body, "kyasms request"),
                None => debug!(%method, path, query = ?query, "kyasms request"),
            }
        }

        let request = HttpRequest {
            method,
            url,
            api_key: self.api_key.as_str().to_owned(),
            body,
        };
        let response = self.transport.send(request).await.map_err(classify)?;

        if self.debug {
            debug!(%method, path, status = response.status, body = %response.body, "kyasms response");
        }

        if !(200..=299).contains(&response.status) {
            return Err(classify(Failure::Status {
                status: response.status,
                body: response.body,
            }));
        }

        Ok(self.decode_body(path, &response.body))
    }

    /// Success bodies never fail: empty or non-JSON bodies decode to `null`,
    /// which every result wrapper treats as "all defaults".
    fn decode_body(&self, path: &str, body: &str) -> Value {
        if body.trim().is_empty() {
            return Value::Null;
        }
        serde_json::from_str(body).unwrap_or_else(|err| {
            if self.debug {
                debug!(path, error = %err, "kyasms response body is not JSON");
            }
            Value::Null
        })
    }
}

fn encode_body<B>(body: &B) -> Result<Value, KyaSmsError>
where
    B: Serialize + ?Sized,
{
    serde_json::to_value(body).map_err(|err| {
        let source: BoxError = Box::new(err);
        classify(Failure::NotSent(source))
    })
}
