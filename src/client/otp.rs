use super::error::KyaSmsError;
use super::http::HttpClient;
use crate::domain::{CreateOtpOptions, OtpLang, OtpResult, VerifyOtpResult};

const CREATE_PATH: &str = "/otp/create";
const VERIFY_PATH: &str = "/otp/verify";

#[derive(Debug, Clone, Copy)]
/// One-time password operations, obtained from [`KyaSmsClient::otp`](crate::KyaSmsClient::otp).
///
/// The code itself is generated and checked by the API; [`OtpResult::key`]
/// identifies the session to verify against.
pub struct OtpApi<'a> {
    http: &'a HttpClient,
}

impl<'a> OtpApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn create(&self, options: CreateOtpOptions) -> Result<OtpResult, KyaSmsError> {
        let payload = crate::transport::encode_create_otp(&options);
        let raw = self.http.post(CREATE_PATH, &payload).await?;
        Ok(crate::transport::decode_otp_result(raw))
    }

    /// Server-generated code, server-default lifetime.
    pub async fn send(
        &self,
        app_id: impl Into<String>,
        recipient: impl Into<String>,
        lang: OtpLang,
    ) -> Result<OtpResult, KyaSmsError> {
        self.create(CreateOtpOptions {
            lang,
            ..CreateOtpOptions::new(app_id, recipient)
        })
        .await
    }

    pub async fn send_with_expiration(
        &self,
        app_id: impl Into<String>,
        recipient: impl Into<String>,
        minutes: u32,
        lang: OtpLang,
    ) -> Result<OtpResult, KyaSmsError> {
        self.create(CreateOtpOptions {
            lang,
            minutes: Some(minutes),
            ..CreateOtpOptions::new(app_id, recipient)
        })
        .await
    }

    /// Caller-chosen code. `minutes: None` keeps the server default lifetime.
    pub async fn send_with_custom_code(
        &self,
        app_id: impl Into<String>,
        recipient: impl Into<String>,
        code: impl Into<String>,
        lang: OtpLang,
        minutes: Option<u32>,
    ) -> Result<OtpResult, KyaSmsError> {
        self.create(CreateOtpOptions {
            lang,
            code: Some(code.into()),
            minutes,
            ..CreateOtpOptions::new(app_id, recipient)
        })
        .await
    }

    /// A wrong code is not an error: it comes back with a status other than 200.
    pub async fn verify(
        &self,
        app_id: &str,
        key: &str,
        code: &str,
    ) -> Result<VerifyOtpResult, KyaSmsError> {
        let payload = crate::transport::encode_verify_otp(app_id, key, code);
        let raw = self.http.post(VERIFY_PATH, &payload).await?;
        Ok(crate::transport::decode_verify_otp(raw))
    }

    /// Shorthand for [`verify`](Self::verify) + [`VerifyOtpResult::is_verified`].
    pub async fn is_verified(
        &self,
        app_id: &str,
        key: &str,
        code: &str,
    ) -> Result<bool, KyaSmsError> {
        Ok(self.verify(app_id, key, code).await?.is_verified())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::client::http::testing::{FakeTransport, http_client};

    #[tokio::test]
    async fn send_creates_otp_and_reads_nested_fields() {
        let transport = FakeTransport::new().respond(
            200,
            r#"{"reason": "success", "data": {"key": "k-1", "recipient": "22990000001", "status": "sent", "messageId": "m-9"}}"#,
        );
        let http = http_client(&transport);

        let result = OtpApi::new(&http)
            .send("app-1", "22990000001", OtpLang::En)
            .await
            .unwrap();
        assert!(result.is_success());
        assert_eq!(result.key(), "k-1");
        assert_eq!(result.recipient(), "22990000001");
        assert_eq!(result.status(), "sent");
        assert_eq!(result.message_id(), "m-9");

        let request = transport.last_request();
        assert_eq!(request.path(), "/api/v3/otp/create");
        assert_eq!(
            request.body,
            Some(json!({"appId": "app-1", "recipient": "22990000001", "lang": "en"}))
        );
    }

    #[tokio::test]
    async fn expiration_and_custom_code_shape_payloads() {
        let transport = FakeTransport::new();
        let http = http_client(&transport);
        let otp = OtpApi::new(&http);

        otp.send_with_expiration("app-1", "22990000001", 5, OtpLang::Fr)
            .await
            .unwrap();
        otp.send_with_custom_code("app-1", "22990000001", "123456", OtpLang::De, None)
            .await
            .unwrap();
        otp.send_with_custom_code("app-1", "22990000001", "654321", OtpLang::Es, Some(10))
            .await
            .unwrap();

        let bodies = transport
            .requests()
            .into_iter()
            .map(|request| request.body.unwrap())
            .collect::<Vec<_>>();
        assert_eq!(
            bodies[0],
            json!({"appId": "app-1", "recipient": "22990000001", "lang": "fr", "minutes": 5})
        );
        assert_eq!(
            bodies[1],
            json!({"appId": "app-1", "recipient": "22990000001", "lang": "de", "code": "123456"})
        );
        assert_eq!(bodies[2]["code"], json!("654321"));
        assert_eq!(bodies[2]["minutes"], json!(10));
    }

    #[tokio::test]
    async fn missing_result_fields_read_as_empty() {
        let transport = FakeTransport::new().respond(200, r#"{"reason": "success"}"#);
        let http = http_client(&transport);

        let result = OtpApi::new(&http)
            .create(CreateOtpOptions::new("app-1", "22990000001"))
            .await
            .unwrap();
        assert_eq!(result.key(), "");
        assert_eq!(result.message_id(), "");
    }

    #[tokio::test]
    async fn verify_requires_status_200_and_checked() {
        let transport = FakeTransport::new()
            .respond(200, r#"{"reason": "success", "status": 200, "msg": "checked"}"#)
            .respond(200, r#"{"reason": "success", "status": 400, "msg": "checked"}"#)
            .respond(200, r#"{"reason": "success", "status": 200, "msg": "expired"}"#);
        let http = http_client(&transport);
        let otp = OtpApi::new(&http);

        let result = otp.verify("app-1", "k-1", "123456").await.unwrap();
        assert_eq!(result.status, 200);
        assert!(result.is_verified());
        assert!(!otp.is_verified("app-1", "k-1", "123456").await.unwrap());
        assert!(!otp.is_verified("app-1", "k-1", "123456").await.unwrap());

        let request = transport.last_request();
        assert_eq!(request.path(), "/api/v3/otp/verify");
        assert_eq!(
            request.body,
            Some(json!({"appId": "app-1", "key": "k-1", "code": "123456"}))
        );
    }

    #[tokio::test]
    async fn rate_limit_surfaces_as_api_error() {
        let transport = FakeTransport::new().respond(429, r#"{"message": "slow"}"#);
        let http = http_client(&transport);

        let err = OtpApi::new(&http)
            .send("app-1", "22990000001", OtpLang::Fr)
            .await
            .unwrap_err();
        match err {
            KyaSmsError::Api(api) => {
                assert!(api.is_rate_limit_error());
                assert_eq!(api.message(), "Too many requests. Please slow down.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
