use std::collections::BTreeMap;

use super::error::KyaSmsError;
use super::http::HttpClient;
use crate::domain::{
    MessageStatus, Recipients, SendSmsOptions, SmsHistory, SmsHistoryFilters, SmsResult, SmsType,
    Template,
};

const SEND_PATH: &str = "/sms/send";
const HISTORY_PATH: &str = "/sms/history";
const STATUS_PATH: &str = "/message/status";

#[derive(Debug, Clone, Copy)]
/// SMS operations, obtained from [`KyaSmsClient::sms`](crate::KyaSmsClient::sms).
pub struct SmsApi<'a> {
    http: &'a HttpClient,
}

impl<'a> SmsApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Send an SMS with full control over the options.
    ///
    /// `to` is always sent as one comma-joined string.
    pub async fn send(&self, options: SendSmsOptions) -> Result<SmsResult, KyaSmsError> {
        let payload = crate::transport::encode_send_sms(&options);
        let raw = self.http.post(SEND_PATH, &payload).await?;
        Ok(crate::transport::decode_sms_result(raw))
    }

    /// Plain text message to one or many recipients.
    pub async fn send_simple(
        &self,
        from: impl Into<String>,
        to: impl Into<Recipients>,
        message: impl Into<String>,
    ) -> Result<SmsResult, KyaSmsError> {
        self.send(SendSmsOptions {
            message: Some(message.into()),
            ..SendSmsOptions::new(from, to)
        })
        .await
    }

    /// Flash message, displayed directly on the handset screen.
    pub async fn send_flash(
        &self,
        from: impl Into<String>,
        to: impl Into<Recipients>,
        message: impl Into<String>,
    ) -> Result<SmsResult, KyaSmsError> {
        self.send(SendSmsOptions {
            message: Some(message.into()),
            sms_type: SmsType::Flash,
            ..SendSmsOptions::new(from, to)
        })
        .await
    }

    pub async fn send_with_template(
        &self,
        from: impl Into<String>,
        to: impl Into<Recipients>,
        template_id: impl Into<String>,
        lang: impl Into<String>,
    ) -> Result<SmsResult, KyaSmsError> {
        self.send(SendSmsOptions {
            is_template: true,
            template: Some(Template::new(template_id, lang)),
            ..SendSmsOptions::new(from, to)
        })
        .await
    }

    /// Send to contact groups instead of phone numbers.
    pub async fn send_bulk(
        &self,
        from: impl Into<String>,
        group_ids: impl Into<Recipients>,
        message: impl Into<String>,
    ) -> Result<SmsResult, KyaSmsError> {
        self.send(SendSmsOptions {
            message: Some(message.into()),
            is_bulk: true,
            ..SendSmsOptions::new(from, group_ids)
        })
        .await
    }

    pub async fn send_bulk_with_template(
        &self,
        from: impl Into<String>,
        group_ids: impl Into<Recipients>,
        template_id: impl Into<String>,
        lang: impl Into<String>,
    ) -> Result<SmsResult, KyaSmsError> {
        self.send(SendSmsOptions {
            is_bulk: true,
            is_template: true,
            template: Some(Template::new(template_id, lang)),
            ..SendSmsOptions::new(from, group_ids)
        })
        .await
    }

    /// One page of sent messages. `per_page` above 100 is clamped, not rejected.
    pub async fn get_history(
        &self,
        filters: &SmsHistoryFilters,
    ) -> Result<SmsHistory, KyaSmsError> {
        let payload = crate::transport::encode_sms_history(filters);
        let raw = self.http.post(HISTORY_PATH, &payload).await?;
        Ok(crate::transport::decode_sms_history(raw))
    }

    /// Delivery state for up to 100 messages; extra ids are silently dropped.
    ///
    /// Unknown ids map to `None`.
    pub async fn get_status<S: AsRef<str>>(
        &self,
        message_ids: &[S],
    ) -> Result<BTreeMap<String, Option<MessageStatus>>, KyaSmsError> {
        let payload = crate::transport::encode_message_status(message_ids);
        let raw = self.http.post(STATUS_PATH, &payload).await?;
        Ok(crate::transport::decode_message_status(raw))
    }

    pub async fn get_message_status(
        &self,
        message_id: &str,
    ) -> Result<Option<MessageStatus>, KyaSmsError> {
        let mut statuses = self.get_status(&[message_id]).await?;
        Ok(statuses.remove(message_id).flatten())
    }

    /// `true` only when the message status is exactly `DELIVERED`.
    pub async fn is_delivered(&self, message_id: &str) -> Result<bool, KyaSmsError> {
        let status = self.get_message_status(message_id).await?;
        Ok(status.is_some_and(|status| status.is_delivered()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::client::http::HttpMethod;
    use crate::client::http::testing::{FakeTransport, http_client};

    #[tokio::test]
    async fn send_posts_payload_and_wraps_result() {
        let transport = FakeTransport::new().respond(
            200,
            r#"{"reason": "success", "data": [{"messageId": "m-1", "price": 20}]}"#,
        );
        let http = http_client(&transport);

        let result = SmsApi::new(&http)
            .send(SendSmsOptions {
                message: Some("hello".to_owned()),
                ref_custom: Some("order-1".to_owned()),
                ..SendSmsOptions::new("MyApp", "22990000001")
            })
            .await
            .unwrap();
        assert!(result.is_success());
        assert_eq!(result.message_id(), Some("m-1"));
        assert_eq!(result.price(), 20.0);

        let request = transport.last_request();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.path(), "/api/v3/sms/send");
        assert_eq!(
            request.body,
            Some(json!({
                "from": "MyApp",
                "to": "22990000001",
                "type": "text",
                "isBulk": false,
                "isTemplate": false,
                "source": 2,
                "message": "hello",
                "ref_custom": "order-1"
            }))
        );
    }

    #[tokio::test]
    async fn send_simple_matches_send_payload_for_many_recipients() {
        let transport = FakeTransport::new();
        let http = http_client(&transport);
        let sms = SmsApi::new(&http);

        sms.send_simple("MyApp", ["22990000001", "22990000002"], "hi")
            .await
            .unwrap();
        sms.send(SendSmsOptions {
            message: Some("hi".to_owned()),
            ..SendSmsOptions::new(
                "MyApp",
                vec!["22990000001".to_owned(), "22990000002".to_owned()],
            )
        })
        .await
        .unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].body, requests[1].body);
        let first = serde_json::to_string(&requests[0].body).unwrap();
        let second = serde_json::to_string(&requests[1].body).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            requests[0].body.as_ref().unwrap()["to"],
            json!("22990000001,22990000002")
        );
    }

    #[tokio::test]
    async fn convenience_senders_shape_payloads() {
        let transport = FakeTransport::new();
        let http = http_client(&transport);
        let sms = SmsApi::new(&http);

        sms.send_flash("MyApp", "22990000001", "flash!").await.unwrap();
        sms.send_with_template("MyApp", "22990000001", "tpl-1", "fr")
            .await
            .unwrap();
        sms.send_bulk("MyApp", ["G1", "G2"], "to groups").await.unwrap();
        sms.send_bulk_with_template("MyApp", ["G1"], "tpl-2", "en")
            .await
            .unwrap();

        let bodies = transport
            .requests()
            .into_iter()
            .map(|request| request.body.unwrap())
            .collect::<Vec<_>>();

        assert_eq!(bodies[0]["type"], json!("flash"));
        assert_eq!(bodies[0]["message"], json!("flash!"));

        assert_eq!(bodies[1]["isTemplate"], json!(true));
        assert_eq!(bodies[1]["template"], json!({"id": "tpl-1", "lang": "fr"}));
        assert!(bodies[1].get("message").is_none());

        assert_eq!(bodies[2]["isBulk"], json!(true));
        assert_eq!(bodies[2]["to"], json!("G1,G2"));

        assert_eq!(
            bodies[3],
            json!({
                "from": "MyApp",
                "to": "G1",
                "type": "text",
                "isBulk": true,
                "isTemplate": true,
                "source": 2,
                "template": {"id": "tpl-2", "lang": "en"}
            })
        );
    }

    #[tokio::test]
    async fn get_history_clamps_per_page_silently() {
        let transport = FakeTransport::new().respond(
            200,
            r#"{"reason": "success", "data": {"messages": [], "pagination": {"per_page": 100}}}"#,
        );
        let http = http_client(&transport);

        let history = SmsApi::new(&http)
            .get_history(&SmsHistoryFilters {
                per_page: Some(500),
                contact: Some("22990000001".to_owned()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(history.messages.is_empty());
        assert_eq!(history.pagination.per_page, 100);

        let request = transport.last_request();
        assert_eq!(request.path(), "/api/v3/sms/history");
        assert_eq!(
            request.body,
            Some(json!({"page": 1, "per_page": 100, "contact": "22990000001"}))
        );
    }

    #[tokio::test]
    async fn get_status_truncates_ids() {
        let transport = FakeTransport::new();
        let http = http_client(&transport);
        let ids = (0..120).map(|idx| format!("m-{idx}")).collect::<Vec<_>>();

        let statuses = SmsApi::new(&http).get_status(&ids).await.unwrap();
        assert!(statuses.is_empty());

        let request = transport.last_request();
        assert_eq!(request.path(), "/api/v3/message/status");
        let sent = request.body.unwrap()["message_ids"]
            .as_array()
            .unwrap()
            .len();
        assert_eq!(sent, 100);
    }

    #[tokio::test]
    async fn message_status_and_delivery() {
        let transport = FakeTransport::new()
            .respond(
                200,
                r#"{"reason": "success", "data": {"m-1": {"status": "DELIVERED", "phone": "22990000001"}}}"#,
            )
            .respond(200, r#"{"reason": "success", "data": {"m-2": null}}"#)
            .respond(
                200,
                r#"{"reason": "success", "data": {"m-3": {"status": "delivered"}}}"#,
            );
        let http = http_client(&transport);
        let sms = SmsApi::new(&http);

        let status = sms.get_message_status("m-1").await.unwrap().unwrap();
        assert_eq!(status.phone, "22990000001");
        assert!(!sms.is_delivered("m-2").await.unwrap());
        assert!(!sms.is_delivered("m-3").await.unwrap());

        assert_eq!(
            transport.requests()[0].body,
            Some(json!({"message_ids": ["m-1"]}))
        );
    }

    #[tokio::test]
    async fn is_delivered_true_for_exact_status() {
        let transport = FakeTransport::new().respond(
            200,
            r#"{"data": {"m-1": {"status": "DELIVERED"}}}"#,
        );
        let http = http_client(&transport);
        assert!(SmsApi::new(&http).is_delivered("m-1").await.unwrap());
    }

    #[tokio::test]
    async fn non_object_success_bodies_degrade_to_defaults() {
        let transport = FakeTransport::new()
            .respond(200, r#"["success", "MyApp"]"#)
            .respond(200, "<html>OK</html>");
        let http = http_client(&transport);
        let sms = SmsApi::new(&http);

        for _ in 0..2 {
            let result = sms.send_simple("MyApp", "22990000001", "hi").await.unwrap();
            assert!(!result.is_success());
            assert_eq!(result.reason(), "");
            assert_eq!(result.from(), "");
            assert_eq!(result.message_id(), None);
            assert_eq!(result.sms_part(), 1);
        }
    }

    #[tokio::test]
    async fn validation_errors_propagate_unchanged() {
        let transport = FakeTransport::new().respond(
            422,
            r#"{"message": "invalid", "errors": {"from": ["The from field is required."]}}"#,
        );
        let http = http_client(&transport);

        let err = SmsApi::new(&http)
            .send_simple("", "22990000001", "hi")
            .await
            .unwrap_err();
        match err {
            KyaSmsError::Validation(err) => {
                assert_eq!(
                    err.error("from").unwrap().messages(),
                    vec!["The from field is required."]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
