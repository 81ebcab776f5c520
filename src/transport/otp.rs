use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;
use super::non_empty;
use crate::domain::{CreateOtpOptions, OtpResult, VerifyOtpResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateOtpPayload<'a> {
    #[serde(rename = "appId")]
    app_id: &'a str,
    recipient: &'a str,
    lang: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minutes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifyOtpPayload<'a> {
    #[serde(rename = "appId")]
    app_id: &'a str,
    key: &'a str,
    code: &'a str,
}

/// Fields the API sometimes nests under `data` instead of the top level.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OtpFields {
    #[serde(deserialize_with = "lenient::string")]
    key: String,
    #[serde(deserialize_with = "lenient::string")]
    recipient: String,
    #[serde(deserialize_with = "lenient::string")]
    status: String,
    #[serde(rename = "messageId", deserialize_with = "lenient::string")]
    message_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CreateOtpJsonResponse {
    #[serde(deserialize_with = "lenient::string")]
    reason: String,
    #[serde(deserialize_with = "lenient::string")]
    key: String,
    #[serde(deserialize_with = "lenient::string")]
    recipient: String,
    #[serde(deserialize_with = "lenient::string")]
    status: String,
    #[serde(rename = "messageId", deserialize_with = "lenient::string")]
    message_id: String,
    #[serde(deserialize_with = "lenient::or_default")]
    data: OtpFields,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VerifyOtpJsonResponse {
    #[serde(deserialize_with = "lenient::string")]
    reason: String,
    #[serde(deserialize_with = "lenient::integer")]
    status: i64,
    #[serde(deserialize_with = "lenient::string")]
    msg: String,
}

/// `code` and `minutes` are left out entirely unless the caller set them.
pub fn encode_create_otp(options: &CreateOtpOptions) -> CreateOtpPayload<'_> {
    CreateOtpPayload {
        app_id: &options.app_id,
        recipient: &options.recipient,
        lang: options.lang.as_str(),
        code: non_empty(&options.code),
        minutes: options.minutes.filter(|minutes| *minutes > 0),
    }
}

pub fn decode_otp_result(raw: Value) -> OtpResult {
    let parsed: CreateOtpJsonResponse = lenient::from_value_or_default(raw.clone());
    let data = parsed.data;
    OtpResult {
        reason: parsed.reason,
        key: prefer_top(parsed.key, data.key),
        recipient: prefer_top(parsed.recipient, data.recipient),
        status: prefer_top(parsed.status, data.status),
        message_id: prefer_top(parsed.message_id, data.message_id),
        raw,
    }
}

pub fn encode_verify_otp<'a>(app_id: &'a str, key: &'a str, code: &'a str) -> VerifyOtpPayload<'a> {
    VerifyOtpPayload { app_id, key, code }
}

pub fn decode_verify_otp(raw: Value) -> VerifyOtpResult {
    let parsed: VerifyOtpJsonResponse = lenient::from_value_or_default(raw);
    VerifyOtpResult {
        reason: parsed.reason,
        status: parsed.status,
        msg: parsed.msg,
    }
}

fn prefer_top(top: String, nested: String) -> String {
    if top.is_empty() { nested } else { top }
}
