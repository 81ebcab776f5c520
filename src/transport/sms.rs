use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;
use super::non_empty;
use crate::domain::{
    MESSAGE_STATUS_MAX_IDS, MessageStatus, SendSmsOptions, SmsHistory, SmsHistoryFilters,
    SmsMessage, SmsResult,
};

/// Marks traffic as API-originated (as opposed to the web console).
const API_SOURCE: u8 = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendSmsPayload<'a> {
    from: &'a str,
    to: String,
    #[serde(rename = "type")]
    sms_type: &'static str,
    #[serde(rename = "isBulk")]
    is_bulk: bool,
    #[serde(rename = "isTemplate")]
    is_template: bool,
    source: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    wallet: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    callback_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ref_custom: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    template: Option<TemplatePayload<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct TemplatePayload<'a> {
    id: &'a str,
    lang: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmsHistoryPayload<'a> {
    page: u32,
    per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sender: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contact: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageStatusPayload<'a> {
    message_ids: Vec<&'a str>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SendSmsJsonResponse {
    #[serde(deserialize_with = "lenient::string")]
    reason: String,
    #[serde(deserialize_with = "lenient::string")]
    from: String,
    #[serde(deserialize_with = "lenient::string")]
    wallet: String,
    #[serde(deserialize_with = "lenient::string")]
    callback_url: String,
    #[serde(deserialize_with = "lenient::list")]
    data: Vec<SmsMessage>,
}

pub fn encode_send_sms(options: &SendSmsOptions) -> SendSmsPayload<'_> {
    let template = if options.is_template {
        options.template.as_ref().map(|template| TemplatePayload {
            id: &template.id,
            lang: &template.lang,
        })
    } else {
        None
    };

    SendSmsPayload {
        from: &options.from,
        to: options.to.joined(),
        sms_type: options.sms_type.as_str(),
        is_bulk: options.is_bulk,
        is_template: options.is_template,
        source: API_SOURCE,
        message: non_empty(&options.message),
        wallet: non_empty(&options.wallet),
        callback_url: non_empty(&options.callback_url),
        ref_custom: non_empty(&options.ref_custom),
        template,
    }
}

pub fn decode_sms_result(raw: Value) -> SmsResult {
    let parsed: SendSmsJsonResponse = lenient::from_value_or_default(raw.clone());
    SmsResult {
        reason: parsed.reason,
        from: parsed.from,
        wallet: parsed.wallet,
        callback_url: parsed.callback_url,
        messages: parsed.data,
        raw,
    }
}

pub fn encode_sms_history(filters: &SmsHistoryFilters) -> SmsHistoryPayload<'_> {
    SmsHistoryPayload {
        page: filters.effective_page(),
        per_page: filters.effective_per_page(),
        start_date: non_empty(&filters.start_date),
        end_date: non_empty(&filters.end_date),
        status: non_empty(&filters.status),
        sender: non_empty(&filters.sender),
        contact: non_empty(&filters.contact),
    }
}

pub fn decode_sms_history(raw: Value) -> SmsHistory {
    lenient::from_value_or_default(super::data_of(raw))
}

/// Ids beyond [`MESSAGE_STATUS_MAX_IDS`] are dropped.
pub fn encode_message_status<S: AsRef<str>>(message_ids: &[S]) -> MessageStatusPayload<'_> {
    MessageStatusPayload {
        message_ids: message_ids
            .iter()
            .take(MESSAGE_STATUS_MAX_IDS)
            .map(|id| id.as_ref())
            .collect(),
    }
}

/// `null` entries (unknown ids) and malformed entries map to `None`.
pub fn decode_message_status(raw: Value) -> BTreeMap<String, Option<MessageStatus>> {
    match super::data_of(raw) {
        Value::Object(entries) => entries
            .into_iter()
            .map(|(id, entry)| {
                let status = match entry {
                    entry @ Value::Object(_) => Some(lenient::from_value_or_default(entry)),
                    _ => None,
                };
                (id, status)
            })
            .collect(),
        _ => BTreeMap::new(),
    }
}
