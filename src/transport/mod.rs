//! Transport layer: JSON payload shapes and response decoding.
//!
//! Encoders borrow from the domain options and serialize with the exact wire
//! names the API expects. Decoders never fail; see [`lenient`].

mod campaign;
pub(crate) mod lenient;
mod otp;
mod sms;

use serde_json::Value;

pub use campaign::{
    decode_campaign_records, decode_campaign_result, decode_campaign_status,
    decode_cost_estimate, encode_calculate_cost, encode_campaign_records_query,
    encode_create_campaign,
};
pub use otp::{decode_otp_result, decode_verify_otp, encode_create_otp, encode_verify_otp};
pub use sms::{
    decode_message_status, decode_sms_history, decode_sms_result, encode_message_status,
    encode_send_sms, encode_sms_history,
};

/// Optional strings are only sent when non-empty.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// List, status and cost responses wrap their payload in `data`.
fn data_of(raw: Value) -> Value {
    match raw {
        Value::Object(mut object) => object.remove("data").unwrap_or(Value::Null),
        _ => Value::Null,
    }
}
