use serde::Deserialize;
use serde_json::Value;

use crate::transport::lenient;

/// `reason` value the API uses for successful calls.
pub const SUCCESS_REASON: &str = "success";
/// Per-message status meaning the handset acknowledged delivery.
pub const DELIVERED_STATUS: &str = "DELIVERED";
/// `msg` value returned by `otp/verify` for a correct, unexpired code.
pub const OTP_CHECKED_MSG: &str = "checked";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
/// One message entry of a `sms/send` response.
pub struct SmsMessage {
    #[serde(rename = "messageId", deserialize_with = "lenient::string")]
    pub message_id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(deserialize_with = "lenient::string")]
    pub to: String,
    #[serde(deserialize_with = "lenient::string")]
    pub message: String,
    #[serde(deserialize_with = "lenient::string")]
    pub route: String,
    #[serde(deserialize_with = "lenient::unsigned")]
    pub sms_part: u64,
    #[serde(deserialize_with = "lenient::float")]
    pub price: f64,
    #[serde(deserialize_with = "lenient::string")]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq)]
/// Result of `sms/send`.
///
/// Accessors describing "the" message read the first entry of `data`; they
/// return `None` when the response carried no message at all.
pub struct SmsResult {
    pub(crate) reason: String,
    pub(crate) from: String,
    pub(crate) wallet: String,
    pub(crate) callback_url: String,
    pub(crate) messages: Vec<SmsMessage>,
    pub(crate) raw: Value,
}

impl SmsResult {
    pub fn is_success(&self) -> bool {
        self.reason == SUCCESS_REASON
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn message_id(&self) -> Option<&str> {
        self.first_message().map(|msg| msg.message_id.as_str())
    }

    pub fn message_ids(&self) -> Vec<&str> {
        self.messages
            .iter()
            .map(|msg| msg.message_id.as_str())
            .collect()
    }

    pub fn status(&self) -> Option<&str> {
        self.first_message().map(|msg| msg.status.as_str())
    }

    pub fn route(&self) -> Option<&str> {
        self.first_message().map(|msg| msg.route.as_str())
    }

    /// Price of the first message, `0.0` when unknown.
    pub fn price(&self) -> f64 {
        self.first_message().map_or(0.0, |msg| msg.price)
    }

    /// Sum of all message prices.
    pub fn total_price(&self) -> f64 {
        self.messages.iter().map(|msg| msg.price).sum()
    }

    /// Segment count of the first message; at least one segment is always billed.
    pub fn sms_part(&self) -> u64 {
        match self.first_message().map(|msg| msg.sms_part) {
            Some(parts) if parts > 0 => parts,
            _ => 1,
        }
    }

    pub fn to(&self) -> Option<&str> {
        self.first_message().map(|msg| msg.to.as_str())
    }

    pub fn message(&self) -> Option<&str> {
        self.first_message().map(|msg| msg.message.as_str())
    }

    pub fn created_at(&self) -> Option<&str> {
        self.first_message().map(|msg| msg.created_at.as_str())
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn wallet(&self) -> &str {
        &self.wallet
    }

    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }

    pub fn data(&self) -> &[SmsMessage] {
        &self.messages
    }

    pub fn first_message(&self) -> Option<&SmsMessage> {
        self.messages.first()
    }

    pub fn raw_response(&self) -> &Value {
        &self.raw
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Pagination {
    #[serde(deserialize_with = "lenient::unsigned")]
    pub current_page: u64,
    #[serde(deserialize_with = "lenient::unsigned")]
    pub per_page: u64,
    #[serde(deserialize_with = "lenient::unsigned")]
    pub total_pages: u64,
    #[serde(deserialize_with = "lenient::unsigned")]
    pub total_records: u64,
    #[serde(deserialize_with = "lenient::boolean")]
    pub has_more: bool,
    #[serde(deserialize_with = "lenient::boolean")]
    pub records_limited: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SmsHistoryMessage {
    #[serde(rename = "messageId", deserialize_with = "lenient::string")]
    pub message_id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub to: String,
    #[serde(deserialize_with = "lenient::string")]
    pub from: String,
    #[serde(deserialize_with = "lenient::string")]
    pub message: String,
    #[serde(deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(deserialize_with = "lenient::string")]
    pub route: String,
    #[serde(deserialize_with = "lenient::unsigned")]
    pub sms_parts: u64,
    #[serde(deserialize_with = "lenient::float")]
    pub price: f64,
    #[serde(rename = "type", deserialize_with = "lenient::string")]
    pub sms_type: String,
    #[serde(deserialize_with = "lenient::opt_unsigned")]
    pub campaign_id: Option<u64>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub ref_custom: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub created_at: String,
    #[serde(deserialize_with = "lenient::string")]
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
/// One page of `sms/history`.
pub struct SmsHistory {
    #[serde(deserialize_with = "lenient::list")]
    pub messages: Vec<SmsHistoryMessage>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
/// Delivery state of one message, as reported by `message/status`.
pub struct MessageStatus {
    #[serde(deserialize_with = "lenient::string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(deserialize_with = "lenient::string")]
    pub route: String,
    #[serde(deserialize_with = "lenient::unsigned")]
    pub sms_parts: u64,
    #[serde(deserialize_with = "lenient::float")]
    pub price: f64,
    #[serde(deserialize_with = "lenient::string")]
    pub updated_at: String,
}

impl MessageStatus {
    /// Exact, case-sensitive match on `DELIVERED`.
    pub fn is_delivered(&self) -> bool {
        self.status == DELIVERED_STATUS
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Result of `otp/create`.
///
/// Each field is read from the top level of the response first and from the
/// nested `data` object second; missing values are empty strings.
pub struct OtpResult {
    pub(crate) reason: String,
    pub(crate) key: String,
    pub(crate) recipient: String,
    pub(crate) status: String,
    pub(crate) message_id: String,
    pub(crate) raw: Value,
}

impl OtpResult {
    pub fn is_success(&self) -> bool {
        self.reason == SUCCESS_REASON
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Verification key to pass back to `otp/verify`.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    pub fn raw_response(&self) -> &Value {
        &self.raw
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Flattened `otp/verify` response. Missing fields are `""` / `0`.
pub struct VerifyOtpResult {
    pub reason: String,
    pub status: i64,
    pub msg: String,
}

impl VerifyOtpResult {
    /// Both `status == 200` and `msg == "checked"` are required.
    pub fn is_verified(&self) -> bool {
        self.status == 200 && self.msg == OTP_CHECKED_MSG
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Result of `sms/campaign/create`.
///
/// Fields are read from the top level first and from `data` second.
pub struct CampaignResult {
    pub(crate) reason: String,
    pub(crate) campaign_id: Option<u64>,
    pub(crate) status: Option<String>,
    pub(crate) scheduled_at: Option<String>,
    pub(crate) raw: Value,
}

impl CampaignResult {
    pub fn is_success(&self) -> bool {
        self.reason == SUCCESS_REASON
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn campaign_id(&self) -> Option<u64> {
        self.campaign_id
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn scheduled_at(&self) -> Option<&str> {
        self.scheduled_at.as_deref()
    }

    pub fn raw_response(&self) -> &Value {
        &self.raw
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CampaignProgress {
    #[serde(deserialize_with = "lenient::unsigned")]
    pub total: u64,
    #[serde(deserialize_with = "lenient::unsigned")]
    pub sent: u64,
    #[serde(deserialize_with = "lenient::unsigned")]
    pub delivered: u64,
    #[serde(deserialize_with = "lenient::unsigned")]
    pub failed: u64,
    #[serde(deserialize_with = "lenient::unsigned")]
    pub pending: u64,
}

impl CampaignProgress {
    /// `sent / total` as a whole percentage, rounded half up; `0` for an empty campaign.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.sent as f64 / self.total as f64) * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CampaignDetails {
    #[serde(deserialize_with = "lenient::unsigned")]
    pub campaign_id: u64,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(rename = "type", deserialize_with = "lenient::string")]
    pub campaign_type: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub progress: Option<CampaignProgress>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub execution_date: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub created_at: String,
    #[serde(deserialize_with = "lenient::string")]
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
/// Response of `sms/campaign/status/{id}`.
pub struct CampaignStatus {
    #[serde(deserialize_with = "lenient::string")]
    pub reason: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub data: CampaignDetails,
}

impl CampaignStatus {
    /// Sent percentage, `0` when the progress block is missing or empty.
    pub fn progress_percent(&self) -> u32 {
        self.data
            .progress
            .as_ref()
            .map_or(0, CampaignProgress::percent)
    }

    /// `true` only for the exact statuses `completed` and `executed`.
    pub fn is_completed(&self) -> bool {
        matches!(self.data.status.as_str(), "completed" | "executed")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CampaignGroup {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CampaignStats {
    #[serde(deserialize_with = "lenient::unsigned")]
    pub total_sent: u64,
    #[serde(deserialize_with = "lenient::unsigned")]
    pub delivered: u64,
    #[serde(deserialize_with = "lenient::unsigned")]
    pub failed: u64,
    #[serde(deserialize_with = "lenient::unsigned")]
    pub pending: u64,
    #[serde(deserialize_with = "lenient::float")]
    pub total_cost: f64,
    #[serde(deserialize_with = "lenient::unsigned")]
    pub total_sms_parts: u64,
    #[serde(deserialize_with = "lenient::float")]
    pub delivery_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CampaignRecord {
    #[serde(deserialize_with = "lenient::unsigned")]
    pub id: u64,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "lenient::string")]
    pub campaign_type: String,
    #[serde(deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(deserialize_with = "lenient::string")]
    pub sender: String,
    #[serde(deserialize_with = "lenient::string")]
    pub sms_type: String,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_template: bool,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub template_id: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub template_name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub execution_date: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub schedule_type: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub timezone: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub sms_content: String,
    #[serde(deserialize_with = "lenient::list")]
    pub groups: Vec<CampaignGroup>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub stats: CampaignStats,
    #[serde(deserialize_with = "lenient::string")]
    pub created_at: String,
    #[serde(deserialize_with = "lenient::string")]
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
/// One page of `sms/campaign/records`.
pub struct CampaignRecords {
    #[serde(deserialize_with = "lenient::list")]
    pub campaigns: Vec<CampaignRecord>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
/// How the provider analysed the message text.
pub struct MessageInfo {
    #[serde(deserialize_with = "lenient::string")]
    pub encoding: String,
    #[serde(deserialize_with = "lenient::unsigned")]
    pub characters_used: u64,
    #[serde(deserialize_with = "lenient::unsigned")]
    pub characters_per_message: u64,
    #[serde(deserialize_with = "lenient::unsigned")]
    pub base_sms_parts: u64,
    #[serde(deserialize_with = "lenient::boolean")]
    pub has_dynamic_variables: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CountryBreakdown {
    #[serde(deserialize_with = "lenient::string")]
    pub country: String,
    #[serde(deserialize_with = "lenient::string")]
    pub operator: String,
    #[serde(deserialize_with = "lenient::unsigned")]
    pub contacts: u64,
    #[serde(deserialize_with = "lenient::unsigned")]
    pub sms_parts: u64,
    #[serde(deserialize_with = "lenient::float")]
    pub cost: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub price_per_sms: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GroupInfo {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::unsigned")]
    pub contact_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
/// Dry-run estimate from `sms/campaign/calculate-cost`, as computed by the provider.
pub struct CostEstimate {
    #[serde(deserialize_with = "lenient::float")]
    pub estimated_cost: f64,
    #[serde(deserialize_with = "lenient::unsigned")]
    pub total_recipients: u64,
    #[serde(deserialize_with = "lenient::unsigned")]
    pub valid_recipients: u64,
    #[serde(deserialize_with = "lenient::unsigned")]
    pub invalid_contacts: u64,
    #[serde(deserialize_with = "lenient::unsigned")]
    pub total_sms_parts: u64,
    #[serde(deserialize_with = "lenient::float")]
    pub average_sms_parts: f64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub message_info: MessageInfo,
    #[serde(deserialize_with = "lenient::list")]
    pub country_breakdown: Vec<CountryBreakdown>,
    #[serde(deserialize_with = "lenient::list")]
    pub groups_info: Vec<GroupInfo>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_estimate: bool,
}
