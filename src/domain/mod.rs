//! Domain layer: request options, configuration values and normalized responses (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{
    CAMPAIGN_RECORDS_DEFAULT_PER_PAGE, CAMPAIGN_RECORDS_MAX_PER_PAGE, CampaignContent,
    CampaignRecordsFilters, CampaignSmsType, CampaignType, CreateCampaignOptions,
    CreateOtpOptions, DEFAULT_CAMPAIGN_TIMEZONE, DEFAULT_TEMPLATE_LANG, MESSAGE_STATUS_MAX_IDS,
    OtpLang, PeriodicType, SMS_HISTORY_DEFAULT_PER_PAGE, SMS_HISTORY_MAX_PER_PAGE,
    SendSmsOptions, SmsHistoryFilters, SmsType, Template,
};
pub use response::{
    CampaignDetails, CampaignGroup, CampaignProgress, CampaignRecord, CampaignRecords,
    CampaignResult, CampaignStats, CampaignStatus, CostEstimate, CountryBreakdown,
    DELIVERED_STATUS, GroupInfo, MessageInfo, MessageStatus, OTP_CHECKED_MSG, OtpResult,
    Pagination, SUCCESS_REASON, SmsHistory, SmsHistoryMessage, SmsMessage, SmsResult,
    VerifyOtpResult,
};
pub use validation::ConfigError;
pub use value::{ApiKey, BaseUrl, Recipients};
