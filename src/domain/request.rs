use crate::domain::value::Recipients;

/// Maximum number of ids accepted by `message/status`; extra ids are dropped.
pub const MESSAGE_STATUS_MAX_IDS: usize = 100;
/// Default `per_page` for SMS history.
pub const SMS_HISTORY_DEFAULT_PER_PAGE: u32 = 50;
/// Upper bound for SMS history `per_page`; larger values are clamped.
pub const SMS_HISTORY_MAX_PER_PAGE: u32 = 100;
/// Default `per_page` for campaign records.
pub const CAMPAIGN_RECORDS_DEFAULT_PER_PAGE: u32 = 20;
/// Upper bound for campaign records `per_page`; larger values are clamped.
pub const CAMPAIGN_RECORDS_MAX_PER_PAGE: u32 = 50;
/// Timezone used by the scheduled and periodic campaign shortcuts.
pub const DEFAULT_CAMPAIGN_TIMEZONE: &str = "Africa/Porto-Novo";
/// Template language used when a campaign template has none.
pub const DEFAULT_TEMPLATE_LANG: &str = "fr";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmsType {
    #[default]
    Text,
    /// Displayed directly on the handset screen.
    Flash,
}

impl SmsType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Flash => "flash",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Provider-side message template reference.
pub struct Template {
    pub id: String,
    pub lang: String,
}

impl Template {
    pub fn new(id: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            lang: lang.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Options for `sms/send`.
///
/// Start from [`SendSmsOptions::new`] and override fields with struct update
/// syntax. `template` is only sent when `is_template` is set.
pub struct SendSmsOptions {
    pub from: String,
    pub to: Recipients,
    pub message: Option<String>,
    pub sms_type: SmsType,
    pub wallet: Option<String>,
    pub callback_url: Option<String>,
    pub ref_custom: Option<String>,
    pub is_bulk: bool,
    pub is_template: bool,
    pub template: Option<Template>,
}

impl SendSmsOptions {
    pub fn new(from: impl Into<String>, to: impl Into<Recipients>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            message: None,
            sms_type: SmsType::default(),
            wallet: None,
            callback_url: None,
            ref_custom: None,
            is_bulk: false,
            is_template: false,
            template: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Filters for `sms/history`. Unset pagination falls back to page 1, 50 per page.
pub struct SmsHistoryFilters {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    pub sender: Option<String>,
    pub contact: Option<String>,
}

impl SmsHistoryFilters {
    pub fn effective_page(&self) -> u32 {
        effective_page(self.page)
    }

    pub fn effective_per_page(&self) -> u32 {
        clamp_per_page(
            self.per_page,
            SMS_HISTORY_DEFAULT_PER_PAGE,
            SMS_HISTORY_MAX_PER_PAGE,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OtpLang {
    #[default]
    Fr,
    En,
    Es,
    De,
}

impl OtpLang {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fr => "fr",
            Self::En => "en",
            Self::Es => "es",
            Self::De => "de",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Options for `otp/create`.
///
/// `code` and `minutes` are left to the server defaults when `None`.
pub struct CreateOtpOptions {
    pub app_id: String,
    pub recipient: String,
    pub lang: OtpLang,
    pub code: Option<String>,
    pub minutes: Option<u32>,
}

impl CreateOtpOptions {
    pub fn new(app_id: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            recipient: recipient.into(),
            lang: OtpLang::default(),
            code: None,
            minutes: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CampaignType {
    /// Sent immediately.
    #[default]
    Auto,
    /// Sent once at `schedule_date`.
    Customize,
    /// Recurs according to `campaign_periodic`.
    Periodic,
}

impl CampaignType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Customize => "customize",
            Self::Periodic => "periodic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CampaignSmsType {
    #[default]
    Text,
    Flash,
    Unicode,
}

impl CampaignSmsType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Flash => "flash",
            Self::Unicode => "unicode",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodicType {
    WeeklyStart,
    WeeklyEnd,
    MonthlyStart,
    MonthlyEnd,
    SpecificDayOfMonth,
    BeginningOfYear,
    Christmas,
}

impl PeriodicType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WeeklyStart => "weekly_start",
            Self::WeeklyEnd => "weekly_end",
            Self::MonthlyStart => "monthly_start",
            Self::MonthlyEnd => "monthly_end",
            Self::SpecificDayOfMonth => "specific_day_of_month",
            Self::BeginningOfYear => "beginning_of_year",
            Self::Christmas => "christmas",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Body of a campaign: literal text or a stored template.
pub enum CampaignContent {
    Message {
        message: String,
    },
    Template {
        template_id: String,
        template_default_lang: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Options for `sms/campaign/create`.
///
/// Content precedence: `content`, then `template_id` (+ `template_lang`), then
/// `message`. Type-specific fields (`schedule_date` for
/// [`CampaignType::Customize`], `campaign_periodic` for
/// [`CampaignType::Periodic`]) are passed through unchecked; the API rejects
/// inconsistent combinations.
pub struct CreateCampaignOptions {
    pub name: String,
    pub groups: Vec<String>,
    pub sender_id: String,
    pub campaign_type: CampaignType,
    pub sms_type: CampaignSmsType,
    pub content: Option<CampaignContent>,
    pub message: Option<String>,
    pub template_id: Option<String>,
    pub template_lang: Option<String>,
    pub timezone: Option<String>,
    pub schedule_date: Option<String>,
    pub campaign_periodic: Option<PeriodicType>,
}

impl CreateCampaignOptions {
    pub fn new(
        name: impl Into<String>,
        groups: Vec<String>,
        sender_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            groups,
            sender_id: sender_id.into(),
            campaign_type: CampaignType::default(),
            sms_type: CampaignSmsType::default(),
            content: None,
            message: None,
            template_id: None,
            template_lang: None,
            timezone: None,
            schedule_date: None,
            campaign_periodic: None,
        }
    }

    /// Resolve the content actually sent, applying the precedence rules.
    pub fn resolved_content(&self) -> CampaignContent {
        if let Some(content) = self.content.as_ref() {
            return content.clone();
        }
        if let Some(template_id) = self.template_id.as_ref().filter(|id| !id.is_empty()) {
            return CampaignContent::Template {
                template_id: template_id.clone(),
                template_default_lang: self
                    .template_lang
                    .clone()
                    .unwrap_or_else(|| DEFAULT_TEMPLATE_LANG.to_owned()),
            };
        }
        CampaignContent::Message {
            message: self.message.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Filters for `sms/campaign/records`. Unset pagination falls back to page 1, 20 per page.
pub struct CampaignRecordsFilters {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<String>,
    pub campaign_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl CampaignRecordsFilters {
    pub fn effective_page(&self) -> u32 {
        effective_page(self.page)
    }

    pub fn effective_per_page(&self) -> u32 {
        clamp_per_page(
            self.per_page,
            CAMPAIGN_RECORDS_DEFAULT_PER_PAGE,
            CAMPAIGN_RECORDS_MAX_PER_PAGE,
        )
    }
}

fn effective_page(page: Option<u32>) -> u32 {
    page.filter(|page| *page > 0).unwrap_or(1)
}

fn clamp_per_page(per_page: Option<u32>, default: u32, max: u32) -> u32 {
    per_page
        .filter(|per_page| *per_page > 0)
        .unwrap_or(default)
        .min(max)
}
