use std::fmt::Display;

use super::error::KyaSmsError;
use super::http::HttpClient;
use crate::domain::{
    CampaignContent, CampaignRecords, CampaignRecordsFilters, CampaignResult, CampaignStatus,
    CampaignType, CostEstimate, CreateCampaignOptions, DEFAULT_CAMPAIGN_TIMEZONE, PeriodicType,
};

const CREATE_PATH: &str = "/sms/campaign/create";
const STATUS_PATH: &str = "/sms/campaign/status";
const RECORDS_PATH: &str = "/sms/campaign/records";
const CALCULATE_COST_PATH: &str = "/sms/campaign/calculate-cost";

#[derive(Debug, Clone, Copy)]
/// Campaign operations, obtained from [`KyaSmsClient::campaign`](crate::KyaSmsClient::campaign).
pub struct CampaignApi<'a> {
    http: &'a HttpClient,
}

impl<'a> CampaignApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Create a campaign. Content precedence is described on [`CreateCampaignOptions`].
    pub async fn create(
        &self,
        options: CreateCampaignOptions,
    ) -> Result<CampaignResult, KyaSmsError> {
        let payload = crate::transport::encode_create_campaign(&options);
        let raw = self.http.post(CREATE_PATH, &payload).await?;
        Ok(crate::transport::decode_campaign_result(raw))
    }

    /// Immediate campaign with a plain message.
    pub async fn create_automatic(
        &self,
        name: impl Into<String>,
        groups: Vec<String>,
        sender_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<CampaignResult, KyaSmsError> {
        self.create(CreateCampaignOptions {
            message: Some(message.into()),
            ..CreateCampaignOptions::new(name, groups, sender_id)
        })
        .await
    }

    /// One-off campaign sent at `schedule_date` (`YYYY-MM-DD HH:MM:SS`, in `timezone`).
    pub async fn create_scheduled(
        &self,
        name: impl Into<String>,
        groups: Vec<String>,
        sender_id: impl Into<String>,
        message: impl Into<String>,
        schedule_date: impl Into<String>,
        timezone: Option<String>,
    ) -> Result<CampaignResult, KyaSmsError> {
        self.create(CreateCampaignOptions {
            campaign_type: CampaignType::Customize,
            message: Some(message.into()),
            schedule_date: Some(schedule_date.into()),
            timezone: Some(timezone.unwrap_or_else(|| DEFAULT_CAMPAIGN_TIMEZONE.to_owned())),
            ..CreateCampaignOptions::new(name, groups, sender_id)
        })
        .await
    }

    /// Recurring campaign.
    pub async fn create_periodic(
        &self,
        name: impl Into<String>,
        groups: Vec<String>,
        sender_id: impl Into<String>,
        message: impl Into<String>,
        periodic: PeriodicType,
        timezone: Option<String>,
    ) -> Result<CampaignResult, KyaSmsError> {
        self.create(CreateCampaignOptions {
            campaign_type: CampaignType::Periodic,
            message: Some(message.into()),
            campaign_periodic: Some(periodic),
            timezone: Some(timezone.unwrap_or_else(|| DEFAULT_CAMPAIGN_TIMEZONE.to_owned())),
            ..CreateCampaignOptions::new(name, groups, sender_id)
        })
        .await
    }

    /// Immediate campaign rendering a stored template.
    pub async fn create_with_template(
        &self,
        name: impl Into<String>,
        groups: Vec<String>,
        sender_id: impl Into<String>,
        template_id: impl Into<String>,
        lang: impl Into<String>,
    ) -> Result<CampaignResult, KyaSmsError> {
        self.create(CreateCampaignOptions {
            content: Some(CampaignContent::Template {
                template_id: template_id.into(),
                template_default_lang: lang.into(),
            }),
            ..CreateCampaignOptions::new(name, groups, sender_id)
        })
        .await
    }

    pub async fn get_status(
        &self,
        campaign_id: impl Display,
    ) -> Result<CampaignStatus, KyaSmsError> {
        let path = format!("{STATUS_PATH}/{campaign_id}");
        let raw = self.http.get(&path, &[]).await?;
        Ok(crate::transport::decode_campaign_status(raw))
    }

    /// Progress in percent (0-100); 0 when the campaign has no recipients yet.
    pub async fn get_progress(&self, campaign_id: impl Display) -> Result<u32, KyaSmsError> {
        Ok(self.get_status(campaign_id).await?.progress_percent())
    }

    /// `true` once the status is `completed` or `executed`.
    pub async fn is_completed(&self, campaign_id: impl Display) -> Result<bool, KyaSmsError> {
        Ok(self.get_status(campaign_id).await?.is_completed())
    }

    /// One page of campaigns; `per_page` is clamped to 50.
    pub async fn get_records(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<CampaignRecords, KyaSmsError> {
        self.get_records_filtered(&CampaignRecordsFilters {
            page: Some(page),
            per_page: Some(per_page),
            ..Default::default()
        })
        .await
    }

    pub async fn get_records_filtered(
        &self,
        filters: &CampaignRecordsFilters,
    ) -> Result<CampaignRecords, KyaSmsError> {
        let query = crate::transport::encode_campaign_records_query(filters);
        let raw = self.http.get(RECORDS_PATH, &query).await?;
        Ok(crate::transport::decode_campaign_records(raw))
    }

    /// Estimate what sending `message` to `groups` would cost. Nothing is sent.
    pub async fn calculate_cost(
        &self,
        groups: &[String],
        message: &str,
    ) -> Result<CostEstimate, KyaSmsError> {
        let payload = crate::transport::encode_calculate_cost(groups, message);
        let raw = self.http.post(CALCULATE_COST_PATH, &payload).await?;
        Ok(crate::transport::decode_cost_estimate(raw))
    }
}
