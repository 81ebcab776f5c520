use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;
use super::non_empty;
use crate::domain::{
    CampaignContent, CampaignRecords, CampaignRecordsFilters, CampaignResult, CampaignStatus,
    CostEstimate, CreateCampaignOptions,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateCampaignPayload<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    campaign_type: &'static str,
    groups: &'a [String],
    sender_id: &'a str,
    sms_type: &'static str,
    content: ContentPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    timezone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    schedule_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    campaign_periodic: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ContentPayload {
    Message {
        message: String,
    },
    Template {
        template_id: String,
        template_default_lang: String,
    },
}

impl From<CampaignContent> for ContentPayload {
    fn from(value: CampaignContent) -> Self {
        match value {
            CampaignContent::Message { message } => Self::Message { message },
            CampaignContent::Template {
                template_id,
                template_default_lang,
            } => Self::Template {
                template_id,
                template_default_lang,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculateCostPayload<'a> {
    groups: &'a [String],
    message: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CampaignFields {
    #[serde(deserialize_with = "lenient::opt_unsigned")]
    campaign_id: Option<u64>,
    #[serde(deserialize_with = "lenient::opt_string")]
    status: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    scheduled_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CreateCampaignJsonResponse {
    #[serde(deserialize_with = "lenient::string")]
    reason: String,
    #[serde(deserialize_with = "lenient::opt_unsigned")]
    campaign_id: Option<u64>,
    #[serde(deserialize_with = "lenient::opt_string")]
    status: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    scheduled_at: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    data: CampaignFields,
}

pub fn encode_create_campaign(options: &CreateCampaignOptions) -> CreateCampaignPayload<'_> {
    CreateCampaignPayload {
        name: &options.name,
        campaign_type: options.campaign_type.as_str(),
        groups: &options.groups,
        sender_id: &options.sender_id,
        sms_type: options.sms_type.as_str(),
        content: options.resolved_content().into(),
        timezone: non_empty(&options.timezone),
        schedule_date: non_empty(&options.schedule_date),
        campaign_periodic: options.campaign_periodic.map(|periodic| periodic.as_str()),
    }
}

pub fn decode_campaign_result(raw: Value) -> CampaignResult {
    let parsed: CreateCampaignJsonResponse = lenient::from_value_or_default(raw.clone());
    let data = parsed.data;
    CampaignResult {
        reason: parsed.reason,
        campaign_id: parsed.campaign_id.filter(|id| *id > 0).or(data.campaign_id),
        status: non_empty_owned(parsed.status).or(data.status),
        scheduled_at: non_empty_owned(parsed.scheduled_at).or(data.scheduled_at),
        raw,
    }
}

pub fn decode_campaign_status(raw: Value) -> CampaignStatus {
    lenient::from_value_or_default(raw)
}

pub fn encode_campaign_records_query(filters: &CampaignRecordsFilters) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("page", filters.effective_page().to_string()),
        ("per_page", filters.effective_per_page().to_string()),
    ];
    if let Some(status) = non_empty(&filters.status) {
        query.push(("status", status.to_owned()));
    }
    if let Some(campaign_type) = non_empty(&filters.campaign_type) {
        query.push(("type", campaign_type.to_owned()));
    }
    if let Some(start_date) = non_empty(&filters.start_date) {
        query.push(("start_date", start_date.to_owned()));
    }
    if let Some(end_date) = non_empty(&filters.end_date) {
        query.push(("end_date", end_date.to_owned()));
    }
    query
}

pub fn decode_campaign_records(raw: Value) -> CampaignRecords {
    lenient::from_value_or_default(super::data_of(raw))
}

pub fn encode_calculate_cost<'a>(groups: &'a [String], message: &'a str) -> CalculateCostPayload<'a> {
    CalculateCostPayload { groups, message }
}

pub fn decode_cost_estimate(raw: Value) -> CostEstimate {
    lenient::from_value_or_default(super::data_of(raw))
}

fn non_empty_owned(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::domain::{CampaignSmsType, CampaignType, PeriodicType};

    use super::*;

    fn options() -> CreateCampaignOptions {
        CreateCampaignOptions::new("Promo", vec!["G1".to_owned(), "G2".to_owned()], "SHOP")
    }

    #[test]
    fn encode_auto_campaign_with_message() {
        let options = CreateCampaignOptions {
            message: Some("Hello {name}".to_owned()),
            ..options()
        };
        let payload = serde_json::to_value(encode_create_campaign(&options)).unwrap();
        assert_eq!(
            payload,
            json!({
                "name": "Promo",
                "type": "auto",
                "groups": ["G1", "G2"],
                "sender_id": "SHOP",
                "sms_type": "text",
                "content": {"type": "message", "message": "Hello {name}"}
            })
        );
    }

    #[test]
    fn encode_periodic_campaign_with_template() {
        let options = CreateCampaignOptions {
            campaign_type: CampaignType::Periodic,
            sms_type: CampaignSmsType::Unicode,
            template_id: Some("77".to_owned()),
            template_lang: Some("en".to_owned()),
            timezone: Some("Africa/Porto-Novo".to_owned()),
            campaign_periodic: Some(PeriodicType::SpecificDayOfMonth),
            ..options()
        };
        let payload = serde_json::to_value(encode_create_campaign(&options)).unwrap();
        assert_eq!(
            payload,
            json!({
                "name": "Promo",
                "type": "periodic",
                "groups": ["G1", "G2"],
                "sender_id": "SHOP",
                "sms_type": "unicode",
                "content": {
                    "type": "template",
                    "template_id": "77",
                    "template_default_lang": "en"
                },
                "timezone": "Africa/Porto-Novo",
                "campaign_periodic": "specific_day_of_month"
            })
        );
    }

    #[test]
    fn encode_scheduled_campaign_passes_schedule_date() {
        let options = CreateCampaignOptions {
            campaign_type: CampaignType::Customize,
            message: Some("Soon".to_owned()),
            schedule_date: Some("2026-12-24 09:00:00".to_owned()),
            ..options()
        };
        let payload = serde_json::to_value(encode_create_campaign(&options)).unwrap();
        assert_eq!(payload["type"], json!("customize"));
        assert_eq!(payload["schedule_date"], json!("2026-12-24 09:00:00"));
        assert!(payload.get("campaign_periodic").is_none());
    }

    #[test]
    fn decode_campaign_result_falls_back_to_data() {
        let result = decode_campaign_result(json!({
            "reason": "success",
            "data": {"campaign_id": "314", "status": "scheduled", "scheduled_at": "2026-12-24"}
        }));
        assert!(result.is_success());
        assert_eq!(result.campaign_id(), Some(314));
        assert_eq!(result.status(), Some("scheduled"));
        assert_eq!(result.scheduled_at(), Some("2026-12-24"));

        let result = decode_campaign_result(json!({
            "reason": "success",
            "campaign_id": 12,
            "status": "pending",
            "data": {"campaign_id": 99}
        }));
        assert_eq!(result.campaign_id(), Some(12));
        assert_eq!(result.status(), Some("pending"));
        assert_eq!(result.scheduled_at(), None);

        let result = decode_campaign_result(Value::Null);
        assert!(!result.is_success());
        assert_eq!(result.campaign_id(), None);
    }

    #[test]
    fn decode_campaign_status_reads_progress() {
        let status = decode_campaign_status(json!({
            "reason": "success",
            "data": {
                "campaign_id": 5,
                "name": "Promo",
                "status": "running",
                "type": "auto",
                "progress": {"total": 3, "sent": 2, "delivered": 1, "failed": 0, "pending": 1}
            }
        }));
        assert_eq!(status.data.campaign_id, 5);
        assert_eq!(status.data.campaign_type, "auto");
        assert_eq!(status.progress_percent(), 67);
        assert!(!status.is_completed());

        let status = decode_campaign_status(json!({"data": {"status": "executed"}}));
        assert_eq!(status.progress_percent(), 0);
        assert!(status.is_completed());
    }

    #[test]
    fn encode_records_query_clamps_and_filters() {
        let query = encode_campaign_records_query(&CampaignRecordsFilters {
            page: Some(2),
            per_page: Some(500),
            status: Some("completed".to_owned()),
            campaign_type: Some("auto".to_owned()),
            ..Default::default()
        });
        assert_eq!(
            query,
            vec![
                ("page", "2".to_owned()),
                ("per_page", "50".to_owned()),
                ("status", "completed".to_owned()),
                ("type", "auto".to_owned()),
            ]
        );
    }

    #[test]
    fn decode_records_and_cost_unwrap_data() {
        let records = decode_campaign_records(json!({
            "reason": "success",
            "data": {
                "campaigns": [{
                    "id": 1,
                    "name": "Promo",
                    "type": "auto",
                    "is_template": 0,
                    "template_id": 12,
                    "groups": [{"id": "G1", "name": "Clients"}],
                    "stats": {"total_sent": 10, "delivery_rate": 90.5}
                }],
                "pagination": {"current_page": 1, "per_page": 20, "has_more": false}
            }
        }));
        assert_eq!(records.campaigns.len(), 1);
        let record = &records.campaigns[0];
        assert_eq!(record.campaign_type, "auto");
        assert!(!record.is_template);
        assert_eq!(record.template_id.as_deref(), Some("12"));
        assert_eq!(record.groups[0].name, "Clients");
        assert_eq!(record.stats.total_sent, 10);
        assert_eq!(record.stats.delivery_rate, 90.5);
        assert_eq!(records.pagination.per_page, 20);

        let cost = decode_cost_estimate(json!({
            "reason": "success",
            "data": {
                "estimated_cost": 150.0,
                "total_recipients": 12,
                "valid_recipients": 10,
                "invalid_contacts": 2,
                "total_sms_parts": 10,
                "average_sms_parts": 1,
                "message_info": {"encoding": "GSM7", "characters_used": 42, "has_dynamic_variables": true},
                "country_breakdown": [
                    {"country": "BJ", "operator": "MTN", "contacts": 10, "sms_parts": 10, "cost": 150, "price_per_sms": 15}
                ],
                "groups_info": [{"id": "G1", "name": "Clients", "contact_count": 12}]
            }
        }));
        assert_eq!(cost.estimated_cost, 150.0);
        assert_eq!(cost.invalid_contacts, 2);
        assert_eq!(cost.message_info.encoding, "GSM7");
        assert!(cost.message_info.has_dynamic_variables);
        assert_eq!(cost.country_breakdown[0].operator, "MTN");
        assert_eq!(cost.groups_info[0].contact_count, 12);
        assert!(!cost.is_estimate);
    }
}
