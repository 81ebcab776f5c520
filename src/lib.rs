//! Typed async Rust client for the KYA SMS HTTP API (SMS, OTP and campaigns).
//!
//! The crate is split into a domain layer of request options and normalized
//! results, a transport layer for the JSON wire format, and a small client
//! layer that sends one authenticated request per operation and classifies
//! failures into [`KyaSmsError`].
//!
//! ```rust,no_run
//! use kyasms::{KyaSmsClient, OtpLang};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), kyasms::KyaSmsError> {
//!     let client = KyaSmsClient::from_env()?;
//!
//!     let sent = client
//!         .sms()
//!         .send_simple("MyApp", ["22990000001", "22990000002"], "Hello!")
//!         .await?;
//!     println!("message id: {:?}", sent.message_id());
//!
//!     let otp = client.otp().send("app-id", "22990000001", OtpLang::Fr).await?;
//!     let verified = client.otp().is_verified("app-id", otp.key(), "123456").await?;
//!     println!("verified: {verified}");
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    API_KEY_ENV, ApiError, BASE_URL_ENV, CampaignApi, ClientConfig, DEFAULT_TIMEOUT, FieldErrors,
    HttpClient, KyaSmsClient, KyaSmsClientBuilder, KyaSmsError, OtpApi, SmsApi, ValidationError,
};
pub use domain::{
    ApiKey, BaseUrl, CampaignContent, CampaignRecords, CampaignRecordsFilters, CampaignResult,
    CampaignSmsType, CampaignStatus, CampaignType, ConfigError, CostEstimate,
    CreateCampaignOptions, CreateOtpOptions, MessageStatus, OtpLang, OtpResult, PeriodicType,
    Recipients, SendSmsOptions, SmsHistory, SmsHistoryFilters, SmsResult, SmsType, Template,
    VerifyOtpResult,
};
