use std::io;

use kyasms::KyaSmsClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let groups = std::env::var("KYA_SMS_GROUPS")
        .map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "KYA_SMS_GROUPS environment variable is required (comma-separated group ids)",
            )
        })?
        .split(',')
        .map(|group| group.trim().to_owned())
        .filter(|group| !group.is_empty())
        .collect::<Vec<_>>();
    let sender = std::env::var("KYA_SMS_SENDER").unwrap_or_else(|_| "KYA".to_owned());
    let message = std::env::var("KYA_SMS_MESSAGE")
        .unwrap_or_else(|_| "Hello {name}, this is the kyasms demo.".to_owned());

    let client = KyaSmsClient::from_env()?;

    let estimate = client.campaign().calculate_cost(&groups, &message).await?;
    println!(
        "estimated cost: {} for {} valid recipients ({} encoding)",
        estimate.estimated_cost, estimate.valid_recipients, estimate.message_info.encoding
    );

    let created = client
        .campaign()
        .create_automatic("kyasms demo", groups, sender, message)
        .await?;
    let Some(campaign_id) = created.campaign_id() else {
        println!("campaign not created: {}", created.reason());
        return Ok(());
    };

    let status = client.campaign().get_status(campaign_id).await?;
    println!(
        "campaign {campaign_id}: {} ({}%)",
        status.data.status,
        status.progress_percent()
    );

    Ok(())
}
