use std::io;

use kyasms::KyaSmsClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let sender = std::env::var("KYA_SMS_SENDER").unwrap_or_else(|_| "KYA".to_owned());
    let phone = std::env::var("KYA_SMS_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "KYA_SMS_PHONE environment variable is required",
        )
    })?;
    let message = std::env::var("KYA_SMS_MESSAGE")
        .unwrap_or_else(|_| "Hello from the kyasms demo.".to_owned());

    let api_key = std::env::var(kyasms::API_KEY_ENV).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "KYA_SMS_API_KEY environment variable is required",
        )
    })?;

    // Traces show up with RUST_LOG=kyasms=debug.
    let client = KyaSmsClient::builder(api_key).debug(true).build()?;
    let result = client.sms().send_simple(sender, phone, message).await?;
    println!(
        "reason: {}, message_id: {:?}, status: {:?}, price: {}",
        result.reason(),
        result.message_id(),
        result.status(),
        result.price()
    );

    if let Some(message_id) = result.message_id() {
        let delivered = client.sms().is_delivered(message_id).await?;
        println!("delivered: {delivered}");
    }

    Ok(())
}
