use std::io::{self, BufRead, Write};

use kyasms::{KyaSmsClient, OtpLang};
use tracing_subscriber::EnvFilter;

fn required(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let app_id = required("KYA_SMS_APP_ID")?;
    let phone = required("KYA_SMS_PHONE")?;

    let client = KyaSmsClient::from_env()?;
    let otp = client
        .otp()
        .send_with_expiration(app_id.as_str(), phone, 5, OtpLang::En)
        .await?;
    println!("otp sent, key: {}, status: {}", otp.key(), otp.status());

    print!("code received: ");
    io::stdout().flush()?;
    let mut code = String::new();
    io::stdin().lock().read_line(&mut code)?;

    let result = client.otp().verify(&app_id, otp.key(), code.trim()).await?;
    println!(
        "verified: {} (status {}, msg {:?})",
        result.is_verified(),
        result.status,
        result.msg
    );

    Ok(())
}
