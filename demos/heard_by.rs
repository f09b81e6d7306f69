//! Lists the stations that heard a callsign over the last 30 minutes.
//!
//! `cargo run --example heard_by -- AG6K`

use std::env;
use std::time::Duration;

use pskreporter::PskClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing-subscriber")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let callsign = env::args().nth(1).unwrap_or_else(|| "AG6K".to_string());

    let client = PskClient::builder()
        .cache_dir(env::temp_dir().join("pskreporter-rs"))
        .timeout(Duration::from_secs(30))
        .build()?;

    let resp = client
        .query()
        .sender_callsign(&callsign)
        .flow_start_seconds(-1800)
        .reception_reports_only(true)
        .fetch()
        .await?;

    println!(
        "{callsign} was heard by {} stations",
        resp.reception_reports.len()
    );
    for r in &resp.reception_reports {
        println!(
            "{:<12} {:<8} {:>10} Hz  {:>4} dB  {}",
            r.receiver_callsign, r.receiver_locator, r.frequency, r.snr, r.mode
        );
    }

    Ok(())
}
