//! Poll the sensor and print readings

use std::time::Duration;

use envsensor::{SerialConfig, Session};
use tokio::time::sleep;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // SENSOR_PORT overrides USB discovery
    let mut session = match std::env::var("SENSOR_PORT") {
        Ok(path) => Session::serial(SerialConfig::new(path)),
        Err(_) => Session::discover()?,
    };
    session.open().await?;

    println!("Connected to {}", session.port_name());

    for _ in 0..5 {
        match session.read_latest_data().await {
            Ok(reading) => println!("{}", reading),
            Err(e) if e.is_recoverable() => eprintln!("Skipped: {}", e),
            Err(e) => return Err(e.into()),
        }
        sleep(Duration::from_secs(1)).await;
    }

    session.close().await?;

    Ok(())
}
