//! LED control example

use std::time::Duration;
use tokio::time::sleep;
use envsensor::{SerialConfig, Session};

#[tokio::main]
async fn main() -> envsensor::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let port = std::env::var("SENSOR_PORT").unwrap_or_else(|_| "/dev/ttyUSB0".to_string());
    let color = std::env::args().nth(1).unwrap_or_else(|| "ff0000".to_string());

    let mut session = Session::serial(SerialConfig::new(port));
    session.open().await?;

    println!("Setting LED to {}...", color);
    let status = session.set_led_color(&color).await?;
    println!("{}", status);

    sleep(Duration::from_secs(3)).await;

    println!("Turning LED off...");
    session.set_led(0, 0, 0).await?;

    let flash = session.flash_memory_status().await?;
    println!("{}", flash);

    session.close().await?;

    Ok(())
}
