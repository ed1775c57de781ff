//! UPS control example
//!
//! Runs one named operation against the attached UPS:
//!
//! ```text
//! cargo run --example control -- shutdown-18s
//! ```

use upsrust::{DeviceIdentity, UpsDevice, DEFAULT_PRODUCT_ID, DEFAULT_VENDOR_ID};

fn main() -> upsrust::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let action = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "status".to_string());

    let identity = match std::env::var("UPS_ID") {
        Ok(id) => id.parse()?,
        Err(_) => DeviceIdentity::new(DEFAULT_VENDOR_ID, DEFAULT_PRODUCT_ID),
    };

    let mut ups = UpsDevice::new(identity.vendor_id, identity.product_id);

    match action.as_str() {
        "power-on" => {
            ups.power_on()?;
            println!("Output powered on");
        }
        "shutdown" => {
            ups.shutdown_now()?;
            println!("Output shut down");
        }
        "shutdown-18s" => {
            ups.shutdown_after_18s()?;
            println!("Shutdown scheduled in 18 seconds");
        }
        "restart-1min" => {
            ups.restart_after_1min()?;
            println!("Restart scheduled after one minute");
        }
        "restart-18s" => {
            ups.restart_after_18s()?;
            println!("Restart scheduled after 18 seconds");
        }
        "battery-test" => {
            ups.battery_test()?;
            println!("Battery self-test started");
        }
        "beeper" => {
            ups.toggle_beeper()?;
            println!("Beeper toggled");
        }
        "status" => {
            let status = ups.status()?;
            println!("{}", status.to_json());
        }
        token if token.starts_with("0S") => {
            ups.shutdown_custom(token)?;
            println!("Custom shutdown sent: {}", token);
        }
        other => {
            eprintln!("Unknown action: {}", other);
            std::process::exit(2);
        }
    }

    Ok(())
}
