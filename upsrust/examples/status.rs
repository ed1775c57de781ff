//! Status query example

use upsrust::{DeviceIdentity, UpsDevice, DEFAULT_PRODUCT_ID, DEFAULT_VENDOR_ID};

fn main() -> upsrust::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let identity = match std::env::var("UPS_ID") {
        Ok(id) => id.parse()?,
        Err(_) => DeviceIdentity::new(DEFAULT_VENDOR_ID, DEFAULT_PRODUCT_ID),
    };

    let mut ups = UpsDevice::new(identity.vendor_id, identity.product_id);

    let status = ups.status()?;
    println!("{}", status.to_json());

    Ok(())
}
