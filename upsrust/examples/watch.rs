//! Report watcher example
//!
//! Prints each changed input report from a HID device as hex. Point it at
//! any report-emitting device with `WATCH_ID=<vid>:<pid>`.

use std::time::Duration;

use upsrust::{watch, DeviceIdentity, HidTransport};

fn main() -> upsrust::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let identity = match std::env::var("WATCH_ID") {
        Ok(id) => id.parse()?,
        Err(_) => DeviceIdentity::new(0x0079, 0x181c),
    };

    let mut transport = HidTransport::from_identity(identity);

    println!("Watching {} (Ctrl-C to stop)", identity);

    watch(&mut transport, 20, Duration::from_millis(5), |report| {
        println!("{}", hex::encode(report));
        true
    })?;

    Ok(())
}
