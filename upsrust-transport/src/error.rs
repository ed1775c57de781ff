//! Transport errors

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No HID device matching {0} is attached")]
    DeviceNotFound(crate::DeviceIdentity),

    #[error("Failed to open HID device {identity}: {source}")]
    OpenFailed {
        identity: crate::DeviceIdentity,
        #[source]
        source: hidapi::HidError,
    },

    #[error("HID backend error: {0}")]
    Hid(#[from] hidapi::HidError),

    #[error("Invalid device identity: {0}")]
    InvalidIdentity(String),
}
