//! Device Errors
//!
//! Failures that stop a device from running. They never escape device
//! construction: the device logs them, keeps the last one and closes.

use super::config::DriverType;

/// Terminal device failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The native windowing library failed to initialise.
    PlatformInit(String),
    /// No window/context could be created with the requested settings.
    WindowCreation,
    /// The requested driver type is not provided by this device.
    UnsupportedDriver(DriverType),
    /// OpenGL was requested but no OpenGL driver is available.
    DriverUnavailable,
}

impl std::fmt::Display for DeviceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceError::PlatformInit(reason) if reason.is_empty() => {
                write!(f, "Unable to initialize GLFW3!")
            }
            DeviceError::PlatformInit(reason) => {
                write!(f, "Unable to initialize GLFW3! ({reason})")
            }
            DeviceError::WindowCreation => write!(f, "Unable to initialize GLFW3 window!"),
            DeviceError::UnsupportedDriver(DriverType::Direct3D8) => {
                write!(f, "DIRECT3D8 Driver is no longer supported")
            }
            DeviceError::UnsupportedDriver(_) => write!(f, "Only OpenGL is supported!"),
            DeviceError::DriverUnavailable => write!(f, "No OpenGL support compiled in."),
        }
    }
}

impl std::error::Error for DeviceError {}
