//! GLFW3 Device Library
//!
//! Platform device over the GLFW 3 windowing library: it owns a native
//! window and GL context, translates native input into a normalized
//! engine event stream, and exposes window and cursor control.
//!
//! # Modules
//!
//! - [`device`] - the device shell, its configuration and event translator
//! - [`input`] - key codes, key table, mouse buttons, click runs, cursor
//! - [`event`] - normalized engine events and the sink they go to
//! - [`platform`] - native library seam with headless and GLFW backends
//! - [`video`] - driver collaborator, video modes, colour format
//! - [`timer`] - millisecond timer paused across sleeps
//!
//! # Example
//!
//! ```rust
//! use glfw_device::platform::headless::HeadlessPlatform;
//! use glfw_device::{Device, DeviceConfig, DriverType, PlatformFactory};
//!
//! let mut factory = PlatformFactory::<HeadlessPlatform>::new();
//! let config = DeviceConfig {
//!     driver_type: DriverType::Null,
//!     ..DeviceConfig::default()
//! };
//! let mut device = Device::new(config, &mut factory);
//!
//! assert!(device.run());
//! device.close_device();
//! assert!(!device.run());
//! ```

pub mod device;
pub mod event;
pub mod input;
pub mod platform;
pub mod timer;
pub mod video;

// Re-export the types a host needs to open a device
pub use device::{
    ConfigError, Device, DeviceBuilder, DeviceConfig, DeviceError, DeviceState, DeviceType,
    DriverType, KeySource,
};
pub use event::{Event, EventQueue, EventSink, KeyInput, MouseEventKind, MouseInput};
pub use input::{CursorIcon, KeyCode, MouseButton};
pub use platform::{NativeEvent, Platform, PlatformFactory};
pub use video::{ColorFormat, NullDriver, VideoDriver};
