//! Device Demo
//!
//! Run with: `cargo run --bin device_demo --features glfw [config.json]`
//!
//! Opens a GLFW3 device window and logs every engine event it produces.
//! Set `RUST_LOG=info` to see the output.
//!
//! Controls:
//! - Type: key events (character mode by default)
//! - Click / double-click / triple-click: mouse events
//! - C: cycle the cursor icon
//! - H: toggle cursor visibility
//! - Q / ESC: Exit

use std::path::Path;

use glfw_device::input::CursorIcon;
use glfw_device::platform::glfw::GlfwPlatform;
use glfw_device::{DeviceBuilder, DeviceConfig, Event, KeyCode, PlatformFactory, VideoDriver};

const ICONS: [CursorIcon; 6] = [
    CursorIcon::Normal,
    CursorIcon::Cross,
    CursorIcon::Hand,
    CursorIcon::IBeam,
    CursorIcon::SizeNS,
    CursorIcon::SizeWE,
];

/// Stand-in OpenGL driver that only reports resizes.
struct LoggingDriver {
    size: (u32, u32),
}

impl VideoDriver for LoggingDriver {
    fn on_resize(&mut self, width: u32, height: u32) {
        log::info!("driver resized to {width}x{height}");
        self.size = (width, height);
    }

    fn screen_size(&self) -> (u32, u32) {
        self.size
    }
}

fn load_config() -> DeviceConfig {
    let Some(path) = std::env::args().nth(1) else {
        return DeviceConfig::default();
    };
    match DeviceConfig::load(Path::new(&path)) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("Failed to load {path}: {err}, using defaults");
            DeviceConfig::default()
        }
    }
}

fn main() {
    env_logger::init();

    let config = load_config();
    let mut factory = PlatformFactory::<GlfwPlatform>::new();
    let mut device = DeviceBuilder::new(config)
        .with_opengl_driver(|config| {
            let [width, height] = config.window_size;
            Box::new(LoggingDriver {
                size: (width, height),
            })
        })
        .build(&mut factory);

    if let Some(version) = device.version_string() {
        log::info!("{version}, {} video modes", device.video_mode_list().len());
    }
    log::info!("colour format: {:?}", device.color_format());

    let mut icon = 0;
    while device.run() {
        let events: Vec<Event> = device.sink_mut().drain().collect();
        for event in events {
            log::info!("{event:?}");
            let Event::Key(key) = event else {
                continue;
            };
            if !key.pressed {
                continue;
            }
            // Character mode reports lowercase letters as unknown keys
            match (key.key, key.character) {
                (KeyCode::Escape, _) | (_, Some('q')) => device.close_device(),
                (KeyCode::KeyC, _) | (_, Some('c')) => {
                    icon = (icon + 1) % ICONS.len();
                    device.cursor_control().set_active_icon(ICONS[icon]);
                }
                (KeyCode::KeyH, _) | (_, Some('h')) => {
                    let cursor = device.cursor_control();
                    let visible = cursor.is_visible();
                    cursor.set_visible(!visible);
                }
                _ => {}
            }
        }

        if device.is_window_active() {
            device.present(None, None);
            device.sleep(16, false);
        } else {
            device.yield_now();
        }
    }

    if let Some(err) = device.last_error() {
        log::error!("device closed: {err}");
    }
}
