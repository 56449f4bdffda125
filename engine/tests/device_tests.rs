//! Device Tests - Creation, Event Translation and Window Control
//!
//! Drives a full device over the headless platform: native events are
//! pushed into the window and read back from the device's event queue.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use glam::{IVec2, Vec2};
use glfw_device::device::DeviceType;
use glfw_device::input::{
    Action, ButtonMask, CursorIcon, Modifiers, NativeKey, NativeMouseButton,
};
use glfw_device::platform::{StandardCursor, WindowRequest};
use glfw_device::platform::headless::{HeadlessPlatform, HeadlessWindow};
use glfw_device::timer::Timer;
use glfw_device::video::{ColorFormat, GammaRamp, VideoMode};
use glfw_device::{
    Device, DeviceBuilder, DeviceConfig, DeviceError, DeviceState, DriverType, Event, KeyCode,
    KeySource, MouseButton, MouseEventKind, NativeEvent, PlatformFactory, VideoDriver,
};

// ============================================================================
// Test collaborators
// ============================================================================

/// Timer whose clock is set by the test.
#[derive(Clone, Default)]
struct ManualTimer {
    now: Rc<Cell<u32>>,
    stopped: Rc<Cell<bool>>,
    stops: Rc<Cell<u32>>,
}

impl ManualTimer {
    fn set(&self, ms: u32) {
        self.now.set(ms);
    }
}

impl Timer for ManualTimer {
    fn tick(&mut self) {}

    fn real_time_ms(&self) -> u32 {
        self.now.get()
    }

    fn time_ms(&self) -> u32 {
        self.now.get()
    }

    fn stop(&mut self) {
        self.stopped.set(true);
        self.stops.set(self.stops.get() + 1);
    }

    fn start(&mut self) {
        self.stopped.set(false);
    }

    fn is_stopped(&self) -> bool {
        self.stopped.get()
    }
}

type ResizeLog = Rc<RefCell<Vec<(u32, u32)>>>;

struct RecordingDriver {
    size: (u32, u32),
    resizes: ResizeLog,
}

impl VideoDriver for RecordingDriver {
    fn on_resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.resizes.borrow_mut().push((width, height));
    }

    fn screen_size(&self) -> (u32, u32) {
        self.size
    }
}

struct Rig {
    device: Device<HeadlessPlatform>,
    window: HeadlessWindow,
    clock: ManualTimer,
    resizes: ResizeLog,
}

impl Rig {
    fn new(config: DeviceConfig) -> Self {
        let mut factory = PlatformFactory::<HeadlessPlatform>::new();
        Self::with_factory(config, &mut factory)
    }

    fn with_factory(config: DeviceConfig, factory: &mut PlatformFactory<HeadlessPlatform>) -> Self {
        let clock = ManualTimer::default();
        let resizes = ResizeLog::default();
        let driver_log = Rc::clone(&resizes);

        let device = DeviceBuilder::new(config)
            .with_timer(clock.clone())
            .with_opengl_driver(move |config| {
                let [width, height] = config.window_size;
                Box::new(RecordingDriver {
                    size: (width, height),
                    resizes: driver_log,
                })
            })
            .build(factory);

        let window = device
            .with_window(HeadlessWindow::clone)
            .expect("OpenGL device should have a window");

        Self {
            device,
            window,
            clock,
            resizes,
        }
    }

    /// Push native events, run one frame and return what came out.
    fn feed(&mut self, events: impl IntoIterator<Item = NativeEvent>) -> Vec<Event> {
        self.window.push_events(events);
        self.device.run();
        self.device.sink_mut().drain().collect()
    }

    fn click(&mut self, at_ms: u32) -> Vec<MouseEventKind> {
        self.clock.set(at_ms);
        mouse_kinds(&self.feed([
            NativeEvent::MouseButton(NativeMouseButton::LEFT, Action::Press, Modifiers::empty()),
            NativeEvent::MouseButton(NativeMouseButton::LEFT, Action::Release, Modifiers::empty()),
        ]))
    }
}

fn mouse_kinds(events: &[Event]) -> Vec<MouseEventKind> {
    events
        .iter()
        .filter_map(|e| e.as_mouse().map(|m| m.kind))
        .collect()
}

fn null_config() -> DeviceConfig {
    DeviceConfig {
        driver_type: DriverType::Null,
        ..DeviceConfig::default()
    }
}

// ============================================================================
// Creation
// ============================================================================

#[test]
fn test_opengl_device_creates_window() {
    let rig = Rig::new(DeviceConfig::default());
    let device = &rig.device;

    assert_eq!(device.state(), DeviceState::Running);
    assert!(device.last_error().is_none());
    assert!(device.has_window());
    assert!(device.driver().is_some());
    assert_eq!(device.device_type(), DeviceType::Glfw3);
    assert_eq!(device.version_string().as_deref(), Some("GLFW3 Version 3.4.0"));
    assert!(device.is_resizable());

    let window = rig.window.snapshot();
    assert_eq!(window.title, "GLFW3 device window");
    assert_eq!((window.request.width, window.request.height), (800, 600));
    assert!(window.resizable);
}

#[test]
fn test_null_driver_has_no_window() {
    let mut factory = PlatformFactory::<HeadlessPlatform>::new();
    let mut device = Device::new(null_config(), &mut factory);

    assert!(device.run());
    assert!(!device.has_window());
    assert_eq!(device.driver().map(|d| d.screen_size()), Some((800, 600)));
    assert_eq!(device.color_format(), ColorFormat::R5G6B5);
    assert!(!device.present(None, None));
    assert_eq!(device.window_position(), IVec2::ZERO);
}

#[test]
fn test_opengl_without_driver_closes() {
    let mut factory = PlatformFactory::<HeadlessPlatform>::new();
    let mut device = Device::new(DeviceConfig::default(), &mut factory);

    assert_eq!(device.last_error(), Some(&DeviceError::DriverUnavailable));
    assert!(!device.run());
}

#[test]
fn test_unsupported_drivers_close() {
    for driver_type in [
        DriverType::Direct3D8,
        DriverType::Direct3D9,
        DriverType::Software,
        DriverType::BurningsVideo,
    ] {
        let mut factory = PlatformFactory::<HeadlessPlatform>::new();
        let config = DeviceConfig {
            driver_type,
            ..DeviceConfig::default()
        };
        let mut device = Device::new(config, &mut factory);

        assert_eq!(
            device.last_error(),
            Some(&DeviceError::UnsupportedDriver(driver_type))
        );
        assert!(!device.has_window());
        assert!(device.driver().is_none());
        assert!(!device.run());
    }
}

#[test]
fn test_platform_init_failure_closes() {
    let mut factory = PlatformFactory::<HeadlessPlatform>::with_initializer(|| {
        Err(DeviceError::PlatformInit("no display".into()))
    });
    let mut device = Device::new(DeviceConfig::default(), &mut factory);

    assert!(matches!(device.last_error(), Some(DeviceError::PlatformInit(_))));
    assert!(!device.has_window());
    assert!(device.version_string().is_none());
    assert!(device.video_mode_list().is_empty());
    assert!(!device.run());
}

#[test]
fn test_window_creation_failure_releases_platform() {
    let mut factory = PlatformFactory::<HeadlessPlatform>::with_initializer(|| {
        Ok(HeadlessPlatform::new().with_failing_windows())
    });
    let mut device = Device::new(DeviceConfig::default(), &mut factory);

    assert_eq!(device.last_error(), Some(&DeviceError::WindowCreation));
    assert!(!factory.is_initialized());
    assert!(!device.run());
}

#[test]
fn test_anti_alias_falls_back_to_lower_counts() {
    let mut factory = PlatformFactory::<HeadlessPlatform>::with_initializer(|| {
        Ok(HeadlessPlatform::new().with_max_samples(2))
    });
    let config = DeviceConfig {
        anti_alias: 8,
        ..DeviceConfig::default()
    };
    let rig = Rig::with_factory(config, &mut factory);
    assert_eq!(rig.window.snapshot().request.samples, Some(2));
}

#[test]
fn test_anti_alias_disabled_without_support() {
    let mut factory = PlatformFactory::<HeadlessPlatform>::new();
    let config = DeviceConfig {
        anti_alias: 4,
        ..DeviceConfig::default()
    };
    let rig = Rig::with_factory(config, &mut factory);
    assert_eq!(rig.window.snapshot().request.samples, None);
    assert!(rig.device.last_error().is_none());
}

#[test]
fn test_devices_share_platform() {
    let mut factory = PlatformFactory::<HeadlessPlatform>::new();
    let first = Device::new(null_config(), &mut factory);
    let second = Device::new(null_config(), &mut factory);
    assert_eq!(factory.handle_count(), 2);

    drop(first);
    assert!(factory.is_initialized());
    drop(second);
    assert!(!factory.is_initialized());
}

#[test]
fn test_separate_factories_share_library() {
    let inits = Rc::new(Cell::new(0u32));
    let counting_factory = || {
        let inits = Rc::clone(&inits);
        PlatformFactory::<HeadlessPlatform>::with_initializer(move || {
            inits.set(inits.get() + 1);
            Ok(HeadlessPlatform::new())
        })
    };
    let mut render_factory = counting_factory();
    let mut tools_factory = counting_factory();

    let first = Device::new(null_config(), &mut render_factory);
    let second = Device::new(null_config(), &mut tools_factory);
    assert_eq!(inits.get(), 1);
    assert_eq!(tools_factory.handle_count(), 2);

    drop(first);
    assert!(render_factory.is_initialized());
    drop(second);
    assert!(!render_factory.is_initialized());
    assert!(!tools_factory.is_initialized());
}

#[test]
fn test_attached_window_is_driven() {
    let mut factory = PlatformFactory::<HeadlessPlatform>::new();
    let host_window = HeadlessWindow::new(WindowRequest::from_config(&DeviceConfig::default()));
    let resizes = ResizeLog::default();
    let driver_log = Rc::clone(&resizes);

    let mut device = DeviceBuilder::new(DeviceConfig::default())
        .with_timer(ManualTimer::default())
        .with_window(host_window.clone())
        .with_opengl_driver(move |config| {
            let [width, height] = config.window_size;
            Box::new(RecordingDriver {
                size: (width, height),
                resizes: driver_log,
            })
        })
        .build(&mut factory);

    assert!(device.last_error().is_none());
    assert!(device.has_window());
    assert!(device.platform().unwrap().created_windows().is_empty());
    assert!(!device.is_resizable());

    host_window.push_events([
        NativeEvent::CursorPos(12.0, 34.0),
        NativeEvent::MouseButton(NativeMouseButton::LEFT, Action::Press, Modifiers::empty()),
        NativeEvent::Size(640, 480),
    ]);
    assert!(device.run());
    let events: Vec<Event> = device.sink_mut().drain().collect();
    assert_eq!(
        mouse_kinds(&events),
        vec![MouseEventKind::Moved, MouseEventKind::Pressed(MouseButton::Left)]
    );
    assert_eq!(*resizes.borrow(), vec![(640, 480)]);

    assert!(device.present(None, None));
    assert_eq!(host_window.snapshot().swap_count, 1);
}

#[test]
fn test_null_driver_ignores_attached_window() {
    let mut factory = PlatformFactory::<HeadlessPlatform>::new();
    let host_window = HeadlessWindow::new(WindowRequest::from_config(&DeviceConfig::default()));
    let mut device = DeviceBuilder::new(null_config())
        .with_window(host_window)
        .build(&mut factory);

    assert!(device.run());
    assert!(!device.has_window());
}

// ============================================================================
// Event translation
// ============================================================================

#[test]
fn test_cursor_and_buttons() {
    let mut rig = Rig::new(DeviceConfig::default());
    let events = rig.feed([
        NativeEvent::CursorPos(100.0, 50.0),
        NativeEvent::MouseButton(NativeMouseButton::RIGHT, Action::Press, Modifiers::empty()),
        NativeEvent::MouseButton(NativeMouseButton(7), Action::Press, Modifiers::empty()),
    ]);

    assert_eq!(
        mouse_kinds(&events),
        vec![MouseEventKind::Moved, MouseEventKind::Pressed(MouseButton::Right)]
    );
    let press = events[1].as_mouse().unwrap();
    assert_eq!(press.position, IVec2::new(100, 50));
    assert_eq!(press.buttons, ButtonMask::RIGHT);
}

#[test]
fn test_triple_click_then_restart() {
    let mut rig = Rig::new(DeviceConfig::default());
    rig.feed([NativeEvent::CursorPos(20.0, 20.0)]);

    let press = MouseEventKind::Pressed(MouseButton::Left);
    let release = MouseEventKind::Released(MouseButton::Left);

    assert_eq!(rig.click(1000), vec![press, release]);
    assert_eq!(
        rig.click(1100),
        vec![press, MouseEventKind::DoubleClick(MouseButton::Left), release]
    );
    assert_eq!(
        rig.click(1200),
        vec![press, MouseEventKind::TripleClick(MouseButton::Left), release]
    );
    // A fourth rapid press starts a new run
    assert_eq!(rig.click(1300), vec![press, release]);
}

#[test]
fn test_click_outside_tolerance_is_single() {
    let mut rig = Rig::new(DeviceConfig::default());
    rig.feed([NativeEvent::CursorPos(20.0, 20.0)]);
    rig.click(1000);

    rig.feed([NativeEvent::CursorPos(30.0, 20.0)]);
    assert_eq!(
        rig.click(1050),
        vec![
            MouseEventKind::Pressed(MouseButton::Left),
            MouseEventKind::Released(MouseButton::Left),
        ]
    );
}

#[test]
fn test_custom_click_window() {
    let config = DeviceConfig {
        double_click_time_ms: 100,
        ..DeviceConfig::default()
    };
    let mut rig = Rig::new(config);
    rig.click(1000);
    assert_eq!(rig.click(1150).len(), 2);
}

#[test]
fn test_scroll_direction() {
    let mut rig = Rig::new(DeviceConfig::default());
    let events = rig.feed([NativeEvent::Scroll(0.0, -1.0), NativeEvent::Scroll(0.0, 1.0)]);

    let wheels: Vec<f32> = events
        .iter()
        .filter_map(|e| e.as_mouse().map(|m| m.wheel))
        .collect();
    assert_eq!(wheels, vec![1.0, -1.0]);
}

#[test]
fn test_character_modifiers_are_exact() {
    let mut rig = Rig::new(DeviceConfig::default());
    let events = rig.feed([
        NativeEvent::Char('W' as u32, Modifiers::SHIFT),
        NativeEvent::Char('W' as u32, Modifiers::SHIFT | Modifiers::CONTROL),
        NativeEvent::Char('W' as u32, Modifiers::CONTROL | Modifiers::NUM_LOCK),
    ]);

    let keys: Vec<_> = events.iter().filter_map(|e| e.as_key().copied()).collect();
    assert_eq!(keys.len(), 3);
    assert!(keys.iter().all(|k| k.key == KeyCode::KeyW && k.pressed));
    assert!(keys[0].shift && !keys[0].control);
    assert!(!keys[1].shift && !keys[1].control);
    assert!(!keys[2].shift && !keys[2].control);
}

#[test]
fn test_physical_key_source() {
    let config = DeviceConfig {
        key_source: KeySource::PhysicalKey,
        ..DeviceConfig::default()
    };
    let mut rig = Rig::new(config);
    let events = rig.feed([
        NativeEvent::Key(NativeKey::LEFT_SHIFT, 50, Action::Press, Modifiers::SHIFT),
        NativeEvent::Char('A' as u32, Modifiers::SHIFT),
        NativeEvent::Key(NativeKey::A, 38, Action::Press, Modifiers::SHIFT),
        NativeEvent::Key(NativeKey::A, 38, Action::Release, Modifiers::SHIFT),
    ]);

    let keys: Vec<_> = events.iter().filter_map(|e| e.as_key().copied()).collect();
    assert_eq!(
        keys.iter().map(|k| (k.key, k.pressed)).collect::<Vec<_>>(),
        vec![
            (KeyCode::LShift, true),
            (KeyCode::KeyA, true),
            (KeyCode::KeyA, false),
        ]
    );
    assert!(keys.iter().all(|k| k.shift && k.character.is_none()));
}

#[test]
fn test_resize_notifies_driver_once() {
    let mut rig = Rig::new(DeviceConfig::default());
    let events = rig.feed([
        NativeEvent::Size(800, 600),
        NativeEvent::Size(1280, 720),
        NativeEvent::Size(1280, 720),
    ]);

    assert!(events.is_empty());
    assert_eq!(*rig.resizes.borrow(), vec![(1280, 720)]);
    let state = rig.device.window_state();
    assert_eq!((state.width, state.height), (1280, 720));
}

#[test]
fn test_window_active_combinations() {
    let mut rig = Rig::new(DeviceConfig::default());
    assert!(!rig.device.is_window_active());

    for (focus, minimized, active) in [
        (true, false, true),
        (true, true, false),
        (false, true, false),
        (false, false, false),
    ] {
        rig.feed([NativeEvent::Focus(focus), NativeEvent::Iconify(minimized)]);
        assert_eq!(rig.device.is_window_focused(), focus);
        assert_eq!(rig.device.is_window_minimized(), minimized);
        assert_eq!(rig.device.is_window_active(), active);
    }
}

#[test]
fn test_close_request_stops_run() {
    let mut rig = Rig::new(DeviceConfig::default());
    assert!(rig.device.run());

    rig.window.push_event(NativeEvent::Close);
    assert!(!rig.device.run());
    assert_eq!(rig.device.state(), DeviceState::Closing);
    // No way back
    assert!(!rig.device.run());
}

#[test]
fn test_close_device() {
    let mut rig = Rig::new(DeviceConfig::default());
    rig.device.close_device();
    assert!(!rig.device.run());
}

#[test]
fn test_ignore_input_drops_events() {
    let config = DeviceConfig {
        ignore_input: true,
        ..DeviceConfig::default()
    };
    let mut rig = Rig::new(config);
    let events = rig.feed([
        NativeEvent::CursorPos(5.0, 5.0),
        NativeEvent::Focus(true),
        NativeEvent::Close,
    ]);

    assert!(events.is_empty());
    assert!(!rig.device.is_window_focused());
    assert!(rig.device.run());
}

#[test]
fn test_events_arriving_during_sleep_are_handled() {
    let mut rig = Rig::new(DeviceConfig::default());
    rig.window.push_event(NativeEvent::Scroll(0.0, -2.0));
    rig.device.sleep(5, false);
    assert_eq!(rig.device.sink().len(), 1);
}

// ============================================================================
// Sleep and yield
// ============================================================================

#[test]
fn test_sleep_pauses_timer() {
    let mut rig = Rig::new(DeviceConfig::default());
    rig.device.sleep(250, true);

    assert_eq!(rig.clock.stops.get(), 1);
    assert!(!rig.clock.is_stopped());
    let waited = rig.device.platform().map(|p| p.waited());
    assert_eq!(waited, Some(Duration::from_millis(250)));
}

#[test]
fn test_sleep_keeps_stopped_timer_stopped() {
    let mut rig = Rig::new(DeviceConfig::default());
    let mut clock = rig.clock.clone();
    clock.stop();

    rig.device.sleep(10, true);
    assert_eq!(rig.clock.stops.get(), 1);
    assert!(rig.clock.is_stopped());
}

#[test]
fn test_sleep_without_pause_leaves_timer() {
    let mut rig = Rig::new(DeviceConfig::default());
    rig.device.sleep(10, false);
    assert_eq!(rig.clock.stops.get(), 0);
}

#[test]
fn test_yield_waits_briefly() {
    let mut rig = Rig::new(DeviceConfig::default());
    rig.device.yield_now();
    let waited = rig.device.platform().map(|p| p.waited());
    assert_eq!(waited, Some(Duration::from_millis(100)));
}

// ============================================================================
// Window control and capabilities
// ============================================================================

#[test]
fn test_window_control() {
    let mut rig = Rig::new(DeviceConfig::default());
    rig.device.set_caption("Renamed");
    rig.device.maximize();
    assert!(rig.window.snapshot().maximized);

    rig.device.minimize();
    assert!(rig.window.snapshot().iconified);

    rig.device.restore();
    let window = rig.window.snapshot();
    assert_eq!(window.title, "Renamed");
    assert!(!window.iconified && !window.maximized);

    rig.device.set_resizable(false);
    assert!(!rig.window.snapshot().resizable);
    assert!(!rig.device.is_resizable());

    rig.window.set_position(IVec2::new(64, 32));
    assert_eq!(rig.device.window_position(), IVec2::new(64, 32));
}

#[test]
fn test_present_swaps_buffers() {
    let mut rig = Rig::new(DeviceConfig::default());
    assert!(rig.device.present(None, None));
    assert!(rig.device.present(None, None));
    assert_eq!(rig.window.snapshot().swap_count, 2);

    let mut other = rig.window.clone();
    assert!(rig.device.present(Some(&mut other), None));
    assert_eq!(rig.window.snapshot().swap_count, 3);
}

#[test]
fn test_video_modes_and_color_format() {
    let mut factory = PlatformFactory::<HeadlessPlatform>::with_initializer(|| {
        let current = VideoMode::new(1024, 768, 16);
        Ok(HeadlessPlatform::new().with_video_modes(
            vec![current, VideoMode::new(640, 480, 16), current],
            Some(current),
        ))
    });
    let mut rig = Rig::with_factory(DeviceConfig::default(), &mut factory);

    let modes: Vec<_> = rig.device.video_mode_list().iter().copied().collect();
    assert_eq!(
        modes,
        vec![VideoMode::new(640, 480, 16), VideoMode::new(1024, 768, 16)]
    );
    assert_eq!(rig.device.color_format(), ColorFormat::R5G6B5);
}

#[test]
fn test_default_color_format_is_24_bit() {
    let rig = Rig::new(DeviceConfig::default());
    assert_eq!(rig.device.color_format(), ColorFormat::R8G8B8);
}

#[test]
fn test_gamma_and_joysticks_unsupported() {
    let mut rig = Rig::new(DeviceConfig::default());
    assert!(rig.device.gamma_ramp().is_none());
    let ramp = GammaRamp {
        red: 1.0,
        green: 1.0,
        blue: 1.0,
        brightness: 0.0,
        contrast: 0.0,
    };
    assert!(!rig.device.set_gamma_ramp(ramp));
    assert!(!rig.device.activate_joysticks());
}

// ============================================================================
// Cursor control
// ============================================================================

#[test]
fn test_cursor_control_through_device() {
    let mut rig = Rig::new(DeviceConfig::default());
    rig.feed([NativeEvent::CursorPos(1000.0, -4.0)]);

    let cursor = rig.device.cursor_control();
    assert_eq!(cursor.position(), IVec2::new(800, 0));
    assert_eq!(cursor.relative_position(), Vec2::new(1.0, 0.0));

    cursor.set_visible(false);
    cursor.set_position(IVec2::new(10, 20));
    cursor.set_active_icon(CursorIcon::Hand);

    let window = rig.window.snapshot();
    assert!(!window.cursor_visible);
    assert_eq!(window.cursor_position, (10.0, 20.0));
    assert_eq!(window.cursor_shape, StandardCursor::Hand);
}
