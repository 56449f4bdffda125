//! Device Module
//!
//! A window plus its input, wrapped up for an engine main loop:
//!
//! ```text
//! while device.run() {
//!     for event in device.sink_mut().drain() { /* ... */ }
//!     device.present(None, None);
//! }
//! ```
//!
//! Construction never fails outright. When the native library, the window
//! or the driver cannot be set up, the problem is logged, kept in
//! [`Device::last_error`], and the device starts out closing, so the first
//! `run()` returns `false`.

pub mod config;
pub mod error;
pub mod translator;
pub mod window_state;

pub use config::{ConfigError, DeviceConfig, DriverType, KeySource};
pub use error::DeviceError;
pub use translator::{Dispatch, EventTranslator};
pub use window_state::{DeviceState, WindowRuntimeState, WindowShared};

use std::cell::{Ref, RefCell};
use std::marker::PhantomData;
use std::rc::Rc;
use std::time::Duration;

use glam::IVec2;

use crate::event::{EventQueue, EventSink};
use crate::input::CursorControl;
use crate::platform::{
    NativeWindow, Platform, PlatformFactory, PlatformHandle, WindowRequest, sample_candidates,
};
use crate::timer::{SystemTimer, Timer};
use crate::video::{ClipRect, ColorFormat, GammaRamp, NullDriver, VideoDriver, VideoModeList};

/// Longest wait performed by [`Device::yield_now`].
pub const YIELD_TIMEOUT: Duration = Duration::from_millis(100);

/// Kind of device, for engines that support several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceType {
    Glfw3,
}

/// Builds the OpenGL driver once the window and its context exist.
pub type DriverConstructor = Box<dyn FnOnce(&DeviceConfig) -> Box<dyn VideoDriver>>;

/// Optional collaborators for a [`Device`].
pub struct DeviceBuilder<P: Platform, S: EventSink = EventQueue> {
    config: DeviceConfig,
    sink: S,
    timer: Box<dyn Timer>,
    opengl_driver: Option<DriverConstructor>,
    window: Option<P::Window>,
    _platform: PhantomData<P>,
}

impl<P: Platform> DeviceBuilder<P, EventQueue> {
    pub fn new(config: DeviceConfig) -> Self {
        Self {
            config,
            sink: EventQueue::new(),
            timer: Box::new(SystemTimer::new()),
            opengl_driver: None,
            window: None,
            _platform: PhantomData,
        }
    }
}

impl<P: Platform, S: EventSink> DeviceBuilder<P, S> {
    /// Deliver events to `sink` instead of an [`EventQueue`].
    pub fn with_sink<T: EventSink>(self, sink: T) -> DeviceBuilder<P, T> {
        DeviceBuilder {
            config: self.config,
            sink,
            timer: self.timer,
            opengl_driver: self.opengl_driver,
            window: self.window,
            _platform: PhantomData,
        }
    }

    pub fn with_timer(mut self, timer: impl Timer + 'static) -> Self {
        self.timer = Box::new(timer);
        self
    }

    /// Provide the OpenGL driver. Without one an OpenGL device closes
    /// right after creating its window.
    pub fn with_opengl_driver(
        mut self,
        constructor: impl FnOnce(&DeviceConfig) -> Box<dyn VideoDriver> + 'static,
    ) -> Self {
        self.opengl_driver = Some(Box::new(constructor));
        self
    }

    /// Drive a window the host has already opened instead of creating
    /// one. The device translates its events and presents into it; the
    /// creation hints in the configuration are not applied. Only the
    /// OpenGL driver uses a window, so any other driver drops it.
    pub fn with_window(mut self, window: P::Window) -> Self {
        self.window = Some(window);
        self
    }

    /// Create the device, initialising the native library through
    /// `factory` if no other device holds it.
    pub fn build(self, factory: &mut PlatformFactory<P>) -> Device<P, S> {
        let [width, height] = self.config.window_size;
        let shared = Rc::new(RefCell::new(WindowShared::new(
            None,
            WindowRuntimeState::new(width, height),
        )));

        let mut device = Device {
            translator: EventTranslator::new(self.config.key_source, self.config.click_settings()),
            cursor: CursorControl::new(Rc::downgrade(&shared)),
            shared,
            platform: None,
            driver: None,
            sink: self.sink,
            timer: self.timer,
            state: DeviceState::Running,
            last_error: None,
            video_modes: VideoModeList::new(),
            config: self.config,
        };

        match factory.acquire() {
            Ok(handle) => {
                device.platform = Some(handle);
                device.create_window_and_driver(self.opengl_driver, self.window);
            }
            Err(err) => device.fail(err),
        }

        device
    }
}

/// A native window with event translation and cursor control.
pub struct Device<P: Platform, S: EventSink = EventQueue> {
    config: DeviceConfig,
    translator: EventTranslator,
    cursor: CursorControl<P::Window>,
    /// Declared before `platform` so the window closes before the library
    /// handle is released.
    shared: Rc<RefCell<WindowShared<P::Window>>>,
    platform: Option<PlatformHandle<P>>,
    driver: Option<Box<dyn VideoDriver>>,
    sink: S,
    timer: Box<dyn Timer>,
    state: DeviceState,
    last_error: Option<DeviceError>,
    video_modes: VideoModeList,
}

impl<P: Platform> Device<P, EventQueue> {
    /// Device with an [`EventQueue`], the system timer and no OpenGL
    /// driver.
    pub fn new(config: DeviceConfig, factory: &mut PlatformFactory<P>) -> Self {
        DeviceBuilder::new(config).build(factory)
    }
}

impl<P: Platform, S: EventSink> Device<P, S> {
    // ========================================================================
    // CREATION
    // ========================================================================

    fn fail(&mut self, err: DeviceError) {
        log::error!("{err}");
        self.last_error = Some(err);
        self.state = DeviceState::Closing;
    }

    fn create_window_and_driver(
        &mut self,
        opengl_driver: Option<DriverConstructor>,
        attached: Option<P::Window>,
    ) {
        match self.config.driver_type {
            DriverType::OpenGl => {
                // Windows we open are resizable; an attached window keeps
                // whatever the host chose and starts out reported fixed.
                let resizable = attached.is_none();
                let Some(window) = attached.or_else(|| self.open_window()) else {
                    // Give up our share of the library along with the window
                    self.platform = None;
                    self.fail(DeviceError::WindowCreation);
                    return;
                };
                {
                    let mut shared = self.shared.borrow_mut();
                    shared.window = Some(window);
                    shared.state.resizable = resizable;
                }
                match opengl_driver {
                    Some(constructor) => self.driver = Some(constructor(&self.config)),
                    None => self.fail(DeviceError::DriverUnavailable),
                }
            }
            DriverType::Null => {
                let [width, height] = self.config.window_size;
                self.driver = Some(Box::new(NullDriver::new(width, height)));
            }
            other => self.fail(DeviceError::UnsupportedDriver(other)),
        }
    }

    /// Try the requested sample count, then fewer, then "don't care".
    fn open_window(&self) -> Option<P::Window> {
        let platform = self.platform.as_ref()?;
        let mut platform = platform.borrow_mut();
        let request = WindowRequest::from_config(&self.config);

        for samples in sample_candidates(self.config.anti_alias) {
            if let Some(window) = platform.create_window(&request.clone().with_samples(samples)) {
                if samples.is_none() && self.config.anti_alias > 1 {
                    log::warn!("AntiAliasing disabled due to lack of support!");
                }
                return Some(window);
            }
        }
        None
    }

    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    /// Advance the timer and process pending native events. Returns
    /// `false` once the device is closing.
    pub fn run(&mut self) -> bool {
        self.timer.tick();
        if let Some(platform) = &self.platform {
            platform.borrow_mut().poll_events();
        }
        self.process_native_events();
        self.state.is_running()
    }

    /// Wait briefly for native events, handling any that arrive.
    pub fn yield_now(&mut self) {
        self.wait(YIELD_TIMEOUT);
    }

    /// Wait `ms` milliseconds for native events. With `pause_timer` the
    /// timer is stopped for the duration, unless it already was.
    pub fn sleep(&mut self, ms: u32, pause_timer: bool) {
        let pause = pause_timer && !self.timer.is_stopped();
        if pause {
            self.timer.stop();
        }

        self.wait(Duration::from_millis(u64::from(ms)));

        if pause {
            self.timer.start();
        }
    }

    fn wait(&mut self, timeout: Duration) {
        match &self.platform {
            Some(platform) => platform.borrow_mut().wait_events_timeout(timeout),
            None => std::thread::sleep(timeout),
        }
        self.process_native_events();
    }

    /// Ask the device to close; the next [`run`](Self::run) returns
    /// `false`.
    pub fn close_device(&mut self) {
        self.state = DeviceState::Closing;
    }

    fn process_native_events(&mut self) {
        let events = match self.shared.borrow_mut().window.as_mut() {
            Some(window) => window.take_events(),
            None => return,
        };
        if events.is_empty() {
            return;
        }

        let now_ms = self.timer.real_time_ms();
        let mut shared = self.shared.borrow_mut();
        let mut ctx = Dispatch {
            sink: &mut self.sink,
            window: &mut shared.state,
            device_state: &mut self.state,
            driver: self.driver.as_deref_mut(),
            now_ms,
        };
        for event in events {
            self.translator.dispatch(event, &mut ctx);
        }
    }

    pub fn state(&self) -> DeviceState {
        self.state
    }

    /// The failure that closed the device during creation, if any.
    pub fn last_error(&self) -> Option<&DeviceError> {
        self.last_error.as_ref()
    }

    // ========================================================================
    // WINDOW STATE
    // ========================================================================

    pub fn window_state(&self) -> WindowRuntimeState {
        self.shared.borrow().state
    }

    /// Focused and not minimized.
    pub fn is_window_active(&self) -> bool {
        self.window_state().is_active()
    }

    pub fn is_window_focused(&self) -> bool {
        self.window_state().has_focus
    }

    pub fn is_window_minimized(&self) -> bool {
        self.window_state().is_minimized
    }

    pub fn has_window(&self) -> bool {
        self.shared.borrow().window.is_some()
    }

    // ========================================================================
    // WINDOW CONTROL
    // ========================================================================

    /// Run `f` against the native window, if there is one.
    pub fn with_window<R>(&self, f: impl FnOnce(&P::Window) -> R) -> Option<R> {
        self.shared.borrow().window.as_ref().map(f)
    }

    pub fn with_window_mut<R>(&mut self, f: impl FnOnce(&mut P::Window) -> R) -> Option<R> {
        self.shared.borrow_mut().window.as_mut().map(f)
    }

    pub fn set_caption(&mut self, caption: &str) {
        self.with_window_mut(|window| window.set_title(caption));
    }

    pub fn minimize(&mut self) {
        self.with_window_mut(|window| window.iconify());
    }

    pub fn maximize(&mut self) {
        self.with_window_mut(|window| window.maximize());
    }

    pub fn restore(&mut self) {
        self.with_window_mut(|window| window.restore());
    }

    pub fn set_resizable(&mut self, resizable: bool) {
        let mut shared = self.shared.borrow_mut();
        if shared.state.resizable == resizable {
            return;
        }
        if let Some(window) = shared.window.as_mut() {
            window.set_resizable(resizable);
        }
        shared.state.resizable = resizable;
    }

    pub fn is_resizable(&self) -> bool {
        self.window_state().resizable
    }

    /// Screen position of the client area, origin when there is no window.
    pub fn window_position(&self) -> IVec2 {
        self.with_window(|window| window.position())
            .unwrap_or(IVec2::ZERO)
    }

    // ========================================================================
    // PRESENTATION
    // ========================================================================

    /// Swap the buffers of `target`, or of the device window when `target`
    /// is `None`. The clip rectangle is accepted for API parity; OpenGL
    /// presents the whole back buffer. Returns `false` when there was
    /// nothing to swap.
    pub fn present(&mut self, target: Option<&mut P::Window>, _clip: Option<ClipRect>) -> bool {
        match target {
            Some(window) => {
                window.swap_buffers();
                true
            }
            None => self
                .with_window_mut(|window| window.swap_buffers())
                .is_some(),
        }
    }

    // ========================================================================
    // CAPABILITIES
    // ========================================================================

    /// Modes of the primary monitor, queried on first use.
    pub fn video_mode_list(&mut self) -> &VideoModeList {
        if self.video_modes.is_empty() {
            if let Some(platform) = &self.platform {
                for mode in platform.borrow_mut().video_modes() {
                    self.video_modes.add_mode(mode);
                }
            }
        }
        &self.video_modes
    }

    /// Framebuffer format: derived from the monitor's current mode when a
    /// window exists, 16-bit otherwise.
    pub fn color_format(&self) -> ColorFormat {
        if !self.has_window() {
            return ColorFormat::R5G6B5;
        }
        self.platform
            .as_ref()
            .and_then(|platform| platform.borrow_mut().current_video_mode())
            .map(|mode| ColorFormat::from_rgb_bits(mode.depth))
            .unwrap_or(ColorFormat::R8G8B8)
    }

    /// Gamma is not exposed by this device.
    pub fn gamma_ramp(&self) -> Option<GammaRamp> {
        None
    }

    /// Gamma is not exposed by this device; always `false`.
    pub fn set_gamma_ramp(&mut self, _ramp: GammaRamp) -> bool {
        false
    }

    /// Joysticks are not supported; always `false`.
    pub fn activate_joysticks(&mut self) -> bool {
        false
    }

    pub fn device_type(&self) -> DeviceType {
        DeviceType::Glfw3
    }

    /// "GLFW3 Version x.y.z" while the library is held.
    pub fn version_string(&self) -> Option<String> {
        let platform = self.platform.as_ref()?;
        let (major, minor, revision) = platform.borrow().version();
        Some(format!("GLFW3 Version {major}.{minor}.{revision}"))
    }

    // ========================================================================
    // COLLABORATORS
    // ========================================================================

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn cursor_control(&mut self) -> &mut CursorControl<P::Window> {
        &mut self.cursor
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn driver(&self) -> Option<&dyn VideoDriver> {
        self.driver.as_deref()
    }

    pub fn driver_mut(&mut self) -> Option<&mut (dyn VideoDriver + 'static)> {
        self.driver.as_deref_mut()
    }

    pub fn timer(&self) -> &dyn Timer {
        self.timer.as_ref()
    }

    pub fn translator(&self) -> &EventTranslator {
        &self.translator
    }

    /// Borrow the native library, when it is held.
    pub fn platform(&self) -> Option<Ref<'_, P>> {
        self.platform.as_ref().map(PlatformHandle::borrow)
    }
}
