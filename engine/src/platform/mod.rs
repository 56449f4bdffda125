//! Platform Module
//!
//! The seam between the device and the native windowing library. A
//! backend reports what happened during a poll as [`NativeEvent`] values,
//! numbered the way GLFW 3 numbers keys, buttons and modifiers, and
//! exposes window control through [`NativeWindow`].
//!
//! Backends:
//! - [`headless`] - display-free backend with scripted events
//! - `glfw` - the GLFW 3 library (cargo feature `glfw`)

pub mod headless;

#[cfg(feature = "glfw")]
pub mod glfw;

use std::any::{Any, TypeId};
use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use glam::IVec2;

use crate::device::{DeviceConfig, DeviceError};
use crate::input::{Action, Modifiers, NativeKey, NativeMouseButton};
use crate::video::VideoMode;

/// One native window-system notification, in the order it was reported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NativeEvent {
    CursorPos(f64, f64),
    MouseButton(NativeMouseButton, Action, Modifiers),
    Scroll(f64, f64),
    /// Unicode codepoint typed, with the modifiers held
    Char(u32, Modifiers),
    /// Physical key with its platform scancode
    Key(NativeKey, i32, Action, Modifiers),
    Focus(bool),
    Iconify(bool),
    Size(i32, i32),
    Close,
}

/// Built-in cursor shapes every backend can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardCursor {
    Arrow,
    IBeam,
    Crosshair,
    Hand,
    HResize,
    VResize,
}

/// Everything needed to open a window and its GL context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRequest {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub red_bits: u32,
    pub green_bits: u32,
    pub blue_bits: u32,
    pub alpha_bits: u32,
    pub depth_bits: u32,
    pub stencil_bits: u32,
    pub double_buffer: bool,
    pub stereo: bool,
    /// MSAA sample count, `None` for "don't care"
    pub samples: Option<u32>,
    pub resizable: bool,
    pub fullscreen: bool,
    /// Whether the window should report input and window events
    pub report_events: bool,
}

impl WindowRequest {
    /// Framebuffer and window hints derived from a device configuration.
    pub fn from_config(config: &DeviceConfig) -> Self {
        let (colour, alpha) = if config.bits == 16 {
            (4, if config.with_alpha_channel { 1 } else { 0 })
        } else {
            (8, if config.with_alpha_channel { 8 } else { 0 })
        };

        Self {
            width: config.window_size[0],
            height: config.window_size[1],
            title: config.caption.clone(),
            red_bits: colour,
            green_bits: colour,
            blue_bits: colour,
            alpha_bits: alpha,
            depth_bits: if config.z_buffer_bits == 0 {
                24
            } else {
                u32::from(config.z_buffer_bits)
            },
            stencil_bits: if config.stencil_buffer { 8 } else { 0 },
            double_buffer: config.double_buffer,
            stereo: config.stereo_buffer,
            samples: None,
            resizable: true,
            fullscreen: config.fullscreen,
            report_events: !config.ignore_input,
        }
    }

    pub fn with_samples(mut self, samples: Option<u32>) -> Self {
        self.samples = samples;
        self
    }
}

/// Sample counts to try, in order, for an anti-aliasing request.
///
/// The requested count comes first, then each lower count down to 2, and
/// finally "don't care". Requests of 0 or 1 go straight to "don't care".
pub fn sample_candidates(requested: u8) -> Vec<Option<u32>> {
    let mut candidates: Vec<Option<u32>> = if requested > 1 {
        (2..=u32::from(requested)).rev().map(Some).collect()
    } else {
        Vec::new()
    };
    candidates.push(None);
    candidates
}

/// A native window owned by a device.
pub trait NativeWindow {
    fn set_title(&mut self, title: &str);
    fn iconify(&mut self);
    fn maximize(&mut self);
    fn restore(&mut self);
    fn set_resizable(&mut self, resizable: bool);
    /// Screen position of the window's client area.
    fn position(&self) -> IVec2;
    fn swap_buffers(&mut self);

    fn set_cursor_visible(&mut self, visible: bool);
    fn set_cursor_position(&mut self, x: f64, y: f64);
    fn set_cursor_shape(&mut self, shape: StandardCursor);

    /// Native events reported for this window since the last call, oldest
    /// first.
    fn take_events(&mut self) -> Vec<NativeEvent>;
}

/// A native windowing library.
pub trait Platform: Sized + 'static {
    type Window: NativeWindow;

    /// Initialise the library.
    fn init() -> Result<Self, DeviceError>;

    /// Library version as (major, minor, revision).
    fn version(&self) -> (u32, u32, u32);

    /// Open a window, or `None` when the request cannot be satisfied.
    fn create_window(&mut self, request: &WindowRequest) -> Option<Self::Window>;

    /// Process pending native events without blocking.
    fn poll_events(&mut self);

    /// Block until an event arrives or the timeout elapses.
    fn wait_events_timeout(&mut self, timeout: Duration);

    /// Modes supported by the primary monitor.
    fn video_modes(&mut self) -> Vec<VideoMode>;

    /// Current mode of the primary monitor.
    fn current_video_mode(&mut self) -> Option<VideoMode>;
}

type Initializer<P> = Box<dyn Fn() -> Result<P, DeviceError>>;

thread_local! {
    /// Live libraries, one `Weak<RefCell<P>>` per backend type. Native
    /// windowing libraries are bound to the main thread, so the registry is
    /// per thread.
    static LIBRARIES: RefCell<HashMap<TypeId, Box<dyn Any>>> = RefCell::new(HashMap::new());
}

fn live_library<P: Platform>() -> Option<Rc<RefCell<P>>> {
    LIBRARIES.with(|libraries| {
        libraries
            .borrow()
            .get(&TypeId::of::<P>())
            .and_then(|entry| entry.downcast_ref::<Weak<RefCell<P>>>())
            .and_then(Weak::upgrade)
    })
}

fn register_library<P: Platform>(shared: &Rc<RefCell<P>>) {
    LIBRARIES.with(|libraries| {
        libraries
            .borrow_mut()
            .insert(TypeId::of::<P>(), Box::new(Rc::downgrade(shared)));
    });
}

/// Reference-counted access to a native library.
///
/// The count is kept per backend type for the whole thread, not per
/// factory: the first [`acquire`](Self::acquire) from any factory
/// initialises the library, and every further acquire while a handle is
/// alive shares it. When the last [`PlatformHandle`] is dropped the
/// library is torn down, and the next acquire initialises it again using
/// the initializer of the factory that asks.
pub struct PlatformFactory<P: Platform> {
    init: Initializer<P>,
}

impl<P: Platform> Default for PlatformFactory<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Platform> PlatformFactory<P> {
    pub fn new() -> Self {
        Self::with_initializer(P::init)
    }

    /// Factory that initialises the library with a custom function.
    pub fn with_initializer(init: impl Fn() -> Result<P, DeviceError> + 'static) -> Self {
        Self {
            init: Box::new(init),
        }
    }

    pub fn acquire(&mut self) -> Result<PlatformHandle<P>, DeviceError> {
        if let Some(shared) = live_library::<P>() {
            return Ok(PlatformHandle { shared });
        }

        let platform = (self.init)()?;
        let (major, minor, revision) = platform.version();
        log::info!("GLFW3 Version {major}.{minor}.{revision}");

        let shared = Rc::new(RefCell::new(platform));
        register_library(&shared);
        Ok(PlatformHandle { shared })
    }

    /// Whether the library is currently initialised.
    pub fn is_initialized(&self) -> bool {
        self.handle_count() > 0
    }

    /// Number of live handles, across every factory for this backend.
    pub fn handle_count(&self) -> usize {
        live_library::<P>().map_or(0, |shared| Rc::strong_count(&shared) - 1)
    }
}

/// Shared handle to an initialised native library.
pub struct PlatformHandle<P: Platform> {
    shared: Rc<RefCell<P>>,
}

impl<P: Platform> PlatformHandle<P> {
    pub fn borrow(&self) -> Ref<'_, P> {
        self.shared.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, P> {
        self.shared.borrow_mut()
    }
}

impl<P: Platform> Clone for PlatformHandle<P> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<P: Platform> Drop for PlatformHandle<P> {
    fn drop(&mut self) {
        if Rc::strong_count(&self.shared) == 1 {
            log::info!("Quit GLFW3");
        }
    }
}

impl<P: Platform> fmt::Debug for PlatformHandle<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformHandle")
            .field("handles", &Rc::strong_count(&self.shared))
            .finish()
    }
}
