//! GLFW 3 Backend
//!
//! [`Platform`] over the `glfw` crate. Window events are enabled per
//! window and collected from its receiver after every poll, in the order
//! GLFW reported them.

use std::time::Duration;

use ::glfw::{
    Context, Cursor, CursorMode, Glfw, GlfwReceiver, PWindow, VidMode, WindowEvent, WindowHint,
    WindowMode,
};
use glam::IVec2;

use super::{NativeEvent, NativeWindow, Platform, StandardCursor, WindowRequest};
use crate::device::DeviceError;
use crate::input::{Action, Modifiers, NativeKey, NativeMouseButton};
use crate::video::VideoMode;

/// The GLFW 3 library.
pub struct GlfwPlatform {
    glfw: Glfw,
}

/// A GLFW window and its event receiver.
pub struct GlfwWindow {
    window: PWindow,
    events: GlfwReceiver<(f64, WindowEvent)>,
}

impl GlfwWindow {
    /// The underlying GLFW window, for context and surface work.
    pub fn native(&self) -> &PWindow {
        &self.window
    }

    pub fn native_mut(&mut self) -> &mut PWindow {
        &mut self.window
    }

    fn enable_event_reporting(&mut self) {
        self.window.set_cursor_pos_polling(true);
        self.window.set_mouse_button_polling(true);
        self.window.set_scroll_polling(true);
        self.window.set_char_mods_polling(true);
        self.window.set_key_polling(true);
        self.window.set_focus_polling(true);
        self.window.set_iconify_polling(true);
        self.window.set_size_polling(true);
        self.window.set_close_polling(true);
    }
}

fn video_mode(mode: &VidMode) -> VideoMode {
    VideoMode::new(
        mode.width,
        mode.height,
        mode.red_bits + mode.green_bits + mode.blue_bits,
    )
}

fn action(action: ::glfw::Action) -> Action {
    match action {
        ::glfw::Action::Release => Action::Release,
        ::glfw::Action::Press => Action::Press,
        ::glfw::Action::Repeat => Action::Repeat,
    }
}

fn modifiers(mods: ::glfw::Modifiers) -> Modifiers {
    Modifiers::from_bits_truncate(mods.bits())
}

fn standard_cursor(shape: StandardCursor) -> ::glfw::StandardCursor {
    match shape {
        StandardCursor::Arrow => ::glfw::StandardCursor::Arrow,
        StandardCursor::IBeam => ::glfw::StandardCursor::IBeam,
        StandardCursor::Crosshair => ::glfw::StandardCursor::Crosshair,
        StandardCursor::Hand => ::glfw::StandardCursor::Hand,
        StandardCursor::HResize => ::glfw::StandardCursor::HResize,
        StandardCursor::VResize => ::glfw::StandardCursor::VResize,
    }
}

/// Map a GLFW window event onto the native events the device handles.
fn native_event(event: WindowEvent) -> Option<NativeEvent> {
    Some(match event {
        WindowEvent::CursorPos(x, y) => NativeEvent::CursorPos(x, y),
        WindowEvent::MouseButton(button, act, mods) => {
            NativeEvent::MouseButton(NativeMouseButton(button as i32), action(act), modifiers(mods))
        }
        WindowEvent::Scroll(x, y) => NativeEvent::Scroll(x, y),
        WindowEvent::CharModifiers(ch, mods) => NativeEvent::Char(ch as u32, modifiers(mods)),
        WindowEvent::Key(key, scancode, act, mods) => {
            NativeEvent::Key(NativeKey(key as i32), scancode, action(act), modifiers(mods))
        }
        WindowEvent::Focus(focused) => NativeEvent::Focus(focused),
        WindowEvent::Iconify(iconified) => NativeEvent::Iconify(iconified),
        WindowEvent::Size(width, height) => NativeEvent::Size(width, height),
        WindowEvent::Close => NativeEvent::Close,
        _ => return None,
    })
}

impl NativeWindow for GlfwWindow {
    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    fn iconify(&mut self) {
        self.window.iconify();
    }

    fn maximize(&mut self) {
        self.window.maximize();
    }

    fn restore(&mut self) {
        self.window.restore();
    }

    fn set_resizable(&mut self, resizable: bool) {
        self.window.set_resizable(resizable);
    }

    fn position(&self) -> IVec2 {
        let (x, y) = self.window.get_pos();
        IVec2::new(x, y)
    }

    fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        let mode = if visible {
            CursorMode::Normal
        } else {
            CursorMode::Hidden
        };
        self.window.set_cursor_mode(mode);
    }

    fn set_cursor_position(&mut self, x: f64, y: f64) {
        self.window.set_cursor_pos(x, y);
    }

    fn set_cursor_shape(&mut self, shape: StandardCursor) {
        // The previous cursor is handed back and destroyed here
        let _previous = self
            .window
            .set_cursor(Some(Cursor::standard(standard_cursor(shape))));
    }

    fn take_events(&mut self) -> Vec<NativeEvent> {
        ::glfw::flush_messages(&self.events)
            .filter_map(|(_, event)| native_event(event))
            .collect()
    }
}

impl Platform for GlfwPlatform {
    type Window = GlfwWindow;

    fn init() -> Result<Self, DeviceError> {
        let glfw = ::glfw::init(|err: ::glfw::Error, description: String| {
            log::error!("GLFW3 error {err:?}: {description}");
        })
        .map_err(|err| DeviceError::PlatformInit(format!("{err:?}")))?;
        Ok(Self { glfw })
    }

    fn version(&self) -> (u32, u32, u32) {
        let version = ::glfw::get_version();
        (
            version.major as u32,
            version.minor as u32,
            version.patch as u32,
        )
    }

    fn create_window(&mut self, request: &WindowRequest) -> Option<Self::Window> {
        let glfw = &mut self.glfw;
        glfw.default_window_hints();
        glfw.window_hint(WindowHint::RedBits(Some(request.red_bits)));
        glfw.window_hint(WindowHint::GreenBits(Some(request.green_bits)));
        glfw.window_hint(WindowHint::BlueBits(Some(request.blue_bits)));
        glfw.window_hint(WindowHint::AlphaBits(Some(request.alpha_bits)));
        glfw.window_hint(WindowHint::DepthBits(Some(request.depth_bits)));
        glfw.window_hint(WindowHint::StencilBits(Some(request.stencil_bits)));
        glfw.window_hint(WindowHint::DoubleBuffer(request.double_buffer));
        glfw.window_hint(WindowHint::Stereo(request.stereo));
        glfw.window_hint(WindowHint::Samples(request.samples));
        glfw.window_hint(WindowHint::Resizable(request.resizable));

        let (width, height, title) = (request.width, request.height, request.title.as_str());
        let created = if request.fullscreen {
            glfw.with_primary_monitor(|glfw, monitor| {
                let mode = monitor.map_or(WindowMode::Windowed, |m| WindowMode::FullScreen(m));
                glfw.create_window(width, height, title, mode)
            })
        } else {
            glfw.create_window(width, height, title, WindowMode::Windowed)
        };

        let (mut window, events) = created?;
        window.make_current();

        let mut window = GlfwWindow { window, events };
        if request.report_events {
            window.enable_event_reporting();
        }
        Some(window)
    }

    fn poll_events(&mut self) {
        self.glfw.poll_events();
    }

    fn wait_events_timeout(&mut self, timeout: Duration) {
        self.glfw.wait_events_timeout(timeout.as_secs_f64());
    }

    fn video_modes(&mut self) -> Vec<VideoMode> {
        self.glfw.with_primary_monitor(|_, monitor| {
            monitor
                .map(|m| m.get_video_modes().iter().map(video_mode).collect())
                .unwrap_or_default()
        })
    }

    fn current_video_mode(&mut self) -> Option<VideoMode> {
        self.glfw.with_primary_monitor(|_, monitor| {
            monitor
                .and_then(|m| m.get_video_mode())
                .map(|mode| video_mode(&mode))
        })
    }
}
