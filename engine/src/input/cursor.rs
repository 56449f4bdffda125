//! Cursor Control
//!
//! Cursor visibility, position and shape for a device window. The control
//! holds a non-owning handle to the window it belongs to; once the device
//! is gone every operation becomes a no-op and queries return defaults.

use std::cell::RefCell;
use std::rc::Weak;

use glam::{IVec2, Vec2};

use crate::device::WindowShared;
use crate::platform::{NativeWindow, StandardCursor};

/// Cursor icons an engine may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorIcon {
    #[default]
    Normal,
    Cross,
    Hand,
    Help,
    IBeam,
    No,
    Wait,
    SizeAll,
    SizeNESW,
    SizeNWSE,
    SizeNS,
    SizeWE,
    Up,
}

impl CursorIcon {
    /// Closest built-in shape. Icons without a native counterpart use the
    /// arrow.
    pub fn standard_shape(self) -> StandardCursor {
        match self {
            CursorIcon::Cross => StandardCursor::Crosshair,
            CursorIcon::Hand => StandardCursor::Hand,
            CursorIcon::IBeam => StandardCursor::IBeam,
            CursorIcon::SizeNS => StandardCursor::VResize,
            CursorIcon::SizeWE => StandardCursor::HResize,
            CursorIcon::Normal
            | CursorIcon::Help
            | CursorIcon::No
            | CursorIcon::Wait
            | CursorIcon::SizeAll
            | CursorIcon::SizeNESW
            | CursorIcon::SizeNWSE
            | CursorIcon::Up => StandardCursor::Arrow,
        }
    }
}

/// Cursor sub-interface of a device.
#[derive(Debug)]
pub struct CursorControl<W> {
    shared: Weak<RefCell<WindowShared<W>>>,
    visible: bool,
    icon: CursorIcon,
}

impl<W: NativeWindow> CursorControl<W> {
    pub fn new(shared: Weak<RefCell<WindowShared<W>>>) -> Self {
        Self {
            shared,
            visible: true,
            icon: CursorIcon::Normal,
        }
    }

    fn with_window(&self, f: impl FnOnce(&mut W)) {
        let Some(shared) = self.shared.upgrade() else {
            return;
        };
        let mut guard = shared.borrow_mut();
        if let Some(window) = guard.window.as_mut() {
            f(window);
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.with_window(|window| window.set_cursor_visible(visible));
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Move the cursor to a client-area pixel.
    pub fn set_position(&mut self, position: IVec2) {
        self.with_window(|window| {
            window.set_cursor_position(f64::from(position.x), f64::from(position.y))
        });
    }

    /// Move the cursor to a position given as a fraction of the client
    /// size.
    pub fn set_relative_position(&mut self, position: Vec2) {
        let Some((width, height)) = self.window_size() else {
            return;
        };
        self.set_position(IVec2::new(
            (position.x * width as f32) as i32,
            (position.y * height as f32) as i32,
        ));
    }

    /// Last reported cursor position, clamped into
    /// `[0, width] x [0, height]`.
    pub fn position(&self) -> IVec2 {
        let Some(shared) = self.shared.upgrade() else {
            return IVec2::ZERO;
        };
        let state = shared.borrow().state;
        let max = IVec2::new(
            i32::try_from(state.width).unwrap_or(i32::MAX),
            i32::try_from(state.height).unwrap_or(i32::MAX),
        );
        state.cursor_position.clamp(IVec2::ZERO, max)
    }

    /// Clamped position divided by the client size. Zero along an axis
    /// whose size is zero.
    pub fn relative_position(&self) -> Vec2 {
        let Some((width, height)) = self.window_size() else {
            return Vec2::ZERO;
        };
        let position = self.position().as_vec2();
        let ratio = |value: f32, size: u32| if size == 0 { 0.0 } else { value / size as f32 };
        Vec2::new(ratio(position.x, width), ratio(position.y, height))
    }

    pub fn set_active_icon(&mut self, icon: CursorIcon) {
        self.icon = icon;
        self.with_window(|window| window.set_cursor_shape(icon.standard_shape()));
    }

    pub fn active_icon(&self) -> CursorIcon {
        self.icon
    }

    fn window_size(&self) -> Option<(u32, u32)> {
        let shared = self.shared.upgrade()?;
        let state = shared.borrow().state;
        Some((state.width, state.height))
    }
}
