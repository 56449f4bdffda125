//! Window Runtime State
//!
//! What the device knows about its window between polls, kept up to date
//! by the event translator.

use glam::IVec2;

/// Coarse device lifecycle. There is no way back from `Closing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceState {
    #[default]
    Running,
    Closing,
}

impl DeviceState {
    pub fn is_running(self) -> bool {
        self == DeviceState::Running
    }
}

/// Window facts updated by native callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRuntimeState {
    pub width: u32,
    pub height: u32,
    pub has_focus: bool,
    pub is_minimized: bool,
    pub resizable: bool,
    /// Last cursor position reported, in client pixels
    pub cursor_position: IVec2,
}

impl WindowRuntimeState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            has_focus: false,
            is_minimized: false,
            resizable: false,
            cursor_position: IVec2::ZERO,
        }
    }

    /// Focused and not minimized.
    pub fn is_active(&self) -> bool {
        self.has_focus && !self.is_minimized
    }
}

/// Window handle plus runtime state, shared between the device and its
/// cursor control.
#[derive(Debug)]
pub struct WindowShared<W> {
    /// `None` for the null driver or after a failed creation
    pub window: Option<W>,
    pub state: WindowRuntimeState,
}

impl<W> WindowShared<W> {
    pub fn new(window: Option<W>, state: WindowRuntimeState) -> Self {
        Self { window, state }
    }
}
