//! Video Module
//!
//! The device's view of the video driver: resize notification, screen
//! modes, colour format and gamma. Rendering itself lives elsewhere.

use glam::IVec2;

/// Driver collaborator notified when the window size really changes.
pub trait VideoDriver {
    /// Called once per confirmed change of the client area size.
    fn on_resize(&mut self, width: u32, height: u32);

    /// Current screen size as the driver sees it.
    fn screen_size(&self) -> (u32, u32);
}

/// No-op driver that only tracks the screen size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullDriver {
    size: (u32, u32),
    resize_count: usize,
}

impl NullDriver {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            resize_count: 0,
        }
    }

    /// Number of resize notifications received.
    pub fn resize_count(&self) -> usize {
        self.resize_count
    }
}

impl VideoDriver for NullDriver {
    fn on_resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.resize_count += 1;
    }

    fn screen_size(&self) -> (u32, u32) {
        self.size
    }
}

/// A display mode: resolution plus summed RGB bit depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VideoMode {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl VideoMode {
    pub fn new(width: u32, height: u32, depth: u32) -> Self {
        Self { width, height, depth }
    }
}

/// Sorted, duplicate-free list of display modes.
#[derive(Debug, Clone, Default)]
pub struct VideoModeList {
    modes: Vec<VideoMode>,
}

impl VideoModeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a mode, keeping the list ordered and unique.
    pub fn add_mode(&mut self, mode: VideoMode) {
        if let Err(index) = self.modes.binary_search(&mode) {
            self.modes.insert(index, mode);
        }
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&VideoMode> {
        self.modes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VideoMode> + '_ {
        self.modes.iter()
    }
}

/// Pixel layout of the window's framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFormat {
    A1R5G5B5,
    R5G6B5,
    R8G8B8,
    A8R8G8B8,
}

impl ColorFormat {
    /// Format matching a mode's summed RGB bit depth.
    pub fn from_rgb_bits(bits: u32) -> Self {
        if bits == 16 {
            ColorFormat::R5G6B5
        } else {
            ColorFormat::R8G8B8
        }
    }
}

/// Gamma settings of the display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GammaRamp {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub brightness: f32,
    pub contrast: f32,
}

/// Source rectangle for [`present`](crate::device::Device::present),
/// `min` inclusive, `max` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    pub min: IVec2,
    pub max: IVec2,
}
