//! Headless Backend
//!
//! A platform without a display. Windows record every operation applied
//! to them and replay native events pushed in by the host, which makes
//! the device drivable on build machines and in tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use glam::IVec2;

use super::{NativeEvent, NativeWindow, Platform, StandardCursor, WindowRequest};
use crate::device::DeviceError;
use crate::video::VideoMode;

/// Version reported by the headless backend.
pub const HEADLESS_VERSION: (u32, u32, u32) = (3, 4, 0);

/// Observable state of a [`HeadlessWindow`].
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessWindowState {
    pub request: WindowRequest,
    pub title: String,
    pub iconified: bool,
    pub maximized: bool,
    pub resizable: bool,
    pub position: IVec2,
    pub swap_count: u32,
    pub cursor_visible: bool,
    pub cursor_position: (f64, f64),
    pub cursor_shape: StandardCursor,
    pending: VecDeque<NativeEvent>,
}

/// Window of the headless backend.
///
/// Clones share the same state, so a test can keep an observer while the
/// device owns the window.
#[derive(Debug, Clone)]
pub struct HeadlessWindow {
    state: Rc<RefCell<HeadlessWindowState>>,
}

impl HeadlessWindow {
    pub fn new(request: WindowRequest) -> Self {
        let state = HeadlessWindowState {
            title: request.title.clone(),
            iconified: false,
            maximized: false,
            resizable: request.resizable,
            position: IVec2::ZERO,
            swap_count: 0,
            cursor_visible: true,
            cursor_position: (0.0, 0.0),
            cursor_shape: StandardCursor::Arrow,
            pending: VecDeque::new(),
            request,
        };
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// Queue a native event for the next poll. Dropped when the window
    /// was created without event reporting.
    pub fn push_event(&self, event: NativeEvent) {
        let mut state = self.state.borrow_mut();
        if state.request.report_events {
            state.pending.push_back(event);
        }
    }

    pub fn push_events(&self, events: impl IntoIterator<Item = NativeEvent>) {
        for event in events {
            self.push_event(event);
        }
    }

    /// Snapshot of the recorded window state.
    pub fn snapshot(&self) -> HeadlessWindowState {
        self.state.borrow().clone()
    }

    pub fn set_position(&self, position: IVec2) {
        self.state.borrow_mut().position = position;
    }
}

impl NativeWindow for HeadlessWindow {
    fn set_title(&mut self, title: &str) {
        self.state.borrow_mut().title = title.to_owned();
    }

    fn iconify(&mut self) {
        self.state.borrow_mut().iconified = true;
    }

    fn maximize(&mut self) {
        let mut state = self.state.borrow_mut();
        state.maximized = true;
        state.iconified = false;
    }

    fn restore(&mut self) {
        let mut state = self.state.borrow_mut();
        state.maximized = false;
        state.iconified = false;
    }

    fn set_resizable(&mut self, resizable: bool) {
        self.state.borrow_mut().resizable = resizable;
    }

    fn position(&self) -> IVec2 {
        self.state.borrow().position
    }

    fn swap_buffers(&mut self) {
        self.state.borrow_mut().swap_count += 1;
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.state.borrow_mut().cursor_visible = visible;
    }

    fn set_cursor_position(&mut self, x: f64, y: f64) {
        self.state.borrow_mut().cursor_position = (x, y);
    }

    fn set_cursor_shape(&mut self, shape: StandardCursor) {
        self.state.borrow_mut().cursor_shape = shape;
    }

    fn take_events(&mut self) -> Vec<NativeEvent> {
        self.state.borrow_mut().pending.drain(..).collect()
    }
}

/// Display-free [`Platform`].
#[derive(Debug, Clone)]
pub struct HeadlessPlatform {
    modes: Vec<VideoMode>,
    current_mode: Option<VideoMode>,
    /// Highest MSAA sample count a window can be created with
    max_samples: u32,
    fail_window_creation: bool,
    created: Vec<HeadlessWindow>,
    poll_count: u32,
    waited: Duration,
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        let mode = VideoMode::new(1920, 1080, 24);
        Self {
            modes: vec![VideoMode::new(800, 600, 24), VideoMode::new(1280, 720, 24), mode],
            current_mode: Some(mode),
            max_samples: 0,
            fail_window_creation: false,
            created: Vec::new(),
            poll_count: 0,
            waited: Duration::ZERO,
        }
    }
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_video_modes(mut self, modes: Vec<VideoMode>, current: Option<VideoMode>) -> Self {
        self.modes = modes;
        self.current_mode = current;
        self
    }

    pub fn with_max_samples(mut self, max_samples: u32) -> Self {
        self.max_samples = max_samples;
        self
    }

    /// Make every window request fail.
    pub fn with_failing_windows(mut self) -> Self {
        self.fail_window_creation = true;
        self
    }

    /// Windows opened so far, oldest first. Each entry shares state with
    /// the window handed out.
    pub fn created_windows(&self) -> &[HeadlessWindow] {
        &self.created
    }

    pub fn poll_count(&self) -> u32 {
        self.poll_count
    }

    /// Total time spent in timed waits.
    pub fn waited(&self) -> Duration {
        self.waited
    }
}

impl Platform for HeadlessPlatform {
    type Window = HeadlessWindow;

    fn init() -> Result<Self, DeviceError> {
        Ok(Self::default())
    }

    fn version(&self) -> (u32, u32, u32) {
        HEADLESS_VERSION
    }

    fn create_window(&mut self, request: &WindowRequest) -> Option<Self::Window> {
        if self.fail_window_creation {
            return None;
        }
        if request.samples.is_some_and(|samples| samples > self.max_samples) {
            return None;
        }
        let window = HeadlessWindow::new(request.clone());
        self.created.push(window.clone());
        Some(window)
    }

    fn poll_events(&mut self) {
        self.poll_count += 1;
    }

    fn wait_events_timeout(&mut self, timeout: Duration) {
        self.poll_count += 1;
        self.waited += timeout;
    }

    fn video_modes(&mut self) -> Vec<VideoMode> {
        self.modes.clone()
    }

    fn current_video_mode(&mut self) -> Option<VideoMode> {
        self.current_mode
    }
}
