//! Click Run Detection
//!
//! Classifies a button press as a single, double or triple click by
//! comparing it against the previous press.

use glam::IVec2;

use super::mouse::MouseButton;

/// Default time window between successive presses, in milliseconds.
pub const DEFAULT_DOUBLE_CLICK_MS: u32 = 500;

/// Default per-axis distance the cursor may drift between presses.
pub const DEFAULT_CLICK_TOLERANCE_PX: i32 = 3;

/// Longest run reported. A press after a triple click starts over.
pub const MAX_RUN_LENGTH: u32 = 3;

static_assertions::const_assert!(DEFAULT_DOUBLE_CLICK_MS > 0);

/// Thresholds for continuing a click run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickSettings {
    /// Presses strictly closer than this continue the run
    pub time_window_ms: u32,
    /// Maximum |dx| and |dy| in pixels, inclusive
    pub tolerance_px: i32,
}

impl Default for ClickSettings {
    fn default() -> Self {
        Self {
            time_window_ms: DEFAULT_DOUBLE_CLICK_MS,
            tolerance_px: DEFAULT_CLICK_TOLERANCE_PX,
        }
    }
}

/// The most recent qualifying press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickRecord {
    pub position: IVec2,
    pub timestamp_ms: u32,
    pub button: MouseButton,
    /// 1, 2 or 3
    pub run_length: u32,
}

/// Double/triple click detector.
///
/// Only press events should be fed in; releases never take part in a run.
#[derive(Debug, Clone, Default)]
pub struct ClickRunDetector {
    settings: ClickSettings,
    last: Option<ClickRecord>,
}

impl ClickRunDetector {
    pub fn new(settings: ClickSettings) -> Self {
        Self { settings, last: None }
    }

    pub fn settings(&self) -> ClickSettings {
        self.settings
    }

    /// Register a press and return its run length (1..=3).
    ///
    /// The run continues when the same button is pressed within the time
    /// window and tolerance of the previous press and the previous run has
    /// not reached three. Anything else restarts the run at 1. The record
    /// is overwritten either way.
    pub fn classify(&mut self, position: IVec2, button: MouseButton, timestamp_ms: u32) -> u32 {
        let run_length = match self.last {
            Some(last) if self.continues(&last, position, button, timestamp_ms) => {
                last.run_length + 1
            }
            _ => 1,
        };

        self.last = Some(ClickRecord {
            position,
            timestamp_ms,
            button,
            run_length,
        });

        run_length
    }

    fn continues(&self, last: &ClickRecord, position: IVec2, button: MouseButton, now: u32) -> bool {
        // A negative tolerance never matches
        let Ok(tolerance) = u32::try_from(self.settings.tolerance_px) else {
            return false;
        };
        // Millisecond clocks wrap; the difference is taken modulo 2^32.
        now.wrapping_sub(last.timestamp_ms) < self.settings.time_window_ms
            && position.x.abs_diff(last.position.x) <= tolerance
            && position.y.abs_diff(last.position.y) <= tolerance
            && last.run_length < MAX_RUN_LENGTH
            && last.button == button
    }

    /// The record left by the most recent press, if any.
    pub fn last_click(&self) -> Option<&ClickRecord> {
        self.last.as_ref()
    }

    /// Forget the previous press.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
