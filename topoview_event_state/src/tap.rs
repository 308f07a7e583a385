// Copyright 2025 the Topoview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single/double tap recognition by timestamp.

/// Default window within which a second tap counts as a double tap.
pub const DEFAULT_DOUBLE_TAP_MS: u64 = 500;

/// Kind of tap recognized by [`TapTracker::on_tap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapKind {
    /// A lone tap.
    Single,
    /// A tap that followed the previous one within the window.
    Double,
}

/// Remembers when the last tap ended.
///
/// Every tap, single or double, becomes the new reference point, so a rapid
/// third tap pairs with the second.
///
/// ```
/// use topoview_event_state::tap::{TapKind, TapTracker};
///
/// let mut taps = TapTracker::new(500);
/// assert_eq!(taps.on_tap(1_000), TapKind::Single);
/// assert_eq!(taps.on_tap(1_200), TapKind::Double);
/// assert_eq!(taps.on_tap(1_400), TapKind::Double);
/// assert_eq!(taps.on_tap(2_500), TapKind::Single);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TapTracker {
    window_ms: u64,
    last_tap_ms: Option<u64>,
}

impl TapTracker {
    /// A tracker with the given double-tap window.
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            last_tap_ms: None,
        }
    }

    /// The double-tap window in milliseconds.
    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Record a tap ending at `time_ms` and classify it.
    ///
    /// Timestamps that run backwards never pair up.
    pub fn on_tap(&mut self, time_ms: u64) -> TapKind {
        let kind = match self.last_tap_ms {
            Some(last) if time_ms >= last && time_ms - last < self.window_ms => TapKind::Double,
            _ => TapKind::Single,
        };
        self.last_tap_ms = Some(time_ms);
        kind
    }

    /// Forget the previous tap.
    pub fn reset(&mut self) {
        self.last_tap_ms = None;
    }
}

impl Default for TapTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DOUBLE_TAP_MS)
    }
}
