// Copyright 2025 the Topoview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch gesture classification for a zoomable view.
//!
//! [`GestureClassifier`] consumes raw [`TouchEvent`]s in delivery order and
//! decides, per event, which [`Gesture`] (if any) it completes and how the
//! event should reach the wrapped child ([`Routing`]).
//!
//! ## States
//!
//! - `Idle`: no sequence in progress.
//! - `Tracking`: one pointer is down and has not moved past the touch slop
//!   (or the view is not zoomed in). Events are forwarded to the child.
//! - `Dragging`: the pointer moved past the slop while zoomed in. Moves turn
//!   into [`Gesture::Pan`] and are no longer forwarded.
//! - `PinchTracking`: two pointers are down but their separation has not yet
//!   changed by the pinch slop.
//! - `Pinching`: the separation changed by at least the pinch slop. Every
//!   two-pointer event yields [`Gesture::Pinch`].
//! - `Claimed`: the rest of the sequence belongs to someone else (see
//!   [`GestureClassifier::claim`]), or began without a down, and is
//!   swallowed.
//!
//! ## Invariants
//!
//! 1. Once a sequence is consumed, the child receives exactly one cancel and
//!    nothing else until the next sequence starts.
//! 2. Drag and tap never both complete for the same down/up pair.
//! 3. Two-pointer events are never forwarded.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use topoview_event_state::gesture::{Gesture, GestureClassifier, Routing};
//! use topoview_event_state::pointer::{PointerAction, TouchEvent};
//!
//! let mut gestures = GestureClassifier::default();
//! let at = |action, x, t| TouchEvent::single(action, Point::new(x, 100.0), t);
//!
//! // Zoomed in: a long move becomes a pan and the child is cancelled once.
//! let down = gestures.classify(&at(PointerAction::Down, 100.0, 0), true);
//! assert_eq!(down.routing, Routing::Forward);
//! let moved = gestures.classify(&at(PointerAction::Move, 150.0, 16), true);
//! assert_eq!(moved.routing, Routing::Cancel);
//! assert!(matches!(moved.gesture, Some(Gesture::Pan { .. })));
//! let up = gestures.classify(&at(PointerAction::Up, 150.0, 32), true);
//! assert_eq!(up.routing, Routing::Swallow);
//! assert_eq!(up.gesture, None);
//! ```

use kurbo::{Point, Vec2};

use crate::pointer::{PointerAction, TouchEvent};
use crate::tap::{DEFAULT_DOUBLE_TAP_MS, TapKind, TapTracker};
use crate::track::{PinchTrack, TouchTrack};

/// Thresholds for gesture classification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Distance a single pointer must travel from its start before a drag
    /// begins (default: 30 px). Shorter sequences are taps.
    pub touch_slop: f64,
    /// Change in pointer separation before a pinch begins (default: 30 px).
    pub pinch_slop: f64,
    /// Window for double taps (default: 500 ms).
    pub double_tap_ms: u64,
}

impl GestureConfig {
    /// Returns a copy with the given touch slop.
    #[must_use]
    pub fn with_touch_slop(mut self, slop: f64) -> Self {
        self.touch_slop = slop;
        self
    }

    /// Returns a copy with the given pinch slop.
    #[must_use]
    pub fn with_pinch_slop(mut self, slop: f64) -> Self {
        self.pinch_slop = slop;
        self
    }

    /// Returns a copy with the given double-tap window.
    #[must_use]
    pub fn with_double_tap_ms(mut self, window_ms: u64) -> Self {
        self.double_tap_ms = window_ms;
        self
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: 30.0,
            pinch_slop: 30.0,
            double_tap_ms: DEFAULT_DOUBLE_TAP_MS,
        }
    }
}

/// How the event that produced a [`Classification`] should reach the child.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Routing {
    /// Deliver the event (remapped to canvas space).
    Forward,
    /// Deliver the event with its action replaced by
    /// [`PointerAction::Cancel`]. Happens at most once per sequence.
    Cancel,
    /// Do not deliver anything.
    Swallow,
}

/// A recognized gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    /// The dragging pointer moved by `delta` view pixels.
    Pan {
        /// Movement since the previous event.
        delta: Vec2,
    },
    /// A tap that was not paired with the previous one.
    Tap {
        /// Where the pointer was lifted.
        position: Point,
    },
    /// A tap within the double-tap window of the previous tap.
    DoubleTap {
        /// Where the pointer was lifted.
        position: Point,
    },
    /// A second pointer went down.
    PinchStart {
        /// Midpoint of the pair.
        midpoint: Point,
    },
    /// The pair moved after the pinch slop was exceeded.
    Pinch {
        /// Midpoint when the pair went down.
        start_midpoint: Point,
        /// Current midpoint.
        midpoint: Point,
        /// Current separation over the separation when the pair went down.
        scale: f64,
    },
    /// An active pinch ended.
    PinchEnd,
}

/// Result of classifying one event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classification {
    /// Gesture completed or continued by this event.
    pub gesture: Option<Gesture>,
    /// What to do with the event.
    pub routing: Routing,
}

impl Classification {
    fn routed(routing: Routing) -> Self {
        Self {
            gesture: None,
            routing,
        }
    }

    fn with(gesture: Gesture, routing: Routing) -> Self {
        Self {
            gesture: Some(gesture),
            routing,
        }
    }
}

/// Coarse view of the classifier state, for callers and diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// No sequence in progress.
    Idle,
    /// One pointer down, still a tap candidate.
    Tracking,
    /// One pointer panning the view.
    Dragging,
    /// Two pointers down, within the pinch slop.
    PinchTracking,
    /// Two pointers zooming the view.
    Pinching,
    /// Sequence taken over via [`GestureClassifier::claim`], or ignored.
    Claimed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum State {
    Idle,
    Tracking(TouchTrack),
    Dragging(TouchTrack),
    PinchTracking(PinchTrack),
    Pinching(PinchTrack),
    Claimed,
}

/// Stateful classifier turning touch sequences into [`Gesture`]s.
#[derive(Clone, Debug)]
pub struct GestureClassifier {
    config: GestureConfig,
    state: State,
    taps: TapTracker,
    /// The child has seen part of the current sequence and has not been
    /// cancelled.
    child_engaged: bool,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureClassifier {
    /// A classifier using `config`.
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            state: State::Idle,
            taps: TapTracker::new(config.double_tap_ms),
            child_engaged: false,
        }
    }

    /// Current thresholds.
    pub fn config(&self) -> GestureConfig {
        self.config
    }

    /// Replace the thresholds. The sequence in progress is kept.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
        self.taps = TapTracker::new(config.double_tap_ms);
    }

    /// Current phase.
    pub fn phase(&self) -> GesturePhase {
        match self.state {
            State::Idle => GesturePhase::Idle,
            State::Tracking(_) => GesturePhase::Tracking,
            State::Dragging(_) => GesturePhase::Dragging,
            State::PinchTracking(_) => GesturePhase::PinchTracking,
            State::Pinching(_) => GesturePhase::Pinching,
            State::Claimed => GesturePhase::Claimed,
        }
    }

    /// Returns `true` while the child is receiving the current sequence.
    pub fn child_engaged(&self) -> bool {
        self.child_engaged
    }

    /// Drop the sequence in progress and forget the last tap.
    pub fn reset(&mut self) {
        self.state = State::Idle;
        self.child_engaged = false;
        self.taps.reset();
    }

    /// Classify `event`.
    ///
    /// `zoomed_in` tells whether the view is currently zoomed past `1.0`;
    /// single-pointer drags only pan a zoomed view. Events with non-finite
    /// coordinates or no pointers are swallowed without touching the state.
    pub fn classify(&mut self, event: &TouchEvent, zoomed_in: bool) -> Classification {
        if !event.is_finite() {
            return Classification::routed(Routing::Swallow);
        }
        match event.pointers.as_slice() {
            [] => Classification::routed(Routing::Swallow),
            [pos] => self.single(event.action, *pos, event.time_ms, zoomed_in),
            [a, b, ..] => self.pair(event.action, *a, *b),
        }
    }

    /// Take over the rest of the sequence containing `event`.
    ///
    /// Returns [`Routing::Cancel`] the first time the child needs to be told
    /// its sequence is gone, [`Routing::Swallow`] otherwise. The classifier
    /// returns to `Idle` when `event` ends the sequence.
    pub fn claim(&mut self, event: &TouchEvent) -> Routing {
        let routing = self.consume();
        self.state = if event.action.ends_sequence() {
            State::Idle
        } else {
            State::Claimed
        };
        routing
    }

    /// Routing for an event the child must not see.
    fn consume(&mut self) -> Routing {
        if core::mem::take(&mut self.child_engaged) {
            Routing::Cancel
        } else {
            Routing::Swallow
        }
    }

    fn forward(&mut self, ends_sequence: bool) -> Routing {
        self.child_engaged = !ends_sequence;
        Routing::Forward
    }

    /// Ends the sequence on an explicit cancel.
    fn cancel(&mut self) -> Classification {
        let ended_pinch = matches!(self.state, State::Pinching(_));
        self.state = State::Idle;
        let routing = if core::mem::take(&mut self.child_engaged) {
            Routing::Forward
        } else {
            Routing::Swallow
        };
        Classification {
            gesture: ended_pinch.then_some(Gesture::PinchEnd),
            routing,
        }
    }

    fn single(
        &mut self,
        action: PointerAction,
        pos: Point,
        time_ms: u64,
        zoomed_in: bool,
    ) -> Classification {
        match action {
            PointerAction::Down => {
                self.state = State::Tracking(TouchTrack::new(pos));
                Classification::routed(self.forward(false))
            }
            PointerAction::Move => self.single_move(pos, zoomed_in),
            PointerAction::Up | PointerAction::Outside => self.single_end(pos, time_ms),
            PointerAction::Cancel => self.cancel(),
        }
    }

    fn single_move(&mut self, pos: Point, zoomed_in: bool) -> Classification {
        match &mut self.state {
            State::Idle => {
                // Down was never seen; ignore the rest of this sequence.
                self.state = State::Claimed;
                Classification::routed(Routing::Swallow)
            }
            State::Tracking(track) => {
                let delta = track.advance(pos);
                if zoomed_in && track.exceeds(self.config.touch_slop) {
                    self.state = State::Dragging(*track);
                    Classification::with(Gesture::Pan { delta }, self.consume())
                } else {
                    Classification::routed(self.forward(false))
                }
            }
            State::Dragging(track) => {
                let delta = track.advance(pos);
                Classification::with(Gesture::Pan { delta }, self.consume())
            }
            State::PinchTracking(_) => {
                self.state = State::Dragging(TouchTrack::new(pos));
                Classification::routed(self.consume())
            }
            State::Pinching(_) => {
                self.state = State::Dragging(TouchTrack::new(pos));
                Classification::with(Gesture::PinchEnd, self.consume())
            }
            State::Claimed => Classification::routed(Routing::Swallow),
        }
    }

    fn single_end(&mut self, pos: Point, time_ms: u64) -> Classification {
        let state = core::mem::replace(&mut self.state, State::Idle);
        match state {
            State::Tracking(mut track) => {
                track.advance(pos);
                if track.exceeds(self.config.touch_slop) {
                    return Classification::routed(self.forward(true));
                }
                match self.taps.on_tap(time_ms) {
                    TapKind::Single => {
                        Classification::with(Gesture::Tap { position: pos }, self.forward(true))
                    }
                    TapKind::Double => {
                        Classification::with(Gesture::DoubleTap { position: pos }, self.consume())
                    }
                }
            }
            State::Pinching(_) => Classification::with(Gesture::PinchEnd, self.consume()),
            State::Idle
            | State::Dragging(_)
            | State::PinchTracking(_)
            | State::Claimed => Classification::routed(self.consume()),
        }
    }

    fn pair(&mut self, action: PointerAction, a: Point, b: Point) -> Classification {
        match action {
            PointerAction::Cancel => self.cancel(),
            PointerAction::Up | PointerAction::Outside => {
                // One pointer of the pair lifted; the other keeps the
                // sequence alive and is handled as a single pointer.
                if !matches!(self.state, State::PinchTracking(_) | State::Pinching(_)) {
                    self.state = State::Claimed;
                }
                Classification::routed(self.consume())
            }
            PointerAction::Down | PointerAction::Move => {
                let gesture = self.pair_move(a, b);
                Classification {
                    gesture,
                    routing: self.consume(),
                }
            }
        }
    }

    fn pair_move(&mut self, a: Point, b: Point) -> Option<Gesture> {
        match &mut self.state {
            State::PinchTracking(pinch) => {
                pinch.advance(a, b);
                if pinch.scale().is_none() {
                    // The pair went down on a single spot; measure from here.
                    *pinch = PinchTrack::new(a, b);
                    return Some(Gesture::PinchStart {
                        midpoint: pinch.midpoint(),
                    });
                }
                if pinch.distance_change() < self.config.pinch_slop {
                    return None;
                }
                let pinch = *pinch;
                self.state = State::Pinching(pinch);
                Some(pinch_gesture(&pinch))
            }
            State::Pinching(pinch) => {
                pinch.advance(a, b);
                Some(pinch_gesture(pinch))
            }
            State::Idle | State::Tracking(_) | State::Dragging(_) | State::Claimed => {
                let pinch = PinchTrack::new(a, b);
                self.state = State::PinchTracking(pinch);
                Some(Gesture::PinchStart {
                    midpoint: pinch.midpoint(),
                })
            }
        }
    }
}

fn pinch_gesture(pinch: &PinchTrack) -> Gesture {
    Gesture::Pinch {
        start_midpoint: pinch.start_midpoint(),
        midpoint: pinch.midpoint(),
        scale: pinch.scale().unwrap_or(1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(action: PointerAction, x: f64, y: f64, t: u64) -> TouchEvent {
        TouchEvent::single(action, Point::new(x, y), t)
    }

    fn two(action: PointerAction, a: (f64, f64), b: (f64, f64)) -> TouchEvent {
        TouchEvent::pair(action, Point::new(a.0, a.1), Point::new(b.0, b.1), 0)
    }

    #[test]
    fn short_sequence_is_a_forwarded_tap() {
        let mut g = GestureClassifier::default();
        let down = g.classify(&one(PointerAction::Down, 10.0, 10.0, 0), true);
        assert_eq!(down.routing, Routing::Forward);
        assert_eq!(g.phase(), GesturePhase::Tracking);

        let mv = g.classify(&one(PointerAction::Move, 20.0, 10.0, 10), true);
        assert_eq!(mv, Classification::routed(Routing::Forward));

        let up = g.classify(&one(PointerAction::Up, 29.0, 10.0, 20), true);
        assert_eq!(
            up,
            Classification::with(
                Gesture::Tap {
                    position: Point::new(29.0, 10.0)
                },
                Routing::Forward
            )
        );
        assert_eq!(g.phase(), GesturePhase::Idle);
        assert!(!g.child_engaged());
    }

    #[test]
    fn long_move_when_unzoomed_is_forwarded_but_not_a_tap() {
        let mut g = GestureClassifier::default();
        g.classify(&one(PointerAction::Down, 0.0, 0.0, 0), false);
        let mv = g.classify(&one(PointerAction::Move, 100.0, 0.0, 10), false);
        assert_eq!(mv.routing, Routing::Forward);
        assert_eq!(g.phase(), GesturePhase::Tracking);
        let up = g.classify(&one(PointerAction::Up, 100.0, 0.0, 20), false);
        assert_eq!(up, Classification::routed(Routing::Forward));
    }

    #[test]
    fn drag_cancels_child_exactly_once() {
        let mut g = GestureClassifier::default();
        g.classify(&one(PointerAction::Down, 0.0, 0.0, 0), true);
        let small = g.classify(&one(PointerAction::Move, 10.0, 0.0, 5), true);
        assert_eq!(small.routing, Routing::Forward);

        let start = g.classify(&one(PointerAction::Move, 30.0, 0.0, 10), true);
        assert_eq!(
            start,
            Classification::with(
                Gesture::Pan {
                    delta: Vec2::new(20.0, 0.0)
                },
                Routing::Cancel
            )
        );
        assert_eq!(g.phase(), GesturePhase::Dragging);

        let next = g.classify(&one(PointerAction::Move, 25.0, 5.0, 20), true);
        assert_eq!(
            next,
            Classification::with(
                Gesture::Pan {
                    delta: Vec2::new(-5.0, 5.0)
                },
                Routing::Swallow
            )
        );

        // Coming back near the start does not turn the release into a tap.
        let up = g.classify(&one(PointerAction::Up, 1.0, 0.0, 30), true);
        assert_eq!(up, Classification::routed(Routing::Swallow));
        assert_eq!(g.phase(), GesturePhase::Idle);
    }

    #[test]
    fn double_tap_is_consumed() {
        let mut g = GestureClassifier::default();
        g.classify(&one(PointerAction::Down, 50.0, 50.0, 0), false);
        g.classify(&one(PointerAction::Up, 50.0, 50.0, 40), false);

        let down = g.classify(&one(PointerAction::Down, 52.0, 50.0, 200), false);
        assert_eq!(down.routing, Routing::Forward);
        let up = g.classify(&one(PointerAction::Up, 52.0, 50.0, 240), false);
        assert_eq!(
            up,
            Classification::with(
                Gesture::DoubleTap {
                    position: Point::new(52.0, 50.0)
                },
                Routing::Cancel
            )
        );
    }

    #[test]
    fn slow_second_tap_is_single() {
        let mut g = GestureClassifier::default();
        g.classify(&one(PointerAction::Down, 0.0, 0.0, 0), false);
        g.classify(&one(PointerAction::Up, 0.0, 0.0, 10), false);
        g.classify(&one(PointerAction::Down, 0.0, 0.0, 600), false);
        let up = g.classify(&one(PointerAction::Up, 0.0, 0.0, 610), false);
        assert!(matches!(up.gesture, Some(Gesture::Tap { .. })));
    }

    #[test]
    fn move_without_down_is_ignored_until_the_sequence_ends() {
        let mut g = GestureClassifier::default();
        let mv = g.classify(&one(PointerAction::Move, 5.0, 5.0, 0), true);
        assert_eq!(mv, Classification::routed(Routing::Swallow));
        assert_eq!(g.phase(), GesturePhase::Claimed);
        let up = g.classify(&one(PointerAction::Up, 5.0, 5.0, 10), true);
        assert_eq!(up, Classification::routed(Routing::Swallow));
        assert_eq!(g.phase(), GesturePhase::Idle);
    }

    #[test]
    fn outside_completes_a_tap_like_up() {
        let mut g = GestureClassifier::default();
        g.classify(&one(PointerAction::Down, 0.0, 0.0, 0), false);
        let out = g.classify(&one(PointerAction::Outside, 4.0, 0.0, 10), false);
        assert_eq!(
            out,
            Classification::with(
                Gesture::Tap {
                    position: Point::new(4.0, 0.0)
                },
                Routing::Forward
            )
        );
        assert_eq!(g.phase(), GesturePhase::Idle);

        g.classify(&one(PointerAction::Down, 0.0, 0.0, 100), false);
        let second = g.classify(&one(PointerAction::Outside, 0.0, 0.0, 110), false);
        assert_eq!(
            second,
            Classification::with(
                Gesture::DoubleTap {
                    position: Point::ZERO
                },
                Routing::Cancel
            )
        );
    }

    #[test]
    fn long_outside_is_not_a_tap() {
        let mut g = GestureClassifier::default();
        g.classify(&one(PointerAction::Down, 0.0, 0.0, 0), false);
        let out = g.classify(&one(PointerAction::Outside, 40.0, 0.0, 10), false);
        assert_eq!(out, Classification::routed(Routing::Forward));
    }

    #[test]
    fn pinch_waits_for_slop_then_reports_ratio() {
        let mut g = GestureClassifier::default();
        g.classify(&one(PointerAction::Down, 100.0, 100.0, 0), true);
        let start = g.classify(&two(PointerAction::Down, (100.0, 100.0), (200.0, 100.0)), true);
        assert_eq!(
            start,
            Classification::with(
                Gesture::PinchStart {
                    midpoint: Point::new(150.0, 100.0)
                },
                Routing::Cancel
            )
        );

        let within = g.classify(&two(PointerAction::Move, (90.0, 100.0), (210.0, 100.0)), true);
        assert_eq!(within, Classification::routed(Routing::Swallow));
        assert_eq!(g.phase(), GesturePhase::PinchTracking);

        let past = g.classify(&two(PointerAction::Move, (50.0, 100.0), (250.0, 100.0)), true);
        assert_eq!(
            past,
            Classification::with(
                Gesture::Pinch {
                    start_midpoint: Point::new(150.0, 100.0),
                    midpoint: Point::new(150.0, 100.0),
                    scale: 2.0,
                },
                Routing::Swallow
            )
        );
        assert_eq!(g.phase(), GesturePhase::Pinching);
    }

    #[test]
    fn pinch_then_single_pointer_drags() {
        let mut g = GestureClassifier::default();
        g.classify(&two(PointerAction::Down, (0.0, 0.0), (100.0, 0.0)), true);
        g.classify(&two(PointerAction::Move, (0.0, 0.0), (200.0, 0.0)), true);
        let lifted = g.classify(&two(PointerAction::Up, (0.0, 0.0), (200.0, 0.0)), true);
        assert_eq!(lifted, Classification::routed(Routing::Swallow));

        let mv = g.classify(&one(PointerAction::Move, 0.0, 0.0, 10), true);
        assert_eq!(mv, Classification::with(Gesture::PinchEnd, Routing::Swallow));
        assert_eq!(g.phase(), GesturePhase::Dragging);

        let pan = g.classify(&one(PointerAction::Move, 5.0, 0.0, 20), true);
        assert_eq!(
            pan.gesture,
            Some(Gesture::Pan {
                delta: Vec2::new(5.0, 0.0)
            })
        );
        let up = g.classify(&one(PointerAction::Up, 5.0, 0.0, 30), true);
        assert_eq!(up, Classification::routed(Routing::Swallow));
    }

    #[test]
    fn pinch_from_a_single_spot_restarts_measurement() {
        let mut g = GestureClassifier::default();
        g.classify(&two(PointerAction::Down, (50.0, 50.0), (50.0, 50.0)), true);
        let restart = g.classify(&two(PointerAction::Move, (40.0, 50.0), (60.0, 50.0)), true);
        assert_eq!(
            restart.gesture,
            Some(Gesture::PinchStart {
                midpoint: Point::new(50.0, 50.0)
            })
        );
        let pinch = g.classify(&two(PointerAction::Move, (10.0, 50.0), (90.0, 50.0)), true);
        assert!(matches!(pinch.gesture, Some(Gesture::Pinch { scale, .. }) if scale == 4.0));
    }

    #[test]
    fn cancel_is_forwarded_only_to_an_engaged_child() {
        let mut g = GestureClassifier::default();
        g.classify(&one(PointerAction::Down, 0.0, 0.0, 0), true);
        let cancel = g.classify(&one(PointerAction::Cancel, 0.0, 0.0, 5), true);
        assert_eq!(cancel.routing, Routing::Forward);

        g.classify(&one(PointerAction::Down, 0.0, 0.0, 10), true);
        g.classify(&one(PointerAction::Move, 50.0, 0.0, 15), true);
        let cancel = g.classify(&one(PointerAction::Cancel, 50.0, 0.0, 20), true);
        assert_eq!(cancel.routing, Routing::Swallow);
        assert_eq!(g.phase(), GesturePhase::Idle);
    }

    #[test]
    fn claim_cancels_once_then_swallows() {
        let mut g = GestureClassifier::default();
        let down = one(PointerAction::Down, 0.0, 0.0, 0);
        assert_eq!(g.classify(&down, true).routing, Routing::Forward);

        let mv = one(PointerAction::Move, 1.0, 0.0, 5);
        assert_eq!(g.claim(&mv), Routing::Cancel);
        assert_eq!(g.phase(), GesturePhase::Claimed);
        assert_eq!(g.claim(&mv), Routing::Swallow);

        let stray = g.classify(&one(PointerAction::Move, 2.0, 0.0, 6), true);
        assert_eq!(stray, Classification::routed(Routing::Swallow));

        assert_eq!(g.claim(&one(PointerAction::Up, 2.0, 0.0, 7)), Routing::Swallow);
        assert_eq!(g.phase(), GesturePhase::Idle);
    }

    #[test]
    fn non_finite_events_leave_state_alone() {
        let mut g = GestureClassifier::default();
        g.classify(&one(PointerAction::Down, 0.0, 0.0, 0), true);
        let bad = g.classify(&one(PointerAction::Move, f64::NAN, 0.0, 1), true);
        assert_eq!(bad, Classification::routed(Routing::Swallow));
        assert_eq!(g.phase(), GesturePhase::Tracking);
        assert!(g.child_engaged());
    }

    #[test]
    fn configured_slop_is_respected() {
        let mut g = GestureClassifier::new(GestureConfig::default().with_touch_slop(5.0));
        g.classify(&one(PointerAction::Down, 0.0, 0.0, 0), true);
        let mv = g.classify(&one(PointerAction::Move, 6.0, 0.0, 1), true);
        assert_eq!(mv.routing, Routing::Cancel);
    }
}
