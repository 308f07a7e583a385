// Copyright 2025 the Topoview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Movement tracking for a single pointer and for a pointer pair.
//!
//! [`TouchTrack`] follows one pointer from its first contact and reports
//! per-event deltas and the distance travelled from the start. [`PinchTrack`]
//! follows the distance and midpoint of a pointer pair.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use topoview_event_state::track::TouchTrack;
//!
//! let mut track = TouchTrack::new(Point::new(10.0, 20.0));
//! assert_eq!(track.advance(Point::new(13.0, 24.0)), Vec2::new(3.0, 4.0));
//! assert_eq!(track.travel(), 5.0);
//! assert!(!track.exceeds(30.0));
//! ```

use kurbo::{Point, Vec2};

/// Tracks one pointer from its first contact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchTrack {
    start: Point,
    last: Point,
}

impl TouchTrack {
    /// Start tracking at `start`.
    pub fn new(start: Point) -> Self {
        Self { start, last: start }
    }

    /// Where the pointer first touched.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Most recent position.
    pub fn last(&self) -> Point {
        self.last
    }

    /// Record a new position and return the movement since the previous one.
    pub fn advance(&mut self, pos: Point) -> Vec2 {
        let delta = pos - self.last;
        self.last = pos;
        delta
    }

    /// Offset of the most recent position from the start.
    pub fn offset(&self) -> Vec2 {
        self.last - self.start
    }

    /// Straight-line distance of the most recent position from the start.
    pub fn travel(&self) -> f64 {
        self.offset().hypot()
    }

    /// Returns `true` once the pointer is at least `slop` away from its start.
    pub fn exceeds(&self, slop: f64) -> bool {
        self.travel() >= slop
    }
}

/// Tracks a pair of pointers from the moment the second one went down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchTrack {
    start_distance: f64,
    start_midpoint: Point,
    distance: f64,
    midpoint: Point,
}

impl PinchTrack {
    /// Start tracking the pair `a`, `b`.
    pub fn new(a: Point, b: Point) -> Self {
        let distance = a.distance(b);
        let midpoint = a.midpoint(b);
        Self {
            start_distance: distance,
            start_midpoint: midpoint,
            distance,
            midpoint,
        }
    }

    /// Record new positions for the pair.
    pub fn advance(&mut self, a: Point, b: Point) {
        self.distance = a.distance(b);
        self.midpoint = a.midpoint(b);
    }

    /// Pointer distance when tracking began.
    pub fn start_distance(&self) -> f64 {
        self.start_distance
    }

    /// Midpoint when tracking began.
    pub fn start_midpoint(&self) -> Point {
        self.start_midpoint
    }

    /// Current pointer distance.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Current midpoint.
    pub fn midpoint(&self) -> Point {
        self.midpoint
    }

    /// How far the pointer distance has changed since tracking began.
    pub fn distance_change(&self) -> f64 {
        (self.distance - self.start_distance).abs()
    }

    /// Ratio of the current distance to the starting distance.
    ///
    /// Returns `None` when the pair started on top of each other.
    pub fn scale(&self) -> Option<f64> {
        if self.start_distance > 0.0 {
            Some(self.distance / self.start_distance)
        } else {
            None
        }
    }
}
