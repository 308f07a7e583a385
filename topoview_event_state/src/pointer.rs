// Copyright 2025 the Topoview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch events as delivered by the platform.

use kurbo::Point;
use smallvec::{SmallVec, smallvec};

/// What happened to the touch sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerAction {
    /// First contact, or an additional pointer going down.
    Down,
    /// One or more pointers moved.
    Move,
    /// A pointer was lifted.
    Up,
    /// The sequence left the view bounds.
    Outside,
    /// The sequence was aborted, either by the platform or by a gesture
    /// taking it over.
    Cancel,
}

impl PointerAction {
    /// Returns `true` for actions that end a touch sequence.
    pub fn ends_sequence(self) -> bool {
        matches!(self, Self::Up | Self::Outside | Self::Cancel)
    }
}

/// A touch event: an action, the positions of every pointer currently in
/// contact, and a millisecond timestamp.
///
/// Positions are in the coordinate space of whoever receives the event; the
/// zoom engine receives view coordinates and hands its child canvas
/// coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchEvent {
    /// Action for this event.
    pub action: PointerAction,
    /// Pointer positions, first pointer first.
    pub pointers: SmallVec<[Point; 2]>,
    /// Timestamp in milliseconds.
    pub time_ms: u64,
}

impl TouchEvent {
    /// A single-pointer event.
    pub fn single(action: PointerAction, position: Point, time_ms: u64) -> Self {
        Self {
            action,
            pointers: smallvec![position],
            time_ms,
        }
    }

    /// A two-pointer event.
    pub fn pair(action: PointerAction, first: Point, second: Point, time_ms: u64) -> Self {
        Self {
            action,
            pointers: smallvec![first, second],
            time_ms,
        }
    }

    /// Number of pointers in contact.
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Position of the first pointer, if any.
    pub fn position(&self) -> Option<Point> {
        self.pointers.first().copied()
    }

    /// Returns `true` when every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.pointers.iter().all(|p| p.x.is_finite() && p.y.is_finite())
    }

    /// A copy of this event carrying `action` instead.
    #[must_use]
    pub fn with_action(&self, action: PointerAction) -> Self {
        Self {
            action,
            pointers: self.pointers.clone(),
            time_ms: self.time_ms,
        }
    }

    /// A copy of this event with every position passed through `f`.
    #[must_use]
    pub fn map_positions(&self, mut f: impl FnMut(Point) -> Point) -> Self {
        Self {
            action: self.action,
            pointers: self.pointers.iter().map(|p| f(*p)).collect(),
            time_ms: self.time_ms,
        }
    }
}
